mod support;

use std::sync::Arc;

use aavebanks::normalize::FALLBACK_DEPOSITS_BILLIONS;
use aavebanks::sources::{DefiLlamaSource, ProtocolSource};
use aavebanks::DashboardService;
use anyhow::Result;
use support::MockBankReportSource;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROTOCOL_BODY: &str = r#"{
    "id": "1599",
    "name": "Aave V3",
    "currentChainTvls": {
        "Ethereum": 40000000000,
        "Ethereum-borrowed": 15000000000,
        "Arbitrum": 3000000000,
        "Arbitrum-borrowed": 1000000000,
        "Base": 921000000,
        "borrowed": 24000000000
    }
}"#;

#[tokio::test]
async fn defillama_fetch_hits_mock_server() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protocol/aave-v3"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PROTOCOL_BODY, "application/json"))
        .mount(&server)
        .await;

    let provider = DefiLlamaSource::new().with_base_url(server.uri());
    let values = provider.fetch_chain_values().await?;

    assert_eq!(values.base, 43_921_000_000.0);
    assert_eq!(values.borrowed, 24_000_000_000.0);
    assert!((values.deposits_billions() - 67.921).abs() < 1e-9);

    Ok(())
}

#[tokio::test]
async fn defillama_uses_configured_slug() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protocol/aave"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"currentChainTvls": {"Ethereum": 1000000000}}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let provider = DefiLlamaSource::new()
        .with_base_url(format!("{}/", server.uri()))
        .with_slug("aave");
    let values = provider.fetch_chain_values().await?;

    assert_eq!(values.total(), 1e9);

    Ok(())
}

#[tokio::test]
async fn defillama_error_status_is_an_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protocol/aave-v3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = DefiLlamaSource::new().with_base_url(server.uri());
    let err = provider
        .fetch_chain_values()
        .await
        .expect_err("500 should fail");
    assert!(format!("{err:#}").contains("DeFiLlama returned an error status"));

    Ok(())
}

#[tokio::test]
async fn defillama_failure_serves_fallback_deposits() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = DefiLlamaSource::new().with_base_url(server.uri());
    let service = DashboardService::new(Arc::new(provider), Arc::new(MockBankReportSource::new()));

    let entry = service.protocol_entry().await?;
    assert!(entry.is_aave);
    assert_eq!(entry.deposits_value, FALLBACK_DEPOSITS_BILLIONS);
    assert_eq!(entry.deposits, "$67.921 B");

    Ok(())
}

#[tokio::test]
async fn defillama_failure_without_fallbacks_is_an_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "text/plain"))
        .mount(&server)
        .await;

    let provider = DefiLlamaSource::new().with_base_url(server.uri());
    let service = DashboardService::new(Arc::new(provider), Arc::new(MockBankReportSource::new()))
        .with_fallbacks(false);

    let err = service
        .protocol_entry()
        .await
        .expect_err("unparseable body should fail");
    assert!(matches!(err, aavebanks::DashboardError::ProtocolUnavailable(_)));

    Ok(())
}
