//! DeFiLlama protocol TVL source.
//!
//! `GET /protocol/{slug}` returns the full protocol history (several MB for
//! Aave). Only `currentChainTvls` is deserialized.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use super::ProtocolSource;
use crate::normalize::ChainValues;

pub const DEFILLAMA_BASE_URL: &str = "https://api.llama.fi";
pub const DEFAULT_PROTOCOL_SLUG: &str = "aave-v3";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProtocolResponse {
    current_chain_tvls: ChainValues,
}

/// DeFiLlama protocol source. No API key is required.
#[derive(Debug, Clone)]
pub struct DefiLlamaSource {
    client: Client,
    base_url: String,
    slug: String,
}

impl DefiLlamaSource {
    /// Creates a source for the default protocol with a default HTTP client.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Creates a source with a custom HTTP client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFILLAMA_BASE_URL.to_string(),
            slug: DEFAULT_PROTOCOL_SLUG.to_string(),
        }
    }

    /// Points the source at another API host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn url(&self) -> String {
        format!("{}/protocol/{}", self.base_url, self.slug)
    }
}

impl Default for DefiLlamaSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProtocolSource for DefiLlamaSource {
    async fn fetch_chain_values(&self) -> Result<ChainValues> {
        let url = self.url();

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to reach DeFiLlama at {url}"))?
            .error_for_status()
            .context("DeFiLlama returned an error status")?
            .json::<ProtocolResponse>()
            .await
            .context("Failed to parse DeFiLlama protocol response")?;

        Ok(response.current_chain_tvls)
    }

    fn name(&self) -> &str {
        "defillama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "id": "1599",
        "name": "Aave V3",
        "currentChainTvls": {
            "Ethereum": 40000000000,
            "Ethereum-borrowed": 20000000000,
            "Arbitrum": 2500000000,
            "Arbitrum-borrowed": 1000000000,
            "borrowed": 21000000000
        },
        "tvl": [{"date": 1700000000, "totalLiquidityUSD": 1.0}]
    }"#;

    #[test]
    fn test_parse_protocol_response() {
        let response: ProtocolResponse =
            serde_json::from_str(SAMPLE_RESPONSE).expect("Failed to parse response");
        assert_eq!(response.current_chain_tvls, ChainValues::new(42.5e9, 21e9));
    }

    #[test]
    fn test_missing_chain_tvls_is_an_error() {
        assert!(serde_json::from_str::<ProtocolResponse>(r#"{"name": "Aave V3"}"#).is_err());
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let source = DefiLlamaSource::new()
            .with_base_url("http://localhost:9999/")
            .with_slug("aave");
        assert_eq!(source.url(), "http://localhost:9999/protocol/aave");
    }

    #[test]
    fn test_default_url() {
        assert_eq!(
            DefiLlamaSource::default().url(),
            "https://api.llama.fi/protocol/aave-v3"
        );
    }
}
