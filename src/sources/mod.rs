//! Upstream data sources.

mod defillama;
mod federal_reserve;

use anyhow::Result;

use crate::normalize::ChainValues;

pub use defillama::{DefiLlamaSource, DEFILLAMA_BASE_URL, DEFAULT_PROTOCOL_SLUG};
pub use federal_reserve::{FederalReserveSource, LARGE_BANKS_REPORT_URL};

/// `User-Agent` sent with every upstream request.
pub const USER_AGENT: &str = concat!("aavebanks/", env!("CARGO_PKG_VERSION"));

/// Per-chain value locked for the protocol.
#[async_trait::async_trait]
pub trait ProtocolSource: Send + Sync {
    async fn fetch_chain_values(&self) -> Result<ChainValues>;

    fn name(&self) -> &str;
}

/// Raw text of the large commercial banks release.
#[async_trait::async_trait]
pub trait BankReportSource: Send + Sync {
    async fn fetch_report(&self) -> Result<String>;

    /// Where the report comes from; shown to users as the data source.
    fn url(&self) -> &str;

    fn name(&self) -> &str;
}

/// Builds the shared HTTP client used by the default sources.
pub fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}
