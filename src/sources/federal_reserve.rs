//! Federal Reserve statistical release: Large Commercial Banks.

use anyhow::{Context, Result};
use reqwest::Client;

use super::BankReportSource;

pub const LARGE_BANKS_REPORT_URL: &str = "https://www.federalreserve.gov/releases/lbr/current/";

/// Fetches the current large commercial banks release as text.
#[derive(Debug, Clone)]
pub struct FederalReserveSource {
    client: Client,
    url: String,
}

impl FederalReserveSource {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            url: LARGE_BANKS_REPORT_URL.to_string(),
        }
    }

    /// Fetch the report from another address (mirrors, tests).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl Default for FederalReserveSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl BankReportSource for FederalReserveSource {
    async fn fetch_report(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "text/html")
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Federal Reserve release returned {status}");
        }

        response
            .text()
            .await
            .context("Failed to read Federal Reserve release body")
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn name(&self) -> &str {
        "federal_reserve"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let source = FederalReserveSource::default();
        assert_eq!(source.url(), LARGE_BANKS_REPORT_URL);
        assert_eq!(source.name(), "federal_reserve");
    }

    #[test]
    fn test_with_url() {
        let source = FederalReserveSource::new().with_url("http://127.0.0.1:1/lbr");
        assert_eq!(source.url(), "http://127.0.0.1:1/lbr");
    }
}
