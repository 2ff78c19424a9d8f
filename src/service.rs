use std::sync::Arc;

use anyhow::Result;

use crate::aggregate::{rank_entries, Ranking};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::entry::Entry;
use crate::extract::{BankExtractor, Confidence, Extraction};
use crate::normalize::{fallback_protocol_entry, protocol_entry};
use crate::sources::{
    http_client, BankReportSource, DefiLlamaSource, FederalReserveSource, ProtocolSource,
};

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("protocol data unavailable: {0:#}")]
    ProtocolUnavailable(#[source] anyhow::Error),

    #[error("bank data unavailable: {0:#}")]
    BanksUnavailable(#[source] anyhow::Error),

    #[error("no bank records could be extracted from {source_url}")]
    NoBankRecords { source_url: String },
}

/// Bank rows as extracted, before ranking against the protocol.
#[derive(Debug, Clone)]
pub struct BankList {
    pub entries: Vec<Entry>,
    /// Extraction tier that produced the rows.
    pub tier: &'static str,
    pub confidence: Confidence,
    pub source: String,
    pub last_updated: String,
}

/// The ranked dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub ranking: Ranking,
    pub source: String,
    pub last_updated: String,
}

/// Fetches both sources and builds the dashboard. Holds no state between
/// calls; every call re-fetches and re-parses.
pub struct DashboardService {
    protocol: Arc<dyn ProtocolSource>,
    banks: Arc<dyn BankReportSource>,
    extractor: BankExtractor,
    clock: Arc<dyn Clock>,
    use_fallbacks: bool,
    currency_grouping: bool,
}

impl DashboardService {
    /// Fallbacks enabled, system clock.
    pub fn new(protocol: Arc<dyn ProtocolSource>, banks: Arc<dyn BankReportSource>) -> Self {
        Self {
            protocol,
            banks,
            extractor: BankExtractor::new(),
            clock: Arc::new(SystemClock),
            use_fallbacks: true,
            currency_grouping: false,
        }
    }

    /// Builds the DeFiLlama and Federal Reserve sources from configuration,
    /// sharing one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http_client()?;
        let protocol = DefiLlamaSource::with_client(client.clone())
            .with_base_url(config.sources.defillama_base_url.as_str())
            .with_slug(config.sources.protocol_slug.as_str());
        let banks = FederalReserveSource::with_client(client)
            .with_url(config.sources.bank_report_url.as_str());

        Ok(Self::new(Arc::new(protocol), Arc::new(banks))
            .with_fallbacks(config.sources.use_fallbacks)
            .with_currency_grouping(config.display.currency_grouping))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Disabling fallbacks also removes the static bank table from the
    /// extraction tiers.
    pub fn with_fallbacks(mut self, use_fallbacks: bool) -> Self {
        self.use_fallbacks = use_fallbacks;
        self.extractor = if use_fallbacks {
            BankExtractor::new()
        } else {
            BankExtractor::scraping_only()
        };
        self
    }

    pub fn with_currency_grouping(mut self, grouping: bool) -> Self {
        self.currency_grouping = grouping;
        self
    }

    /// Where the bank data comes from.
    pub fn source_url(&self) -> &str {
        self.banks.url()
    }

    /// The protocol row, or the fixed fallback row when the source fails.
    pub async fn protocol_entry(&self) -> Result<Entry, DashboardError> {
        match self.protocol.fetch_chain_values().await {
            Ok(values) => {
                let entry = protocol_entry(&values);
                tracing::debug!(
                    source = self.protocol.name(),
                    deposits = entry.deposits_value,
                    "fetched protocol deposits"
                );
                Ok(entry)
            }
            Err(err) if self.use_fallbacks => {
                tracing::warn!(
                    source = self.protocol.name(),
                    error = %format!("{err:#}"),
                    "protocol source failed, serving fallback deposits"
                );
                Ok(fallback_protocol_entry())
            }
            Err(err) => Err(DashboardError::ProtocolUnavailable(err)),
        }
    }

    /// Bank rows in source order.
    pub async fn bank_list(&self) -> Result<BankList, DashboardError> {
        let extraction = self.extract_banks().await?;

        let entries = extraction
            .records
            .iter()
            .map(|record| Entry::from_bank(record, self.currency_grouping))
            .collect();

        Ok(BankList {
            entries,
            tier: extraction.tier,
            confidence: extraction.confidence,
            source: self.source_url().to_string(),
            last_updated: self.clock.timestamp(),
        })
    }

    /// Fetches both sources concurrently and ranks the result.
    ///
    /// Fails as a whole if either source is unavailable and no fallback
    /// applies; never returns a partial ranking.
    pub async fn dashboard(&self) -> Result<Dashboard, DashboardError> {
        let (protocol, banks) = tokio::join!(self.protocol_entry(), self.bank_list());
        let protocol = protocol?;
        let banks = banks?;

        let ranking = rank_entries(banks.entries, protocol);
        tracing::info!(
            total = ranking.entries.len(),
            aave_rank = ?ranking.aave_rank,
            tier = banks.tier,
            "built dashboard"
        );

        Ok(Dashboard {
            ranking,
            source: banks.source,
            last_updated: self.clock.timestamp(),
        })
    }

    async fn extract_banks(&self) -> Result<Extraction, DashboardError> {
        let html = match self.banks.fetch_report().await {
            Ok(html) => html,
            Err(err) if self.use_fallbacks => {
                tracing::warn!(
                    source = self.banks.name(),
                    error = %format!("{err:#}"),
                    "bank report unavailable, serving static bank table"
                );
                return Ok(Extraction::known_banks());
            }
            Err(err) => return Err(DashboardError::BanksUnavailable(err)),
        };

        self.extractor
            .extract(&html)
            .ok_or_else(|| DashboardError::NoBankRecords {
                source_url: self.source_url().to_string(),
            })
    }
}
