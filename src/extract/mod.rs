//! Bank record extraction from the Federal Reserve large commercial banks
//! release.
//!
//! The release is an HTML page whose table layout is not guaranteed to stay
//! stable, so extraction is split into tiers that are tried in order. Each
//! tier is independent and testable on its own; [`BankExtractor`] runs them
//! and reports which one produced the records.

mod known_banks;
mod primary;
mod token_scan;

use serde::Serialize;

pub use known_banks::{known_banks, KnownBanksTier, KNOWN_BANK_COUNT};
pub use primary::{LineItemTier, PRIMARY_DEPOSIT_RATIO};
pub use token_scan::{TokenScanTier, TOKEN_SCAN_DEPOSIT_RATIO};

/// Maximum number of records any tier returns ("top 100 banks").
pub const MAX_BANKS: usize = 100;

/// A bank parsed from the release. All figures are in billions.
#[derive(Debug, Clone, PartialEq)]
pub struct BankRecord {
    pub name: String,
    /// Rank as printed in the source document.
    pub rank: u32,
    pub total_assets: f64,
    /// Not every tier can see the domestic assets column.
    pub domestic_assets: Option<f64>,
    /// Estimated deposits.
    pub deposits: f64,
}

/// How much a tier's output can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Full column match including domestic assets.
    High,
    /// Loose token heuristics.
    Low,
    /// Static data, not derived from the document at all.
    Fallback,
}

/// One extraction strategy.
pub trait ExtractionTier: Send + Sync {
    fn name(&self) -> &'static str;

    fn confidence(&self) -> Confidence;

    /// Returns at most [`MAX_BANKS`] records in document order. An empty
    /// result means the tier did not recognise the document.
    fn parse(&self, html: &str) -> Vec<BankRecord>;
}

/// Result of running the tiers over a document.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<BankRecord>,
    pub tier: &'static str,
    pub confidence: Confidence,
}

impl Extraction {
    /// The static table, for when the document could not be fetched at all.
    pub fn known_banks() -> Self {
        let tier = KnownBanksTier;
        Self {
            records: known_banks().to_vec(),
            tier: tier.name(),
            confidence: tier.confidence(),
        }
    }
}

/// Runs extraction tiers in order and keeps the first non-empty result.
pub struct BankExtractor {
    tiers: Vec<Box<dyn ExtractionTier>>,
}

impl BankExtractor {
    /// Primary pattern, then token scan, then the static table.
    pub fn new() -> Self {
        Self::with_tiers(vec![
            Box::new(LineItemTier),
            Box::new(TokenScanTier),
            Box::new(KnownBanksTier),
        ])
    }

    /// Only the tiers that actually read the document. Extraction can come
    /// back empty.
    pub fn scraping_only() -> Self {
        Self::with_tiers(vec![Box::new(LineItemTier), Box::new(TokenScanTier)])
    }

    pub fn with_tiers(tiers: Vec<Box<dyn ExtractionTier>>) -> Self {
        Self { tiers }
    }

    /// Names of the installed tiers, in the order they run.
    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|tier| tier.name()).collect()
    }

    pub fn extract(&self, html: &str) -> Option<Extraction> {
        for tier in &self.tiers {
            let mut records = tier.parse(html);
            if records.is_empty() {
                tracing::debug!(tier = tier.name(), "extraction tier matched nothing");
                continue;
            }
            records.truncate(MAX_BANKS);

            let confidence = tier.confidence();
            match confidence {
                Confidence::High => {
                    tracing::info!(tier = tier.name(), count = records.len(), "extracted banks")
                }
                Confidence::Low | Confidence::Fallback => tracing::warn!(
                    tier = tier.name(),
                    count = records.len(),
                    "bank report layout not recognised by the primary pattern"
                ),
            }

            return Some(Extraction {
                records,
                tier: tier.name(),
                confidence,
            });
        }

        tracing::warn!("no extraction tier produced bank records");
        None
    }
}

impl Default for BankExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses an integer printed with thousands separators, e.g. `3,643,099`.
pub(crate) fn parse_grouped_int(s: &str) -> Option<u64> {
    let digits: String = s.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Millions to billions.
pub(crate) fn millions_to_billions(millions: u64) -> f64 {
    millions as f64 / 1000.0
}
