use serde::{Deserialize, Serialize};

use crate::extract::BankRecord;
use crate::format::format_billions;

/// Display precision used for bank deposit figures.
pub const BANK_DISPLAY_DECIMALS: u32 = 1;

/// Display precision used for the protocol deposit figure.
pub const PROTOCOL_DISPLAY_DECIMALS: u32 = 3;

/// One row of the dashboard: either a bank or the protocol.
///
/// `deposits_value` is expressed in billions and is the only ranking key.
/// `rank` is whatever the source reported until the aggregator overwrites it
/// with the entry's position in the combined ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub deposits: String,
    pub deposits_value: f64,
    pub is_aave: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<f64>,
}

impl Entry {
    /// Builds a bank row from an extracted record.
    pub fn from_bank(record: &BankRecord, grouping: bool) -> Self {
        Self {
            name: record.name.clone(),
            deposits: format_billions(record.deposits, BANK_DISPLAY_DECIMALS, grouping),
            deposits_value: record.deposits,
            is_aave: false,
            rank: Some(record.rank as usize),
            logo: None,
            assets: Some(record.total_assets),
        }
    }

    /// Builds the protocol row from a deposits figure in billions.
    pub fn protocol(
        name: impl Into<String>,
        logo: impl Into<String>,
        deposits_billions: f64,
    ) -> Self {
        Self {
            name: name.into(),
            deposits: format_billions(deposits_billions, PROTOCOL_DISPLAY_DECIMALS, false),
            deposits_value: deposits_billions,
            is_aave: true,
            rank: None,
            logo: Some(logo.into()),
            assets: None,
        }
    }
}
