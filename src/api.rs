//! JSON envelopes shared by the HTTP server and `--json` CLI output.

use serde::Serialize;

use crate::entry::Entry;
use crate::extract::Confidence;
use crate::service::{BankList, Dashboard};

/// `{ success, data, metadata }` on success, `{ success: false, error }` on
/// failure.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T, M = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<M>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T, M> ApiResponse<T, M> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            metadata: None,
            error: None,
        }
    }

    pub fn with_metadata(mut self, metadata: M) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            metadata: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetadata {
    pub total_entries: usize,
    /// `null` when the protocol row is missing.
    pub aave_rank: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aave_deposits: Option<f64>,
    pub source: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BanksMetadata {
    pub total_entries: usize,
    pub source: String,
    pub last_updated: String,
    /// Extraction tier that produced the rows.
    pub extraction: &'static str,
    pub confidence: Confidence,
}

pub type DashboardResponse = ApiResponse<Vec<Entry>, DashboardMetadata>;
pub type BanksResponse = ApiResponse<Vec<Entry>, BanksMetadata>;
pub type ProtocolResponse = ApiResponse<Entry>;

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        let ranking = dashboard.ranking;
        let metadata = DashboardMetadata {
            total_entries: ranking.entries.len(),
            aave_rank: ranking.aave_rank,
            aave_deposits: ranking.aave_deposits,
            source: dashboard.source,
            last_updated: dashboard.last_updated,
        };
        ApiResponse::ok(ranking.entries).with_metadata(metadata)
    }
}

impl From<BankList> for BanksResponse {
    fn from(banks: BankList) -> Self {
        let metadata = BanksMetadata {
            total_entries: banks.entries.len(),
            source: banks.source,
            last_updated: banks.last_updated,
            extraction: banks.tier,
            confidence: banks.confidence,
        };
        ApiResponse::ok(banks.entries).with_metadata(metadata)
    }
}
