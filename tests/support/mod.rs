#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aavebanks::clock::FixedClock;
use aavebanks::normalize::ChainValues;
use aavebanks::sources::{BankReportSource, ProtocolSource, LARGE_BANKS_REPORT_URL};
use aavebanks::DashboardService;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

/// A slice of the large commercial banks release as it is served.
pub const REPORT_HTML: &str = "\
<html><body>
<pre>
Bank Name / Holding Co Name     Nat'l Rank  Bank ID  Bank Location  Charter  Consol Assets (Mil $)  Domestic Assets (Mil $)
JPMORGAN CHASE BK NA/JPMORGAN CHASE & CO      1     852218 COLUMBUS, OH    NAT   3,643,099   3,415,250   94   Y
BANK OF AMER NA/BANK OF AMER CORP             2     480228 CHARLOTTE, NC   NAT   2,615,296   2,451,875   94   Y
WELLS FARGO BK NA/WELLS FARGO & CO            3     451965 SIOUX FALLS, SD NAT   1,743,283   1,707,025   98   Y
CITIBANK NA/CITIGROUP                         4     476810 SIOUX FALLS, SD NAT   1,698,856     988,106   58   Y
</pre>
</body></html>";

#[derive(Debug, Clone)]
pub struct MockProtocolSource {
    pub values: ChainValues,
    pub fail: bool,
    calls: Arc<AtomicUsize>,
}

impl Default for MockProtocolSource {
    fn default() -> Self {
        Self {
            values: ChainValues::new(50e9, 20e9),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockProtocolSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(mut self, base: f64, borrowed: f64) -> Self {
        self.values = ChainValues::new(base, borrowed);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProtocolSource for MockProtocolSource {
    async fn fetch_chain_values(&self) -> Result<ChainValues> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("protocol source unavailable");
        }
        Ok(self.values)
    }

    fn name(&self) -> &str {
        "mock-protocol"
    }
}

#[derive(Debug, Clone)]
pub struct MockBankReportSource {
    pub html: String,
    pub fail: bool,
    calls: Arc<AtomicUsize>,
}

impl Default for MockBankReportSource {
    fn default() -> Self {
        Self {
            html: REPORT_HTML.to_string(),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockBankReportSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BankReportSource for MockBankReportSource {
    async fn fetch_report(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("bank report unavailable");
        }
        Ok(self.html.clone())
    }

    fn url(&self) -> &str {
        LARGE_BANKS_REPORT_URL
    }

    fn name(&self) -> &str {
        "mock-banks"
    }
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap(),
    ))
}

pub fn service(protocol: MockProtocolSource, banks: MockBankReportSource) -> DashboardService {
    DashboardService::new(Arc::new(protocol), Arc::new(banks)).with_clock(fixed_clock())
}
