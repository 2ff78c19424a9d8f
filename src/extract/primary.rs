use std::sync::LazyLock;

use regex::Regex;

use super::{millions_to_billions, parse_grouped_int, BankRecord, Confidence, ExtractionTier, MAX_BANKS};

/// Deposits estimate as a share of domestic assets. Reported
/// deposits-to-domestic-assets ratios cluster between 0.75 and 0.85.
pub const PRIMARY_DEPOSIT_RATIO: f64 = 0.80;

/// `BANK NAME/HOLDING CO  RANK  ID  CITY, ST  CHARTER  CONSOL_ASSETS  DOMESTIC_ASSETS ...`
static LINE_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^0-9]+/[^0-9]+)\s+([0-9]+)\s+[0-9]+\s+[A-Z\s,]+\s+[A-Z]+\s+([0-9,]+)\s+([0-9,]+)")
        .expect("line item pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

const HEADER_MARKERS: [&str; 2] = ["Bank Name", "Holding Co"];

/// Matches full table rows, including the domestic assets column.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineItemTier;

impl LineItemTier {
    fn is_candidate(line: &str) -> bool {
        line.contains('/') && !HEADER_MARKERS.iter().any(|marker| line.contains(marker))
    }

    fn parse_line(line: &str) -> Option<BankRecord> {
        let caps = LINE_ITEM.captures(line)?;

        let name = WHITESPACE.replace_all(caps[1].trim(), " ").into_owned();
        let rank: u32 = caps[2].parse().ok()?;
        let total_assets = millions_to_billions(parse_grouped_int(&caps[3])?);
        let domestic_assets = millions_to_billions(parse_grouped_int(&caps[4])?);

        Some(BankRecord {
            name,
            rank,
            total_assets,
            domestic_assets: Some(domestic_assets),
            deposits: domestic_assets * PRIMARY_DEPOSIT_RATIO,
        })
    }
}

impl ExtractionTier for LineItemTier {
    fn name(&self) -> &'static str {
        "line_item"
    }

    fn confidence(&self) -> Confidence {
        Confidence::High
    }

    fn parse(&self, html: &str) -> Vec<BankRecord> {
        html.lines()
            .filter(|line| Self::is_candidate(line))
            .filter_map(Self::parse_line)
            .take(MAX_BANKS)
            .collect()
    }
}
