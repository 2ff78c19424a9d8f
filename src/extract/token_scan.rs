use super::{millions_to_billions, parse_grouped_int, BankRecord, Confidence, ExtractionTier, MAX_BANKS};

/// Deposits estimate as a share of consolidated assets, used when the
/// domestic assets column could not be located.
pub const TOKEN_SCAN_DEPOSIT_RATIO: f64 = 0.75;

/// Charter types printed in the release (national, state member, state
/// non-member).
const CHARTER_MARKERS: [&str; 3] = ["NAT", "SMB", "SNM"];

/// Asset figures are looked for in tokens `rank + 3 .. rank + 8`, skipping
/// the bank id and the start of the location.
const ASSET_WINDOW_START: usize = 3;
const ASSET_WINDOW_END: usize = 8;

/// Figures at or below this are ids or percentages, not assets in millions.
const MIN_ASSETS_MILLIONS: u64 = 1000;

/// Whitespace token heuristics for rows the line item pattern rejects.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenScanTier;

impl TokenScanTier {
    fn is_candidate(line: &str) -> bool {
        line.contains('/') && CHARTER_MARKERS.iter().any(|marker| line.contains(marker))
    }

    fn parse_line(line: &str) -> Option<BankRecord> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let rank_at = tokens
            .iter()
            .position(|token| token.bytes().all(|b| b.is_ascii_digit()))?;
        let rank: u32 = tokens[rank_at].parse().ok().filter(|rank| *rank > 0)?;

        let name = tokens[..rank_at].join(" ");
        if name.is_empty() {
            return None;
        }

        let window_end = (rank_at + ASSET_WINDOW_END).min(tokens.len());
        let window_start = (rank_at + ASSET_WINDOW_START).min(window_end);
        let assets = tokens[window_start..window_end]
            .iter()
            .filter_map(|token| parse_grouped_int(token))
            .find(|millions| *millions > MIN_ASSETS_MILLIONS)
            .map(millions_to_billions)?;

        Some(BankRecord {
            name,
            rank,
            total_assets: assets,
            domestic_assets: None,
            deposits: assets * TOKEN_SCAN_DEPOSIT_RATIO,
        })
    }
}

impl ExtractionTier for TokenScanTier {
    fn name(&self) -> &'static str {
        "token_scan"
    }

    fn confidence(&self) -> Confidence {
        Confidence::Low
    }

    fn parse(&self, html: &str) -> Vec<BankRecord> {
        html.lines()
            .map(str::trim)
            .filter(|line| Self::is_candidate(line))
            .filter_map(Self::parse_line)
            .take(MAX_BANKS)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn finds_rank_and_first_large_figure_in_window() {
        // No domestic assets column, so the line item pattern cannot match.
        let line = "  TRUIST BK/TRUIST FC 8 852320 CHARLOTTE, NC SMB 527,488  ";
        assert!(crate::extract::LineItemTier.parse(line).is_empty());
        let records = TokenScanTier.parse(line);
        assert_eq!(records.len(), 1);

        let truist = &records[0];
        assert_eq!(truist.name, "TRUIST BK/TRUIST FC");
        assert_eq!(truist.rank, 8);
        assert!(approx(truist.total_assets, 527.488));
        assert!(truist.domestic_assets.is_none());
        assert!(approx(truist.deposits, 527.488 * 0.75));
    }

    #[test]
    fn bank_id_right_after_rank_is_not_taken_as_assets() {
        let line = "PNC BK NA/PNC FNCL SVC GROUP 7 817824 WILMINGTON, DE NAT 549,324";
        let records = TokenScanTier.parse(line);
        assert_eq!(records.len(), 1);
        assert!(approx(records[0].total_assets, 549.324));
    }

    #[test]
    fn figures_outside_window_are_ignored() {
        let line = "SOME BK/SOME CORP 12 1 A B C D E NAT 99,999";
        assert!(TokenScanTier.parse(line).is_empty());
    }

    #[test]
    fn small_figures_are_not_assets() {
        let line = "TINY BK/TINY CORP 90 5 X Y NAT 999 12";
        assert!(TokenScanTier.parse(line).is_empty());
    }

    #[test]
    fn requires_charter_marker_and_slash() {
        assert!(TokenScanTier
            .parse("TRUIST BK TRUIST FC 8 852320 SMB CHARLOTTE NC 527,488")
            .is_empty());
        assert!(TokenScanTier
            .parse("TRUIST BK/TRUIST FC 8 852320 XXX CHARLOTTE NC 527,488")
            .is_empty());
    }

    #[test]
    fn zero_rank_or_missing_name_rejects_row() {
        assert!(TokenScanTier.parse("A/B 0 1 2 NAT 5,000").is_empty());
        assert!(TokenScanTier.parse("8 A/B 852320 SMB NC 527,488").is_empty());
    }
}
