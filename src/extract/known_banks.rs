use std::sync::LazyLock;

use super::primary::PRIMARY_DEPOSIT_RATIO;
use super::{millions_to_billions, BankRecord, Confidence, ExtractionTier};

/// Number of banks in the static table.
pub const KNOWN_BANK_COUNT: usize = 42;

/// Consolidated assets in millions, from the Federal Reserve large
/// commercial banks release.
const KNOWN_BANKS: [(&str, u32, u64); KNOWN_BANK_COUNT] = [
    ("JPMORGAN CHASE BK NA/JPMORGAN CHASE & CO", 1, 3_643_099),
    ("BANK OF AMER NA/BANK OF AMER CORP", 2, 2_615_296),
    ("CITIBANK NA/CITIGROUP", 3, 1_760_921),
    ("WELLS FARGO BK NA/WELLS FARGO & CO", 4, 1_711_028),
    ("U S BK NA/U S BC", 5, 659_191),
    ("GOLDMAN SACHS BK USA/GOLDMAN SACHS GROUP THE", 6, 598_460),
    ("PNC BK NA/PNC FNCL SVC GROUP", 7, 549_324),
    ("TRUIST BK/TRUIST FC", 8, 527_488),
    ("CAPITAL ONE NA/CAPITAL ONE FC", 9, 490_573),
    ("STATE STREET B&TC/STATE STREET CORP", 10, 368_219),
    ("TD BK NA/TD GRP US HOLDS LLC", 11, 366_507),
    ("BANK OF NY MELLON/BANK OF NY MELLON CORP", 12, 356_262),
    ("BMO BK NA/BMO FNCL CORP", 13, 257_049),
    ("MORGAN STANLEY BK NA/MORGAN STANLEY", 14, 234_481),
    ("FIRST-CITIZENS B&TC/FIRST CITIZENS BSHRS", 15, 228_632),
    ("MORGAN STANLEY PRIV BK NA/MORGAN STANLEY", 16, 223_785),
    ("CITIZENS BK NA/CITIZENS FNCL GRP", 17, 220_014),
    ("FIFTH THIRD BK NA/FIFTH THIRD BC", 18, 211_921),
    ("MANUFACTURERS & TRADERS TC/M&T BK CORP", 19, 209_801),
    ("HUNTINGTON NB/HUNTINGTON BSHRS", 20, 208_159),
    ("AMERICAN EXPRESS NB/AMERICAN EXPRESS CO", 21, 203_448),
    ("KEYBANK NA/KEYCORP", 22, 185_776),
    ("ALLY BK/ALLY FNCL", 23, 182_323),
    ("HSBC BK USA NA/HSBC N AMER HOLDS", 24, 166_237),
    ("NORTHERN TC/NORTHERN TR CORP", 25, 164_498),
    ("REGIONS BK/REGIONS FC", 26, 158_421),
    ("DISCOVER BK/DISCOVER FS", 27, 145_413),
    ("SANTANDER BK NA/SANTANDER HOLDS USA", 28, 104_559),
    ("FLAGSTAR BK NA/FLAGSTAR FNCL", 29, 97_568),
    ("CITY NB/RBC US GRP HOLDS LLC", 30, 93_149),
    ("ZIONS BC NA", 31, 87_992),
    ("WESTERN ALLI BK/WESTERN ALLI BC", 32, 82_944),
    ("FIRST HORIZON BK/FIRST HORIZON CORP", 33, 81_202),
    ("WEBSTER BK NA/WEBSTER FNCL CORP", 34, 80_212),
    ("COMERICA BK/COMERICA", 35, 77_698),
    ("EAST WEST BK/EAST WEST BC", 36, 75_712),
    ("UMB BK NA/UMB FC", 37, 69_014),
    ("SOUTHSTATE BK NA/SOUTHSTATE CORP", 38, 65_109),
    ("VALLEY NB/VALLEY NAT BC", 39, 61_818),
    ("CIBC BK USA/CIBC BC USA", 40, 61_303),
    ("SYNOVUS BK/SYNOVUS FC", 41, 60_208),
    ("PINNACLE BK/PINNACLE FNCL PTNR", 42, 54_173),
];

static KNOWN_BANK_RECORDS: LazyLock<Vec<BankRecord>> = LazyLock::new(|| {
    KNOWN_BANKS
        .iter()
        .map(|&(name, rank, assets_millions)| {
            let total_assets = millions_to_billions(assets_millions);
            BankRecord {
                name: name.to_string(),
                rank,
                total_assets,
                domestic_assets: None,
                deposits: total_assets * PRIMARY_DEPOSIT_RATIO,
            }
        })
        .collect()
});

/// The static bank table, built on first use and shared for the life of the
/// process.
pub fn known_banks() -> &'static [BankRecord] {
    &KNOWN_BANK_RECORDS
}

/// Ignores the document and returns the static table.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownBanksTier;

impl ExtractionTier for KnownBanksTier {
    fn name(&self) -> &'static str {
        "known_banks"
    }

    fn confidence(&self) -> Confidence {
        Confidence::Fallback
    }

    fn parse(&self, _html: &str) -> Vec<BankRecord> {
        known_banks().to_vec()
    }
}
