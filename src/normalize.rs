//! Protocol value normalization.
//!
//! DeFiLlama reports `currentChainTvls` as a flat map keyed by chain. Besides
//! plain chains (`Ethereum`, `Arbitrum`, ...) it carries per-chain borrowed
//! breakdowns (`Ethereum-borrowed`) and one aggregate `borrowed` total. The
//! keys are classified once, here, into [`ChainValues`]; nothing downstream
//! looks at key strings.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::entry::Entry;

pub const PROTOCOL_NAME: &str = "Aave";

pub const PROTOCOL_LOGO: &str = "https://raw.githubusercontent.com/trustwallet/assets/master/blockchains/ethereum/assets/0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9/logo.png";

/// Deposits figure served when DeFiLlama cannot be used, in billions.
pub const FALLBACK_DEPOSITS_BILLIONS: f64 = 67.921;

const BORROWED_TOTAL_KEY: &str = "borrowed";
const CHAIN_BORROWED_SUFFIX: &str = "-borrowed";

/// What a `currentChainTvls` key stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKey {
    /// Value locked on one chain.
    Chain,
    /// The protocol-wide borrowed total.
    BorrowedTotal,
    /// A per-chain slice of the borrowed total.
    ChainBorrowed,
}

impl ChainKey {
    pub fn classify(key: &str) -> Self {
        if key == BORROWED_TOTAL_KEY {
            Self::BorrowedTotal
        } else if key.contains(CHAIN_BORROWED_SUFFIX) {
            Self::ChainBorrowed
        } else {
            Self::Chain
        }
    }
}

/// Raw USD amounts split into supplied value and the borrowed total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, f64>")]
pub struct ChainValues {
    /// Sum of every plain chain value.
    pub base: f64,
    /// The aggregate borrowed total, 0 when absent.
    pub borrowed: f64,
}

impl ChainValues {
    pub fn new(base: f64, borrowed: f64) -> Self {
        Self { base, borrowed }
    }

    /// Supplied value plus the borrowed total, in USD.
    pub fn total(&self) -> f64 {
        self.base + self.borrowed
    }

    /// [`Self::total`] in billions.
    pub fn deposits_billions(&self) -> f64 {
        self.total() / 1e9
    }
}

impl<K: AsRef<str>> FromIterator<(K, f64)> for ChainValues {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |mut acc, (key, value)| {
                match ChainKey::classify(key.as_ref()) {
                    ChainKey::Chain => acc.base += value,
                    ChainKey::BorrowedTotal => acc.borrowed = value,
                    ChainKey::ChainBorrowed => {}
                }
                acc
            })
    }
}

impl From<BTreeMap<String, f64>> for ChainValues {
    fn from(map: BTreeMap<String, f64>) -> Self {
        map.into_iter().collect()
    }
}

/// The dashboard row for the protocol.
pub fn protocol_entry(values: &ChainValues) -> Entry {
    Entry::protocol(PROTOCOL_NAME, PROTOCOL_LOGO, values.deposits_billions())
}

/// The fixed row served when the protocol source fails.
pub fn fallback_protocol_entry() -> Entry {
    Entry::protocol(PROTOCOL_NAME, PROTOCOL_LOGO, FALLBACK_DEPOSITS_BILLIONS)
}
