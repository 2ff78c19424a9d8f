use std::cmp::Ordering;

use crate::entry::Entry;

/// Combined, ranked dashboard rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Sorted by deposits, descending. `rank` is the 1-based position.
    pub entries: Vec<Entry>,
    /// Rank of the protocol row, if one was supplied.
    pub aave_rank: Option<usize>,
    pub aave_deposits: Option<f64>,
}

impl Ranking {
    /// Zero-based index of the protocol row.
    pub fn aave_index(&self) -> Option<usize> {
        self.entries.iter().position(|entry| entry.is_aave)
    }
}

/// Merges bank rows with the protocol row and ranks them by deposits.
///
/// The sort is stable, so equal deposit values keep bank order and the
/// protocol row stays behind banks it ties with. Any rank carried in by the
/// inputs is overwritten.
pub fn rank_entries(banks: Vec<Entry>, protocol: Entry) -> Ranking {
    let mut entries = banks;
    entries.push(protocol);
    entries.sort_by(|a, b| descending(a.deposits_value, b.deposits_value));

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = Some(index + 1);
    }

    let aave = entries.iter().find(|entry| entry.is_aave);
    let aave_rank = aave.and_then(|entry| entry.rank);
    let aave_deposits = aave.map(|entry| entry.deposits_value);

    Ranking {
        entries,
        aave_rank,
        aave_deposits,
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// How many rows around the highlighted one to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    /// Rows shown on each side of the highlighted row.
    pub radius: usize,
    /// Lists at or below this length are shown in full.
    pub threshold: usize,
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self {
            radius: 5,
            threshold: 10,
        }
    }
}

impl DisplayWindow {
    /// Slice of `entries` to display: `[index - radius, index + radius]`
    /// clamped to the list, or everything when the list is short or no row
    /// is highlighted.
    pub fn select<'a>(&self, entries: &'a [Entry], highlight: Option<usize>) -> &'a [Entry] {
        match highlight {
            Some(index) if entries.len() > self.threshold && index < entries.len() => {
                let start = index.saturating_sub(self.radius);
                let end = index.saturating_add(self.radius).saturating_add(1).min(entries.len());
                &entries[start..end]
            }
            _ => entries,
        }
    }
}
