pub mod aggregate;
pub mod api;
pub mod clock;
pub mod config;
pub mod entry;
pub mod extract;
pub mod format;
pub mod normalize;
pub mod service;
pub mod sources;

pub use aggregate::{rank_entries, DisplayWindow, Ranking};
pub use entry::Entry;
pub use service::{BankList, Dashboard, DashboardError, DashboardService};
