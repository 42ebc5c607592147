//! Dashboard module
//!
//! Composes the overview: all-time totals, this week's series, today's
//! spending, budget progress and recent activity. [LiveDashboard] keeps one
//! up to date as snapshots are published.

mod core;
mod live;

pub use core::{Dashboard, RECENT_TRANSACTION_COUNT};
pub use live::LiveDashboard;
