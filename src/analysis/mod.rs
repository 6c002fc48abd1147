//! Corpus aggregation.
//!
//! Pure functions over the read-only [`DashboardContext`](crate::context::DashboardContext):
//! combined counts, rankings, temporal series, thematic rollups and the
//! frequency-based relationship views. All lookups default to 0 or empty
//! on missing keys.

pub mod aggregator;
pub mod graph;
pub mod temporal;
pub mod themes;

pub use aggregator::*;
pub use graph::*;
pub use temporal::*;
pub use themes::*;
