//! Numeric helpers shared by the analysis modules.

pub(crate) mod binning;
pub mod stats;

pub use stats::{mean, quantile, quantile_sorted, variance};
