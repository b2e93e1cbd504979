#![warn(missing_docs)]
//! Chronos Statistical Engine
//!
//! Summary statistics over raw nanosecond samples:
//! - extrema and arithmetic mean
//! - upper median (index `n / 2` of the sorted samples)
//! - population standard deviation (denominator `n`)
//!
//! Every function rejects an empty slice instead of inventing a value.

mod summary;

pub use summary::{
    StatsError, SummaryStatistics, compute_max, compute_mean, compute_median, compute_min,
    compute_std_dev, compute_summary,
};
