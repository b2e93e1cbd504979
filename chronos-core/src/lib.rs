#![warn(missing_docs)]
//! Chronos Core - Timing Runtime
//!
//! This crate provides the measurement side of the harness:
//! - `Clock` over a pluggable monotonic `TickSource`, with the tick-to-nanosecond
//!   ratio captured once at construction
//! - `Stopwatch` for elapsed time since a start instant
//! - `Duration`, a nanosecond-precision `f64` value used by the statistics
//! - `SampleRunner` implementing the warmup + N timed iterations protocol
//! - `consume_value` to keep results alive past the optimizer

mod duration;
mod measure;
mod runner;
mod scale;

pub use duration::Duration;
pub use measure::{Clock, ClockError, ManualTicks, MonotonicTicks, Stopwatch, TickSource, Timebase};
pub use runner::{Phase, RunError, SampleRunner};
pub use scale::{Scale, format_significant};

/// Significant digits used when rendering durations for humans
pub const SIGNIFICANT_DIGITS: usize = 4;

/// Observe `value` so the computation producing it cannot be eliminated.
///
/// Call this inside a unit of work whose result would otherwise be unused.
#[inline(never)]
pub fn consume_value<T>(value: T) {
    let _ = std::hint::black_box(value);
}
