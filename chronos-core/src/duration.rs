//! Nanosecond-precision durations used by the statistics.
//!
//! Unlike `std::time::Duration` this is a plain `f64`, so means and standard
//! deviations keep their sub-nanosecond fraction.

use crate::SIGNIFICANT_DIGITS;
use crate::scale::{Scale, format_significant};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Sub};

/// An immutable span of time in nanoseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Duration {
    nanos: f64,
}

impl Duration {
    /// Zero-length duration
    pub const ZERO: Duration = Duration { nanos: 0.0 };

    /// From nanoseconds
    pub const fn from_nanos(nanos: f64) -> Self {
        Self { nanos }
    }

    /// From microseconds
    pub fn from_micros(micros: f64) -> Self {
        Self::from_nanos(micros * 1e3)
    }

    /// From milliseconds
    pub fn from_millis(millis: f64) -> Self {
        Self::from_nanos(millis * 1e6)
    }

    /// From seconds
    pub fn from_secs(secs: f64) -> Self {
        Self::from_nanos(secs * 1e9)
    }

    /// Length in nanoseconds
    pub const fn nanoseconds(&self) -> f64 {
        self.nanos
    }

    /// Length in seconds
    pub fn seconds(&self) -> f64 {
        self.nanos / 1e9
    }

    /// Total order over the underlying value, for sorting samples
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.nanos.total_cmp(&other.nanos)
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Self::from_nanos(d.as_nanos() as f64)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration::from_nanos(self.nanos + rhs.nanos)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration::from_nanos(self.nanos - rhs.nanos)
    }
}

impl Div<f64> for Duration {
    type Output = Duration;

    fn div(self, rhs: f64) -> Duration {
        Duration::from_nanos(self.nanos / rhs)
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Duration> for Duration {
    fn sum<I: Iterator<Item = &'a Duration>>(iter: I) -> Duration {
        iter.copied().sum()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = Scale::for_nanos(self.nanos);
        let value = format_significant(scale.apply(*self), SIGNIFICANT_DIGITS);
        f.pad(&format!("{}{}", value, scale.label()))
    }
}
