//! High-Precision Timing
//!
//! A `Clock` pairs a monotonic tick source with the timebase that converts its
//! ticks to nanoseconds. The timebase is queried once, when the clock is built,
//! and every `Stopwatch` started from that clock reuses it.
//!
//! On unix the ticks come from `clock_gettime` (`CLOCK_MONOTONIC_RAW` on Linux,
//! which is not slewed by NTP); elsewhere they fall back to `std::time::Instant`.

use crate::duration::Duration;
use std::cell::Cell;
use thiserror::Error;

// ─── Timebase ────────────────────────────────────────────────────────────────

/// Ratio converting raw ticks to nanoseconds: `ns = ticks * numer / denom`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timebase {
    numer: u32,
    denom: u32,
}

impl Timebase {
    /// One tick per nanosecond
    pub const NANOS: Timebase = Timebase { numer: 1, denom: 1 };

    /// Build a timebase, rejecting a zero numerator or denominator
    pub fn new(numer: u32, denom: u32) -> Result<Self, ClockError> {
        if numer == 0 || denom == 0 {
            return Err(ClockError::InvalidTimebase { numer, denom });
        }
        Ok(Self { numer, denom })
    }

    /// Numerator of the ratio
    pub fn numer(&self) -> u32 {
        self.numer
    }

    /// Denominator of the ratio
    pub fn denom(&self) -> u32 {
        self.denom
    }

    /// Convert a tick delta to nanoseconds without integer truncation
    #[inline(always)]
    pub fn to_nanos(&self, ticks: u64) -> f64 {
        if self.numer == self.denom {
            ticks as f64
        } else {
            ticks as f64 * self.numer as f64 / self.denom as f64
        }
    }
}

/// Errors raised while initialising a clock
#[derive(Debug, Error)]
pub enum ClockError {
    /// The platform refused to report its monotonic timebase
    #[error("failed to query the monotonic clock timebase")]
    Timebase(#[source] std::io::Error),
    /// The reported ratio cannot convert ticks to nanoseconds
    #[error("invalid timebase {numer}/{denom}")]
    InvalidTimebase {
        /// Reported numerator
        numer: u32,
        /// Reported denominator
        denom: u32,
    },
}

// ─── Tick sources ────────────────────────────────────────────────────────────

/// A monotonic counter that can be read cheaply and repeatedly.
pub trait TickSource {
    /// Current raw tick count. Never decreases between calls.
    fn ticks(&self) -> u64;

    /// Ratio converting this source's ticks to nanoseconds.
    fn timebase(&self) -> Result<Timebase, ClockError>;
}

/// The platform's monotonic high-resolution counter
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTicks {
    #[cfg(not(unix))]
    origin: std::time::Instant,
}

impl Default for MonotonicTicks {
    fn default() -> Self {
        Self {
            #[cfg(not(unix))]
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
const CLOCK_ID: libc::clockid_t = libc::CLOCK_MONOTONIC_RAW;

#[cfg(all(unix, not(any(target_os = "linux", target_os = "android"))))]
const CLOCK_ID: libc::clockid_t = libc::CLOCK_MONOTONIC;

#[cfg(unix)]
impl TickSource for MonotonicTicks {
    #[inline(always)]
    fn ticks(&self) -> u64 {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        // SAFETY: `ts` is a valid, writable timespec. CLOCK_ID was checked by
        // `timebase()` before any clock built on this source could be read.
        unsafe {
            libc::clock_gettime(CLOCK_ID, &mut ts);
        }
        (ts.tv_sec as u64)
            .wrapping_mul(1_000_000_000)
            .wrapping_add(ts.tv_nsec as u64)
    }

    fn timebase(&self) -> Result<Timebase, ClockError> {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        // SAFETY: both calls only write into the local timespec.
        let res = unsafe { libc::clock_getres(CLOCK_ID, &mut ts) };
        if res != 0 {
            return Err(ClockError::Timebase(std::io::Error::last_os_error()));
        }
        let now = unsafe { libc::clock_gettime(CLOCK_ID, &mut ts) };
        if now != 0 {
            return Err(ClockError::Timebase(std::io::Error::last_os_error()));
        }
        // clock_gettime already reports nanoseconds
        Ok(Timebase::NANOS)
    }
}

#[cfg(not(unix))]
impl TickSource for MonotonicTicks {
    #[inline(always)]
    fn ticks(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    fn timebase(&self) -> Result<Timebase, ClockError> {
        Ok(Timebase::NANOS)
    }
}

/// Deterministic tick source driven by hand.
///
/// Every read returns the current count and then advances it by `step`, so a
/// stopwatch started and read once always measures exactly `step` ticks.
#[derive(Debug)]
pub struct ManualTicks {
    now: Cell<u64>,
    step: u64,
    timebase: Timebase,
}

impl ManualTicks {
    /// A source that only moves when `advance` is called
    pub fn new(timebase: Timebase) -> Self {
        Self {
            now: Cell::new(0),
            step: 0,
            timebase,
        }
    }

    /// A nanosecond source that advances by `step` on every read
    pub fn stepping(step: u64) -> Self {
        Self {
            now: Cell::new(0),
            step,
            timebase: Timebase::NANOS,
        }
    }

    /// Move the counter forward
    pub fn advance(&self, ticks: u64) {
        self.now.set(self.now.get() + ticks);
    }

    /// Current count, without advancing
    pub fn peek(&self) -> u64 {
        self.now.get()
    }
}

impl TickSource for ManualTicks {
    fn ticks(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }

    fn timebase(&self) -> Result<Timebase, ClockError> {
        Ok(self.timebase)
    }
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// A tick source plus its cached tick-to-nanosecond ratio
#[derive(Debug)]
pub struct Clock<S = MonotonicTicks> {
    source: S,
    timebase: Timebase,
}

impl Clock<MonotonicTicks> {
    /// Clock over the platform's monotonic counter
    pub fn monotonic() -> Result<Self, ClockError> {
        Self::with_source(MonotonicTicks::default())
    }
}

impl<S: TickSource> Clock<S> {
    /// Build a clock, querying the source's timebase exactly once
    pub fn with_source(source: S) -> Result<Self, ClockError> {
        let timebase = source.timebase()?;
        Ok(Self { source, timebase })
    }

    /// Raw tick count
    #[inline(always)]
    pub fn ticks(&self) -> u64 {
        self.source.ticks()
    }

    /// The cached conversion ratio
    pub fn timebase(&self) -> Timebase {
        self.timebase
    }

    /// The underlying tick source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Start a stopwatch at the current instant
    #[inline(always)]
    pub fn stopwatch(&self) -> Stopwatch<'_, S> {
        Stopwatch::start(self)
    }
}

// ─── Stopwatch ───────────────────────────────────────────────────────────────

/// Counts the time elapsed since it was started
#[derive(Debug)]
pub struct Stopwatch<'c, S = MonotonicTicks> {
    clock: &'c Clock<S>,
    start: u64,
}

impl<'c, S: TickSource> Stopwatch<'c, S> {
    /// Capture the current instant of `clock`
    #[inline(always)]
    pub fn start(clock: &'c Clock<S>) -> Self {
        Self {
            start: clock.ticks(),
            clock,
        }
    }

    /// Nanoseconds elapsed since the stopwatch was started
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        let delta = self.clock.ticks().saturating_sub(self.start);
        Duration::from_nanos(self.clock.timebase.to_nanos(delta))
    }

    /// Raw tick count captured at start
    pub fn start_ticks(&self) -> u64 {
        self.start
    }

    /// Time a single execution of `body`
    #[inline(always)]
    pub fn time<T, F>(clock: &'c Clock<S>, body: F) -> Duration
    where
        F: FnOnce() -> T,
    {
        let stopwatch = Self::start(clock);
        let _ = std::hint::black_box(body());
        stopwatch.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct BrokenTicks;

    impl TickSource for BrokenTicks {
        fn ticks(&self) -> u64 {
            0
        }

        fn timebase(&self) -> Result<Timebase, ClockError> {
            Err(ClockError::Timebase(std::io::Error::other("no timebase")))
        }
    }

    #[test]
    fn test_monotonic_elapsed() {
        let clock = Clock::monotonic().unwrap();
        let stopwatch = clock.stopwatch();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let elapsed = stopwatch.elapsed();

        // Should be at least 5ms
        assert!(elapsed.nanoseconds() >= 5_000_000.0);
        // Should be less than 1s (accounting for scheduling)
        assert!(elapsed.nanoseconds() < 1_000_000_000.0);
    }

    #[test]
    fn test_elapsed_non_decreasing() {
        let clock = Clock::monotonic().unwrap();
        let stopwatch = clock.stopwatch();
        let mut previous = stopwatch.elapsed();
        assert!(previous.nanoseconds() >= 0.0);

        for _ in 0..1000 {
            let current = stopwatch.elapsed();
            assert!(current >= previous, "elapsed went backwards");
            previous = current;
        }
    }

    #[test]
    fn test_trivial_body_is_near_zero() {
        let clock = Clock::monotonic().unwrap();
        let elapsed = Stopwatch::time(&clock, || ());
        assert!(elapsed.nanoseconds() >= 0.0);
        assert!(elapsed.nanoseconds() < 10_000_000.0);
    }

    #[test]
    fn test_manual_ticks_apply_timebase() {
        let timebase = Timebase::new(125, 3).unwrap();
        let clock = Clock::with_source(ManualTicks::new(timebase)).unwrap();
        let stopwatch = clock.stopwatch();

        clock.source().advance(24);
        assert!((stopwatch.elapsed().nanoseconds() - 1000.0).abs() < 1e-9);

        // Reading twice without advancing gives the same answer
        assert_eq!(stopwatch.elapsed(), stopwatch.elapsed());
    }

    #[test]
    fn test_stepping_ticks() {
        let clock = Clock::with_source(ManualTicks::stepping(250)).unwrap();
        let stopwatch = clock.stopwatch();
        assert_eq!(stopwatch.start_ticks(), 0);
        assert_eq!(stopwatch.elapsed().nanoseconds(), 250.0);
    }

    #[test]
    fn test_timebase_rejects_zero() {
        assert!(matches!(
            Timebase::new(0, 1),
            Err(ClockError::InvalidTimebase { numer: 0, denom: 1 })
        ));
        assert!(Timebase::new(1, 0).is_err());
    }

    #[test]
    fn test_clock_init_failure_is_reported() {
        let err = Clock::with_source(BrokenTicks).unwrap_err();
        assert!(matches!(err, ClockError::Timebase(_)));
    }
}
