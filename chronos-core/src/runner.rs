//! SampleRunner - The Iteration Protocol
//!
//! Every run starts with one untimed warmup invocation so that lazy
//! initialisation, cold caches and first-call allocation are not billed to the
//! measured iterations. After that the runner either:
//! - times each of the N iterations separately (`time`), producing N samples, or
//! - times all N iterations inside one stopwatch span (`time_total`), trading
//!   per-sample statistics for lower instrumentation overhead.
//!
//! A unit that fails aborts the run; no partial sample set is returned.

use crate::duration::Duration;
use crate::measure::{Clock, ClockError, MonotonicTicks, TickSource};
use std::convert::Infallible;
use std::fmt;
use std::hint::black_box;
use thiserror::Error;

/// Where in the protocol a unit under test failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The untimed warmup invocation
    Warmup,
    /// A timed iteration
    Iteration {
        /// Zero-based index of the failing iteration
        index: usize,
        /// Requested iteration count
        of: usize,
    },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Warmup => f.write_str("warmup"),
            Phase::Iteration { index, of } => write!(f, "iteration {}/{}", index + 1, of),
        }
    }
}

/// Failure propagated from the unit under test
#[derive(Debug, Error)]
#[error("unit failed during {phase}")]
pub struct RunError<E> {
    /// Phase that failed
    pub phase: Phase,
    /// The unit's own error
    #[source]
    pub source: E,
}

/// Runs units of work under the warmup + N iterations protocol
#[derive(Debug)]
pub struct SampleRunner<S = MonotonicTicks> {
    clock: Clock<S>,
}

impl SampleRunner<MonotonicTicks> {
    /// Runner over the platform's monotonic clock
    pub fn monotonic() -> Result<Self, ClockError> {
        Ok(Self::new(Clock::monotonic()?))
    }
}

impl<S: TickSource> SampleRunner<S> {
    /// Runner timing with `clock`
    pub fn new(clock: Clock<S>) -> Self {
        Self { clock }
    }

    /// The clock used for every stopwatch
    pub fn clock(&self) -> &Clock<S> {
        &self.clock
    }

    /// Time `iterations` invocations of `unit`, one sample per invocation.
    ///
    /// # Panics
    /// If `iterations` is zero.
    pub fn time<I, T, F>(&self, iterations: usize, input: &I, mut unit: F) -> Vec<Duration>
    where
        I: ?Sized,
        F: FnMut(&I) -> T,
    {
        match self.try_time(iterations, input, |input: &I| {
            Ok::<T, Infallible>(unit(input))
        }) {
            Ok(samples) => samples,
            Err(err) => match err.source {},
        }
    }

    /// Fallible variant of [`time`](Self::time).
    ///
    /// The first error aborts the run and is returned together with the phase
    /// that produced it.
    ///
    /// # Panics
    /// If `iterations` is zero.
    pub fn try_time<I, T, E, F>(
        &self,
        iterations: usize,
        input: &I,
        mut unit: F,
    ) -> Result<Vec<Duration>, RunError<E>>
    where
        I: ?Sized,
        F: FnMut(&I) -> Result<T, E>,
    {
        check_iterations(iterations);

        let mut samples = Vec::with_capacity(iterations);

        warmup(input, &mut unit)?;

        for index in 0..iterations {
            let stopwatch = self.clock.stopwatch();
            let outcome = black_box(unit(black_box(input)));
            let elapsed = stopwatch.elapsed();

            match outcome {
                Ok(value) => {
                    let _ = black_box(value);
                    samples.push(elapsed);
                }
                Err(source) => {
                    return Err(RunError {
                        phase: Phase::Iteration {
                            index,
                            of: iterations,
                        },
                        source,
                    });
                }
            }
        }

        Ok(samples)
    }

    /// Total time for `iterations` invocations measured as a single span.
    ///
    /// # Panics
    /// If `iterations` is zero.
    pub fn time_total<I, T, F>(&self, iterations: usize, input: &I, mut unit: F) -> Duration
    where
        I: ?Sized,
        F: FnMut(&I) -> T,
    {
        match self.try_time_total(iterations, input, |input: &I| {
            Ok::<T, Infallible>(unit(input))
        }) {
            Ok(total) => total,
            Err(err) => match err.source {},
        }
    }

    /// Fallible variant of [`time_total`](Self::time_total)
    pub fn try_time_total<I, T, E, F>(
        &self,
        iterations: usize,
        input: &I,
        mut unit: F,
    ) -> Result<Duration, RunError<E>>
    where
        I: ?Sized,
        F: FnMut(&I) -> Result<T, E>,
    {
        check_iterations(iterations);

        warmup(input, &mut unit)?;

        let stopwatch = self.clock.stopwatch();
        for index in 0..iterations {
            if let Err(source) = black_box(unit(black_box(input))) {
                return Err(RunError {
                    phase: Phase::Iteration {
                        index,
                        of: iterations,
                    },
                    source,
                });
            }
        }
        Ok(stopwatch.elapsed())
    }

    /// Mean time per invocation, from a single total-time span
    ///
    /// # Panics
    /// If `iterations` is zero.
    pub fn mean_time<I, T, F>(&self, iterations: usize, input: &I, unit: F) -> Duration
    where
        I: ?Sized,
        F: FnMut(&I) -> T,
    {
        self.time_total(iterations, input, unit) / iterations as f64
    }

    /// Fallible variant of [`mean_time`](Self::mean_time)
    pub fn try_mean_time<I, T, E, F>(
        &self,
        iterations: usize,
        input: &I,
        unit: F,
    ) -> Result<Duration, RunError<E>>
    where
        I: ?Sized,
        F: FnMut(&I) -> Result<T, E>,
    {
        Ok(self.try_time_total(iterations, input, unit)? / iterations as f64)
    }
}

#[inline]
fn check_iterations(iterations: usize) {
    assert!(
        iterations >= 1,
        "iteration count must be at least 1, got {iterations}"
    );
}

#[inline]
fn warmup<I, T, E, F>(input: &I, unit: &mut F) -> Result<(), RunError<E>>
where
    I: ?Sized,
    F: FnMut(&I) -> Result<T, E>,
{
    match black_box(unit(black_box(input))) {
        Ok(value) => {
            let _ = black_box(value);
            Ok(())
        }
        Err(source) => Err(RunError {
            phase: Phase::Warmup,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::ManualTicks;
    use std::cell::Cell;

    fn stepping_runner(step: u64) -> SampleRunner<ManualTicks> {
        SampleRunner::new(Clock::with_source(ManualTicks::stepping(step)).unwrap())
    }

    #[test]
    fn test_warmup_plus_iterations() {
        let runner = stepping_runner(10);
        let calls = Cell::new(0_usize);

        let samples = runner.time(5, &(), |_| calls.set(calls.get() + 1));

        assert_eq!(samples.len(), 5);
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn test_input_is_passed_to_every_invocation() {
        let runner = stepping_runner(1);
        let seen = Cell::new(0_u64);

        runner.time(3, &7_u64, |n: &u64| seen.set(seen.get() + *n));

        // warmup + 3 iterations
        assert_eq!(seen.get(), 28);
    }

    #[test]
    fn test_samples_in_execution_order() {
        let clock = Clock::with_source(ManualTicks::new(crate::Timebase::NANOS)).unwrap();
        let runner = SampleRunner::new(clock);
        let call = Cell::new(0_u64);

        let samples = runner.time(4, &(), |_| {
            let n = call.get();
            call.set(n + 1);
            // warmup is call 0; timed calls take 10, 20, 30, 40 ns
            runner.clock().source().advance(n * 10);
        });

        let nanos: Vec<f64> = samples.iter().map(|d| d.nanoseconds()).collect();
        assert_eq!(nanos, vec![10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_real_clock_samples_are_non_negative() {
        let runner = SampleRunner::monotonic().unwrap();
        let samples = runner.time(20, &1000_u64, |n| (0..*n).sum::<u64>());

        assert_eq!(samples.len(), 20);
        assert!(samples.iter().all(|d| d.nanoseconds() >= 0.0));
    }

    #[test]
    #[should_panic(expected = "iteration count must be at least 1")]
    fn test_zero_iterations_rejected() {
        let runner = stepping_runner(1);
        runner.time(0, &(), |_| ());
    }

    #[test]
    fn test_zero_iterations_rejected_before_any_work() {
        let runner = stepping_runner(1);
        let calls = Cell::new(0_usize);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            runner.time(0, &(), |_| calls.set(calls.get() + 1));
        }));

        assert!(outcome.is_err());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_failure_on_second_invocation_propagates() {
        let runner = stepping_runner(1);
        let calls = Cell::new(0_usize);

        let result = runner.try_time(10, &(), |_| {
            calls.set(calls.get() + 1);
            if calls.get() == 2 { Err("boom") } else { Ok(()) }
        });

        let err = result.unwrap_err();
        assert_eq!(err.phase, Phase::Iteration { index: 0, of: 10 });
        assert_eq!(err.source, "boom");
        // remaining iterations were not run
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_warmup_failure_propagates() {
        let runner = stepping_runner(1);
        let result = runner.try_time(3, &(), |_| Err::<(), _>(std::fmt::Error));

        let err = result.unwrap_err();
        assert_eq!(err.phase, Phase::Warmup);
        assert_eq!(err.to_string(), "unit failed during warmup");
    }

    #[test]
    fn test_phase_display() {
        let phase = Phase::Iteration { index: 2, of: 10 };
        assert_eq!(phase.to_string(), "iteration 3/10");
    }

    #[test]
    fn test_total_time_single_span() {
        let runner = stepping_runner(100);
        let calls = Cell::new(0_usize);

        // one start read and one elapsed read, however many iterations run
        let total = runner.time_total(50, &(), |_| calls.set(calls.get() + 1));

        assert_eq!(total.nanoseconds(), 100.0);
        assert_eq!(calls.get(), 51);
    }

    #[test]
    fn test_mean_time_divides_by_iterations() {
        let runner = stepping_runner(400);
        let mean = runner.mean_time(8, &(), |_| ());
        assert_eq!(mean.nanoseconds(), 50.0);
    }

    #[test]
    fn test_try_mean_time_propagates() {
        let runner = stepping_runner(1);
        let calls = Cell::new(0_usize);

        let result = runner.try_mean_time(4, &(), |_| {
            calls.set(calls.get() + 1);
            if calls.get() == 3 { Err("late") } else { Ok(()) }
        });

        assert_eq!(
            result.unwrap_err().phase,
            Phase::Iteration { index: 1, of: 4 }
        );
    }
}
