//! Testcase Execution
//!
//! Units run one after another on the calling thread, in submission order.
//! A unit that returns an error (or panics) ends the whole group: results
//! for the units that already finished are discarded rather than reported as
//! a partial comparison.

use chronos_core::{
    ClockError, MonotonicTicks, Phase, RunError, SampleRunner, TickSource, consume_value,
};
use chronos_report::{TestcaseGroupResult, TestcaseResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Error type units may return
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

type UnitFn<'a, I> = Box<dyn FnMut(&I) -> Result<(), BoxError> + 'a>;

/// How each unit is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// One sample per timed iteration
    #[default]
    Samples,
    /// All iterations in one stopwatch span; the unit gets a single mean sample
    Total,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Samples => f.write_str("samples"),
            RunMode::Total => f.write_str("total"),
        }
    }
}

/// Configuration for testcase execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Timed iterations per unit (the warmup is extra)
    pub iterations: usize,
    /// Measurement mode
    pub mode: RunMode,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            mode: RunMode::Samples,
        }
    }
}

/// Failures while executing a group
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The monotonic clock could not be initialised
    #[error(transparent)]
    Clock(#[from] ClockError),
    /// A unit under test returned an error
    #[error("testcase `{name}` failed during {phase}")]
    Testcase {
        /// Name of the failing unit
        name: String,
        /// Warmup or the failing iteration
        phase: Phase,
        /// The unit's error
        #[source]
        source: BoxError,
    },
}

/// A named unit of work taking the group's shared input
pub struct Testcase<'a, I: ?Sized> {
    name: String,
    unit: UnitFn<'a, I>,
}

impl<'a, I: ?Sized + 'a> Testcase<'a, I> {
    /// Wrap an infallible unit. Its return value is consumed so the work
    /// producing it is not optimised away.
    pub fn new<T, F>(name: impl Into<String>, mut unit: F) -> Self
    where
        T: 'a,
        F: FnMut(&I) -> T + 'a,
    {
        Self {
            name: name.into(),
            unit: Box::new(move |input: &I| {
                consume_value(unit(input));
                Ok::<(), BoxError>(())
            }),
        }
    }

    /// Wrap a unit whose errors should abort the group
    pub fn fallible<T, E, F>(name: impl Into<String>, mut unit: F) -> Self
    where
        T: 'a,
        E: Into<BoxError> + 'a,
        F: FnMut(&I) -> Result<T, E> + 'a,
    {
        Self {
            name: name.into(),
            unit: Box::new(move |input: &I| -> Result<(), BoxError> {
                unit(input).map(consume_value).map_err(Into::into)
            }),
        }
    }

    /// Pair names with units.
    ///
    /// # Panics
    /// If the two lists differ in length.
    pub fn zip<S, T, F>(names: &[S], units: Vec<F>) -> Vec<Self>
    where
        S: AsRef<str>,
        T: 'a,
        F: FnMut(&I) -> T + 'a,
    {
        assert_eq!(
            names.len(),
            units.len(),
            "every testcase needs exactly one name"
        );
        names
            .iter()
            .zip(units)
            .map(|(name, unit)| Self::new(name.as_ref(), unit))
            .collect()
    }

    /// Unit name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<I: ?Sized> fmt::Debug for Testcase<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Testcase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Runs testcase groups with one runner and configuration
#[derive(Debug)]
pub struct Executor<S = MonotonicTicks> {
    runner: SampleRunner<S>,
    config: ExecutionConfig,
}

impl Executor<MonotonicTicks> {
    /// Executor over the platform's monotonic clock
    pub fn new(config: ExecutionConfig) -> Result<Self, ExecutionError> {
        Ok(Self::with_runner(SampleRunner::monotonic()?, config))
    }
}

impl<S: TickSource> Executor<S> {
    /// Executor using an existing runner
    pub fn with_runner(runner: SampleRunner<S>, config: ExecutionConfig) -> Self {
        Self { runner, config }
    }

    /// Active configuration
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Run every testcase against `input`, in order.
    ///
    /// # Panics
    /// If `testcases` is empty or the configured iteration count is zero.
    pub fn run_group<I>(
        &self,
        testcases: &mut [Testcase<'_, I>],
        input: I,
    ) -> Result<TestcaseGroupResult<I>, ExecutionError> {
        assert!(
            !testcases.is_empty(),
            "a testcase group needs at least one testcase"
        );

        let iterations = self.config.iterations;
        let mut results = Vec::with_capacity(testcases.len());

        for testcase in testcases.iter_mut() {
            debug!(
                testcase = %testcase.name,
                iterations,
                mode = %self.config.mode,
                "running testcase"
            );

            let samples = match self.config.mode {
                RunMode::Samples => self.runner.try_time(iterations, &input, &mut testcase.unit),
                RunMode::Total => self
                    .runner
                    .try_mean_time(iterations, &input, &mut testcase.unit)
                    .map(|mean| vec![mean]),
            };

            let samples = samples.map_err(|RunError { phase, source }| {
                ExecutionError::Testcase {
                    name: testcase.name.clone(),
                    phase,
                    source,
                }
            })?;

            results.push(TestcaseResult::new(testcase.name.clone(), samples));
        }

        Ok(TestcaseGroupResult::new(input, results))
    }
}

/// Run `testcases` against `input` on a fresh monotonic clock, collecting
/// `iterations` samples per unit.
///
/// # Panics
/// If `testcases` is empty or `iterations` is zero.
pub fn run_testcase_group<I>(
    testcases: &mut [Testcase<'_, I>],
    input: I,
    iterations: usize,
) -> Result<TestcaseGroupResult<I>, ExecutionError> {
    let config = ExecutionConfig {
        iterations,
        mode: RunMode::Samples,
    };
    Executor::new(config)?.run_group(testcases, input)
}
