#![warn(missing_docs)]
//! # Chronos
//!
//! Microbenchmarking harness for comparing the running time of small units of
//! work against one shared input.
//!
//! - **Monotonic timing**: a `Clock` over the platform's raw monotonic counter,
//!   with the tick-to-nanosecond ratio read once
//! - **Warmup then sample**: one untimed invocation, then N timed iterations
//! - **Plain statistics**: min, max, mean, upper median and population
//!   standard deviation
//! - **Comparable reports**: every line of a group shares one time scale
//!
//! ## Quick Start
//!
//! ```no_run
//! use chronos::prelude::*;
//!
//! let mut testcases = vec![
//!     Testcase::new("push", |n: &usize| {
//!         let mut v = Vec::new();
//!         for i in 0..*n {
//!             v.push(i);
//!         }
//!         v
//!     }),
//!     Testcase::new("collect", |n: &usize| (0..*n).collect::<Vec<_>>()),
//! ];
//!
//! let group = run_testcase_group(&mut testcases, 10_000, 10)?;
//! print!("{group}");
//! # Ok::<(), chronos::ExecutionError>(())
//! ```
//!
//! ## Timing a Single Unit
//!
//! ```
//! use chronos::{SampleRunner, consume_value};
//!
//! let runner = SampleRunner::monotonic()?;
//! let samples = runner.time(5, &100_u64, |n| consume_value((0..*n).sum::<u64>()));
//! assert_eq!(samples.len(), 5);
//! # Ok::<(), chronos::ClockError>(())
//! ```

// Re-export core types
pub use chronos_core::{
    Clock, ClockError, Duration, ManualTicks, MonotonicTicks, Phase, RunError, SampleRunner,
    Scale, Stopwatch, TickSource, Timebase, consume_value, format_significant,
};

// Re-export stats
pub use chronos_stats::{StatsError, SummaryStatistics, compute_median, compute_summary};

// Re-export results and reporting
pub use chronos_report::{
    ReportError, ReportStyle, TestcaseGroupResult, TestcaseResult, format_group,
    format_group_with, write_group,
};

// Re-export execution
pub use chronos_cli::{
    BoxError, ExecutionConfig, ExecutionError, Executor, RunMode, Testcase, run_testcase_group,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Duration, SampleRunner, Testcase, TestcaseGroupResult, TestcaseResult, consume_value,
        run_testcase_group,
    };
}

/// Run the Chronos CLI over the built-in workloads.
///
/// ```no_run
/// fn main() {
///     chronos::run().unwrap();
/// }
/// ```
pub use chronos_cli::run;
