//! Testcase Executor
//!
//! Turns named units of work plus one shared input into a
//! `TestcaseGroupResult`.
//!
//! ```text
//! Testcase × N (name + callable)      input
//!        │                              │
//!        └──────────────┬───────────────┘
//!                       ▼
//!              ┌─────────────────┐
//!              │    Executor     │  warmup → N timed iterations per unit
//!              └────────┬────────┘
//!                       ▼
//!            TestcaseGroupResult<I>  ──►  chronos_report::format_group
//! ```

mod execution;

pub use execution::{
    BoxError, ExecutionConfig, ExecutionError, Executor, RunMode, Testcase, run_testcase_group,
};
