#![warn(missing_docs)]
//! Chronos Report - Results and Text Reports
//!
//! - `TestcaseResult`: one named unit's samples with derived statistics
//! - `TestcaseGroupResult`: several units run against one shared input
//! - `format_group` / `write_group`: the aligned, unit-scaled text block
//!
//! Only the fixed human-readable layout is produced; there is no
//! machine-readable variant.

mod human;
mod report;

pub use human::{DEFAULT_SEPARATOR, LAYOUT_MARGIN, ReportStyle, format_group, format_group_with, write_group};
pub use report::{ReportError, TestcaseGroupResult, TestcaseResult};
