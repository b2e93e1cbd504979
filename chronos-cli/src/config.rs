//! Configuration loading from chronos.toml
//!
//! Chronos configuration can be specified in a `chronos.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use crate::executor::{ExecutionConfig, RunMode};
use chronos_report::{DEFAULT_SEPARATOR, LAYOUT_MARGIN, ReportStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up by [`ChronosConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "chronos.toml";

/// Chronos configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChronosConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Workload selection
    #[serde(default)]
    pub workloads: WorkloadsConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for testcase execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Timed iterations per unit, after the single warmup invocation
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// "samples" (one sample per iteration) or "total" (one span, mean only)
    #[serde(default)]
    pub mode: RunMode,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            mode: RunMode::default(),
        }
    }
}

fn default_iterations() -> usize {
    10
}

/// Which demo workloads run, and against which inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadsConfig {
    /// Input sizes; one report is printed per input
    #[serde(default = "default_inputs")]
    pub inputs: Vec<usize>,
    /// Regex over workload names
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for WorkloadsConfig {
    fn default() -> Self {
        Self {
            inputs: default_inputs(),
            filter: default_filter(),
        }
    }
}

fn default_inputs() -> Vec<usize> {
    vec![10, 100, 1_000, 10_000, 100_000, 1_000_000]
}
fn default_filter() -> String {
    ".*".to_string()
}

/// Report layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Rule character for report headers and trailers
    #[serde(default = "default_separator")]
    pub separator: char,
    /// Columns added to the longest name or input when sizing the report
    #[serde(default = "default_margin")]
    pub margin: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            margin: default_margin(),
        }
    }
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}
fn default_margin() -> usize {
    LAYOUT_MARGIN
}

impl ChronosConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(err) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            error = %err,
                            "ignoring unreadable configuration"
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Reject settings no run can satisfy
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.runner.iterations == 0 {
            return Err(anyhow::anyhow!("runner.iterations must be at least 1"));
        }
        if self.workloads.inputs.is_empty() {
            return Err(anyhow::anyhow!("workloads.inputs must list at least one input"));
        }
        Ok(())
    }

    /// Execution settings for the executor
    pub fn execution(&self) -> ExecutionConfig {
        ExecutionConfig {
            iterations: self.runner.iterations,
            mode: self.runner.mode,
        }
    }

    /// Layout settings for the reporter
    pub fn report_style(&self) -> ReportStyle {
        ReportStyle {
            separator: self.output.separator,
            margin: self.output.margin,
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Chronos Configuration

[runner]
# Timed iterations per workload (one extra untimed warmup always runs first)
iterations = 10
# "samples": time every iteration separately (mean and stddev)
# "total": time all iterations in one span (mean only, lower overhead)
mode = "samples"

[workloads]
# One report is printed per input
inputs = [10, 100, 1000, 10000, 100000, 1000000]
# Regex over workload names
filter = ".*"

[output]
# Rule character for report headers and trailers
separator = "="
# Extra columns added to the longest workload name or input
margin = 26
"#
        .to_string()
    }
}
