#![warn(missing_docs)]
//! Chronos CLI Library
//!
//! Runs the built-in workloads as one testcase group per input size and
//! prints a report for each group. The executor is public so library users
//! can drive their own testcases the same way.
//!
//! # Example
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     chronos_cli::run()
//! }
//! ```

mod config;
mod executor;
pub mod workloads;

pub use config::*;
pub use executor::{
    BoxError, ExecutionConfig, ExecutionError, Executor, RunMode, Testcase, run_testcase_group,
};

use anyhow::Context;
use chronos_report::write_group;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Chronos CLI arguments
#[derive(Parser, Debug)]
#[command(name = "chronos")]
#[command(author, version, about = "Chronos - compare the running time of small units of work")]
pub struct Cli {
    /// Optional subcommand (Run, List, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter workloads by regex pattern (overrides chronos.toml)
    pub filter: Option<String>,

    /// Timed iterations per workload
    #[arg(short = 'n', long, global = true)]
    pub iterations: Option<usize>,

    /// Measurement mode
    #[arg(long, value_enum, global = true)]
    pub mode: Option<RunMode>,

    /// Comma-separated input sizes, e.g. `--inputs 10,1000`
    #[arg(long, value_delimiter = ',', global = true)]
    pub inputs: Vec<usize>,

    /// Write reports to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Configuration file (skips chronos.toml discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the selected workloads (default)
    Run {
        /// Filter workloads by regex pattern
        filter: Option<String>,
    },
    /// List the built-in workloads
    List {
        /// Filter workloads by regex pattern
        filter: Option<String>,
    },
    /// Write a default chronos.toml to the current directory
    Init,
}

impl Cli {
    /// Workload filter from the command line, if any. A filter given after
    /// `run` or `list` wins over one given before the subcommand.
    pub fn selected_filter(&self) -> Option<&str> {
        match &self.command {
            Some(Commands::Run { filter: Some(filter) })
            | Some(Commands::List { filter: Some(filter) }) => Some(filter.as_str()),
            _ => self.filter.as_deref(),
        }
    }
}

/// Run the Chronos CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Chronos CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let directive = if cli.verbose {
        "chronos=debug"
    } else {
        "chronos=info"
    };
    // A subscriber may already be installed when embedded in another binary.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(directive)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Init) => init_config(Path::new(CONFIG_FILE_NAME)),
        Some(Commands::List { .. }) => list_workloads(&load_config(&cli)?),
        Some(Commands::Run { .. }) | None => {
            run_workloads(&load_config(&cli)?, cli.output.as_deref())
        }
    }
}

/// Explicit `--config` file, else discovered chronos.toml, else defaults;
/// then CLI flags on top.
fn load_config(cli: &Cli) -> anyhow::Result<ChronosConfig> {
    let file_config = match &cli.config {
        Some(path) => ChronosConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ChronosConfig::discover().unwrap_or_default(),
    };
    let config = resolve_config(cli, file_config);
    config.validate()?;
    debug!(?config, "resolved configuration");
    Ok(config)
}

/// Layer CLI flags over file configuration. Flags that were not given leave
/// the file value in place.
pub fn resolve_config(cli: &Cli, mut config: ChronosConfig) -> ChronosConfig {
    if let Some(filter) = cli.selected_filter() {
        config.workloads.filter = filter.to_string();
    }
    if let Some(iterations) = cli.iterations {
        config.runner.iterations = iterations;
    }
    if let Some(mode) = cli.mode {
        config.runner.mode = mode;
    }
    if !cli.inputs.is_empty() {
        config.workloads.inputs = cli.inputs.clone();
    }
    config
}

fn workload_filter(config: &ChronosConfig) -> anyhow::Result<Regex> {
    Regex::new(&config.workloads.filter)
        .with_context(|| format!("invalid workload filter `{}`", config.workloads.filter))
}

fn list_workloads(config: &ChronosConfig) -> anyhow::Result<()> {
    let filter = workload_filter(config)?;
    let selected = workloads::select(&filter);

    println!("Chronos workloads:");
    for workload in &selected {
        println!("├── {:<10} {}", workload.name, workload.description);
    }
    println!("{} workloads found.", selected.len());

    Ok(())
}

fn run_workloads(config: &ChronosConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let filter = workload_filter(config)?;
    let selected = workloads::select(&filter);
    if selected.is_empty() {
        warn!(filter = %config.workloads.filter, "no workloads matched");
        anyhow::bail!("no workloads match filter `{}`", config.workloads.filter);
    }

    let executor = Executor::new(config.execution())?;
    let style = config.report_style();
    let mut testcases = workloads::testcases(&selected);

    let mut sink: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    info!(
        workloads = selected.len(),
        inputs = config.workloads.inputs.len(),
        iterations = config.runner.iterations,
        mode = %config.runner.mode,
        "starting run"
    );

    let pb = ProgressBar::new(config.workloads.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    for &input in &config.workloads.inputs {
        pb.set_message(format!("input {input}"));
        let group = executor.run_group(&mut testcases, input)?;
        info!(input, scale = %group.scale(), "group complete");
        pb.suspend(|| write_group(sink.as_mut(), &group, &style))?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    sink.flush()?;

    if let Some(path) = output {
        info!(path = %path.display(), "reports written");
    }

    Ok(())
}

fn init_config(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    std::fs::write(path, ChronosConfig::default_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
