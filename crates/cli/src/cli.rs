//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::{MergeMode, OrderingPolicy, PrinterKind};
use std::path::PathBuf;

/// Log Merge - chronological K-way merge of timestamped log sources
#[derive(Parser, Debug)]
#[command(
    name = "log-merge",
    author,
    version,
    about = "Merge many time-ordered log sources into one chronological stream",
    long_about = "Merges independently time-ordered log sources into a single \n\
                  chronologically ordered stream, either by pulling synchronously \n\
                  or by overlapping latent pulls through bounded look-ahead buffers."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "LOG_MERGE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "LOG_MERGE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Level used when `RUST_LOG` is unset
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate random sources and merge them
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON); defaults apply when omitted
    #[arg(short, long, env = "LOG_MERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the draining protocol
    #[arg(long, value_enum, env = "LOG_MERGE_MODE")]
    pub mode: Option<ModeArg>,

    /// Override the number of generated sources
    #[arg(long, env = "LOG_MERGE_SOURCES")]
    pub sources: Option<usize>,

    /// Override the per-source look-ahead capacity (async mode)
    #[arg(long, env = "LOG_MERGE_LOOKAHEAD")]
    pub lookahead: Option<usize>,

    /// Override the per-source ordering policy
    #[arg(long, value_enum)]
    pub ordering: Option<OrderingArg>,

    /// Override the RNG seed for reproducible runs
    #[arg(long, env = "LOG_MERGE_SEED")]
    pub seed: Option<u64>,

    /// Override the printer
    #[arg(long, value_enum)]
    pub printer: Option<PrinterArg>,

    /// Validate configuration and exit without merging
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "LOG_MERGE_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "merge.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(value: LogFormat) -> Self {
        match value {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Sync,
    Async,
}

impl From<ModeArg> for MergeMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Sync => Self::Sync,
            ModeArg::Async => Self::Async,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OrderingArg {
    Trust,
    Warn,
    Reject,
}

impl From<OrderingArg> for OrderingPolicy {
    fn from(value: OrderingArg) -> Self {
        match value {
            OrderingArg::Trust => Self::Trust,
            OrderingArg::Warn => Self::Warn,
            OrderingArg::Reject => Self::Reject,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PrinterArg {
    /// Log every entry
    Log,
    /// Count and verify only
    Stats,
}

impl From<PrinterArg> for PrinterKind {
    fn from(value: PrinterArg) -> Self {
        match value {
            PrinterArg::Log => Self::Log,
            PrinterArg::Stats => Self::Stats,
        }
    }
}
