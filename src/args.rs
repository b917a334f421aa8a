//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default seed when neither the CLI nor the config file sets one.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Parser, Debug)]
#[command(name = "synth-data")]
#[command(about = "Generate reproducible fake time series and HTTP access logs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the time series described by the `series` section
    Series(GenerateArgs),

    /// Generate the access log described by the `access_log` section
    AccessLog(GenerateArgs),

    /// Print the user pool the access log draws from
    Users(GenerateArgs),
}

/// Arguments shared by all generate commands.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path to config YAML file
    #[arg(long, short = 'c')]
    pub config: PathBuf,

    /// Random seed (overrides the config file; same seed = same data)
    #[arg(long, env = "SYNTH_SEED")]
    pub seed: Option<u64>,

    /// Output file (stdout when omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "jsonl")]
    pub format: OutputFormat,
}

/// Serialization of generated records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Jsonl,
    /// A single pretty-printed JSON array
    Json,
}
