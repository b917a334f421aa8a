//! synth-data: reproducible fake datasets for testing.
//!
//! The binary reads a YAML config, seeds a single
//! [`RandomSource`](synth_core::RandomSource) and writes the records of one
//! generator as JSON Lines or a JSON array:
//!
//! ```text
//! synth-data series     --config series.yaml
//! synth-data access-log --config log.yaml --seed 7 --output access.jsonl
//! synth-data users      --config log.yaml --format json
//! ```

pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Commands, GenerateArgs, OutputFormat};
