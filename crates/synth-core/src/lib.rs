//! Core types for the synth-data framework.
//!
//! This crate provides the foundational pieces shared by every generator:
//!
//! - [`RandomSource`] - Seeded, explicitly threaded pseudo-random stream
//! - [`RatioSampler`] - Weighted discrete choice over an ordered key list
//! - [`WeightTable`] - Ordered `(key, weight)` pairs parsed from YAML/JSON
//! - [`SynthConfig`] - Configuration schema loaded from YAML
//! - [`SynthError`] - Error type shared by all crates
//!
//! # Architecture
//!
//! ```text
//! synth-core (this crate)
//!    │
//!    └─── synth-generator  (time series, users, requests, access logs)
//!              │
//!              └─── synth-data (CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_core::{RandomSource, RatioSampler};
//!
//! let mut rng = RandomSource::new(42);
//! let sampler = RatioSampler::new(vec![("rock", Some(1)), ("paper", Some(2))]).unwrap();
//! let key = sampler.draw(&mut rng);
//! assert!(matches!(key, Some(&"rock") | Some(&"paper")));
//! ```

pub mod error;
pub mod random;
pub mod ratio;
pub mod schema;
pub mod time;

// Re-exports for convenience
pub use error::SynthError;
pub use random::RandomSource;
pub use ratio::{RatioSampler, WeightRange, WeightTable};
pub use schema::{
    AccessLogConfig, AxisMode, CrudMethodWeights, CrudResourceConfig, DateRangeConfig,
    GaussianOptions, MethodWeight, RequestSourceConfig, RequestTemplateConfig, SeriesConfig,
    SeriesValuesConfig, SynthConfig, TimeAxisConfig, TrigOptions, UserPoolConfig,
};
pub use time::{format_instant, parse_instant, InstantSpec};
