//! Fake dataset generators for synth-data.
//!
//! This crate turns a seeded [`RandomSource`](synth_core::RandomSource) and
//! the configuration types of `synth-core` into two kinds of output:
//!
//! - time series points (`{timestamp, <key>: value}`) from a [`Series`]
//! - HTTP access-log entries from an [`AccessLogEngine`]
//!
//! # Architecture
//!
//! ```text
//! RandomSource ──┬──► TimeAxis ──► Series (sin / cos / gaussian / ratio)
//!                │
//!                └──► RatioSampler ──┬──► UserPool
//!                                    ├──► RequestGenerator / CrudRequestGenerator
//!                                    └──► AccessLogEngine ◄── DateRange
//! ```
//!
//! All generators borrow the same `RandomSource` for each draw, so two runs
//! with the same seed and configuration produce identical output.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use synth_core::schema::TrigOptions;
//! use synth_core::RandomSource;
//! use synth_generator::{Series, TimeAxis};
//!
//! let from = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap();
//! let until = Utc.with_ymd_and_hms(2016, 1, 1, 1, 0, 0).unwrap();
//! let series = Series::new(TimeAxis::fixed(from, until, 600).unwrap());
//!
//! let mut rng = RandomSource::new(42);
//! let points = series.sin(&mut rng, &TrigOptions::default()).unwrap();
//! assert_eq!(points.len(), 7);
//! ```

pub mod access_log;
pub mod axis;
pub mod generators;
pub mod series;

// Re-exports for convenience
pub use access_log::{AccessLogEngine, LogEntry, RequestSource};
pub use axis::TimeAxis;
pub use generators::{
    CrudRequestGenerator, DateRange, Request, RequestGenerator, StringSource, SyntheticStrings,
    SyntheticUser, UserPool,
};
pub use series::{Series, SeriesPoint, SeriesValue};
