//! Time series generation.
//!
//! A [`Series`] pairs a [`TimeAxis`] with the key name its values are stored
//! under. Each producer maps the axis, in order, to points of the form
//! `{"timestamp": "<ISO-8601>", "<key_name>": value}`.

use crate::axis::TimeAxis;
use chrono::{DateTime, Utc};
use rand_distr::Normal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::f64::consts::PI;
use synth_core::schema::{GaussianOptions, SeriesConfig, SeriesValuesConfig, TrigOptions};
use synth_core::{format_instant, RandomSource, RatioSampler, SynthError, WeightTable};

/// Value carried by one series point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesValue {
    Number(f64),
    /// A drawn key; `None` when no key has a positive weight
    Key(Option<String>),
}

impl SeriesValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SeriesValue::Number(n) => Some(*n),
            SeriesValue::Key(_) => None,
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            SeriesValue::Key(key) => key.as_deref(),
            SeriesValue::Number(_) => None,
        }
    }
}

/// One point of a time series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: String,
    pub key_name: String,
    pub value: SeriesValue,
}

impl Serialize for SeriesPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.serialize_entry(&self.key_name, &self.value)?;
        map.end()
    }
}

/// A time axis plus the key name of its values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    axis: TimeAxis,
    key_name: String,
}

impl Series {
    /// Create a series over `axis` with key name `value`.
    pub fn new(axis: TimeAxis) -> Self {
        Self {
            axis,
            key_name: "value".to_string(),
        }
    }

    /// Build the series described by `config`, defaulting its window against `now`.
    pub fn from_config(config: &SeriesConfig, now: DateTime<Utc>) -> Result<Self, SynthError> {
        config.validate()?;
        let axis = TimeAxis::from_config(&config.axis, now).map_err(|e| e.within("axis"))?;
        Ok(Self::new(axis).with_key_name(config.key_name.clone()))
    }

    /// Replace the key name.
    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }

    /// Copy of this series over a different axis.
    pub fn with_axis(&self, axis: TimeAxis) -> Self {
        Self {
            axis,
            key_name: self.key_name.clone(),
        }
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// Map every axis instant (unix seconds) through `func`.
    pub fn generate<F>(&self, rng: &mut RandomSource, mut func: F) -> Vec<SeriesPoint>
    where
        F: FnMut(i64, &mut RandomSource) -> SeriesValue,
    {
        self.axis
            .unix_timestamps(rng)
            .into_iter()
            .map(|unix| {
                let value = func(unix, rng);
                SeriesPoint {
                    timestamp: unix_to_iso(unix),
                    key_name: self.key_name.clone(),
                    value,
                }
            })
            .collect()
    }

    /// Sine curve.
    pub fn sin(
        &self,
        rng: &mut RandomSource,
        options: &TrigOptions,
    ) -> Result<Vec<SeriesPoint>, SynthError> {
        self.trigonometric(rng, options, f64::sin)
    }

    /// Cosine curve.
    pub fn cos(
        &self,
        rng: &mut RandomSource,
        options: &TrigOptions,
    ) -> Result<Vec<SeriesPoint>, SynthError> {
        self.trigonometric(rng, options, f64::cos)
    }

    fn trigonometric(
        &self,
        rng: &mut RandomSource,
        options: &TrigOptions,
        func: fn(f64) -> f64,
    ) -> Result<Vec<SeriesPoint>, SynthError> {
        options.validate()?;
        let scale = 2.0 * PI / options.period as f64;
        let digits = options.decimal_digits as i32;

        Ok(self.generate(rng, |unix, _| {
            let value = options.coefficient * func(unix as f64 * scale) + options.constant;
            SeriesValue::Number(round_to(value, digits))
        }))
    }

    /// Normally distributed values. A variance of zero yields `mean` exactly.
    pub fn gaussian(
        &self,
        rng: &mut RandomSource,
        options: &GaussianOptions,
    ) -> Result<Vec<SeriesPoint>, SynthError> {
        options.validate()?;
        let normal = Normal::new(options.mean, options.variance.sqrt())
            .map_err(|e| SynthError::config("variance", e.to_string()))?;
        let digits = options.decimal_digits as i32;

        Ok(self.generate(rng, |_, rng| {
            SeriesValue::Number(round_to(rng.sample(&normal), digits))
        }))
    }

    /// A key drawn independently at every point.
    pub fn ratio(
        &self,
        rng: &mut RandomSource,
        weights: &WeightTable,
    ) -> Result<Vec<SeriesPoint>, SynthError> {
        let sampler = weights.sampler()?;
        Ok(self.ratio_with(rng, &sampler))
    }

    /// Like [`Series::ratio`] with a prebuilt sampler.
    pub fn ratio_with(
        &self,
        rng: &mut RandomSource,
        sampler: &RatioSampler<String>,
    ) -> Vec<SeriesPoint> {
        self.generate(rng, |_, rng| SeriesValue::Key(sampler.draw(rng).cloned()))
    }

    /// Run the producer named by `values`.
    pub fn values(
        &self,
        rng: &mut RandomSource,
        values: &SeriesValuesConfig,
    ) -> Result<Vec<SeriesPoint>, SynthError> {
        match values {
            SeriesValuesConfig::Sin(options) => self.sin(rng, options),
            SeriesValuesConfig::Cos(options) => self.cos(rng, options),
            SeriesValuesConfig::Gaussian(options) => self.gaussian(rng, options),
            SeriesValuesConfig::Ratio { weights } => self.ratio(rng, weights),
        }
    }
}

/// Round half away from zero to `digits` decimal places.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    let rounded = (value * factor).round() / factor;
    // Avoid emitting -0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn unix_to_iso(unix: i64) -> String {
    DateTime::from_timestamp(unix, 0)
        .map(|dt| format_instant(&dt))
        .unwrap_or_else(|| unix.to_string())
}
