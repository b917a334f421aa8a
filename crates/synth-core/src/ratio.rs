//! Weighted discrete sampling.
//!
//! A [`RatioSampler`] assigns every key with a positive weight a contiguous
//! integer range, in input order:
//!
//! ```text
//! [("a", 2), ("b", 0), ("c", 1)]
//!
//!   a -> [1, 2]
//!   c -> [3, 3]     max = 3
//! ```
//!
//! A draw picks `n` uniformly in `[1, max]` and returns the key whose range
//! contains `n`. Keys with weight <= 0 get no range and are never drawn.

use crate::error::SynthError;
use crate::random::RandomSource;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;
use tracing::trace;

/// Cumulative range owned by one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightRange<K> {
    pub key: K,
    /// Inclusive lower bound
    pub lower: i64,
    /// Inclusive upper bound
    pub upper: i64,
}

/// Weighted sampler over an ordered list of keys.
///
/// Built once and immutable afterwards. Draws are independent (with
/// replacement).
#[derive(Debug, Clone)]
pub struct RatioSampler<K> {
    ranges: Vec<WeightRange<K>>,
    max: i64,
}

impl<K> RatioSampler<K> {
    /// Build a sampler from ordered `(key, weight)` pairs.
    ///
    /// Absent weights (`None`) are dropped silently. Fails only when the
    /// total of positive weights does not fit in an `i64`.
    pub fn new<I>(weights: I) -> Result<Self, SynthError>
    where
        I: IntoIterator<Item = (K, Option<i64>)>,
        K: fmt::Display,
    {
        let mut ranges = Vec::new();
        let mut max: i64 = 0;

        for (key, weight) in weights {
            let Some(weight) = weight.filter(|w| *w > 0) else {
                continue;
            };
            let upper = max
                .checked_add(weight)
                .ok_or_else(|| SynthError::weight(key.to_string(), "total weight overflows i64"))?;
            ranges.push(WeightRange {
                key,
                lower: max + 1,
                upper,
            });
            max = upper;
        }

        trace!("Built ratio sampler: {} active keys, max {}", ranges.len(), max);
        Ok(Self { ranges, max })
    }

    /// A sampler with no active keys. Every draw returns `None`.
    pub fn empty() -> Self {
        Self {
            ranges: Vec::new(),
            max: 0,
        }
    }

    /// Draw a key, or `None` when no key has a positive weight.
    pub fn draw(&self, rng: &mut RandomSource) -> Option<&K> {
        let n = rng.random_int(1, self.max)?;
        let idx = self.ranges.partition_point(|range| range.upper < n);
        self.ranges.get(idx).map(|range| &range.key)
    }

    /// Cumulative ranges of the active keys, in input order.
    pub fn ranges(&self) -> &[WeightRange<K>] {
        &self.ranges
    }

    /// Upper bound of the last range (0 when nothing is active).
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Whether every draw returns `None`.
    pub fn is_empty(&self) -> bool {
        self.max == 0
    }
}

/// Ordered `(key, weight)` pairs as written in configuration.
///
/// Weights are kept as raw values so a non-integer weight surfaces as
/// [`SynthError::InvalidWeight`] naming its key, not as a parse error.
/// Mapping order in YAML/JSON documents is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    entries: Vec<(String, JsonValue)>,
}

impl WeightTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key` with an integer weight.
    pub fn with(mut self, key: impl Into<String>, weight: i64) -> Self {
        self.entries.push((key.into(), JsonValue::from(weight)));
        self
    }

    /// Build a table from a JSON object, keeping key order.
    pub fn from_json(value: &JsonValue) -> Result<Self, SynthError> {
        match value {
            JsonValue::Object(map) => Ok(Self {
                entries: map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            }),
            JsonValue::Null => Ok(Self::new()),
            other => Err(SynthError::InvalidArgument {
                name: "weights".to_string(),
                reason: format!("expected an object of key/weight pairs, got {other}"),
            }),
        }
    }

    /// Number of entries, including ones with absent or non-positive weights.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Typed weights in declaration order.
    ///
    /// `null` becomes `None`; integers (including floats with no fractional
    /// part) become `Some`; anything else is an error naming the key.
    pub fn weights(&self) -> Result<Vec<(String, Option<i64>)>, SynthError> {
        self.entries
            .iter()
            .map(|(key, value)| Ok((key.clone(), weight_from_json(key, value)?)))
            .collect()
    }

    /// Look up the typed weight of `key`.
    pub fn get(&self, key: &str) -> Result<Option<i64>, SynthError> {
        match self.entries.iter().find(|(k, _)| k == key) {
            Some((k, v)) => weight_from_json(k, v),
            None => Ok(None),
        }
    }

    /// Build a sampler over the table's keys.
    pub fn sampler(&self) -> Result<RatioSampler<String>, SynthError> {
        RatioSampler::new(self.weights()?)
    }
}

fn weight_from_json(key: &str, value: &JsonValue) -> Result<Option<i64>, SynthError> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                    Ok(Some(f as i64))
                }
                _ => Err(SynthError::weight(key, format!("expected integer, got {n}"))),
            }
        }
        other => Err(SynthError::weight(key, format!("expected integer, got {other}"))),
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for WeightTable {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, w)| (k.into(), JsonValue::from(w)))
                .collect(),
        }
    }
}

impl Serialize for WeightTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeightTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WeightTableVisitor)
    }
}

struct WeightTableVisitor;

impl<'de> Visitor<'de> for WeightTableVisitor {
    type Value = WeightTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of keys to integer weights")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(WeightTable::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        // YAML status tables use bare integer keys (`200: 195`)
        while let Some((key, value)) = access.next_entry::<JsonValue, JsonValue>()? {
            let key = match key {
                JsonValue::String(s) => s,
                JsonValue::Number(n) => n.to_string(),
                JsonValue::Bool(b) => b.to_string(),
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "weight table keys must be scalars, got {other}"
                    )))
                }
            };
            entries.push((key, value));
        }
        Ok(WeightTable { entries })
    }
}
