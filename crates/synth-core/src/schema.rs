//! Configuration schema for the synth-data generators.
//!
//! Every option struct deserializes from YAML or JSON, rejects unknown keys,
//! and fills omitted fields with defaults. Range checks live in `validate()`
//! and report the offending field path:
//!
//! ```yaml
//! seed: 42
//! series:
//!   axis:
//!     mode: fixed
//!     from: 2016-01-01T00:00:00Z
//!     until: 2016-01-01T01:00:00Z
//!     interval: 600
//!   key_name: temperature
//!   values:
//!     type: sin
//!     coefficient: 2
//!     period: 7200
//! access_log:
//!   lines: 100
//!   users:
//!     count: 20
//!     type_weights: { anonymous: 1, normal: 9 }
//!   requests:
//!     - type: crud
//!       resource: articles
//!       method_weights:
//!         GET: { weight: 5, status_weights: { 200: 99, 500: 1 } }
//! ```

use crate::error::SynthError;
use crate::ratio::WeightTable;
use crate::time::InstantSpec;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default step of a fixed series axis.
pub const DEFAULT_SERIES_INTERVAL_SECS: i64 = 5 * 60;
/// Default number of points on a jittered series axis.
pub const DEFAULT_JITTER_COUNT: i64 = 10;
/// Default length of a series window ending at `until`.
pub const DEFAULT_SERIES_WINDOW_SECS: i64 = 60 * 60;
/// Default length of an access-log date window ending now.
pub const DEFAULT_DATE_WINDOW_SECS: i64 = 24 * 60 * 60;

const MAX_DECIMAL_DIGITS: i64 = 10;

// ============================================================================
// Time Series
// ============================================================================

/// How a time axis places its instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMode {
    /// Evenly spaced grid from `from` to `until`
    #[default]
    #[serde(alias = "monospaced")]
    Fixed,
    /// `count` independent uniform draws, sorted
    #[serde(alias = "random")]
    Jittered,
}

/// Time axis options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeAxisConfig {
    /// Placement mode
    pub mode: AxisMode,
    /// Lower bound (defaults to `until` minus one hour)
    pub from: Option<InstantSpec>,
    /// Upper bound (defaults to now, truncated to whole seconds)
    pub until: Option<InstantSpec>,
    /// Seconds between grid points (fixed mode)
    pub interval: i64,
    /// Number of points (jittered mode)
    pub count: i64,
}

impl Default for TimeAxisConfig {
    fn default() -> Self {
        Self {
            mode: AxisMode::Fixed,
            from: None,
            until: None,
            interval: DEFAULT_SERIES_INTERVAL_SECS,
            count: DEFAULT_JITTER_COUNT,
        }
    }
}

impl TimeAxisConfig {
    /// Check numeric bounds.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.interval < 1 {
            return Err(SynthError::config("interval", "must be >= 1"));
        }
        if self.count < 0 {
            return Err(SynthError::config("count", "must be >= 0"));
        }
        Ok(())
    }

    /// Resolve `from` and `until` against `now`.
    pub fn resolve_window(
        &self,
        now: DateTime<Utc>,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), SynthError> {
        let until = match &self.until {
            Some(spec) => spec.resolve("until")?,
            None => now.trunc_subsecs(0),
        };
        let from = match &self.from {
            Some(spec) => spec.resolve("from")?,
            None => until - Duration::seconds(DEFAULT_SERIES_WINDOW_SECS),
        };
        if from > until {
            return Err(SynthError::config("from", "must not be after `until`"));
        }
        Ok((from, until))
    }
}

/// Options for sine and cosine curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrigOptions {
    pub coefficient: f64,
    pub constant: f64,
    /// Period in seconds
    pub period: i64,
    pub decimal_digits: i64,
}

impl Default for TrigOptions {
    fn default() -> Self {
        Self {
            coefficient: 1.0,
            constant: 0.0,
            period: 60 * 60,
            decimal_digits: 2,
        }
    }
}

impl TrigOptions {
    /// Check numeric bounds.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.coefficient.is_finite() {
            return Err(SynthError::config("coefficient", "must be finite"));
        }
        if !self.constant.is_finite() {
            return Err(SynthError::config("constant", "must be finite"));
        }
        if self.period < 1 {
            return Err(SynthError::config("period", "must be >= 1"));
        }
        validate_decimal_digits(self.decimal_digits)
    }
}

/// Options for normally distributed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaussianOptions {
    pub mean: f64,
    pub variance: f64,
    pub decimal_digits: i64,
}

impl Default for GaussianOptions {
    fn default() -> Self {
        Self {
            mean: 10.0,
            variance: 1.0,
            decimal_digits: 2,
        }
    }
}

impl GaussianOptions {
    /// Check numeric bounds.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.mean.is_finite() {
            return Err(SynthError::config("mean", "must be finite"));
        }
        if !self.variance.is_finite() || self.variance < 0.0 {
            return Err(SynthError::config("variance", "must be finite and >= 0"));
        }
        validate_decimal_digits(self.decimal_digits)
    }
}

fn validate_decimal_digits(digits: i64) -> Result<(), SynthError> {
    if !(0..=MAX_DECIMAL_DIGITS).contains(&digits) {
        return Err(SynthError::config(
            "decimal_digits",
            format!("must be between 0 and {MAX_DECIMAL_DIGITS}"),
        ));
    }
    Ok(())
}

/// Value producer for a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum SeriesValuesConfig {
    Sin(TrigOptions),
    Cos(TrigOptions),
    Gaussian(GaussianOptions),
    /// Weighted choice of a key per point
    Ratio { weights: WeightTable },
}

impl SeriesValuesConfig {
    pub fn validate(&self) -> Result<(), SynthError> {
        match self {
            SeriesValuesConfig::Sin(options) | SeriesValuesConfig::Cos(options) => {
                options.validate()
            }
            SeriesValuesConfig::Gaussian(options) => options.validate(),
            SeriesValuesConfig::Ratio { weights } => weights.weights().map(|_| ()),
        }
    }
}

fn default_key_name() -> String {
    "value".to_string()
}

/// A time series: an axis, a value key and a value producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesConfig {
    #[serde(default)]
    pub axis: TimeAxisConfig,

    /// Key under which each point carries its value
    #[serde(default = "default_key_name")]
    pub key_name: String,

    pub values: SeriesValuesConfig,
}

impl SeriesConfig {
    pub fn validate(&self) -> Result<(), SynthError> {
        self.axis.validate().map_err(|e| e.within("axis"))?;
        if self.key_name.is_empty() || self.key_name == "timestamp" {
            return Err(SynthError::config(
                "key_name",
                "must be non-empty and not `timestamp`",
            ));
        }
        self.values.validate().map_err(|e| e.within("values"))
    }
}

// ============================================================================
// Access Log
// ============================================================================

/// User population options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPoolConfig {
    /// Number of users built up front
    pub count: i64,

    /// Weights over `anonymous` and `normal` (absent means always normal)
    #[serde(default)]
    pub type_weights: Option<WeightTable>,
}

impl UserPoolConfig {
    pub fn new(count: i64) -> Self {
        Self {
            count,
            type_weights: None,
        }
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if self.count < 0 {
            return Err(SynthError::config("count", "must be >= 0"));
        }
        if let Some(table) = &self.type_weights {
            for (key, weight) in table.weights()? {
                if key != "anonymous" && key != "normal" {
                    return Err(SynthError::config(
                        format!("type_weights.{key}"),
                        "is not one of `anonymous`, `normal`",
                    ));
                }
                if weight.is_some_and(|w| w < 0) {
                    return Err(SynthError::config(format!("type_weights.{key}"), "must be >= 0"));
                }
            }
        }
        Ok(())
    }
}

/// One weighted request shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestTemplateConfig {
    pub method: String,
    pub path: String,
    pub weight: i64,
    pub status_weights: WeightTable,
}

impl RequestTemplateConfig {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        weight: i64,
        status_weights: WeightTable,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            weight,
            status_weights,
        }
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if self.weight < 0 {
            return Err(SynthError::config("weight", "must be >= 0"));
        }
        self.status_weights.weights().map(|_| ())
    }
}

/// Weight and status table of one HTTP method on a CRUD resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodWeight {
    pub weight: i64,
    pub status_weights: WeightTable,
}

impl MethodWeight {
    pub fn new(weight: i64, status_weights: WeightTable) -> Self {
        Self {
            weight,
            status_weights,
        }
    }
}

/// Per-method weights of a CRUD resource. Absent methods are never drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrudMethodWeights {
    #[serde(rename = "POST", default, skip_serializing_if = "Option::is_none")]
    pub post: Option<MethodWeight>,
    #[serde(rename = "GET", default, skip_serializing_if = "Option::is_none")]
    pub get: Option<MethodWeight>,
    #[serde(rename = "PUT", default, skip_serializing_if = "Option::is_none")]
    pub put: Option<MethodWeight>,
    #[serde(rename = "DELETE", default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<MethodWeight>,
}

impl CrudMethodWeights {
    /// Present methods in the fixed order POST, GET, PUT, DELETE.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &MethodWeight)> {
        [
            ("POST", &self.post),
            ("GET", &self.get),
            ("PUT", &self.put),
            ("DELETE", &self.delete),
        ]
        .into_iter()
        .filter_map(|(method, weight)| weight.as_ref().map(|w| (method, w)))
    }
}

/// A REST resource expanded into one template per HTTP method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrudResourceConfig {
    pub resource: String,
    pub method_weights: CrudMethodWeights,
}

impl CrudResourceConfig {
    /// The `users` resource with the stock method and status mix.
    pub fn users_default() -> Self {
        Self {
            resource: "users".to_string(),
            method_weights: CrudMethodWeights {
                post: Some(MethodWeight::new(
                    1,
                    [("201", 195), ("400", 2), ("403", 2), ("500", 1)]
                        .into_iter()
                        .collect(),
                )),
                get: Some(MethodWeight::new(
                    6,
                    [("200", 195), ("401", 2), ("403", 2), ("500", 1)]
                        .into_iter()
                        .collect(),
                )),
                put: Some(MethodWeight::new(
                    2,
                    [("200", 194), ("400", 2), ("401", 2), ("403", 2), ("500", 1)]
                        .into_iter()
                        .collect(),
                )),
                delete: Some(MethodWeight::new(
                    1,
                    [("204", 195), ("401", 2), ("403", 2), ("500", 1)]
                        .into_iter()
                        .collect(),
                )),
            },
        }
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if self.resource.is_empty() || self.resource.contains('/') {
            return Err(SynthError::config(
                "resource",
                "must be a non-empty path segment",
            ));
        }
        for (method, entry) in self.method_weights.iter() {
            if entry.weight < 0 {
                return Err(SynthError::config(
                    format!("method_weights.{method}.weight"),
                    "must be >= 0",
                ));
            }
            entry.status_weights.weights()?;
        }
        Ok(())
    }
}

/// A request generator in an access-log configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum RequestSourceConfig {
    /// Free-form weighted templates
    Templates {
        templates: Vec<RequestTemplateConfig>,
    },
    /// Per-method templates on one resource
    Crud(CrudResourceConfig),
}

impl RequestSourceConfig {
    pub fn validate(&self) -> Result<(), SynthError> {
        match self {
            RequestSourceConfig::Templates { templates } => {
                for (i, template) in templates.iter().enumerate() {
                    template
                        .validate()
                        .map_err(|e| e.within(&format!("templates[{i}]")))?;
                }
                Ok(())
            }
            RequestSourceConfig::Crud(crud) => crud.validate(),
        }
    }
}

/// Bounds for drawn dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateRangeConfig {
    pub from: Option<InstantSpec>,
    pub until: Option<InstantSpec>,
}

impl DateRangeConfig {
    /// Resolve the bounds against `now`.
    ///
    /// Both absent: the last 24 hours. One absent: that side is `now`.
    pub fn resolve(
        &self,
        now: DateTime<Utc>,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), SynthError> {
        let (from, until) = match (&self.from, &self.until) {
            (None, None) => (now - Duration::seconds(DEFAULT_DATE_WINDOW_SECS), now),
            (Some(from), None) => (from.resolve("from")?, now),
            (None, Some(until)) => (now, until.resolve("until")?),
            (Some(from), Some(until)) => (from.resolve("from")?, until.resolve("until")?),
        };
        if from > until {
            return Err(SynthError::config("from", "must not be after `until`"));
        }
        Ok((from, until))
    }
}

/// Access-log generation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessLogConfig {
    /// Number of log entries
    pub lines: i64,

    pub users: UserPoolConfig,

    /// Request generators; a `users` CRUD generator is added when missing
    #[serde(default)]
    pub requests: Vec<RequestSourceConfig>,

    #[serde(default)]
    pub dates: DateRangeConfig,
}

impl AccessLogConfig {
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.lines < 0 {
            return Err(SynthError::config("lines", "must be >= 0"));
        }
        self.users.validate().map_err(|e| e.within("users"))?;
        for (i, source) in self.requests.iter().enumerate() {
            source
                .validate()
                .map_err(|e| e.within(&format!("requests[{i}]")))?;
        }
        Ok(())
    }
}

// ============================================================================
// Top Level
// ============================================================================

fn default_version() -> u32 {
    1
}

/// Full configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthConfig {
    /// Config version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seed for the shared random source
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub series: Option<SeriesConfig>,

    #[serde(default)]
    pub access_log: Option<AccessLogConfig>,
}

impl SynthConfig {
    /// Load config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SynthError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        debug!(
            "Loaded config from {}: series={}, access_log={}",
            path.display(),
            config.series.is_some(),
            config.access_log.is_some()
        );
        Ok(config)
    }

    /// Parse and validate config from a YAML string.
    ///
    /// Malformed YAML is a `Yaml` error. A document that parses but does not
    /// fit the schema (unknown keys, wrong types) is a `Configuration` error
    /// naming the offending field.
    pub fn from_yaml(yaml: &str) -> Result<Self, SynthError> {
        let document: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let config: SynthConfig =
            serde_yaml::from_str(yaml).map_err(|e| schema_error(&document, &e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if let Some(series) = &self.series {
            series.validate().map_err(|e| e.within("series"))?;
        }
        if let Some(access_log) = &self.access_log {
            access_log.validate().map_err(|e| e.within("access_log"))?;
        }
        Ok(())
    }
}

/// Turn a serde failure into a `Configuration` error.
///
/// serde_yaml prefixes messages with the path it reached, which stops at the
/// enclosing section for tagged enums. Unknown keys are looked up below that
/// section to recover their full path.
fn schema_error(document: &serde_yaml::Value, err: &serde_yaml::Error) -> SynthError {
    let mut message = err.to_string();
    if err.location().is_some() {
        if let Some(idx) = message.rfind(" at line ") {
            message.truncate(idx);
        }
    }

    let (mut field, constraint) = match message.split_once(": ") {
        Some((prefix, rest)) if lookup(document, prefix).is_some() => {
            (prefix.to_string(), rest.to_string())
        }
        _ => (String::new(), message.clone()),
    };

    let unknown = constraint
        .strip_prefix("unknown field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(key, _)| key);
    if let Some(key) = unknown {
        if let Some(found) = lookup(document, &field).and_then(|node| find_key(node, key)) {
            field = join_path(&field, &found);
        }
    }

    if field.is_empty() {
        field = "<root>".to_string();
    }
    SynthError::config(field, constraint)
}

/// Resolve a serde_yaml path such as `access_log.requests[0]`.
fn lookup<'a>(document: &'a serde_yaml::Value, path: &str) -> Option<&'a serde_yaml::Value> {
    if path.is_empty() {
        return Some(document);
    }
    let mut node = document;
    for segment in path.split('.') {
        let (name, indices) = match segment.find('[') {
            Some(idx) => segment.split_at(idx),
            None => (segment, ""),
        };
        if !name.is_empty() {
            node = node.get(name)?;
        }
        for index in indices.split(['[', ']']).filter(|s| !s.is_empty()) {
            node = node.get(index.parse::<usize>().ok()?)?;
        }
    }
    Some(node)
}

/// Path of the first mapping key named `key` under `node`, preferring
/// shallower matches within each mapping.
fn find_key(node: &serde_yaml::Value, key: &str) -> Option<String> {
    match node {
        serde_yaml::Value::Mapping(map) => {
            if map.keys().any(|k| k.as_str() == Some(key)) {
                return Some(key.to_string());
            }
            map.iter().find_map(|(k, child)| {
                let name = k.as_str()?;
                find_key(child, key).map(|rest| join_path(name, &rest))
            })
        }
        serde_yaml::Value::Sequence(items) => items.iter().enumerate().find_map(|(i, child)| {
            find_key(child, key).map(|rest| join_path(&format!("[{i}]"), &rest))
        }),
        _ => None,
    }
}

fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else if child.starts_with('[') {
        format!("{parent}{child}")
    } else {
        format!("{parent}.{child}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn field_of(err: SynthError) -> String {
        match err {
            SynthError::Configuration { field, .. } => field,
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_full_config_from_yaml() {
        let yaml = r#"
seed: 7
series:
  axis:
    mode: jittered
    from: 2016-01-01T00:00:00Z
    until: 2016-01-01T01:00:00Z
    count: 5
  key_name: light
  values:
    type: ratio
    weights: { rock: 1, scissors: 2, paper: 1 }
access_log:
  lines: 10
  users:
    count: 3
    type_weights: { anonymous: 1, normal: 2 }
  requests:
    - type: templates
      templates:
        - method: GET
          path: /health
          weight: 1
          status_weights: { 200: 1 }
    - type: crud
      resource: articles
      method_weights:
        GET: { weight: 5, status_weights: { 200: 99, 500: 1 } }
"#;
        let config = SynthConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.seed, Some(7));

        let series = config.series.unwrap();
        assert_eq!(series.axis.mode, AxisMode::Jittered);
        assert_eq!(series.axis.count, 5);
        assert_eq!(series.key_name, "light");
        match series.values {
            SeriesValuesConfig::Ratio { weights } => {
                assert_eq!(
                    weights.keys().collect::<Vec<_>>(),
                    vec!["rock", "scissors", "paper"]
                );
            }
            other => panic!("Expected ratio values, got {other:?}"),
        }

        let access_log = config.access_log.unwrap();
        assert_eq!(access_log.lines, 10);
        assert_eq!(access_log.requests.len(), 2);
        assert_eq!(access_log.dates, DateRangeConfig::default());
    }

    #[test]
    fn test_series_defaults() {
        let series: SeriesConfig = serde_yaml::from_str("values: { type: gaussian }").unwrap();
        assert_eq!(series.key_name, "value");
        assert_eq!(series.axis, TimeAxisConfig::default());
        assert_eq!(
            series.values,
            SeriesValuesConfig::Gaussian(GaussianOptions::default())
        );
    }

    #[test]
    fn test_axis_mode_aliases() {
        let axis: TimeAxisConfig = serde_yaml::from_str("mode: random").unwrap();
        assert_eq!(axis.mode, AxisMode::Jittered);
        let axis: TimeAxisConfig = serde_yaml::from_str("mode: monospaced").unwrap();
        assert_eq!(axis.mode, AxisMode::Fixed);
    }

    #[test]
    fn test_unknown_trig_option_names_full_path() {
        let yaml = "series:\n  values:\n    type: sin\n    amplitude: 3\n";
        match SynthConfig::from_yaml(yaml).unwrap_err() {
            SynthError::Configuration { field, constraint } => {
                assert_eq!(field, "series.values.amplitude");
                assert!(constraint.contains("amplitude"));
            }
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_ratio_option_is_rejected() {
        let yaml = r#"
series:
  values:
    type: ratio
    weights: { a: 1 }
    decimal_digits: 3
"#;
        assert_eq!(
            field_of(SynthConfig::from_yaml(yaml).unwrap_err()),
            "series.values.decimal_digits"
        );
    }

    #[test]
    fn test_unknown_templates_source_option_is_rejected() {
        let yaml = r#"
access_log:
  lines: 1
  users: { count: 1 }
  requests:
    - type: templates
      resource: users
      templates: []
"#;
        assert_eq!(
            field_of(SynthConfig::from_yaml(yaml).unwrap_err()),
            "access_log.requests[0].resource"
        );
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        assert_eq!(field_of(SynthConfig::from_yaml("sead: 7\n").unwrap_err()), "sead");
    }

    #[test]
    fn test_wrong_type_is_configuration_error() {
        let yaml = "access_log:\n  lines: many\n  users: { count: 1 }\n";
        let field = field_of(SynthConfig::from_yaml(yaml).unwrap_err());
        assert!(field.starts_with("access_log"), "unexpected field {field}");
    }

    #[test]
    fn test_malformed_yaml_is_yaml_error() {
        let result = SynthConfig::from_yaml("series: [unclosed\n");
        assert!(matches!(result, Err(SynthError::Yaml(_))));
    }

    #[test]
    fn test_trig_validation() {
        let options = TrigOptions {
            period: 0,
            ..TrigOptions::default()
        };
        assert_eq!(field_of(options.validate().unwrap_err()), "period");

        let options = TrigOptions {
            decimal_digits: 11,
            ..TrigOptions::default()
        };
        assert_eq!(field_of(options.validate().unwrap_err()), "decimal_digits");

        let options = TrigOptions {
            coefficient: f64::INFINITY,
            ..TrigOptions::default()
        };
        assert_eq!(field_of(options.validate().unwrap_err()), "coefficient");

        let options = TrigOptions {
            constant: f64::NAN,
            ..TrigOptions::default()
        };
        assert_eq!(field_of(options.validate().unwrap_err()), "constant");

        assert!(TrigOptions::default().validate().is_ok());
    }

    #[test]
    fn test_gaussian_validation() {
        let options = GaussianOptions {
            variance: -1.0,
            ..GaussianOptions::default()
        };
        assert_eq!(field_of(options.validate().unwrap_err()), "variance");

        let options = GaussianOptions {
            decimal_digits: -1,
            ..GaussianOptions::default()
        };
        assert_eq!(field_of(options.validate().unwrap_err()), "decimal_digits");
    }

    #[test]
    fn test_nested_field_path() {
        let yaml = r#"
series:
  axis: { interval: 0 }
  values: { type: sin }
"#;
        let err = SynthConfig::from_yaml(yaml).unwrap_err();
        assert_eq!(field_of(err), "series.axis.interval");

        let yaml = r#"
access_log:
  lines: 1
  users: { count: 1 }
  requests:
    - type: templates
      templates:
        - { method: GET, path: /, weight: -1, status_weights: {} }
"#;
        let err = SynthConfig::from_yaml(yaml).unwrap_err();
        assert_eq!(field_of(err), "access_log.requests[0].templates[0].weight");
    }

    #[test]
    fn test_user_type_weights_validation() {
        let config = UserPoolConfig {
            count: 2,
            type_weights: Some(WeightTable::new().with("robot", 1)),
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "type_weights.robot");

        let config = UserPoolConfig {
            count: 2,
            type_weights: Some(WeightTable::new().with("anonymous", -1)),
        };
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "type_weights.anonymous"
        );

        assert_eq!(field_of(UserPoolConfig::new(-1).validate().unwrap_err()), "count");
    }

    #[test]
    fn test_ratio_values_with_invalid_weight() {
        let yaml = r#"
series:
  values:
    type: ratio
    weights: { rock: 1, paper: "lots" }
"#;
        let err = SynthConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, SynthError::InvalidWeight { key, .. } if key == "paper"));
    }

    #[test]
    fn test_crud_method_order_is_fixed() {
        let crud: CrudResourceConfig = serde_yaml::from_str(
            r#"
resource: items
method_weights:
  DELETE: { weight: 1, status_weights: { 204: 1 } }
  GET: { weight: 1, status_weights: { 200: 1 } }
"#,
        )
        .unwrap();
        let methods: Vec<_> = crud.method_weights.iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec!["GET", "DELETE"]);
    }

    #[test]
    fn test_crud_rejects_unknown_method() {
        let result: Result<CrudResourceConfig, _> = serde_yaml::from_str(
            r#"
resource: items
method_weights:
  PATCH: { weight: 1, status_weights: { 200: 1 } }
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_users_default_table() {
        let users = CrudResourceConfig::users_default();
        assert!(users.validate().is_ok());
        let weights: Vec<_> = users
            .method_weights
            .iter()
            .map(|(m, w)| (m, w.weight))
            .collect();
        assert_eq!(
            weights,
            vec![("POST", 1), ("GET", 6), ("PUT", 2), ("DELETE", 1)]
        );
        let put = users.method_weights.put.unwrap();
        assert_eq!(put.status_weights.get("200").unwrap(), Some(194));
    }

    #[test]
    fn test_axis_window_defaults() {
        let now = Utc.with_ymd_and_hms(2017, 5, 26, 0, 0, 0).unwrap()
            + Duration::milliseconds(750);
        let (from, until) = TimeAxisConfig::default().resolve_window(now).unwrap();
        assert_eq!(until.timestamp(), 1495756800);
        assert_eq!(until.timestamp_subsec_millis(), 0);
        assert_eq!(from.timestamp(), 1495753200);
    }

    #[test]
    fn test_axis_window_rejects_inverted_bounds() {
        let axis = TimeAxisConfig {
            from: Some(InstantSpec::Unix(100)),
            until: Some(InstantSpec::Unix(99)),
            ..TimeAxisConfig::default()
        };
        let err = axis.resolve_window(Utc::now()).unwrap_err();
        assert_eq!(field_of(err), "from");
    }

    #[test]
    fn test_date_range_defaults() {
        let now = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();

        let (from, until) = DateRangeConfig::default().resolve(now).unwrap();
        assert_eq!(until, now);
        assert_eq!(from, now - Duration::hours(24));

        let past = DateRangeConfig {
            from: Some(InstantSpec::Text("2020-01-01".to_string())),
            until: None,
        };
        let (from, until) = past.resolve(now).unwrap();
        assert_eq!(from.timestamp(), 1577836800);
        assert_eq!(until, now);

        let future = DateRangeConfig {
            from: None,
            until: Some(InstantSpec::Text("2021-01-01".to_string())),
        };
        let (from, _) = future.resolve(now).unwrap();
        assert_eq!(from, now);
    }

    #[test]
    fn test_date_range_until_before_now_is_rejected() {
        let now = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();
        let config = DateRangeConfig {
            from: None,
            until: Some(InstantSpec::Text("2019-01-01".to_string())),
        };
        assert_eq!(field_of(config.resolve(now).unwrap_err()), "from");
    }

    #[test]
    fn test_negative_lines_rejected() {
        let config = AccessLogConfig {
            lines: -5,
            users: UserPoolConfig::new(1),
            requests: Vec::new(),
            dates: DateRangeConfig::default(),
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "lines");
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("synth.yaml");
        fs::write(
            &path,
            "seed: 7\nseries:\n  values:\n    type: gaussian\n    mean: 3\n",
        )
        .unwrap();

        let config = SynthConfig::from_file(&path).unwrap();
        assert_eq!(config.seed, Some(7));
        assert!(config.series.is_some());
        assert!(config.access_log.is_none());
    }

    #[test]
    fn test_from_file_missing() {
        let result = SynthConfig::from_file("/nonexistent/synth.yaml");
        assert!(matches!(result, Err(SynthError::Io(_))));
    }
}
