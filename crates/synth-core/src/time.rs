//! Instant parsing and formatting.

use crate::error::SynthError;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// An instant as written in configuration: unix seconds or a date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstantSpec {
    /// Seconds since the unix epoch
    Unix(i64),
    /// RFC 3339 timestamp or `YYYY-MM-DD` date
    Text(String),
}

impl InstantSpec {
    /// Resolve to a UTC instant, naming `field` on failure.
    pub fn resolve(&self, field: &str) -> Result<DateTime<Utc>, SynthError> {
        let resolved = match self {
            InstantSpec::Unix(secs) => DateTime::from_timestamp(*secs, 0).ok_or_else(|| {
                SynthError::InvalidArgument {
                    name: field.to_string(),
                    reason: format!("unix seconds {secs} out of range"),
                }
            }),
            InstantSpec::Text(text) => parse_instant(field, text),
        };
        resolved.map_err(|e| match e {
            SynthError::InvalidArgument { reason, .. } => SynthError::config(field, reason),
            other => other,
        })
    }
}

impl From<DateTime<Utc>> for InstantSpec {
    fn from(dt: DateTime<Utc>) -> Self {
        InstantSpec::Text(dt.to_rfc3339())
    }
}

/// Parse an instant in RFC 3339 or `YYYY-MM-DD` form.
pub fn parse_instant(name: &str, s: &str) -> Result<DateTime<Utc>, SynthError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }

    Err(SynthError::InvalidArgument {
        name: name.to_string(),
        reason: format!("expected an RFC 3339 timestamp or YYYY-MM-DD date, got {s:?}"),
    })
}

/// Format an instant as ISO-8601 UTC with millisecond precision.
///
/// Strings produced here sort in chronological order.
pub fn format_instant(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
