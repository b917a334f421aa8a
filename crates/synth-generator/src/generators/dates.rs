//! Uniformly drawn dates between two bounds.

use super::strings::StringSource;
use chrono::{DateTime, Utc};
use synth_core::schema::DateRangeConfig;
use synth_core::{RandomSource, SynthError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bounds {
    /// The day before `now`
    Recent { now: DateTime<Utc> },
    Between {
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    },
}

/// Date generator. Defaulted bounds are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    bounds: Bounds,
}

impl DateRange {
    /// Dates in `[from, until]`.
    pub fn between(from: DateTime<Utc>, until: DateTime<Utc>) -> Result<Self, SynthError> {
        if from > until {
            return Err(SynthError::config("from", "must not be after `until`"));
        }
        Ok(Self {
            bounds: Bounds::Between { from, until },
        })
    }

    /// Dates in the day before `now`.
    pub fn recent(now: DateTime<Utc>) -> Self {
        Self {
            bounds: Bounds::Recent { now },
        }
    }

    /// Build from configuration; missing bounds default against `now`.
    pub fn from_config(config: &DateRangeConfig, now: DateTime<Utc>) -> Result<Self, SynthError> {
        match (&config.from, &config.until) {
            (None, None) => Ok(Self::recent(now)),
            _ => {
                let (from, until) = config.resolve(now)?;
                Self::between(from, until)
            }
        }
    }

    pub fn draw<S: StringSource>(&self, rng: &mut RandomSource, strings: &S) -> DateTime<Utc> {
        match self.bounds {
            Bounds::Recent { now } => strings.recent_date(rng, now),
            Bounds::Between { from, until } => strings.date_between(rng, from, until),
        }
    }
}
