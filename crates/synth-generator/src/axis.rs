//! Time axes: the ordered instants a series is sampled at.

use chrono::{DateTime, Utc};
use synth_core::schema::{AxisMode, TimeAxisConfig};
use synth_core::{RandomSource, SynthError};

/// Ordered instants between two bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeAxis {
    /// `from, from + interval, ...` up to and including `until`
    Fixed {
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        interval_secs: i64,
    },
    /// `count` uniform draws in `[from, until]`, sorted ascending
    Jittered {
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        count: usize,
    },
}

impl TimeAxis {
    /// Create an evenly spaced axis.
    pub fn fixed(
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        interval_secs: i64,
    ) -> Result<Self, SynthError> {
        check_bounds(&from, &until)?;
        if interval_secs < 1 {
            return Err(SynthError::config("interval", "must be >= 1"));
        }
        Ok(TimeAxis::Fixed {
            from,
            until,
            interval_secs,
        })
    }

    /// Create an axis of `count` random instants.
    pub fn jittered(
        from: DateTime<Utc>,
        until: DateTime<Utc>,
        count: i64,
    ) -> Result<Self, SynthError> {
        check_bounds(&from, &until)?;
        let count =
            usize::try_from(count).map_err(|_| SynthError::config("count", "must be >= 0"))?;
        Ok(TimeAxis::Jittered { from, until, count })
    }

    /// Build an axis from configuration, defaulting the window against `now`.
    pub fn from_config(config: &TimeAxisConfig, now: DateTime<Utc>) -> Result<Self, SynthError> {
        config.validate()?;
        let (from, until) = config.resolve_window(now)?;
        match config.mode {
            AxisMode::Fixed => Self::fixed(from, until, config.interval),
            AxisMode::Jittered => Self::jittered(from, until, config.count),
        }
    }

    pub fn from(&self) -> DateTime<Utc> {
        match self {
            TimeAxis::Fixed { from, .. } | TimeAxis::Jittered { from, .. } => *from,
        }
    }

    pub fn until(&self) -> DateTime<Utc> {
        match self {
            TimeAxis::Fixed { until, .. } | TimeAxis::Jittered { until, .. } => *until,
        }
    }

    /// Unix timestamps (seconds) of the axis, in non-decreasing order.
    ///
    /// Fixed axes do not touch `rng`.
    pub fn unix_timestamps(&self, rng: &mut RandomSource) -> Vec<i64> {
        let from = self.from().timestamp();
        let until = self.until().timestamp();

        match self {
            TimeAxis::Fixed { interval_secs, .. } => {
                (from..=until).step_by(*interval_secs as usize).collect()
            }
            TimeAxis::Jittered { count, .. } => {
                let mut timestamps: Vec<i64> = (0..*count)
                    .filter_map(|_| rng.random_int(from, until))
                    .collect();
                timestamps.sort();
                timestamps
            }
        }
    }
}

fn check_bounds(from: &DateTime<Utc>, until: &DateTime<Utc>) -> Result<(), SynthError> {
    if from > until {
        return Err(SynthError::config("from", "must not be after `until`"));
    }
    Ok(())
}
