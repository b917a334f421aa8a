//! Access-log generation.
//!
//! Every line combines independent draws, in this order:
//!
//! ```text
//! UserPool ──► user
//! sources  ──► request generator (uniform weight 1 each)
//! DateRange ─► timestamp
//! generator ─► {method, path, status}   (id = user uuid for `users`)
//! ```
//!
//! Lines are sorted by timestamp once all of them are generated.

use crate::generators::{
    CrudRequestGenerator, DateRange, Request, RequestGenerator, StringSource, SyntheticStrings,
    UserPool, ANONYMOUS_EMAIL,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use synth_core::schema::{AccessLogConfig, CrudResourceConfig, RequestSourceConfig};
use synth_core::{format_instant, RandomSource, RatioSampler, SynthError};
use tracing::debug;

/// Resource whose request ids come from the drawn user.
pub const USERS_RESOURCE: &str = "users";

/// One access-log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub user: String,
    pub timestamp: String,
    pub method: String,
    pub path: String,
    pub status: String,
}

/// A request generator the engine can select.
#[derive(Debug, Clone)]
pub enum RequestSource {
    Templates(RequestGenerator),
    Crud(CrudRequestGenerator),
}

impl RequestSource {
    pub fn from_config(config: &RequestSourceConfig) -> Result<Self, SynthError> {
        match config {
            RequestSourceConfig::Templates { templates } => {
                Ok(RequestSource::Templates(RequestGenerator::new(templates)?))
            }
            RequestSourceConfig::Crud(crud) => {
                Ok(RequestSource::Crud(CrudRequestGenerator::new(crud)?))
            }
        }
    }

    /// Resource name for CRUD sources.
    pub fn resource(&self) -> Option<&str> {
        match self {
            RequestSource::Templates(_) => None,
            RequestSource::Crud(crud) => Some(crud.resource()),
        }
    }

    /// Whether `request` could have come from this source.
    #[cfg(test)]
    fn produces(&self, request: &Request) -> bool {
        if request.is_nothing() {
            return true;
        }
        match self {
            RequestSource::Templates(generator) => generator
                .shapes()
                .any(|(method, path)| method == request.method && path == request.path),
            RequestSource::Crud(crud) => crud.shapes().any(|(method, prefix)| {
                method == request.method
                    && (request.path == prefix
                        || request
                            .path
                            .strip_prefix(prefix)
                            .is_some_and(|rest| rest.starts_with('/')))
            }),
        }
    }
}

/// Composes users, request generators and dates into sorted log entries.
pub struct AccessLogEngine<S: StringSource = SyntheticStrings> {
    lines: usize,
    users: UserPool,
    sources: Vec<RequestSource>,
    selector: RatioSampler<usize>,
    dates: DateRange,
    strings: S,
}

impl<S: StringSource> AccessLogEngine<S> {
    /// Assemble an engine from built parts.
    ///
    /// A `users` CRUD source with the stock ratio table is appended when no
    /// source serves the `users` resource.
    pub fn new(
        lines: usize,
        users: UserPool,
        mut sources: Vec<RequestSource>,
        dates: DateRange,
        strings: S,
    ) -> Result<Self, SynthError> {
        if !sources
            .iter()
            .any(|s| s.resource() == Some(USERS_RESOURCE))
        {
            let users_crud = CrudRequestGenerator::new(&CrudResourceConfig::users_default())?;
            sources.push(RequestSource::Crud(users_crud));
        }

        let selector = RatioSampler::new((0..sources.len()).map(|idx| (idx, Some(1))))?;

        Ok(Self {
            lines,
            users,
            sources,
            selector,
            dates,
            strings,
        })
    }

    /// Build every part from `config`. The user pool is drawn from `rng`
    /// immediately; date defaults are resolved against `now`.
    pub fn from_config(
        config: &AccessLogConfig,
        rng: &mut RandomSource,
        now: DateTime<Utc>,
        strings: S,
    ) -> Result<Self, SynthError> {
        config.validate()?;
        let lines = usize::try_from(config.lines)
            .map_err(|_| SynthError::config("lines", "must be >= 0"))?;
        let users = UserPool::new(&config.users, rng, &strings).map_err(|e| e.within("users"))?;
        let sources = config
            .requests
            .iter()
            .enumerate()
            .map(|(i, source)| {
                RequestSource::from_config(source).map_err(|e| e.within(&format!("requests[{i}]")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let dates = DateRange::from_config(&config.dates, now).map_err(|e| e.within("dates"))?;

        Self::new(lines, users, sources, dates, strings)
    }

    pub fn users(&self) -> &UserPool {
        &self.users
    }

    pub fn sources(&self) -> &[RequestSource] {
        &self.sources
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Generate the configured number of entries, sorted by timestamp.
    pub fn generate(&self, rng: &mut RandomSource) -> Vec<LogEntry> {
        let mut entries: Vec<LogEntry> = (0..self.lines).map(|_| self.next_entry(rng)).collect();
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        debug!(
            "Generated {} access log entries from {} request sources",
            entries.len(),
            self.sources.len()
        );
        entries
    }

    fn next_entry(&self, rng: &mut RandomSource) -> LogEntry {
        let user = self.users.draw(rng);
        let source = self
            .selector
            .draw(rng)
            .and_then(|&idx| self.sources.get(idx));
        let date = self.dates.draw(rng, &self.strings);

        let request = match source {
            Some(RequestSource::Templates(generator)) => generator.draw(rng),
            Some(RequestSource::Crud(crud)) => {
                let user_uuid = user.and_then(|u| u.uuid.clone());
                // Anonymous users have no uuid to address themselves with
                let id = match user_uuid {
                    Some(uuid) if crud.resource() == USERS_RESOURCE => uuid,
                    _ => self.strings.uuid(rng),
                };
                crud.draw(rng, &id)
            }
            None => Request::nothing(),
        };

        LogEntry {
            user: user
                .map(|u| u.email.clone())
                .unwrap_or_else(|| ANONYMOUS_EMAIL.to_string()),
            timestamp: format_instant(&date),
            method: request.method,
            path: request.path,
            status: request.status,
        }
    }
}
