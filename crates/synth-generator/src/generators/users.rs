//! Fixed population of synthetic users.

use super::strings::StringSource;
use serde::Serialize;
use std::fmt;
use synth_core::schema::UserPoolConfig;
use synth_core::{RandomSource, RatioSampler, SynthError};
use tracing::debug;

/// Email of anonymous users.
pub const ANONYMOUS_EMAIL: &str = "-";

/// Kind of user drawn at pool construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    Anonymous,
    Normal,
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserKind::Anonymous => f.write_str("anonymous"),
            UserKind::Normal => f.write_str("normal"),
        }
    }
}

/// A user of the pool. Anonymous users have email `-` and no uuid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticUser {
    pub email: String,
    pub uuid: Option<String>,
    pub user_agent: String,
    pub ip_address: String,
}

impl SyntheticUser {
    pub fn is_anonymous(&self) -> bool {
        self.uuid.is_none()
    }
}

/// Users built once at construction and reused on every draw.
#[derive(Debug, Clone)]
pub struct UserPool {
    users: Vec<SyntheticUser>,
}

impl UserPool {
    /// Build `config.count` users, drawing each user's kind independently.
    pub fn new<S: StringSource>(
        config: &UserPoolConfig,
        rng: &mut RandomSource,
        strings: &S,
    ) -> Result<Self, SynthError> {
        config.validate()?;
        let kinds = match &config.type_weights {
            Some(table) => RatioSampler::new(table.weights()?.into_iter().map(|(key, weight)| {
                let kind = if key == "anonymous" {
                    UserKind::Anonymous
                } else {
                    UserKind::Normal
                };
                (kind, weight)
            }))?,
            None => RatioSampler::empty(),
        };

        let users: Vec<SyntheticUser> = (0..config.count)
            .map(|_| {
                let kind = kinds.draw(rng).copied().unwrap_or(UserKind::Normal);
                let (email, uuid) = match kind {
                    UserKind::Anonymous => (ANONYMOUS_EMAIL.to_string(), None),
                    UserKind::Normal => (strings.email(rng), Some(strings.uuid(rng))),
                };
                SyntheticUser {
                    email,
                    uuid,
                    user_agent: strings.user_agent(rng),
                    ip_address: strings.ip(rng),
                }
            })
            .collect();

        debug!(
            "Built user pool: {} users ({} anonymous)",
            users.len(),
            users.iter().filter(|u| u.is_anonymous()).count()
        );

        Ok(Self { users })
    }

    /// A uniformly chosen user, or `None` for an empty pool.
    pub fn draw(&self, rng: &mut RandomSource) -> Option<&SyntheticUser> {
        let idx = rng.random_index(self.users.len())?;
        self.users.get(idx)
    }

    /// Every user, in construction order.
    pub fn all(&self) -> &[SyntheticUser] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
