//! Error types shared by the synth-data crates.

use thiserror::Error;

/// Error type for configuration and construction.
///
/// Drawing operations never return this type: degenerate inputs resolve to a
/// sentinel value instead.
#[derive(Error, Debug)]
pub enum SynthError {
    /// A configuration field violates its constraint.
    #[error("Invalid configuration: `{field}` {constraint}")]
    Configuration { field: String, constraint: String },

    /// A weight table entry is present but unusable.
    #[error("Invalid weight for key `{key}`: {reason}")]
    InvalidWeight { key: String, reason: String },

    /// A call-time argument has the wrong shape.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Error reading a configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Error parsing JSON
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SynthError {
    /// Build a [`SynthError::Configuration`] for `field`.
    pub fn config(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Build a [`SynthError::InvalidWeight`] for `key`.
    pub fn weight(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidWeight {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Prefix the field path of a configuration error with `parent`.
    ///
    /// Other variants pass through untouched.
    pub fn within(self, parent: &str) -> Self {
        match self {
            Self::Configuration { field, constraint } => Self::Configuration {
                field: format!("{parent}.{field}"),
                constraint,
            },
            other => other,
        }
    }
}
