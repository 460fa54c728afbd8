use std::path::PathBuf;

use thiserror::Error;

use crate::participant::ParticipantId;

pub type Result<T> = std::result::Result<T, L10nError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum L10nError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("text resource '{key}' could not be found for culture '{culture}'")]
    ResourceNotFound { key: String, culture: String },

    #[error(
        "no text resource key can be derived from class '{class_name}' and property '{property_name}'"
    )]
    KeyDerivationFailed {
        class_name: String,
        property_name: String,
    },

    #[error("participant {participant} failed to localize: {message}")]
    Localize {
        participant: ParticipantId,
        message: String,
    },

    #[error("{} participant(s) failed to localize", .failures.len())]
    FanOutFailed {
        failures: Vec<(ParticipantId, L10nError)>,
    },
}

impl L10nError {
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Shorthand for the "must not be blank" argument check.
    #[must_use]
    pub fn blank(argument: &str) -> Self {
        Self::invalid(format!("'{argument}' cannot be empty or whitespace"))
    }

    #[must_use]
    pub fn localize(participant: ParticipantId, message: impl Into<String>) -> Self {
        Self::Localize {
            participant,
            message: message.into(),
        }
    }

    /// Collapse key-derivation failures into `ResourceNotFound`.
    ///
    /// At the lookup boundary a property that matches no naming convention
    /// and a key that is missing from the store are the same failure.
    #[must_use]
    pub fn into_lookup_error(self, culture: &str) -> Self {
        match self {
            Self::KeyDerivationFailed {
                class_name,
                property_name,
            } => Self::ResourceNotFound {
                key: format!("{class_name}.{property_name}"),
                culture: culture.to_string(),
            },
            other => other,
        }
    }

    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}

/// Errors raised while loading configuration or resource files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "resource-files")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "resource-files")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Localization(#[from] L10nError),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
