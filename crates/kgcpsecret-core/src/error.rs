//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::secrets::SecretStoreError;

/// Errors that abort a resolution run
///
/// A run surfaces exactly one of these; no partial `Secret` is ever returned
/// alongside an error.
#[derive(Error, Debug)]
pub enum Error {
    /// The descriptor could not be loaded or is missing required fields
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No qualified name for a logical key produced a non-empty value
    ///
    /// `detail` carries the last fetch failure seen for the key, or a plain
    /// "was not found" message when nothing was fetched or every fetch came
    /// back empty.
    #[error("error getting '{key}' secret in Google project '{project}'. {detail}")]
    NotFound {
        key: String,
        project: String,
        detail: String,
    },

    /// An `envvar` value was not a valid KEY=VALUE block
    #[error("error unmarshalling secret {key:?}: {message}")]
    Parse { key: String, message: String },

    /// The store could not be listed
    #[error(transparent)]
    Store(#[from] SecretStoreError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a not-found error for a logical key
    pub fn not_found(
        key: impl Into<String>,
        project: impl Into<String>,
        last_error: Option<&SecretStoreError>,
    ) -> Self {
        let key = key.into();
        let detail = match last_error {
            Some(err) => err.to_string(),
            None => format!("key '{}' was not found", key),
        };
        Self::NotFound {
            key,
            project: project.into(),
            detail,
        }
    }

    /// Create a parse error for an `envvar` value
    pub fn parse(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            key: key.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
