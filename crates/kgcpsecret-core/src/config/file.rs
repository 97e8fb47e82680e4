//! Descriptor loading (YAML)

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::ResolutionRequest;

/// Errors that can occur while loading a descriptor
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse descriptor: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("input must contain metadata.name value")]
    MissingName,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Read and validate a `KGCPSecret` descriptor from disk
pub fn load_descriptor(path: impl AsRef<Path>) -> ConfigResult<ResolutionRequest> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_descriptor(&content)
}

/// Parse and validate a `KGCPSecret` descriptor
///
/// `metadata.name` is the only required field; a descriptor without it is
/// rejected before any store is contacted.
pub fn parse_descriptor(content: &str) -> ConfigResult<ResolutionRequest> {
    let request: ResolutionRequest = serde_yaml::from_str(content)?;
    if request.metadata.name.trim().is_empty() {
        return Err(ConfigError::MissingName);
    }
    Ok(request)
}
