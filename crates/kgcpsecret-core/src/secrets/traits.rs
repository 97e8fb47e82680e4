//! Core trait and errors for secret managers

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to a secret manager
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("trouble retrieving secret: {resource}: {status} {message}")]
    Api {
        resource: String,
        status: u16,
        message: String,
    },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("trouble retrieving secret: {resource}: {source}")]
    Transport {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Store error: {0}")]
    Other(String),
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// The two store capabilities a resolution run consumes
///
/// Implementations:
/// - Google Secret Manager (`GcpSecretManager`)
/// - In-memory for testing (`MemorySecretManager`)
///
/// Both calls take the project scope explicitly so a single manager can
/// serve descriptors that point at different projects.
///
/// # Example
///
/// ```
/// use kgcpsecret_core::secrets::{SecretManager, MemorySecretManager};
///
/// let store = MemorySecretManager::new();
/// store.insert("DB_PASSWORD", "hunter2");
/// assert_eq!(store.name(), "memory");
/// ```
#[async_trait]
pub trait SecretManager: Send + Sync {
    /// Human-readable name of this manager
    fn name(&self) -> &str;

    /// List every stored key name in the project
    async fn list_keys(&self, project: &str) -> SecretStoreResult<Vec<String>>;

    /// Fetch the latest raw value stored under `key`
    ///
    /// Implementations talking to a remote store must sanitize `key` (see
    /// [`sanitize_key_name`](super::sanitize_key_name)) before using it.
    async fn fetch(&self, project: &str, key: &str) -> SecretStoreResult<Vec<u8>>;
}
