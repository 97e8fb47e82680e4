//! In-memory secret manager

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{SecretManager, SecretStoreError, SecretStoreResult};

/// In-memory secret manager for testing and dry runs
///
/// Holds a single flat namespace of stored keys; the project argument of
/// both capabilities is ignored. Individual keys can be made to fail on
/// fetch, which lets tests exercise the resolver's error handling without
/// touching the network.
///
/// # Example
///
/// ```
/// use kgcpsecret_core::secrets::MemorySecretManager;
///
/// let store = MemorySecretManager::from_pairs([("secret1", "secret1-42")]);
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretManager {
    secrets: RwLock<HashMap<String, Vec<u8>>>,
    failures: RwLock<HashMap<String, String>>,
    fetches: AtomicUsize,
}

impl MemorySecretManager {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial values
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<[u8]>,
    {
        let store = Self::new();
        for (key, value) in pairs {
            store.insert(key, value);
        }
        store
    }

    /// Store a value under `key`, replacing any previous one
    pub fn insert(&self, key: impl Into<String>, value: impl AsRef<[u8]>) {
        self.secrets
            .write()
            .insert(key.into(), value.as_ref().to_vec());
    }

    /// Remove a key from the store
    pub fn remove(&self, key: &str) -> bool {
        self.secrets.write().remove(key).is_some()
    }

    /// Make every fetch of `key` fail with `message`
    ///
    /// The key still shows up in `list_keys` if it was inserted.
    pub fn fail_fetch(&self, key: impl Into<String>, message: impl Into<String>) {
        self.failures.write().insert(key.into(), message.into());
    }

    /// Get the number of stored keys
    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `fetch` calls served so far, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretManager for MemorySecretManager {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_keys(&self, _project: &str) -> SecretStoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.secrets.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn fetch(&self, _project: &str, key: &str) -> SecretStoreResult<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failures.read().get(key) {
            return Err(SecretStoreError::Other(message.clone()));
        }
        self.secrets
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| SecretStoreError::NotFound(key.to_string()))
    }
}
