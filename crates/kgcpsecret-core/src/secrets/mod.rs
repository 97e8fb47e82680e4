//! Secret manager abstractions and implementations
//!
//! This module provides the two capabilities the resolver needs from a
//! remote key-value store:
//! - `SecretManager` trait: list the key names of a project, fetch one value
//! - `GcpSecretManager`: Google Secret Manager over its REST API
//! - `MemorySecretManager`: in-memory store for tests and dry runs

mod traits;
mod memory_store;
mod gcp_store;

pub use traits::{SecretManager, SecretStoreError, SecretStoreResult};
pub use memory_store::MemorySecretManager;
pub use gcp_store::{sanitize_key_name, GcpSecretManager};
