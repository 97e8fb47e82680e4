//! KGCPSecret Core
//!
//! Resolves logical secret names against Google Secret Manager and assembles
//! the results into a Kubernetes `Secret` manifest. This crate holds all of
//! the decision logic; the `KGCPSecret` binary is a thin kustomize exec-plugin
//! wrapper around it.
//!
//! ## Resolution
//!
//! Every logical key is looked up under up to sixteen qualified names, built
//! from the owner namespace/name (prefixes) and the stage/datacenter tag
//! (postfixes). The most specific stored name wins:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kgcpsecret_core::{SecretAssembler, GcpSecretManager, load_descriptor};
//!
//! let request = load_descriptor("secret.yaml")?;
//! let assembler = SecretAssembler::new(Arc::new(GcpSecretManager::from_env()));
//! let secret = assembler.assemble(&request).await?;
//! print!("{}", kgcpsecret_core::render(&secret, Default::default())?);
//! ```

pub mod types;
pub mod secrets;
pub mod logging;
pub mod config;
pub mod resolver;
pub mod output;
mod error;

pub use error::{Error, Result};

pub use types::{
    KvMap, ObjectMeta, ResolutionRequest, RequestMeta, Scope, Secret, StoredKeyInventory,
    ValueShape,
};

pub use secrets::{
    sanitize_key_name, GcpSecretManager, MemorySecretManager, SecretManager, SecretStoreError,
    SecretStoreResult,
};

pub use logging::{Logger, NoOpLogger, SharedLogger, TracingLogger};

pub use config::{load_descriptor, parse_descriptor, ConfigError, ConfigResult, StoreSettings};

pub use resolver::{
    annotations_for, candidates, encode_value, parse_env_block, resolve_value, transform,
    Candidates, EnvBlockError, SecretAssembler,
};

pub use output::{render, OutputFormat};
