//! Core types shared by the resolution pipeline
//!
//! - `ResolutionRequest`: the `KGCPSecret` descriptor kustomize hands us
//! - `StoredKeyInventory`: the key names present in one project
//! - `Secret`: the Kubernetes manifest we emit

mod request;
mod inventory;
mod secret;

use std::collections::BTreeMap;

pub use request::{ResolutionRequest, RequestMeta, Scope, ValueShape};
pub use inventory::StoredKeyInventory;
pub use secret::{ObjectMeta, Secret};

/// Ordered string map, so that emitted manifests are byte-stable
pub type KvMap = BTreeMap<String, String>;
