//! The Kubernetes Secret emitted for kustomize

use serde::{Deserialize, Serialize};

use super::KvMap;

/// Kubernetes object metadata, limited to what a generated Secret carries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "KvMap::is_empty")]
    pub labels: KvMap,
    #[serde(default, skip_serializing_if = "KvMap::is_empty")]
    pub annotations: KvMap,
}

/// A `v1/Secret` with base64-encoded `data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub data: KvMap,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub secret_type: String,
}

impl Secret {
    pub const API_VERSION: &'static str = "v1";
    pub const KIND: &'static str = "Secret";

    /// Create an empty Secret with the fixed type header
    pub fn new(metadata: ObjectMeta) -> Self {
        Self {
            api_version: Self::API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata,
            data: KvMap::new(),
            secret_type: String::new(),
        }
    }
}
