//! The `KGCPSecret` descriptor and the scope derived from it

use serde::{Deserialize, Serialize};

use super::KvMap;

/// How a resolved value is turned into `data` entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueShape {
    /// One entry named after the logical key
    #[default]
    Plain,
    /// The value is a KEY=VALUE block; one entry per assignment
    EnvBlock,
}

impl ValueShape {
    /// Map a descriptor `dataType` onto a shape
    ///
    /// Only the exact string `envvar` selects block decoding; anything else,
    /// including an empty string or a different spelling, is a plain value.
    pub fn from_data_type(s: &str) -> Self {
        match s {
            "envvar" => ValueShape::EnvBlock,
            _ => ValueShape::Plain,
        }
    }
}

/// Descriptor metadata: the Secret's identity plus the scope qualifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "KvMap::is_empty")]
    pub labels: KvMap,
    #[serde(default, skip_serializing_if = "KvMap::is_empty")]
    pub annotations: KvMap,
    /// Deployment stage, e.g. `pp` or `prod`
    #[serde(default)]
    pub stage: String,
    /// Datacenter/region tag, e.g. `be-gcw1`
    #[serde(default)]
    pub dc: String,
    /// Overrides `stage` when set
    #[serde(default)]
    pub environment: String,
    /// Overrides `dc` when set
    #[serde(default)]
    pub tag: String,
}

/// A `KGCPSecret` resource: which keys to resolve and how to shape the result
///
/// # Example
///
/// ```yaml
/// apiVersion: metro.digital/v1
/// kind: KGCPSecret
/// metadata:
///   name: my-secret
///   namespace: my-namespace
///   stage: pp
///   dc: be-gcw1
/// gcpProjectID: my-project
/// keys:
///   - DB_PASSWORD
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRequest {
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: RequestMeta,
    /// Project scope all keys are listed and fetched from
    #[serde(rename = "gcpProjectID", default)]
    pub gcp_project_id: String,
    #[serde(rename = "disableNameSuffixHash", default)]
    pub disable_name_suffix_hash: bool,
    /// Kubernetes Secret `type`, copied through
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub secret_type: String,
    /// kustomize merge behavior (`create`, `replace`, `merge`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub behavior: String,
    /// Logical keys, resolved in order
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(rename = "dataType", default, skip_serializing_if = "String::is_empty")]
    pub data_type: String,
}

impl ResolutionRequest {
    /// Create a request for the named Secret in the given project
    pub fn new(name: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            metadata: RequestMeta {
                name: name.into(),
                ..Default::default()
            },
            gcp_project_id: project.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metadata.namespace = namespace.into();
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.metadata.stage = stage.into();
        self
    }

    pub fn with_dc(mut self, dc: impl Into<String>) -> Self {
        self.metadata.dc = dc.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.metadata.environment = environment.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.metadata.tag = tag.into();
        self
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_shape(mut self, shape: ValueShape) -> Self {
        self.data_type = match shape {
            ValueShape::Plain => String::new(),
            ValueShape::EnvBlock => "envvar".to_string(),
        };
        self
    }

    pub fn with_disable_name_suffix_hash(mut self, disable: bool) -> Self {
        self.disable_name_suffix_hash = disable;
        self
    }

    pub fn with_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.behavior = behavior.into();
        self
    }

    /// Value shape selected by `dataType`
    pub fn value_shape(&self) -> ValueShape {
        ValueShape::from_data_type(&self.data_type)
    }

    /// Scope qualifiers with the environment/tag overrides applied
    pub fn scope(&self) -> Scope<'_> {
        let meta = &self.metadata;
        Scope {
            name: &meta.name,
            namespace: &meta.namespace,
            stage: if meta.environment.is_empty() { &meta.stage } else { &meta.environment },
            tag: if meta.tag.is_empty() { &meta.dc } else { &meta.tag },
        }
    }
}

/// The qualifiers a stored key name may carry
///
/// `stage` and `tag` are already the effective values: `environment` and
/// `tag` from the descriptor win over `stage` and `dc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    pub stage: &'a str,
    pub tag: &'a str,
}
