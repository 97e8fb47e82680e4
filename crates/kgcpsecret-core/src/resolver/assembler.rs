//! Whole-request resolution into a Kubernetes Secret

use std::sync::Arc;

use crate::error::Result;
use crate::logging::{NoOpLogger, SharedLogger};
use crate::secrets::SecretManager;
use crate::types::{KvMap, ObjectMeta, ResolutionRequest, Secret, StoredKeyInventory};
use crate::{log_debug, log_info};

use super::transformer::transform;
use super::value_resolver::resolve_value;

/// Tells kustomize to append a content hash to the Secret name
pub const NEEDS_HASH_ANNOTATION: &str = "kustomize.config.k8s.io/needs-hash";

/// Carries the kustomize merge behavior of the generated Secret
pub const BEHAVIOR_ANNOTATION: &str = "kustomize.config.k8s.io/behavior";

/// Annotations for the generated Secret
///
/// User annotations are copied first; the policy annotations are written
/// after them and therefore replace same-named user entries.
pub fn annotations_for(request: &ResolutionRequest) -> KvMap {
    let mut annotations = request.metadata.annotations.clone();
    if !request.disable_name_suffix_hash {
        annotations.insert(NEEDS_HASH_ANNOTATION.to_string(), "true".to_string());
    }
    if !request.behavior.is_empty() {
        annotations.insert(BEHAVIOR_ANNOTATION.to_string(), request.behavior.clone());
    }
    annotations
}

/// Resolves every key of a request and assembles the Secret
///
/// Each run lists the project once, then resolves keys strictly in request
/// order. The first key that fails aborts the run; nothing partial is
/// returned.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use kgcpsecret_core::{MemorySecretManager, ResolutionRequest, SecretAssembler};
///
/// # tokio_test_block_on(async {
/// let store = Arc::new(MemorySecretManager::from_pairs([("my-secret_TOKEN", "abc")]));
/// let request = ResolutionRequest::new("my-secret", "my-project").with_keys(["TOKEN"]);
///
/// let secret = SecretAssembler::new(store).assemble(&request).await.unwrap();
/// assert_eq!(secret.data["TOKEN"], "YWJj");
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub struct SecretAssembler {
    manager: Arc<dyn SecretManager>,
    logger: SharedLogger,
}

impl SecretAssembler {
    /// Create an assembler that reads from `manager`
    pub fn new(manager: Arc<dyn SecretManager>) -> Self {
        Self {
            manager,
            logger: Arc::new(NoOpLogger),
        }
    }

    /// Route resolver diagnostics to `logger`
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// List the request's project and assemble the Secret
    pub async fn assemble(&self, request: &ResolutionRequest) -> Result<Secret> {
        let project = &request.gcp_project_id;
        let inventory: StoredKeyInventory = self.manager.list_keys(project).await?.into_iter().collect();
        log_debug!(
            self.logger,
            "{} lists {} keys in project '{}'",
            self.manager.name(),
            inventory.len(),
            project
        );
        self.assemble_with_inventory(request, &inventory).await
    }

    /// Assemble the Secret against an inventory captured earlier
    pub async fn assemble_with_inventory(
        &self,
        request: &ResolutionRequest,
        inventory: &StoredKeyInventory,
    ) -> Result<Secret> {
        let scope = request.scope();
        let shape = request.value_shape();
        let mut data = KvMap::new();

        for key in &request.keys {
            let raw = resolve_value(
                key,
                &scope,
                &request.gcp_project_id,
                inventory,
                self.manager.as_ref(),
                self.logger.as_ref(),
            )
            .await?;
            data.extend(transform(key, &raw, shape)?);
        }

        log_info!(
            self.logger,
            "resolved {} keys into {} entries for secret '{}'",
            request.keys.len(),
            data.len(),
            request.metadata.name
        );

        let mut secret = Secret::new(ObjectMeta {
            name: request.metadata.name.clone(),
            namespace: request.metadata.namespace.clone(),
            labels: request.metadata.labels.clone(),
            annotations: annotations_for(request),
        });
        secret.data = data;
        secret.secret_type = request.secret_type.clone();
        Ok(secret)
    }
}

impl std::fmt::Debug for SecretAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretAssembler")
            .field("manager", &self.manager.name())
            .finish()
    }
}
