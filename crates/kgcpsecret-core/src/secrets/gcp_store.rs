//! Google Secret Manager backed store
//!
//! Talks to the Secret Manager v1 REST API:
//! - `GET /v1/projects/{project}/secrets` (paged) to list key names
//! - `GET /v1/projects/{project}/secrets/{key}/versions/latest:access` to fetch a value

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::traits::{SecretManager, SecretStoreError, SecretStoreResult};
use crate::config::StoreSettings;

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

const PAGE_SIZE: u32 = 250;

/// Make a key name acceptable to Secret Manager
///
/// Secret IDs may not contain `.` or `/`; both are stored as `_`.
pub fn sanitize_key_name(name: &str) -> String {
    name.replace(['.', '/'], "_")
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListSecretsResponse {
    #[serde(default)]
    secrets: Vec<SecretResource>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct SecretResource {
    name: String,
}

#[derive(Deserialize)]
struct AccessSecretVersionResponse {
    #[serde(default)]
    payload: Option<SecretPayload>,
}

#[derive(Deserialize)]
struct SecretPayload {
    #[serde(default)]
    data: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Secret manager backed by Google Secret Manager
///
/// Authenticates with the token from `GOOGLE_OAUTH_ACCESS_TOKEN` when set,
/// otherwise with the default service account of the GCE/GKE metadata
/// server. The metadata token is fetched once and reused for the lifetime
/// of the manager, which is one plugin invocation.
///
/// # Example
///
/// ```no_run
/// use kgcpsecret_core::secrets::GcpSecretManager;
///
/// let manager = GcpSecretManager::from_env();
/// ```
pub struct GcpSecretManager {
    client: reqwest::Client,
    settings: StoreSettings,
    cached_token: Mutex<Option<String>>,
}

impl GcpSecretManager {
    /// Create a manager with explicit settings
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
            cached_token: Mutex::new(None),
        }
    }

    /// Create a manager configured from the process environment
    pub fn from_env() -> Self {
        Self::new(StoreSettings::from_env())
    }

    /// Get the API base URL in use
    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }

    async fn access_token(&self) -> SecretStoreResult<String> {
        if let Some(token) = &self.settings.access_token {
            return Ok(token.clone());
        }
        if let Some(token) = self.cached_token.lock().clone() {
            return Ok(token);
        }

        let response = self
            .client
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| SecretStoreError::Auth(format!("metadata server unreachable: {}", e)))?;
        if !response.status().is_success() {
            return Err(SecretStoreError::Auth(format!(
                "metadata server returned {}",
                response.status()
            )));
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SecretStoreError::Auth(format!("invalid token response: {}", e)))?;

        *self.cached_token.lock() = Some(token.access_token.clone());
        Ok(token.access_token)
    }

    async fn send(
        request: reqwest::RequestBuilder,
        resource: &str,
    ) -> SecretStoreResult<reqwest::Response> {
        request.send().await.map_err(|source| SecretStoreError::Transport {
            resource: resource.to_string(),
            source,
        })
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        resource: &str,
    ) -> SecretStoreResult<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SecretStoreError::Api {
                resource: resource.to_string(),
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| SecretStoreError::InvalidResponse(format!("{}: {}", resource, e)))
    }
}

impl std::fmt::Debug for GcpSecretManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcpSecretManager")
            .field("endpoint", &self.settings.endpoint)
            .field("static_token", &self.settings.access_token.is_some())
            .finish()
    }
}

#[async_trait]
impl SecretManager for GcpSecretManager {
    fn name(&self) -> &str {
        "gcp"
    }

    async fn list_keys(&self, project: &str) -> SecretStoreResult<Vec<String>> {
        let token = self.access_token().await?;
        let parent = format!("projects/{}", project);
        let url = format!("{}/v1/{}/secrets", self.settings.endpoint, parent);

        let mut keys = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self
                .client
                .get(&url)
                .bearer_auth(&token)
                .query(&[("pageSize", PAGE_SIZE.to_string())]);
            if let Some(page) = &page_token {
                request = request.query(&[("pageToken", page)]);
            }

            let response = Self::send(request, &parent).await?;
            let page: ListSecretsResponse = Self::read_json(response, &parent).await?;
            keys.extend(
                page.secrets
                    .into_iter()
                    .filter_map(|s| s.name.rsplit('/').next().map(str::to_string)),
            );

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }
        Ok(keys)
    }

    async fn fetch(&self, project: &str, key: &str) -> SecretStoreResult<Vec<u8>> {
        let token = self.access_token().await?;
        let resource = format!(
            "projects/{}/secrets/{}/versions/latest",
            project,
            sanitize_key_name(key)
        );
        let url = format!("{}/v1/{}:access", self.settings.endpoint, resource);

        let response = Self::send(self.client.get(&url).bearer_auth(&token), &resource).await?;
        let version: AccessSecretVersionResponse = Self::read_json(response, &resource).await?;

        let data = version
            .payload
            .and_then(|p| p.data)
            .unwrap_or_default();
        STANDARD
            .decode(data.as_bytes())
            .map_err(|e| SecretStoreError::InvalidResponse(format!("{}: bad payload: {}", resource, e)))
    }
}
