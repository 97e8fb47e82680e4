//! Environment-driven settings

/// Log filter for the `KGCPSecret` binary (tracing `EnvFilter` syntax)
pub const LOG_ENV: &str = "KGCPSECRET_LOG";

/// Overrides the Secret Manager API base URL (emulators, tests)
pub const ENDPOINT_ENV: &str = "KGCPSECRET_GCP_ENDPOINT";

/// OAuth2 access token used instead of the metadata server
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

pub const DEFAULT_ENDPOINT: &str = "https://secretmanager.googleapis.com";

/// Where and how to reach Secret Manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// API base URL, without a trailing slash
    pub endpoint: String,
    /// Static bearer token; when unset, one is requested from the metadata server
    pub access_token: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
        }
    }
}

impl StoreSettings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            endpoint: non_empty(ENDPOINT_ENV)
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            access_token: non_empty(ACCESS_TOKEN_ENV),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = StoreSettings::from_lookup(lookup(&[]));
        assert_eq!(settings, StoreSettings::default());
        assert_eq!(settings.endpoint, "https://secretmanager.googleapis.com");
        assert!(settings.access_token.is_none());
    }

    #[test]
    fn test_overrides() {
        let settings = StoreSettings::from_lookup(lookup(&[
            (ENDPOINT_ENV, "http://localhost:8085/"),
            (ACCESS_TOKEN_ENV, "ya29.token"),
        ]));
        assert_eq!(settings.endpoint, "http://localhost:8085");
        assert_eq!(settings.access_token.as_deref(), Some("ya29.token"));
    }

    #[test]
    fn test_blank_values_ignored() {
        let settings = StoreSettings::from_lookup(lookup(&[
            (ENDPOINT_ENV, " "),
            (ACCESS_TOKEN_ENV, ""),
        ]));
        assert_eq!(settings, StoreSettings::default());
    }
}
