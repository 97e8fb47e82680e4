//! Best-fitting value lookup for one logical key

use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::secrets::{SecretManager, SecretStoreError};
use crate::types::{Scope, StoredKeyInventory};
use crate::{log_debug, log_warn};

use super::key_matcher::candidates;

/// Resolve `key` to the value of its most specific stored candidate
///
/// Candidates are tried in order. Only names present in `inventory` are
/// fetched, and the first fetch that succeeds with a non-empty value wins.
/// A failed fetch is remembered and the scan goes on; if nothing wins, the
/// last failure becomes the detail of the returned [`Error::NotFound`].
pub async fn resolve_value(
    key: &str,
    scope: &Scope<'_>,
    project: &str,
    inventory: &StoredKeyInventory,
    manager: &dyn SecretManager,
    logger: &dyn Logger,
) -> Result<Vec<u8>> {
    let mut last_error: Option<SecretStoreError> = None;

    for candidate in candidates(key, scope) {
        if !inventory.contains(&candidate) {
            continue;
        }
        match manager.fetch(project, &candidate).await {
            Ok(value) if !value.is_empty() => {
                log_debug!(logger, "'{}' resolved from '{}'", key, candidate);
                return Ok(value);
            }
            Ok(_) => log_debug!(logger, "'{}' is empty, trying next candidate", candidate),
            Err(err) => {
                log_warn!(logger, "fetching '{}' from {} failed: {}", candidate, manager.name(), err);
                last_error = Some(err);
            }
        }
    }

    Err(Error::not_found(key, project, last_error.as_ref()))
}
