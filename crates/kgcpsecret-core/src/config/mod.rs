//! Configuration sources
//!
//! - `load_descriptor` / `parse_descriptor`: the `KGCPSecret` YAML file
//! - `StoreSettings`: Secret Manager endpoint and credentials from the environment

mod file;
mod settings;

pub use file::{load_descriptor, parse_descriptor, ConfigError, ConfigResult};
pub use settings::{
    StoreSettings, ACCESS_TOKEN_ENV, DEFAULT_ENDPOINT, ENDPOINT_ENV, LOG_ENV,
};
