//! Raw values to Secret `data` entries

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};
use crate::types::ValueShape;

use super::env_block::parse_env_block;

/// Encode raw bytes the way Secret `data` expects: padded standard base64
pub fn encode_value(raw: &[u8]) -> String {
    STANDARD.encode(raw)
}

/// Turn one resolved value into `(output key, encoded value)` pairs
///
/// A `Plain` value becomes a single entry named after the logical key. An
/// `EnvBlock` value is parsed as a KEY=VALUE block (see [`parse_env_block`])
/// and yields one entry per assignment, in block order.
pub fn transform(key: &str, raw: &[u8], shape: ValueShape) -> Result<Vec<(String, String)>> {
    match shape {
        ValueShape::Plain => Ok(vec![(key.to_string(), encode_value(raw))]),
        ValueShape::EnvBlock => {
            let assignments = parse_env_block(raw).map_err(|e| Error::parse(key, e.to_string()))?;
            Ok(assignments
                .into_iter()
                .map(|(name, value)| (name, encode_value(value.as_bytes())))
                .collect())
        }
    }
}
