//! Manifest rendering

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::types::Secret;

/// Serialization used for the emitted manifest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML document, what kustomize reads from exec plugins
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected yaml or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a Secret as a manifest document
///
/// Map keys come out sorted, so identical inputs render byte-identical
/// output. JSON output ends with a newline like the YAML form does.
pub fn render(secret: &Secret, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(secret)?),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(secret)?;
            out.push('\n');
            Ok(out)
        }
    }
}
