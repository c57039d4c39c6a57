//! Config file loading.
//!
//! YAML and JSON files are read into untyped `serde_json::Value` trees so they
//! can be merged and addressed by path.

use crate::error::{ConfigError, ConfigResult};
use crate::path::{self, ConfigPath};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming an explicit config file for the CLI.
pub const CONFIG_PATH_ENV: &str = "WEB_SHARED_CONFIG_PATH";

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension.
    pub fn from_path(file: &Path) -> ConfigResult<Self> {
        let ext = file
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            other => Err(ConfigError::unsupported_format(
                &file.display().to_string(),
                other,
            )),
        }
    }
}

/// Parse config text. An empty document yields an empty object.
pub fn parse_str(content: &str, format: ConfigFormat, label: &str) -> ConfigResult<Value> {
    let value: Value = match format {
        ConfigFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| ConfigError::parse_failed(label, e))?
        }
        ConfigFormat::Json => {
            if content.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(content).map_err(|e| ConfigError::parse_failed(label, e))?
            }
        }
    };
    Ok(match value {
        Value::Null => Value::Object(Map::new()),
        other => other,
    })
}

/// Read and parse a config file.
pub fn load_file(file: &Path) -> ConfigResult<Value> {
    let label = file.display().to_string();
    if !file.exists() {
        return Err(ConfigError::file_not_found(&label));
    }
    let format = ConfigFormat::from_path(file)?;
    info!(path = %label, format = ?format, "Loading config file");
    let content =
        std::fs::read_to_string(file).map_err(|e| ConfigError::read_failed(&label, e))?;
    parse_str(&content, format, &label)
}

/// Read a config file and select the sub-tree at `at`, if given.
pub fn load_section(file: &Path, at: Option<&ConfigPath>) -> ConfigResult<Value> {
    let value = load_file(file)?;
    let Some(section) = at.filter(|p| !p.is_root()) else {
        return Ok(value);
    };
    debug!(path = %file.display(), section = %section, "Selecting config section");
    match path::lookup(&value, section) {
        Some(found) if !found.is_null() => Ok(found.clone()),
        _ => Err(ConfigError::section_not_found(&section.to_string())
            .with_details(format!("in {}", file.display()))),
    }
}
