//! # Config Schemas
//!
//! Typed models of `config.yaml` (one per method directory) and `layer.yaml`
//! (one per layer directory), validated with `validator`.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use validator::{Validate, ValidationError};

fn default_memory() -> f64 {
    128.0
}

fn default_timeout() -> f64 {
    3.0
}

#[allow(clippy::ptr_arg)]
fn validate_non_blank_items(items: &Vec<String>) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.trim().is_empty()) {
        let mut err = ValidationError::new("blank_item");
        err.message = Some("entries must be non-empty strings".into());
        return Err(err);
    }
    Ok(())
}

/// Network placement of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcConfig {
    /// Security groups attached to the function.
    pub security_group_ids: Vec<String>,
    /// Subnets the function is placed in.
    pub subnet_ids: Vec<String>,
}

/// Contents of a method-level `config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MethodConfig {
    /// Runtime identifier, e.g. `python3.11`.
    #[validate(length(min = 1, message = "runtime must not be empty"))]
    pub runtime: String,
    /// Handler entry point. Inferred from the runtime family when omitted.
    #[serde(default)]
    pub entry: String,
    /// Memory in MB.
    #[serde(default = "default_memory")]
    #[validate(range(exclusive_min = 0.0, message = "memory must be positive"))]
    pub memory: f64,
    /// Timeout in seconds.
    #[serde(default = "default_timeout")]
    #[validate(range(exclusive_min = 0.0, message = "timeout must be positive"))]
    pub timeout: f64,
    /// Environment entries.
    #[serde(default)]
    pub env: Vec<String>,
    /// Names of layers attached to the function.
    #[serde(default)]
    #[validate(custom(function = "validate_non_blank_items"))]
    pub layers: Vec<String>,
    /// Permission statements granted to the function.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Resource tags, in file order.
    #[serde(default)]
    pub tags: IndexMap<String, String>,
    /// Explicit function name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Network placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc: Option<VpcConfig>,
}

/// Default entry point for a runtime family, if the family is known.
pub fn infer_entry(runtime: &str) -> Option<&'static str> {
    const RULES: [(&str, &str); 6] = [
        ("python", "handler.handler"),
        ("nodejs", "handler.handler"),
        ("ruby", "handler.handler"),
        ("java", "handler.Handler::handleRequest"),
        ("go", "handler"),
        ("provided", "bootstrap"),
    ];
    RULES
        .iter()
        .find(|(prefix, _)| runtime.starts_with(prefix))
        .map(|(_, entry)| *entry)
}

impl MethodConfig {
    /// Parses and validates method config YAML.
    pub fn from_yaml(yaml_content: &str) -> Result<Self, String> {
        let mut config: MethodConfig = serde_yaml::from_str(yaml_content)
            .map_err(|e| format!("Failed to parse config YAML: {}", e))?;
        config.validate().map_err(|e| e.to_string())?;

        if config.entry.trim().is_empty() {
            config.entry = infer_entry(&config.runtime)
                .ok_or_else(|| {
                    format!(
                        "cannot infer `entry` for runtime '{}'; set it explicitly",
                        config.runtime
                    )
                })?
                .to_string();
        }

        Ok(config)
    }

    /// Reads, parses and validates a `config.yaml`.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| AppError::InvalidMethodConfig {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })?;
        Self::from_yaml(&content).map_err(|message| AppError::InvalidMethodConfig {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// Contents of a `layer.yaml`, with the layer name injected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LayerConfig {
    /// Layer name; always the layer directory's base name.
    #[validate(length(min = 1, message = "layer name must not be empty"))]
    pub name: String,
    /// Compatible runtimes.
    #[validate(
        length(min = 1, message = "runtimes must list at least one runtime"),
        custom(function = "validate_non_blank_items")
    )]
    pub runtimes: Vec<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Compatible instruction set architectures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatible_architectures: Option<Vec<String>>,
    /// Glob patterns to include in the layer bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// Glob patterns to exclude from the layer bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl LayerConfig {
    /// Parses and validates layer config YAML, overriding any `name` in the
    /// document with `layer_name`.
    pub fn from_yaml(yaml_content: &str, layer_name: &str) -> Result<Self, String> {
        let raw: serde_yaml::Value = serde_yaml::from_str(yaml_content)
            .map_err(|e| format!("Failed to parse layer YAML: {}", e))?;

        let serde_yaml::Value::Mapping(mut map) = raw else {
            return Err("layer config must be a mapping".into());
        };
        map.insert("name".into(), layer_name.into());

        let config: LayerConfig = serde_yaml::from_value(serde_yaml::Value::Mapping(map))
            .map_err(|e| format!("Schema mismatch: {}", e))?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}
