//! # Layer Parser
//!
//! Reads and validates one layer directory.

use crate::config::LayerConfig;
use crate::discovery::dir_name;
use crate::error::{AppError, AppResult};
use crate::models::ParsedLayer;
use crate::parser::logged;
use crate::validator::{LAYER_CONFIG_FILE, LAYER_REQUIREMENTS_FILE};
use std::fs;
use std::path::Path;

/// Parses the layer stored in `layer_dir`.
///
/// The directory's base name is the layer name, whatever the config says.
pub fn parse_layer(layer_dir: &Path) -> AppResult<ParsedLayer> {
    let name = dir_name(layer_dir);

    logged("layer", &name, || {
        let config_file = layer_dir.join(LAYER_CONFIG_FILE);
        if !config_file.is_file() {
            return Err(AppError::MissingLayerConfigFile {
                path: config_file,
                layer: name.clone(),
            });
        }

        let content = fs::read_to_string(&config_file).map_err(|e| AppError::InvalidLayerConfig {
            path: config_file.clone(),
            layer: name.clone(),
            message: format!("Failed to read file: {}", e),
        })?;

        let config =
            LayerConfig::from_yaml(&content, &name).map_err(|message| AppError::InvalidLayerConfig {
                path: config_file.clone(),
                layer: name.clone(),
                message,
            })?;

        let requirements = layer_dir.join(LAYER_REQUIREMENTS_FILE);
        let dependencies_file = requirements.is_file().then_some(requirements);

        Ok(ParsedLayer {
            name: name.clone(),
            config_file,
            dependencies_file,
            config,
        })
    })
}
