//! # OpenAPI Loader
//!
//! Reads an OpenAPI YAML file and performs the structural checks required
//! before the document is attached to the backend model:
//! - the root must be a mapping,
//! - `openapi` must declare a 3.x version,
//! - `info` must carry a `title` and a `version`,
//! - `paths`, when present, must be keyed by templates starting with `/`.
//!
//! Everything else is kept verbatim in the raw value.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Intermediate deserialization layer for the fields that are checked.
#[derive(Deserialize)]
struct ShimOpenApi {
    openapi: Option<Value>,
    info: Option<ShimInfo>,
    paths: Option<BTreeMap<String, Value>>,
}

#[derive(Deserialize)]
struct ShimInfo {
    title: Option<String>,
    version: Option<Value>,
}

/// A structurally validated OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    version: String,
    title: String,
    raw: Value,
}

impl OpenApiDocument {
    /// Parses and validates an OpenAPI document from YAML text.
    pub fn from_yaml(yaml_content: &str) -> Result<Self, String> {
        let raw: Value = serde_yaml::from_str(yaml_content)
            .map_err(|e| format!("Failed to parse OpenAPI YAML: {}", e))?;
        if !raw.is_object() {
            return Err("OpenAPI document must be a mapping".into());
        }

        let shim: ShimOpenApi = serde_json::from_value(raw.clone())
            .map_err(|e| format!("Malformed OpenAPI document: {}", e))?;
        let (version, title) = validate_openapi_root(&shim)?;

        Ok(Self {
            version,
            title,
            raw,
        })
    }

    /// The declared `openapi` version, e.g. `3.1.0`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// `info.title`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of path templates declared under `paths`.
    pub fn path_count(&self) -> usize {
        self.raw
            .get("paths")
            .and_then(Value::as_object)
            .map_or(0, |paths| paths.keys().filter(|k| k.starts_with('/')).count())
    }

    /// The whole document.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }
}

impl Serialize for OpenApiDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Validates required root-level fields, returning `(version, title)`.
fn validate_openapi_root(openapi: &ShimOpenApi) -> Result<(String, String), String> {
    let version = openapi
        .openapi
        .as_ref()
        .and_then(scalar_to_string)
        .ok_or("OpenAPI document missing required 'openapi' version")?;
    if !version.starts_with("3.") {
        return Err(format!("Unsupported OpenAPI version '{}'", version));
    }

    let info = openapi
        .info
        .as_ref()
        .ok_or("OpenAPI document missing required 'info' object")?;
    let title = info
        .title
        .clone()
        .ok_or("OpenAPI 'info' object missing required 'title'")?;
    if info.version.as_ref().and_then(scalar_to_string).is_none() {
        return Err("OpenAPI 'info' object missing required 'version'".into());
    }

    if let Some(paths) = &openapi.paths {
        if let Some(bad) = paths
            .keys()
            .find(|key| !key.starts_with('/') && !key.starts_with("x-"))
        {
            return Err(format!("Path template '{}' must start with '/'", bad));
        }
    }

    Ok((version, title))
}

/// Loads and validates the OpenAPI document at `path`.
pub fn parse_openapi(path: &Path) -> AppResult<OpenApiDocument> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::OpenApiNotFound {
            path: path.to_path_buf(),
        },
        _ => AppError::InvalidOpenApi {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        },
    })?;

    let document =
        OpenApiDocument::from_yaml(&content).map_err(|message| AppError::InvalidOpenApi {
            path: path.to_path_buf(),
            message,
        })?;

    debug!(
        file = %path.display(),
        version = document.version(),
        paths = document.path_count(),
        "validated OpenAPI document"
    );
    Ok(document)
}
