//! # Data Models
//!
//! Value types produced by discovery and parsing. All of them are plain owned
//! values built bottom-up; the aggregate owns its children.

use crate::config::LayerConfig;
use crate::openapi::OpenApiDocument;
use crate::validator::HttpMethod;
use serde::Serialize;
use std::path::PathBuf;

/// A method directory found under a route directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDirectory {
    /// The method the directory is named after.
    pub method: HttpMethod,
    /// The method directory itself.
    pub directory: PathBuf,
}

/// A route found by discovery, before its methods are parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredRoute {
    /// Route string, e.g. `/users/{id}`.
    pub route: String,
    /// The directory the route string was built from.
    pub route_directory: PathBuf,
    /// Method directories holding a handler.
    pub method_directories: Vec<MethodDirectory>,
}

/// One parsed route + method pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedMethod {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The handler source file.
    pub handler_file: PathBuf,
    /// The method config file.
    pub config_file: PathBuf,
    /// Dependency manifest, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies_file: Option<PathBuf>,
    /// Method-scoped OpenAPI document, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<OpenApiDocument>,
}

/// A route with at least one parsed method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRoute {
    /// Route string, e.g. `/users/{id}`.
    pub route: String,
    /// Parsed methods; never empty.
    pub methods: Vec<ParsedMethod>,
}

impl ParsedRoute {
    /// Looks up a parsed method.
    pub fn method(&self, method: HttpMethod) -> Option<&ParsedMethod> {
        self.methods.iter().find(|m| m.method == method)
    }
}

/// A parsed layer directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedLayer {
    /// Layer name (the directory's base name).
    pub name: String,
    /// The layer config file.
    pub config_file: PathBuf,
    /// Dependency manifest, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies_file: Option<PathBuf>,
    /// Validated layer config.
    pub config: LayerConfig,
}

/// The parsed `api/` tree.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ParsedApi {
    /// Parsed routes in discovery order.
    pub routes: Vec<ParsedRoute>,
    /// Backend-scoped OpenAPI document, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<OpenApiDocument>,
}

impl ParsedApi {
    /// Looks up a parsed route by its route string.
    pub fn route(&self, route: &str) -> Option<&ParsedRoute> {
        self.routes.iter().find(|r| r.route == route)
    }
}

/// The fully parsed backend.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct BackendModel {
    /// The api tree.
    pub api: ParsedApi,
    /// Parsed layers; empty when the backend has none.
    pub layers: Vec<ParsedLayer>,
}

impl BackendModel {
    /// Looks up a parsed layer by name.
    pub fn layer(&self, name: &str) -> Option<&ParsedLayer> {
        self.layers.iter().find(|l| l.name == name)
    }
}
