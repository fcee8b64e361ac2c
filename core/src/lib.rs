#![deny(missing_docs)]

//! # Gantry Core
//!
//! Discovers the directory convention of a serverless HTTP backend and parses
//! it into a validated [`BackendModel`]:
//!
//! ```text
//! <root>/
//!   api/<segments...>/<method>/{handler.<ext>, config.yaml, [manifest], [openapi.yaml]}
//!   layers/<name>/{layer.yaml, [requirements.txt]}
//!   openapi.yaml
//! ```
//!
//! Directory names written as `[name]` become `{name}` route parameters.

/// Shared error types.
pub mod error;

/// Pure predicates and canonical file names.
pub mod validator;

/// Directory name to route segment conversion.
pub mod segment;

/// Per-invocation parse settings.
pub mod options;

/// Route and layer directory discovery.
pub mod discovery;

/// `config.yaml` and `layer.yaml` schemas.
pub mod config;

/// OpenAPI document loading.
pub mod openapi;

/// Parsed model types.
pub mod models;

/// Method, layer and backend parsers.
pub mod parser;

pub use config::{LayerConfig, MethodConfig, VpcConfig};
pub use discovery::{discover_api_routes, discover_api_routes_with, find_layer_directories};
pub use error::{render_report, AppError, AppResult};
pub use models::{
    BackendModel, DiscoveredRoute, MethodDirectory, ParsedApi, ParsedLayer, ParsedMethod,
    ParsedRoute,
};
pub use openapi::{parse_openapi, OpenApiDocument};
pub use options::ParseOptions;
pub use parser::{
    parse_api, parse_api_with, parse_backend, parse_backend_with, parse_layer, parse_layers,
    parse_method, parse_route,
};
pub use validator::HttpMethod;
