//! # Error Handling
//!
//! Provides the closed `AppError` enum returned by every public operation of
//! the crate, plus a pure report formatter for user-facing output.

use derive_more::Display;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The Global Error Enum.
///
/// Every variant names the offending path. Structured parts are exposed via
/// [`AppError::path`], [`AppError::context`] and [`AppError::suggestion`].
#[derive(Debug, Display)]
pub enum AppError {
    /// A required directory does not exist.
    #[display("Directory not found: {}", path.display())]
    DirectoryNotFound {
        /// The missing directory.
        path: PathBuf,
    },

    /// A path expected to be a directory is something else.
    #[display("Not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// No handler-bearing method directory exists under the api root.
    #[display("No handlers found in api folder: {}", path.display())]
    EmptyApiFolder {
        /// The api root that was searched.
        path: PathBuf,
    },

    /// A directory holding a handler is not named after an HTTP method.
    #[display("Invalid HTTP method '{method}' at {}", path.display())]
    InvalidHttpMethod {
        /// The directory carrying the invalid name.
        path: PathBuf,
        /// The rejected directory name.
        method: String,
    },

    /// Two directories resolve to the same route string.
    #[display("Duplicate route '{route}' ({} and {})", first.display(), path.display())]
    DuplicateRoute {
        /// The route string both directories map to.
        route: String,
        /// The directory that claimed the route first.
        first: PathBuf,
        /// The directory that collided with it.
        path: PathBuf,
    },

    /// A method directory has a handler but no config file.
    #[display("Missing config file for {endpoint}: {}", path.display())]
    MissingConfigFile {
        /// The expected config file path.
        path: PathBuf,
        /// `"<route> <METHOD>"` of the affected endpoint.
        endpoint: String,
    },

    /// A handler file has an unsupported extension.
    #[display("Unsupported handler extension '{extension}': {}", path.display())]
    InvalidFileExtension {
        /// The handler file.
        path: PathBuf,
        /// The rejected extension (empty when the file has none).
        extension: String,
    },

    /// A layer directory lacks its config file.
    #[display("Missing config file for layer '{layer}': {}", path.display())]
    MissingLayerConfigFile {
        /// The expected layer config path.
        path: PathBuf,
        /// The layer name.
        layer: String,
    },

    /// A layer config could not be read, parsed or validated.
    #[display("Invalid config for layer '{layer}' ({}): {message}", path.display())]
    InvalidLayerConfig {
        /// The layer config path.
        path: PathBuf,
        /// The layer name.
        layer: String,
        /// The underlying parse or validation message.
        message: String,
    },

    /// A method config could not be read, parsed or validated.
    #[display("Invalid method config ({}): {message}", path.display())]
    InvalidMethodConfig {
        /// The method config path.
        path: PathBuf,
        /// The underlying parse or validation message.
        message: String,
    },

    /// An OpenAPI file does not exist.
    #[display("OpenAPI file not found: {}", path.display())]
    OpenApiNotFound {
        /// The missing file.
        path: PathBuf,
    },

    /// An OpenAPI file could not be read or failed validation.
    #[display("Invalid OpenAPI document ({}): {message}", path.display())]
    InvalidOpenApi {
        /// The OpenAPI file.
        path: PathBuf,
        /// The underlying parse or validation message.
        message: String,
    },

    /// A filesystem call failed while inspecting a path.
    #[display("IO Error at {}: {source}", path.display())]
    Io {
        /// The path being inspected.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}

impl AppError {
    /// The path the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::DirectoryNotFound { path }
            | Self::NotADirectory { path }
            | Self::EmptyApiFolder { path }
            | Self::InvalidHttpMethod { path, .. }
            | Self::DuplicateRoute { path, .. }
            | Self::MissingConfigFile { path, .. }
            | Self::InvalidFileExtension { path, .. }
            | Self::MissingLayerConfigFile { path, .. }
            | Self::InvalidLayerConfig { path, .. }
            | Self::InvalidMethodConfig { path, .. }
            | Self::OpenApiNotFound { path }
            | Self::InvalidOpenApi { path, .. }
            | Self::Io { path, .. } => path,
        }
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DirectoryNotFound { .. } => "DirectoryNotFound",
            Self::NotADirectory { .. } => "NotADirectory",
            Self::EmptyApiFolder { .. } => "EmptyApiFolder",
            Self::InvalidHttpMethod { .. } => "InvalidHttpMethod",
            Self::DuplicateRoute { .. } => "DuplicateRoute",
            Self::MissingConfigFile { .. } => "MissingConfigFile",
            Self::InvalidFileExtension { .. } => "InvalidFileExtension",
            Self::MissingLayerConfigFile { .. } => "MissingLayerConfigFile",
            Self::InvalidLayerConfig { .. } => "InvalidLayerConfig",
            Self::InvalidMethodConfig { .. } => "InvalidMethodConfig",
            Self::OpenApiNotFound { .. } => "OpenApiNotFound",
            Self::InvalidOpenApi { .. } => "InvalidOpenApi",
            Self::Io { .. } => "Io",
        }
    }

    /// Structured key/value context beyond the path itself.
    pub fn context(&self) -> BTreeMap<&'static str, String> {
        let mut ctx = BTreeMap::new();
        match self {
            Self::InvalidHttpMethod { method, .. } => {
                ctx.insert("method", method.clone());
            }
            Self::DuplicateRoute { route, first, .. } => {
                ctx.insert("route", route.clone());
                ctx.insert("first", first.display().to_string());
            }
            Self::MissingConfigFile { endpoint, .. } => {
                ctx.insert("endpoint", endpoint.clone());
            }
            Self::InvalidFileExtension { extension, .. } => {
                ctx.insert("extension", extension.clone());
            }
            Self::MissingLayerConfigFile { layer, .. } => {
                ctx.insert("layer", layer.clone());
            }
            Self::InvalidLayerConfig { layer, message, .. } => {
                ctx.insert("layer", layer.clone());
                ctx.insert("reason", message.clone());
            }
            Self::InvalidMethodConfig { message, .. } | Self::InvalidOpenApi { message, .. } => {
                ctx.insert("reason", message.clone());
            }
            Self::Io { source, .. } => {
                ctx.insert("reason", source.to_string());
            }
            Self::DirectoryNotFound { .. }
            | Self::NotADirectory { .. }
            | Self::EmptyApiFolder { .. }
            | Self::OpenApiNotFound { .. } => {}
        }
        ctx
    }

    /// A remediation hint for the user, when one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::DirectoryNotFound { .. } => Some("Check the path or create the directory."),
            Self::NotADirectory { .. } => Some("Point the command at a directory, not a file."),
            Self::EmptyApiFolder { .. } => Some(
                "Create a method directory such as api/hello/get/ containing a handler file and a config.yaml.",
            ),
            Self::InvalidHttpMethod { .. } => Some(
                "Rename the directory to one of: get, post, put, delete, patch, head, options.",
            ),
            Self::DuplicateRoute { .. } => {
                Some("Remove one of the directories; [name] and {name} segments are equivalent.")
            }
            Self::MissingConfigFile { .. } => {
                Some("Add a config.yaml next to the handler declaring at least `runtime`.")
            }
            Self::InvalidFileExtension { .. } => Some(
                "Use one of the supported handler extensions: py, js, mjs, cjs, ts, rb, go, java.",
            ),
            Self::MissingLayerConfigFile { .. } => {
                Some("Add a layer.yaml declaring at least `runtimes`.")
            }
            Self::InvalidLayerConfig { .. } => {
                Some("layer.yaml must contain a non-empty `runtimes` list of strings.")
            }
            Self::InvalidMethodConfig { .. } => {
                Some("config.yaml must declare `runtime`; memory and timeout must be positive.")
            }
            Self::OpenApiNotFound { .. } => None,
            Self::InvalidOpenApi { .. } => Some(
                "The document needs an `openapi: 3.x` version and an `info` object with title and version.",
            ),
            Self::Io { .. } => None,
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Renders an error as a multi-line report: message, context, suggestion.
pub fn render_report(err: &AppError) -> String {
    let mut out = format!("error[{}]: {}\n  path: {}", err.kind(), err, err.path().display());
    for (key, value) in err.context() {
        out.push_str(&format!("\n  {}: {}", key, value));
    }
    if let Some(hint) = err.suggestion() {
        out.push_str(&format!("\n  help: {}", hint));
    }
    out
}
