//! # Method Parser
//!
//! Validates one method directory: handler, config, and the optional
//! dependency manifest and OpenAPI fragment.

use crate::discovery::handler_files;
use crate::error::{AppError, AppResult};
use crate::models::{DiscoveredRoute, MethodDirectory, ParsedMethod, ParsedRoute};
use crate::openapi::parse_openapi;
use crate::parser::logged;
use crate::validator::{
    is_supported_handler_extension, requirements_file_name_for, METHOD_CONFIG_FILE, OPENAPI_FILE,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{warn, Span};

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

/// Parses one method directory of `route`.
///
/// Returns `Ok(None)` when the directory holds no handler file. When several
/// handler files exist, the first one in file-name order with a supported
/// extension is used.
pub fn parse_method(route: &str, method_dir: &MethodDirectory) -> AppResult<Option<ParsedMethod>> {
    let endpoint = format!("{} {}", route, method_dir.method);

    logged("method", &endpoint, || {
        let dir = &method_dir.directory;
        let candidates = handler_files(dir)?;
        let Some(first) = candidates.first() else {
            warn!(directory = %dir.display(), "method directory has no handler, skipping");
            return Ok(None);
        };

        let handler_file = candidates
            .iter()
            .find(|file| is_supported_handler_extension(file))
            .cloned()
            .ok_or_else(|| AppError::InvalidFileExtension {
                path: first.clone(),
                extension: extension_of(first),
            })?;

        let config_file = dir.join(METHOD_CONFIG_FILE);
        if !config_file.is_file() {
            return Err(AppError::MissingConfigFile {
                path: config_file,
                endpoint: endpoint.clone(),
            });
        }

        let dependencies_file = requirements_file_name_for(&extension_of(&handler_file))
            .and_then(|name| existing(dir.join(name)));

        let openapi = match existing(dir.join(OPENAPI_FILE)) {
            Some(file) => Some(parse_openapi(&file)?),
            None => None,
        };

        Ok(Some(ParsedMethod {
            method: method_dir.method,
            handler_file,
            config_file,
            dependencies_file,
            openapi,
        }))
    })
}

/// Parses every method directory of a discovered route.
///
/// Returns `Ok(None)` if no method survived, so callers never see a route
/// without methods.
pub fn parse_route(discovered: &DiscoveredRoute) -> AppResult<Option<ParsedRoute>> {
    let span = Span::current();
    let methods: Vec<ParsedMethod> = discovered
        .method_directories
        .par_iter()
        .map(|method_dir| span.in_scope(|| parse_method(&discovered.route, method_dir)))
        .collect::<AppResult<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    if methods.is_empty() {
        return Ok(None);
    }

    Ok(Some(ParsedRoute {
        route: discovered.route.clone(),
        methods,
    }))
}
