//! # Backend Assembler
//!
//! Parses the `api/` tree, the `layers/` folder and the backend-root OpenAPI
//! document concurrently and merges them into one [`BackendModel`].

use crate::discovery::{discover_api_routes_with, ensure_directory, find_layer_directories};
use crate::error::AppResult;
use crate::models::{BackendModel, ParsedApi, ParsedLayer, ParsedRoute};
use crate::openapi::{parse_openapi, OpenApiDocument};
use crate::options::ParseOptions;
use crate::parser::layer::parse_layer;
use crate::parser::logged;
use crate::parser::method::parse_route;
use crate::validator::{API_DIR, LAYERS_DIR, OPENAPI_FILE};
use rayon::prelude::*;
use std::path::Path;
use tracing::{info, Span};

/// Parses an api directory with default options.
pub fn parse_api(api_dir: &Path) -> AppResult<ParsedApi> {
    parse_api_with(api_dir, &ParseOptions::default())
}

/// Parses an api directory. The result carries no OpenAPI document; that
/// lives at the backend root and is attached by [`parse_backend_with`].
pub fn parse_api_with(api_dir: &Path, options: &ParseOptions) -> AppResult<ParsedApi> {
    logged("api", &api_dir.display().to_string(), || {
        let discovered = discover_api_routes_with(api_dir, options)?;

        let span = Span::current();
        let routes: Vec<ParsedRoute> = discovered
            .par_iter()
            .map(|route| span.in_scope(|| parse_route(route)))
            .collect::<AppResult<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect();

        info!(
            routes = routes.len(),
            methods = routes.iter().map(|r| r.methods.len()).sum::<usize>(),
            "parsed api"
        );
        Ok(ParsedApi {
            routes,
            openapi: None,
        })
    })
}

/// Parses every layer under `layers_dir`. A missing directory yields no layers.
pub fn parse_layers(layers_dir: &Path) -> AppResult<Vec<ParsedLayer>> {
    logged("layers", &layers_dir.display().to_string(), || {
        let span = Span::current();
        let layers = find_layer_directories(layers_dir)?
            .par_iter()
            .map(|dir| span.in_scope(|| parse_layer(dir)))
            .collect::<AppResult<Vec<_>>>()?;

        info!(layers = layers.len(), "parsed layers");
        Ok(layers)
    })
}

fn parse_root_openapi(root: &Path) -> AppResult<Option<OpenApiDocument>> {
    let file = root.join(OPENAPI_FILE);
    if !file.is_file() {
        return Ok(None);
    }
    parse_openapi(&file).map(Some)
}

/// Parses a backend root with default options.
pub fn parse_backend(root: &Path) -> AppResult<BackendModel> {
    parse_backend_with(root, &ParseOptions::default())
}

/// Parses a backend root holding `api/`, optionally `layers/`, and optionally
/// a root `openapi.yaml`.
///
/// The three parts are parsed concurrently, each inside the `backend` span
/// whichever pool thread runs it. If more than one fails, the api error is
/// reported, then the layers error, then the OpenAPI error.
pub fn parse_backend_with(root: &Path, options: &ParseOptions) -> AppResult<BackendModel> {
    ensure_directory(root)?;

    logged("backend", &root.display().to_string(), || {
        let span = Span::current();
        let (api, (layers, openapi)) = rayon::join(
            || span.in_scope(|| parse_api_with(&root.join(API_DIR), options)),
            || {
                rayon::join(
                    || span.in_scope(|| parse_layers(&root.join(LAYERS_DIR))),
                    || span.in_scope(|| parse_root_openapi(root)),
                )
            },
        );

        let mut api = api?;
        let layers = layers?;
        api.openapi = openapi?;

        Ok(BackendModel { api, layers })
    })
}
