//! # Parser Module
//!
//! Turns discovered directories into parsed models.
//!
//! - **method**: one route + method directory into a `ParsedMethod`.
//! - **layer**: one layer directory into a `ParsedLayer`.
//! - **backend**: the api tree, the layers folder and the backend root.
//!
//! Every stage runs through [`logged`], which wraps it in a tracing span and
//! records its outcome. Work fanned out over the rayon pool re-enters the
//! caller's span, so stage spans nest as `backend > api > method` and
//! `backend > layers > layer` on every thread.

pub mod backend;
pub mod layer;
pub mod method;

pub use backend::{parse_api, parse_api_with, parse_backend, parse_backend_with, parse_layers};
pub use layer::parse_layer;
pub use method::{parse_method, parse_route};

use crate::error::AppResult;
use std::time::Instant;
use tracing::{debug, info_span, warn};

/// Runs one parse stage inside a `parse` span, logging duration on success
/// and the error on failure. The result is returned unchanged.
pub fn logged<T>(
    stage: &'static str,
    subject: &str,
    run: impl FnOnce() -> AppResult<T>,
) -> AppResult<T> {
    let span = info_span!("parse", stage, subject = %subject);
    let _guard = span.enter();
    let started = Instant::now();

    let result = run();
    match &result {
        Ok(_) => debug!(elapsed_us = started.elapsed().as_micros() as u64, "stage complete"),
        Err(e) => warn!(kind = e.kind(), error = %e, "stage failed"),
    }
    result
}
