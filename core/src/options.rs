//! # Parse Options
//!
//! Explicit per-invocation settings threaded through discovery and parsing.

/// Settings for one parse invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject handler-bearing directories that are not named after an HTTP
    /// method instead of treating them as route path segments.
    pub strict_methods: bool,
}

impl ParseOptions {
    /// Lenient defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`ParseOptions::strict_methods`].
    pub fn strict_methods(mut self, strict: bool) -> Self {
        self.strict_methods = strict;
        self
    }
}
