//! # Validator
//!
//! Pure predicates and canonical file names of the directory convention.
//! Nothing in here touches the filesystem.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Directory holding the route tree, relative to the backend root.
pub const API_DIR: &str = "api";
/// Directory holding layer directories, relative to the backend root.
pub const LAYERS_DIR: &str = "layers";
/// Stem every handler file must carry.
pub const HANDLER_STEM: &str = "handler";
/// Method-level config file name.
pub const METHOD_CONFIG_FILE: &str = "config.yaml";
/// Layer-level config file name.
pub const LAYER_CONFIG_FILE: &str = "layer.yaml";
/// Dependency manifest name inside a layer directory.
pub const LAYER_REQUIREMENTS_FILE: &str = "requirements.txt";
/// OpenAPI document name, both method-scoped and backend-scoped.
pub const OPENAPI_FILE: &str = "openapi.yaml";

/// Handler extensions accepted by the parser.
pub const SUPPORTED_EXTENSIONS: [&str; 8] = ["py", "js", "mjs", "cjs", "ts", "rb", "go", "java"];

/// The HTTP methods a method directory may be named after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// All methods, in declaration order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Lowercase name, as used for directory names.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| format!("'{}' is not a recognized HTTP method", s))
    }
}

/// Returns true if `path` has an extension from [`SUPPORTED_EXTENSIONS`].
///
/// The comparison is case-sensitive: `handler.PY` is rejected.
pub fn is_supported_handler_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Returns true if `name`, lowercased, is a recognized HTTP method.
pub fn is_valid_http_method(name: &str) -> bool {
    name.parse::<HttpMethod>().is_ok()
}

/// Dependency manifest file name for a handler extension.
pub fn requirements_file_name_for(extension: &str) -> Option<&'static str> {
    match extension {
        "py" => Some("requirements.txt"),
        "js" | "mjs" | "cjs" | "ts" => Some("package.json"),
        "rb" => Some("Gemfile"),
        "go" => Some("go.mod"),
        "java" => Some("pom.xml"),
        _ => None,
    }
}

/// Returns true if the file name's stem is exactly [`HANDLER_STEM`].
pub fn is_handler_file(path: &Path) -> bool {
    path.file_stem().is_some_and(|stem| stem == HANDLER_STEM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("get", true)]
    #[case("GET", true)]
    #[case("Options", true)]
    #[case("head", true)]
    #[case("trace", false)]
    #[case("users", false)]
    #[case("", false)]
    fn test_is_valid_http_method(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_http_method(name), expected);
    }

    #[rstest]
    #[case("handler.py", true)]
    #[case("handler.ts", true)]
    #[case("handler.java", true)]
    #[case("handler.PY", false)]
    #[case("handler.txt", false)]
    #[case("handler", false)]
    fn test_is_supported_handler_extension(#[case] file: &str, #[case] expected: bool) {
        assert_eq!(is_supported_handler_extension(Path::new(file)), expected);
    }

    #[test]
    fn test_requirements_file_names() {
        assert_eq!(requirements_file_name_for("py"), Some("requirements.txt"));
        assert_eq!(requirements_file_name_for("mjs"), Some("package.json"));
        assert_eq!(requirements_file_name_for("go"), Some("go.mod"));
        assert_eq!(requirements_file_name_for("exe"), None);
    }

    #[test]
    fn test_handler_stem() {
        assert!(is_handler_file(Path::new("api/x/get/handler.py")));
        assert!(is_handler_file(Path::new("handler")));
        assert!(!is_handler_file(Path::new("handlers.py")));
        assert!(!is_handler_file(Path::new("my_handler.py")));
    }

    #[test]
    fn test_method_display_is_uppercase() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!("PaTcH".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
    }
}
