//! # Discovery
//!
//! Walks an `api/` tree and classifies every directory as either a route
//! (it holds method directories with a handler) or a plain path segment, and
//! lists the layer directories of a `layers/` folder.

use crate::error::{AppError, AppResult};
use crate::models::{DiscoveredRoute, MethodDirectory};
use crate::options::ParseOptions;
use crate::segment::route_from_segments;
use crate::validator::{is_handler_file, HttpMethod, LAYER_CONFIG_FILE};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Fails unless `path` exists and is a directory.
pub fn ensure_directory(path: &Path) -> AppResult<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(AppError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::DirectoryNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(AppError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// True if `path` is a symlink, whatever its target.
fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}

/// Immediate children of `dir`, sorted by file name, split into
/// (directories, files).
///
/// Symlinks are followed. A link whose target cannot be resolved is skipped.
pub(crate) fn list_children(dir: &Path) -> AppResult<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                if e.path().is_some_and(is_symlink) {
                    warn!(path = %path.display(), error = %e, "skipping unresolvable symlink");
                    continue;
                }
                return Err(AppError::Io {
                    path,
                    source: e.into(),
                });
            }
        };
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        } else if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok((dirs, files))
}

/// Handler candidates directly inside `dir`, sorted by file name.
pub(crate) fn handler_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let (_, files) = list_children(dir)?;
    Ok(files.into_iter().filter(|f| is_handler_file(f)).collect())
}

pub(crate) fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A directory waiting to be classified.
struct PendingDir {
    dir: PathBuf,
    /// Directory names from the api root down to `dir`.
    names: Vec<String>,
    /// Canonical paths of the directories above `dir`.
    ancestors: Vec<PathBuf>,
}

/// Discovers every route under `api_root` with default options.
pub fn discover_api_routes(api_root: &Path) -> AppResult<Vec<DiscoveredRoute>> {
    discover_api_routes_with(api_root, &ParseOptions::default())
}

/// Discovers every route under `api_root`.
///
/// Directories are visited depth-first in file-name order, so the returned
/// list is deterministic for a given tree. A directory becomes a route as soon
/// as one of its children is a method directory; its other children are still
/// walked, so `/users` and `/users/{id}` can both exist. A symlink back to
/// one of its own ancestors is not descended into.
pub fn discover_api_routes_with(
    api_root: &Path,
    options: &ParseOptions,
) -> AppResult<Vec<DiscoveredRoute>> {
    ensure_directory(api_root)?;

    let mut routes = Vec::new();
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();
    let mut pending = vec![PendingDir {
        dir: api_root.to_path_buf(),
        names: Vec::new(),
        ancestors: Vec::new(),
    }];

    while let Some(PendingDir {
        dir,
        names,
        mut ancestors,
    }) = pending.pop()
    {
        let canonical = fs::canonicalize(&dir).map_err(|e| AppError::Io {
            path: dir.clone(),
            source: e,
        })?;
        if ancestors.contains(&canonical) {
            warn!(directory = %dir.display(), target = %canonical.display(), "skipping symlink cycle");
            continue;
        }
        ancestors.push(canonical);

        let (children, _) = list_children(&dir)?;
        let mut method_directories = Vec::new();
        let mut segments = Vec::new();

        for child in children {
            let name = dir_name(&child);
            let has_handler = !handler_files(&child)?.is_empty();

            match name.parse::<HttpMethod>() {
                Ok(method) if has_handler => method_directories.push(MethodDirectory {
                    method,
                    directory: child,
                }),
                Err(_) if has_handler && options.strict_methods => {
                    return Err(AppError::InvalidHttpMethod {
                        path: child,
                        method: name,
                    });
                }
                _ => segments.push((child, name)),
            }
        }

        if !method_directories.is_empty() {
            let route = route_from_segments(&names);
            if let Some(first) = claimed.get(&route) {
                return Err(AppError::DuplicateRoute {
                    route,
                    first: first.clone(),
                    path: dir,
                });
            }
            debug!(
                route = %route,
                methods = method_directories.len(),
                "discovered route"
            );
            claimed.insert(route.clone(), dir.clone());
            routes.push(DiscoveredRoute {
                route,
                route_directory: dir,
                method_directories,
            });
        }

        // Reverse so the stack pops children in name order.
        for (child, name) in segments.into_iter().rev() {
            let mut child_names = names.clone();
            child_names.push(name);
            pending.push(PendingDir {
                dir: child,
                names: child_names,
                ancestors: ancestors.clone(),
            });
        }
    }

    if routes.is_empty() {
        return Err(AppError::EmptyApiFolder {
            path: api_root.to_path_buf(),
        });
    }

    info!(root = %api_root.display(), count = routes.len(), "route discovery complete");
    Ok(routes)
}

/// Lists the layer directories directly under `layers_root`.
///
/// A missing `layers_root` yields an empty list. Subdirectories without a
/// layer config are skipped.
pub fn find_layer_directories(layers_root: &Path) -> AppResult<Vec<PathBuf>> {
    match ensure_directory(layers_root) {
        Ok(()) => {}
        Err(AppError::DirectoryNotFound { .. }) => {
            debug!(root = %layers_root.display(), "no layers directory");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    }

    let (children, _) = list_children(layers_root)?;
    let layers: Vec<PathBuf> = children
        .into_iter()
        .filter(|dir| dir.join(LAYER_CONFIG_FILE).is_file())
        .collect();

    info!(root = %layers_root.display(), count = layers.len(), "layer discovery complete");
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn route_names(routes: &[DiscoveredRoute]) -> Vec<&str> {
        routes.iter().map(|r| r.route.as_str()).collect()
    }

    #[test]
    fn test_discovers_nested_and_parent_routes() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "users/get/handler.py");
        touch(dir.path(), "users/[id]/get/handler.py");
        touch(dir.path(), "users/[id]/delete/handler.py");

        let routes = discover_api_routes(dir.path()).unwrap();
        assert_eq!(route_names(&routes), vec!["/users", "/users/{id}"]);

        let methods: Vec<HttpMethod> = routes[1]
            .method_directories
            .iter()
            .map(|m| m.method)
            .collect();
        assert_eq!(methods, vec![HttpMethod::Delete, HttpMethod::Get]);
    }

    #[test]
    fn test_root_directory_maps_to_slash() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "get/handler.py");

        let routes = discover_api_routes(dir.path()).unwrap();
        assert_eq!(route_names(&routes), vec!["/"]);
    }

    #[test]
    fn test_method_name_is_case_insensitive() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "ping/GET/handler.js");

        let routes = discover_api_routes(dir.path()).unwrap();
        assert_eq!(routes[0].method_directories[0].method, HttpMethod::Get);
    }

    #[test]
    fn test_method_dir_without_handler_is_a_segment() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "files/get/readme.md");
        touch(dir.path(), "files/get/post/handler.py");

        let routes = discover_api_routes(dir.path()).unwrap();
        assert_eq!(route_names(&routes), vec!["/files/get"]);
    }

    #[test]
    fn test_unknown_names_are_segments_by_default() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "emoji/{mood}/handler.py");
        touch(dir.path(), "emoji/{mood}/get/handler.py");

        let routes = discover_api_routes(dir.path()).unwrap();
        assert_eq!(route_names(&routes), vec!["/emoji/{mood}"]);
    }

    #[test]
    fn test_strict_mode_rejects_handler_outside_method_dir() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "emoji/fetch/handler.py");
        touch(dir.path(), "emoji/get/handler.py");

        let options = ParseOptions::new().strict_methods(true);
        let err = discover_api_routes_with(dir.path(), &options).unwrap_err();
        match err {
            AppError::InvalidHttpMethod { method, path } => {
                assert_eq!(method, "fetch");
                assert_eq!(path, dir.path().join("emoji/fetch"));
            }
            other => panic!("expected InvalidHttpMethod, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_route_is_rejected() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "items/[id]/get/handler.py");
        touch(dir.path(), "items/{id}/get/handler.py");

        let err = discover_api_routes(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::DuplicateRoute { ref route, .. } if route == "/items/{id}"));
    }

    #[test]
    fn test_empty_api_folder() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("users/get")).unwrap();

        let err = discover_api_routes(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::EmptyApiFolder { ref path } if path == dir.path()));
    }

    #[test]
    fn test_missing_and_non_directory_roots() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            discover_api_routes(&missing).unwrap_err(),
            AppError::DirectoryNotFound { .. }
        ));

        touch(dir.path(), "file.txt");
        assert!(matches!(
            discover_api_routes(&dir.path().join("file.txt")).unwrap_err(),
            AppError::NotADirectory { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "users/get/handler.py");
        std::os::unix::fs::symlink(
            dir.path().join("users/get/gone.py"),
            dir.path().join("users/get/stale.py"),
        )
        .unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("users/old"))
            .unwrap();

        let routes = discover_api_routes(dir.path()).unwrap();
        assert_eq!(route_names(&routes), vec!["/users"]);
        assert_eq!(
            handler_files(&dir.path().join("users/get")).unwrap(),
            vec![dir.path().join("users/get/handler.py")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_not_followed() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "users/get/handler.py");
        std::os::unix::fs::symlink(dir.path(), dir.path().join("users/loop")).unwrap();

        let routes = discover_api_routes(dir.path()).unwrap();
        assert_eq!(route_names(&routes), vec!["/users"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_sibling_is_its_own_route() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "users/get/handler.py");
        std::os::unix::fs::symlink(dir.path().join("users"), dir.path().join("people")).unwrap();

        let routes = discover_api_routes(dir.path()).unwrap();
        assert_eq!(route_names(&routes), vec!["/people", "/users"]);
    }

    #[test]
    fn test_find_layer_directories() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "b_layer/layer.yaml");
        touch(dir.path(), "a_layer/layer.yaml");
        touch(dir.path(), "scratch/notes.txt");

        let layers = find_layer_directories(dir.path()).unwrap();
        assert_eq!(
            layers,
            vec![dir.path().join("a_layer"), dir.path().join("b_layer")]
        );
    }

    #[test]
    fn test_find_layer_directories_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let layers = find_layer_directories(&dir.path().join("layers")).unwrap();
        assert!(layers.is_empty());
    }

    #[test]
    fn test_find_layer_directories_rejects_file() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "layers");
        let err = find_layer_directories(&dir.path().join("layers")).unwrap_err();
        assert!(matches!(err, AppError::NotADirectory { .. }));
    }
}
