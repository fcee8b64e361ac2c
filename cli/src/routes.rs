#![deny(missing_docs)]

//! # Routes Command
//!
//! Prints the route table: one `METHOD /route -> handler` line per method.

use crate::error::CliResult;
use crate::project::ProjectArgs;
use gantry_core::BackendModel;
use std::io::Write;
use std::path::Path;

/// Arguments for the routes command.
#[derive(clap::Args, Debug, Clone)]
pub struct RoutesArgs {
    /// Backend root and parse settings.
    #[clap(flatten)]
    pub project: ProjectArgs,
}

/// Route table lines, sorted by route then method. Handler paths are shown
/// relative to `root` when possible.
pub fn route_table(model: &BackendModel, root: &Path) -> Vec<String> {
    let mut rows: Vec<_> = model
        .api
        .routes
        .iter()
        .flat_map(|route| {
            route
                .methods
                .iter()
                .map(move |m| (route.route.as_str(), m.method, &m.handler_file))
        })
        .collect();
    rows.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    rows.into_iter()
        .map(|(route, method, handler)| {
            let shown = handler.strip_prefix(root).unwrap_or(handler);
            format!("{} {} -> {}", method, route, shown.display())
        })
        .collect()
}

/// Executes the routes command.
pub fn execute(args: &RoutesArgs, out: &mut impl Write) -> CliResult<()> {
    let model = args.project.load()?;
    for line in route_table(&model, &args.project.root) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn method(root: &Path, rel: &str, handler: &str) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(handler), "").unwrap();
        fs::write(dir.join("config.yaml"), "runtime: nodejs20.x\n").unwrap();
    }

    #[test]
    fn test_routes_are_sorted() {
        let dir = tempdir().unwrap();
        method(dir.path(), "api/users/post", "handler.js");
        method(dir.path(), "api/users/get", "handler.js");
        method(dir.path(), "api/books/[isbn]/get", "handler.ts");

        let args = RoutesArgs {
            project: ProjectArgs {
                root: dir.path().to_path_buf(),
                strict: false,
            },
        };
        let mut out = Vec::new();
        execute(&args, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "GET /books/{isbn} -> api/books/[isbn]/get/handler.ts",
                "GET /users -> api/users/get/handler.js",
                "POST /users -> api/users/post/handler.js",
            ]
        );
    }
}
