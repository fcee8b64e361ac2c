//! Stage spans must nest the same way on every rayon thread. Lives in its own
//! test binary because it installs the global subscriber.

use gantry_core::parse_backend;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

struct Stage(String);

#[derive(Default)]
struct StageVisitor(Option<String>);

impl Visit for StageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "stage" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "stage" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

/// Records, for every event, the `stage` of each enclosing span from the root.
#[derive(Clone, Default)]
struct StageScopes(Arc<Mutex<Vec<Vec<String>>>>);

impl<S> Layer<S> for StageScopes
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = StageVisitor::default();
        attrs.record(&mut visitor);
        if let (Some(stage), Some(span)) = (visitor.0, ctx.span(id)) {
            span.extensions_mut().insert(Stage(stage));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let Some(scope) = ctx.event_scope(event) else {
            return;
        };
        let stages = scope
            .from_root()
            .filter_map(|span| span.extensions().get::<Stage>().map(|s| s.0.clone()))
            .collect();
        self.0.lock().unwrap().push(stages);
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_stage_spans_nest_across_pool_threads() {
    let scopes = StageScopes::default();
    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(scopes.clone()))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    for route in ["users", "users/[id]", "orders", "orders/[id]", "health"] {
        for method in ["get", "post", "delete"] {
            write(dir.path(), &format!("api/{route}/{method}/handler.py"), "");
            write(
                dir.path(),
                &format!("api/{route}/{method}/config.yaml"),
                "runtime: python3.11\n",
            );
        }
    }
    for layer in ["auth", "db", "emoji"] {
        write(
            dir.path(),
            &format!("layers/{layer}/layer.yaml"),
            "runtimes: [python3.11]\n",
        );
    }

    parse_backend(dir.path()).unwrap();

    let recorded = scopes.0.lock().unwrap().clone();
    let method_events: Vec<_> = recorded
        .iter()
        .filter(|s| s.last().map(String::as_str) == Some("method"))
        .collect();
    let layer_events: Vec<_> = recorded
        .iter()
        .filter(|s| s.last().map(String::as_str) == Some("layer"))
        .collect();

    assert_eq!(method_events.len(), 15);
    assert_eq!(layer_events.len(), 3);
    for stages in method_events {
        assert_eq!(stages, &vec!["backend", "api", "method"]);
    }
    for stages in layer_events {
        assert_eq!(stages, &vec!["backend", "layers", "layer"]);
    }
}
