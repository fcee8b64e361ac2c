//! # Route Segments
//!
//! Turns directory names into route path segments. A directory named
//! `[name]` becomes the parameter `{name}`; every other name is kept verbatim.
//!
//! Malformed bracket forms (`[id`, `id]`, `[]`, `[a[b]]`, `a[b]`) are not
//! parameters and pass through unchanged.

use regex::Regex;
use std::sync::OnceLock;

const PARAM_SEGMENT_PATTERN: &str = r"^\[([^\[\]]+)\]$";

fn param_segment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PARAM_SEGMENT_PATTERN).expect("Invalid regex"))
}

/// Converts one directory name into its route segment.
pub fn convert_segment(name: &str) -> String {
    match param_segment_regex().captures(name) {
        Some(caps) => format!("{{{}}}", &caps[1]),
        None => name.to_string(),
    }
}

/// Builds a route string from the directory names between the api root and
/// a route directory. No names means the root route `/`.
pub fn route_from_segments<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut route = String::new();
    for name in names {
        route.push('/');
        route.push_str(&convert_segment(name.as_ref()));
    }
    if route.is_empty() {
        route.push('/');
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("[id]", "{id}")]
    #[case("[user_id]", "{user_id}")]
    #[case("users", "users")]
    #[case("{mood}", "{mood}")]
    #[case("[id", "[id")]
    #[case("id]", "id]")]
    #[case("[]", "[]")]
    #[case("[a[b]]", "[a[b]]")]
    #[case("a[b]", "a[b]")]
    #[case("[a][b]", "[a][b]")]
    fn test_convert_segment(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(convert_segment(name), expected);
    }

    #[test]
    fn test_route_from_segments() {
        assert_eq!(route_from_segments(["add", "[a]", "[b]"]), "/add/{a}/{b}");
        assert_eq!(route_from_segments(Vec::<String>::new()), "/");
        assert_eq!(route_from_segments(["hello"]), "/hello");
    }

    #[test]
    fn test_route_from_segments_preserves_order_and_count() {
        let names = ["v1", "[org]", "teams", "[team]", "members"];
        let route = route_from_segments(names);
        let segments: Vec<&str> = route.trim_start_matches('/').split('/').collect();
        assert_eq!(segments.len(), names.len());
        assert_eq!(segments, vec!["v1", "{org}", "teams", "{team}", "members"]);
    }
}
