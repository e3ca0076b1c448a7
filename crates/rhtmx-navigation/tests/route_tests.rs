//! Integration tests for route descriptors and route matching
//!
//! Covers:
//! - Route creation defaults and full paths
//! - Redirect origins and custom serializers
//! - Matched record chains
//! - Immutability of created routes
//! - The START sentinel
//! - Same-route and included-route predicates

use pretty_assertions::assert_eq;
use rhtmx_navigation::*;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

fn route(location: Location) -> Route {
    create_route(None, &location, None, None)
}

// ============================================================================
// Route Creation
// ============================================================================

#[test]
fn test_full_path_is_path_query_hash() {
    let r = route(
        Location::path("/search")
            .with_query_value("q", "a b")
            .with_query_value("page", "2")
            .with_hash("#results"),
    );
    assert_eq!(r.full_path(), "/search?q=a%20b&page=2#results");
    assert_eq!(r.path(), "/search");
    assert_eq!(r.hash(), "#results");
}

#[test]
fn test_full_path_without_query_has_no_question_mark() {
    let r = route(Location::path("/a").with_query_value("gone", QueryValue::Absent));
    assert_eq!(r.full_path(), "/a");
    // the absent key is still carried in the route's query
    assert!(r.query().contains_key("gone"));
}

#[test]
fn test_params_are_kept() {
    let r = route(Location::path("/users/7").with_param("id", "7").with_param("n", 3));
    assert_eq!(r.params().get("id"), Some(&json!("7")));
    assert_eq!(r.params().get("n"), Some(&json!(3)));
}

#[test]
fn test_redirected_from_uses_its_own_full_path() {
    let from = Location::path("/old")
        .with_query_value("ref", "mail")
        .with_hash("#x");
    let r = create_route(None, &Location::path("/new"), Some(&from), None);

    assert_eq!(r.full_path(), "/new");
    assert_eq!(r.redirected_from(), Some("/old?ref=mail#x"));
}

#[test]
fn test_no_redirect_means_no_origin() {
    assert_eq!(route(Location::path("/a")).redirected_from(), None);
}

#[test]
fn test_options_serializer_is_used() {
    let options = RouterOptions::new().with_stringify_query(|query: &QueryMap| {
        let body: Vec<String> = query
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| format!("{k}:{v}")))
            .collect();
        if body.is_empty() {
            String::new()
        } else {
            format!("?{}", body.join(";"))
        }
    });

    let r = create_route(
        None,
        &Location::path("/a").with_query_value("x", "1").with_query_value("y", "2"),
        None,
        Some(&options),
    );
    assert_eq!(r.full_path(), "/a?x:1;y:2");
    // the query itself is untouched by the serializer
    assert_eq!(r.query().get("x"), Some(&QueryValue::from("1")));
}

// ============================================================================
// Matched Records
// ============================================================================

#[test]
fn test_matched_empty_without_record() {
    assert!(route(Location::path("/foo")).matched().is_empty());
}

#[test]
fn test_matched_root_to_leaf() {
    let root = RouteRecord::new("/").with_name("root").into_shared();
    let child = RouteRecord::new("/child")
        .with_name("child")
        .with_meta("title", "Child")
        .with_parent(Arc::clone(&root))
        .into_shared();

    let r = create_route(Some(&child), &Location::path("/"), None, None);

    assert_eq!(r.matched().len(), 2);
    assert!(Arc::ptr_eq(&r.matched()[0], &root));
    assert!(Arc::ptr_eq(&r.matched()[1], &child));
    assert_eq!(r.name(), Some("child"));
    assert_eq!(r.meta().get("title"), Some(&json!("Child")));
}

// ============================================================================
// Immutability
// ============================================================================

#[test]
fn test_route_query_is_a_copy() {
    let mut location = Location::path("/a").with_query_value("x", "1");
    let r = create_route(None, &location, None, None);

    location = location.with_query_value("x", "changed");
    assert_eq!(location.query.as_ref().and_then(|q| q.get("x")), Some(&QueryValue::from("changed")));

    assert_eq!(r.query().get("x"), Some(&QueryValue::from("1")));
    assert_eq!(r.full_path(), "/a?x=1");
}

#[test]
fn test_mutating_a_read_copy_has_no_effect() {
    let r = route(Location::path("/a").with_query_value("x", "1"));

    let mut copy = r.query().clone();
    copy.insert("x", "2");
    copy.insert("y", "3");

    assert_eq!(r.query(), &QueryMap::new().with("x", "1"));
    assert_eq!(r.full_path(), "/a?x=1");
}

// ============================================================================
// START Sentinel
// ============================================================================

#[test]
fn test_start_sentinel_identity() {
    assert!(is_same_route(start(), Some(start())));
    assert!(is_same_route(&*START, Some(&*START)));

    let lookalike = route(Location::path("/"));
    assert!(!is_same_route(&lookalike, Some(start())));
}

#[test]
fn test_start_as_left_side_compares_structurally() {
    let root = route(Location::path("/"));
    assert!(is_same_route(start(), Some(&root)));
}

#[test]
fn test_start_shape() {
    assert_eq!(START.path(), "/");
    assert_eq!(START.full_path(), "/");
    assert!(START.matched().is_empty());
    assert!(START.is_start());
}

// ============================================================================
// Same Route
// ============================================================================

#[test]
fn test_same_route_absent_other() {
    assert!(!is_same_route(&route(Location::path("/a")), None));
}

#[rstest]
#[case("/a/", "/a", true)]
#[case("/a", "/a/", true)]
#[case("/a", "/a", true)]
#[case("/a//", "/a", false)]
#[case("/a", "/b", false)]
fn test_same_route_trailing_slash(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
    assert_eq!(
        is_same_route(&route(Location::path(a)), Some(&route(Location::path(b)))),
        expected
    );
}

#[test]
fn test_same_route_requires_same_hash() {
    let a = route(Location::path("/a").with_hash("#x"));
    let b = route(Location::path("/a").with_hash("#y"));
    assert!(!is_same_route(&a, Some(&b)));
}

#[test]
fn test_same_route_query_order_does_not_matter() {
    let a = route(Location::path("/a").with_query_value("x", "1").with_query_value("y", "2"));
    let b = route(Location::path("/a").with_query_value("y", "2").with_query_value("x", "1"));
    assert!(is_same_route(&a, Some(&b)));
}

#[test]
fn test_same_route_query_values_matter() {
    let a = route(Location::path("/a").with_query_value("x", "1"));
    let b = route(Location::path("/a").with_query_value("x", "2"));
    assert!(!is_same_route(&a, Some(&b)));
}

#[test]
fn test_same_route_ignores_params_when_paths_present() {
    let a = route(Location::path("/a").with_param("id", 1));
    let b = route(Location::path("/a").with_param("id", 2));
    assert!(is_same_route(&a, Some(&b)));
}

// ============================================================================
// Included Route
// ============================================================================

#[test]
fn test_included_prefix_and_query_keys_only() {
    let current = route(
        Location::path("/a/b")
            .with_query_value("x", "1")
            .with_query_value("y", "2"),
    );
    let target = route(Location::path("/a").with_query_value("x", "9"));
    assert!(is_included_route(&current, &target));
}

#[test]
fn test_included_missing_query_key() {
    let current = route(Location::path("/a/b").with_query_value("x", "1"));
    let target = route(Location::path("/a").with_query_value("z", "1"));
    assert!(!is_included_route(&current, &target));
}

#[rstest]
#[case("#h", "#h", true)]
#[case("#h", "", true)]
#[case("#h", "#other", false)]
#[case("", "#h", false)]
fn test_included_hash(#[case] current_hash: &str, #[case] target_hash: &str, #[case] expected: bool) {
    let current = route(Location::path("/a/b").with_hash(current_hash));
    let target = route(Location::path("/a").with_hash(target_hash));
    assert_eq!(is_included_route(&current, &target), expected);
}

#[rstest]
#[case("/a/b", "/a", true)]
#[case("/a/b/", "/a/", true)]
#[case("/a", "/a/", true)]
#[case("/ab", "/a", false)]
#[case("/a", "/a/b", false)]
#[case("/anything", "/", true)]
fn test_included_path_prefix(#[case] current: &str, #[case] target: &str, #[case] expected: bool) {
    assert_eq!(
        is_included_route(&route(Location::path(current)), &route(Location::path(target))),
        expected
    );
}
