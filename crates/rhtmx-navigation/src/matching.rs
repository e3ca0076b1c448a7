/// Route comparison predicates
///
/// - [`is_same_route`]: do two descriptors point at the same place
/// - [`is_included_route`]: is one descriptor "inside" another (active links)
///
/// # Loose Equality
///
/// Query and params comparison is intentionally loose: leaf values are
/// compared by their canonical string form, so the number `1` equals the
/// string `"1"`, and `null` equals the string `"null"`. Only object-like
/// values (`null`, lists, maps) are compared structurally. Route matching
/// consumers rely on `{"id": 1}` and `{"id": "1"}` being the same params.
use std::borrow::Cow;

use serde_json::Value;

use crate::location::Params;
use crate::path::{is_path_prefix, strip_trailing_slash};
use crate::query::{QueryEntry, QueryMap, QueryValue};
use crate::route::Route;

/// Uniform view over query values and JSON values for loose comparison
#[derive(Debug)]
enum Loose<'a> {
    Undefined,
    Null,
    /// Any non-object leaf, already in canonical string form
    Scalar(Cow<'a, str>),
    Array(Vec<Loose<'a>>),
    Object(Vec<(&'a str, Loose<'a>)>),
}

impl<'a> Loose<'a> {
    fn from_query(query: &'a QueryMap) -> Self {
        Loose::Object(
            query
                .iter()
                .map(|(key, value)| (key, Loose::from_query_value(value)))
                .collect(),
        )
    }

    fn from_query_value(value: &'a QueryValue) -> Self {
        match value {
            QueryValue::Absent => Loose::Undefined,
            QueryValue::Null => Loose::Null,
            QueryValue::Value(s) => Loose::Scalar(Cow::Borrowed(s)),
            QueryValue::List(entries) => {
                Loose::Array(entries.iter().map(Loose::from_query_entry).collect())
            }
        }
    }

    fn from_query_entry(entry: &'a QueryEntry) -> Self {
        match entry {
            QueryEntry::Absent => Loose::Undefined,
            QueryEntry::Null => Loose::Null,
            QueryEntry::Value(s) => Loose::Scalar(Cow::Borrowed(s)),
        }
    }

    fn from_params(params: &'a Params) -> Self {
        Loose::Object(
            params
                .iter()
                .map(|(key, value)| (key.as_str(), Loose::from_json(value)))
                .collect(),
        )
    }

    fn from_json(value: &'a Value) -> Self {
        match value {
            Value::Null => Loose::Null,
            Value::Bool(b) => Loose::Scalar(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Number(n) => Loose::Scalar(Cow::Owned(number_string(n))),
            Value::String(s) => Loose::Scalar(Cow::Borrowed(s)),
            Value::Array(items) => Loose::Array(items.iter().map(Loose::from_json).collect()),
            Value::Object(map) => Loose::Object(
                map.iter()
                    .map(|(key, value)| (key.as_str(), Loose::from_json(value)))
                    .collect(),
            ),
        }
    }

    fn is_object(&self) -> bool {
        matches!(self, Loose::Null | Loose::Array(_) | Loose::Object(_))
    }

    fn keys(&self) -> Vec<Cow<'a, str>> {
        match self {
            Loose::Array(items) => (0..items.len()).map(|i| Cow::Owned(i.to_string())).collect(),
            Loose::Object(entries) => entries.iter().map(|(k, _)| Cow::Borrowed(*k)).collect(),
            _ => Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&Loose<'a>> {
        match self {
            Loose::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            Loose::Object(entries) => entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Canonical string form of a possibly-missing value
fn loose_string<'a>(value: Option<&Loose<'a>>) -> Cow<'a, str> {
    match value {
        None | Some(Loose::Undefined) => Cow::Borrowed("undefined"),
        Some(Loose::Null) => Cow::Borrowed("null"),
        Some(Loose::Scalar(s)) => s.clone(),
        // list entries that are null or missing render as empty strings
        Some(Loose::Array(items)) => Cow::Owned(
            items
                .iter()
                .map(|item| match item {
                    Loose::Undefined | Loose::Null => Cow::Borrowed(""),
                    other => loose_string(Some(other)),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(Loose::Object(_)) => Cow::Borrowed("[object Object]"),
    }
}

/// Numbers print without a fractional part when they have none
fn number_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Structural comparison of two object-like values
fn loose_object_equal(a: &Loose<'_>, b: &Loose<'_>) -> bool {
    match (a, b) {
        (Loose::Null, Loose::Null) => true,
        (Loose::Null, _) | (_, Loose::Null) => false,
        _ => {
            let keys = a.keys();
            if keys.len() != b.keys().len() {
                return false;
            }

            keys.iter().all(|key| {
                let (a_val, b_val) = (a.get(key), b.get(key));
                match (a_val, b_val) {
                    (Some(x), Some(y)) if x.is_object() && y.is_object() => loose_object_equal(x, y),
                    _ => loose_string(a_val) == loose_string(b_val),
                }
            })
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn strict_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Deep, loosely-typed equality of two JSON-like values
///
/// Missing values default to an empty object. If either side is falsy
/// (`null`, `false`, `0`, `""`) both must be the same falsy value.
/// Otherwise objects and arrays are compared key by key, and leaves are
/// compared by their canonical string form. There is no cycle protection,
/// which JSON values cannot need.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::is_object_equal;
/// use serde_json::json;
///
/// assert!(is_object_equal(Some(&json!({"id": 1})), Some(&json!({"id": "1"}))));
/// assert!(is_object_equal(None, Some(&json!({}))));
/// assert!(!is_object_equal(Some(&json!(null)), Some(&json!({}))));
/// assert!(!is_object_equal(Some(&json!({"a": [1, 2]})), Some(&json!({"a": [1]}))));
/// ```
pub fn is_object_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    let empty = Value::Object(Default::default());
    let a = a.unwrap_or(&empty);
    let b = b.unwrap_or(&empty);

    if is_falsy(a) || is_falsy(b) {
        return strict_equal(a, b);
    }

    let (a, b) = (Loose::from_json(a), Loose::from_json(b));
    if a.is_object() && b.is_object() {
        loose_object_equal(&a, &b)
    } else {
        loose_string(Some(&a)) == loose_string(Some(&b))
    }
}

/// Loose equality of two query mappings
///
/// An `Absent` value still counts as a key and compares as the string
/// `"undefined"`; `Null` compares equal to the string `"null"`.
pub fn is_query_equal(a: &QueryMap, b: &QueryMap) -> bool {
    loose_object_equal(&Loose::from_query(a), &Loose::from_query(b))
}

/// Loose equality of two params mappings
pub fn is_params_equal(a: &Params, b: &Params) -> bool {
    loose_object_equal(&Loose::from_params(a), &Loose::from_params(b))
}

/// Checks whether two routes describe the same navigation target
///
/// - Against [`crate::START`], only the sentinel itself is equal
/// - With paths on both sides: paths (ignoring one trailing slash), hash and query
/// - With names on both sides: name, hash, query and params
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::{create_route, is_same_route, start, Location};
///
/// let a = create_route(None, &Location::path("/a/"), None, None);
/// let b = create_route(None, &Location::path("/a"), None, None);
/// assert!(is_same_route(&a, Some(&b)));
///
/// let root = create_route(None, &Location::path("/"), None, None);
/// assert!(!is_same_route(&root, Some(start())));
/// assert!(is_same_route(start(), Some(start())));
/// ```
pub fn is_same_route(a: &Route, b: Option<&Route>) -> bool {
    let Some(b) = b else {
        return false;
    };

    if b.is_start() {
        return std::ptr::eq(a, b);
    }

    if !a.path().is_empty() && !b.path().is_empty() {
        strip_trailing_slash(a.path()) == strip_trailing_slash(b.path())
            && a.hash() == b.hash()
            && is_query_equal(a.query(), b.query())
    } else if let (Some(a_name), Some(b_name)) = (a.name(), b.name()) {
        a_name == b_name
            && a.hash() == b.hash()
            && is_query_equal(a.query(), b.query())
            && is_params_equal(a.params(), b.params())
    } else {
        false
    }
}

/// Checks whether every key of `target` is present in `current`
///
/// Values are not compared.
pub fn query_includes(current: &QueryMap, target: &QueryMap) -> bool {
    target.keys().all(|key| current.contains_key(key))
}

/// Checks whether `current` lies inside `target` ("is this link active")
///
/// True when the path of `current` starts with the path of `target`
/// (trailing slashes normalized), the hash matches when `target` has one,
/// and every query key of `target` appears in `current`.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::{create_route, is_included_route, Location};
///
/// let current = create_route(
///     None,
///     &Location::path("/a/b").with_query_value("x", "1").with_query_value("y", "2"),
///     None,
///     None,
/// );
/// let target = create_route(None, &Location::path("/a").with_query_value("x", "9"), None, None);
///
/// assert!(is_included_route(&current, &target));
/// assert!(!is_included_route(&target, &current));
/// ```
pub fn is_included_route(current: &Route, target: &Route) -> bool {
    is_path_prefix(current.path(), target.path())
        && (target.hash().is_empty() || current.hash() == target.hash())
        && query_includes(current.query(), target.query())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(pairs: &[(&str, QueryValue)]) -> QueryMap {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_query_equal_ignores_order() {
        let a = query(&[("a", "1".into()), ("b", "2".into())]);
        let b = query(&[("b", "2".into()), ("a", "1".into())]);
        assert!(is_query_equal(&a, &b));
    }

    #[test]
    fn test_query_equal_key_count() {
        let a = query(&[("a", "1".into())]);
        let b = query(&[("a", "1".into()), ("b", QueryValue::Absent)]);
        assert!(!is_query_equal(&a, &b));
    }

    #[test]
    fn test_query_null_vs_string_null() {
        let a = query(&[("a", QueryValue::Null)]);
        let b = query(&[("a", "null".into())]);
        assert!(is_query_equal(&a, &b));
    }

    #[test]
    fn test_query_null_vs_list() {
        let a = query(&[("a", QueryValue::Null)]);
        let b = query(&[("a", QueryValue::List(vec![]))]);
        assert!(!is_query_equal(&a, &b));
    }

    #[test]
    fn test_query_lists_compared_by_position() {
        let a = query(&[("a", vec![QueryEntry::from("1"), QueryEntry::from("2")].into())]);
        let b = query(&[("a", vec![QueryEntry::from("2"), QueryEntry::from("1")].into())]);
        let c = query(&[("a", vec![QueryEntry::from("1"), QueryEntry::from("2")].into())]);
        assert!(!is_query_equal(&a, &b));
        assert!(is_query_equal(&a, &c));
    }

    #[test]
    fn test_query_list_vs_scalar_uses_joined_string() {
        let a = query(&[("a", vec![QueryEntry::from("1"), QueryEntry::from("2")].into())]);
        let b = query(&[("a", "1,2".into())]);
        assert!(is_query_equal(&a, &b));
    }

    #[test]
    fn test_params_numeric_and_string_equal() {
        let mut a = Params::new();
        a.insert("id".to_string(), json!(1));
        let mut b = Params::new();
        b.insert("id".to_string(), json!("1"));
        assert!(is_params_equal(&a, &b));

        b.insert("id".to_string(), json!("2"));
        assert!(!is_params_equal(&a, &b));
    }

    #[test]
    fn test_object_equal_nested() {
        assert!(is_object_equal(
            Some(&json!({"a": {"b": [1, null]}})),
            Some(&json!({"a": {"b": ["1", null]}}))
        ));
        assert!(!is_object_equal(
            Some(&json!({"a": {"b": 1}})),
            Some(&json!({"a": {"c": 1}}))
        ));
    }

    #[test]
    fn test_object_equal_falsy() {
        assert!(is_object_equal(Some(&json!(null)), Some(&json!(null))));
        assert!(!is_object_equal(Some(&json!(null)), None));
        assert!(is_object_equal(Some(&json!(0)), Some(&json!(0.0))));
        assert!(!is_object_equal(Some(&json!("")), Some(&json!(false))));
    }

    #[test]
    fn test_object_equal_float_without_fraction() {
        assert!(is_object_equal(Some(&json!({"n": 2.0})), Some(&json!({"n": "2"}))));
        assert!(is_object_equal(Some(&json!({"n": 2.5})), Some(&json!({"n": "2.5"}))));
    }

    #[test]
    fn test_object_vs_scalar_leaf() {
        assert!(is_object_equal(
            Some(&json!({"a": {}})),
            Some(&json!({"a": "[object Object]"}))
        ));
    }

    #[test]
    fn test_query_includes_keys_only() {
        let current = query(&[("x", "1".into()), ("y", QueryValue::Absent)]);
        assert!(query_includes(&current, &query(&[("x", "other".into())])));
        assert!(query_includes(&current, &query(&[("y", "1".into())])));
        assert!(!query_includes(&current, &query(&[("z", "1".into())])));
        assert!(query_includes(&current, &QueryMap::new()));
    }
}
