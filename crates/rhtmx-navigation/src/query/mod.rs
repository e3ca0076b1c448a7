/// Query-string codec
///
/// Converts between the query portion of a URL and an ordered key/value mapping.
///
/// # Value Shapes
///
/// A query value is one of:
/// - `Absent`: key is suppressed on output (`?` never shows it)
/// - `Null`: key is present without `=value` (`?flag`)
/// - `Value`: a plain `key=value` pair
/// - `List`: repeated keys, each entry following the same rules
///
/// Parsing collapses repeated keys into a `List` in first-seen order.
/// A key seen once stays a scalar (`Value`, or `Null` when there was no `=`).
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use tracing::warn;

use crate::error::{DecodeError, QueryError};

pub mod encoding;

use encoding::{decode, encode};

// ============================================================================
// Core Types
// ============================================================================

/// A single element of a repeated query key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEntry {
    /// Dropped on output
    Absent,
    /// Emitted as a bare key
    Null,
    /// Emitted as `key=value`
    Value(String),
}

/// A query value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Key is suppressed on output
    Absent,
    /// Key is present without a value
    Null,
    /// Scalar string value
    Value(String),
    /// Repeated key, in appearance order
    List(Vec<QueryEntry>),
}

impl QueryValue {
    /// Returns the scalar string, if this is a `Value`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Value(s) => Some(s),
            _ => None,
        }
    }

    /// Converts an optional parsed value into its scalar form
    fn from_parsed(value: Option<String>) -> Self {
        value.map_or(QueryValue::Null, QueryValue::Value)
    }
}

impl From<Option<String>> for QueryEntry {
    fn from(value: Option<String>) -> Self {
        value.map_or(QueryEntry::Null, QueryEntry::Value)
    }
}

impl From<&str> for QueryEntry {
    fn from(s: &str) -> Self {
        QueryEntry::Value(s.to_string())
    }
}

impl From<String> for QueryEntry {
    fn from(s: String) -> Self {
        QueryEntry::Value(s)
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Value(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Value(s)
    }
}

impl From<Vec<QueryEntry>> for QueryValue {
    fn from(entries: Vec<QueryEntry>) -> Self {
        QueryValue::List(entries)
    }
}

/// Insertion-ordered query mapping
///
/// Keys keep the position of their first insertion; re-inserting a key
/// replaces its value in place.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::{QueryMap, QueryValue};
///
/// let query = QueryMap::new()
///     .with("page", "2")
///     .with("debug", QueryValue::Null);
///
/// assert_eq!(query.get("page"), Some(&QueryValue::from("2")));
/// assert_eq!(query.keys().collect::<Vec<_>>(), vec!["page", "debug"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: Vec<(String, QueryValue)>,
}

impl QueryMap {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`QueryMap::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Option<QueryValue> {
        let key = key.into();
        let value = value.into();

        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.position(key).map(|index| self.entries.remove(index).1)
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copies every entry of `other` over this mapping; `other` wins on collision
    pub fn overlay(&mut self, other: &QueryMap) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }

    /// Records one parsed occurrence of `key`
    ///
    /// First occurrence stores a scalar, the second turns it into a
    /// two-element list, later ones append.
    fn append_parsed(&mut self, key: String, value: Option<String>) {
        match self.position(&key) {
            None => self.entries.push((key, QueryValue::from_parsed(value))),
            Some(index) => {
                let slot = &mut self.entries[index].1;
                *slot = match std::mem::replace(slot, QueryValue::Absent) {
                    QueryValue::List(mut entries) => {
                        entries.push(value.into());
                        QueryValue::List(entries)
                    }
                    QueryValue::Value(existing) => {
                        QueryValue::List(vec![QueryEntry::Value(existing), value.into()])
                    }
                    QueryValue::Null => QueryValue::List(vec![QueryEntry::Null, value.into()]),
                    QueryValue::Absent => QueryValue::from_parsed(value),
                };
            }
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryMap
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(QueryMap::new(), |map, (k, v)| map.with(k, v))
    }
}

impl Serialize for QueryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryEntry::Absent | QueryEntry::Null => serializer.serialize_none(),
            QueryEntry::Value(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for QueryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryValue::Absent | QueryValue::Null => serializer.serialize_none(),
            QueryValue::Value(s) => serializer.serialize_str(s),
            QueryValue::List(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for entry in entries {
                    seq.serialize_element(entry)?;
                }
                seq.end()
            }
        }
    }
}

/// Absent keys are skipped, the same way they are skipped in the query string
impl Serialize for QueryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present: Vec<_> = self
            .iter()
            .filter(|(_, v)| !matches!(v, QueryValue::Absent))
            .collect();

        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (key, value) in present {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Strategy Traits
// ============================================================================

/// Pluggable query-string parser: `(raw) -> mapping`
///
/// Implemented for any matching closure or function.
pub trait QueryParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<QueryMap, QueryError>;
}

impl<F> QueryParser for F
where
    F: Fn(&str) -> Result<QueryMap, QueryError> + Send + Sync,
{
    fn parse(&self, raw: &str) -> Result<QueryMap, QueryError> {
        self(raw)
    }
}

/// Pluggable query serializer: `(mapping) -> string`
///
/// The result is appended to the path verbatim, so it carries its own `?`.
pub trait QuerySerializer: Send + Sync {
    fn stringify(&self, query: &QueryMap) -> String;
}

impl<F> QuerySerializer for F
where
    F: Fn(&QueryMap) -> String + Send + Sync,
{
    fn stringify(&self, query: &QueryMap) -> String {
        self(query)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a raw query string into an ordered mapping
///
/// # Rules
///
/// 1. Trim, then strip one leading `?`, `#` or `&`
/// 2. Split on `&`, skipping empty segments
/// 3. `+` becomes a space, then split on the first `=`
/// 4. No `=` means the value is `Null`; `a=` means an empty string
/// 5. Repeated keys collapse into a `List` in appearance order
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::{parse_query, QueryEntry, QueryValue};
///
/// let query = parse_query("?a=1&a=2&flag").unwrap();
/// assert_eq!(
///     query.get("a"),
///     Some(&QueryValue::List(vec![QueryEntry::from("1"), QueryEntry::from("2")]))
/// );
/// assert_eq!(query.get("flag"), Some(&QueryValue::Null));
/// ```
pub fn parse_query(raw: &str) -> Result<QueryMap, DecodeError> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix(['?', '#', '&'])
        .unwrap_or(trimmed);

    body.split('&')
        .filter(|segment| !segment.is_empty())
        .try_fold(QueryMap::new(), |mut query, segment| -> Result<QueryMap, DecodeError> {
            let segment = segment.replace('+', " ");
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (decode(key)?, Some(decode(value)?.into_owned())),
                None => (decode(&segment)?, None),
            };
            query.append_parsed(key.into_owned(), value);
            Ok(query)
        })
}

/// Parses `raw` and overlays `extra` on top of it
///
/// Never fails: a parser error is logged as a warning and the parsed part
/// is replaced by an empty mapping. Entries of `extra` always win.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::{resolve_query, QueryMap, QueryValue};
///
/// let extra = QueryMap::new().with("b", "override");
/// let query = resolve_query(Some("a=1&b=2"), Some(&extra), None);
///
/// assert_eq!(query.get("a"), Some(&QueryValue::from("1")));
/// assert_eq!(query.get("b"), Some(&QueryValue::from("override")));
///
/// // malformed input degrades to the extra entries only
/// let query = resolve_query(Some("a=%zz"), Some(&extra), None);
/// assert_eq!(query.len(), 1);
/// ```
pub fn resolve_query(
    raw: Option<&str>,
    extra: Option<&QueryMap>,
    parser: Option<&dyn QueryParser>,
) -> QueryMap {
    let raw = raw.unwrap_or_default();
    let parsed = match parser {
        Some(parser) => parser.parse(raw),
        None => parse_query(raw).map_err(QueryError::from),
    };

    let mut query = parsed.unwrap_or_else(|err| {
        warn!(error = %err, query = raw, "failed to parse query string, ignoring it");
        QueryMap::new()
    });

    if let Some(extra) = extra {
        query.overlay(extra);
    }
    query
}

// ============================================================================
// Serialization
// ============================================================================

/// Serializes a mapping into a canonical query string
///
/// Returns `""` when nothing would be emitted (never a bare `?`),
/// otherwise the body prefixed with `?`.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::{stringify_query, QueryEntry, QueryMap, QueryValue};
///
/// let query = QueryMap::new()
///     .with("q", "rust lang")
///     .with("tag", vec![QueryEntry::from("x"), QueryEntry::Null, QueryEntry::Absent])
///     .with("skip", QueryValue::Absent);
///
/// assert_eq!(stringify_query(&query), "?q=rust%20lang&tag=x&tag");
/// assert_eq!(stringify_query(&QueryMap::new()), "");
/// ```
pub fn stringify_query(query: &QueryMap) -> String {
    let body = query
        .iter()
        .map(|(key, value)| render_value(key, value))
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("&");

    if body.is_empty() {
        String::new()
    } else {
        format!("?{}", body)
    }
}

fn render_value(key: &str, value: &QueryValue) -> String {
    match value {
        QueryValue::Absent => String::new(),
        QueryValue::Null => encode(key).into_owned(),
        QueryValue::Value(v) => render_pair(key, v),
        QueryValue::List(entries) => entries
            .iter()
            .filter_map(|entry| match entry {
                QueryEntry::Absent => None,
                QueryEntry::Null => Some(encode(key).into_owned()),
                QueryEntry::Value(v) => Some(render_pair(key, v)),
            })
            .collect::<Vec<_>>()
            .join("&"),
    }
}

fn render_pair(key: &str, value: &str) -> String {
    format!("{}={}", encode(key), encode(value))
}
