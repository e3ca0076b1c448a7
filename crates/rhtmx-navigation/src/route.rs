/// Route descriptors
///
/// A [`Route`] is the frozen answer to "where is navigation": path, query,
/// hash, params and the matched record chain, plus the canonical full path.
///
/// # Immutability
///
/// Fields are private and there are no setters. `Route` also does not
/// implement `Clone`: the [`START`] sentinel is compared by identity, and a
/// structural copy of it must never be mistaken for it. Share routes through
/// references or `Arc<Route>` instead.
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::trace;

use crate::location::{Location, Params};
use crate::options::RouterOptions;
use crate::query::{stringify_query, QueryMap, QuerySerializer};
use crate::record::{format_match, Meta, RouteRecord};

/// The route representing the state before any navigation happened
///
/// Created once, on first access. Compare against it with
/// [`Route::is_start`] or [`crate::is_same_route`], never structurally.
pub static START: Lazy<Route> = Lazy::new(|| create_route(None, &Location::path("/"), None, None));

/// Returns the [`START`] sentinel
pub fn start() -> &'static Route {
    &START
}

/// An immutable, resolved navigation target
#[derive(Debug)]
pub struct Route {
    name: Option<String>,
    meta: Meta,
    path: String,
    hash: String,
    query: QueryMap,
    params: Params,
    full_path: String,
    matched: Vec<Arc<RouteRecord>>,
    redirected_from: Option<String>,
}

impl Route {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn query(&self) -> &QueryMap {
        &self.query
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// `path + serialized query + hash`
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// Matched records, root first
    pub fn matched(&self) -> &[Arc<RouteRecord>] {
        &self.matched
    }

    /// Full path of the original request, when this route is the result of a redirect
    pub fn redirected_from(&self) -> Option<&str> {
        self.redirected_from.as_deref()
    }

    /// Checks whether this is the [`START`] sentinel itself
    pub fn is_start(&self) -> bool {
        std::ptr::eq(self, start())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path)
    }
}

/// Snapshot for debugging tools; matched records appear as their paths
impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let matched: Vec<&str> = self.matched.iter().map(|r| r.path.as_str()).collect();

        let mut state = serializer.serialize_struct("Route", 9)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("meta", &self.meta)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("hash", &self.hash)?;
        state.serialize_field("query", &self.query)?;
        state.serialize_field("params", &self.params)?;
        state.serialize_field("fullPath", &self.full_path)?;
        state.serialize_field("matched", &matched)?;
        state.serialize_field("redirectedFrom", &self.redirected_from)?;
        state.end()
    }
}

/// Computes `path + serializer(query) + hash` for a raw location
///
/// Missing or empty paths become `/`; `None` serializer means [`stringify_query`].
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::{get_full_path, Location};
///
/// let location = Location::path("/search")
///     .with_query_value("q", "a b")
///     .with_hash("#top");
/// assert_eq!(get_full_path(&location, None), "/search?q=a%20b#top");
///
/// assert_eq!(get_full_path(&Location::default(), None), "/");
/// ```
pub fn get_full_path(location: &Location, serializer: Option<&dyn QuerySerializer>) -> String {
    let empty = QueryMap::new();
    let query = location.query.as_ref().unwrap_or(&empty);
    let query_string = match serializer {
        Some(serializer) => serializer.stringify(query),
        None => stringify_query(query),
    };

    format!(
        "{}{}{}",
        non_empty(location.path.as_deref()).unwrap_or("/"),
        query_string,
        location.hash.as_deref().unwrap_or_default()
    )
}

/// Builds a frozen route from a resolved record and the raw request
///
/// # Defaults
///
/// - `path`: `/` when missing or empty
/// - `hash`: empty
/// - `query`, `params`: empty mappings; the query is copied, never shared
/// - `name`: from the location, else from the record
/// - `meta`: from the record, else empty
///
/// `redirected_from` is rendered to its own full path. The serializer is
/// taken from `options` when one is configured.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::{create_route, Location, RouteRecord};
///
/// let parent = RouteRecord::new("/users").into_shared();
/// let record = RouteRecord::new("/users/:id")
///     .with_name("user")
///     .with_parent(parent)
///     .into_shared();
///
/// let route = create_route(
///     Some(&record),
///     &Location::path("/users/7").with_query_value("tab", "posts"),
///     Some(&Location::path("/u/7")),
///     None,
/// );
///
/// assert_eq!(route.name(), Some("user"));
/// assert_eq!(route.full_path(), "/users/7?tab=posts");
/// assert_eq!(route.redirected_from(), Some("/u/7"));
/// assert_eq!(route.matched().len(), 2);
/// ```
pub fn create_route(
    record: Option<&Arc<RouteRecord>>,
    location: &Location,
    redirected_from: Option<&Location>,
    options: Option<&RouterOptions>,
) -> Route {
    let serializer = options.and_then(RouterOptions::serializer);

    let full_path = get_full_path(location, serializer);
    trace!(full_path = %full_path, "creating route");

    Route {
        name: non_empty(location.name.as_deref())
            .or_else(|| record.and_then(|r| r.name.as_deref()))
            .map(str::to_string),
        meta: record.map(|r| r.meta.clone()).unwrap_or_default(),
        path: non_empty(location.path.as_deref()).unwrap_or("/").to_string(),
        hash: location.hash.clone().unwrap_or_default(),
        query: location.query.clone().unwrap_or_default(),
        params: location.params.clone().unwrap_or_default(),
        full_path,
        matched: format_match(record),
        redirected_from: redirected_from.map(|from| get_full_path(from, serializer)),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
