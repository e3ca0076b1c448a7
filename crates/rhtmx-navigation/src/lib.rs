//! # RHTMX Navigation
//!
//! Query-string codec and immutable route descriptors for client-side navigation:
//! - RFC3986-leaning percent-encoding (`! ' ( ) *` escaped, commas kept)
//! - Ordered query mappings with `null` / absent / repeated-key semantics
//! - Frozen [`Route`] values carrying path, query, hash, params and matched records
//! - Route comparison for "same route" and "active link" checks
//!
//! ## Query Values
//!
//! | Value | Output |
//! |---|---|
//! | `Absent` | key omitted |
//! | `Null` | `?key` |
//! | `Value("v")` | `?key=v` |
//! | `List([..])` | one fragment per entry, absent entries dropped |
//!
//! Parsing is the mirror image: repeated keys collapse into a `List`,
//! a key without `=` becomes `Null`.
//!
//! ## Route Descriptors
//!
//! [`create_route`] normalizes a raw [`Location`] against an optional
//! [`RouteRecord`], computes the canonical full path, and returns a value
//! that cannot be mutated afterwards. [`START`] is the route before any
//! navigation and is compared by identity.
//!
//! ## Example
//!
//! ```
//! use rhtmx_navigation::{create_route, is_included_route, resolve_query, Location};
//!
//! let query = resolve_query(Some("?tab=posts&sort=new"), None, None);
//! let current = create_route(None, &Location::path("/users/7").with_query(query), None, None);
//! assert_eq!(current.full_path(), "/users/7?tab=posts&sort=new");
//!
//! let link = create_route(None, &Location::path("/users"), None, None);
//! assert!(is_included_route(&current, &link));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod error;
mod location;
pub mod matching;
mod options;
pub mod path;
pub mod query;
mod record;
pub mod route;

// Re-export public types
pub use error::{DecodeError, QueryError};
pub use location::{Location, Params};
pub use matching::{
    is_included_route, is_object_equal, is_params_equal, is_query_equal, is_same_route,
    query_includes,
};
pub use options::RouterOptions;
pub use query::{
    parse_query, resolve_query, stringify_query, QueryEntry, QueryMap, QueryParser,
    QuerySerializer, QueryValue,
};
pub use record::{format_match, Meta, RecordAncestors, RouteRecord};
pub use route::{create_route, get_full_path, start, Route, START};
