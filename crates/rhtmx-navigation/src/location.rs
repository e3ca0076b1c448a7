// File: src/location.rs
// Purpose: Raw navigation requests

use std::collections::BTreeMap;

use serde_json::Value;

use crate::query::{QueryMap, QueryValue};

/// Path parameters, like `":id" -> "123"`
pub type Params = BTreeMap<String, Value>;

/// A partially-specified navigation request
///
/// Every field is optional; route creation fills in the defaults.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::Location;
///
/// let location = Location::path("/search")
///     .with_query_value("q", "rust")
///     .with_hash("#results");
///
/// assert_eq!(location.path.as_deref(), Some("/search"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub name: Option<String>,
    pub path: Option<String>,
    pub hash: Option<String>,
    pub query: Option<QueryMap>,
    pub params: Option<Params>,
}

impl Location {
    /// Request by path
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Request by route name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Replaces the whole query mapping
    pub fn with_query(mut self, query: QueryMap) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets one query key, creating the mapping if needed
    pub fn with_query_value(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.get_or_insert_with(QueryMap::new).insert(key, value);
        self
    }

    /// Replaces the whole params mapping
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Sets one path parameter, creating the mapping if needed
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params
            .get_or_insert_with(Params::new)
            .insert(key.into(), value.into());
        self
    }
}
