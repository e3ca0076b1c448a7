/// Route records: nodes of the static route-definition tree
///
/// A record only knows its parent. Route descriptors walk that chain to
/// build their root-to-leaf `matched` sequence.
use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

/// Arbitrary metadata attached to a record (titles, permissions, ...)
pub type Meta = BTreeMap<String, Value>;

/// A node in the route-definition tree
///
/// Records are shared through `Arc`, so the same parent can back many
/// children and `matched` sequences can be compared by identity.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::RouteRecord;
///
/// let root = RouteRecord::new("/users").with_name("users").into_shared();
/// let child = RouteRecord::new("/users/:id")
///     .with_meta("title", "User Profile")
///     .with_parent(root)
///     .into_shared();
///
/// assert_eq!(child.parent.as_ref().map(|p| p.path.as_str()), Some("/users"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteRecord {
    /// Path pattern of this record, like "/users/:id"
    pub path: String,
    /// Optional route name
    pub name: Option<String>,
    /// Record metadata, inherited by routes resolved to this record
    pub meta: Meta,
    /// Enclosing record, `None` at the root
    pub parent: Option<Arc<RouteRecord>>,
}

impl RouteRecord {
    /// Creates a parentless record for `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a metadata key-value pair
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Sets multiple metadata entries at once
    pub fn with_metadata(mut self, meta: Meta) -> Self {
        self.meta.extend(meta);
        self
    }

    pub fn with_parent(mut self, parent: Arc<RouteRecord>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Wraps the record for sharing as a parent or a matched entry
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Lazy iterator over a record and its ancestors
///
/// For `root -> section -> page`, starting at `page` yields:
/// `page` → `section` → `root`
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::{RecordAncestors, RouteRecord};
///
/// let root = RouteRecord::new("/").into_shared();
/// let page = RouteRecord::new("/about").with_parent(root).into_shared();
///
/// let paths: Vec<&str> = RecordAncestors::new(&page).map(|r| r.path.as_str()).collect();
/// assert_eq!(paths, vec!["/about", "/"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordAncestors<'a> {
    current: Option<&'a Arc<RouteRecord>>,
}

impl<'a> RecordAncestors<'a> {
    /// Starts at `record` itself
    pub fn new(record: &'a Arc<RouteRecord>) -> Self {
        Self {
            current: Some(record),
        }
    }
}

impl<'a> Iterator for RecordAncestors<'a> {
    type Item = &'a Arc<RouteRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current.parent.as_ref();
        Some(current)
    }
}

/// Flattens a record's ancestor chain into root-to-leaf order
///
/// Empty when there is no record.
pub fn format_match(record: Option<&Arc<RouteRecord>>) -> Vec<Arc<RouteRecord>> {
    let Some(record) = record else {
        return Vec::new();
    };

    let mut matched: Vec<_> = RecordAncestors::new(record).cloned().collect();
    matched.reverse();
    matched
}
