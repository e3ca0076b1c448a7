// File: src/options.rs
// Purpose: Router-level query codec configuration

use std::sync::Arc;

use crate::query::{resolve_query, stringify_query, QueryMap, QueryParser, QuerySerializer};

/// Router options consumed by the query codec and route factory
///
/// Both strategies are optional; the built-in parser and serializer are
/// used when they are not set.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::{QueryMap, RouterOptions};
///
/// let options = RouterOptions::new()
///     .with_stringify_query(|query: &QueryMap| format!("?n={}", query.len()));
///
/// let query = QueryMap::new().with("a", "1");
/// assert_eq!(options.stringify(&query), "?n=1");
/// ```
#[derive(Clone, Default)]
pub struct RouterOptions {
    parse_query: Option<Arc<dyn QueryParser>>,
    stringify_query: Option<Arc<dyn QuerySerializer>>,
}

impl std::fmt::Debug for RouterOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterOptions")
            .field("custom_parse_query", &self.parse_query.is_some())
            .field("custom_stringify_query", &self.stringify_query.is_some())
            .finish()
    }
}

impl RouterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the query-string parser
    pub fn with_parse_query(mut self, parser: impl QueryParser + 'static) -> Self {
        self.parse_query = Some(Arc::new(parser));
        self
    }

    /// Replaces the query serializer used for full paths
    pub fn with_stringify_query(mut self, serializer: impl QuerySerializer + 'static) -> Self {
        self.stringify_query = Some(Arc::new(serializer));
        self
    }

    /// The custom parser, if one was configured
    pub fn parser(&self) -> Option<&dyn QueryParser> {
        self.parse_query.as_deref()
    }

    /// The custom serializer, if one was configured
    pub fn serializer(&self) -> Option<&dyn QuerySerializer> {
        self.stringify_query.as_deref()
    }

    /// [`resolve_query`] with the configured parser
    pub fn resolve_query(&self, raw: Option<&str>, extra: Option<&QueryMap>) -> QueryMap {
        resolve_query(raw, extra, self.parser())
    }

    /// Serializes with the configured serializer, falling back to [`stringify_query`]
    pub fn stringify(&self, query: &QueryMap) -> String {
        match self.serializer() {
            Some(serializer) => serializer.stringify(query),
            None => stringify_query(query),
        }
    }
}
