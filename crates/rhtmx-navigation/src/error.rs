// File: src/error.rs
// Purpose: Error types for query decoding and parsing

/// Failure while percent-decoding a query component.
///
/// Mirrors the cases a URI-component decoder rejects: a `%` that is not
/// followed by two hex digits, or escapes that decode to invalid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed percent-escape at byte {position}")]
    MalformedEscape { position: usize },

    #[error("percent-escapes do not decode to valid UTF-8")]
    InvalidUtf8,
}

/// Failure reported by a query parser.
///
/// The built-in parser only ever fails with [`QueryError::Decode`];
/// caller-supplied parsers use [`QueryError::Custom`] for anything else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("URI malformed: {0}")]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Custom(String),
}

impl QueryError {
    /// Builds a custom parser error
    pub fn custom(message: impl Into<String>) -> Self {
        QueryError::Custom(message.into())
    }
}
