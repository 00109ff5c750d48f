//! Error handling types and utilities.

/// A specialized Result type for documenter-search operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a search index payload is not well formed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The payload is not valid JSON.
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    /// The top-level object has no `docs` array.
    #[error("payload has no top-level `docs` array")]
    MissingDocs,
    /// An entry is missing a field or has a field of the wrong type.
    #[error("entry {index} is invalid: {message}")]
    InvalidEntry { index: usize, message: String },
    /// The `var <name> = ...` script wrapper could not be stripped.
    #[error("malformed script wrapper: {message}")]
    Wrapper { message: String },
}

impl ParseError {
    pub(crate) fn syntax(err: &serde_json::Error) -> Self {
        Self::Syntax {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_entry(index: usize, err: &serde_json::Error) -> Self {
        Self::InvalidEntry {
            index,
            message: err.to_string(),
        }
    }
}
