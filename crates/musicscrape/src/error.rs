//! Error types.
//!
//! `ExtractError` describes why one result item, track entry or script block
//! was skipped. It never escapes a page-level extraction call; extractors hand
//! it to a [`Diagnostics`](crate::diagnostics::Diagnostics) sink and carry on.

use thiserror::Error;

/// Why a unit of extraction was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// A required element, attribute or field is absent.
    #[error("missing {0}")]
    Missing(String),

    /// A field exists but does not have the expected shape.
    #[error("{what} is not {expected}")]
    Mismatch { what: String, expected: &'static str },

    /// The literal text anchor used to locate embedded JSON is absent.
    #[error("anchor {0:?} not found")]
    AnchorNotFound(&'static str),

    /// The sliced JSON text does not parse.
    #[error("JSON parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
}

impl ExtractError {
    pub(crate) fn missing(what: impl Into<String>) -> Self {
        Self::Missing(what.into())
    }

    pub(crate) fn mismatch(what: impl Into<String>, expected: &'static str) -> Self {
        Self::Mismatch {
            what: what.into(),
            expected,
        }
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Failure of the fetch layer for one request.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("request cancelled")]
    Cancelled,

    /// The extraction task panicked or was aborted.
    #[error("extraction task failed: {0}")]
    Task(String),
}
