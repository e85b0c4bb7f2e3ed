//! Error types for fetching feed resources.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the collection does not exist" from "the server returned an unexpected
//! status." Panels collapse every variant into a single error state, so the
//! enum is `Clone` and stored as-is.

use thiserror::Error;

/// Errors produced while fetching and parsing a resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-200 status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request never produced a response (connect, timeout, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request's cancellation token fired first.
    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
