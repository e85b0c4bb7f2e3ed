//! The I/O seam between the core and its host.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes an `HttpRequest` and returns the raw response.
///
/// Non-2xx statuses must come back as `Ok` responses so the client can
/// interpret them; only failures to obtain a response map to
/// `FetchError::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}
