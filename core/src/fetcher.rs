//! One cancellable GET per call, parsed and shuffled.

use std::sync::Arc;

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::client::FeedClient;
use crate::error::FetchError;
use crate::shuffle::shuffle_random;
use crate::transport::Transport;
use crate::types::{Post, Record, Todo};

/// Couples a `FeedClient` with the host's `Transport`.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct Fetcher {
    client: FeedClient,
    transport: Arc<dyn Transport>,
}

impl Fetcher {
    pub fn new(client: FeedClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    /// Fetch `R`'s collection and return it in random order.
    pub async fn fetch<R: Record>(&self, token: &CancellationToken) -> Result<Vec<R>, FetchError> {
        let records = self.fetch_in_order::<R>(token).await?;
        Ok(shuffle_random(records))
    }

    /// Fetch `R`'s collection in the order the server sent it.
    ///
    /// No request is sent if `token` is already cancelled. If it fires while
    /// the transport call is pending, the call is dropped and its response
    /// never parsed.
    pub async fn fetch_in_order<R: Record>(
        &self,
        token: &CancellationToken,
    ) -> Result<Vec<R>, FetchError> {
        if token.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let request = self.client.build_list(R::RESOURCE);
        debug!(resource = %R::RESOURCE, path = %request.path, "fetch: sending request");

        let response = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(resource = %R::RESOURCE, "fetch: cancelled in flight");
                return Err(FetchError::Cancelled);
            }
            response = self.transport.execute(request) => response?,
        };

        let records = self.client.parse_list::<R>(response)?;
        debug!(resource = %R::RESOURCE, count = records.len(), "fetch: parsed");
        Ok(records)
    }

    pub async fn fetch_posts(&self, token: &CancellationToken) -> Result<Vec<Post>, FetchError> {
        self.fetch(token).await
    }

    pub async fn fetch_todos(&self, token: &CancellationToken) -> Result<Vec<Todo>, FetchError> {
        self.fetch(token).await
    }
}
