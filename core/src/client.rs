//! Stateless HTTP request builder and response parser for the feed API.
//!
//! # Design
//! `FeedClient` holds only a `base_url` and carries no mutable state between
//! calls. Listing a collection is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Pagination is client-side bookkeeping only, so no query
//! string is ever attached.

use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Post, Resource, Todo};

/// Synchronous, stateless client for the feed API.
#[derive(Debug, Clone)]
pub struct FeedClient {
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list(&self, resource: Resource) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{}", self.base_url, resource.path()),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        self.build_list(Resource::Posts)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.build_list(Resource::Todos)
    }

    pub fn parse_list<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Vec<T>, FetchError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| FetchError::Deserialization(e.to_string()))
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, FetchError> {
        self.parse_list(response)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, FetchError> {
        self.parse_list(response)
    }
}

/// Map non-success status codes to the appropriate `FetchError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), FetchError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(FetchError::NotFound);
    }
    Err(FetchError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
