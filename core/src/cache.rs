//! Per-resource query cache.
//!
//! # Design
//! One `PanelController` per `Resource`, owned by a single coordinator.
//! There is no ambient global cache: the only way to refresh an entry is
//! `invalidate`, which supersedes that entry's in-flight fetch and hands back
//! a ticket for the new one. Entries never touch each other, so a failure in
//! one panel leaves the sibling as it was.

use tracing::info;

use crate::error::FetchError;
use crate::panel::{FetchTicket, PanelController, PanelState};
use crate::types::{Post, Resource, Todo};

#[derive(Debug, Default)]
pub struct QueryCache {
    posts: PanelController<Post>,
    todos: PanelController<Todo>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `resource` stale and start a fresh fetch for it.
    pub fn invalidate(&mut self, resource: Resource) -> FetchTicket {
        info!(%resource, "cache: invalidate");
        match resource {
            Resource::Posts => self.posts.begin(),
            Resource::Todos => self.todos.begin(),
        }
    }

    pub fn resolve_posts(&mut self, ticket: &FetchTicket, result: Result<Vec<Post>, FetchError>) -> bool {
        self.posts.resolve(ticket, result)
    }

    pub fn resolve_todos(&mut self, ticket: &FetchTicket, result: Result<Vec<Todo>, FetchError>) -> bool {
        self.todos.resolve(ticket, result)
    }

    /// Cancel every in-flight fetch (unmount).
    pub fn cancel_all(&mut self) {
        self.posts.cancel();
        self.todos.cancel();
    }

    pub fn state(&self, resource: Resource) -> PanelState {
        match resource {
            Resource::Posts => self.posts.state(),
            Resource::Todos => self.todos.state(),
        }
    }

    pub fn posts(&self) -> &PanelController<Post> {
        &self.posts
    }

    pub fn todos(&self) -> &PanelController<Todo> {
        &self.todos
    }
}
