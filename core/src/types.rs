//! Domain records for the feed API.
//!
//! # Design
//! These types mirror the upstream JSON (camelCase `userId`) but are defined
//! independently from the mock-server crate. Integration tests catch any
//! schema drift between the two.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A remote collection the feed knows how to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Posts,
    Todos,
}

impl Resource {
    /// Path segment under the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Todos => "todos",
        }
    }

    /// Capitalized name used for panel headings.
    pub fn title(self) -> &'static str {
        match self {
            Resource::Posts => "Posts",
            Resource::Todos => "Todos",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "posts" | "post" | "p" => Ok(Resource::Posts),
            "todos" | "todo" | "t" => Ok(Resource::Todos),
            other => Err(format!("unknown resource: {other}")),
        }
    }
}

/// Owner identifier. Upstream sends a number; older clients typed it as a
/// string, so both are accepted and kept in text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawUserId")]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Number(u64),
    Text(String),
}

impl From<RawUserId> for UserId {
    fn from(raw: RawUserId) -> Self {
        match raw {
            RawUserId::Number(n) => UserId(n.to_string()),
            RawUserId::Text(s) => UserId(s),
        }
    }
}

/// A single post returned by `GET /posts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

/// A single todo returned by `GET /todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub user_id: UserId,
    pub title: String,
    pub completed: bool,
}

/// A record type that lives in exactly one remote collection.
pub trait Record: DeserializeOwned + Clone + Send + Sync + 'static {
    const RESOURCE: Resource;
}

impl Record for Post {
    const RESOURCE: Resource = Resource::Posts;
}

impl Record for Todo {
    const RESOURCE: Resource = Resource::Todos;
}
