use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const POST_COUNT: u64 = 100;
pub const TODO_COUNT: u64 = 200;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// Read-only collections served by the mock.
#[derive(Debug)]
pub struct Fixtures {
    pub posts: Vec<Post>,
    pub todos: Vec<Todo>,
}

impl Fixtures {
    /// Same shape as the public placeholder API: ten posts per user,
    /// twenty todos per user.
    pub fn generate() -> Self {
        let posts = (1..=POST_COUNT)
            .map(|id| Post {
                user_id: (id - 1) / 10 + 1,
                id,
                title: words(id, 5),
                body: format!("{}\n{}", words(id * 7, 12), words(id * 13, 10)),
            })
            .collect();
        let todos = (1..=TODO_COUNT)
            .map(|id| Todo {
                user_id: (id - 1) / 20 + 1,
                id,
                title: words(id * 3, 4),
                completed: id % 3 != 1,
            })
            .collect();
        Self { posts, todos }
    }

    pub fn empty() -> Self {
        Self {
            posts: Vec::new(),
            todos: Vec::new(),
        }
    }
}

const WORDS: [&str; 16] = [
    "sunt", "aut", "facere", "repellat", "provident", "occaecati", "excepturi", "optio",
    "reprehenderit", "qui", "est", "esse", "dolorem", "eum", "magnam", "nesciunt",
];

fn words(seed: u64, count: u64) -> String {
    (0..count)
        .map(|i| WORDS[((seed * 31 + i * 17) % WORDS.len() as u64) as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

pub type Db = Arc<Fixtures>;

pub fn app() -> Router {
    app_with(Fixtures::generate())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{id}", get(get_post))
        .route("/todos", get(list_todos))
        .route("/todos/{id}", get(get_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    tracing::debug!(count = db.posts.len(), "GET /posts");
    Json(db.posts.clone())
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    db.posts
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    tracing::debug!(count = db.todos.len(), "GET /todos");
    Json(db.todos.clone())
}

async fn get_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Todo>, StatusCode> {
    db.todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_camel_case_user_id() {
        let post = Post {
            user_id: 1,
            id: 1,
            title: "Test".to_string(),
            body: "Body".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Test");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn todo_serializes_completed() {
        let todo = Todo {
            user_id: 2,
            id: 21,
            title: "Walk".to_string(),
            completed: true,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["userId"], 2);
        assert_eq!(json["completed"], true);
    }

    #[test]
    fn fixtures_match_placeholder_shape() {
        let fixtures = Fixtures::generate();
        assert_eq!(fixtures.posts.len(), POST_COUNT as usize);
        assert_eq!(fixtures.todos.len(), TODO_COUNT as usize);
        assert_eq!(fixtures.posts[0].user_id, 1);
        assert_eq!(fixtures.posts[99].user_id, 10);
        assert_eq!(fixtures.todos[199].user_id, 10);
        assert!(fixtures.todos.iter().any(|t| t.completed));
        assert!(fixtures.todos.iter().any(|t| !t.completed));
    }

    #[test]
    fn fixture_ids_are_unique_and_ordered() {
        let fixtures = Fixtures::generate();
        let ids: Vec<u64> = fixtures.posts.iter().map(|p| p.id).collect();
        let expected: Vec<u64> = (1..=POST_COUNT).collect();
        assert_eq!(ids, expected);
    }
}
