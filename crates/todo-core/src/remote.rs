//! Remote Task Service
//!
//! Stateless request/response calls against the public to-do API.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{RemoteError, RemoteResult};
use crate::models::RemoteTask;

/// Remote to-do API
#[async_trait(?Send)]
pub trait TodoService {
    /// `GET /todos?_limit={limit}`
    async fn fetch_todos(&self, limit: u32) -> RemoteResult<Vec<RemoteTask>>;

    /// `POST /todos`
    async fn add_todo(&self, title: &str) -> RemoteResult<RemoteTask>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewTodoBody<'a> {
    title: &'a str,
    completed: bool,
    user_id: i64,
}

/// reqwest-backed implementation (browser `fetch` on wasm32)
#[derive(Debug, Clone)]
pub struct HttpTodoService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTodoService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }
}

fn check_status(response: reqwest::Response) -> RemoteResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

#[async_trait(?Send)]
impl TodoService for HttpTodoService {
    async fn fetch_todos(&self, limit: u32) -> RemoteResult<Vec<RemoteTask>> {
        let response = self
            .client
            .get(self.todos_url())
            .query(&[("_limit", limit)])
            .send()
            .await?;
        let todos = check_status(response)?
            .json::<Vec<RemoteTask>>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        tracing::info!(count = todos.len(), "fetched remote todos");
        Ok(todos)
    }

    async fn add_todo(&self, title: &str) -> RemoteResult<RemoteTask> {
        let body = NewTodoBody {
            title,
            completed: false,
            user_id: 1,
        };
        let response = self.client.post(self.todos_url()).json(&body).send().await?;
        let created = check_status(response)?
            .json::<RemoteTask>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        tracing::info!(id = created.id, "created remote todo");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let service = HttpTodoService::new("https://example.test/");
        assert_eq!(service.todos_url(), "https://example.test/todos");
    }

    #[test]
    fn test_new_todo_body() {
        let body = NewTodoBody { title: "x", completed: false, user_id: 1 };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"title": "x", "completed": false, "userId": 1})
        );
    }
}
