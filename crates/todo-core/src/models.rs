//! Core Models
//!
//! Local tasks, remote tasks and derived statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque unique identifier of a local task
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Fresh random id (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A locally owned to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
}

impl Task {
    /// New open task with a generated id. `text` must already be trimmed.
    pub(crate) fn new(text: String) -> Self {
        Self {
            id: TaskId::generate(),
            text,
            done: false,
        }
    }
}

/// To-do item as served by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTask {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    /// Locally synthesized, waiting for the server
    #[serde(default, skip_serializing_if = "is_false")]
    pub optimistic: bool,
}

impl RemoteTask {
    /// Placeholder entry shown while a create request is in flight
    pub fn provisional(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            user_id: default_user_id(),
            optimistic: true,
        }
    }
}

fn default_user_id() -> i64 {
    1
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Derived counters for a task collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub done: usize,
    pub remaining: usize,
    /// Completion percentage, 0 when there are no tasks
    pub pct: u8,
}

impl Stats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let done = tasks.iter().filter(|t| t.done).count();
        let pct = if total == 0 {
            0
        } else {
            (done as f64 / total as f64 * 100.0).round() as u8
        };
        Self {
            total,
            done,
            remaining: total - done,
            pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(text: &str, done: bool) -> Task {
        Task {
            id: TaskId::generate(),
            text: text.to_string(),
            done,
        }
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(
            Stats::from_tasks(&[]),
            Stats { total: 0, done: 0, remaining: 0, pct: 0 }
        );
    }

    #[test]
    fn test_stats_rounding() {
        let tasks = vec![task("a", true), task("b", false), task("c", false)];
        let stats = Stats::from_tasks(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.remaining, 2);
        assert_eq!(stats.pct, 33);

        let tasks = vec![task("a", true), task("b", true), task("c", false)];
        assert_eq!(Stats::from_tasks(&tasks).pct, 67);

        let tasks = vec![task("a", true), task("b", false)];
        assert_eq!(Stats::from_tasks(&tasks).pct, 50);
    }

    #[test]
    fn test_task_json_shape() {
        let t = Task {
            id: TaskId::from("abc"),
            text: "Buy milk".to_string(),
            done: false,
        };
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json, serde_json::json!({"id": "abc", "text": "Buy milk", "done": false}));
    }

    #[test]
    fn test_remote_task_json() {
        let parsed: RemoteTask = serde_json::from_value(serde_json::json!({
            "userId": 3, "id": 7, "title": "delectus", "completed": true
        }))
        .unwrap();
        assert_eq!(parsed.user_id, 3);
        assert!(parsed.completed);
        assert!(!parsed.optimistic);

        let json = serde_json::to_value(RemoteTask::provisional(-1, "New")).unwrap();
        assert_eq!(json["optimistic"], true);
        assert_eq!(json["userId"], 1);

        let confirmed = RemoteTask { optimistic: false, ..RemoteTask::provisional(201, "x") };
        let json = serde_json::to_value(confirmed).unwrap();
        assert!(json.get("optimistic").is_none());
    }
}
