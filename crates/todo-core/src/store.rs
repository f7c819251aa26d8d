//! Task Store
//!
//! Owns the local task list. Every effective mutation swaps in a fresh
//! `Rc<[Task]>` snapshot, writes it to the key-value slot and notifies
//! subscribers. Persistence failures are logged and never undo a mutation.

use std::collections::HashSet;
use std::rc::Rc;

use crate::error::{StorageError, StoreError};
use crate::models::{Stats, Task, TaskId};
use crate::storage::KeyValueStore;

/// Handle returned by [`TaskStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

type Listener = Box<dyn Fn(&Rc<[Task]>)>;

pub struct TaskStore<K: KeyValueStore> {
    tasks: Rc<[Task]>,
    storage: K,
    key: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_listener: u64,
}

impl<K: KeyValueStore> TaskStore<K> {
    /// Restore the list from `key`, falling back to empty on any problem
    pub fn load(storage: K, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = read_tasks(&storage, &key);
        tracing::info!(key = %key, count = tasks.len(), "task store loaded");
        Self {
            tasks: tasks.into(),
            storage,
            key,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Current snapshot; cheap to clone, compare with `Rc::ptr_eq`
    pub fn snapshot(&self) -> Rc<[Task]> {
        Rc::clone(&self.tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Append a new open task. Whitespace-only text is rejected.
    pub fn add(&mut self, text: &str) -> Result<TaskId, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let task = Task::new(text.to_string());
        let id = task.id.clone();
        let next: Rc<[Task]> = self.tasks.iter().cloned().chain(std::iter::once(task)).collect();
        self.commit(next);
        Ok(id)
    }

    /// Flip `done`; unknown ids are ignored
    pub fn toggle(&mut self, id: &TaskId) {
        if self.get(id).is_none() {
            return;
        }
        let next: Rc<[Task]> = self
            .tasks
            .iter()
            .map(|t| {
                if &t.id == id {
                    Task { done: !t.done, ..t.clone() }
                } else {
                    t.clone()
                }
            })
            .collect();
        self.commit(next);
    }

    /// Delete one task; unknown ids are ignored
    pub fn remove(&mut self, id: &TaskId) {
        if self.get(id).is_none() {
            return;
        }
        let next: Rc<[Task]> = self.tasks.iter().filter(|t| &t.id != id).cloned().collect();
        self.commit(next);
    }

    /// Drop every completed task, keeping the order of the rest
    pub fn clear_completed(&mut self) {
        if !self.tasks.iter().any(|t| t.done) {
            return;
        }
        let next: Rc<[Task]> = self.tasks.iter().filter(|t| !t.done).cloned().collect();
        self.commit(next);
    }

    /// Register a callback run after each effective mutation
    pub fn subscribe(&mut self, listener: impl Fn(&Rc<[Task]>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    fn commit(&mut self, next: Rc<[Task]>) {
        self.tasks = next;
        if let Err(e) = self.persist() {
            tracing::warn!(key = %self.key, error = %e, "failed to persist tasks");
        }
        for (_, listener) in &self.listeners {
            listener(&self.tasks);
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&*self.tasks)?;
        self.storage.set(&self.key, &json)
    }
}

/// Decode the stored list, dropping entries that do not look like tasks
fn read_tasks<K: KeyValueStore>(storage: &K, key: &str) -> Vec<Task> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read tasks");
            return Vec::new();
        }
    };
    let entries = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Array(entries)) => entries,
        Ok(_) => {
            tracing::warn!(key, "stored tasks are not a list, starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "stored tasks are not valid JSON, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Task>(entry) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::debug!(error = %e, "dropping malformed stored task");
                None
            }
        })
        .filter_map(|mut task| {
            let trimmed = task.text.trim();
            if trimmed.is_empty() || !seen.insert(task.id.clone()) {
                tracing::debug!(id = %task.id, "dropping empty or duplicate stored task");
                return None;
            }
            if trimmed.len() != task.text.len() {
                task.text = trimmed.to_string();
            }
            Some(task)
        })
        .collect()
}
