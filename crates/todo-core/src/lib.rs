//! To-Do Core
//!
//! Browser-independent state for the to-do app:
//! - store / storage: local task list persisted to a key-value slot
//! - view: search and filter projections
//! - remote / query / client: remote to-do API with an optimistic query cache
//! - import: remote to local bridge

pub mod client;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod query;
pub mod remote;
pub mod shortcut;
pub mod storage;
pub mod store;
pub mod view;

pub use client::{MutationStatus, QueryClient, QueryState};
pub use config::AppConfig;
pub use error::{RemoteError, StorageError, StoreError};
pub use import::import_to_local;
pub use models::{RemoteTask, Stats, Task, TaskId};
pub use query::{QueryKey, QueryStatus};
pub use remote::{HttpTodoService, TodoService};
pub use shortcut::{KeyInput, Shortcut};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::{SubscriptionId, TaskStore};
pub use view::{filter_tasks, visible_tasks, Filter};
