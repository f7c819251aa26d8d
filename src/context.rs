//! Application Context
//!
//! Owns the local task store and the remote query client and hands them to
//! components through the Leptos Context API. Both are mirrored into signals
//! via explicit subscriptions, so views re-render when they change.

use leptos::prelude::*;
use leptos::task::spawn_local;

use todo_core::{
    import_to_local, AppConfig, HttpTodoService, MutationStatus, QueryClient, QueryKey,
    QueryState, RemoteError, RemoteTask, Stats, StoreError, Task, TaskId, TaskStore,
};

use crate::storage::BrowserStorage;

type LocalTasks = TaskStore<BrowserStorage>;
type RemoteClient = QueryClient<HttpTodoService>;

/// App-wide state provided via context
#[derive(Clone, Copy)]
pub struct TodoContext {
    store: StoredValue<LocalTasks, LocalStorage>,
    client: StoredValue<RemoteClient, LocalStorage>,
    config: StoredValue<AppConfig>,
    /// Latest local task snapshot
    pub tasks: ReadSignal<Vec<Task>>,
    /// Bumped on every remote cache or mutation change
    remote_version: ReadSignal<u32>,
    /// Cache key of the remote list shown on the Remote page
    pub remote_key: QueryKey,
}

impl TodoContext {
    pub fn new(config: AppConfig) -> Self {
        let mut store = TaskStore::load(BrowserStorage, config.storage_key.clone());
        let (tasks, set_tasks) = signal(store.tasks().to_vec());
        store.subscribe(move |snapshot| set_tasks.set(snapshot.to_vec()));

        let (remote_version, set_remote_version) = signal(0u32);
        let client = QueryClient::new(
            HttpTodoService::new(config.api_base_url.clone()),
            config.stale_time_ms,
            || js_sys::Date::now() as u64,
            |fut| spawn_local(fut),
        );
        client.subscribe(move || set_remote_version.update(|v| *v += 1));

        Self {
            store: StoredValue::new_local(store),
            client: StoredValue::new_local(client),
            remote_key: QueryKey::remote_todos(config.remote_limit),
            config: StoredValue::new(config),
            tasks,
            remote_version,
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Slot the local list is persisted under
    pub fn storage_key(&self) -> String {
        self.store.with_value(|store| store.storage_key().to_string())
    }

    pub fn stats(&self) -> Stats {
        self.tasks.with(|tasks| Stats::from_tasks(tasks))
    }

    pub fn add(&self, text: &str) -> Result<TaskId, StoreError> {
        self.store
            .try_update_value(|store| store.add(text))
            .unwrap_or_else(store_disposed)
    }

    pub fn toggle(&self, id: &TaskId) {
        self.store.update_value(|store| store.toggle(id));
    }

    pub fn remove(&self, id: &TaskId) {
        self.store.update_value(|store| store.remove(id));
    }

    pub fn clear_completed(&self) {
        self.store.update_value(|store| store.clear_completed());
    }

    /// Copy a remote to-do into the local list
    pub fn import(&self, remote: &RemoteTask) -> Result<TaskId, StoreError> {
        self.store
            .try_update_value(|store| import_to_local(store, remote))
            .unwrap_or_else(store_disposed)
    }

    /// Start a background fetch of the remote list if it is absent or stale
    pub fn remote_query(&self) {
        let key = self.remote_key;
        self.client.with_value(|client| {
            client.query(key);
        });
    }

    /// Remote list state (reactive)
    pub fn remote_state(&self) -> QueryState {
        self.remote_version.track();
        let key = self.remote_key;
        self.client.with_value(|client| client.state(key))
    }

    pub fn remote_refetch(&self) {
        let key = self.remote_key;
        self.client.with_value(|client| client.refetch(key));
    }

    pub fn remote_add(&self, title: &str) -> Result<(), RemoteError> {
        let key = self.remote_key;
        self.client.with_value(|client| client.mutate(key, title))
    }

    /// Status of the last remote create (reactive)
    pub fn mutation_status(&self) -> MutationStatus {
        self.remote_version.track();
        self.client.with_value(|client| client.mutation_status())
    }
}

fn store_disposed<T>() -> Result<T, StoreError> {
    tracing::warn!("task store used after its owner was disposed");
    Err(StoreError::Disposed)
}

/// Get the app context
pub fn use_todos() -> TodoContext {
    expect_context::<TodoContext>()
}
