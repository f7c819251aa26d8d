//! Query Client
//!
//! Drives the remote to-do [`QueryCache`] with a [`TodoService`]: background
//! fetches, forced refetches and optimistic creates. Futures are handed to an
//! injected local spawner (`spawn_local` in the browser), so every method
//! returns immediately and observers learn about transitions through
//! [`QueryClient::subscribe`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::error::{RemoteError, RemoteResult};
use crate::models::RemoteTask;
use crate::query::{QueryCache, QueryKey, QueryStatus};
use crate::remote::TodoService;
use crate::store::SubscriptionId;

type Spawner = Box<dyn Fn(LocalBoxFuture<'static, ()>)>;
type Clock = Box<dyn Fn() -> u64>;

/// Point-in-time view of one cache entry
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub data: Option<Vec<RemoteTask>>,
    pub status: QueryStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Error(String),
}

struct Inner<S> {
    service: S,
    cache: RefCell<QueryCache<Vec<RemoteTask>>>,
    clock: Clock,
    spawn: Spawner,
    listeners: RefCell<Vec<(SubscriptionId, Rc<dyn Fn()>)>>,
    next_listener: Cell<u64>,
    next_provisional_id: Cell<i64>,
    pending_mutations: Cell<usize>,
    last_mutation_error: RefCell<Option<String>>,
}

/// Cheap to clone; clones share one cache
pub struct QueryClient<S> {
    inner: Rc<Inner<S>>,
}

impl<S> Clone for QueryClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: TodoService + 'static> QueryClient<S> {
    /// `clock` returns milliseconds; `spawn` runs a future on the local executor
    pub fn new(
        service: S,
        stale_time_ms: u64,
        clock: impl Fn() -> u64 + 'static,
        spawn: impl Fn(LocalBoxFuture<'static, ()>) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                service,
                cache: RefCell::new(QueryCache::new(stale_time_ms)),
                clock: Box::new(clock),
                spawn: Box::new(spawn),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                next_provisional_id: Cell::new(-1),
                pending_mutations: Cell::new(0),
                last_mutation_error: RefCell::new(None),
            }),
        }
    }

    /// Current entry without side effects
    pub fn state(&self, key: QueryKey) -> QueryState {
        let cache = self.inner.cache.borrow();
        QueryState {
            data: cache.data(&key).cloned(),
            status: cache.status(&key, self.now()),
            error: cache.error(&key).map(str::to_string),
        }
    }

    /// Current entry, starting a background fetch if the entry is absent,
    /// stale, invalidated or errored
    pub fn query(&self, key: QueryKey) -> QueryState {
        self.start_fetch(key, false);
        self.state(key)
    }

    /// Fetch regardless of staleness; joins a fetch already in flight
    pub fn refetch(&self, key: QueryKey) {
        self.start_fetch(key, true);
    }

    /// Optimistically append `title` to the list under `key`, then create it
    /// remotely. The cache shows the provisional entry before this returns;
    /// a failed create restores the previous value, and either way the key is
    /// invalidated and refetched so server data replaces optimistic entries.
    pub fn mutate(&self, key: QueryKey, title: &str) -> RemoteResult<()> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(RemoteError::EmptyTitle);
        }

        let provisional = RemoteTask::provisional(self.provisional_id(), title.clone());
        let snapshot = {
            let mut cache = self.inner.cache.borrow_mut();
            if cache.cancel(&key) {
                tracing::debug!(?key, "cancelled in-flight fetch for optimistic write");
            }
            let snapshot = cache.snapshot(&key);
            let mut list = cache.data(&key).cloned().unwrap_or_default();
            list.push(provisional);
            cache.set_data(key, list, self.now());
            snapshot
        };
        self.inner.pending_mutations.set(self.inner.pending_mutations.get() + 1);
        self.notify();

        let this = self.clone();
        (self.inner.spawn)(Box::pin(async move {
            let result = this.inner.service.add_todo(&title).await;
            this.inner
                .pending_mutations
                .set(this.inner.pending_mutations.get().saturating_sub(1));
            match result {
                Ok(created) => {
                    tracing::debug!(id = created.id, "remote create confirmed");
                    *this.inner.last_mutation_error.borrow_mut() = None;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "remote create failed, rolling back");
                    this.inner.cache.borrow_mut().restore(key, snapshot);
                    *this.inner.last_mutation_error.borrow_mut() = Some(e.to_string());
                    this.notify();
                }
            }
            {
                // A fetch begun before the create settled may answer with the
                // pre-write list, so it must not satisfy the invalidation
                let mut cache = this.inner.cache.borrow_mut();
                if cache.cancel(&key) {
                    tracing::debug!(?key, "dropped fetch started before the create settled");
                }
                cache.invalidate(&key);
            }
            this.notify();
            this.start_fetch(key, true);
        }));
        Ok(())
    }

    pub fn mutation_status(&self) -> MutationStatus {
        if self.inner.pending_mutations.get() > 0 {
            MutationStatus::Pending
        } else if let Some(message) = self.inner.last_mutation_error.borrow().clone() {
            MutationStatus::Error(message)
        } else {
            MutationStatus::Idle
        }
    }

    /// Run `listener` after every cache or mutation state change
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    fn start_fetch(&self, key: QueryKey, force: bool) {
        let ticket = self.inner.cache.borrow_mut().begin_fetch(key, force, self.now());
        let Some(ticket) = ticket else {
            return;
        };
        tracing::debug!(?key, force, "fetch started");
        self.notify();

        let this = self.clone();
        (self.inner.spawn)(Box::pin(async move {
            let result = this.inner.service.fetch_todos(key.limit).await.map_err(|e| {
                tracing::warn!(?key, error = %e, "fetch failed");
                e.to_string()
            });
            let applied = this.inner.cache.borrow_mut().complete_fetch(ticket, result, this.now());
            if applied {
                this.notify();
            } else {
                tracing::debug!(?key, "discarding response of cancelled fetch");
            }
        }));
    }

    fn provisional_id(&self) -> i64 {
        let id = self.inner.next_provisional_id.get();
        self.inner.next_provisional_id.set(id - 1);
        id
    }

    fn now(&self) -> u64 {
        (self.inner.clock)()
    }

    fn notify(&self) {
        // Clone out so listeners may (un)subscribe while being called
        let listeners: Vec<Rc<dyn Fn()>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}
