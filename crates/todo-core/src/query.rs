//! Query Cache
//!
//! Per-key cache entries with an explicit status machine:
//!
//! ```text
//! Absent --begin--> Loading --ok--> Fresh --age/invalidate--> Stale
//!                      |                ^                       |
//!                      +--err--> Error  +------ok------ Refetching <--begin--+
//! ```
//!
//! Fetches are identified by tickets. Only the key's current ticket may
//! complete; cancelling forgets the ticket so a late response is dropped.
//! Time is passed in as milliseconds so the machine stays pure.

use std::collections::HashMap;

/// Resource name of the remote to-do list query
pub const REMOTE_TODOS: &str = "remoteTodos";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: &'static str,
    pub limit: u32,
}

impl QueryKey {
    pub fn remote_todos(limit: u32) -> Self {
        Self {
            resource: REMOTE_TODOS,
            limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Nothing cached, nothing in flight
    Absent,
    /// First fetch in flight
    Loading,
    Fresh,
    /// Data present but older than the staleness window, or invalidated
    Stale,
    /// Data present while a new fetch is in flight
    Refetching,
    /// Last fetch failed; earlier data is kept
    Error,
}

impl QueryStatus {
    pub fn is_fetching(self) -> bool {
        matches!(self, QueryStatus::Loading | QueryStatus::Refetching)
    }
}

/// Proof that a fetch was started for `key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: QueryKey,
    id: u64,
}

/// Saved cache value used to roll back an optimistic write
#[derive(Debug, Clone)]
pub struct CacheSnapshot<T> {
    data: Option<T>,
    updated_at: Option<u64>,
    error: Option<String>,
    invalidated: bool,
}

#[derive(Debug)]
struct Entry<T> {
    data: Option<T>,
    updated_at: Option<u64>,
    in_flight: Option<u64>,
    error: Option<String>,
    invalidated: bool,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            data: None,
            updated_at: None,
            in_flight: None,
            error: None,
            invalidated: false,
        }
    }
}

#[derive(Debug)]
pub struct QueryCache<T> {
    entries: HashMap<QueryKey, Entry<T>>,
    stale_time_ms: u64,
    next_ticket: u64,
}

impl<T: Clone> QueryCache<T> {
    pub fn new(stale_time_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stale_time_ms,
            next_ticket: 0,
        }
    }

    pub fn status(&self, key: &QueryKey, now: u64) -> QueryStatus {
        let Some(entry) = self.entries.get(key) else {
            return QueryStatus::Absent;
        };
        if entry.in_flight.is_some() {
            return if entry.data.is_some() {
                QueryStatus::Refetching
            } else {
                QueryStatus::Loading
            };
        }
        if entry.error.is_some() {
            return QueryStatus::Error;
        }
        match (&entry.data, entry.updated_at) {
            (Some(_), Some(at)) if !entry.invalidated && now.saturating_sub(at) < self.stale_time_ms => {
                QueryStatus::Fresh
            }
            (Some(_), _) => QueryStatus::Stale,
            (None, _) => QueryStatus::Absent,
        }
    }

    pub fn data(&self, key: &QueryKey) -> Option<&T> {
        self.entries.get(key).and_then(|e| e.data.as_ref())
    }

    pub fn error(&self, key: &QueryKey) -> Option<&str> {
        self.entries.get(key).and_then(|e| e.error.as_deref())
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.in_flight.is_some())
    }

    /// Start a fetch when one is due (or `force`). Returns `None` when a
    /// fetch for `key` is already in flight or the data is still fresh.
    pub fn begin_fetch(&mut self, key: QueryKey, force: bool, now: u64) -> Option<FetchTicket> {
        if self.is_fetching(&key) {
            return None;
        }
        let due = matches!(
            self.status(&key, now),
            QueryStatus::Absent | QueryStatus::Stale | QueryStatus::Error
        );
        if !due && !force {
            return None;
        }
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.entries.entry(key).or_default().in_flight = Some(id);
        Some(FetchTicket { key, id })
    }

    /// Apply a fetch outcome. Returns false if the ticket was cancelled or superseded.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<T, String>, now: u64) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if entry.in_flight != Some(ticket.id) {
            return false;
        }
        entry.in_flight = None;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.updated_at = Some(now);
                entry.error = None;
                entry.invalidated = false;
            }
            Err(message) => entry.error = Some(message),
        }
        true
    }

    /// Forget the in-flight fetch for `key`. Returns whether there was one.
    pub fn cancel(&mut self, key: &QueryKey) -> bool {
        self.entries
            .get_mut(key)
            .and_then(|e| e.in_flight.take())
            .is_some()
    }

    /// Overwrite the cached value, as if freshly fetched
    pub fn set_data(&mut self, key: QueryKey, data: T, now: u64) {
        let entry = self.entries.entry(key).or_default();
        entry.data = Some(data);
        entry.updated_at = Some(now);
        entry.error = None;
    }

    /// Mark `key` stale so the next query fetches
    pub fn invalidate(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.invalidated = true;
        }
    }

    pub fn snapshot(&self, key: &QueryKey) -> CacheSnapshot<T> {
        match self.entries.get(key) {
            Some(entry) => CacheSnapshot {
                data: entry.data.clone(),
                updated_at: entry.updated_at,
                error: entry.error.clone(),
                invalidated: entry.invalidated,
            },
            None => CacheSnapshot {
                data: None,
                updated_at: None,
                error: None,
                invalidated: false,
            },
        }
    }

    /// Put back a value taken with [`QueryCache::snapshot`]. The in-flight
    /// ticket is left alone.
    pub fn restore(&mut self, key: QueryKey, snapshot: CacheSnapshot<T>) {
        let entry = self.entries.entry(key).or_default();
        entry.data = snapshot.data;
        entry.updated_at = snapshot.updated_at;
        entry.error = snapshot.error;
        entry.invalidated = snapshot.invalidated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STALE: u64 = 60_000;

    fn key() -> QueryKey {
        QueryKey::remote_todos(10)
    }

    #[test]
    fn test_first_fetch_lifecycle() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        assert_eq!(cache.status(&key(), 0), QueryStatus::Absent);

        let ticket = cache.begin_fetch(key(), false, 0).unwrap();
        assert_eq!(cache.status(&key(), 0), QueryStatus::Loading);

        assert!(cache.complete_fetch(ticket, Ok(vec![1, 2]), 10));
        assert_eq!(cache.status(&key(), 10), QueryStatus::Fresh);
        assert_eq!(cache.data(&key()), Some(&vec![1, 2]));
    }

    #[test]
    fn test_goes_stale_after_window() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        let ticket = cache.begin_fetch(key(), false, 0).unwrap();
        cache.complete_fetch(ticket, Ok(vec![1]), 0);

        assert_eq!(cache.status(&key(), STALE - 1), QueryStatus::Fresh);
        assert_eq!(cache.status(&key(), STALE), QueryStatus::Stale);
        assert!(cache.begin_fetch(key(), false, STALE - 1).is_none());

        let ticket = cache.begin_fetch(key(), false, STALE).unwrap();
        assert_eq!(cache.status(&key(), STALE), QueryStatus::Refetching);
        cache.complete_fetch(ticket, Ok(vec![2]), STALE);
        assert_eq!(cache.status(&key(), STALE), QueryStatus::Fresh);
    }

    #[test]
    fn test_concurrent_fetches_coalesce() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        let first = cache.begin_fetch(key(), true, 0);
        assert!(first.is_some());
        assert!(cache.begin_fetch(key(), true, 0).is_none());
        assert!(cache.begin_fetch(key(), false, 0).is_none());
    }

    #[test]
    fn test_force_refetches_fresh_data() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        let ticket = cache.begin_fetch(key(), false, 0).unwrap();
        cache.complete_fetch(ticket, Ok(vec![1]), 0);
        assert!(cache.begin_fetch(key(), false, 1).is_none());
        assert!(cache.begin_fetch(key(), true, 1).is_some());
    }

    #[test]
    fn test_error_keeps_previous_data() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        let ticket = cache.begin_fetch(key(), false, 0).unwrap();
        cache.complete_fetch(ticket, Ok(vec![1]), 0);

        let ticket = cache.begin_fetch(key(), true, 5).unwrap();
        cache.complete_fetch(ticket, Err("HTTP 500".to_string()), 6);

        assert_eq!(cache.status(&key(), 6), QueryStatus::Error);
        assert_eq!(cache.error(&key()), Some("HTTP 500"));
        assert_eq!(cache.data(&key()), Some(&vec![1]));

        // a retry clears the error on success
        let ticket = cache.begin_fetch(key(), false, 7).unwrap();
        cache.complete_fetch(ticket, Ok(vec![3]), 8);
        assert_eq!(cache.status(&key(), 8), QueryStatus::Fresh);
        assert_eq!(cache.error(&key()), None);
    }

    #[test]
    fn test_cancelled_fetch_is_dropped() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        let ticket = cache.begin_fetch(key(), false, 0).unwrap();
        assert!(cache.cancel(&key()));
        cache.set_data(key(), vec![9], 1);

        assert!(!cache.complete_fetch(ticket, Ok(vec![1]), 2));
        assert_eq!(cache.data(&key()), Some(&vec![9]));
        assert!(!cache.cancel(&key()));
    }

    #[test]
    fn test_superseded_ticket_is_dropped() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        let old = cache.begin_fetch(key(), false, 0).unwrap();
        cache.cancel(&key());
        let new = cache.begin_fetch(key(), false, 0).unwrap();

        assert!(!cache.complete_fetch(old, Ok(vec![1]), 1));
        assert!(cache.is_fetching(&key()));
        assert!(cache.complete_fetch(new, Ok(vec![2]), 1));
        assert_eq!(cache.data(&key()), Some(&vec![2]));
    }

    #[test]
    fn test_invalidate_makes_stale() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        let ticket = cache.begin_fetch(key(), false, 0).unwrap();
        cache.complete_fetch(ticket, Ok(vec![1]), 0);

        cache.invalidate(&key());
        assert_eq!(cache.status(&key(), 1), QueryStatus::Stale);
        assert!(cache.begin_fetch(key(), false, 1).is_some());
    }

    #[test]
    fn test_snapshot_restore_absent() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        let snapshot = cache.snapshot(&key());
        cache.set_data(key(), vec![1], 0);
        cache.restore(key(), snapshot);

        assert_eq!(cache.data(&key()), None);
        assert_eq!(cache.status(&key(), 0), QueryStatus::Absent);
    }

    #[test]
    fn test_restore_brings_back_error() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        let ticket = cache.begin_fetch(key(), false, 0).unwrap();
        cache.complete_fetch(ticket, Ok(vec![1]), 0);
        let ticket = cache.begin_fetch(key(), true, 1).unwrap();
        cache.complete_fetch(ticket, Err("HTTP 500".to_string()), 2);

        let snapshot = cache.snapshot(&key());
        cache.set_data(key(), vec![1, 2], 3);
        assert_eq!(cache.status(&key(), 3), QueryStatus::Fresh);

        cache.restore(key(), snapshot);
        assert_eq!(cache.status(&key(), 3), QueryStatus::Error);
        assert_eq!(cache.error(&key()), Some("HTTP 500"));
        assert_eq!(cache.data(&key()), Some(&vec![1]));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut cache = QueryCache::<Vec<u32>>::new(STALE);
        let small = QueryKey::remote_todos(5);
        assert!(cache.begin_fetch(key(), false, 0).is_some());
        assert!(cache.begin_fetch(small, false, 0).is_some());
        assert_eq!(cache.status(&small, 0), QueryStatus::Loading);
    }
}
