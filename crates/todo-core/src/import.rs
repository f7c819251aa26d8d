//! Import Bridge
//!
//! Copies a remote to-do into the local list.

use crate::error::StoreError;
use crate::models::{RemoteTask, TaskId};
use crate::storage::KeyValueStore;
use crate::store::TaskStore;

/// Add `remote.title` as a new local task; the remote completion flag is not carried over
pub fn import_to_local<K: KeyValueStore>(
    store: &mut TaskStore<K>,
    remote: &RemoteTask,
) -> Result<TaskId, StoreError> {
    let id = store.add(&remote.title)?;
    tracing::info!(remote_id = remote.id, local_id = %id, "imported remote todo");
    Ok(id)
}
