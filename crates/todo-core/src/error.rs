//! Error Types
//!
//! One enum per layer: task validation, key-value persistence, remote API.

use thiserror::Error;

/// Task Store validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("task text is empty")]
    EmptyText,

    /// The owning UI scope was torn down before the call
    #[error("task store is no longer available")]
    Disposed,
}

/// Key-value adapter failures. The Task Store logs these and carries on.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,

    #[error("failed to read storage: {0}")]
    Read(String),

    #[error("failed to write storage: {0}")]
    Write(String),

    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Remote task API failures
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote title is empty")]
    EmptyTitle,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { status: u16, url: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
pub type RemoteResult<T> = Result<T, RemoteError>;
