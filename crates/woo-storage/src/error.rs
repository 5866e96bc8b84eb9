use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A background write closure panicked or its task was cancelled.
    /// Nothing from that write was committed.
    #[error("storage write aborted: {0}")]
    WriteAborted(String),

    /// Reading or writing the cache file failed.
    #[error("cache file {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The committed tables could not be serialized.
    #[error("failed to encode storage snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// The cache file exists but does not contain a valid snapshot.
    #[error("failed to decode cache file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
