// ── Storage manager ──
//
// Owns the committed tables. Writers are serialized through a single
// async mutex; each write runs against a private `StorageContext` and is
// committed only if the closure succeeds and actually changed something.
// Commits are published through a `watch` channel so readers never block.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use crate::context::StorageContext;
use crate::error::StorageError;
use crate::stream::StorageStream;
use crate::tables::Tables;
use crate::view::ViewStorage;

/// Where a write closure executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Inline on the calling task.
    Main,
    /// On tokio's blocking thread pool.
    Background,
}

/// Shared handle to the local record storage.
#[derive(Clone)]
pub struct StorageManager {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<Arc<Tables>>,
    writer: Mutex<()>,
    cache_path: Option<PathBuf>,
}

impl StorageManager {
    /// Storage that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::from_tables(Tables::default(), None)
    }

    /// Storage mirrored to a JSON cache file.
    ///
    /// An existing file is loaded; a missing one starts empty. A file that
    /// cannot be decoded is discarded with a warning, since it only holds
    /// cached remote data.
    pub fn persistent(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let tables = match load_cache(&path) {
            Ok(tables) => tables,
            Err(StorageError::Decode { path, source }) => {
                warn!(path = %path.display(), error = %source, "discarding unreadable cache file");
                Tables::default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self::from_tables(tables, Some(path)))
    }

    fn from_tables(tables: Tables, cache_path: Option<PathBuf>) -> Self {
        let (state, _) = watch::channel(Arc::new(tables));
        Self {
            inner: Arc::new(Inner {
                state,
                writer: Mutex::new(()),
                cache_path,
            }),
        }
    }

    pub fn cache_path(&self) -> Option<&Path> {
        self.inner.cache_path.as_deref()
    }

    /// Snapshot of the latest committed state.
    pub fn view_storage(&self) -> ViewStorage {
        ViewStorage::new(self.inner.state.borrow().clone())
    }

    /// Subscribe to commits.
    pub fn subscribe(&self) -> StorageStream {
        StorageStream::new(self.inner.state.subscribe())
    }

    /// Run a write closure and commit its changes.
    ///
    /// The closure's error rolls the write back and is returned as-is.
    /// Storage failures (panicking background write, cache file I/O)
    /// are converted into `E`.
    pub async fn perform<T, E, F>(&self, execution: ExecutionContext, write: F) -> Result<T, E>
    where
        F: FnOnce(&mut StorageContext) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StorageError> + Send + 'static,
    {
        let _guard = self.inner.writer.lock().await;
        let mut context = StorageContext::new(self.inner.state.borrow().clone());
        let cache_path = self.inner.cache_path.clone();

        // Background writes also encode and write the cache file off the
        // async worker; only publishing happens on the caller.
        let (value, staged) = match execution {
            ExecutionContext::Main => {
                let value = write(&mut context)?;
                (value, stage_commit(context, cache_path.as_deref())?)
            }
            ExecutionContext::Background => tokio::task::spawn_blocking(move || {
                let value = write(&mut context)?;
                let staged = stage_commit(context, cache_path.as_deref())?;
                Ok::<_, E>((value, staged))
            })
            .await
            .map_err(|e| StorageError::WriteAborted(e.to_string()))??,
        };

        if let Some(tables) = staged {
            self.inner.state.send_replace(Arc::new(tables));
        }
        Ok(value)
    }

    /// Delete everything, including the cache file.
    pub async fn reset(&self) -> Result<(), StorageError> {
        let _guard = self.inner.writer.lock().await;
        if let Some(path) = &self.inner.cache_path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(StorageError::Persist {
                        path: path.clone(),
                        source,
                    });
                }
            }
        }
        self.inner.state.send_replace(Arc::new(Tables::default()));
        debug!("storage reset");
        Ok(())
    }
}

/// Turn `context` into the tables to publish, writing the cache file
/// first. `None` if the write changed nothing.
fn stage_commit(
    context: StorageContext,
    cache_path: Option<&Path>,
) -> Result<Option<Tables>, StorageError> {
    if !context.has_changes() {
        debug!("write produced no changes, skipping commit");
        return Ok(None);
    }

    let tables = context.into_tables();
    if let Some(path) = cache_path {
        store_cache(path, &tables)?;
    }
    Ok(Some(tables))
}

fn load_cache(path: &Path) -> Result<Tables, StorageError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Tables::default()),
        Err(source) => {
            return Err(StorageError::Persist {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn store_cache(path: &Path, tables: &Tables) -> Result<(), StorageError> {
    let persist_err = |source: std::io::Error| StorageError::Persist {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(persist_err)?;
    }
    let bytes = serde_json::to_vec(tables).map_err(StorageError::Encode)?;

    // Write-then-rename so a crash never leaves a truncated cache behind.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(persist_err)?;
    fs::rename(&tmp, path).map_err(persist_err)?;
    Ok(())
}
