// ── Storage change streams ──
//
// Subscription type for observing commits to the storage.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::tables::Tables;
use crate::view::ViewStorage;

/// A subscription to committed storage state.
///
/// Provides both point-in-time snapshot access and change notification
/// via [`changed`](Self::changed) or by converting into a `Stream`.
pub struct StorageStream {
    current: ViewStorage,
    receiver: watch::Receiver<Arc<Tables>>,
}

impl StorageStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Tables>>) -> Self {
        let current = ViewStorage::new(receiver.borrow().clone());
        Self { current, receiver }
    }

    /// The view captured at creation time or at the last `changed()`.
    pub fn current(&self) -> &ViewStorage {
        &self.current
    }

    /// The latest committed view.
    pub fn latest(&self) -> ViewStorage {
        ViewStorage::new(self.receiver.borrow().clone())
    }

    /// Whether a commit happened since the last observed view.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next commit, returning the new view.
    /// Returns `None` once the storage manager has been dropped.
    pub async fn changed(&mut self) -> Option<ViewStorage> {
        self.receiver.changed().await.ok()?;
        let view = ViewStorage::new(self.receiver.borrow_and_update().clone());
        self.current = view.clone();
        Some(view)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    ///
    /// The stream yields the current view first, then one per commit.
    pub fn into_stream(self) -> StorageWatchStream {
        StorageWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct StorageWatchStream {
    inner: WatchStream<Arc<Tables>>,
}

impl Stream for StorageWatchStream {
    type Item = ViewStorage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner)
            .poll_next(cx)
            .map(|tables| tables.map(ViewStorage::new))
    }
}
