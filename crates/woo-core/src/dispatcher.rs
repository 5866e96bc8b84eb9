// ── Action dispatcher ──
//
// Routes each action to the store registered for its kind. Stores are
// held behind `Arc` so a dispatch never keeps a map shard locked across
// an await.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::action::{Action, ActionKind, Completion};
use crate::error::StoreError;
use crate::store::Store;

/// Explicitly constructed action router. Cheap to clone.
#[derive(Clone, Default)]
pub struct Dispatcher {
    stores: Arc<DashMap<ActionKind, Arc<dyn Store>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `store` for its kind, replacing any previous handler.
    pub fn register(&self, store: Arc<dyn Store>) {
        let kind = store.kind();
        if self.stores.insert(kind, store).is_some() {
            warn!(%kind, "replaced an already registered store");
        } else {
            debug!(%kind, "store registered");
        }
    }

    /// Remove the store for `kind`. Returns whether one was registered.
    pub fn unregister(&self, kind: ActionKind) -> bool {
        self.stores.remove(&kind).is_some()
    }

    pub fn is_registered(&self, kind: ActionKind) -> bool {
        self.stores.contains_key(&kind)
    }

    /// Hand `action` to its store and wait until the store has handled it.
    ///
    /// An action nobody handles is logged and dropped; its completion
    /// receiver then sees the sender go away.
    pub async fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        let kind = action.kind();
        let store = self.stores.get(&kind).map(|entry| Arc::clone(entry.value()));

        match store {
            Some(store) => store.on_action(action).await,
            None => warn!(%kind, "no store registered for action; dropping it"),
        }
    }

    /// Build an action around a fresh completion, dispatch it and await
    /// the result.
    ///
    /// ```ignore
    /// let plugins = dispatcher
    ///     .request(|on_completion| SystemPluginAction::FetchSystemPlugins { site_id, on_completion })
    ///     .await?;
    /// ```
    pub async fn request<T, A>(&self, build: impl FnOnce(Completion<T>) -> A) -> Result<T, StoreError>
    where
        A: Into<Action>,
    {
        let (tx, rx) = oneshot::channel();
        self.dispatch(build(tx)).await;
        rx.await.map_err(|_| StoreError::Cancelled)?
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<ActionKind> = self.stores.iter().map(|entry| *entry.key()).collect();
        f.debug_struct("Dispatcher").field("stores", &kinds).finish()
    }
}
