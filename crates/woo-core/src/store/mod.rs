// ── Stores ──
//
// A store owns one slice of the local cache. It receives actions of its
// kind, performs at most the remote calls the action needs, writes the
// results to storage, then answers the action's completion.

mod analytics;
mod system_plugin;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::action::{Action, ActionKind, Completion};
use crate::error::StoreError;

pub use analytics::AnalyticsStore;
pub use system_plugin::SystemPluginStore;

/// A handler for one [`ActionKind`].
#[async_trait]
pub trait Store: Send + Sync {
    /// The kind of action this store handles.
    fn kind(&self) -> ActionKind;

    /// Handle an action, answering its completion exactly once.
    ///
    /// Receiving an action of another kind is a programming error: it
    /// panics in debug builds and is logged and dropped otherwise.
    async fn on_action(&self, action: Action);
}

/// Report an action routed to the wrong store.
pub(crate) fn unsupported_action(store: ActionKind, action: &Action) {
    error!(%store, action = %action.kind(), "store received an unsupported action");
    if cfg!(debug_assertions) {
        panic!("{store} store received an unsupported {} action", action.kind());
    }
}

/// Answer a completion. A caller that stopped listening is not an error.
pub(crate) fn complete<T>(on_completion: Completion<T>, result: Result<T, StoreError>) {
    if on_completion.send(result).is_err() {
        debug!("completion receiver dropped before the result arrived");
    }
}
