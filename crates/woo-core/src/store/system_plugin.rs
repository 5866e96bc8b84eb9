// ── System plugin store ──
//
// Mirrors the site's installed plugins. A sync replaces the stored set
// for the site: plugins missing from the latest response are deleted.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use woo_api::models::SystemPlugin;
use woo_storage::{ExecutionContext, StorageManager, SystemPluginRecord};

use super::{Store, complete, unsupported_action};
use crate::action::{Action, ActionKind, SystemPluginAction};
use crate::convert::{ToDto, update_system_plugin};
use crate::error::StoreError;
use crate::remote::WooRemote;

/// Handles [`SystemPluginAction`]s.
pub struct SystemPluginStore {
    remote: Arc<dyn WooRemote>,
    storage: StorageManager,
}

impl SystemPluginStore {
    pub fn new(remote: Arc<dyn WooRemote>, storage: StorageManager) -> Self {
        Self { remote, storage }
    }

    /// Fetch the site's plugins and make storage match them.
    ///
    /// The write runs on the background execution context.
    pub async fn synchronize_system_plugins(&self, site_id: i64) -> Result<(), StoreError> {
        let plugins = self.remote.load_system_plugins(site_id).await?;
        let fetched = plugins.len();

        let stale = self
            .storage
            .perform(ExecutionContext::Background, move |ctx| {
                for plugin in &plugins {
                    let record = ctx.load_or_insert((site_id, plugin.name.clone()), || {
                        SystemPluginRecord::new(site_id, plugin.name.clone())
                    });
                    update_system_plugin(record, plugin);
                }

                let current: HashSet<&str> = plugins.iter().map(|p| p.name.as_str()).collect();
                let stale = ctx.delete_where::<SystemPluginRecord>(|record| {
                    record.site_id == site_id && !current.contains(record.name.as_str())
                });
                Ok::<_, StoreError>(stale)
            })
            .await?;

        info!(site_id, fetched, stale, "system plugins synchronized");
        Ok(())
    }

    /// Stored plugins of a site, ordered by name.
    pub fn fetch_system_plugins(&self, site_id: i64) -> Vec<SystemPlugin> {
        let plugins: Vec<SystemPlugin> = self
            .storage
            .view_storage()
            .system_plugins(site_id)
            .into_iter()
            .map(|record| record.to_dto())
            .collect();
        debug!(site_id, count = plugins.len(), "system plugins read from storage");
        plugins
    }
}

#[async_trait]
impl Store for SystemPluginStore {
    fn kind(&self) -> ActionKind {
        ActionKind::SystemPlugin
    }

    async fn on_action(&self, action: Action) {
        let action = match action {
            Action::SystemPlugin(action) => action,
            other @ Action::Analytics(_) => {
                unsupported_action(self.kind(), &other);
                return;
            }
        };

        match action {
            SystemPluginAction::SynchronizeSystemPlugins {
                site_id,
                on_completion,
            } => {
                complete(on_completion, self.synchronize_system_plugins(site_id).await);
            }
            SystemPluginAction::FetchSystemPlugins {
                site_id,
                on_completion,
            } => {
                complete(on_completion, Ok(self.fetch_system_plugins(site_id)));
            }
        }
    }
}
