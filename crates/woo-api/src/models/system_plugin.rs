use serde::{Deserialize, Serialize};

/// A plugin installed on a store, from `wc/v3/system_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPlugin {
    #[serde(default)]
    pub site_id: i64,
    /// Plugin file path, e.g. `woocommerce/woocommerce.php`.
    pub plugin: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_url: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub version_latest: String,
    #[serde(default)]
    pub network_activated: bool,
    /// Not part of the plugin object; derived from the list it came from.
    #[serde(default)]
    pub active: bool,
}

/// Raw `system_status` body restricted to the plugin lists.
#[derive(Debug, Deserialize)]
pub(crate) struct SystemStatusPayload {
    #[serde(default)]
    pub active_plugins: Vec<SystemPlugin>,
    #[serde(default)]
    pub inactive_plugins: Vec<SystemPlugin>,
}

impl SystemStatusPayload {
    pub(crate) fn into_plugins(self, site_id: i64) -> Vec<SystemPlugin> {
        let tag = |active: bool| {
            move |plugin: SystemPlugin| SystemPlugin {
                site_id,
                active,
                ..plugin
            }
        };
        self.active_plugins
            .into_iter()
            .map(tag(true))
            .chain(self.inactive_plugins.into_iter().map(tag(false)))
            .collect()
    }
}
