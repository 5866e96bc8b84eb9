use tracing::debug;

use crate::client::WooClient;
use crate::error::Error;
use crate::models::system_plugin::{SystemPlugin, SystemStatusPayload};

impl WooClient {
    /// Fetch active and inactive plugins from the store's system status.
    ///
    /// `GET /wc/v3/system_status?_fields=active_plugins,inactive_plugins`
    pub async fn load_system_plugins(&self, site_id: i64) -> Result<Vec<SystemPlugin>, Error> {
        let url = self.jetpack_url(
            site_id,
            "/wc/v3/system_status",
            &[("_fields", "active_plugins,inactive_plugins".into())],
        )?;
        debug!(site_id, "fetching system plugins");

        let payload: SystemStatusPayload = self.get_jetpack(url).await?;
        Ok(payload.into_plugins(site_id))
    }
}
