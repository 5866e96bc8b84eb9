use serde::Deserialize;
use tracing::debug;

use crate::client::WooClient;
use crate::error::Error;
use crate::models::site::Site;

#[derive(Deserialize)]
struct SitesPayload {
    #[serde(default)]
    sites: Vec<Site>,
}

impl WooClient {
    /// Fetch every site the authenticated account can access.
    ///
    /// `GET me/sites`
    pub async fn load_sites(&self) -> Result<Vec<Site>, Error> {
        let mut url = self.dotcom_url("me/sites")?;
        url.query_pairs_mut()
            .append_pair("fields", "ID,name,description,URL,options")
            .append_pair(
                "options",
                "timezone,is_wpcom_store,woocommerce_is_active,gmt_offset",
            );
        debug!("fetching sites");

        let payload: SitesPayload = self.get_dotcom(url).await?;
        Ok(payload.sites)
    }
}
