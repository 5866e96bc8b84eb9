use tracing::debug;

use crate::client::WooClient;
use crate::error::Error;
use crate::models::product::Product;

const MAX_PAGE_SIZE: usize = 100;

impl WooClient {
    /// Fetch the products with the given ids.
    ///
    /// `GET /wc/v3/products?include=...`
    ///
    /// An empty id list short-circuits without a request.
    pub async fn load_products(
        &self,
        site_id: i64,
        product_ids: &[i64],
    ) -> Result<Vec<Product>, Error> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let include = product_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let per_page = product_ids.len().clamp(1, MAX_PAGE_SIZE);

        let url = self.jetpack_url(
            site_id,
            "/wc/v3/products",
            &[("include", include), ("per_page", per_page.to_string())],
        )?;
        debug!(site_id, count = product_ids.len(), "fetching products");

        let products: Vec<Product> = self.get_jetpack(url).await?;
        Ok(products
            .into_iter()
            .map(|p| Product { site_id, ..p })
            .collect())
    }
}
