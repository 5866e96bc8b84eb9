use serde::{Deserialize, Serialize};

/// The subset of a WooCommerce product needed to render top earners.
///
/// `site_id` is not part of the payload; the remote fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub site_id: i64,
    #[serde(rename = "id")]
    pub product_id: i64,
    #[serde(default)]
    pub name: String,
    /// Price as sent by the store, a decimal string that may be empty.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub src: String,
}

impl Product {
    /// First image URL, if the product has any.
    pub fn image_url(&self) -> Option<&str> {
        self.images
            .first()
            .map(|i| i.src.as_str())
            .filter(|s| !s.is_empty())
    }
}
