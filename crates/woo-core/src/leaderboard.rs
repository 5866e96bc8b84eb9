// ── Leaderboard → top earners ──
//
// A leaderboard row only carries a product link and the sales figures.
// Names, prices and images come from product records, so rows whose
// product is unknown cannot be turned into top earner items.

use std::collections::HashSet;

use woo_api::models::{Leaderboard, Product, TopEarnerStatsItem};

/// Id of the leaderboard ranking products.
pub const TOP_PRODUCTS_ID: &str = "products";

/// Product ids referenced by the leaderboard, in ranking order.
pub fn top_product_ids(leaderboard: &Leaderboard) -> Vec<i64> {
    leaderboard
        .rows
        .iter()
        .filter_map(|row| row.product_id())
        .collect()
}

/// Referenced product ids that are not among `stored`.
pub fn missing_product_ids(leaderboard: &Leaderboard, stored: &[Product]) -> Vec<i64> {
    let known: HashSet<i64> = stored.iter().map(|p| p.product_id).collect();
    top_product_ids(leaderboard)
        .into_iter()
        .filter(|id| !known.contains(id))
        .collect()
}

/// Build top earner items from the leaderboard rows and product data.
pub fn top_earner_stats_items(leaderboard: &Leaderboard, products: &[Product]) -> Vec<TopEarnerStatsItem> {
    leaderboard
        .rows
        .iter()
        .filter_map(|row| {
            let product_id = row.product_id()?;
            let product = products.iter().find(|p| p.product_id == product_id)?;
            Some(TopEarnerStatsItem {
                product_id,
                product_name: product.name.clone(),
                quantity: row.quantity_value(),
                price: product.price.parse().unwrap_or_default(),
                total: row.total_value(),
                currency: String::new(),
                image_url: product.image_url().map(str::to_owned),
            })
        })
        .collect()
}
