// woo-api: Async Rust client for the WordPress.com and WooCommerce REST APIs

pub mod client;
pub mod error;
pub mod models;
mod remotes;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, WooClient};
pub use error::{DotcomError, Error};
pub use transport::TransportConfig;
