#![allow(clippy::unwrap_used)]
// Integration tests for `WooClient` using wiremock.

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use woo_api::models::{StatGranularity, StatsGranularityV4};
use woo_api::{DotcomError, Error, WooClient};

// ── Helpers ─────────────────────────────────────────────────────────

const SITE_ID: i64 = 42;

async fn setup() -> (MockServer, WooClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = WooClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn tunnel_path() -> String {
    format!("/rest/v1.1/jetpack-blogs/{SITE_ID}/rest-api/")
}

fn at(date: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").unwrap()
}

// ── Order stats ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_order_stats() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tunnel_path()))
        .and(query_param(
            "path",
            "/wc-analytics/reports/revenue/stats?interval=hour&after=2019-07-09T00%3A00%3A00&before=2019-07-09T23%3A59%3A59&per_page=24&force_cache_refresh=false&_method=get",
        ))
        .and(query_param("json", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "totals": { "orders_count": 2, "total_sales": 30.0, "net_revenue": 25.0 },
                "intervals": [
                    { "interval": "2019-07-09 10", "subtotals": { "orders_count": 1, "total_sales": 10 } },
                    { "interval": "2019-07-09 11", "subtotals": { "orders_count": 1, "total_sales": 20 } }
                ]
            }
        })))
        .mount(&server)
        .await;

    let stats = client
        .load_order_stats(
            SITE_ID,
            StatsGranularityV4::Hourly,
            at("2019-07-09 00:00:00"),
            at("2019-07-09 23:59:59"),
            24,
            false,
        )
        .await
        .unwrap();

    assert_eq!(stats.site_id, SITE_ID);
    assert_eq!(stats.granularity, StatsGranularityV4::Hourly);
    assert_eq!(stats.totals.total_orders, 2);
    let keys: Vec<&str> = stats.intervals.iter().map(|i| i.interval.as_str()).collect();
    assert_eq!(keys, vec!["2019-07-09 10", "2019-07-09 11"]);
}

// ── Site visit stats ────────────────────────────────────────────────

#[tokio::test]
async fn test_load_site_visit_stats() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/rest/v1.1/sites/{SITE_ID}/stats/visits/")))
        .and(query_param("unit", "day"))
        .and(query_param("date", "2019-07-09"))
        .and(query_param("quantity", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "date": "2019-07-09",
            "unit": "day",
            "fields": ["period", "views", "visitors"],
            "data": [["2019-07-08", 10, 4], ["2019-07-09", 6, 3]]
        })))
        .mount(&server)
        .await;

    let stats = client
        .load_site_visit_stats(
            SITE_ID,
            StatGranularity::Day,
            NaiveDate::from_ymd_opt(2019, 7, 9).unwrap(),
            7,
        )
        .await
        .unwrap();

    assert_eq!(stats.items.len(), 2);
    assert_eq!(stats.items[1].visitors, 3);
    assert_eq!(stats.items[1].views, 6);
}

#[tokio::test]
async fn test_stats_permission_error_is_classified() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/rest/v1.1/sites/{SITE_ID}/stats/visits/")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": "unauthorized",
            "message": "user cannot view stats"
        })))
        .mount(&server)
        .await;

    let result = client
        .load_site_visit_stats(
            SITE_ID,
            StatGranularity::Day,
            NaiveDate::from_ymd_opt(2019, 7, 9).unwrap(),
            1,
        )
        .await;

    assert!(
        matches!(result, Err(Error::Dotcom(DotcomError::NoStatsPermission))),
        "expected NoStatsPermission, got: {result:?}"
    );
}

// ── Leaderboards ────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_leaderboards() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tunnel_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "products",
                "label": "Top Products - Items Sold",
                "rows": [[
                    { "display": "<a href='https://s.example/wp-admin/admin.php?page=wc-admin&products=9'>Beanie</a>", "value": "Beanie" },
                    { "display": "4", "value": 4 },
                    { "display": "$72.00", "value": 72 }
                ]]
            }, {
                "id": "coupons",
                "label": "Top Coupons",
                "rows": []
            }]
        })))
        .mount(&server)
        .await;

    let boards = client
        .load_leaderboards(
            SITE_ID,
            StatsGranularityV4::Daily,
            at("2019-07-09 00:00:00"),
            at("2019-07-09 23:59:59"),
            3,
        )
        .await
        .unwrap();

    assert_eq!(boards.len(), 2);
    assert_eq!(boards[0].id, "products");
    assert_eq!(boards[0].rows[0].product_id(), Some(9));
    assert_eq!(boards[0].rows[0].quantity_value(), 4);
}

// ── Products ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_products_sets_site_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tunnel_path()))
        .and(query_param("path", "/wc/v3/products?include=9%2C31&per_page=2&_method=get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 9, "name": "Beanie", "price": "18.00", "images": [{ "src": "https://s.example/beanie.jpg" }] },
                { "id": 31, "name": "Hoodie", "price": "45.00", "images": [] }
            ]
        })))
        .mount(&server)
        .await;

    let products = client.load_products(SITE_ID, &[9, 31]).await.unwrap();

    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p.site_id == SITE_ID));
    assert_eq!(products[0].image_url(), Some("https://s.example/beanie.jpg"));
    assert_eq!(products[1].image_url(), None);
}

#[tokio::test]
async fn test_load_products_without_ids_skips_request() {
    let (server, client) = setup().await;
    let products = client.load_products(SITE_ID, &[]).await.unwrap();
    assert!(products.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── System plugins ──────────────────────────────────────────────────

#[tokio::test]
async fn test_load_system_plugins() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tunnel_path()))
        .and(query_param(
            "path",
            "/wc/v3/system_status?_fields=active_plugins%2Cinactive_plugins&_method=get",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "active_plugins": [{ "plugin": "woocommerce/woocommerce.php", "name": "WooCommerce", "version": "5.8.0" }],
                "inactive_plugins": [{ "plugin": "hello.php", "name": "Hello Dolly", "version": "1.7.2" }]
            }
        })))
        .mount(&server)
        .await;

    let plugins = client.load_system_plugins(SITE_ID).await.unwrap();

    let summary: Vec<(&str, bool)> = plugins.iter().map(|p| (p.name.as_str(), p.active)).collect();
    assert_eq!(summary, vec![("WooCommerce", true), ("Hello Dolly", false)]);
}

#[tokio::test]
async fn test_tunnelled_error_with_ok_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tunnel_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "rest_no_route",
            "message": "No route was found matching the URL and request method"
        })))
        .mount(&server)
        .await;

    let result = client.load_system_plugins(SITE_ID).await;
    assert!(
        matches!(result, Err(Error::Dotcom(DotcomError::ResourceDoesNotExist))),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tunnel_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client.load_system_plugins(SITE_ID).await;
    match result {
        Err(Error::Deserialization { body, .. }) => assert!(body.contains("maintenance")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tunnel_path()))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.load_system_plugins(SITE_ID).await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 502, .. }));
    assert!(err.is_transient());
}

// ── Sites ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_sites() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1.1/me/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sites": [{
                "ID": SITE_ID,
                "name": "Shop",
                "description": "",
                "URL": "https://shop.example",
                "options": {
                    "is_wpcom_store": false,
                    "woocommerce_is_active": true,
                    "timezone": "",
                    "gmt_offset": -5
                }
            }]
        })))
        .mount(&server)
        .await;

    let sites = client.load_sites().await.unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].site_id, SITE_ID);
    assert_eq!(sites[0].site_timezone().local_minus_utc(), -5 * 3600);
}
