#![allow(clippy::unwrap_used)]
// Store behaviour against a scripted remote.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::oneshot;

use woo_api::DotcomError;
use woo_api::models::{
    Leaderboard, OrderStats, OrderStatsInterval, OrderStatsTotals, Product, Site, SiteVisitStats,
    SiteVisitStatsItem, StatGranularity, StatsGranularityV4, SystemPlugin,
};
use woo_core::{
    Action, AnalyticsAction, AnalyticsRange, AnalyticsStoreError, SiteVisitStatsStoreError,
    Store, StoreError, StoresManager, SystemPluginAction, SystemPluginStore, WooRemote,
};
use woo_storage::{
    OrderStatsRecord, ProductRecord, SiteRecord, StorageManager, SystemPluginRecord,
    TopEarnerStatsRecord,
};

// ── Scripted remote ─────────────────────────────────────────────────

/// Remote calls that can be scripted to fail with an HTTP 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    OrderStats,
    Leaderboards,
    Products,
    SystemPlugins,
}

#[derive(Default)]
struct FakeRemote {
    failing: Mutex<Vec<Endpoint>>,
    order_stats: Mutex<Option<OrderStats>>,
    site_visit_stats: Mutex<Option<SiteVisitStats>>,
    site_visit_error: Mutex<Option<(String, String)>>,
    leaderboards: Mutex<Vec<Leaderboard>>,
    products: Mutex<Vec<Product>>,
    plugins: Mutex<Vec<SystemPlugin>>,
    sites: Mutex<Vec<Site>>,
    product_requests: Mutex<Vec<Vec<i64>>>,
    visit_requests: Mutex<Vec<(StatGranularity, NaiveDate, u32)>>,
}

impl FakeRemote {
    fn fail(&self, endpoint: Endpoint) {
        self.failing.lock().unwrap().push(endpoint);
    }

    fn check(&self, endpoint: Endpoint) -> Result<(), woo_api::Error> {
        if self.failing.lock().unwrap().contains(&endpoint) {
            return Err(woo_api::Error::Http {
                status: 500,
                body: format!("{endpoint:?} unavailable"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl WooRemote for FakeRemote {
    async fn load_order_stats(
        &self,
        site_id: i64,
        unit: StatsGranularityV4,
        _earliest: NaiveDateTime,
        _latest: NaiveDateTime,
        _quantity: u32,
        _force_refresh: bool,
    ) -> Result<OrderStats, woo_api::Error> {
        self.check(Endpoint::OrderStats)?;
        let mut stats = self.order_stats.lock().unwrap().clone().unwrap();
        stats.site_id = site_id;
        stats.granularity = unit;
        Ok(stats)
    }

    async fn load_site_visit_stats(
        &self,
        site_id: i64,
        unit: StatGranularity,
        latest: NaiveDate,
        quantity: u32,
    ) -> Result<SiteVisitStats, woo_api::Error> {
        self.visit_requests.lock().unwrap().push((unit, latest, quantity));
        if let Some((code, message)) = self.site_visit_error.lock().unwrap().clone() {
            return Err(woo_api::Error::Dotcom(DotcomError::from_code(&code, &message)));
        }
        let mut stats = self.site_visit_stats.lock().unwrap().clone().unwrap();
        stats.site_id = site_id;
        Ok(stats)
    }

    async fn load_leaderboards(
        &self,
        _site_id: i64,
        _unit: StatsGranularityV4,
        _earliest: NaiveDateTime,
        _latest: NaiveDateTime,
        _quantity: u32,
    ) -> Result<Vec<Leaderboard>, woo_api::Error> {
        self.check(Endpoint::Leaderboards)?;
        Ok(self.leaderboards.lock().unwrap().clone())
    }

    async fn load_products(
        &self,
        site_id: i64,
        product_ids: &[i64],
    ) -> Result<Vec<Product>, woo_api::Error> {
        self.product_requests
            .lock()
            .unwrap()
            .push(product_ids.to_vec());
        self.check(Endpoint::Products)?;
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.site_id == site_id && product_ids.contains(&p.product_id))
            .cloned()
            .collect())
    }

    async fn load_system_plugins(&self, site_id: i64) -> Result<Vec<SystemPlugin>, woo_api::Error> {
        self.check(Endpoint::SystemPlugins)?;
        Ok(self
            .plugins
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.site_id == site_id)
            .cloned()
            .collect())
    }

    async fn load_sites(&self) -> Result<Vec<Site>, woo_api::Error> {
        Ok(self.sites.lock().unwrap().clone())
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

const SITE: i64 = 1234;

fn setup() -> (Arc<FakeRemote>, StoresManager) {
    let remote = Arc::new(FakeRemote::default());
    let manager = StoresManager::new(remote.clone(), StorageManager::in_memory());
    (remote, manager)
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn totals(orders: i64) -> OrderStatsTotals {
    OrderStatsTotals {
        total_orders: orders,
        gross_revenue: 12.5,
        ..OrderStatsTotals::default()
    }
}

fn interval(name: &str, orders: i64) -> OrderStatsInterval {
    OrderStatsInterval {
        interval: name.into(),
        date_start: format!("{name} 00:00:00"),
        date_end: format!("{name} 23:59:59"),
        subtotals: totals(orders),
    }
}

fn order_stats(intervals: Vec<OrderStatsInterval>) -> OrderStats {
    let orders = intervals.iter().map(|i| i.subtotals.total_orders).sum();
    OrderStats {
        site_id: SITE,
        granularity: StatsGranularityV4::Daily,
        totals: totals(orders),
        intervals,
    }
}

fn visit_stats(periods: &[(&str, i64)]) -> SiteVisitStats {
    SiteVisitStats {
        site_id: SITE,
        date: "2019-07-09".into(),
        granularity: StatGranularity::Day,
        items: periods
            .iter()
            .map(|(period, visitors)| SiteVisitStatsItem {
                period: (*period).into(),
                visitors: *visitors,
                views: visitors * 2,
            })
            .collect(),
    }
}

fn top_products_board(ids: &[i64]) -> Leaderboard {
    let rows: Vec<_> = ids
        .iter()
        .enumerate()
        .map(|(rank, id)| {
            json!([
                {
                    "display": format!("<a href='https://shop.example/wp-admin/admin.php?page=wc-admin&amp;path=/analytics/products&amp;filter=single_product&amp;products={id}'>P{id}</a>"),
                    "value": format!("P{id}")
                },
                { "display": "", "value": 10 - rank },
                { "display": "", "value": 25.5 }
            ])
        })
        .collect();
    serde_json::from_value(json!({ "id": "products", "label": "Top Products", "rows": rows }))
        .unwrap()
}

fn product(id: i64) -> Product {
    Product {
        site_id: SITE,
        product_id: id,
        name: format!("Product {id}"),
        price: "12.00".into(),
        permalink: format!("https://shop.example/p/{id}"),
        images: Vec::new(),
    }
}

fn plugin(name: &str, active: bool) -> SystemPlugin {
    SystemPlugin {
        site_id: SITE,
        plugin: format!("{name}/{name}.php"),
        name: name.into(),
        url: String::new(),
        author_name: "Automattic".into(),
        author_url: String::new(),
        version: "1.0".into(),
        version_latest: "1.1".into(),
        network_activated: false,
        active,
    }
}

fn site(id: i64, name: &str) -> Site {
    Site {
        site_id: id,
        name: name.into(),
        description: String::new(),
        url: format!("https://{name}.example"),
        plan: "business".into(),
        is_woocommerce_active: true,
        is_wordpress_store: true,
        timezone: String::new(),
        gmt_offset: -5.0,
    }
}

async fn retrieve_week_stats(manager: &StoresManager) -> Result<(), StoreError> {
    manager
        .retrieve_stats(
            SITE,
            AnalyticsRange::ThisWeek,
            at("2019-07-08 00:00:00"),
            at("2019-07-14 23:59:59"),
            7,
            false,
        )
        .await
}

async fn retrieve_week_top_earners(manager: &StoresManager) -> Result<(), StoreError> {
    manager
        .retrieve_top_earner_stats(
            SITE,
            AnalyticsRange::ThisWeek,
            at("2019-07-08 00:00:00"),
            at("2019-07-14 23:59:59"),
        )
        .await
}

fn stored_intervals(manager: &StoresManager) -> Vec<String> {
    manager
        .storage()
        .view_storage()
        .order_stats(SITE, "thisWeek")
        .unwrap()
        .intervals
        .keys()
        .cloned()
        .collect()
}

// ── Order stats ─────────────────────────────────────────────────────

#[tokio::test]
async fn order_stats_are_stored_under_site_and_range() {
    let (remote, manager) = setup();
    *remote.order_stats.lock().unwrap() =
        Some(order_stats(vec![interval("2019-07-08", 2), interval("2019-07-09", 3)]));

    retrieve_week_stats(&manager).await.unwrap();

    let view = manager.storage().view_storage();
    let record = view.order_stats(SITE, "thisWeek").unwrap();
    assert_eq!(record.granularity, "day");
    assert_eq!(record.totals.total_orders, 5);
    assert_eq!(record.intervals.len(), 2);
    assert_eq!(record.intervals["2019-07-09"].subtotals.total_orders, 3);
}

#[tokio::test]
async fn repeated_order_stats_sync_is_idempotent() {
    let (remote, manager) = setup();
    *remote.order_stats.lock().unwrap() =
        Some(order_stats(vec![interval("2019-07-08", 2), interval("2019-07-09", 3)]));

    retrieve_week_stats(&manager).await.unwrap();
    let first = manager.storage().view_storage();
    retrieve_week_stats(&manager).await.unwrap();
    let second = manager.storage().view_storage();

    assert_eq!(second.count::<OrderStatsRecord>(), 1);
    assert_eq!(
        first.order_stats(SITE, "thisWeek"),
        second.order_stats(SITE, "thisWeek")
    );
}

#[tokio::test]
async fn order_stats_intervals_follow_latest_response() {
    let (remote, manager) = setup();
    *remote.order_stats.lock().unwrap() =
        Some(order_stats(vec![interval("A", 1), interval("B", 1)]));
    retrieve_week_stats(&manager).await.unwrap();

    *remote.order_stats.lock().unwrap() =
        Some(order_stats(vec![interval("B", 4), interval("C", 1)]));
    retrieve_week_stats(&manager).await.unwrap();

    assert_eq!(stored_intervals(&manager), vec!["B".to_owned(), "C".to_owned()]);
    let view = manager.storage().view_storage();
    assert_eq!(
        view.order_stats(SITE, "thisWeek").unwrap().intervals["B"]
            .subtotals
            .total_orders,
        4
    );
}

#[tokio::test]
async fn empty_intervals_wipe_stored_intervals() {
    let (remote, manager) = setup();
    *remote.order_stats.lock().unwrap() =
        Some(order_stats(vec![interval("A", 1), interval("B", 1)]));
    retrieve_week_stats(&manager).await.unwrap();

    *remote.order_stats.lock().unwrap() = Some(order_stats(Vec::new()));
    retrieve_week_stats(&manager).await.unwrap();

    assert!(stored_intervals(&manager).is_empty());
}

#[tokio::test]
async fn reset_deletes_all_order_stats() {
    let (remote, manager) = setup();
    *remote.order_stats.lock().unwrap() = Some(order_stats(vec![interval("A", 1)]));
    retrieve_week_stats(&manager).await.unwrap();
    manager
        .retrieve_stats(
            SITE,
            AnalyticsRange::ThisYear,
            at("2019-01-01 00:00:00"),
            at("2019-12-31 23:59:59"),
            12,
            true,
        )
        .await
        .unwrap();
    assert_eq!(manager.storage().view_storage().count::<OrderStatsRecord>(), 2);

    manager.reset_stored_stats().await.unwrap();

    assert_eq!(manager.storage().view_storage().count::<OrderStatsRecord>(), 0);
}

// ── Site visit stats ────────────────────────────────────────────────

#[tokio::test]
async fn site_visit_stats_use_site_timezone() {
    let (remote, manager) = setup();
    *remote.site_visit_stats.lock().unwrap() =
        Some(visit_stats(&[("2019-07-01", 3), ("2019-07-02", 5)]));

    // 02:00 UTC on Aug 1st is still July 31st five hours west.
    let latest = Utc.with_ymd_and_hms(2019, 8, 1, 2, 0, 0).unwrap();
    let tz = FixedOffset::west_opt(5 * 3600).unwrap();
    manager
        .retrieve_site_visit_stats(SITE, tz, AnalyticsRange::ThisMonth, latest)
        .await
        .unwrap();

    let requests = remote.visit_requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![(
            StatGranularity::Day,
            NaiveDate::from_ymd_opt(2019, 7, 31).unwrap(),
            31
        )]
    );

    let view = manager.storage().view_storage();
    let record = view.site_visit_stats(SITE, "thisMonth").unwrap();
    assert_eq!(record.items.len(), 2);
    assert_eq!(record.items["2019-07-02"].visitors, 5);
}

#[tokio::test]
async fn site_visit_stats_errors_are_classified() {
    let cases = [
        (
            "unauthorized",
            "user cannot view stats",
            SiteVisitStatsStoreError::NoPermission,
        ),
        (
            "invalid_blog",
            "This blog does not have the Stats module enabled",
            SiteVisitStatsStoreError::StatsModuleDisabled,
        ),
    ];

    for (code, message, expected) in cases {
        let (remote, manager) = setup();
        *remote.site_visit_error.lock().unwrap() = Some((code.into(), message.into()));

        let err = manager
            .retrieve_site_visit_stats(
                SITE,
                FixedOffset::east_opt(0).unwrap(),
                AnalyticsRange::Today,
                Utc::now(),
            )
            .await
            .unwrap_err();

        match err {
            StoreError::SiteVisitStats(actual) => {
                assert_eq!(actual.to_string(), expected.to_string());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}

#[tokio::test]
async fn unrecognized_site_visit_error_keeps_remote_cause() {
    let (remote, manager) = setup();
    *remote.site_visit_error.lock().unwrap() = Some(("rest_forbidden".into(), "nope".into()));

    let err = manager
        .retrieve_site_visit_stats(
            SITE,
            FixedOffset::east_opt(0).unwrap(),
            AnalyticsRange::Today,
            Utc::now(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::SiteVisitStats(SiteVisitStatsStoreError::Unknown(_))
    ));
    assert!(err.remote().is_some());
}

// ── Top earners ─────────────────────────────────────────────────────

#[tokio::test]
async fn missing_products_leaderboard_is_an_error() {
    let (remote, manager) = setup();
    let mut other = top_products_board(&[1]);
    other.id = "customers".into();
    *remote.leaderboards.lock().unwrap() = vec![other];

    let err = retrieve_week_top_earners(&manager).await.unwrap_err();

    assert!(matches!(
        err,
        StoreError::Analytics(AnalyticsStoreError::MissingTopProducts)
    ));
    assert!(remote.product_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn top_earners_fetch_only_missing_products() {
    let (remote, manager) = setup();
    *remote.leaderboards.lock().unwrap() = vec![top_products_board(&[7, 8, 9])];
    *remote.products.lock().unwrap() = vec![product(7), product(8), product(9)];

    // Product 8 is already cached.
    manager
        .storage()
        .perform(woo_storage::ExecutionContext::Main, |ctx| {
            let mut record = ProductRecord::new(SITE, 8);
            record.name = "Product 8".into();
            record.price = "12.00".into();
            ctx.insert(record);
            Ok::<_, StoreError>(())
        })
        .await
        .unwrap();

    retrieve_week_top_earners(&manager).await.unwrap();
    assert_eq!(*remote.product_requests.lock().unwrap(), vec![vec![7, 9]]);

    // Everything is cached now.
    retrieve_week_top_earners(&manager).await.unwrap();
    assert_eq!(remote.product_requests.lock().unwrap().len(), 1);

    let view = manager.storage().view_storage();
    assert_eq!(view.count::<ProductRecord>(), 3);
    let stats = view.top_earner_stats(SITE, "week", "2019-W28").unwrap();
    assert_eq!(stats.limit, "3");
    assert_eq!(stats.items.len(), 3);
    assert_eq!(stats.items[&7].quantity, 10);
    assert_eq!(stats.items[&9].product_name, "Product 9");
}

// ── System plugins ──────────────────────────────────────────────────

#[tokio::test]
async fn plugin_sync_removes_stale_plugins() {
    let (remote, manager) = setup();
    *remote.plugins.lock().unwrap() = vec![plugin("Jetpack", true), plugin("Akismet", false)];
    manager.synchronize_system_plugins(SITE).await.unwrap();

    *remote.plugins.lock().unwrap() =
        vec![plugin("Jetpack", false), plugin("WooCommerce", true)];
    manager.synchronize_system_plugins(SITE).await.unwrap();

    let plugins = manager.fetch_system_plugins(SITE).await.unwrap();
    let names: Vec<&str> = plugins.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Jetpack", "WooCommerce"]);
    assert!(!plugins[0].active);
    assert_eq!(plugins[1], plugin("WooCommerce", true));
}

#[tokio::test]
async fn plugin_sync_leaves_other_sites_alone() {
    let (remote, manager) = setup();
    manager
        .storage()
        .perform(woo_storage::ExecutionContext::Main, |ctx| {
            ctx.insert(SystemPluginRecord::new(99, "Elsewhere"));
            Ok::<_, StoreError>(())
        })
        .await
        .unwrap();
    *remote.plugins.lock().unwrap() = vec![plugin("Jetpack", true)];

    manager.synchronize_system_plugins(SITE).await.unwrap();

    let view = manager.storage().view_storage();
    assert_eq!(view.system_plugins(99).len(), 1);
    assert_eq!(view.system_plugins(SITE).len(), 1);
}

#[tokio::test]
async fn empty_plugin_list_clears_site() {
    let (remote, manager) = setup();
    *remote.plugins.lock().unwrap() = vec![plugin("Jetpack", true)];
    manager.synchronize_system_plugins(SITE).await.unwrap();

    remote.plugins.lock().unwrap().clear();
    manager.synchronize_system_plugins(SITE).await.unwrap();

    assert!(manager.fetch_system_plugins(SITE).await.unwrap().is_empty());
}

// ── Sites ───────────────────────────────────────────────────────────

#[tokio::test]
async fn site_sync_replaces_stored_sites() {
    let (remote, manager) = setup();
    *remote.sites.lock().unwrap() = vec![site(1, "one"), site(2, "two")];
    manager.synchronize_sites().await.unwrap();

    *remote.sites.lock().unwrap() = vec![site(2, "deux")];
    let fetched = manager.synchronize_sites().await.unwrap();

    assert_eq!(fetched.len(), 1);
    assert_eq!(manager.storage().view_storage().count::<SiteRecord>(), 1);
    assert!(manager.site(1).is_none());
    let two = manager.site(2).unwrap();
    assert_eq!(two.name, "deux");
    assert_eq!(two.site_timezone(), FixedOffset::west_opt(5 * 3600).unwrap());
}

// ── Remote failures ─────────────────────────────────────────────────

#[tokio::test]
async fn failed_order_stats_sync_keeps_stored_stats() {
    let (remote, manager) = setup();
    *remote.order_stats.lock().unwrap() = Some(order_stats(vec![interval("2019-07-08", 2)]));
    retrieve_week_stats(&manager).await.unwrap();
    let before = manager.storage().view_storage().tables().clone();

    remote.fail(Endpoint::OrderStats);
    let err = retrieve_week_stats(&manager).await.unwrap_err();

    assert!(matches!(err, StoreError::Remote(_)), "got: {err:?}");
    assert_eq!(manager.storage().view_storage().tables(), &before);
    assert_eq!(stored_intervals(&manager), vec!["2019-07-08".to_string()]);
}

#[tokio::test]
async fn failed_leaderboards_call_stores_nothing() {
    let (remote, manager) = setup();
    remote.fail(Endpoint::Leaderboards);
    let before = manager.storage().view_storage().tables().clone();

    let err = retrieve_week_top_earners(&manager).await.unwrap_err();

    assert!(matches!(err, StoreError::Remote(_)), "got: {err:?}");
    assert!(remote.product_requests.lock().unwrap().is_empty());
    let view = manager.storage().view_storage();
    assert_eq!(view.tables(), &before);
    assert_eq!(view.count::<TopEarnerStatsRecord>(), 0);
}

#[tokio::test]
async fn failed_products_call_stores_no_top_earners() {
    let (remote, manager) = setup();
    *remote.leaderboards.lock().unwrap() = vec![top_products_board(&[11, 12])];
    *remote.products.lock().unwrap() = vec![product(11), product(12)];
    remote.fail(Endpoint::Products);
    let before = manager.storage().view_storage().tables().clone();

    let err = retrieve_week_top_earners(&manager).await.unwrap_err();

    assert!(matches!(err, StoreError::Remote(_)), "got: {err:?}");
    assert_eq!(*remote.product_requests.lock().unwrap(), vec![vec![11, 12]]);
    let view = manager.storage().view_storage();
    assert_eq!(view.tables(), &before);
    assert_eq!(view.count::<TopEarnerStatsRecord>(), 0);
    assert_eq!(view.count::<ProductRecord>(), 0);
}

#[tokio::test]
async fn failed_plugin_sync_keeps_stored_plugins() {
    let (remote, manager) = setup();
    *remote.plugins.lock().unwrap() = vec![plugin("jetpack", true), plugin("akismet", false)];
    manager.synchronize_system_plugins(SITE).await.unwrap();
    let before = manager.storage().view_storage().tables().clone();

    *remote.plugins.lock().unwrap() = Vec::new();
    remote.fail(Endpoint::SystemPlugins);
    let err = manager.synchronize_system_plugins(SITE).await.unwrap_err();

    assert!(matches!(err, StoreError::Remote(_)), "got: {err:?}");
    let view = manager.storage().view_storage();
    assert_eq!(view.tables(), &before);
    assert_eq!(view.count::<SystemPluginRecord>(), 2);
}

// ── Routing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn analytics_action_to_plugin_store_is_dropped() {
    let store = SystemPluginStore::new(Arc::new(FakeRemote::default()), StorageManager::in_memory());
    let (tx, rx) = oneshot::channel();
    let action = Action::from(AnalyticsAction::ResetStoredStats { on_completion: tx });

    let handled = tokio::spawn(async move { store.on_action(action).await }).await;

    // Debug builds panic; release builds log and drop the completion.
    assert_eq!(handled.is_err(), cfg!(debug_assertions));
    assert!(rx.await.is_err());
}

#[tokio::test]
async fn dispatcher_request_goes_through_registered_store() {
    let (remote, manager) = setup();
    *remote.plugins.lock().unwrap() = vec![plugin("Jetpack", true)];

    manager
        .dispatcher()
        .request(|on_completion| SystemPluginAction::SynchronizeSystemPlugins {
            site_id: SITE,
            on_completion,
        })
        .await
        .unwrap();

    let plugins = manager
        .dispatcher()
        .request(|on_completion| SystemPluginAction::FetchSystemPlugins {
            site_id: SITE,
            on_completion,
        })
        .await
        .unwrap();
    assert_eq!(plugins.len(), 1);
}
