// ── DTO <-> record conversion ──
//
// `update_*` functions overwrite every field of a stored record from a
// freshly fetched DTO and reconcile its children. `ToDto` maps stored
// rows back to the immutable API types for readers.

use woo_api::models::{
    OrderStats, OrderStatsInterval, OrderStatsTotals, Product, ProductImage, Site,
    SiteVisitStats, SiteVisitStatsItem, StatGranularity, StatsGranularityV4, SystemPlugin,
    TopEarnerStats, TopEarnerStatsItem,
};
use woo_storage::{
    OrderStatsIntervalRecord, OrderStatsRecord, OrderStatsTotalsRecord, ProductRecord,
    ReconcileOutcome, SiteRecord, SiteVisitStatsItemRecord, SiteVisitStatsRecord,
    SystemPluginRecord, TopEarnerStatsItemRecord, TopEarnerStatsRecord, reconcile_children,
};

// ── Order stats ──────────────────────────────────────────────────────

pub fn update_order_stats(record: &mut OrderStatsRecord, stats: &OrderStats) -> ReconcileOutcome {
    record.site_id = stats.site_id;
    record.granularity = stats.granularity.to_string();
    record.totals = totals_record(&stats.totals);
    reconcile_children(
        &mut record.intervals,
        &stats.intervals,
        |interval| interval.interval.clone(),
        update_order_stats_interval,
    )
}

fn update_order_stats_interval(record: &mut OrderStatsIntervalRecord, interval: &OrderStatsInterval) {
    record.interval.clone_from(&interval.interval);
    record.date_start.clone_from(&interval.date_start);
    record.date_end.clone_from(&interval.date_end);
    record.subtotals = totals_record(&interval.subtotals);
}

fn totals_record(totals: &OrderStatsTotals) -> OrderStatsTotalsRecord {
    OrderStatsTotalsRecord {
        total_orders: totals.total_orders,
        total_items_sold: totals.total_items_sold,
        gross_revenue: totals.gross_revenue,
        coupons_discount: totals.coupons_discount,
        total_coupons: totals.total_coupons,
        refunds: totals.refunds,
        taxes: totals.taxes,
        shipping: totals.shipping,
        net_revenue: totals.net_revenue,
        total_products: totals.total_products,
        average_order_value: totals.average_order_value,
    }
}

// ── Site visit stats ─────────────────────────────────────────────────

pub fn update_site_visit_stats(
    record: &mut SiteVisitStatsRecord,
    stats: &SiteVisitStats,
) -> ReconcileOutcome {
    record.site_id = stats.site_id;
    record.date.clone_from(&stats.date);
    record.granularity = stats.granularity.to_string();
    reconcile_children(
        &mut record.items,
        &stats.items,
        |item| item.period.clone(),
        |child: &mut SiteVisitStatsItemRecord, item: &SiteVisitStatsItem| {
            child.period.clone_from(&item.period);
            child.visitors = item.visitors;
            child.views = item.views;
        },
    )
}

// ── Top earners ──────────────────────────────────────────────────────

pub fn update_top_earner_stats(
    record: &mut TopEarnerStatsRecord,
    stats: &TopEarnerStats,
) -> ReconcileOutcome {
    record.site_id = stats.site_id;
    record.date.clone_from(&stats.date);
    record.granularity = stats.granularity.to_string();
    record.limit.clone_from(&stats.limit);
    reconcile_children(
        &mut record.items,
        &stats.items,
        |item| item.product_id,
        |child: &mut TopEarnerStatsItemRecord, item: &TopEarnerStatsItem| {
            child.product_id = item.product_id;
            child.product_name.clone_from(&item.product_name);
            child.quantity = item.quantity;
            child.price = item.price;
            child.total = item.total;
            child.currency.clone_from(&item.currency);
            child.image_url.clone_from(&item.image_url);
        },
    )
}

// ── Flat records ─────────────────────────────────────────────────────

pub fn update_system_plugin(record: &mut SystemPluginRecord, plugin: &SystemPlugin) {
    *record = SystemPluginRecord {
        site_id: plugin.site_id,
        name: plugin.name.clone(),
        plugin: plugin.plugin.clone(),
        url: plugin.url.clone(),
        author_name: plugin.author_name.clone(),
        author_url: plugin.author_url.clone(),
        version: plugin.version.clone(),
        version_latest: plugin.version_latest.clone(),
        network_activated: plugin.network_activated,
        active: plugin.active,
    };
}

pub fn update_product(record: &mut ProductRecord, product: &Product) {
    *record = ProductRecord {
        site_id: product.site_id,
        product_id: product.product_id,
        name: product.name.clone(),
        price: product.price.clone(),
        permalink: product.permalink.clone(),
        images: product.images.iter().map(|i| i.src.clone()).collect(),
    };
}

pub fn update_site(record: &mut SiteRecord, site: &Site) {
    *record = SiteRecord {
        site_id: site.site_id,
        name: site.name.clone(),
        description: site.description.clone(),
        url: site.url.clone(),
        plan: site.plan.clone(),
        is_woocommerce_active: site.is_woocommerce_active,
        is_wordpress_store: site.is_wordpress_store,
        timezone: site.timezone.clone(),
        gmt_offset: site.gmt_offset,
    };
}

// ── Back to DTOs ─────────────────────────────────────────────────────

/// Map a stored record back to its immutable API type.
pub trait ToDto {
    type Dto;

    fn to_dto(&self) -> Self::Dto;
}

impl ToDto for SystemPluginRecord {
    type Dto = SystemPlugin;

    fn to_dto(&self) -> SystemPlugin {
        SystemPlugin {
            site_id: self.site_id,
            plugin: self.plugin.clone(),
            name: self.name.clone(),
            url: self.url.clone(),
            author_name: self.author_name.clone(),
            author_url: self.author_url.clone(),
            version: self.version.clone(),
            version_latest: self.version_latest.clone(),
            network_activated: self.network_activated,
            active: self.active,
        }
    }
}

impl ToDto for ProductRecord {
    type Dto = Product;

    fn to_dto(&self) -> Product {
        Product {
            site_id: self.site_id,
            product_id: self.product_id,
            name: self.name.clone(),
            price: self.price.clone(),
            permalink: self.permalink.clone(),
            images: self
                .images
                .iter()
                .map(|src| ProductImage { src: src.clone() })
                .collect(),
        }
    }
}

impl ToDto for SiteRecord {
    type Dto = Site;

    fn to_dto(&self) -> Site {
        Site {
            site_id: self.site_id,
            name: self.name.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            plan: self.plan.clone(),
            is_woocommerce_active: self.is_woocommerce_active,
            is_wordpress_store: self.is_wordpress_store,
            timezone: self.timezone.clone(),
            gmt_offset: self.gmt_offset,
        }
    }
}

impl ToDto for OrderStatsRecord {
    type Dto = OrderStats;

    fn to_dto(&self) -> OrderStats {
        OrderStats {
            site_id: self.site_id,
            granularity: self.granularity.parse().unwrap_or(StatsGranularityV4::Daily),
            totals: totals_dto(&self.totals),
            intervals: self
                .intervals
                .values()
                .map(|i| OrderStatsInterval {
                    interval: i.interval.clone(),
                    date_start: i.date_start.clone(),
                    date_end: i.date_end.clone(),
                    subtotals: totals_dto(&i.subtotals),
                })
                .collect(),
        }
    }
}

fn totals_dto(totals: &OrderStatsTotalsRecord) -> OrderStatsTotals {
    OrderStatsTotals {
        total_orders: totals.total_orders,
        total_items_sold: totals.total_items_sold,
        gross_revenue: totals.gross_revenue,
        coupons_discount: totals.coupons_discount,
        total_coupons: totals.total_coupons,
        refunds: totals.refunds,
        taxes: totals.taxes,
        shipping: totals.shipping,
        net_revenue: totals.net_revenue,
        total_products: totals.total_products,
        average_order_value: totals.average_order_value,
    }
}

impl ToDto for SiteVisitStatsRecord {
    type Dto = SiteVisitStats;

    fn to_dto(&self) -> SiteVisitStats {
        SiteVisitStats {
            site_id: self.site_id,
            date: self.date.clone(),
            granularity: self.granularity.parse().unwrap_or(StatGranularity::Day),
            items: self
                .items
                .values()
                .map(|i| SiteVisitStatsItem {
                    period: i.period.clone(),
                    visitors: i.visitors,
                    views: i.views,
                })
                .collect(),
        }
    }
}

impl ToDto for TopEarnerStatsRecord {
    type Dto = TopEarnerStats;

    /// Items come back ordered by quantity sold, highest first.
    fn to_dto(&self) -> TopEarnerStats {
        let mut items: Vec<TopEarnerStatsItem> = self
            .items
            .values()
            .map(|i| TopEarnerStatsItem {
                product_id: i.product_id,
                product_name: i.product_name.clone(),
                quantity: i.quantity,
                price: i.price,
                total: i.total,
                currency: i.currency.clone(),
                image_url: i.image_url.clone(),
            })
            .collect();
        items.sort_by(|a, b| b.quantity.cmp(&a.quantity));

        TopEarnerStats {
            site_id: self.site_id,
            date: self.date.clone(),
            granularity: self.granularity.parse().unwrap_or(StatGranularity::Day),
            limit: self.limit.clone(),
            items,
        }
    }
}
