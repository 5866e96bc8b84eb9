//! Statistics command handlers.
//!
//! Each report syncs the range into the local cache first, then renders
//! what is stored.

use std::fmt::Write as _;

use chrono::{FixedOffset, NaiveDateTime, Utc};
use tabled::Tabled;
use woo_api::models::{OrderStats, OrderStatsInterval, SiteVisitStatsItem, TopEarnerStatsItem};
use woo_core::convert::ToDto;
use woo_core::{AnalyticsRange, StoresManager, build_date_string};

use crate::cli::{GlobalOpts, StatsArgs, StatsCommand};
use crate::error::CliError;
use crate::output;

use super::require_site;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct IntervalRow {
    #[tabled(rename = "Interval")]
    interval: String,
    #[tabled(rename = "Orders")]
    orders: i64,
    #[tabled(rename = "Items")]
    items: i64,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Net")]
    net: String,
}

impl IntervalRow {
    fn new(i: &OrderStatsInterval) -> Self {
        Self {
            interval: i.interval.clone(),
            orders: i.subtotals.total_orders,
            items: i.subtotals.total_items_sold,
            gross: format!("{:.2}", i.subtotals.gross_revenue),
            net: format!("{:.2}", i.subtotals.net_revenue),
        }
    }
}

#[derive(Tabled)]
struct VisitRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Visitors")]
    visitors: i64,
    #[tabled(rename = "Views")]
    views: i64,
}

impl VisitRow {
    fn new(i: &SiteVisitStatsItem) -> Self {
        Self {
            period: i.period.clone(),
            visitors: i.visitors,
            views: i.views,
        }
    }
}

#[derive(Tabled)]
struct TopEarnerRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Sold")]
    quantity: i64,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl TopEarnerRow {
    fn new(i: &TopEarnerStatsItem) -> Self {
        Self {
            name: i.product_name.clone(),
            id: i.product_id,
            quantity: i.quantity,
            price: format!("{:.2}", i.price),
            total: format!("{:.2}", i.total),
        }
    }
}

fn order_stats_detail(stats: &OrderStats) -> String {
    let t = &stats.totals;
    let mut out = String::new();
    let _ = writeln!(out, "Orders:        {}", t.total_orders);
    let _ = writeln!(out, "Items sold:    {}", t.total_items_sold);
    let _ = writeln!(out, "Gross revenue: {:.2}", t.gross_revenue);
    let _ = writeln!(out, "Net revenue:   {:.2}", t.net_revenue);
    let _ = writeln!(out, "Avg. order:    {:.2}", t.average_order_value);
    if !stats.intervals.is_empty() {
        let rows: Vec<IntervalRow> = stats.intervals.iter().map(IntervalRow::new).collect();
        out.push_str(&output::render_table(&rows));
    }
    out
}

// ── Site time ───────────────────────────────────────────────────────

/// The site's UTC offset, syncing the site list once if it is unknown.
async fn site_timezone(manager: &StoresManager, site_id: i64) -> Result<FixedOffset, CliError> {
    if let Some(site) = manager.site(site_id) {
        return Ok(site.site_timezone());
    }
    manager.synchronize_sites().await?;
    manager
        .site(site_id)
        .map(|site| site.site_timezone())
        .ok_or_else(|| CliError::NotFound {
            resource_type: "site".into(),
            identifier: site_id.to_string(),
            list_command: "sites list".into(),
        })
}

fn site_now(tz: FixedOffset) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    manager: &StoresManager,
    site_id: Option<i64>,
    args: StatsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StatsCommand::Orders {
            range,
            force_refresh,
        } => {
            let site_id = require_site(site_id)?;
            let range = AnalyticsRange::from(range.range);
            let now = site_now(site_timezone(manager, site_id).await?);
            let (earliest, latest) = range.bounds(now);

            manager
                .retrieve_stats(
                    site_id,
                    range,
                    earliest,
                    latest,
                    range.order_stats_quantity(now),
                    force_refresh,
                )
                .await?;

            let stats = manager
                .storage()
                .view_storage()
                .order_stats(site_id, range.as_str())
                .map(ToDto::to_dto)
                .ok_or_else(|| missing_report("order stats", range))?;

            let out = output::render_single(&global.output, &stats, order_stats_detail, |s| {
                s.totals.total_orders.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StatsCommand::Visits { range } => {
            let site_id = require_site(site_id)?;
            let range = AnalyticsRange::from(range.range);
            let tz = site_timezone(manager, site_id).await?;

            manager
                .retrieve_site_visit_stats(site_id, tz, range, Utc::now())
                .await?;

            let stats = manager
                .storage()
                .view_storage()
                .site_visit_stats(site_id, range.as_str())
                .map(ToDto::to_dto)
                .ok_or_else(|| missing_report("visit stats", range))?;

            let out = output::render_list(
                &global.output,
                &stats.items,
                VisitRow::new,
                |i| format!("{}\t{}", i.period, i.visitors),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StatsCommand::TopEarners { range } => {
            let site_id = require_site(site_id)?;
            let range = AnalyticsRange::from(range.range);
            let now = site_now(site_timezone(manager, site_id).await?);
            let (earliest, latest) = range.bounds(now);

            manager
                .retrieve_top_earner_stats(site_id, range, earliest, latest)
                .await?;

            let granularity = range.top_earner_stats_granularity();
            let date = build_date_string(latest, granularity);
            let stats = manager
                .storage()
                .view_storage()
                .top_earner_stats(site_id, &granularity.to_string(), &date)
                .map(ToDto::to_dto)
                .ok_or_else(|| missing_report("top earners", range))?;

            let out = output::render_list(
                &global.output,
                &stats.items,
                TopEarnerRow::new,
                |i| i.product_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StatsCommand::Reset => {
            manager.reset_stored_stats().await?;
            output::print_status("Stored order stats deleted", global.quiet);
            Ok(())
        }
    }
}

fn missing_report(what: &str, range: AnalyticsRange) -> CliError {
    CliError::Internal(format!("{what} for {range} missing from the cache after sync"))
}
