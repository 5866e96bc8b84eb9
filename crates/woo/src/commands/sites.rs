//! Site command handlers.

use tabled::Tabled;
use woo_api::models::Site;
use woo_core::StoresManager;

use crate::cli::{GlobalOpts, SitesArgs, SitesCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "WooCommerce")]
    woocommerce: String,
    #[tabled(rename = "Timezone")]
    timezone: String,
}

impl SiteRow {
    fn new(site: &Site, color: bool) -> Self {
        Self {
            id: site.site_id,
            name: site.name.clone(),
            url: site.url.clone(),
            woocommerce: output::yes_no(site.is_woocommerce_active, color),
            timezone: if site.timezone.is_empty() {
                site.site_timezone().to_string()
            } else {
                site.timezone.clone()
            },
        }
    }
}

pub async fn handle(
    manager: &StoresManager,
    args: SitesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List => {
            let sites = manager.synchronize_sites().await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &sites,
                |s| SiteRow::new(s, color),
                |s| s.site_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
