//! Plugin command handlers.

use tabled::Tabled;
use woo_api::models::SystemPlugin;
use woo_core::StoresManager;

use crate::cli::{GlobalOpts, PluginsArgs, PluginsCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PluginRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Latest")]
    latest: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Author")]
    author: String,
}

impl PluginRow {
    fn new(plugin: &SystemPlugin, color: bool) -> Self {
        Self {
            name: plugin.name.clone(),
            version: plugin.version.clone(),
            latest: plugin.version_latest.clone(),
            active: output::yes_no(plugin.active, color),
            author: plugin.author_name.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    manager: &StoresManager,
    site_id: i64,
    args: PluginsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PluginsCommand::Sync => {
            manager.synchronize_system_plugins(site_id).await?;
            let count = manager.fetch_system_plugins(site_id).await?.len();
            output::print_status(&format!("Synchronized {count} plugins"), global.quiet);
            Ok(())
        }

        PluginsCommand::List { refresh, active } => {
            if refresh {
                manager.synchronize_system_plugins(site_id).await?;
            }
            let mut plugins = manager.fetch_system_plugins(site_id).await?;
            if active {
                plugins.retain(|p| p.active);
            }

            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &plugins,
                |p| PluginRow::new(p, color),
                |p| p.plugin.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
