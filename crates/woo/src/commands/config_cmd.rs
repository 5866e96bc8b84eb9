//! Config subcommand handlers.

use woo_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;
use crate::output;

/// Copy of `cfg` with plaintext tokens masked, for display.
fn redacted(cfg: Config) -> Config {
    let mut cfg = cfg;
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some("********".into());
        }
    }
    cfg
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&woo_config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = redacted(woo_config::load_config()?);
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_default(),
                |c| c.default_profile.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::SetToken { token } => {
            let cfg = woo_config::load_config_or_default();
            let profile_name = active_profile_name(global, &cfg);
            woo_config::store_token(&profile_name, &token)?;
            output::print_status(
                &format!("Token stored in the system keyring for profile '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }
    }
}
