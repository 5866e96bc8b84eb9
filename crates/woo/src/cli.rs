//! Clap derive structures for the `woo` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

use woo_core::AnalyticsRange;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// woo -- WooCommerce store analytics from the command line
#[derive(Debug, Parser)]
#[command(
    name = "woo",
    version,
    about = "Sync and inspect WooCommerce store stats and plugins",
    long_about = "Fetches WooCommerce analytics and plugin inventory through the\n\
        WordPress.com API and keeps them in a local record cache.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Store profile to use
    #[arg(long, short = 'p', env = "WOO_PROFILE", global = true)]
    pub profile: Option<String>,

    /// WordPress.com site id (overrides profile)
    #[arg(long, short = 's', env = "WOO_SITE", global = true)]
    pub site: Option<i64>,

    /// WordPress.com bearer token
    #[arg(long, env = "WOO_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// API root (overrides profile)
    #[arg(long, env = "WOO_API_BASE", global = true)]
    pub api_base: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WOO_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "WOO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Keep records in memory instead of the profile's cache file
    #[arg(long, global = true)]
    pub no_cache: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Order, visitor and top earner stats
    Stats(StatsArgs),

    /// Installed plugins of the store
    #[command(alias = "plugin")]
    Plugins(PluginsArgs),

    /// Sites available to the token
    Sites(SitesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Stats ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Sync and show revenue stats
    Orders {
        #[command(flatten)]
        range: RangeArgs,

        /// Ask the server to bypass its report cache
        #[arg(long)]
        force_refresh: bool,
    },

    /// Sync and show visitor stats
    Visits {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Sync and show the best selling products
    TopEarners {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Delete all stored order stats
    Reset,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Time range to report on
    #[arg(long, short = 'r', default_value = "today")]
    pub range: RangeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RangeArg {
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
}

impl From<RangeArg> for AnalyticsRange {
    fn from(arg: RangeArg) -> Self {
        match arg {
            RangeArg::Today => Self::Today,
            RangeArg::ThisWeek => Self::ThisWeek,
            RangeArg::ThisMonth => Self::ThisMonth,
            RangeArg::ThisYear => Self::ThisYear,
        }
    }
}

// ── Plugins ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PluginsArgs {
    #[command(subcommand)]
    pub command: PluginsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PluginsCommand {
    /// Fetch plugins from the store and update the local cache
    Sync,

    /// List cached plugins
    #[command(alias = "ls")]
    List {
        /// Sync before listing
        #[arg(long)]
        refresh: bool,

        /// Only show active plugins
        #[arg(long)]
        active: bool,
    },
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List sites (syncs the local cache)
    #[command(alias = "ls")]
    List,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display the loaded configuration (tokens redacted)
    Show,

    /// Store a token in the system keyring
    SetToken {
        /// Token value
        token: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
