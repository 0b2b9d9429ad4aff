//! cardlist CLI
//!
//! Builds and incrementally updates the list of card slugs that have a
//! valid EDHREC page.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

mod commands;
mod error;

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "cardlist")]
#[command(about = "Maintain the list of card slugs known to EDHREC", long_about = None)]
struct Cli {
    /// Show per-card rejections and HTTP details
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    update: UpdateArgs,
}

/// Arguments for an update run. All optional; settings and defaults fill in the rest.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct UpdateArgs {
    /// Card list to update (default: formatted_card_list.js)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read the catalog from a local oracle-cards JSON file instead of downloading it
    #[arg(long)]
    pub catalog_file: Option<PathBuf>,

    /// Base URL for card pages
    #[arg(long)]
    pub oracle_url: Option<String>,

    /// Minimum delay between card page requests, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Check cards but do not write the list
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and add newly confirmed cards (the default)
    Update(UpdateArgs),

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show resolved settings and where they came from
    Show,

    /// Print the settings file path
    Path,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        None => commands::update::run_update(cli.update, cli.quiet),
        Some(Commands::Update(args)) => commands::update::run_update(args, cli.quiet),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{} {}", "\u{2718}".if_supports_color(Stdout, |t| t.red()), e);
            ExitCode::FAILURE
        }
    }
}

/// Install env_logger. `RUST_LOG` wins over the flags when set.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "[{level}] {}", record.args()),
        })
        .init();
}

/// Log an empty line (keeps output readable between sections).
pub(crate) fn log_blank() {
    log::info!("");
}
