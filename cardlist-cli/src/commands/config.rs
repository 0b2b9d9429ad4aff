use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cardlist_lib::settings::{ENV_CATALOG_FILE, ENV_ORACLE_URL, ENV_OUTPUT};
use cardlist_lib::{Overrides, RunConfig, Settings};

use crate::CliError;

/// Show the resolved settings for an update run.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = cardlist_lib::settings_path();

    log::info!("{}", "cardlist Configuration".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => log::info!(
            "  Settings file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => log::info!(
            "  Settings file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  Settings file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }

    let settings = Settings::load()?;
    let config = RunConfig::resolve(&settings, &Overrides::default())?;

    crate::log_blank();
    log::info!("  Output:         {}", config.output.display());
    match &config.catalog.file {
        Some(file) => log::info!("  Catalog file:   {}", file.display()),
        None => log::info!("  Catalog:        {}", config.catalog.bulk_data_url),
    }
    log::info!("  Card pages:     {}", config.oracle.base_url);
    log::info!("  Timeout:        {}s", config.oracle.timeout.as_secs());
    log::info!("  Request delay:  {}ms", config.request_delay.as_millis());

    crate::log_blank();
    for var in [ENV_OUTPUT, ENV_CATALOG_FILE, ENV_ORACLE_URL] {
        if let Ok(value) = std::env::var(var) {
            log::info!("  ${var} = {value}");
        }
    }

    if settings != Settings::default() {
        let current = toml::to_string_pretty(&settings)
            .map_err(|e| CliError::other(format!("Could not render settings: {e}")))?;
        crate::log_blank();
        log::info!("{}", "Settings file contents:".if_supports_color(Stdout, |t| t.bold()));
        for line in current.lines() {
            log::info!("  {line}");
        }
    }

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = cardlist_lib::settings_path()
        .ok_or_else(|| CliError::other("Could not determine config directory"))?;
    println!("{}", path.display());
    Ok(())
}
