use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cardlist_edhrec::EdhrecClient;
use cardlist_lib::{
    MergeEngine, MergeEvent, Overrides, RunConfig, Settings, SkipReason, Throttle, artifact,
};

use crate::{CliError, UpdateArgs};

/// Run one update: load the existing list, fetch the catalog, confirm new
/// cards and write the list back if it grew.
pub(crate) fn run_update(args: UpdateArgs, quiet: bool) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let overrides = Overrides {
        output: args.output,
        catalog_file: args.catalog_file,
        oracle_url: args.oracle_url,
        request_delay_ms: args.delay_ms,
    };
    let config = RunConfig::resolve(&settings, &overrides)?;

    let known = artifact::load(&config.output);
    let existing = known.len();

    let records = cardlist_scryfall::fetch_oracle_cards(&config.catalog)?;

    let client = EdhrecClient::new(config.oracle.clone())?;
    let mut engine = MergeEngine::new(client, Throttle::new(config.request_delay));

    log::info!(
        "Checking {} cards against EDHREC...",
        records.len().if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Skipping {existing} cards already in the list");

    let pb = progress_bar(records.len() as u64, quiet);
    let outcome = cardlist_lib::run_update(
        &config.output,
        known,
        &records,
        &mut engine,
        args.dry_run,
        |event| report(&pb, event),
    )?;
    pb.finish_and_clear();

    let summary = &outcome.summary;
    crate::log_blank();
    log::info!(
        "{} Finished!",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    log::info!("  Total cards in list: {}", summary.known_total);
    log::info!("  New cards checked:   {}", summary.checked);
    log::info!(
        "  New cards found:     {}",
        summary.found.if_supports_color(Stdout, |t| t.green()),
    );
    log::debug!(
        "  Skipped: {} ineligible, {} already known, {} unnamed; {} oracle requests",
        summary.ineligible,
        summary.already_known,
        summary.unnamed,
        summary.oracle_calls,
    );
    if outcome.written {
        log::info!("  File saved: {}", config.output.display());
    } else if summary.grew() {
        log::info!("  Dry run, not saved: {}", config.output.display());
    } else {
        log::info!("  No changes: {}", config.output.display());
    }

    Ok(())
}

fn progress_bar(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden());
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("static pattern")
            .progress_chars("=> "),
    );
    pb.enable_steady_tick(Duration::from_millis(200));
    pb
}

fn report(pb: &ProgressBar, event: MergeEvent) {
    match event {
        MergeEvent::Started { .. } | MergeEvent::Finished => {}
        MergeEvent::Skipped { name, reason, .. } => {
            pb.inc(1);
            if let SkipReason::Unnamed = reason {
                log::debug!("Skipping {name:?}: name has no usable characters");
            }
        }
        MergeEvent::Confirmed {
            checked,
            identifier,
            strategy,
            ..
        } => {
            pb.inc(1);
            pb.set_message(identifier.to_string());
            pb.suspend(|| {
                log::info!(
                    "[{checked}] {} {identifier} (NEW, {strategy})",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                );
            });
        }
        MergeEvent::Rejected { checked, tried, .. } => {
            pb.inc(1);
            let tried: Vec<String> = tried.iter().map(ToString::to_string).collect();
            pb.suspend(|| {
                log::debug!(
                    "[{checked}] {} {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    tried.join(" / "),
                );
            });
        }
    }
}
