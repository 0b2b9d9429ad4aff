use std::path::Path;

use cardlist_core::CardRecord;
use cardlist_edhrec::ValidityOracle;

use crate::artifact;
use crate::error::ArtifactError;
use crate::known_set::KnownSet;
use crate::pipeline::{MergeEngine, MergeEvent, MergeSummary};

/// Result of one update run.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub summary: MergeSummary,
    /// The list after merging, previous entries first.
    pub known: KnownSet,
    /// Whether the artifact file was rewritten.
    pub written: bool,
}

/// Merge `records` into `known` and rewrite the artifact at `path` if the
/// list grew.
///
/// An unchanged list never touches the file. With `dry_run` the merge still
/// runs (and still queries the oracle) but nothing is written. The only error
/// is a failed write.
pub fn run_update<O, F>(
    path: &Path,
    mut known: KnownSet,
    records: &[CardRecord],
    engine: &mut MergeEngine<O>,
    dry_run: bool,
    on_event: F,
) -> Result<UpdateOutcome, ArtifactError>
where
    O: ValidityOracle,
    F: FnMut(MergeEvent),
{
    let summary = engine.run(records, &mut known, on_event);

    let written = if !summary.grew() {
        log::debug!("No new cards; leaving {} untouched", path.display());
        false
    } else if dry_run {
        log::info!("Dry run: not writing {}", path.display());
        false
    } else {
        artifact::write(&known, path)?;
        true
    };

    Ok(UpdateOutcome {
        summary,
        known,
        written,
    })
}
