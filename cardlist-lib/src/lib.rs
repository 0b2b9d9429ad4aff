//! cardlist library
//!
//! Keeps a persisted list of card identifiers confirmed against EDHREC up to
//! date. The flow of one update run:
//!
//! 1. [`artifact::load`] the previous list into a [`KnownSet`]
//! 2. run the [`MergeEngine`] over the catalog, confirming new identifiers
//! 3. [`artifact::write`] the list back, only if it grew

pub mod artifact;
pub mod error;
pub mod known_set;
pub mod pipeline;
pub mod settings;
pub mod throttle;
pub mod update;

pub use artifact::ArtifactFormat;
pub use error::{ArtifactError, SettingsError};
pub use known_set::KnownSet;
pub use pipeline::{MergeEngine, MergeEvent, MergeSummary, SkipReason};
pub use settings::{Overrides, RunConfig, Settings, settings_path};
pub use throttle::Throttle;
pub use update::{UpdateOutcome, run_update};

// Re-export the pieces callers need to drive a run
pub use cardlist_core::{CardRecord, Identifier};
pub use cardlist_edhrec::{EdhrecClient, ValidityOracle};
