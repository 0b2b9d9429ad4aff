//! Core types for the cardlist workspace.
//!
//! Holds the catalog record model, the [`Identifier`] slug type and the name
//! normalization rules used to derive candidate identifiers from card names.
//! Nothing in this crate performs I/O.

pub mod card;
pub mod identifier;
pub mod normalize;

pub use card::{CardRecord, COMMANDER_FORMAT, LEGAL};
pub use identifier::Identifier;
pub use normalize::{Candidate, CandidateStrategy, FACE_SEPARATOR, candidates, normalize};
