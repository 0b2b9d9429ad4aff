//! Card name to identifier normalization.
//!
//! A plain name goes through a single base rule:
//! ```text
//! "Ach! Hans, Run!"  ->  "ach-hans-run"
//! ```
//! Names containing the face separator produce an ordered list of candidates.
//! The merged form (all faces concatenated) comes first because some compound
//! cards are keyed by their combined name; the first face alone is the
//! fallback for cards whose faces each have their own page.
//! ```text
//! "Fire // Ice"  ->  ["fireice", "fire"]
//! ```

use std::fmt;

use crate::identifier::Identifier;

/// Token joining the faces of a multi-faced card name.
pub const FACE_SEPARATOR: &str = "//";

/// Apply the base normalization rule to a free-form name.
///
/// Lowercases, drops every character outside `a-z`, `0-9`, hyphen and space,
/// turns spaces into hyphens and collapses hyphen runs. Returns `None` when
/// nothing survives.
///
/// # Examples
///
/// ```
/// use cardlist_core::normalize;
///
/// assert_eq!(normalize("Storm Crow").unwrap().as_str(), "storm-crow");
/// assert_eq!(normalize("Borrowing 100,000 Arrows").unwrap().as_str(), "borrowing-100000-arrows");
/// assert!(normalize("???").is_none());
/// ```
pub fn normalize(name: &str) -> Option<Identifier> {
    let mut slug = String::with_capacity(name.len());

    for ch in name.chars().flat_map(char::to_lowercase) {
        match ch {
            'a'..='z' | '0'..='9' => slug.push(ch),
            ' ' | '-' => {
                if !slug.is_empty() && !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            _ => {}
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        None
    } else {
        Some(Identifier::from_normalized(slug))
    }
}

/// How a candidate identifier was derived from the card name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateStrategy {
    /// Every face concatenated with the separator removed.
    Merged,
    /// Only the text before the first separator.
    FirstFace,
    /// Whole name, no separator present.
    Base,
}

impl CandidateStrategy {
    /// Strategies tried for a name, in priority order.
    pub fn for_name(name: &str) -> &'static [CandidateStrategy] {
        if name.contains(FACE_SEPARATOR) {
            &[CandidateStrategy::Merged, CandidateStrategy::FirstFace]
        } else {
            &[CandidateStrategy::Base]
        }
    }

    /// Derive this strategy's identifier for `name`.
    pub fn apply(self, name: &str) -> Option<Identifier> {
        match self {
            CandidateStrategy::Base => normalize(name),
            CandidateStrategy::Merged => {
                let merged: String = name.split(FACE_SEPARATOR).map(str::trim).collect();
                normalize(&merged)
            }
            CandidateStrategy::FirstFace => {
                let front = name.split(FACE_SEPARATOR).next().unwrap_or_default();
                normalize(front)
            }
        }
    }
}

impl fmt::Display for CandidateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateStrategy::Merged => write!(f, "merged"),
            CandidateStrategy::FirstFace => write!(f, "first face"),
            CandidateStrategy::Base => write!(f, "name"),
        }
    }
}

/// A candidate identifier together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub strategy: CandidateStrategy,
    pub identifier: Identifier,
}

/// Ordered candidate list for a card name.
///
/// Strategies whose output is empty are dropped, and an identifier already
/// produced by an earlier strategy is not repeated. An empty list means the
/// name cannot yield any identifier.
pub fn candidates(name: &str) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::with_capacity(2);
    for &strategy in CandidateStrategy::for_name(name) {
        let Some(identifier) = strategy.apply(name) else {
            continue;
        };
        if out.iter().any(|c| c.identifier == identifier) {
            continue;
        }
        out.push(Candidate {
            strategy,
            identifier,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(name: &str) -> String {
        normalize(name).map(Identifier::into_string).unwrap_or_default()
    }

    #[test]
    fn test_base_rule() {
        assert_eq!(slug("Storm Crow"), "storm-crow");
        assert_eq!(slug("Ach! Hans, Run!"), "ach-hans-run");
        assert_eq!(slug("Urza's Saga"), "urzas-saga");
        assert_eq!(slug("  Padded   Name  "), "padded-name");
    }

    #[test]
    fn test_hyphen_runs_collapse() {
        assert_eq!(slug("Smelt - Herd - Saw"), "smelt-herd-saw");
        assert_eq!(slug("Lim-Dûl's Vault"), "lim-dls-vault");
        assert_eq!(slug("-Edge-"), "edge");
    }

    #[test]
    fn test_non_space_whitespace_is_stripped() {
        // Only the plain space separates words; tabs and newlines are dropped
        assert_eq!(slug("Storm\tCrow"), "stormcrow");
    }

    #[test]
    fn test_empty_after_strip() {
        assert!(normalize("").is_none());
        assert!(normalize("!!! ???").is_none());
        assert!(normalize(" - ").is_none());
    }

    #[test]
    fn test_strategies_for_plain_name() {
        assert_eq!(CandidateStrategy::for_name("Storm Crow"), &[CandidateStrategy::Base]);
    }

    #[test]
    fn test_strategies_for_faced_name() {
        assert_eq!(
            CandidateStrategy::for_name("Fire // Ice"),
            &[CandidateStrategy::Merged, CandidateStrategy::FirstFace]
        );
    }

    #[test]
    fn test_merged_drops_separator_without_space() {
        let id = CandidateStrategy::Merged.apply("Fire // Ice").unwrap();
        assert_eq!(id.as_str(), "fireice");
    }

    #[test]
    fn test_first_face() {
        let id = CandidateStrategy::FirstFace
            .apply("Delver of Secrets // Insectile Aberration")
            .unwrap();
        assert_eq!(id.as_str(), "delver-of-secrets");
    }

    #[test]
    fn test_candidates_order() {
        let list = candidates("Fire // Ice");
        let ids: Vec<&str> = list.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["fireice", "fire"]);
        assert_eq!(list[0].strategy, CandidateStrategy::Merged);
        assert_eq!(list[1].strategy, CandidateStrategy::FirstFace);
    }

    #[test]
    fn test_candidates_skip_empty_and_duplicates() {
        // Back face is all punctuation: merged and first face agree
        let list = candidates("Who // ???");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].identifier.as_str(), "who");
        assert_eq!(list[0].strategy, CandidateStrategy::Merged);

        // Front face empty: only the merged candidate remains
        let list = candidates("?? // What");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].identifier.as_str(), "what");

        assert!(candidates("// ").is_empty());
    }
}
