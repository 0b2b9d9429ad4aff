use std::collections::HashSet;

use cardlist_core::{Candidate, CandidateStrategy, CardRecord, Identifier, candidates};
use cardlist_edhrec::ValidityOracle;

use crate::known_set::KnownSet;
use crate::throttle::Throttle;

/// Why a record was passed over without asking the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Commander legality is anything other than "legal".
    Ineligible,
    /// The name normalizes to nothing.
    Unnamed,
    /// A candidate reached before any confirmation is already in the list.
    AlreadyKnown(Identifier),
}

/// Progress updates emitted while the engine walks the catalog.
#[derive(Debug, Clone)]
pub enum MergeEvent {
    Started {
        total: usize,
    },
    Skipped {
        index: usize,
        name: String,
        reason: SkipReason,
    },
    /// A new identifier was confirmed and appended.
    Confirmed {
        index: usize,
        /// Running count of records sent to the oracle, this one included.
        checked: usize,
        identifier: Identifier,
        strategy: CandidateStrategy,
    },
    /// Every candidate for the record was rejected.
    Rejected {
        index: usize,
        checked: usize,
        name: String,
        tried: Vec<Identifier>,
    },
    Finished,
}

/// Counts for one merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Records in the catalog.
    pub total_records: usize,
    pub ineligible: usize,
    pub unnamed: usize,
    pub already_known: usize,
    /// Records that ended in a confirmation or a rejection.
    pub checked: usize,
    /// Records that produced a new identifier.
    pub found: usize,
    /// Records whose candidates were all rejected.
    pub rejected: usize,
    /// Individual oracle requests made.
    pub oracle_calls: usize,
    /// Size of the known set after the run.
    pub known_total: usize,
}

impl MergeSummary {
    /// Whether the run added anything, i.e. whether the artifact needs a rewrite.
    pub fn grew(&self) -> bool {
        self.found > 0
    }
}

/// Walks catalog records and grows a [`KnownSet`] with newly confirmed
/// identifiers.
///
/// Per record, in order:
/// 1. skip unless commander-legal
/// 2. derive the ordered candidates; skip if there are none
/// 3. walk the candidates in order: stop without adding anything at the
///    first one already known, otherwise ask the oracle and stop at the
///    first confirmation
///
/// Nothing in the loop fails the run; a record that cannot be confirmed is
/// simply not added.
pub struct MergeEngine<O> {
    oracle: O,
    throttle: Throttle,
}

impl<O: ValidityOracle> MergeEngine<O> {
    pub fn new(oracle: O, throttle: Throttle) -> Self {
        Self { oracle, throttle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn into_oracle(self) -> O {
        self.oracle
    }

    /// Process `records` in order, appending confirmed identifiers to `known`.
    pub fn run<F>(
        &mut self,
        records: &[CardRecord],
        known: &mut KnownSet,
        mut on_event: F,
    ) -> MergeSummary
    where
        F: FnMut(MergeEvent),
    {
        let mut summary = MergeSummary {
            total_records: records.len(),
            ..Default::default()
        };
        // Identifiers the oracle already turned down during this run
        let mut rejected: HashSet<Identifier> = HashSet::new();

        on_event(MergeEvent::Started {
            total: records.len(),
        });

        for (index, record) in records.iter().enumerate() {
            if !record.is_commander_legal() {
                summary.ineligible += 1;
                on_event(skipped(index, record, SkipReason::Ineligible));
                continue;
            }

            let candidates = candidates(&record.name);
            if candidates.is_empty() {
                summary.unnamed += 1;
                on_event(skipped(index, record, SkipReason::Unnamed));
                continue;
            }

            let mut verdict = Verdict::Rejected;
            for candidate in &candidates {
                if known.contains(&candidate.identifier) {
                    verdict = Verdict::Known(candidate);
                    break;
                }
                if rejected.contains(&candidate.identifier) {
                    continue;
                }
                self.throttle.wait();
                summary.oracle_calls += 1;
                if self.oracle.check(&candidate.identifier) {
                    verdict = Verdict::Confirmed(candidate);
                    break;
                }
                rejected.insert(candidate.identifier.clone());
            }

            match verdict {
                Verdict::Known(candidate) => {
                    summary.already_known += 1;
                    let reason = SkipReason::AlreadyKnown(candidate.identifier.clone());
                    on_event(skipped(index, record, reason));
                }
                Verdict::Confirmed(candidate) => {
                    known.insert(candidate.identifier.clone());
                    summary.checked += 1;
                    summary.found += 1;
                    on_event(MergeEvent::Confirmed {
                        index,
                        checked: summary.checked,
                        identifier: candidate.identifier.clone(),
                        strategy: candidate.strategy,
                    });
                }
                Verdict::Rejected => {
                    summary.checked += 1;
                    summary.rejected += 1;
                    on_event(MergeEvent::Rejected {
                        index,
                        checked: summary.checked,
                        name: record.name.clone(),
                        tried: candidates.iter().map(|c| c.identifier.clone()).collect(),
                    });
                }
            }
        }

        summary.known_total = known.len();
        on_event(MergeEvent::Finished);
        summary
    }
}

/// How the candidate walk for one record ended.
enum Verdict<'a> {
    /// Reached a candidate already in the list.
    Known(&'a Candidate),
    Confirmed(&'a Candidate),
    Rejected,
}

fn skipped(index: usize, record: &CardRecord, reason: SkipReason) -> MergeEvent {
    MergeEvent::Skipped {
        index,
        name: record.name.clone(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Oracle that confirms a fixed list and records every question.
    #[derive(Default)]
    struct ScriptedOracle {
        valid: HashSet<String>,
        calls: Vec<String>,
    }

    impl ScriptedOracle {
        fn confirming(ids: &[&str]) -> Self {
            Self {
                valid: ids.iter().map(|s| s.to_string()).collect(),
                calls: Vec::new(),
            }
        }
    }

    impl ValidityOracle for ScriptedOracle {
        fn check(&mut self, identifier: &Identifier) -> bool {
            self.calls.push(identifier.to_string());
            self.valid.contains(identifier.as_str())
        }
    }

    fn legal(name: &str) -> CardRecord {
        CardRecord::new(name).with_legality("commander", "legal")
    }

    fn run(oracle: &mut ScriptedOracle, records: &[CardRecord], known: &mut KnownSet) -> MergeSummary {
        MergeEngine::new(oracle, Throttle::disabled()).run(records, known, |_| {})
    }

    fn names(known: &KnownSet) -> Vec<&str> {
        known.iter().map(Identifier::as_str).collect()
    }

    #[test]
    fn test_plain_name_confirmed() {
        let mut oracle = ScriptedOracle::confirming(&["storm-crow"]);
        let mut known = KnownSet::new();
        let summary = run(&mut oracle, &[legal("Storm Crow")], &mut known);

        assert_eq!(names(&known), vec!["storm-crow"]);
        assert_eq!(summary.found, 1);
        assert_eq!(summary.checked, 1);
        assert_eq!(summary.oracle_calls, 1);
        assert!(summary.grew());
    }

    #[test]
    fn test_merged_tried_before_first_face() {
        let mut oracle = ScriptedOracle::confirming(&["fire"]);
        let mut known = KnownSet::new();
        let summary = run(&mut oracle, &[legal("Fire // Ice")], &mut known);

        assert_eq!(oracle.calls, vec!["fireice", "fire"]);
        assert_eq!(names(&known), vec!["fire"]);
        assert_eq!(summary.oracle_calls, 2);
    }

    #[test]
    fn test_merged_wins_when_confirmed() {
        let mut oracle = ScriptedOracle::confirming(&["fireice", "fire"]);
        let mut known = KnownSet::new();
        run(&mut oracle, &[legal("Fire // Ice")], &mut known);

        assert_eq!(oracle.calls, vec!["fireice"]);
        assert_eq!(names(&known), vec!["fireice"]);
    }

    #[test]
    fn test_rejected_record_adds_nothing() {
        let mut oracle = ScriptedOracle::default();
        let mut known = KnownSet::new();
        let summary = run(&mut oracle, &[legal("Fire // Ice")], &mut known);

        assert!(known.is_empty());
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.found, 0);
        assert!(!summary.grew());
    }

    #[test]
    fn test_ineligible_never_reaches_oracle() {
        let records = [
            CardRecord::new("Channel").with_legality("commander", "not_legal"),
            CardRecord::new("Storm Crow").with_legality("commander", "banned"),
            CardRecord::new("Storm Crow"),
        ];
        let mut oracle = ScriptedOracle::confirming(&["channel", "storm-crow"]);
        let mut known = KnownSet::new();
        let summary = run(&mut oracle, &records, &mut known);

        assert!(oracle.calls.is_empty());
        assert!(known.is_empty());
        assert_eq!(summary.ineligible, 3);
    }

    #[test]
    fn test_unnamed_never_reaches_oracle() {
        let mut oracle = ScriptedOracle::default();
        let mut known = KnownSet::new();
        let summary = run(&mut oracle, &[legal("???"), legal("// !!")], &mut known);

        assert!(oracle.calls.is_empty());
        assert_eq!(summary.unnamed, 2);
    }

    #[test]
    fn test_duplicate_names_checked_once() {
        let records = [legal("Storm Crow"), legal("Storm  Crow!"), legal("storm crow")];
        let mut oracle = ScriptedOracle::confirming(&["storm-crow"]);
        let mut known = KnownSet::new();
        let summary = run(&mut oracle, &records, &mut known);

        assert_eq!(oracle.calls, vec!["storm-crow"]);
        assert_eq!(names(&known), vec!["storm-crow"]);
        assert_eq!(summary.already_known, 2);
    }

    #[test]
    fn test_known_first_face_still_tries_merged() {
        let mut known: KnownSet = [Identifier::parse("fire").unwrap()].into_iter().collect();
        let mut oracle = ScriptedOracle::confirming(&["fireice"]);
        let summary = run(&mut oracle, &[legal("Fire // Ice")], &mut known);

        assert_eq!(oracle.calls, vec!["fireice"]);
        assert_eq!(names(&known), vec!["fire", "fireice"]);
        assert_eq!(summary.found, 1);
        assert_eq!(summary.already_known, 0);
    }

    #[test]
    fn test_known_first_face_stops_after_merged_rejection() {
        let mut known: KnownSet = [Identifier::parse("fire").unwrap()].into_iter().collect();
        let mut oracle = ScriptedOracle::confirming(&["fire"]);
        let summary = run(&mut oracle, &[legal("Fire // Ice")], &mut known);

        assert_eq!(oracle.calls, vec!["fireice"]);
        assert_eq!(names(&known), vec!["fire"]);
        assert_eq!(summary.already_known, 1);
        assert_eq!(summary.checked, 0);
        assert!(!summary.grew());
    }

    #[test]
    fn test_known_merged_makes_no_calls() {
        let mut known: KnownSet = [Identifier::parse("fireice").unwrap()].into_iter().collect();
        let mut oracle = ScriptedOracle::confirming(&["fire"]);
        let summary = run(&mut oracle, &[legal("Fire // Ice")], &mut known);

        assert!(oracle.calls.is_empty());
        assert_eq!(summary.already_known, 1);
        assert_eq!(names(&known), vec!["fireice"]);
    }

    #[test]
    fn test_rejections_not_repeated_within_run() {
        let records = [legal("Nope"), legal("Nope!"), legal("Fire // Ice"), legal("Fire // Ice")];
        let mut oracle = ScriptedOracle::default();
        let mut known = KnownSet::new();
        let summary = run(&mut oracle, &records, &mut known);

        assert_eq!(oracle.calls, vec!["nope", "fireice", "fire"]);
        assert_eq!(summary.checked, 4);
        assert_eq!(summary.rejected, 4);
        assert_eq!(summary.oracle_calls, 3);
    }

    #[test]
    fn test_new_entries_appended_after_existing() {
        let mut known: KnownSet = ["zzz", "aaa"]
            .into_iter()
            .map(|s| Identifier::parse(s).unwrap())
            .collect();
        let records = [legal("Storm Crow"), legal("Fire // Ice"), legal("Aaa")];
        let mut oracle = ScriptedOracle::confirming(&["storm-crow", "fire"]);
        let summary = run(&mut oracle, &records, &mut known);

        assert_eq!(names(&known), vec!["zzz", "aaa", "storm-crow", "fire"]);
        assert_eq!(summary.known_total, 4);
        assert_eq!(summary.found, 2);
    }

    #[test]
    fn test_call_bound_holds() {
        let records = [
            legal("A // B"),
            legal("C // D"),
            legal("E"),
            CardRecord::new("F // G").with_legality("commander", "not_legal"),
        ];
        let mut oracle = ScriptedOracle::confirming(&["c"]);
        let mut known = KnownSet::new();
        let summary = run(&mut oracle, &records, &mut known);

        assert!(summary.oracle_calls <= summary.checked * 2);
        assert_eq!(summary.checked, 3);
        assert_eq!(summary.oracle_calls, 5);
    }

    #[test]
    fn test_events_emitted_in_order() {
        let records = [
            legal("Storm Crow"),
            CardRecord::new("Channel").with_legality("commander", "banned"),
            legal("Nope"),
        ];
        let mut oracle = ScriptedOracle::confirming(&["storm-crow"]);
        let mut known = KnownSet::new();
        let mut events = Vec::new();
        MergeEngine::new(&mut oracle, Throttle::disabled()).run(&records, &mut known, |e| {
            events.push(e)
        });

        assert!(matches!(events[0], MergeEvent::Started { total: 3 }));
        assert!(matches!(
            &events[1],
            MergeEvent::Confirmed { index: 0, checked: 1, strategy: CandidateStrategy::Base, .. }
        ));
        assert!(matches!(
            &events[2],
            MergeEvent::Skipped { index: 1, reason: SkipReason::Ineligible, .. }
        ));
        assert!(matches!(&events[3], MergeEvent::Rejected { index: 2, checked: 2, .. }));
        assert!(matches!(events[4], MergeEvent::Finished));
        assert_eq!(events.len(), 5);
    }
}
