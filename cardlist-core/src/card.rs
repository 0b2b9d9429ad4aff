use std::collections::HashMap;

use serde::Deserialize;

/// Format key checked by the eligibility gate.
pub const COMMANDER_FORMAT: &str = "commander";

/// Legality status a record must carry to be considered.
pub const LEGAL: &str = "legal";

/// A single entry from the bulk oracle-cards catalog.
///
/// Only the fields the pipeline looks at are modelled; everything else in
/// the catalog JSON is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardRecord {
    /// Card name as printed. Multi-faced cards join faces with `" // "`.
    pub name: String,
    /// Format name (e.g. "commander") to status (e.g. "legal", "not_legal").
    #[serde(default)]
    pub legalities: HashMap<String, String>,
}

impl CardRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            legalities: HashMap::new(),
        }
    }

    /// Builder-style helper to set one legality entry.
    pub fn with_legality(mut self, format: impl Into<String>, status: impl Into<String>) -> Self {
        self.legalities.insert(format.into(), status.into());
        self
    }

    /// Status string for `format`, if the catalog lists one.
    pub fn legality(&self, format: &str) -> Option<&str> {
        self.legalities.get(format).map(String::as_str)
    }

    /// True only when the commander status is exactly `"legal"`.
    pub fn is_commander_legal(&self) -> bool {
        self.legality(COMMANDER_FORMAT) == Some(LEGAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commander_legal() {
        let card = CardRecord::new("Storm Crow").with_legality("commander", "legal");
        assert!(card.is_commander_legal());
    }

    #[test]
    fn test_commander_not_legal_or_missing() {
        let banned = CardRecord::new("Channel").with_legality("commander", "banned");
        assert!(!banned.is_commander_legal());

        let absent = CardRecord::new("Storm Crow").with_legality("vintage", "legal");
        assert!(!absent.is_commander_legal());

        // Status comparison is exact
        let shouting = CardRecord::new("Storm Crow").with_legality("commander", "LEGAL");
        assert!(!shouting.is_commander_legal());
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{
            "object": "card",
            "name": "Fire // Ice",
            "mana_cost": "{1}{R} // {1}{U}",
            "legalities": {"commander": "legal", "standard": "not_legal"}
        }"#;
        let card: CardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(card.name, "Fire // Ice");
        assert_eq!(card.legality("standard"), Some("not_legal"));
        assert!(card.is_commander_legal());
    }

    #[test]
    fn test_deserialize_without_legalities() {
        let card: CardRecord = serde_json::from_str(r#"{"name": "Token"}"#).unwrap();
        assert!(card.legalities.is_empty());
        assert!(!card.is_commander_legal());
    }
}
