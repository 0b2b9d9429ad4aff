use std::fmt;

use serde::{Deserialize, Serialize};

/// A card slug keying one entry of the card list.
///
/// Slugs built by [`crate::normalize`] or [`Identifier::parse`] have the
/// canonical shape: lowercase `[a-z0-9-]`, words joined by single hyphens, no
/// leading or trailing hyphen. Slugs read back from a stored list through
/// [`Identifier::from_stored`] are kept exactly as written, since older lists
/// can hold entries such as `"smelt--herd"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate an already-normalized token, e.g. one read back from disk.
    ///
    /// Returns `None` if the token is empty or breaks the slug shape.
    /// No normalization is attempted; use [`crate::normalize`] for raw names.
    pub fn parse(token: &str) -> Option<Self> {
        if is_valid_slug(token) {
            Some(Self(token.to_string()))
        } else {
            None
        }
    }

    /// Accept a token read back from a stored card list as-is.
    ///
    /// Only tokens the script list format cannot hold are refused: empty
    /// ones, and ones containing a comma or a control character.
    pub fn from_stored(token: &str) -> Option<Self> {
        let storable =
            !token.is_empty() && !token.chars().any(|c| c == ',' || c.is_control());
        storable.then(|| Self(token.to_string()))
    }

    /// Wrap a string the normalizer has already produced.
    pub(crate) fn from_normalized(slug: String) -> Self {
        debug_assert!(is_valid_slug(&slug), "normalizer produced {slug:?}");
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn is_valid_slug(s: &str) -> bool {
    if s.is_empty() || s.starts_with('-') || s.ends_with('-') || s.contains("--") {
        return false;
    }
    s.bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_slug(&value) {
            Ok(Self(value))
        } else {
            Err(format!("invalid card identifier: {value:?}"))
        }
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_slugs() {
        for ok in ["storm-crow", "fire", "borrowing-100000-arrows", "a-b-c", "x1"] {
            assert_eq!(Identifier::parse(ok).unwrap().as_str(), ok);
        }
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for bad in ["", "-lead", "trail-", "dou--ble", "Upper", "with space", "tab\t", "ümlaut"] {
            assert!(Identifier::parse(bad).is_none(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_from_stored_keeps_legacy_tokens() {
        for ok in ["smelt--herd", "storm-crow", "Old Entry", "-odd-"] {
            assert_eq!(Identifier::from_stored(ok).unwrap().as_str(), ok);
        }
        for bad in ["", "a,b", "line\nbreak", "tab\tbed"] {
            assert!(Identifier::from_stored(bad).is_none(), "{bad:?} should be refused");
        }
    }

    #[test]
    fn test_serde_roundtrip_as_plain_string() {
        let id = Identifier::parse("storm-crow").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"storm-crow\"");
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: Result<Identifier, _> = serde_json::from_str("\"Storm Crow\"");
        assert!(result.is_err());
    }
}
