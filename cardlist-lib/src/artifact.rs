//! The persisted card list.
//!
//! The default artifact is a small script that a web page can include
//! directly:
//! ```text
//! // Card list as a global variable for local testing
//! // Updated at: 2026-10-18 09:30:00
//!
//! window.cardList = [
//!   "fire",
//!   "storm-crow"
//! ];
//! ```
//! A path ending in `.json` stores the same list as a plain JSON array.

use std::fs;
use std::path::Path;

use cardlist_core::Identifier;

use crate::error::ArtifactError;
use crate::known_set::KnownSet;

pub const START_MARKER: &str = "window.cardList = [";
pub const END_MARKER: &str = "];";

const HEADER: &str = "// Card list as a global variable for local testing";

/// On-disk layout of the artifact, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// `window.cardList = [...]` script.
    Script,
    /// JSON array of strings.
    Json,
}

impl ArtifactFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Script,
        }
    }
}

/// Load the previous run's list, never failing.
///
/// A missing file is the normal first-run case and yields an empty set. Any
/// other problem is logged as a warning and also yields an empty set.
pub fn load(path: &Path) -> KnownSet {
    match read(path) {
        Ok(known) => {
            log::info!("Found {} existing cards in {}", known.len(), path.display());
            known
        }
        Err(ArtifactError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("{} not found, starting with empty list", path.display());
            KnownSet::new()
        }
        Err(e) => {
            log::warn!("Error reading {}: {e}", path.display());
            KnownSet::new()
        }
    }
}

/// Read and parse an artifact, reporting every failure.
pub fn read(path: &Path) -> Result<KnownSet, ArtifactError> {
    let text = fs::read_to_string(path)?;
    match ArtifactFormat::for_path(path) {
        ArtifactFormat::Script => parse_script(&text),
        ArtifactFormat::Json => parse_json(&text),
    }
}

/// Extract the quoted identifiers between the start and end markers.
///
/// Entries may be split across lines or packed on one line; surrounding
/// whitespace, commas and quotes are trimmed. Every quoted token is kept as
/// written, including ones that are not in today's slug shape. Unquoted
/// entries are skipped with a warning.
pub fn parse_script(text: &str) -> Result<KnownSet, ArtifactError> {
    let start = text
        .find(START_MARKER)
        .ok_or(ArtifactError::MissingMarker(START_MARKER))?
        + START_MARKER.len();
    let len = text[start..]
        .find(END_MARKER)
        .ok_or(ArtifactError::MissingMarker(END_MARKER))?;
    let body = &text[start..start + len];

    let mut known = KnownSet::new();
    for raw in body.split(['\n', ',']) {
        let entry = raw.trim();
        if entry.is_empty() {
            continue;
        }
        let Some(token) = entry
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        else {
            log::warn!("Skipping unquoted entry {entry:?}");
            continue;
        };
        push_token(&mut known, token.trim());
    }
    Ok(known)
}

/// Parse a JSON array artifact.
pub fn parse_json(text: &str) -> Result<KnownSet, ArtifactError> {
    let tokens: Vec<String> = serde_json::from_str(text)?;
    let mut known = KnownSet::new();
    for token in &tokens {
        push_token(&mut known, token);
    }
    Ok(known)
}

fn push_token(known: &mut KnownSet, token: &str) {
    if token.is_empty() {
        return;
    }
    match Identifier::from_stored(token) {
        Some(id) => {
            known.insert(id);
        }
        None => log::warn!("Skipping unstorable entry {token:?}"),
    }
}

/// Render the script artifact. `updated_at` goes in the header comment.
pub fn render(known: &KnownSet, updated_at: &str) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(&format!("// Updated at: {updated_at}\n\n"));
    out.push_str(START_MARKER);
    out.push('\n');

    let last = known.len().saturating_sub(1);
    for (i, id) in known.iter().enumerate() {
        let comma = if i < last { "," } else { "" };
        out.push_str(&format!("  \"{id}\"{comma}\n"));
    }

    out.push_str(END_MARKER);
    out.push('\n');
    out
}

/// Render the JSON array artifact.
pub fn render_json(known: &KnownSet) -> Result<String, ArtifactError> {
    let mut text = serde_json::to_string_pretty(known.as_slice())?;
    text.push('\n');
    Ok(text)
}

/// Write `known` to `path`, replacing any previous artifact.
///
/// The file is written to a temporary sibling and renamed into place, so a
/// failed write leaves the previous artifact intact.
pub fn write(known: &KnownSet, path: &Path) -> Result<(), ArtifactError> {
    let contents = match ArtifactFormat::for_path(path) {
        ArtifactFormat::Script => render(known, &timestamp()),
        ArtifactFormat::Json => render_json(known)?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = Path::new(&tmp_name);
    fs::write(tmp, contents)?;
    fs::rename(tmp, path)?;
    Ok(())
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
