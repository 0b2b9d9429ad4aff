use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use cardlist_core::CardRecord;

use crate::error::CatalogError;

pub const DEFAULT_BULK_DATA_URL: &str = "https://api.scryfall.com/bulk-data";

/// Bulk dataset type holding one record per oracle card.
pub const ORACLE_CARDS: &str = "oracle_cards";

const INDEX_TIMEOUT: Duration = Duration::from_secs(10);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Where the catalog comes from.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Scryfall bulk-data index URL.
    pub bulk_data_url: String,
    /// Local oracle-cards JSON file. When set, no network access is made.
    pub file: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            bulk_data_url: DEFAULT_BULK_DATA_URL.to_string(),
            file: None,
        }
    }
}

/// Response of the bulk-data index endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDataIndex {
    pub data: Vec<BulkDataEntry>,
}

/// One downloadable dataset listed in the bulk-data index.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDataEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub download_uri: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl BulkDataIndex {
    /// Find the dataset of the given type.
    pub fn find(&self, kind: &str) -> Option<&BulkDataEntry> {
        self.data.iter().find(|entry| entry.kind == kind)
    }
}

/// Load the catalog described by `config`.
///
/// Reads the local file when one is configured, otherwise resolves the
/// oracle-cards dataset through the bulk-data index and downloads it.
pub fn fetch_oracle_cards(config: &CatalogConfig) -> Result<Vec<CardRecord>, CatalogError> {
    if let Some(path) = &config.file {
        return load_catalog_file(path);
    }

    log::info!("Fetching Scryfall bulk data info...");
    let http = reqwest::blocking::Client::builder()
        .user_agent(concat!("cardlist/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let index: BulkDataIndex = get_json(&http, &config.bulk_data_url, INDEX_TIMEOUT)?;
    let entry = index
        .find(ORACLE_CARDS)
        .ok_or_else(|| CatalogError::missing_dataset(ORACLE_CARDS))?;

    log::info!("Downloading oracle cards from Scryfall...");
    log::info!("  URL: {}", entry.download_uri);
    log::info!(
        "  Size: {} bytes ({:.1} MB)",
        entry.size,
        entry.size as f64 / 1024.0 / 1024.0
    );
    if let Some(updated) = &entry.updated_at {
        log::debug!("  Updated: {updated}");
    }

    let cards: Vec<CardRecord> = get_json(&http, &entry.download_uri, DOWNLOAD_TIMEOUT)?;
    log::info!("Loaded {} cards from Scryfall", cards.len());
    Ok(cards)
}

/// Parse a local oracle-cards JSON file.
pub fn load_catalog_file(path: &Path) -> Result<Vec<CardRecord>, CatalogError> {
    log::info!("Reading catalog from {}", path.display());
    let file = File::open(path)?;
    let cards = parse_catalog(BufReader::new(file))?;
    log::info!("Loaded {} cards from {}", cards.len(), path.display());
    Ok(cards)
}

/// Parse a catalog JSON array from any reader.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<CardRecord>, CatalogError> {
    Ok(serde_json::from_reader(reader)?)
}

fn get_json<T: serde::de::DeserializeOwned>(
    http: &reqwest::blocking::Client,
    url: &str,
    timeout: Duration,
) -> Result<T, CatalogError> {
    let response = http.get(url).timeout(timeout).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    // Stream straight into serde; the oracle dump is large
    Ok(serde_json::from_reader(BufReader::new(response))?)
}
