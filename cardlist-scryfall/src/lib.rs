pub mod bulk;
pub mod error;

pub use bulk::{
    BulkDataEntry, BulkDataIndex, CatalogConfig, DEFAULT_BULK_DATA_URL, ORACLE_CARDS,
    fetch_oracle_cards, load_catalog_file, parse_catalog,
};
pub use error::CatalogError;
