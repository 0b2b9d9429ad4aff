//! Validity oracle backed by EDHREC card pages.
//!
//! An identifier is considered valid when EDHREC serves a JSON card page for
//! it. The check never fails loudly: every problem is a "no".

pub mod client;
pub mod error;
pub mod oracle;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, EdhrecClient, OracleConfig, is_card_page};
pub use error::OracleError;
pub use oracle::ValidityOracle;
