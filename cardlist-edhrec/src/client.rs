use std::time::Duration;

use cardlist_core::Identifier;
use serde_json::Value;

use crate::error::OracleError;
use crate::oracle::ValidityOracle;

pub const DEFAULT_BASE_URL: &str = "https://json.edhrec.com/pages/cards";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for [`EdhrecClient`].
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Base URL; card pages live at `<base_url>/<identifier>.json`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking HTTP client for EDHREC JSON card pages.
pub struct EdhrecClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl EdhrecClient {
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(OracleError::config("oracle base URL is empty"));
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("cardlist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// URL of the card page for `identifier`.
    pub fn page_url(&self, identifier: &Identifier) -> String {
        format!("{}/{}.json", self.base_url, identifier)
    }

    /// Fetch the card page and verify its shape.
    ///
    /// Exposed separately from [`ValidityOracle::check`] so callers can see
    /// why a lookup failed.
    pub fn fetch_card_page(&self, identifier: &Identifier) -> Result<(), OracleError> {
        let resp = self.http.get(self.page_url(identifier)).send()?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(OracleError::Status(status.as_u16()));
        }

        let text = resp.text()?;
        let page: Value = serde_json::from_str(&text)?;
        if is_card_page(&page) {
            Ok(())
        } else {
            Err(OracleError::MissingFields)
        }
    }
}

impl ValidityOracle for EdhrecClient {
    fn check(&mut self, identifier: &Identifier) -> bool {
        match self.fetch_card_page(identifier) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{identifier}: {e}");
                false
            }
        }
    }
}

/// True if `page` looks like an EDHREC card page, i.e. it has both
/// `inclusion` and `potential_decks` under `container.json_dict.card`.
pub fn is_card_page(page: &Value) -> bool {
    let Some(card) = page
        .get("container")
        .and_then(|c| c.get("json_dict"))
        .and_then(|d| d.get("card"))
        .and_then(Value::as_object)
    else {
        return false;
    };
    card.contains_key("inclusion") && card.contains_key("potential_decks")
}
