//! Google Sheets source
//!
//! Reads the formats and localizations tabs of one spreadsheet through the
//! Sheets API v4 `values` endpoint. Values are requested unformatted, so
//! numbers and booleans arrive as typed cells.
//!
//! # Authentication
//!
//! The source loads the API key from the `GOOGLE_SHEETS_API_KEY`
//! environment variable. The spreadsheet must be readable with that key.
//!
//! # Example
//!
//! ```ignore
//! use sheetloc::source::{GoogleSheetsSource, Source};
//!
//! let source = GoogleSheetsSource::from_env("1AbC...", "formats", "localizations")?;
//! let rows = source.localizations().await?;
//! ```

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use crate::RawRow;
use crate::error::{Error, Result};
use crate::source::Source;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Response body of `spreadsheets.values.get`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    /// Absent when the requested range has no data.
    #[serde(default)]
    values: Vec<RawRow>,
}

#[derive(Clone)]
pub struct GoogleSheetsSource {
    api_key: String,
    spreadsheet_id: String,
    formats_tab: String,
    localizations_tab: String,
    client: reqwest::Client,
    base_url: String,
}

impl GoogleSheetsSource {
    pub fn new(
        api_key: String,
        spreadsheet_id: &str,
        formats_tab: &str,
        localizations_tab: &str,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config("API key cannot be empty".to_string()));
        }
        if spreadsheet_id.trim().is_empty() {
            return Err(Error::Config("spreadsheet id cannot be empty".to_string()));
        }
        if formats_tab.is_empty() || localizations_tab.is_empty() {
            return Err(Error::Config("tab names cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            api_key,
            spreadsheet_id: spreadsheet_id.to_owned(),
            formats_tab: formats_tab.to_owned(),
            localizations_tab: localizations_tab.to_owned(),
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a source using the `GOOGLE_SHEETS_API_KEY` environment variable.
    pub fn from_env(spreadsheet_id: &str, formats_tab: &str, localizations_tab: &str) -> Result<Self> {
        let api_key = std::env::var("GOOGLE_SHEETS_API_KEY").map_err(|_| {
            Error::Config("GOOGLE_SHEETS_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key, spreadsheet_id, formats_tab, localizations_tab)
    }

    /// Point the source at a different API root, e.g. a local test server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// `<base>/<spreadsheet>/values/<tab>?key=...&valueRenderOption=UNFORMATTED_VALUE`
    fn values_url(&self, tab: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid Sheets API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config("Sheets API URL cannot be a base".to_string()))?
            .push(&self.spreadsheet_id)
            .push("values")
            .push(tab);
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("majorDimension", "ROWS")
            .append_pair("valueRenderOption", "UNFORMATTED_VALUE");
        Ok(url)
    }

    async fn fetch_tab(&self, tab: &str) -> Result<Vec<RawRow>> {
        let response = self.client.get(self.values_url(tab)?).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::SheetsApi { status, message });
        }

        let range: ValueRange = response.json().await?;
        Ok(range.values)
    }
}

impl std::fmt::Debug for GoogleSheetsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsSource")
            .field("api_key", &"***")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("formats_tab", &self.formats_tab)
            .field("localizations_tab", &self.localizations_tab)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Source for GoogleSheetsSource {
    async fn formats(&self) -> Result<Vec<RawRow>> {
        self.fetch_tab(&self.formats_tab).await
    }

    async fn localizations(&self) -> Result<Vec<RawRow>> {
        self.fetch_tab(&self.localizations_tab).await
    }

    fn formats_document_name(&self) -> &str {
        &self.formats_tab
    }

    fn localizations_document_name(&self) -> &str {
        &self.localizations_tab
    }
}
