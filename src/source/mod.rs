//! Table sources.
//!
//! A source delivers the raw rows of the formats and localizations tables.
//! The document names double as tab names in diagnostics.

pub mod csv;
pub mod google_sheets;
pub mod memory;

pub use self::csv::CsvSource;
pub use self::google_sheets::GoogleSheetsSource;
pub use self::memory::MemorySource;

use async_trait::async_trait;
use tracing::debug;

use crate::RawRow;
use crate::error::{Error, Result};

#[async_trait]
pub trait Source: Send + Sync {
    /// Rows of the formats table, header first.
    async fn formats(&self) -> Result<Vec<RawRow>>;

    /// Rows of the localizations table, header first.
    async fn localizations(&self) -> Result<Vec<RawRow>>;

    fn formats_document_name(&self) -> &str;

    fn localizations_document_name(&self) -> &str;
}

/// Raw rows of both tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTables {
    pub formats: Vec<RawRow>,
    pub localizations: Vec<RawRow>,
}

/// Fetch both tables concurrently.
///
/// Both fetches always run to completion. A formats failure is reported in
/// preference to a localizations failure.
pub async fn fetch_everything(source: &dyn Source) -> Result<RawTables> {
    let (formats, localizations) = tokio::join!(source.formats(), source.localizations());

    let formats = formats.map_err(|err| Error::Fetch {
        table: "formats",
        source: Box::new(err),
    })?;
    let localizations = localizations.map_err(|err| Error::Fetch {
        table: "localizations",
        source: Box::new(err),
    })?;

    debug!(
        formats = formats.len(),
        localizations = localizations.len(),
        "Fetched raw tables"
    );
    Ok(RawTables {
        formats,
        localizations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_rows;

    #[tokio::test]
    async fn test_fetch_everything() {
        let source = MemorySource::new(
            text_rows(&[&["format", "mock"]]),
            text_rows(&[&["key", "lang_en"], &["k", "v"]]),
        );
        let tables = fetch_everything(&source).await.unwrap();
        assert_eq!(tables.formats.len(), 1);
        assert_eq!(tables.localizations.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_reports_failing_table() {
        let source = MemorySource::new(vec![], vec![]).with_localizations_error("offline");
        match fetch_everything(&source).await {
            Err(Error::Fetch { table, .. }) => assert_eq!(table, "localizations"),
            other => panic!("Expected Fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_prefers_formats_error() {
        let source = MemorySource::new(vec![], vec![])
            .with_formats_error("no formats")
            .with_localizations_error("no localizations");
        match fetch_everything(&source).await {
            Err(Error::Fetch { table, source }) => {
                assert_eq!(table, "formats");
                assert!(source.to_string().contains("no formats"));
            }
            other => panic!("Expected Fetch error, got {:?}", other),
        }
    }
}
