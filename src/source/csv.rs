use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::source::Source;
use crate::{RawCell, RawRow};

/// Reads both tables from local CSV files.
///
/// Rows may have different lengths; every cell is read as text.
#[derive(Debug, Clone)]
pub struct CsvSource {
    formats_path: PathBuf,
    localizations_path: PathBuf,
    formats_name: String,
    localizations_name: String,
}

impl CsvSource {
    pub fn new(localizations_path: impl Into<PathBuf>, formats_path: impl Into<PathBuf>) -> Self {
        let localizations_path = localizations_path.into();
        let formats_path = formats_path.into();
        CsvSource {
            formats_name: formats_path.display().to_string(),
            localizations_name: localizations_path.display().to_string(),
            formats_path,
            localizations_path,
        }
    }
}

/// Read all records of a CSV file, without treating the first one as a header.
pub fn read_csv(path: &Path) -> Result<Vec<RawRow>> {
    let csv_error = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(RawCell::text).collect());
    }
    Ok(rows)
}

async fn read_csv_blocking(path: PathBuf) -> Result<Vec<RawRow>> {
    tokio::task::spawn_blocking(move || read_csv(&path)).await?
}

#[async_trait]
impl Source for CsvSource {
    async fn formats(&self) -> Result<Vec<RawRow>> {
        read_csv_blocking(self.formats_path.clone()).await
    }

    async fn localizations(&self) -> Result<Vec<RawRow>> {
        read_csv_blocking(self.localizations_path.clone()).await
    }

    fn formats_document_name(&self) -> &str {
        &self.formats_name
    }

    fn localizations_document_name(&self) -> &str {
        &self.localizations_name
    }
}
