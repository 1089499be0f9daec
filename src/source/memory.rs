//! In-memory source, mostly for tests.

use async_trait::async_trait;

use crate::RawRow;
use crate::error::{Error, Result};
use crate::source::Source;

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    formats: Vec<RawRow>,
    localizations: Vec<RawRow>,
    formats_error: Option<String>,
    localizations_error: Option<String>,
}

impl MemorySource {
    pub fn new(formats: Vec<RawRow>, localizations: Vec<RawRow>) -> Self {
        MemorySource {
            formats,
            localizations,
            ..Self::default()
        }
    }

    /// Make `formats()` fail with the given message.
    pub fn with_formats_error(mut self, message: &str) -> Self {
        self.formats_error = Some(message.to_owned());
        self
    }

    /// Make `localizations()` fail with the given message.
    pub fn with_localizations_error(mut self, message: &str) -> Self {
        self.localizations_error = Some(message.to_owned());
        self
    }
}

#[async_trait]
impl Source for MemorySource {
    async fn formats(&self) -> Result<Vec<RawRow>> {
        match &self.formats_error {
            Some(message) => Err(Error::Config(message.clone())),
            None => Ok(self.formats.clone()),
        }
    }

    async fn localizations(&self) -> Result<Vec<RawRow>> {
        match &self.localizations_error {
            Some(message) => Err(Error::Config(message.clone())),
            None => Ok(self.localizations.clone()),
        }
    }

    fn formats_document_name(&self) -> &str {
        "formats"
    }

    fn localizations_document_name(&self) -> &str {
        "localizations"
    }
}
