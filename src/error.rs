//! Error types for sheetloc.
//!
//! Parsing diagnostics (structural and per-row) and the I/O failures of the
//! surrounding pipeline share one enum. Warnings collected under the lenient
//! missing-value policy are values of the same type.

use std::path::PathBuf;

use thiserror::Error;

use crate::cell::Cell;
use crate::{FormatKey, Key, Lang};

#[derive(Debug, Error)]
pub enum Error {
    // === Structural errors ===
    /// The table has no rows at all.
    #[error("{tab}!A1: sheet is empty")]
    EmptySheet { tab: String },

    /// The header row exists but has no cells.
    #[error("{cell}: there's no first row in the tab")]
    FirstRowNotFound { cell: Cell },

    /// The key column of the localizations table is absent.
    #[error("{cell}: \"{column}\" column not found in the first row")]
    ColumnNotFound { cell: Cell, column: String },

    /// The format name column of the formats table is absent.
    #[error("{tab}!A1: \"{column}\" column is missing in the first row")]
    NoFormatColumn { tab: String, column: String },

    /// None of the platform aliases appear in the formats table header.
    #[error("{tab}!A1: can't find any of {platform_names:?} columns in the first row")]
    NoPlatformColumn {
        tab: String,
        platform_names: Vec<String>,
    },

    #[error("{cell}: language columns are not found")]
    LangColumnsNotFound { cell: Cell },

    // === Formats table errors ===
    #[error("{cell}: format name is not specified")]
    FormatKeyNotSpecified { cell: Cell },

    #[error("{cell}: value for \"{platform}\" platform is not specified")]
    FormatValueNotSpecified { cell: Cell, platform: String },

    #[error("{cell}: wrong key type")]
    WrongKeyType { cell: Cell },

    #[error("{cell}: wrong value type")]
    WrongValueType { cell: Cell },

    #[error("{cell}: format \"{value}\" is invalid for platform \"{platform}\" ({reason})")]
    FormatValueInvalid {
        cell: Cell,
        platform: String,
        value: String,
        reason: String,
    },

    /// The configured default format name is not defined in the formats table.
    #[error("default format \"{name}\" is not defined in the formats table")]
    DefaultFormatNotFound { name: FormatKey },

    // === Localizations table errors ===
    #[error("{cell}: no such format - \"{format_name}\"")]
    FormatNotFound { cell: Cell, format_name: FormatKey },

    #[error("{cell}: format arguments of \"{key}\" must be the same for each language (\"{lang}\" differs)")]
    FormatArgsDifferent { cell: Cell, key: Key, lang: Lang },

    #[error("{cell}: key name is missing, ignoring this string...")]
    KeyMissing { cell: Cell },

    #[error("{cell}: \"{key}\" is missing for \"{lang}\" language")]
    LocalizationMissing { cell: Cell, key: Key, lang: Lang },

    /// Report mode found missing localizations and refused to write output.
    #[error("found {count} missing localizations")]
    MissingLocalizations { count: usize },

    // === Configuration errors ===
    #[error("{value:?}: unsupported locale format, expected \"<language>\" or \"<language>_<COUNTRY>\" (e.g. \"en\", \"en_US\")")]
    InvalidLocale { value: String },

    #[error("platform \"{name}\" is not supported")]
    UnknownPlatform { name: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    // === Source errors ===
    /// Fetching one of the two tables failed.
    #[error("can't load {table} ({source})")]
    Fetch {
        table: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error ({status}): {message}")]
    SheetsApi { status: u16, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    // === Output errors ===
    #[error("empty localization file path for \"{lang}\"")]
    EmptyLocalizationFilePath { lang: Lang },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// The cell this diagnostic points at, if it addresses one.
    pub fn cell(&self) -> Option<&Cell> {
        match self {
            Error::FirstRowNotFound { cell }
            | Error::ColumnNotFound { cell, .. }
            | Error::LangColumnsNotFound { cell }
            | Error::FormatKeyNotSpecified { cell }
            | Error::FormatValueNotSpecified { cell, .. }
            | Error::WrongKeyType { cell }
            | Error::WrongValueType { cell }
            | Error::FormatValueInvalid { cell, .. }
            | Error::FormatNotFound { cell, .. }
            | Error::FormatArgsDifferent { cell, .. }
            | Error::KeyMissing { cell }
            | Error::LocalizationMissing { cell, .. } => Some(cell),
            _ => None,
        }
    }

    /// Structural errors abort parsing regardless of the missing-value policy.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::EmptySheet { .. }
                | Error::FirstRowNotFound { .. }
                | Error::ColumnNotFound { .. }
                | Error::NoFormatColumn { .. }
                | Error::NoPlatformColumn { .. }
                | Error::LangColumnsNotFound { .. }
        )
    }
}

/// Result type for sheetloc operations.
pub type Result<T> = std::result::Result<T, Error>;
