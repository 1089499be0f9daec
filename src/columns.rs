//! Header row scanning.
//!
//! Finds the key (or format name) column, the language columns and, for the
//! formats table, the column holding the current platform's specifications.

use std::collections::BTreeMap;

use regex::Regex;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::{Lang, RawRow};

/// Column titles designating a language: `lang_en`, `lang_pt_BR`.
const LANG_COLUMN_PATTERN: &str = r"^lang_([a-z]{2}(?:_[A-Z]{2})?)$";

/// Which table is being resolved, and therefore which columns are required.
#[derive(Debug, Clone, Copy)]
pub enum ColumnQuery<'a> {
    /// Key column plus at least one language column.
    Localizations,
    /// Format name column plus a column titled with one of the platform aliases.
    Formats { platform_names: &'a [&'a str] },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformColumn {
    pub index: usize,
    /// The alias that matched the column title.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub key: usize,
    /// Column index to language, ordered by column.
    pub langs: BTreeMap<usize, Lang>,
    pub platform: Option<PlatformColumn>,
}

/// Resolves column indices from a table's header row.
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    lang_column: Regex,
}

impl ColumnResolver {
    pub fn new() -> Result<Self> {
        Ok(ColumnResolver {
            lang_column: Regex::new(LANG_COLUMN_PATTERN)?,
        })
    }

    /// The language code for a header title, if it designates a language column.
    pub fn lang_of(&self, title: &str) -> Option<Lang> {
        self.lang_column
            .captures(title)
            .and_then(|caps| caps.get(1))
            .map(|lang| lang.as_str().to_owned())
    }

    /// Scan the header row of `rows` once and resolve the requested columns.
    pub fn resolve(
        &self,
        rows: &[RawRow],
        tab: &str,
        key_column: &str,
        query: ColumnQuery<'_>,
    ) -> Result<Columns> {
        let header = rows.first().ok_or_else(|| Error::EmptySheet {
            tab: tab.to_owned(),
        })?;
        if header.is_empty() {
            return Err(Error::FirstRowNotFound {
                cell: Cell::new(tab, 1, 0),
            });
        }

        let platform_names: &[&str] = match query {
            ColumnQuery::Formats { platform_names } => platform_names,
            ColumnQuery::Localizations => &[],
        };

        let mut key = None;
        let mut langs = BTreeMap::new();
        let mut platform = None;
        for (index, cell) in header.iter().enumerate() {
            let Some(title) = cell.as_text() else {
                continue;
            };
            if title == key_column {
                key = Some(index);
            }
            if let Some(lang) = self.lang_of(title) {
                langs.insert(index, lang);
            }
            if platform.is_none() {
                if let Some(name) = platform_names.iter().find(|name| **name == title) {
                    platform = Some(PlatformColumn {
                        index,
                        name: (*name).to_owned(),
                    });
                }
            }
        }

        match query {
            ColumnQuery::Localizations => {
                let key = key.ok_or_else(|| Error::ColumnNotFound {
                    cell: Cell::new(tab, 1, 0),
                    column: key_column.to_owned(),
                })?;
                if langs.is_empty() {
                    return Err(Error::LangColumnsNotFound {
                        cell: Cell::new(tab, 1, 0),
                    });
                }
                Ok(Columns {
                    key,
                    langs,
                    platform: None,
                })
            }
            ColumnQuery::Formats { platform_names } => {
                let key = key.ok_or_else(|| Error::NoFormatColumn {
                    tab: tab.to_owned(),
                    column: key_column.to_owned(),
                })?;
                if platform.is_none() {
                    return Err(Error::NoPlatformColumn {
                        tab: tab.to_owned(),
                        platform_names: platform_names.iter().map(|s| s.to_string()).collect(),
                    });
                }
                Ok(Columns {
                    key,
                    langs,
                    platform,
                })
            }
        }
    }
}
