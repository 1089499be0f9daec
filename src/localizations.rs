use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::cell::Cell;
use crate::columns::{ColumnQuery, ColumnResolver};
use crate::consistency::{LangFormatArgs, check_format_args};
use crate::error::{Error, Result};
use crate::placeholder::PlaceholderResolver;
use crate::platform::{Platform, SpecialChars};
use crate::{FormatArgs, Formats, Localizations, RawRow};

/// What to do when a key or a localization is missing from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Abort parsing with the missing-value error.
    Fail,
    /// Collect a warning and carry on.
    #[default]
    Warn,
}

/// Configuration of the localizations table parser.
#[derive(Debug, Clone)]
pub struct LocalizationOptions {
    /// Title of the column holding string keys.
    pub key_column: String,
    pub policy: MissingPolicy,
    /// Cells (trimmed) matching this pattern count as missing. Defaults to `^$`.
    pub empty_localization_match: Option<Regex>,
}

impl Default for LocalizationOptions {
    fn default() -> Self {
        LocalizationOptions {
            key_column: "key".to_string(),
            policy: MissingPolicy::default(),
            empty_localization_match: None,
        }
    }
}

/// Output of a successful localizations parse.
#[derive(Debug)]
pub struct ParsedLocalizations {
    pub localizations: Localizations,
    pub format_args: FormatArgs,
    /// `KeyMissing` and `LocalizationMissing` diagnostics collected under
    /// [`MissingPolicy::Warn`], in row order.
    pub warnings: Vec<Error>,
}

/// Parse the localizations table.
///
/// Each data row is one key; each `lang_xx` column one language. Values get
/// their special characters escaped for the platform and their `{name}`
/// placeholders replaced with formats from `formats`. All languages of a key
/// must reference the same formats in the same order.
///
/// Missing keys and missing localizations follow `options.policy`. A row with
/// a missing key is skipped entirely; a missing localization leaves a `None`
/// slot for that language. Unknown formats and mismatching format arguments
/// always abort parsing.
pub fn parse_localizations(
    rows: &[RawRow],
    platform: &dyn Platform,
    formats: &Formats,
    tab: &str,
    options: &LocalizationOptions,
) -> Result<ParsedLocalizations> {
    let columns =
        ColumnResolver::new()?.resolve(rows, tab, &options.key_column, ColumnQuery::Localizations)?;
    let resolver = PlaceholderResolver::new()?;
    let special_chars = SpecialChars::for_platform(platform)?;
    let empty = match &options.empty_localization_match {
        Some(pattern) => pattern.clone(),
        None => Regex::new("^$")?,
    };

    let mut localizations = Localizations::new();
    let mut format_args = FormatArgs::new();
    let mut warnings = Vec::new();

    for (index, row) in rows.iter().enumerate().skip(1) {
        let line = index + 1;

        let key = row
            .get(columns.key)
            .map(|cell| cell.to_string().trim().to_owned())
            .filter(|key| !key.is_empty());
        let Some(key) = key else {
            let missing = Error::KeyMissing {
                cell: Cell::new(tab, line, columns.key),
            };
            match options.policy {
                MissingPolicy::Fail => return Err(missing),
                MissingPolicy::Warn => {
                    warnings.push(missing);
                    continue;
                }
            }
        };

        let mut key_loc = HashMap::new();
        let mut found = Vec::new();
        for (&column, lang) in &columns.langs {
            let cell = Cell::new(tab, line, column);
            let text = row.get(column).map(|raw| raw.to_string());
            let value = text.as_deref().map(str::trim).filter(|value| !empty.is_match(value));

            let Some(value) = value else {
                let missing = Error::LocalizationMissing {
                    cell,
                    key: key.clone(),
                    lang: lang.clone(),
                };
                match options.policy {
                    MissingPolicy::Fail => return Err(missing),
                    MissingPolicy::Warn => {
                        warnings.push(missing);
                        key_loc.insert(lang.clone(), None);
                        continue;
                    }
                }
            };

            let escaped = special_chars.replace(value);
            let resolved = resolver.resolve(platform, &escaped, formats, &cell)?;
            found.push(LangFormatArgs {
                column,
                lang: lang.clone(),
                format_args: resolved.format_args,
            });
            key_loc.insert(lang.clone(), Some(resolved.value));
        }

        let key_args = check_format_args(tab, line, &key, found)?;
        if localizations.0.insert(key.clone(), key_loc).is_some() {
            debug!(tab, row = line, key = %key, "Key defined again, replacing earlier row");
        }
        format_args.insert(key, key_args);
    }

    debug!(
        tab,
        keys = localizations.len(),
        warnings = warnings.len(),
        "Parsed localizations"
    );
    Ok(ParsedLocalizations {
        localizations,
        format_args,
        warnings,
    })
}
