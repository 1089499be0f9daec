use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Deserialize;

pub mod cell;
pub mod columns;
pub mod consistency;
pub mod error;
pub mod formats;
pub mod locale;
pub mod localizations;
pub mod placeholder;
pub mod platform;
pub mod platforms;
pub mod report;
pub mod run;
pub mod source;
pub mod writer;


// Re-export the main entry points for convenient access
pub use cell::Cell;
pub use error::{Error, Result};
pub use formats::{FormatOptions, parse_formats};
pub use locale::Locale;
pub use localizations::{
    LocalizationOptions, MissingPolicy, ParsedLocalizations, parse_localizations,
};
pub use platform::Platform;
pub use run::{RunOptions, run};
pub use source::{Source, fetch_everything};
pub use writer::{DefaultLocalization, write_localizations};

/// A localized string key.
pub type Key = String;

/// A language code taken from a `lang_xx` column title, e.g. `"en"`.
pub type Lang = String;

/// Name of a format, as referenced by `{name}` in localized text.
pub type FormatKey = String;

/// Format names mapped to their platform-specific specifications.
pub type Formats = HashMap<FormatKey, String>;

/// Keys mapped to the format names their values reference, left to right.
pub type FormatArgs = HashMap<Key, Vec<FormatKey>>;

/// One raw spreadsheet value.
///
/// Spreadsheet APIs return typed cells; CSV input only ever yields `Text`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl RawCell {
    pub fn text(value: &str) -> Self {
        RawCell::Text(value.to_owned())
    }

    /// The cell content if it is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawCell::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Text(text) => f.write_str(text),
            RawCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            RawCell::Number(n) => write!(f, "{}", n),
            RawCell::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        RawCell::text(value)
    }
}

/// A table row. Cells past the end of the row are missing, which is a
/// different state from a present but blank `Text("")` cell.
pub type RawRow = Vec<RawCell>;

/// Build text-only rows, mostly useful for tests and in-memory sources.
pub fn text_rows(rows: &[&[&str]]) -> Vec<RawRow> {
    rows.iter()
        .map(|row| row.iter().map(|cell| RawCell::text(cell)).collect())
        .collect()
}

/// Resolved localized strings, keyed by string key and then by language.
///
/// e.g. localizations["greeting"]["en"] = Some("Hello")
///      localizations["greeting"]["ru"] = None  (missing, reported as a warning)
///
/// A `None` slot marks a localization that was missing from the table, which
/// keeps it distinguishable from a value that resolved to an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Localizations(pub HashMap<Key, HashMap<Lang, Option<String>>>);

impl Localizations {
    pub fn new() -> Self {
        Localizations(HashMap::new())
    }

    pub fn insert(&mut self, key: &str, lang: &str, value: Option<String>) -> &mut Self {
        self.0
            .entry(key.to_owned())
            .or_default()
            .insert(lang.to_owned(), value);
        self
    }

    /// The resolved value, or `None` when the key, the language or the value is missing.
    pub fn get(&self, key: &str, lang: &str) -> Option<&str> {
        self.0.get(key)?.get(lang)?.as_deref()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys having a slot for each language.
    pub fn counts(&self) -> HashMap<Lang, usize> {
        let mut counts = HashMap::new();
        for key_loc in self.0.values() {
            for lang in key_loc.keys() {
                *counts.entry(lang.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// All languages present in the table, sorted.
    pub fn locales(&self) -> Vec<Lang> {
        let langs: BTreeSet<&Lang> = self.0.values().flat_map(|key_loc| key_loc.keys()).collect();
        langs.into_iter().cloned().collect()
    }

    /// All keys in lexicographic order.
    pub fn sorted_keys(&self) -> Vec<&Key> {
        let mut keys: Vec<&Key> = self.0.keys().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localizations_accessors() {
        let mut loc = Localizations::new();
        loc.insert("b", "en", Some("Bee".to_string()))
            .insert("a", "en", Some("Ay".to_string()))
            .insert("a", "ru", None);

        assert_eq!(loc.get("a", "en"), Some("Ay"));
        assert_eq!(loc.get("a", "ru"), None);
        assert_eq!(loc.get("c", "en"), None);
        assert_eq!(loc.sorted_keys(), vec!["a", "b"]);
        assert_eq!(loc.locales(), vec!["en".to_string(), "ru".to_string()]);
        assert_eq!(loc.counts()["en"], 2);
        assert_eq!(loc.counts()["ru"], 1);
    }

    #[test]
    fn test_raw_cell_display() {
        assert_eq!(RawCell::text("hi").to_string(), "hi");
        assert_eq!(RawCell::Number(42.0).to_string(), "42");
        assert_eq!(RawCell::Number(1.5).to_string(), "1.5");
        assert_eq!(RawCell::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_raw_cell_deserializes_untagged() {
        let row: RawRow = serde_json::from_str(r#"["key", 3, false]"#).unwrap();
        assert_eq!(
            row,
            vec![RawCell::text("key"), RawCell::Number(3.0), RawCell::Bool(false)]
        );
    }
}
