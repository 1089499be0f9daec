use tracing::debug;

use crate::cell::Cell;
use crate::columns::{ColumnQuery, ColumnResolver};
use crate::error::{Error, Result};
use crate::platform::Platform;
use crate::{FormatKey, Formats, RawRow};

/// Configuration of the formats table parser.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Title of the column holding format names.
    pub format_column: String,
    /// Format used for unnamed `{}` placeholders.
    pub default_format: Option<FormatKey>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            format_column: "format".to_string(),
            default_format: None,
        }
    }
}

/// Parse the formats table into format names mapped to specifications.
///
/// The header row must contain the format name column and a column titled
/// with one of the platform's aliases. Each following row must name a format
/// and give it a non-blank specification that the platform accepts; the first
/// offending row aborts parsing. A later row reusing a name replaces the
/// earlier specification.
///
/// When `options.default_format` names a parsed format, its specification is
/// also registered under the empty name so that `{}` resolves to it.
///
/// # Errors
/// - Structural: `EmptySheet`, `FirstRowNotFound`, `NoFormatColumn`, `NoPlatformColumn`
/// - Per row: `FormatKeyNotSpecified`, `FormatValueNotSpecified`, `WrongKeyType`,
///   `WrongValueType`, `FormatValueInvalid`
/// - `DefaultFormatNotFound` when the default format is not defined
pub fn parse_formats(
    rows: &[RawRow],
    platform: &dyn Platform,
    tab: &str,
    options: &FormatOptions,
) -> Result<Formats> {
    let columns = ColumnResolver::new()?.resolve(
        rows,
        tab,
        &options.format_column,
        ColumnQuery::Formats {
            platform_names: platform.names(),
        },
    )?;
    let key_col = columns.key;
    let (value_col, platform_name) = match columns.platform {
        Some(column) => (column.index, column.name),
        None => {
            return Err(Error::NoPlatformColumn {
                tab: tab.to_owned(),
                platform_names: platform.names().iter().map(|s| s.to_string()).collect(),
            });
        }
    };

    let mut formats = Formats::new();
    for (index, row) in rows.iter().enumerate().skip(1) {
        let line = index + 1;

        let key_cell = match row.get(key_col) {
            Some(cell) if cell.as_text().is_none_or(|text| !text.trim().is_empty()) => cell,
            _ => {
                return Err(Error::FormatKeyNotSpecified {
                    cell: Cell::new(tab, line, key_col),
                });
            }
        };
        let value_cell = row
            .get(value_col)
            .ok_or_else(|| Error::FormatValueNotSpecified {
                cell: Cell::new(tab, line, value_col),
                platform: platform_name.clone(),
            })?;
        let key = key_cell.as_text().ok_or_else(|| Error::WrongKeyType {
            cell: Cell::new(tab, line, key_col),
        })?;
        let value = value_cell.as_text().ok_or_else(|| Error::WrongValueType {
            cell: Cell::new(tab, line, value_col),
        })?;

        let value = value.trim();
        if value.is_empty() {
            return Err(Error::FormatValueNotSpecified {
                cell: Cell::new(tab, line, value_col),
                platform: platform_name.clone(),
            });
        }
        if let Err(reason) = platform.validate_format(value) {
            return Err(Error::FormatValueInvalid {
                cell: Cell::new(tab, line, value_col),
                platform: platform_name.clone(),
                value: value.to_owned(),
                reason,
            });
        }

        formats.insert(key.trim().to_owned(), value.to_owned());
    }

    if let Some(default_format) = options.default_format.as_deref().filter(|name| !name.is_empty()) {
        let spec = formats
            .get(default_format)
            .cloned()
            .ok_or_else(|| Error::DefaultFormatNotFound {
                name: default_format.to_owned(),
            })?;
        formats.insert(String::new(), spec);
    }

    debug!(tab, platform = %platform.name(), count = formats.len(), "Parsed formats");
    Ok(formats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::mock::MockPlatform;
    use crate::{RawCell, text_rows};

    fn parse(rows: &[RawRow]) -> Result<Formats> {
        parse_formats(rows, &MockPlatform::new(), "formats", &FormatOptions::default())
    }

    #[test]
    fn test_empty_data() {
        assert!(matches!(parse(&[]), Err(Error::EmptySheet { .. })));
    }

    #[test]
    fn test_empty_first_row() {
        let rows = text_rows(&[&[], &["x"]]);
        assert!(matches!(parse(&rows), Err(Error::FirstRowNotFound { .. })));
    }

    #[test]
    fn test_missing_format_column() {
        let rows = text_rows(&[&["mock"]]);
        assert!(matches!(parse(&rows), Err(Error::NoFormatColumn { .. })));
    }

    #[test]
    fn test_missing_platform_column() {
        let rows = text_rows(&[&["format"]]);
        assert!(matches!(parse(&rows), Err(Error::NoPlatformColumn { .. })));
    }

    #[test]
    fn test_missing_format_key() {
        let rows = text_rows(&[&["mock", "format"], &[""]]);
        assert!(matches!(parse(&rows), Err(Error::FormatKeyNotSpecified { .. })));

        let rows = text_rows(&[&["format", "mock"], &[" ", "s"]]);
        match parse(&rows) {
            Err(Error::FormatKeyNotSpecified { cell }) => {
                assert_eq!(cell, Cell::new("formats", 2, 0));
            }
            other => panic!("Expected FormatKeyNotSpecified, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_format_value() {
        for rows in [
            text_rows(&[&["format", "mock"], &["x"]]),
            text_rows(&[&["format", "mock"], &["x", ""]]),
            text_rows(&[&["format", "mock"], &["x", "   "]]),
        ] {
            match parse(&rows) {
                Err(Error::FormatValueNotSpecified { cell, platform }) => {
                    assert_eq!(cell, Cell::new("formats", 2, 1));
                    assert_eq!(platform, "mock");
                }
                other => panic!("Expected FormatValueNotSpecified, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_wrong_cell_types() {
        let rows = vec![
            text_rows(&[&["format", "mock"]]).remove(0),
            vec![RawCell::Number(1.0), RawCell::text("s")],
        ];
        assert!(matches!(parse(&rows), Err(Error::WrongKeyType { .. })));

        let rows = vec![
            text_rows(&[&["format", "mock"]]).remove(0),
            vec![RawCell::text("x"), RawCell::Bool(true)],
        ];
        assert!(matches!(parse(&rows), Err(Error::WrongValueType { .. })));
    }

    #[test]
    fn test_invalid_format_value() {
        let platform = MockPlatform::new().with_invalid_format("bad");
        let rows = text_rows(&[&["format", "mock"], &["x", "s"], &["y", " bad "]]);
        match parse_formats(&rows, &platform, "formats", &FormatOptions::default()) {
            Err(Error::FormatValueInvalid { cell, value, .. }) => {
                assert_eq!(cell, Cell::new("formats", 3, 1));
                assert_eq!(value, "bad");
            }
            other => panic!("Expected FormatValueInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parses_trimmed_values() {
        let rows = text_rows(&[
            &["notes", "format", "mock"],
            &["", "x", " s "],
            &["a number", "y", "d"],
        ]);
        let formats = parse(&rows).unwrap();
        assert_eq!(formats.len(), 2);
        assert_eq!(formats["x"], "s");
        assert_eq!(formats["y"], "d");
    }

    #[test]
    fn test_duplicate_key_overwrites() {
        let rows = text_rows(&[&["format", "mock"], &["x", "s"], &["x", "d"]]);
        let formats = parse(&rows).unwrap();
        assert_eq!(formats["x"], "d");
    }

    #[test]
    fn test_default_format() {
        let rows = text_rows(&[&["format", "mock"], &["x", "s"], &["y", "d"]]);
        let options = FormatOptions {
            default_format: Some("y".to_string()),
            ..FormatOptions::default()
        };
        let formats = parse_formats(&rows, &MockPlatform::new(), "formats", &options).unwrap();
        assert_eq!(formats[""], "d");

        let options = FormatOptions {
            default_format: Some("z".to_string()),
            ..FormatOptions::default()
        };
        let result = parse_formats(&rows, &MockPlatform::new(), "formats", &options);
        assert!(matches!(result, Err(Error::DefaultFormatNotFound { .. })));
    }

    #[test]
    fn test_header_only() {
        let rows = text_rows(&[&["format", "mock"]]);
        assert!(parse(&rows).unwrap().is_empty());
    }
}
