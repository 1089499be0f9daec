//! Cross-language format argument checks.

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::{FormatKey, Lang};

/// Format arguments found in one language cell of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangFormatArgs {
    pub column: usize,
    pub lang: Lang,
    pub format_args: Vec<FormatKey>,
}

/// Verify that every language of `key` references the same formats in the same order.
///
/// `found` holds one entry per language with a non-missing value, in column
/// order. The first entry is the reference; the first language that differs
/// from it is reported. Returns the reference arguments (empty when no
/// language had a value).
pub fn check_format_args(
    tab: &str,
    row: usize,
    key: &str,
    found: Vec<LangFormatArgs>,
) -> Result<Vec<FormatKey>> {
    let mut found = found.into_iter();
    let Some(first) = found.next() else {
        return Ok(Vec::new());
    };

    for other in found {
        if other.format_args != first.format_args {
            return Err(Error::FormatArgsDifferent {
                cell: Cell::new(tab, row, other.column),
                key: key.to_owned(),
                lang: other.lang,
            });
        }
    }
    Ok(first.format_args)
}
