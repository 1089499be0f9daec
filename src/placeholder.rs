//! `{name}` placeholder resolution.
//!
//! Every `{name}` span in a localized string names a format from the formats
//! table. Each span is replaced with the platform's rendering of that format
//! at the span's position; `{}` refers to the default format.

use regex::Regex;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::platform::{FormatStringArgs, Platform};
use crate::{FormatKey, Formats};

/// Non-nested, non-greedy brace spans. The name may be empty.
const PLACEHOLDER_PATTERN: &str = r"\{([^{}]*)\}";

/// A string with its placeholders replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    /// Referenced format names, left to right, as written between the braces.
    pub format_args: Vec<FormatKey>,
}

#[derive(Debug, Clone)]
pub struct PlaceholderResolver {
    pattern: Regex,
}

impl PlaceholderResolver {
    pub fn new() -> Result<Self> {
        Ok(PlaceholderResolver {
            pattern: Regex::new(PLACEHOLDER_PATTERN)?,
        })
    }

    /// Format names referenced by `text`, left to right, without resolving them.
    pub fn format_names(&self, text: &str) -> Vec<FormatKey> {
        self.pattern
            .captures_iter(text)
            .map(|caps| caps[1].to_owned())
            .collect()
    }

    /// Replace every placeholder of `text` using `formats`.
    ///
    /// Occurrence indices count every span in scan order, whether or not its
    /// name resolves. The first unknown name is reported for `cell`.
    pub fn resolve(
        &self,
        platform: &dyn Platform,
        text: &str,
        formats: &Formats,
        cell: &Cell,
    ) -> Result<Resolved> {
        let mut value = String::with_capacity(text.len());
        let mut format_args = Vec::new();
        let mut first_error = None;
        let mut last_end = 0;

        for (index, caps) in self.pattern.captures_iter(text).enumerate() {
            let span = caps.get(0).map_or(0..0, |m| m.range());
            let name = &caps[1];
            value.push_str(&text[last_end..span.start]);
            last_end = span.end;
            format_args.push(name.to_owned());

            match formats.get(name) {
                Some(format) => {
                    value.push_str(&platform.format_string(&FormatStringArgs { index, format }));
                }
                None => {
                    if first_error.is_none() {
                        first_error = Some(Error::FormatNotFound {
                            cell: cell.clone(),
                            format_name: name.to_owned(),
                        });
                    }
                }
            }
        }
        value.push_str(&text[last_end..]);

        match first_error {
            Some(err) => Err(err),
            None => Ok(Resolved { value, format_args }),
        }
    }
}
