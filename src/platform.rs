//! Platform abstraction.
//!
//! A platform decides how resolved localizations are spelled on disk: the
//! file layout, header/footer, one line per key, how a format specification
//! becomes a positional format string and which characters must be escaped.
//! Extra behaviour (fallback lines, pre/post-processing) is exposed through
//! optional capabilities that default to `None`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::Result;
use crate::{FormatArgs, FormatKey, Formats, Localizations};

#[derive(Debug, Clone)]
pub struct HeaderArgs<'a> {
    pub lang: &'a str,
}

#[derive(Debug, Clone)]
pub struct FooterArgs<'a> {
    pub lang: &'a str,
}

/// Everything a platform needs to render one localized string.
#[derive(Debug, Clone)]
pub struct LocalizedStringArgs<'a> {
    /// 0-based position of the key within its language file.
    pub index: usize,
    /// Whether this is the final non-empty value written for the language.
    pub is_last: bool,
    pub key: &'a str,
    pub lang: &'a str,
    pub value: &'a str,
    pub format_args: &'a [FormatKey],
}

/// A format occurrence: its 0-based position in the string and its specification.
#[derive(Debug, Clone)]
pub struct FormatStringArgs<'a> {
    pub index: usize,
    pub format: &'a str,
}

/// Input of the pre- and post-processing hooks.
#[derive(Debug, Clone)]
pub struct ProcessArgs<'a> {
    pub res_dir: &'a Path,
    pub localizations: &'a Localizations,
    pub formats: &'a Formats,
    pub format_args: &'a FormatArgs,
    pub default_localization: Option<&'a str>,
}

pub trait Platform: Send + Sync {
    /// Human-readable platform name.
    fn name(&self) -> &str;

    /// Aliases identifying the platform column in the formats table.
    fn names(&self) -> &[&str];

    /// Literal → escaped pairs for characters that must be guarded in the output.
    fn replacement_chars(&self) -> &[(&str, &str)];

    /// Header text, newlines included. May be empty.
    fn header(&self, args: &HeaderArgs<'_>) -> String;

    /// One localized string binding, newlines included.
    fn localized_string(&self, args: &LocalizedStringArgs<'_>) -> String;

    /// Footer text, newlines included. May be empty.
    fn footer(&self, args: &FooterArgs<'_>) -> String;

    /// Check a format specification from the formats table; `Err` carries the reason.
    fn validate_format(&self, format: &str) -> std::result::Result<(), String>;

    /// The final format string for an occurrence.
    ///
    /// Positional platforms use the index: Android renders `(0, "s")` as `%1$s`,
    /// while iOS ignores it and renders `(0, "@")` as `%@`.
    fn format_string(&self, args: &FormatStringArgs<'_>) -> String;

    /// Full path of the localization file for a language.
    fn localization_file_path(&self, lang: &str, res_dir: &Path) -> PathBuf;

    fn fallback(&self) -> Option<&dyn FallbackStrings> {
        None
    }

    fn preprocessor(&self) -> Option<&dyn Preprocessor> {
        None
    }

    fn postprocessor(&self) -> Option<&dyn Postprocessor> {
        None
    }
}

/// Renders a line for a key whose value is missing in a language.
pub trait FallbackStrings: Send + Sync {
    fn fallback_string(&self, args: &LocalizedStringArgs<'_>) -> String;
}

/// Runs before localization files are written.
pub trait Preprocessor: Send + Sync {
    fn preprocess(&self, args: &ProcessArgs<'_>) -> Result<()>;
}

/// Runs after localization files are written.
pub trait Postprocessor: Send + Sync {
    fn postprocess(&self, args: &ProcessArgs<'_>) -> Result<()>;
}

/// Escapes a platform's special characters in one pass.
///
/// All patterns are matched simultaneously, longest first, so the output of
/// one replacement is never escaped again by another (`\` → `\\` and
/// `"` → `\"` turn `"` into `\"`, not `\\"`).
#[derive(Debug, Clone)]
pub struct SpecialChars {
    pattern: Option<Regex>,
    replacements: HashMap<String, String>,
}

impl SpecialChars {
    pub fn new(pairs: &[(&str, &str)]) -> Result<Self> {
        let replacements: HashMap<String, String> = pairs
            .iter()
            .filter(|(from, _)| !from.is_empty())
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        if replacements.is_empty() {
            return Ok(SpecialChars {
                pattern: None,
                replacements,
            });
        }

        let mut literals: Vec<&String> = replacements.keys().collect();
        literals.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = literals
            .iter()
            .map(|literal| regex::escape(literal))
            .collect::<Vec<_>>()
            .join("|");

        Ok(SpecialChars {
            pattern: Some(Regex::new(&alternation)?),
            replacements,
        })
    }

    pub fn for_platform(platform: &dyn Platform) -> Result<Self> {
        Self::new(platform.replacement_chars())
    }

    pub fn replace(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(text, |caps: &regex::Captures<'_>| {
                    self.replacements
                        .get(&caps[0])
                        .cloned()
                        .unwrap_or_else(|| caps[0].to_string())
                })
                .into_owned(),
            None => text.to_owned(),
        }
    }
}

/// Uppercase the first character: `en` → `En`.
pub fn title_case(lang: &str) -> String {
    let mut chars = lang.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_chars_single_pass() {
        let chars = SpecialChars::new(&[("\\", "\\\\"), ("\"", "\\\""), ("\n", "\\n")]).unwrap();
        assert_eq!(chars.replace("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(chars.replace("a\\b"), "a\\\\b");
        assert_eq!(chars.replace("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn test_special_chars_longest_match_wins() {
        let chars = SpecialChars::new(&[("<", "&lt;"), ("<<", "&laquo;")]).unwrap();
        assert_eq!(chars.replace("<<a<"), "&laquo;a&lt;");
    }

    #[test]
    fn test_special_chars_empty_map_is_identity() {
        let chars = SpecialChars::new(&[]).unwrap();
        assert_eq!(chars.replace("a \"b\" {c}"), "a \"b\" {c}");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("en"), "En");
        assert_eq!(title_case("pt_BR"), "Pt_BR");
        assert_eq!(title_case(""), "");
    }
}
