//! Mock platform for testing
//!
//! A deterministic, configurable platform producing simple `key=value` files.
//! Formats render positionally as `%<index + 1>$<format>`.
//!
//! # Example
//!
//! ```ignore
//! use sheetloc::platforms::mock::MockPlatform;
//!
//! let platform = MockPlatform::new()
//!     .with_replacement_chars(&[("\"", "\\\"")])
//!     .with_fallback();
//! ```

use std::path::{Path, PathBuf};

use crate::platform::{
    FallbackStrings, FooterArgs, FormatStringArgs, HeaderArgs, LocalizedStringArgs, Platform,
};

#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    replacement_chars: Vec<(&'static str, &'static str)>,
    invalid_format: Option<String>,
    fallback: bool,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replacement_chars(mut self, chars: &[(&'static str, &'static str)]) -> Self {
        self.replacement_chars = chars.to_vec();
        self
    }

    /// Reject this exact format specification during validation.
    pub fn with_invalid_format(mut self, format: &str) -> Self {
        self.invalid_format = Some(format.to_owned());
        self
    }

    /// Enable the fallback-string capability.
    pub fn with_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }
}

impl Platform for MockPlatform {
    fn name(&self) -> &str {
        "mock"
    }

    fn names(&self) -> &[&str] {
        &["mock"]
    }

    fn replacement_chars(&self) -> &[(&str, &str)] {
        &self.replacement_chars
    }

    fn header(&self, args: &HeaderArgs<'_>) -> String {
        format!("# {}\n", args.lang)
    }

    fn localized_string(&self, args: &LocalizedStringArgs<'_>) -> String {
        let last = if args.is_last { " (last)" } else { "" };
        format!("{}:{}={}{}\n", args.index, args.key, args.value, last)
    }

    fn footer(&self, args: &FooterArgs<'_>) -> String {
        format!("# end {}\n", args.lang)
    }

    fn validate_format(&self, format: &str) -> Result<(), String> {
        match &self.invalid_format {
            Some(invalid) if invalid == format => Err(format!("\"{}\" is rejected", format)),
            _ => Ok(()),
        }
    }

    fn format_string(&self, args: &FormatStringArgs<'_>) -> String {
        format!("%{}${}", args.index + 1, args.format)
    }

    fn localization_file_path(&self, lang: &str, res_dir: &Path) -> PathBuf {
        res_dir.join(lang).join("strings.txt")
    }

    fn fallback(&self) -> Option<&dyn FallbackStrings> {
        if self.fallback { Some(self) } else { None }
    }
}

impl FallbackStrings for MockPlatform {
    fn fallback_string(&self, args: &LocalizedStringArgs<'_>) -> String {
        format!("{}:{}=<fallback>\n", args.index, args.key)
    }
}
