use std::path::{Path, PathBuf};

use crate::platform::{FooterArgs, FormatStringArgs, HeaderArgs, LocalizedStringArgs, Platform};

/// iOS `<lang>.lproj/Localizable.strings` files.
#[derive(Debug, Clone, Default)]
pub struct Ios;

impl Platform for Ios {
    fn name(&self) -> &str {
        "ios"
    }

    fn names(&self) -> &[&str] {
        &["ios", "iOS"]
    }

    fn replacement_chars(&self) -> &[(&str, &str)] {
        &[("'", "\\'"), ("\"", "\\\""), ("\n", "\\n")]
    }

    fn header(&self, _args: &HeaderArgs<'_>) -> String {
        String::new()
    }

    fn localized_string(&self, args: &LocalizedStringArgs<'_>) -> String {
        format!("\"{}\" = \"{}\";\n", args.key, args.value)
    }

    fn footer(&self, _args: &FooterArgs<'_>) -> String {
        String::new()
    }

    fn validate_format(&self, format: &str) -> Result<(), String> {
        if format.starts_with('%') {
            return Err("format must not start with \"%\" - it will be added automatically".to_string());
        }
        Ok(())
    }

    fn format_string(&self, args: &FormatStringArgs<'_>) -> String {
        format!("%{}", args.format)
    }

    fn localization_file_path(&self, lang: &str, res_dir: &Path) -> PathBuf {
        let target_dir = format!("{}.lproj", lang);
        let base = if res_dir.as_os_str().is_empty() {
            Path::new("Resources").join("Localization")
        } else {
            res_dir.to_path_buf()
        };
        base.join(target_dir).join("Localizable.strings")
    }
}
