use std::path::{Path, PathBuf};

use crate::platform::{FooterArgs, FormatStringArgs, HeaderArgs, LocalizedStringArgs, Platform};

/// Flat `<lang>.json` objects.
#[derive(Debug, Clone, Default)]
pub struct Json;

impl Platform for Json {
    fn name(&self) -> &str {
        "json"
    }

    fn names(&self) -> &[&str] {
        &["json", "JSON"]
    }

    fn replacement_chars(&self) -> &[(&str, &str)] {
        &[("\n", "\\n"), ("\t", "\\t"), ("\"", "\\\""), ("\\", "\\\\")]
    }

    fn header(&self, _args: &HeaderArgs<'_>) -> String {
        "{\n".to_string()
    }

    fn localized_string(&self, args: &LocalizedStringArgs<'_>) -> String {
        let separator = if args.is_last { "" } else { "," };
        format!("\t\"{}\": \"{}\"{}\n", args.key, args.value, separator)
    }

    fn footer(&self, _args: &FooterArgs<'_>) -> String {
        "}".to_string()
    }

    fn validate_format(&self, _format: &str) -> Result<(), String> {
        Ok(())
    }

    fn format_string(&self, args: &FormatStringArgs<'_>) -> String {
        args.format.to_string()
    }

    fn localization_file_path(&self, lang: &str, res_dir: &Path) -> PathBuf {
        res_dir.join(format!("{}.json", lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(is_last: bool) -> String {
        Json.localized_string(&LocalizedStringArgs {
            index: 0,
            is_last,
            key: "k",
            lang: "en",
            value: "v",
            format_args: &[],
        })
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(line(false), "\t\"k\": \"v\",\n");
        assert_eq!(line(true), "\t\"k\": \"v\"\n");
    }

    #[test]
    fn test_format_string_is_verbatim() {
        assert_eq!(Json.format_string(&FormatStringArgs { index: 1, format: "{count}" }), "{count}");
    }
}
