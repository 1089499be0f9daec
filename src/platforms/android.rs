use std::path::{Path, PathBuf};

use crate::platform::{FooterArgs, FormatStringArgs, HeaderArgs, LocalizedStringArgs, Platform};

/// Android string resources: `values-<lang>/localized_strings.xml`.
#[derive(Debug, Clone, Default)]
pub struct Android;

impl Platform for Android {
    fn name(&self) -> &str {
        "android"
    }

    fn names(&self) -> &[&str] {
        &["android", "Android"]
    }

    fn replacement_chars(&self) -> &[(&str, &str)] {
        &[
            ("\\", "\\\\"),
            ("'", "\\'"),
            ("\"", "\\\""),
            ("\n", "\\n"),
            ("?", "\\?"),
            ("@", "\\@"),
            ("<", "&lt;"),
            (">", "&gt;"),
            ("&", "&amp;"),
        ]
    }

    fn header(&self, _args: &HeaderArgs<'_>) -> String {
        "<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n<resources>\n".to_string()
    }

    fn localized_string(&self, args: &LocalizedStringArgs<'_>) -> String {
        format!("\t<string name=\"{}\">{}</string>\n", args.key, args.value)
    }

    fn footer(&self, _args: &FooterArgs<'_>) -> String {
        "</resources>\n".to_string()
    }

    fn validate_format(&self, _format: &str) -> Result<(), String> {
        Ok(())
    }

    fn format_string(&self, args: &FormatStringArgs<'_>) -> String {
        format!(
            "%{}${}",
            args.index + 1,
            args.format.strip_prefix('%').unwrap_or(args.format)
        )
    }

    fn localization_file_path(&self, lang: &str, res_dir: &Path) -> PathBuf {
        let target_dir = format!("values-{}", lang);
        let base = if res_dir.as_os_str().is_empty() {
            Path::new("src").join("main").join("res")
        } else {
            res_dir.to_path_buf()
        };
        base.join(target_dir).join("localized_strings.xml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_format_string() {
        let android = Android;
        assert_eq!(android.format_string(&FormatStringArgs { index: 0, format: "s" }), "%1$s");
        assert_eq!(android.format_string(&FormatStringArgs { index: 2, format: "%d" }), "%3$d");
    }

    #[test]
    fn test_localization_file_path() {
        let android = Android;
        assert_eq!(
            android.localization_file_path("ru", Path::new("app/res")),
            PathBuf::from("app/res/values-ru/localized_strings.xml")
        );
        assert_eq!(
            android.localization_file_path("en", Path::new("")),
            PathBuf::from("src/main/res/values-en/localized_strings.xml")
        );
    }

    #[test]
    fn test_localized_string() {
        let line = Android.localized_string(&LocalizedStringArgs {
            index: 0,
            is_last: false,
            key: "greeting",
            lang: "en",
            value: "Hello, %1$s",
            format_args: &[],
        });
        assert_eq!(line, "\t<string name=\"greeting\">Hello, %1$s</string>\n");
    }
}
