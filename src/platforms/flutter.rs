//! Flutter localizations: one `localizations_<lang>.g.dart` part per language
//! plus a generated `localizations.dart` library tying them together.
//!
//! Keys without format arguments become getters, keys with arguments become
//! methods formatting through `sprintf`. Languages missing a value delegate to
//! the default language through the `fallback` instance.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Error, Result};
use crate::platform::{
    FallbackStrings, FooterArgs, FormatStringArgs, HeaderArgs, LocalizedStringArgs, Platform,
    Preprocessor, ProcessArgs, title_case,
};
use crate::{FormatKey, Formats};

/// printf-style conversion; group 5 is the conversion character.
const SPRINTF_PATTERN: &str = r"%(?:(\d+)\$)?([\+\-\#0 ]*)(\d+|\*)?(?:\.(\d+|\*))?([a-z%])";

const GENERATED_NOTICE: &str = "// DO NOT EDIT. This code is generated by sheetloc.
// ignore_for_file: annotate_overrides, prefer_single_quotes, lines_longer_than_80_chars, non_constant_identifier_names, avoid_escaping_inner_quotes
";

#[derive(Debug, Clone, Default)]
pub struct Flutter;

impl Platform for Flutter {
    fn name(&self) -> &str {
        "flutter"
    }

    fn names(&self) -> &[&str] {
        &["flutter", "Flutter"]
    }

    fn replacement_chars(&self) -> &[(&str, &str)] {
        &[("\n", "\\n"), ("\t", "\\t"), ("\"", "\\\""), ("\\", "\\\\")]
    }

    fn header(&self, args: &HeaderArgs<'_>) -> String {
        let class = title_case(args.lang);
        format!(
            "{GENERATED_NOTICE}
part of 'localizations.dart';

class AppLocalizations{class} implements AppLocalizations {{
  final AppLocalizations? fallback;

  AppLocalizations{class}(this.fallback);

"
        )
    }

    fn localized_string(&self, args: &LocalizedStringArgs<'_>) -> String {
        if args.format_args.is_empty() {
            format!("  String get {} => \"{}\";\n", args.key, args.value)
        } else {
            let params = untyped_args_list(args.format_args);
            format!(
                "  String {}({}) => sprintf(\"{}\", [{}]);\n",
                args.key, params, args.value, params
            )
        }
    }

    fn footer(&self, _args: &FooterArgs<'_>) -> String {
        "}\n".to_string()
    }

    fn validate_format(&self, _format: &str) -> std::result::Result<(), String> {
        Ok(())
    }

    fn format_string(&self, args: &FormatStringArgs<'_>) -> String {
        format!("%{}", args.format)
    }

    fn localization_file_path(&self, lang: &str, res_dir: &Path) -> PathBuf {
        res_dir.join(format!("localizations_{}.g.dart", lang))
    }

    fn fallback(&self) -> Option<&dyn FallbackStrings> {
        Some(self)
    }

    fn preprocessor(&self) -> Option<&dyn Preprocessor> {
        Some(self)
    }
}

impl FallbackStrings for Flutter {
    fn fallback_string(&self, args: &LocalizedStringArgs<'_>) -> String {
        if args.format_args.is_empty() {
            format!("  String get {} => fallback!.{};\n", args.key, args.key)
        } else {
            let params = untyped_args_list(args.format_args);
            format!(
                "  String {}({}) => fallback!.{}({});\n",
                args.key, params, args.key, params
            )
        }
    }
}

impl Preprocessor for Flutter {
    fn preprocess(&self, args: &ProcessArgs<'_>) -> Result<()> {
        let path = args.res_dir.join("localizations.dart");
        let content = localizations_library(args)?;
        std::fs::write(&path, content).map_err(|source| Error::Io { path, source })
    }
}

/// `arg0, arg1, ...` for a key's format arguments.
fn untyped_args_list(format_args: &[FormatKey]) -> String {
    (0..format_args.len())
        .map(|i| format!("arg{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `String arg0, int arg1, ...`, typed from each format's conversion character.
fn typed_args_list(format_args: &[FormatKey], formats: &Formats, sprintf: &Regex) -> String {
    format_args
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let spec = formats.get(name).map(String::as_str).unwrap_or_default();
            let conversion = sprintf
                .captures(&format!("%{}", spec))
                .and_then(|caps| caps.get(5))
                .map(|m| m.as_str().to_owned());
            let dart_type = match conversion.as_deref() {
                Some("s") => "String ",
                Some("i" | "d" | "x" | "X" | "o" | "O") => "int ",
                Some("e" | "E" | "f" | "F" | "g" | "G") => "double ",
                _ => "",
            };
            format!("{}arg{}", dart_type, i)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The `localizations.dart` library: parts, the abstract interface and the delegate.
pub fn localizations_library(args: &ProcessArgs<'_>) -> Result<String> {
    let sprintf = Regex::new(SPRINTF_PATTERN)?;
    let locales = args.localizations.locales();
    let default_lang = args.default_localization.unwrap_or("en");
    let default_class = title_case(default_lang);

    let mut out = String::new();
    out.push_str(GENERATED_NOTICE);
    out.push_str(
        "
import 'package:flutter/widgets.dart';
import 'package:sprintf/sprintf.dart';

",
    );
    for lang in &locales {
        let _ = writeln!(out, "part 'localizations_{}.g.dart';", lang);
    }

    out.push_str(
        "
abstract class AppLocalizations {
  static AppLocalizations? of(BuildContext context) {
    return Localizations.of<AppLocalizations>(context, AppLocalizations);
  }

",
    );
    let no_args = Vec::new();
    for key in args.localizations.sorted_keys() {
        let format_args = args.format_args.get(key).unwrap_or(&no_args);
        if format_args.is_empty() {
            let _ = writeln!(out, "  String get {};", key);
        } else {
            let params = typed_args_list(format_args, args.formats, &sprintf);
            let _ = writeln!(out, "  String {}({});", key, params);
        }
    }
    out.push_str("}\n");

    let supported = locales
        .iter()
        .map(|lang| format!("\"{}\"", lang))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = write!(
        out,
        "
class AppLocalizationsDelegate extends LocalizationsDelegate<AppLocalizations> {{
  static const supportedLanguages = [{supported}];

  @override
  bool isSupported(Locale locale) {{
    return supportedLanguages.contains(locale.languageCode);
  }}

  @override
  Future<AppLocalizations> load(Locale locale) {{
    switch (locale.languageCode) {{
"
    );
    for lang in &locales {
        let fallback = if lang == default_lang {
            "null".to_string()
        } else {
            format!("AppLocalizations{}(null)", default_class)
        };
        let _ = write!(
            out,
            "      case '{lang}':\n        return Future.value(AppLocalizations{}({fallback}));\n",
            title_case(lang)
        );
    }
    let _ = write!(
        out,
        "      default:
        return Future.value(AppLocalizations{default_class}(null));
    }}
  }}

  @override
  bool shouldReload(LocalizationsDelegate<AppLocalizations> old) {{
    return false;
  }}
}}
"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormatArgs, Localizations};

    fn line_args<'a>(format_args: &'a [FormatKey]) -> LocalizedStringArgs<'a> {
        LocalizedStringArgs {
            index: 0,
            is_last: false,
            key: "greeting",
            lang: "en",
            value: "Hi %s",
            format_args,
        }
    }

    #[test]
    fn test_getter_and_method_lines() {
        assert_eq!(
            Flutter.localized_string(&line_args(&[])),
            "  String get greeting => \"Hi %s\";\n"
        );
        let args = vec!["name".to_string(), "count".to_string()];
        assert_eq!(
            Flutter.localized_string(&line_args(&args)),
            "  String greeting(arg0, arg1) => sprintf(\"Hi %s\", [arg0, arg1]);\n"
        );
    }

    #[test]
    fn test_fallback_lines() {
        let args = vec!["name".to_string()];
        assert_eq!(
            Flutter.fallback_string(&line_args(&args)),
            "  String greeting(arg0) => fallback!.greeting(arg0);\n"
        );
        assert_eq!(
            Flutter.fallback_string(&line_args(&[])),
            "  String get greeting => fallback!.greeting;\n"
        );
    }

    #[test]
    fn test_typed_args_list() {
        let sprintf = Regex::new(SPRINTF_PATTERN).unwrap();
        let formats = Formats::from([
            ("name".to_string(), "s".to_string()),
            ("count".to_string(), "d".to_string()),
            ("ratio".to_string(), ".2f".to_string()),
            ("other".to_string(), "@".to_string()),
        ]);
        let args: Vec<FormatKey> = ["name", "count", "ratio", "other"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            typed_args_list(&args, &formats, &sprintf),
            "String arg0, int arg1, double arg2, arg3"
        );
    }

    #[test]
    fn test_localizations_library() {
        let mut localizations = Localizations::new();
        localizations
            .insert("title", "en", Some("Title".to_string()))
            .insert("title", "ru", Some("Заголовок".to_string()))
            .insert("count", "en", Some("%d items".to_string()))
            .insert("count", "ru", None);
        let formats = Formats::from([("n".to_string(), "d".to_string())]);
        let format_args = FormatArgs::from([
            ("title".to_string(), vec![]),
            ("count".to_string(), vec!["n".to_string()]),
        ]);
        let library = localizations_library(&ProcessArgs {
            res_dir: Path::new("lib"),
            localizations: &localizations,
            formats: &formats,
            format_args: &format_args,
            default_localization: Some("en"),
        })
        .unwrap();

        assert!(library.contains("part 'localizations_en.g.dart';"));
        assert!(library.contains("part 'localizations_ru.g.dart';"));
        assert!(library.contains("  String count(int arg0);\n  String get title;\n"));
        assert!(library.contains("static const supportedLanguages = [\"en\", \"ru\"];"));
        assert!(library.contains("case 'ru':\n        return Future.value(AppLocalizationsRu(AppLocalizationsEn(null)));"));
        assert!(library.contains("case 'en':\n        return Future.value(AppLocalizationsEn(null));"));
    }
}
