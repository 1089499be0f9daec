//! Output writer.
//!
//! Each locale is rendered into its own buffer (header, one line per key in
//! lexicographic order, footer), then every buffer is written to disk by its
//! own task. Buffers are not shared, so the tasks need no locking.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::platform::{FooterArgs, HeaderArgs, LocalizedStringArgs, Platform};
use crate::{FormatArgs, Lang, Localizations};

/// Where the default locale's file goes instead of the platform path.
#[derive(Debug, Clone)]
pub struct DefaultLocalization<'a> {
    pub locale: &'a str,
    /// Full file path, used verbatim.
    pub path: Option<&'a Path>,
}

/// A rendered localization file waiting to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub lang: Lang,
    pub path: PathBuf,
    pub content: String,
}

/// Render the file for one locale.
pub fn render_locale(
    platform: &dyn Platform,
    localizations: &Localizations,
    format_args: &FormatArgs,
    lang: &str,
) -> String {
    let keys = localizations.sorted_keys();
    let last_written = keys
        .iter()
        .rposition(|key| localizations.get(key, lang).is_some_and(|v| !v.is_empty()));

    let mut content = platform.header(&HeaderArgs { lang });
    for (index, key) in keys.iter().enumerate() {
        let args = LocalizedStringArgs {
            index,
            is_last: Some(index) == last_written,
            key,
            lang,
            value: localizations.get(key, lang).unwrap_or_default(),
            format_args: format_args.get(*key).map(Vec::as_slice).unwrap_or_default(),
        };
        if !args.value.is_empty() {
            content.push_str(&platform.localized_string(&args));
        } else if let Some(fallback) = platform.fallback() {
            content.push_str(&fallback.fallback_string(&args));
        }
    }
    content.push_str(&platform.footer(&FooterArgs { lang }));
    content
}

/// Render every locale and resolve its target path.
pub fn render_localizations(
    platform: &dyn Platform,
    res_dir: &Path,
    localizations: &Localizations,
    format_args: &FormatArgs,
    default_localization: Option<&DefaultLocalization<'_>>,
) -> Result<Vec<RenderedFile>> {
    let override_target = match default_localization {
        Some(DefaultLocalization {
            locale,
            path: Some(path),
        }) => Some((Locale::parse(locale)?.to_string(), path.to_path_buf())),
        _ => None,
    };

    localizations
        .locales()
        .into_iter()
        .map(|lang| {
            let path = match &override_target {
                Some((default_lang, path)) if *default_lang == lang => path.clone(),
                _ => platform.localization_file_path(&lang, res_dir),
            };
            if path.as_os_str().is_empty() {
                return Err(Error::EmptyLocalizationFilePath { lang });
            }
            let content = render_locale(platform, localizations, format_args, &lang);
            Ok(RenderedFile {
                lang,
                path,
                content,
            })
        })
        .collect()
}

async fn write_file(file: RenderedFile) -> Result<PathBuf> {
    let io_error = |source| Error::Io {
        path: file.path.clone(),
        source,
    };

    if let Some(dir) = file.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await.map_err(io_error)?;
    }
    let mut out = tokio::fs::File::create(&file.path).await.map_err(io_error)?;
    out.write_all(file.content.as_bytes())
        .await
        .map_err(io_error)?;
    out.flush().await.map_err(io_error)?;
    out.sync_all().await.map_err(io_error)?;

    debug!(lang = %file.lang, bytes = file.content.len(), "Wrote localization file");
    Ok(file.path)
}

/// Write one file per locale present in `localizations`.
///
/// Writes run concurrently. All of them are awaited and the first error is
/// returned; files written by other locales stay on disk.
pub async fn write_localizations(
    platform: &dyn Platform,
    res_dir: &Path,
    localizations: &Localizations,
    format_args: &FormatArgs,
    default_localization: Option<&DefaultLocalization<'_>>,
) -> Result<Vec<PathBuf>> {
    let files = render_localizations(
        platform,
        res_dir,
        localizations,
        format_args,
        default_localization,
    )?;

    let mut tasks = JoinSet::new();
    for file in files {
        tasks.spawn(write_file(file));
    }

    let mut written = Vec::new();
    let mut first_error = None;
    while let Some(joined) = tasks.join_next().await {
        match joined.map_err(Error::from).and_then(|result| result) {
            Ok(path) => {
                info!("Wrote {}", path.display());
                written.push(path);
            }
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => {
            written.sort();
            Ok(written)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::MockPlatform;

    fn sample() -> (Localizations, FormatArgs) {
        let mut loc = Localizations::new();
        loc.insert("b_second", "en", Some("Second".to_string()))
            .insert("a_first", "en", Some("First %1$d".to_string()))
            .insert("c_third", "en", Some(String::new()))
            .insert("a_first", "ru", Some("Первый %1$d".to_string()))
            .insert("b_second", "ru", None)
            .insert("c_third", "ru", Some("Третий".to_string()));
        let mut format_args = FormatArgs::new();
        format_args.insert("a_first".to_string(), vec!["count".to_string()]);
        (loc, format_args)
    }

    #[test]
    fn test_render_sorted_with_last_flag() {
        let (loc, format_args) = sample();
        let content = render_locale(&MockPlatform::new(), &loc, &format_args, "en");
        assert_eq!(
            content,
            "# en\n0:a_first=First %1$d\n1:b_second=Second (last)\n# end en\n"
        );
    }

    #[test]
    fn test_render_skips_missing_without_fallback() {
        let (loc, format_args) = sample();
        let content = render_locale(&MockPlatform::new(), &loc, &format_args, "ru");
        assert_eq!(
            content,
            "# ru\n0:a_first=Первый %1$d\n2:c_third=Третий (last)\n# end ru\n"
        );
    }

    #[test]
    fn test_render_uses_fallback() {
        let (loc, format_args) = sample();
        let platform = MockPlatform::new().with_fallback();
        let content = render_locale(&platform, &loc, &format_args, "en");
        assert!(content.contains("2:c_third=<fallback>\n"));
        let content = render_locale(&platform, &loc, &format_args, "ru");
        assert!(content.contains("1:b_second=<fallback>\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let (loc, format_args) = sample();
        let platform = MockPlatform::new();
        let first = render_localizations(&platform, Path::new("out"), &loc, &format_args, None)
            .unwrap();
        let second = render_localizations(&platform, Path::new("out"), &loc, &format_args, None)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].lang, "en");
        assert_eq!(first[1].path, Path::new("out").join("ru").join("strings.txt"));
    }

    #[test]
    fn test_default_localization_override() {
        let (loc, format_args) = sample();
        let default = DefaultLocalization {
            locale: "RU",
            path: Some(Path::new("base/strings.txt")),
        };
        let files = render_localizations(
            &MockPlatform::new(),
            Path::new("out"),
            &loc,
            &format_args,
            Some(&default),
        )
        .unwrap();
        assert_eq!(files[0].path, Path::new("out").join("en").join("strings.txt"));
        assert_eq!(files[1].path, Path::new("base/strings.txt"));
    }

    #[test]
    fn test_invalid_default_locale() {
        let (loc, format_args) = sample();
        let default = DefaultLocalization {
            locale: "",
            path: Some(Path::new("base.txt")),
        };
        let result = render_localizations(
            &MockPlatform::new(),
            Path::new("out"),
            &loc,
            &format_args,
            Some(&default),
        );
        assert!(matches!(result, Err(Error::InvalidLocale { .. })));
    }

    #[tokio::test]
    async fn test_write_localizations() {
        let dir = tempfile::tempdir().unwrap();
        let (loc, format_args) = sample();
        let written = write_localizations(&MockPlatform::new(), dir.path(), &loc, &format_args, None)
            .await
            .unwrap();

        assert_eq!(written.len(), 2);
        let en = std::fs::read_to_string(dir.path().join("en").join("strings.txt")).unwrap();
        assert!(en.starts_with("# en\n"));
        assert!(en.ends_with("# end en\n"));
    }

    #[tokio::test]
    async fn test_write_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected.
        std::fs::write(dir.path().join("ru"), "blocker").unwrap();
        let (loc, format_args) = sample();

        let result =
            write_localizations(&MockPlatform::new(), dir.path(), &loc, &format_args, None).await;
        assert!(matches!(result, Err(Error::Io { .. })));
        // The sibling locale is left in place.
        assert!(dir.path().join("en").join("strings.txt").exists());
    }
}
