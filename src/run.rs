//! End-to-end pipeline: fetch, parse, report or write.

use std::path::PathBuf;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::formats::{FormatOptions, parse_formats};
use crate::localizations::{LocalizationOptions, MissingPolicy, parse_localizations};
use crate::platform::{Platform, ProcessArgs};
use crate::report::report_missing_localizations;
use crate::source::{Source, fetch_everything};
use crate::writer::{DefaultLocalization, write_localizations};

/// Options of a single generation run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root directory of the generated resources.
    pub res_dir: PathBuf,
    pub key_column: String,
    pub format_column: String,
    /// Default language, e.g. `en`. Only redirects output when
    /// `default_localization_path` is set.
    pub default_localization: String,
    /// Full path of the default language's file.
    pub default_localization_path: Option<PathBuf>,
    /// Fail on the first missing key or localization instead of warning.
    pub stop_on_missing: bool,
    /// Print the missing localizations table and write nothing.
    pub report_missing: bool,
    /// Format used for `{}` placeholders.
    pub default_format: Option<String>,
    pub empty_localization_match: Option<Regex>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            res_dir: PathBuf::from("."),
            key_column: "key".to_string(),
            format_column: "format".to_string(),
            default_localization: "en".to_string(),
            default_localization_path: None,
            stop_on_missing: false,
            report_missing: false,
            default_format: None,
            empty_localization_match: None,
        }
    }
}

impl RunOptions {
    fn format_options(&self) -> FormatOptions {
        FormatOptions {
            format_column: self.format_column.clone(),
            default_format: self.default_format.clone().filter(|name| !name.is_empty()),
        }
    }

    fn localization_options(&self) -> LocalizationOptions {
        LocalizationOptions {
            key_column: self.key_column.clone(),
            policy: if self.stop_on_missing {
                MissingPolicy::Fail
            } else {
                MissingPolicy::Warn
            },
            empty_localization_match: self.empty_localization_match.clone(),
        }
    }
}

/// Fetch both tables from `source` and generate the localization files of
/// `platform`.
///
/// In report mode the missing localizations are printed and nothing is
/// written; the run fails with [`Error::MissingLocalizations`] if any were
/// found.
pub async fn run(source: &dyn Source, platform: &dyn Platform, options: &RunOptions) -> Result<()> {
    let tables = fetch_everything(source).await?;

    let formats = parse_formats(
        &tables.formats,
        platform,
        source.formats_document_name(),
        &options.format_options(),
    )?;
    debug!(count = formats.len(), "Parsed formats");

    let parsed = parse_localizations(
        &tables.localizations,
        platform,
        &formats,
        source.localizations_document_name(),
        &options.localization_options(),
    )?;
    debug!(
        keys = parsed.localizations.len(),
        warnings = parsed.warnings.len(),
        "Parsed localizations"
    );

    if options.report_missing {
        let count = report_missing_localizations(&parsed.warnings);
        return if count > 0 {
            Err(Error::MissingLocalizations { count })
        } else {
            Ok(())
        };
    }

    for warning in &parsed.warnings {
        warn!("{}", warning);
    }

    tokio::fs::create_dir_all(&options.res_dir)
        .await
        .map_err(|source| Error::Io {
            path: options.res_dir.clone(),
            source,
        })?;

    let process_args = ProcessArgs {
        res_dir: &options.res_dir,
        localizations: &parsed.localizations,
        formats: &formats,
        format_args: &parsed.format_args,
        default_localization: Some(options.default_localization.as_str()),
    };

    if let Some(preprocessor) = platform.preprocessor() {
        preprocessor.preprocess(&process_args)?;
    }

    let default_localization = DefaultLocalization {
        locale: &options.default_localization,
        path: options.default_localization_path.as_deref(),
    };
    let written = write_localizations(
        platform,
        &options.res_dir,
        &parsed.localizations,
        &parsed.format_args,
        Some(&default_localization),
    )
    .await?;

    if let Some(postprocessor) = platform.postprocessor() {
        postprocessor.postprocess(&process_args)?;
    }

    info!(
        "Generated {} {} localization file(s)",
        written.len(),
        platform.name()
    );
    Ok(())
}
