use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use regex::Regex;
use tracing::error;

use sheetloc::source::{CsvSource, GoogleSheetsSource};
use sheetloc::{RunOptions, Source, platforms, run};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// A Google Sheets spreadsheet, read with `GOOGLE_SHEETS_API_KEY`.
    GoogleSheets,
    /// Two local CSV files.
    Csv,
}

/// Generate localization files from spreadsheet tables.
#[derive(Debug, Parser)]
#[command(name = "sheetloc", version, about)]
struct Cli {
    /// Data source.
    #[arg(long, value_enum, default_value_t = SourceKind::GoogleSheets)]
    source: SourceKind,

    /// Target platform name (android, ios, json, flutter).
    #[arg(short, long)]
    platform: String,

    /// Path to the resources folder in the project.
    #[arg(short, long = "resources")]
    resources: PathBuf,

    /// Localizations file path. Required for the csv source.
    #[arg(long, required_if_eq("source", "csv"))]
    localizations_file_path: Option<PathBuf>,

    /// Formats file path. Required for the csv source.
    #[arg(long, required_if_eq("source", "csv"))]
    formats_file_path: Option<PathBuf>,

    /// Spreadsheet ID. Required for the google-sheets source.
    #[arg(short, long)]
    spreadsheet: Option<String>,

    /// Localizations tab name.
    #[arg(short, long, default_value = "localizations")]
    tab: String,

    /// Formats tab name.
    #[arg(short, long, default_value = "formats")]
    formats_tab: String,

    /// Title of the key column.
    #[arg(long, default_value = "key")]
    key_column: String,

    /// Title of the format name column.
    #[arg(long, default_value = "format")]
    format_name_column: String,

    /// Stop execution if a missing localization is found.
    #[arg(long)]
    stop_on_missing: bool,

    /// Name of the format to be used in place of "{}".
    #[arg(long)]
    default_format_name: Option<String>,

    /// Default localization language (e.g. "en"). Has no effect without
    /// --default-localization-file-path.
    #[arg(long, default_value = "en")]
    default_localization: String,

    /// Full path of the default localization file, replacing the generated
    /// path for the --default-localization language.
    #[arg(long)]
    default_localization_file_path: Option<PathBuf>,

    /// Regex matching an empty localization string.
    #[arg(long, default_value = "^$")]
    empty_localization_match: Regex,

    /// Only print the missing localizations, without generating files.
    #[arg(long)]
    missing_localizations_report: bool,
}

impl Cli {
    fn source(&self) -> sheetloc::Result<Box<dyn Source>> {
        match self.source {
            SourceKind::Csv => {
                let (Some(localizations), Some(formats)) =
                    (&self.localizations_file_path, &self.formats_file_path)
                else {
                    return Err(sheetloc::Error::Config(
                        "--localizations-file-path and --formats-file-path are required".to_string(),
                    ));
                };
                Ok(Box::new(CsvSource::new(localizations, formats)))
            }
            SourceKind::GoogleSheets => {
                let spreadsheet = self.spreadsheet.as_deref().unwrap_or_default();
                Ok(Box::new(GoogleSheetsSource::from_env(
                    spreadsheet,
                    &self.formats_tab,
                    &self.tab,
                )?))
            }
        }
    }

    fn run_options(&self) -> RunOptions {
        RunOptions {
            res_dir: self.resources.clone(),
            key_column: self.key_column.clone(),
            format_column: self.format_name_column.clone(),
            default_localization: self.default_localization.clone(),
            default_localization_path: self.default_localization_file_path.clone(),
            stop_on_missing: self.stop_on_missing,
            report_missing: self.missing_localizations_report,
            default_format: self.default_format_name.clone(),
            empty_localization_match: Some(self.empty_localization_match.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let platform = platforms::resolve(&cli.platform)?;
    let source = cli.source()?;

    if let Err(err) = run(source.as_ref(), platform.as_ref(), &cli.run_options()).await {
        error!("{}", err);
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_csv_arguments() {
        let cli = Cli::try_parse_from([
            "sheetloc",
            "--source",
            "csv",
            "-p",
            "android",
            "-r",
            "app/src/main/res",
            "--localizations-file-path",
            "loc.csv",
            "--formats-file-path",
            "formats.csv",
            "--stop-on-missing",
        ])
        .unwrap();

        assert_eq!(cli.source, SourceKind::Csv);
        let options = cli.run_options();
        assert!(options.stop_on_missing);
        assert_eq!(options.res_dir, PathBuf::from("app/src/main/res"));
        assert_eq!(options.key_column, "key");
        assert!(cli.source().is_ok());
    }

    #[test]
    fn test_cli_csv_requires_paths() {
        let result = Cli::try_parse_from(["sheetloc", "--source", "csv", "-p", "ios", "-r", "out"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_sheets_defaults() {
        let cli = Cli::try_parse_from(["sheetloc", "-p", "ios", "-r", "out", "-s", "abc"]).unwrap();
        assert_eq!(cli.tab, "localizations");
        assert_eq!(cli.formats_tab, "formats");
        assert!(cli.empty_localization_match.is_match(""));
    }
}
