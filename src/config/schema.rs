//! Config schema and deserialization

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_RESULTS_PATH: &str = "tests/results.json";
pub const DEFAULT_SOURCE_ROOT: &str = "tests";
pub const DEFAULT_SOURCE_EXTENSION: &str = "cppm";
pub const DEFAULT_OUTPUT_PATH: &str = "tests/results.html";
pub const DEFAULT_TITLE: &str = "light_test";
pub const DEFAULT_STYLESHEET_URL: &str =
    "https://cdn.jsdelivr.net/npm/bulma@1.0.2/css/bulma.min.css";

/// Root structure of `.light-report.json`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// Results file written by the test harness
    #[serde(default)]
    pub results_path: Option<PathBuf>,

    /// Directory scanned recursively for test sources
    #[serde(default)]
    pub source_root: Option<PathBuf>,

    /// Extension of test source files, without the dot
    #[serde(default)]
    pub source_extension: Option<String>,

    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Project name shown in the page heading
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub stylesheet_url: Option<String>,

    /// Glob patterns for source files to skip during snippet lookup
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub results_path: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub source_extension: Option<String>,
    pub output_path: Option<PathBuf>,
}

/// Effective configuration for one run, with every path resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub results_path: PathBuf,
    pub source_root: PathBuf,
    pub source_extension: String,
    pub output_path: PathBuf,
    pub title: String,
    pub stylesheet_url: String,
    pub ignore: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            title: DEFAULT_TITLE.to_string(),
            stylesheet_url: DEFAULT_STYLESHEET_URL.to_string(),
            ignore: Vec::new(),
        }
    }
}

impl Config {
    /// Defaults, then file values, then CLI values. Relative paths are
    /// resolved against `work_dir`.
    pub fn resolve(file: ConfigFile, cli: CliOverrides, work_dir: &Path) -> Self {
        let defaults = Config::default();
        let ext = cli
            .source_extension
            .or(file.source_extension)
            .unwrap_or(defaults.source_extension);

        Self {
            results_path: work_dir.join(
                cli.results_path
                    .or(file.results_path)
                    .unwrap_or(defaults.results_path),
            ),
            source_root: work_dir.join(
                cli.source_root
                    .or(file.source_root)
                    .unwrap_or(defaults.source_root),
            ),
            source_extension: ext.trim_start_matches('.').to_string(),
            output_path: work_dir.join(
                cli.output_path
                    .or(file.output_path)
                    .unwrap_or(defaults.output_path),
            ),
            title: file.title.unwrap_or(defaults.title),
            stylesheet_url: file.stylesheet_url.unwrap_or(defaults.stylesheet_url),
            ignore: file.ignore,
        }
    }

    /// Point every path at `root`, keeping the default layout
    pub fn rooted_at(root: &Path) -> Self {
        Self::resolve(ConfigFile::default(), CliOverrides::default(), root)
    }
}
