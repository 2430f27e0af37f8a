//! Light Report: static HTML reports for light_test result files
//!
//! Reads a results file produced by the test harness, looks up the source of
//! every test case and renders a single self-contained HTML page.

pub mod config;
pub mod error;
pub mod loader;
pub mod reporter;
pub mod snippet;

pub use config::Config;
pub use error::{ReportError, Result};

use chrono::Utc;
use reporter::{HtmlReporter, ReportMeta};
use serde::Deserialize;
use snippet::SnippetResolver;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Parsed contents of a results file: one suite or a list of suites
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResultSet {
    Many(Vec<SuiteResult>),
    Single(SuiteResult),
}

impl ResultSet {
    /// Normalize to an ordered list of suites
    pub fn into_suites(self) -> Vec<SuiteResult> {
        match self {
            ResultSet::Many(suites) => suites,
            ResultSet::Single(suite) => vec![suite],
        }
    }
}

/// Results of one test suite
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuiteResult {
    #[serde(default, alias = "test_name")]
    pub name: String,
    #[serde(default, alias = "test_description")]
    pub description: String,
    #[serde(default)]
    pub passed: u64,
    #[serde(default)]
    pub failed: u64,
    /// Expected to equal `passed + failed`; not enforced
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub success: bool,
    /// Per-case detail, absent when the harness only reported counters
    #[serde(default, alias = "case_results")]
    pub cases: Option<Vec<CaseResult>>,
}

/// Result of a single test case
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseResult {
    /// Name of the case, also the name of the function implementing it
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub passed: bool,
    /// Empty when the case passed
    #[serde(default)]
    pub error: String,
}

/// Aggregate counters over all suites
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
}

impl Totals {
    /// Sum the counters of every suite. Fails if a sum does not fit in `u64`.
    pub fn from_suites(suites: &[SuiteResult]) -> Result<Self> {
        suites.iter().try_fold(Totals::default(), |acc, s| {
            match (
                acc.total.checked_add(s.total),
                acc.passed.checked_add(s.passed),
                acc.failed.checked_add(s.failed),
            ) {
                (Some(total), Some(passed), Some(failed)) => Ok(Totals {
                    total,
                    passed,
                    failed,
                }),
                _ => Err(ReportError::CounterOverflow {
                    suite: s.name.clone(),
                }),
            }
        })
    }

    /// Percentage of passed tests, 0 when there are no tests
    pub fn success_rate(&self) -> f64 {
        if self.total > 0 {
            self.passed as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Success rate with one decimal place, as shown in the report
    pub fn success_rate_label(&self) -> String {
        format!("{:.1}", self.success_rate())
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Absolute path of the written report
    pub output_path: PathBuf,
    pub totals: Totals,
    pub suites: usize,
    /// Case names for which no source snippet was found
    pub missing_snippets: Vec<String>,
}

/// Load results, render the report and write it.
///
/// Nothing is written unless loading and rendering both succeed, so a
/// previous report is left untouched on failure.
pub fn run(config: &Config) -> Result<RunSummary> {
    let suites = loader::load(&config.results_path)?.into_suites();

    let resolver = SnippetResolver::from_config(config)?;
    let meta = ReportMeta {
        title: config.title.clone(),
        stylesheet_url: config.stylesheet_url.clone(),
        generated_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    };
    let report = HtmlReporter::new(&resolver).report(&suites, &meta)?;

    write_report(&config.output_path, &report.html)?;

    let output_path = fs::canonicalize(&config.output_path)
        .unwrap_or_else(|_| config.output_path.clone());

    Ok(RunSummary {
        output_path,
        totals: report.totals,
        suites: suites.len(),
        missing_snippets: report.missing_snippets,
    })
}

/// Replace `path` with the rendered document.
///
/// The document goes to a temporary file next to `path` first and is then
/// renamed over it, so a failed write leaves any previous report intact.
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| ReportError::io(path, e))?;
    file.write_all(html.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| ReportError::io(path, e))?;
    file.persist(path)
        .map_err(|e| ReportError::io(path, e.error))?;
    Ok(())
}
