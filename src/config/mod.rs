//! Configuration loading for Light Report

mod schema;

pub use schema::{
    CliOverrides, Config, ConfigFile, DEFAULT_OUTPUT_PATH, DEFAULT_RESULTS_PATH,
    DEFAULT_SOURCE_EXTENSION, DEFAULT_SOURCE_ROOT, DEFAULT_STYLESHEET_URL, DEFAULT_TITLE,
};

use crate::error::{ReportError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".light-report.json";

/// Find and parse the config file. Searches `work_dir` then its parents
/// unless `custom_path` is given; no file at all yields the defaults.
pub fn load_config_file(work_dir: &Path, custom_path: Option<&Path>) -> Result<ConfigFile> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if !path.exists() {
            return Err(ReportError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Some(path)
    } else {
        find_config_in_parents(work_dir)
    };

    let Some(path) = path else {
        return Ok(ConfigFile::default());
    };

    let content = fs::read_to_string(&path).map_err(|e| ReportError::io(&path, e))?;
    serde_json::from_str(&content).map_err(|e| {
        ReportError::Config(format!("Invalid JSON in config {}: {}", path.display(), e))
    })
}

/// Load the config file and merge it with CLI overrides
pub fn load_config(
    work_dir: &Path,
    custom_path: Option<&Path>,
    cli: CliOverrides,
) -> Result<Config> {
    let file = load_config_file(work_dir, custom_path)?;
    Ok(Config::resolve(file, cli, work_dir))
}

/// Search for the config file in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Build a GlobSet from ignore patterns for path matching
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ReportError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ReportError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Check if a path should be ignored based on config glob patterns
pub fn is_ignored(path: &Path, ignore_set: &GlobSet) -> bool {
    ignore_set.is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path(), None, CliOverrides::default()).unwrap();
        assert_eq!(config.results_path, dir.path().join("tests/results.json"));
        assert_eq!(config.source_root, dir.path().join("tests"));
        assert_eq!(config.output_path, dir.path().join("tests/results.html"));
        assert_eq!(config.source_extension, "cppm");
        assert_eq!(config.title, "light_test");
    }

    #[test]
    fn test_config_file_found_in_parent() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "sourceRoot": "src/tests", "sourceExtension": ".cpp", "title": "mylib" }"#,
        )
        .unwrap();
        let nested = dir.path().join("build");
        fs::create_dir(&nested).unwrap();

        let file = load_config_file(&nested, None).unwrap();
        assert_eq!(file.source_root, Some(PathBuf::from("src/tests")));

        let config = Config::resolve(file, CliOverrides::default(), dir.path());
        assert_eq!(config.source_root, dir.path().join("src/tests"));
        assert_eq!(config.source_extension, "cpp");
        assert_eq!(config.title, "mylib");
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "outputPath": "out/file.html", "resultsPath": "r.json" }"#,
        )
        .unwrap();
        let cli = CliOverrides {
            output_path: Some(PathBuf::from("report.html")),
            ..CliOverrides::default()
        };
        let config = load_config(dir.path(), None, cli).unwrap();
        assert_eq!(config.output_path, dir.path().join("report.html"));
        assert_eq!(config.results_path, dir.path().join("r.json"));
    }

    #[test]
    fn test_custom_config_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config_file(dir.path(), Some(Path::new("nope.json"))).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "outptuPath": "x" }"#).unwrap();
        let err = load_config_file(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON in config"));
    }

    #[test]
    fn test_is_ignored_generated() {
        let set = build_ignore_set(&["**/generated/**".to_string()]).unwrap();
        assert!(is_ignored(Path::new("tests/generated/a.cppm"), &set));
        assert!(!is_ignored(Path::new("tests/core/a.cppm"), &set));
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let err = build_ignore_set(&["a/{b".to_string()]).unwrap_err();
        assert!(matches!(err, ReportError::InvalidPattern { .. }));
    }
}
