//! Source snippet lookup for test cases
//!
//! A case named `foo` is implemented by a function `bool foo(...) { ... }`
//! somewhere under the source root. The body is found with a plain regex
//! that stops at the first `}` after the opening brace, so a body with a
//! nested block is cut short at the end of that block.

pub mod highlight;

pub use highlight::{escape_html, format_code, highlight_line};

use crate::config::{build_ignore_set, is_ignored, Config};
use crate::error::{ReportError, Result};
use globset::GlobSet;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Rendered in place of the code block when no source matches
pub const NOT_FOUND_PLACEHOLDER: &str = "// Code not found";

/// Raw lookup result for one case name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snippet {
    Found {
        /// File name (without directories) of the matching source
        file_name: String,
        /// Function body, trimmed
        body: String,
    },
    NotFound,
}

impl Snippet {
    /// Highlighted HTML for this snippet, or the placeholder
    pub fn render(&self) -> String {
        match self {
            Snippet::Found { file_name, body } => format_code(body, file_name),
            Snippet::NotFound => NOT_FOUND_PLACEHOLDER.to_string(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Snippet::Found { .. })
    }
}

/// Scans a source tree for the function implementing a test case.
///
/// Nothing is cached: every lookup walks and reads the tree again.
pub struct SnippetResolver {
    root: PathBuf,
    extension: String,
    ignore: Option<GlobSet>,
}

impl SnippetResolver {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            ignore: None,
        }
    }

    /// Skip source files matching `set` (paths relative to the root)
    pub fn with_ignore(mut self, set: GlobSet) -> Self {
        self.ignore = Some(set);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let resolver = Self::new(&config.source_root, &config.source_extension);
        if config.ignore.is_empty() {
            Ok(resolver)
        } else {
            Ok(resolver.with_ignore(build_ignore_set(&config.ignore)?))
        }
    }

    /// All candidate source files, in file-name order within each directory.
    /// A missing root yields no files.
    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(vec![]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                ReportError::io(path, e.into())
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || !self.has_extension(path) {
                continue;
            }
            if let Some(ref set) = self.ignore {
                let relative = path.strip_prefix(&self.root).unwrap_or(path);
                if is_ignored(relative, set) {
                    continue;
                }
            }
            files.push(path.to_path_buf());
        }
        Ok(files)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }

    /// Find the body of `bool <case_name>(...) { ... }`. The first file
    /// containing a match wins.
    pub fn find(&self, case_name: &str) -> Result<Snippet> {
        let pattern = function_pattern(case_name);

        for path in self.source_files()? {
            let content = fs::read_to_string(&path).map_err(|e| ReportError::io(&path, e))?;
            if let Some(body) = extract_body(&pattern, &content) {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                return Ok(Snippet::Found { file_name, body });
            }
        }
        Ok(Snippet::NotFound)
    }

    /// Highlighted HTML for `case_name`, or the not-found placeholder.
    ///
    /// Convenience for callers that only need the markup; the HTML reporter
    /// uses [`find`](Self::find) so it can also record misses.
    pub fn resolve(&self, case_name: &str) -> Result<String> {
        Ok(self.find(case_name)?.render())
    }
}

/// Regex matching the definition of `bool <name>(...)` up to the first `}`
pub fn function_pattern(name: &str) -> Regex {
    let pattern = format!(
        r"(?s)bool\s+{}\s*\([^)]*\)\s*\{{(.*?)\}}",
        regex::escape(name)
    );
    Regex::new(&pattern).expect("escaped name always forms a valid pattern")
}

fn extract_body(pattern: &Regex, content: &str) -> Option<String> {
    pattern
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}
