//! Error taxonomy for a report run

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a run before the report is written.
///
/// A case without a matching source snippet is not an error; see
/// [`crate::snippet::Snippet::NotFound`].
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Test results file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Can't load test results: {} is empty", path.display())]
    EmptyInput { path: PathBuf },

    #[error("Invalid test results in {}: {source}", path.display())]
    InvalidInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Test counters overflow when adding suite '{suite}'")]
    CounterOverflow { suite: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("{0}")]
    Config(String),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error (0 is success, 2 is reserved for usage errors)
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::MissingInput { .. } => 3,
            ReportError::EmptyInput { .. } => 4,
            ReportError::InvalidInput { .. } | ReportError::CounterOverflow { .. } => 5,
            ReportError::Io { .. } => 6,
            ReportError::InvalidPattern { .. } | ReportError::Config(_) => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            ReportError::MissingInput { path: "a".into() },
            ReportError::EmptyInput { path: "a".into() },
            ReportError::InvalidInput {
                path: "a".into(),
                source: serde_json::from_str::<u8>("x").unwrap_err(),
            },
            ReportError::io("a", std::io::Error::other("denied")),
            ReportError::Config("bad".into()),
        ];
        let mut codes: Vec<u8> = errors.iter().map(|e| e.exit_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
        assert!(!codes.contains(&2));
    }

    #[test]
    fn test_missing_input_message_names_path() {
        let err = ReportError::MissingInput {
            path: "tests/results.json".into(),
        };
        assert_eq!(
            err.to_string(),
            "Test results file not found: tests/results.json"
        );
    }
}
