//! Results file loading

use crate::error::{ReportError, Result};
use crate::ResultSet;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read and parse the results file at `path`.
///
/// The shape is returned as-is; callers normalize with
/// [`ResultSet::into_suites`]. Missing fields fall back to defaults.
pub fn load(path: &Path) -> Result<ResultSet> {
    if !path.exists() {
        return Err(ReportError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    let value: Value = serde_json::from_str(&content).map_err(|source| ReportError::InvalidInput {
        path: path.to_path_buf(),
        source,
    })?;

    if is_empty(&value) {
        return Err(ReportError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    serde_json::from_value(value).map_err(|source| ReportError::InvalidInput {
        path: path.to_path_buf(),
        source,
    })
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` all count as "no data"
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
