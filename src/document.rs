//! Loading of YAML/JSON documents into generic values.
//!
//! Role scope files are declarative data, not code, so everything a role
//! ships is parsed into a single generic value type (`serde_yaml::Value`)
//! regardless of the on-disk format. `.json` entry files are parsed with
//! `serde_json` first so users get JSON-specific parser diagnostics, then
//! converted into the common YAML value representation.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Load a YAML or JSON document at `path` into a generic value.
///
/// The format is chosen by file extension: `.json` is parsed as JSON,
/// everything else (`.yml`, `.yaml`, extensionless `main`) as YAML.
/// An empty or whitespace-only file loads as `Value::Null`, which callers
/// treat the same as an absent scope.
pub fn load(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let json: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| Error::DocumentParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        serde_yaml::to_value(json).map_err(|e| Error::DocumentParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    } else {
        serde_yaml::from_str(&text).map_err(|e| Error::DocumentParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
