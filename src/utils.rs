//! Utility functions for path and value handling

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::{Component, Path};

/// Check that `filename` is a single normal path component
///
/// Rejects empty names, `.` and `..`, and anything containing a separator,
/// so the joined destination always stays directly inside its directory.
///
/// # Examples
///
/// ```
/// use frame_adapters::utils::validate_filename;
///
/// assert!(validate_filename("file_number_1.txt").is_ok());
/// assert!(validate_filename("../escape.txt").is_err());
/// ```
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty() || filename.contains('/') || filename.contains('\\') {
        return Err(Error::InvalidFilename(filename.to_string()));
    }

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::InvalidFilename(filename.to_string())),
    }
}

/// Render an extra option value as the string handed to the loader
///
/// `null` and empty strings count as absent.
pub fn option_value_to_string(value: &Value) -> Option<String> {
    let rendered = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    };
    (!rendered.is_empty()).then_some(rendered)
}
