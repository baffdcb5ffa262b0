use crate::errors::ServiceError;
use serde_json::Value;

/// Raw BIN entries from an uploaded file.
///
/// A `.json` file must hold an array of strings or numbers. Anything else
/// is read as UTF-8 text with one entry per line.
pub fn parse_upload(file_name: Option<&str>, content: &[u8]) -> Result<Vec<String>, ServiceError> {
    let text = std::str::from_utf8(content)
        .map_err(|e| ServiceError::Upload(format!("file is not valid UTF-8: {e}")))?;

    let is_json = file_name
        .map(|name| name.to_ascii_lowercase().ends_with(".json"))
        .unwrap_or(false);

    if !is_json {
        return Ok(text.lines().map(|line| line.trim().to_string()).collect());
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|e| ServiceError::Upload(format!("invalid JSON: {e}")))?;

    let Value::Array(items) = value else {
        return Err(ServiceError::Upload("JSON must be an array".into()));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(ServiceError::Upload(format!(
                "unsupported JSON entry: {other}"
            ))),
        })
        .collect()
}
