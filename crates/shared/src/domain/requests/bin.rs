use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UploadMode {
    #[default]
    Replace,
    Append,
}

impl FromStr for UploadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            other => Err(format!("mode must be 'replace' or 'append', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UploadBinsRequest {
    #[validate(length(min = 1, max = 10000, message = "bins must hold 1 to 10000 entries"))]
    pub bins: Vec<String>,

    #[serde(default)]
    pub mode: UploadMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_form_values() {
        assert_eq!("".parse::<UploadMode>(), Ok(UploadMode::Replace));
        assert_eq!(" Append ".parse::<UploadMode>(), Ok(UploadMode::Append));
        assert!("merge".parse::<UploadMode>().is_err());
    }

    #[test]
    fn empty_upload_fails_validation() {
        let req: UploadBinsRequest = serde_json::from_str(r#"{"bins": []}"#).unwrap();
        assert_eq!(req.mode, UploadMode::Replace);
        assert!(req.validate().is_err());
    }
}
