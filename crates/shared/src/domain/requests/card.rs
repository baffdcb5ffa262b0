use crate::engine::SelectionStrategy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerateStrategy {
    #[default]
    RoundRobin,
    RandomNoRepeat,
    RandomUnique,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GenerateCardRequest {
    /// Overrides the active BIN set for this request only.
    #[serde(default)]
    #[validate(length(min = 1, max = 1000, message = "bins must hold 1 to 1000 entries"))]
    pub bins: Option<Vec<String>>,

    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 100, message = "count must be between 1 and 100"))]
    pub count: usize,

    #[serde(default)]
    pub strategy: GenerateStrategy,

    #[serde(default = "default_wrap_around")]
    pub wrap_around: bool,
}

fn default_count() -> usize {
    1
}

fn default_wrap_around() -> bool {
    true
}

impl GenerateCardRequest {
    pub fn selection_strategy(&self) -> SelectionStrategy {
        match self.strategy {
            GenerateStrategy::RoundRobin => SelectionStrategy::RoundRobin,
            GenerateStrategy::RandomNoRepeat => SelectionStrategy::RandomNoImmediateRepeat,
            GenerateStrategy::RandomUnique => SelectionStrategy::RandomWithoutReplacement {
                wrap_around: self.wrap_around,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Pipe,
}

/// Upper bound on prefixes per bulk call, whether listed in the request or
/// taken from the active set.
pub const MAX_BULK_PREFIXES: usize = 1000;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkGenerateRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 1000, message = "bins must hold 1 to 1000 entries"))]
    pub bins: Option<Vec<String>>,

    #[serde(default = "default_per_prefix")]
    #[validate(range(min = 1, max = 1000, message = "per_prefix must be between 1 and 1000"))]
    pub per_prefix: usize,

    #[serde(default)]
    pub shuffle: bool,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_per_prefix() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_defaults() {
        let req: GenerateCardRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.count, 1);
        assert!(req.wrap_around);
        assert!(req.bins.is_none());
        assert_eq!(req.selection_strategy(), SelectionStrategy::RoundRobin);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn strategy_names_map_to_policies() {
        let req: GenerateCardRequest =
            serde_json::from_str(r#"{"strategy": "random_unique", "wrap_around": false}"#)
                .unwrap();
        assert_eq!(
            req.selection_strategy(),
            SelectionStrategy::RandomWithoutReplacement { wrap_around: false }
        );

        let req: GenerateCardRequest =
            serde_json::from_str(r#"{"strategy": "random_no_repeat"}"#).unwrap();
        assert_eq!(
            req.selection_strategy(),
            SelectionStrategy::RandomNoImmediateRepeat
        );
    }

    #[test]
    fn count_is_bounded() {
        for (count, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let req: GenerateCardRequest =
                serde_json::from_str(&format!(r#"{{"count": {count}}}"#)).unwrap();
            assert_eq!(req.validate().is_ok(), ok, "count {count}");
        }
    }

    #[test]
    fn bulk_defaults_and_bounds() {
        let req: BulkGenerateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.per_prefix, 10);
        assert!(!req.shuffle);
        assert_eq!(req.format, OutputFormat::Json);

        let req: BulkGenerateRequest =
            serde_json::from_str(r#"{"per_prefix": 1001, "format": "pipe"}"#).unwrap();
        assert_eq!(req.format, OutputFormat::Pipe);
        assert!(req.validate().is_err());
    }
}
