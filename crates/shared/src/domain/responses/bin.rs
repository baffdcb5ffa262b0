use crate::model::bin::Bin;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BinSetResponse {
    pub count: usize,
    pub bins: Vec<String>,
}

impl From<&[Bin]> for BinSetResponse {
    fn from(bins: &[Bin]) -> Self {
        Self {
            count: bins.len(),
            bins: bins.iter().map(|b| b.to_string()).collect(),
        }
    }
}
