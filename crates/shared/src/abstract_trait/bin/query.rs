use crate::{
    domain::responses::{ApiResponse, BinSetResponse},
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBinQueryService = Arc<dyn BinQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait BinQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<BinSetResponse>, ServiceError>;
    async fn count(&self) -> usize;
}
