use crate::{
    domain::{
        requests::UploadBinsRequest,
        responses::{ApiResponse, BinSetResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBinCommandService = Arc<dyn BinCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait BinCommandServiceTrait {
    async fn upload(
        &self,
        req: &UploadBinsRequest,
    ) -> Result<ApiResponse<BinSetResponse>, ServiceError>;
}
