use crate::{
    domain::{
        requests::{BulkGenerateRequest, GenerateCardRequest},
        responses::{ApiResponse, CardResponse},
    },
    errors::ServiceError,
    model::card::GeneratedCard,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCardGenerateService = Arc<dyn CardGenerateServiceTrait + Send + Sync>;

#[async_trait]
pub trait CardGenerateServiceTrait {
    async fn generate(
        &self,
        req: &GenerateCardRequest,
    ) -> Result<ApiResponse<Vec<CardResponse>>, ServiceError>;

    async fn generate_for_bin(&self, bin: &str)
    -> Result<ApiResponse<CardResponse>, ServiceError>;

    /// Raw cards; the caller picks the output format.
    async fn bulk(&self, req: &BulkGenerateRequest) -> Result<Vec<GeneratedCard>, ServiceError>;
}
