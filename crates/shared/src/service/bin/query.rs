use crate::{
    abstract_trait::bin::BinQueryServiceTrait,
    domain::responses::{ApiResponse, BinSetResponse},
    engine::ActiveSet,
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub struct BinQueryService {
    active: Arc<ActiveSet>,
}

impl BinQueryService {
    pub fn new(active: Arc<ActiveSet>) -> Self {
        Self { active }
    }
}

#[async_trait]
impl BinQueryServiceTrait for BinQueryService {
    async fn find_all(&self) -> Result<ApiResponse<BinSetResponse>, ServiceError> {
        let bins = self.active.snapshot();
        info!("📋 Listing {} active BINs", bins.len());

        Ok(ApiResponse::success(
            "✅ Active BINs retrieved",
            BinSetResponse::from(&bins[..]),
        ))
    }

    async fn count(&self) -> usize {
        self.active.len()
    }
}
