use crate::{
    abstract_trait::bin::BinCommandServiceTrait,
    domain::{
        requests::{UploadBinsRequest, UploadMode},
        responses::{ApiResponse, BinSetResponse},
    },
    engine::ActiveSet,
    errors::{ServiceError, validation_messages},
    model::bin::{InvalidBinPolicy, clean_bins},
    utils::Metrics,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};
use validator::Validate;

pub struct BinCommandService {
    active: Arc<ActiveSet>,
    metrics: Arc<Metrics>,
    policy: InvalidBinPolicy,
}

impl BinCommandService {
    pub fn new(active: Arc<ActiveSet>, metrics: Arc<Metrics>, policy: InvalidBinPolicy) -> Self {
        Self {
            active,
            metrics,
            policy,
        }
    }
}

#[async_trait]
impl BinCommandServiceTrait for BinCommandService {
    #[instrument(skip_all, fields(mode = ?req.mode, entries = req.bins.len()))]
    async fn upload(
        &self,
        req: &UploadBinsRequest,
    ) -> Result<ApiResponse<BinSetResponse>, ServiceError> {
        if let Err(validation_errors) = req.validate() {
            let messages = validation_messages(&validation_errors);
            error!("Validation failed: {messages:?}");
            return Err(ServiceError::Validation(messages));
        }

        info!("📥 Uploading {} raw BIN entries", req.bins.len());

        let cleaned = clean_bins(&req.bins, self.policy).map_err(|e| {
            error!("🧹 BIN cleaning rejected the upload: {e}");
            ServiceError::from(e)
        })?;

        let (bins, message) = match req.mode {
            UploadMode::Replace => (self.active.replace(cleaned), "✅ BIN set replaced"),
            UploadMode::Append => (self.active.append(cleaned), "✅ BINs appended"),
        };
        self.metrics.set_active_bins(bins.len());

        info!("✅ Active BIN set now holds {} BINs", bins.len());

        Ok(ApiResponse::success(
            message,
            BinSetResponse::from(&bins[..]),
        ))
    }
}
