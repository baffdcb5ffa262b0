use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Json,
    extract::{Extension, Multipart},
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::bin::{DynBinCommandService, DynBinQueryService},
    domain::{
        requests::{UploadBinsRequest, UploadMode},
        responses::{ApiResponse, BinSetResponse},
    },
    errors::{AppErrorHttp, ServiceError},
    utils::parse_upload,
};
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

/// Multipart form accepted by `/api/bins/upload`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadBinsForm {
    /// `.json` array of strings, or plain text with one BIN per line.
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    mode: Option<UploadMode>,
}

#[utoipa::path(
    get,
    path = "/api/bins",
    tag = "Bin",
    responses(
        (status = 200, description = "Active BIN set", body = ApiResponse<BinSetResponse>)
    )
)]
pub async fn get_bins(
    Extension(service): Extension<DynBinQueryService>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_all().await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/bins",
    tag = "Bin",
    request_body = UploadBinsRequest,
    responses(
        (status = 200, description = "Active BIN set after the upload", body = ApiResponse<BinSetResponse>),
        (status = 400, description = "No usable BINs or validation error")
    )
)]
pub async fn upload_bins(
    Extension(service): Extension<DynBinCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<UploadBinsRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.upload(&body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/bins/upload",
    tag = "Bin",
    request_body(content = UploadBinsForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Active BIN set after the upload", body = ApiResponse<BinSetResponse>),
        (status = 400, description = "Unreadable file or no usable BINs")
    )
)]
pub async fn upload_bins_file(
    Extension(service): Extension<DynBinCommandService>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let mut entries = None;
    let mut mode = UploadMode::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::Upload(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| ServiceError::Upload(e.body_text()))?;
                entries = Some(parse_upload(file_name.as_deref(), &content)?);
            }
            Some("mode") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ServiceError::Upload(e.body_text()))?;
                mode = raw.parse().map_err(ServiceError::Upload)?;
            }
            _ => {}
        }
    }

    let bins = entries.ok_or_else(|| ServiceError::Upload("missing 'file' field".into()))?;
    let response = service.upload(&UploadBinsRequest { bins, mode }).await?;
    Ok(Json(response))
}

pub fn bin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/bins", get(get_bins).post(upload_bins))
        .route("/api/bins/upload", post(upload_bins_file))
        .layer(Extension(app_state.di_container.bin_command.clone()))
        .layer(Extension(app_state.di_container.bin_query.clone()))
}
