use crate::state::AppState;
use axum::{
    Json,
    extract::Extension,
    http::header,
    response::IntoResponse,
    routing::get,
};
use shared::{
    abstract_trait::bin::DynBinQueryService,
    domain::responses::HealthResponse,
    errors::{AppErrorHttp, ServiceError},
    utils::Metrics,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(Extension(service): Extension<DynBinQueryService>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        bins_count: service.count().await,
    })
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "OpenMetrics text exposition", body = String, content_type = "application/openmetrics-text")
    )
)]
pub async fn metrics(
    Extension(metrics): Extension<Arc<Metrics>>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let body = metrics
        .render()
        .map_err(|e| ServiceError::Internal(format!("Failed to encode metrics: {e}")))?;

    Ok((
        [(
            header::CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        body,
    ))
}

pub fn health_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(Extension(app_state.di_container.bin_query.clone()))
        .layer(Extension(app_state.metrics.clone()))
}
