mod bin;
mod card;
mod health;

use crate::state::AppState;
use anyhow::Result;
use axum::{Router, extract::DefaultBodyLimit};
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::bin::bin_routes;
pub use self::card::card_routes;
pub use self::health::health_routes;

pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        bin::get_bins,
        bin::upload_bins,
        bin::upload_bins_file,

        card::generate_cards,
        card::generate_card_for_bin,
        card::bulk_generate,

        health::health,
        health::metrics,
    ),
    tags(
        (name = "Bin", description = "Active BIN set management"),
        (name = "Card", description = "Test card generation (TEST USE ONLY)"),
        (name = "Health", description = "Liveness and metrics"),
    )
)]
struct ApiDoc;

pub struct AppRouter;

impl AppRouter {
    /// Full application router, Swagger UI included.
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .merge(bin_routes(shared_state.clone()))
            .merge(card_routes(shared_state.clone()))
            .merge(health_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
