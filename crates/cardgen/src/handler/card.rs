use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Json,
    extract::{Extension, Path},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use shared::{
    abstract_trait::card::DynCardGenerateService,
    domain::{
        requests::{BulkGenerateRequest, GenerateCardRequest, OutputFormat},
        responses::{ApiResponse, CardResponse},
    },
    errors::AppErrorHttp,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/cards/generate",
    tag = "Card",
    request_body = GenerateCardRequest,
    responses(
        (status = 200, description = "Generated test cards", body = ApiResponse<Vec<CardResponse>>),
        (status = 400, description = "Invalid request, no active BINs, or not enough BINs"),
        (status = 422, description = "A BIN is too long for its card length")
    )
)]
pub async fn generate_cards(
    Extension(service): Extension<DynCardGenerateService>,
    SimpleValidatedJson(body): SimpleValidatedJson<GenerateCardRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.generate(&body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/cards/generate/{bin}",
    tag = "Card",
    params(("bin" = String, Path, description = "BIN of 5 to 12 digits")),
    responses(
        (status = 200, description = "One generated test card", body = ApiResponse<CardResponse>),
        (status = 400, description = "Invalid BIN"),
        (status = 422, description = "BIN is too long for its card length")
    )
)]
pub async fn generate_card_for_bin(
    Extension(service): Extension<DynCardGenerateService>,
    Path(bin): Path<String>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.generate_for_bin(&bin).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/cards/bulk",
    tag = "Card",
    request_body = BulkGenerateRequest,
    responses(
        (status = 200, description = "Generated cards as JSON, or `IDENTIFIER|MM|YY|CODE` lines when format is pipe", body = ApiResponse<Vec<CardResponse>>),
        (status = 400, description = "Invalid request or no BINs"),
        (status = 422, description = "No BIN produced a card")
    )
)]
pub async fn bulk_generate(
    Extension(service): Extension<DynCardGenerateService>,
    SimpleValidatedJson(body): SimpleValidatedJson<BulkGenerateRequest>,
) -> Result<Response, AppErrorHttp> {
    let cards = service.bulk(&body).await?;

    let response = match body.format {
        OutputFormat::Pipe => {
            let mut lines: String = cards
                .iter()
                .map(|card| card.to_pipe_line())
                .collect::<Vec<_>>()
                .join("\n");
            lines.push('\n');
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], lines).into_response()
        }
        OutputFormat::Json => {
            let count = cards.len();
            Json(ApiResponse::success(
                format!("✅ {count} cards generated"),
                cards.into_iter().map(CardResponse::from).collect::<Vec<_>>(),
            ))
            .into_response()
        }
    };

    Ok(response)
}

pub fn card_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cards/generate", post(generate_cards))
        .route("/api/cards/generate/{bin}", get(generate_card_for_bin))
        .route("/api/cards/bulk", post(bulk_generate))
        .layer(Extension(app_state.di_container.card_generate.clone()))
}
