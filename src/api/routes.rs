use axum::{
    routing::get,
    Router,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use std::time::Instant;
use tracing::{info, instrument};

use crate::error::{AppError, Result};
use crate::api::models::{ApiInfo, OutlineQuery, OutlineResponse, Status};
use crate::api::response;
use crate::headings::extract_headings;
use crate::outline::render_outline;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/outline", get(outline_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(app_state)
}

/// Any origin, method and header, with credentials. Mirroring the request
/// is required because credentials cannot be combined with `*`.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn root_handler() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Country Information API for GlobalEdu",
        usage: "GET /api/outline?country=<country_name>",
        example: "/api/outline?country=Vanuatu",
    })
}

async fn outline_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<OutlineQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<OutlineResponse>)> {
    let Query(query) = query.map_err(|rejection| {
        info!(error = %rejection.body_text(), "rejected outline query");
        AppError::InvalidQuery(rejection.body_text())
    })?;
    let start_time = Instant::now();
    let result = get_outline(&state, &query.country).await;

    match &result {
        Ok(outline) => info!(
            country = %query.country,
            heading_count = outline.heading_count,
            elapsed = ?start_time.elapsed(),
            "outline built"
        ),
        Err(err) => info!(
            country = %query.country,
            error = %err,
            elapsed = ?start_time.elapsed(),
            "outline request failed"
        ),
    }

    result.map(response::success)
}

/// Fetch, extract and render the outline for one entity.
#[instrument(skip(state))]
pub async fn get_outline(state: &AppState, entity: &str) -> Result<OutlineResponse> {
    let html = state.fetcher.fetch(entity).await?;

    let headings = extract_headings(&html, state.config.heading_order);
    if headings.is_empty() {
        return Err(AppError::NoHeadings(entity.to_string()));
    }

    let outline = render_outline(&headings);

    Ok(OutlineResponse {
        country: entity.to_string(),
        outline,
        heading_count: headings.len(),
        status: Status::Success,
    })
}
