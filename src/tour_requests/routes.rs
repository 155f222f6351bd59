//! Tour request route handlers

use askama::Template;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, FieldError, Result};
use crate::estimator::{format_money, CostBreakdownEntry, EstimationResult, TourTypeProfile};
use crate::AppState;

use super::requests::{TourRequestPayload, UpdateStatusRequest};
use super::responses::{EstimateResponse, TourRequestResponse};
use super::services;

/// Tour request routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tour-types", get(list_tour_types))
        .route("/api/tour-requests", post(create))
        .route("/api/tour-requests/estimate", post(estimate))
        .route("/api/tour-requests/:id", get(detail))
        .route("/api/tour-requests/:id/status", patch(update_status))
        .route("/tour-requests/preview", post(preview_page))
}

/// Preview fragment template
#[derive(Template)]
#[template(path = "tour_requests/preview.html")]
struct PreviewTemplate {
    summary: String,
    tour_type: String,
    base_price_per_person: String,
    rows: Vec<PreviewRow>,
    total_distance: String,
    total_travel_cost: String,
    accommodation_cost: String,
    estimated_budget: String,
    estimated_time_hours: String,
    estimated_end_date: String,
}

struct PreviewRow {
    location_name: String,
    distance: String,
    cost: String,
}

impl From<&CostBreakdownEntry> for PreviewRow {
    fn from(entry: &CostBreakdownEntry) -> Self {
        Self {
            location_name: entry.location_name.clone(),
            distance: entry.distance.normalize().to_string(),
            cost: format_money(entry.cost),
        }
    }
}

impl PreviewTemplate {
    fn new(
        tour_type: String,
        base_price_per_person: String,
        estimation: &EstimationResult,
    ) -> Self {
        Self {
            summary: estimation.summary.clone(),
            tour_type,
            base_price_per_person,
            rows: estimation.cost_breakdown.iter().map(PreviewRow::from).collect(),
            total_distance: estimation.total_distance.normalize().to_string(),
            total_travel_cost: format_money(estimation.total_travel_cost),
            accommodation_cost: format_money(estimation.accommodation_cost),
            estimated_budget: format_money(estimation.estimated_budget),
            estimated_time_hours: format_money(estimation.estimated_time_hours),
            estimated_end_date: estimation.estimated_end_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Map body rejections (bad JSON, wrong types) into the validation envelope
fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        AppError::Validation(vec![FieldError::new("body", rejection.body_text())])
    })
}

/// List the tour types customers can choose from
pub async fn list_tour_types(State(state): State<AppState>) -> Json<Vec<TourTypeProfile>> {
    let catalog = services::current_catalog(&state.db, &state.cache).await;
    Json(catalog.profiles().cloned().collect())
}

/// Live JSON preview
pub async fn estimate(
    State(state): State<AppState>,
    body: std::result::Result<Json<TourRequestPayload>, JsonRejection>,
) -> Result<Json<EstimateResponse>> {
    let payload = json_body(body)?;
    let (tour_type, estimation) = services::preview(&state.db, &state.cache, &payload).await?;

    Ok(Json(EstimateResponse {
        tour_type,
        estimation,
    }))
}

/// Live HTML preview fragment
pub async fn preview_page(
    State(state): State<AppState>,
    body: std::result::Result<Json<TourRequestPayload>, JsonRejection>,
) -> Result<Html<String>> {
    let payload = json_body(body)?;
    let (tour_type, estimation) = services::preview(&state.db, &state.cache, &payload).await?;

    let template = PreviewTemplate::new(
        tour_type.label,
        format_money(tour_type.base_price_per_person),
        &estimation,
    );

    Ok(Html(template.render()?))
}

/// Submit a tour request
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<TourRequestPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<TourRequestResponse>)> {
    let payload = json_body(body)?;
    let today = Utc::now().date_naive();

    let request =
        services::create_tour_request(&state.db, &state.cache, &payload, today).await?;

    Ok((StatusCode::CREATED, Json(request.into())))
}

/// Tour request detail
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TourRequestResponse>> {
    let request = services::get_tour_request(&state.db, id).await?;
    Ok(Json(request.into()))
}

/// Approve or reject a pending tour request
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: std::result::Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<TourRequestResponse>> {
    let update = json_body(body)?;
    let request = services::decide_tour_request(&state.db, id, update.status).await?;
    Ok(Json(request.into()))
}
