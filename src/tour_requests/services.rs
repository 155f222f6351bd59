//! Tour request service functions.
//!
//! These functions combine catalog lookup, validation, the estimator and the
//! database. Handlers stay thin and pass `today` in so date checks are
//! testable.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::{AppError, FieldError, Result};
use crate::estimator::{estimate, EstimationResult, TourCatalog, TourTypeProfile};

use super::models::{NewTourRequest, TourRequest, TourRequestStatus};
use super::queries;
use super::requests::TourRequestPayload;
use super::validation;

/// Load active tour types, falling back to the built-in catalog when none
/// are configured.
pub async fn load_catalog(pool: &PgPool) -> Result<TourCatalog> {
    let rows = queries::list_tour_types(pool).await?;

    if rows.is_empty() {
        warn!("No active tour types configured, using built-in catalog");
        return Ok(TourCatalog::builtin());
    }

    Ok(TourCatalog::new(rows.into_iter().map(TourTypeProfile::from)))
}

/// Catalog from cache, loading it on a miss.
///
/// A database failure yields the built-in catalog without caching it, so the
/// next request retries the database.
pub async fn current_catalog(pool: &PgPool, cache: &AppCache) -> Arc<TourCatalog> {
    if let Some(catalog) = cache.catalog().await {
        debug!("Cache HIT for tour catalog");
        return catalog;
    }

    debug!("Cache MISS for tour catalog");
    match load_catalog(pool).await {
        Ok(catalog) => {
            let catalog = Arc::new(catalog);
            cache.store_catalog(catalog.clone()).await;
            catalog
        }
        Err(e) => {
            warn!("Failed to load tour catalog, using built-in catalog: {}", e);
            Arc::new(TourCatalog::builtin())
        }
    }
}

/// Advisory estimate for the live preview. Nothing is persisted.
pub async fn preview(
    pool: &PgPool,
    cache: &AppCache,
    payload: &TourRequestPayload,
) -> Result<(TourTypeProfile, EstimationResult)> {
    let catalog = current_catalog(pool, cache).await;
    let input = validation::validate_tour(payload, &catalog).map_err(AppError::Validation)?;

    let estimation = estimate(&input)?;
    Ok((input.tour_type, estimation))
}

/// Authoritative creation: validate, estimate, persist with status Pending.
pub async fn create_tour_request(
    pool: &PgPool,
    cache: &AppCache,
    payload: &TourRequestPayload,
    today: NaiveDate,
) -> Result<TourRequest> {
    let catalog = current_catalog(pool, cache).await;
    let (customer, input) = validation::validate_submission(payload, &catalog, today)
        .map_err(AppError::Validation)?;

    let estimation = estimate(&input)?;

    let new = NewTourRequest {
        id: Uuid::new_v4(),
        customer,
        tour_start_location: input.tour_start_location,
        tour_start_date: input.tour_start_date,
        number_of_people: input.number_of_people,
        tour_duration: input.tour_duration,
        tour_type: input.tour_type.label,
        selected_locations: input.selected_locations,
        estimation,
    };

    let request = queries::insert_tour_request(pool, &new).await?;

    info!(
        "Created tour request {} ({} locations, budget {})",
        request.id,
        request.selected_locations.0.len(),
        request.estimated_budget
    );

    Ok(request)
}

/// Fetch a tour request or fail with NotFound
pub async fn get_tour_request(pool: &PgPool, id: Uuid) -> Result<TourRequest> {
    queries::find_tour_request(pool, id)
        .await?
        .ok_or(AppError::NotFound)
}

/// Approve or reject a pending request.
pub async fn decide_tour_request(
    pool: &PgPool,
    id: Uuid,
    status: TourRequestStatus,
) -> Result<TourRequest> {
    if !TourRequestStatus::Pending.can_transition_to(status) {
        return Err(AppError::Validation(vec![FieldError::new(
            "status",
            "must be Approved or Rejected",
        )]));
    }

    if let Some(request) = queries::decide_pending_request(pool, id, status).await? {
        info!("Tour request {} marked {}", id, status);
        return Ok(request);
    }

    // Either missing or already decided
    let existing = get_tour_request(pool, id).await?;
    Err(already_decided(id, &existing.status))
}

/// Conflict for a request that left Pending; a status outside the known
/// lifecycle means the row is corrupt.
fn already_decided(id: Uuid, stored_status: &str) -> AppError {
    match stored_status.parse::<TourRequestStatus>() {
        Ok(status) => AppError::Conflict(format!("Tour request {} is already {}", id, status)),
        Err(e) => AppError::Internal(format!("tour request {}: {}", id, e)),
    }
}
