//! Database queries for tour requests and the tour type catalog.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::estimator::round_money;

use super::models::{NewTourRequest, TourRequest, TourRequestStatus, TourTypeRow};

const TOUR_REQUEST_COLUMNS: &str = r#"
    id, customer_name, customer_email, tour_start_location, tour_start_date,
    number_of_people, tour_duration, tour_type, selected_locations, special_requests,
    total_distance, total_travel_cost, accommodation_cost, estimated_budget,
    estimated_time_hours, estimated_end_date, cost_breakdown, summary, status,
    created_at, updated_at
"#;

/// Active tour types, ordered by label
pub async fn list_tour_types(pool: &PgPool) -> Result<Vec<TourTypeRow>, AppError> {
    let rows = sqlx::query_as::<_, TourTypeRow>(
        r#"
        SELECT label, base_price_per_person
        FROM tour_types
        WHERE active = TRUE
        ORDER BY label
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert an estimated tour request with status Pending.
///
/// Money columns are stored rounded to cents; distance and hours keep
/// their full precision.
pub async fn insert_tour_request(
    pool: &PgPool,
    new: &NewTourRequest,
) -> Result<TourRequest, AppError> {
    let estimation = &new.estimation;

    let sql = format!(
        r#"
        INSERT INTO tour_requests (
            id, customer_name, customer_email, tour_start_location, tour_start_date,
            number_of_people, tour_duration, tour_type, selected_locations, special_requests,
            total_distance, total_travel_cost, accommodation_cost, estimated_budget,
            estimated_time_hours, estimated_end_date, cost_breakdown, summary, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19)
        RETURNING {}
        "#,
        TOUR_REQUEST_COLUMNS
    );

    let request = sqlx::query_as::<_, TourRequest>(&sql)
        .bind(new.id)
        .bind(&new.customer.name)
        .bind(&new.customer.email)
        .bind(&new.tour_start_location)
        .bind(new.tour_start_date)
        .bind(new.number_of_people)
        .bind(new.tour_duration)
        .bind(&new.tour_type)
        .bind(Json(&new.selected_locations))
        .bind(&new.customer.special_requests)
        .bind(estimation.total_distance)
        .bind(round_money(estimation.total_travel_cost, 2))
        .bind(round_money(estimation.accommodation_cost, 2))
        .bind(round_money(estimation.estimated_budget, 2))
        .bind(estimation.estimated_time_hours)
        .bind(estimation.estimated_end_date)
        .bind(Json(&estimation.cost_breakdown))
        .bind(&estimation.summary)
        .bind(TourRequestStatus::Pending.as_str())
        .fetch_one(pool)
        .await?;

    Ok(request)
}

/// Find a tour request by id
pub async fn find_tour_request(pool: &PgPool, id: Uuid) -> Result<Option<TourRequest>, AppError> {
    let sql = format!(
        "SELECT {} FROM tour_requests WHERE id = $1",
        TOUR_REQUEST_COLUMNS
    );

    let request = sqlx::query_as::<_, TourRequest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(request)
}

/// Move a pending request to `status`.
///
/// Returns `None` when the request does not exist or is no longer pending.
/// The pending check is part of the UPDATE itself.
pub async fn decide_pending_request(
    pool: &PgPool,
    id: Uuid,
    status: TourRequestStatus,
) -> Result<Option<TourRequest>, AppError> {
    let sql = format!(
        r#"
        UPDATE tour_requests
        SET status = $2, updated_at = NOW()
        WHERE id = $1
          AND status = $3
        RETURNING {}
        "#,
        TOUR_REQUEST_COLUMNS
    );

    let request = sqlx::query_as::<_, TourRequest>(&sql)
        .bind(id)
        .bind(status.as_str())
        .bind(TourRequestStatus::Pending.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(request)
}
