//! Response DTOs for tour request endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::estimator::calculators::serialize_money;
use crate::estimator::{CostBreakdownEntry, EstimationResult, SelectedLocation, TourTypeProfile};

use super::models::TourRequest;

/// Preview response: the resolved tour type plus the estimation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub tour_type: TourTypeProfile,
    #[serde(flatten)]
    pub estimation: EstimationResult,
}

/// Persisted tour request as returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourRequestResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub tour_start_location: String,
    pub tour_start_date: NaiveDate,
    pub number_of_people: i32,
    pub tour_duration: i32,
    pub tour_type: String,
    pub selected_locations: Vec<SelectedLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_distance: Decimal,
    #[serde(serialize_with = "serialize_money")]
    pub total_travel_cost: Decimal,
    #[serde(serialize_with = "serialize_money")]
    pub accommodation_cost: Decimal,
    #[serde(serialize_with = "serialize_money")]
    pub estimated_budget: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub estimated_time_hours: Decimal,
    pub estimated_end_date: NaiveDate,
    pub cost_breakdown: Vec<CostBreakdownEntry>,
    pub summary: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TourRequest> for TourRequestResponse {
    fn from(r: TourRequest) -> Self {
        Self {
            id: r.id,
            customer_name: r.customer_name,
            customer_email: r.customer_email,
            tour_start_location: r.tour_start_location,
            tour_start_date: r.tour_start_date,
            number_of_people: r.number_of_people,
            tour_duration: r.tour_duration,
            tour_type: r.tour_type,
            selected_locations: r.selected_locations.0,
            special_requests: r.special_requests,
            total_distance: r.total_distance,
            total_travel_cost: r.total_travel_cost,
            accommodation_cost: r.accommodation_cost,
            estimated_budget: r.estimated_budget,
            estimated_time_hours: r.estimated_time_hours,
            estimated_end_date: r.estimated_end_date,
            cost_breakdown: r.cost_breakdown.0,
            summary: r.summary,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
