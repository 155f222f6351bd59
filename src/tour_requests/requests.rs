//! Request DTOs for tour request endpoints.
//!
//! Required fields are optional here so that missing values are reported as
//! field errors by the validator instead of a bare deserialization failure.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::estimator::SelectedLocation;

use super::models::TourRequestStatus;

/// Tour request form payload, shared by the preview and submission endpoints.
/// Customer fields are ignored by the preview.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourRequestPayload {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub tour_start_location: Option<String>,
    #[serde(default)]
    pub tour_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub number_of_people: Option<i32>,
    #[serde(default)]
    pub tour_duration: Option<i32>,
    #[serde(default)]
    pub tour_type: Option<String>,
    #[serde(default)]
    pub selected_locations: Vec<SelectedLocation>,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Admin decision on a pending request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: TourRequestStatus,
}
