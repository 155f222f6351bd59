//! Input and output types for the estimator.
//!
//! Field names follow the camelCase wire format shared by the JSON API and
//! the JSONB columns of `tour_requests`. Decimals stored in those columns
//! are written as exact strings so they read back unchanged.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculators::serialize_money;

/// One destination chosen by the customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedLocation {
    pub location_name: String,
    /// Kilometres from the tour start point
    #[serde(serialize_with = "rust_decimal::serde::str::serialize")]
    pub distance: Decimal,
    /// Cost per kilometre
    #[serde(serialize_with = "rust_decimal::serde::str::serialize")]
    pub price_per_unit: Decimal,
}

/// Pricing profile of a tour type (Standard, Luxury, Custom...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourTypeProfile {
    pub label: String,
    /// Accommodation and food, per person per day
    #[serde(serialize_with = "serialize_money")]
    pub base_price_per_person: Decimal,
}

/// Everything the estimator needs for one tour request.
///
/// The tour type is already resolved to its profile; catalog lookup is the
/// caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct TourRequestInput {
    pub tour_start_date: NaiveDate,
    pub number_of_people: i32,
    pub tour_duration: i32,
    pub selected_locations: Vec<SelectedLocation>,
    pub tour_type: TourTypeProfile,
    pub tour_start_location: String,
}

/// Travel cost of a single location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdownEntry {
    pub location_name: String,
    #[serde(serialize_with = "rust_decimal::serde::str::serialize")]
    pub distance: Decimal,
    /// Serialized as a fixed two-decimal string
    #[serde(serialize_with = "serialize_money")]
    pub cost: Decimal,
}

/// Output of [`estimate`](super::estimate).
///
/// Amounts are kept at full precision; rounding to cents happens only when
/// the result is serialized or rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
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
}
