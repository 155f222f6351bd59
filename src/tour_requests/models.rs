//! Database models for tour requests.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::estimator::{CostBreakdownEntry, EstimationResult, SelectedLocation, TourTypeProfile};

/// Review state of a tour request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TourRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl TourRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TourRequestStatus::Pending => "Pending",
            TourRequestStatus::Approved => "Approved",
            TourRequestStatus::Rejected => "Rejected",
        }
    }

    /// Only pending requests can be decided, and only into a final state
    pub fn can_transition_to(&self, next: TourRequestStatus) -> bool {
        matches!(
            (self, next),
            (TourRequestStatus::Pending, TourRequestStatus::Approved)
                | (TourRequestStatus::Pending, TourRequestStatus::Rejected)
        )
    }
}

impl fmt::Display for TourRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TourRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(TourRequestStatus::Pending),
            "Approved" => Ok(TourRequestStatus::Approved),
            "Rejected" => Ok(TourRequestStatus::Rejected),
            other => Err(format!("unknown tour request status '{}'", other)),
        }
    }
}

/// Tour type row from tour_types
#[derive(Debug, Clone, FromRow)]
pub struct TourTypeRow {
    pub label: String,
    pub base_price_per_person: Decimal,
}

impl From<TourTypeRow> for TourTypeProfile {
    fn from(row: TourTypeRow) -> Self {
        TourTypeProfile {
            label: row.label,
            base_price_per_person: row.base_price_per_person,
        }
    }
}

/// Persisted tour request from tour_requests
#[derive(Debug, Clone, FromRow)]
pub struct TourRequest {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub tour_start_location: String,
    pub tour_start_date: NaiveDate,
    pub number_of_people: i32,
    pub tour_duration: i32,
    pub tour_type: String,
    pub selected_locations: Json<Vec<SelectedLocation>>,
    pub special_requests: Option<String>,
    pub total_distance: Decimal,
    pub total_travel_cost: Decimal,
    pub accommodation_cost: Decimal,
    pub estimated_budget: Decimal,
    pub estimated_time_hours: Decimal,
    pub estimated_end_date: NaiveDate,
    pub cost_breakdown: Json<Vec<CostBreakdownEntry>>,
    pub summary: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer details attached to a submission
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub special_requests: Option<String>,
}

/// A validated, estimated request ready to insert
#[derive(Debug, Clone)]
pub struct NewTourRequest {
    pub id: Uuid,
    pub customer: Customer,
    pub tour_start_location: String,
    pub tour_start_date: NaiveDate,
    pub number_of_people: i32,
    pub tour_duration: i32,
    pub tour_type: String,
    pub selected_locations: Vec<SelectedLocation>,
    pub estimation: EstimationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            TourRequestStatus::Pending,
            TourRequestStatus::Approved,
            TourRequestStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<TourRequestStatus>(), Ok(status));
        }
        assert!("pending".parse::<TourRequestStatus>().is_err());
    }

    #[test]
    fn test_only_pending_requests_transition() {
        use TourRequestStatus::*;

        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
    }
}
