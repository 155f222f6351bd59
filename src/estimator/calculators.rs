//! Core estimation functions.
//!
//! Pure functions for tour request math - no database access, no clock.
//! Both the preview endpoints and the authoritative creation handler call
//! [`estimate`], so the two can never disagree.

use chrono::Days;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serializer;

use super::models::{CostBreakdownEntry, EstimationResult, TourRequestInput};
use super::summary;

/// Assumed average travel speed in km/h used to turn distance into hours.
///
/// Tunable: changing it shifts `estimated_time_hours` for every request.
pub const AVERAGE_SPEED_KMH: Decimal = dec!(60);

/// Decimal places used when presenting money.
pub const MONEY_PLACES: u32 = 2;

/// Estimator failure. Nothing is partially computed when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    #[error("invalid {field}: {message}")]
    InvalidInput { field: String, message: String },
}

impl EstimateError {
    fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Round money to `places` decimals, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tourbook::estimator::round_money;
///
/// assert_eq!(round_money(dec!(2.345), 2), dec!(2.35));
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount with exactly two decimals, e.g. `1370` -> `"1370.00"`.
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = round_money(amount, MONEY_PLACES);
    rounded.rescale(MONEY_PLACES);
    rounded.to_string()
}

/// serde helper: serialize a money amount as a two-decimal string
pub fn serialize_money<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_money(*amount))
}

/// Estimate budget, travel time and end date for a tour request.
///
/// The start date is not compared against today: rejecting past dates is
/// the creation handler's job, and previews of past dates are allowed.
pub fn estimate(input: &TourRequestInput) -> Result<EstimationResult, EstimateError> {
    validate(input)?;

    let mut total_distance = Decimal::ZERO;
    let mut total_travel_cost = Decimal::ZERO;
    let mut cost_breakdown = Vec::with_capacity(input.selected_locations.len());

    for location in &input.selected_locations {
        let cost = location
            .distance
            .checked_mul(location.price_per_unit)
            .ok_or_else(|| out_of_range("selectedLocations"))?;

        total_travel_cost = total_travel_cost
            .checked_add(cost)
            .ok_or_else(|| out_of_range("selectedLocations"))?;
        total_distance = total_distance
            .checked_add(location.distance)
            .ok_or_else(|| out_of_range("selectedLocations"))?;

        cost_breakdown.push(CostBreakdownEntry {
            location_name: location.location_name.clone(),
            distance: location.distance,
            cost,
        });
    }

    let accommodation_cost = input
        .tour_type
        .base_price_per_person
        .checked_mul(Decimal::from(input.number_of_people))
        .and_then(|c| c.checked_mul(Decimal::from(input.tour_duration)))
        .ok_or_else(|| out_of_range("tourType"))?;

    let estimated_budget = total_travel_cost
        .checked_add(accommodation_cost)
        .ok_or_else(|| out_of_range("estimatedBudget"))?;

    let estimated_time_hours = total_distance / AVERAGE_SPEED_KMH;

    // Calendar arithmetic on dates, never instants
    let estimated_end_date = input
        .tour_start_date
        .checked_add_days(Days::new(input.tour_duration as u64))
        .ok_or_else(|| EstimateError::invalid("tourDuration", "end date is out of range"))?;

    let summary = summary::describe(input, estimated_budget, accommodation_cost);

    Ok(EstimationResult {
        total_distance,
        total_travel_cost,
        accommodation_cost,
        estimated_budget,
        estimated_time_hours,
        estimated_end_date,
        cost_breakdown,
        summary,
    })
}

fn validate(input: &TourRequestInput) -> Result<(), EstimateError> {
    if input.selected_locations.is_empty() {
        return Err(EstimateError::invalid(
            "selectedLocations",
            "at least one location is required",
        ));
    }
    if input.number_of_people < 1 {
        return Err(EstimateError::invalid("numberOfPeople", "must be at least 1"));
    }
    if input.tour_duration < 1 {
        return Err(EstimateError::invalid("tourDuration", "must be at least 1 day"));
    }
    if is_negative(input.tour_type.base_price_per_person) {
        return Err(EstimateError::invalid("tourType", "base price must not be negative"));
    }

    for (i, location) in input.selected_locations.iter().enumerate() {
        if is_negative(location.distance) {
            return Err(EstimateError::invalid(
                format!("selectedLocations[{}].distance", i),
                "must not be negative",
            ));
        }
        if is_negative(location.price_per_unit) {
            return Err(EstimateError::invalid(
                format!("selectedLocations[{}].pricePerUnit", i),
                "must not be negative",
            ));
        }
    }

    Ok(())
}

// Decimal keeps a sign bit on zero, so -0 must not count as negative
fn is_negative(value: Decimal) -> bool {
    value < Decimal::ZERO
}

fn out_of_range(field: &str) -> EstimateError {
    EstimateError::invalid(field, "amount is out of range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::models::{SelectedLocation, TourTypeProfile};
    use chrono::NaiveDate;

    fn location(name: &str, distance: Decimal, price_per_unit: Decimal) -> SelectedLocation {
        SelectedLocation {
            location_name: name.to_string(),
            distance,
            price_per_unit,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario_one() -> TourRequestInput {
        TourRequestInput {
            tour_start_date: date(2025, 6, 1),
            number_of_people: 2,
            tour_duration: 3,
            selected_locations: vec![
                location("A", dec!(100), dec!(10)),
                location("B", dec!(50), dec!(5)),
            ],
            tour_type: TourTypeProfile {
                label: "Standard".to_string(),
                base_price_per_person: dec!(20),
            },
            tour_start_location: "Colombo".to_string(),
        }
    }

    // ==================== round_money / format_money tests ====================

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(3));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_money(dec!(-2.5), 0), dec!(-3));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(123456.789), 2), dec!(123456.79));
        assert_eq!(round_money(dec!(999999.995), 2), dec!(1000000.00));
    }

    #[test]
    fn test_format_money_pads_to_two_places() {
        assert_eq!(format_money(dec!(1370)), "1370.00");
        assert_eq!(format_money(dec!(0)), "0.00");
        assert_eq!(format_money(dec!(12.5)), "12.50");
        assert_eq!(format_money(dec!(0.005)), "0.01");
        assert_eq!(format_money(dec!(1.6666666)), "1.67");
    }

    // ==================== estimate tests ====================

    #[test]
    fn test_estimate_scenario_one() {
        let result = estimate(&scenario_one()).unwrap();

        assert_eq!(result.total_distance, dec!(150));
        assert_eq!(result.total_travel_cost, dec!(1250));
        assert_eq!(result.accommodation_cost, dec!(120));
        assert_eq!(format_money(result.estimated_budget), "1370.00");
        assert_eq!(result.estimated_time_hours, dec!(2.5));
        assert_eq!(result.estimated_end_date, date(2025, 6, 4));

        assert_eq!(result.cost_breakdown.len(), 2);
        assert_eq!(result.cost_breakdown[0].location_name, "A");
        assert_eq!(result.cost_breakdown[0].distance, dec!(100));
        assert_eq!(format_money(result.cost_breakdown[0].cost), "1000.00");
        assert_eq!(result.cost_breakdown[1].location_name, "B");
        assert_eq!(result.cost_breakdown[1].distance, dec!(50));
        assert_eq!(format_money(result.cost_breakdown[1].cost), "250.00");
    }

    #[test]
    fn test_estimate_summary_mentions_every_data_point() {
        let result = estimate(&scenario_one()).unwrap();

        assert!(result.summary.contains("3-day Standard tour"));
        assert!(result.summary.contains("Colombo"));
        assert!(result.summary.contains("2 locations"));
        assert!(result.summary.contains("$1370.00"));
        assert!(result.summary.contains("$120.00"));
        assert!(result.summary.contains("June 1, 2025"));
    }

    #[test]
    fn test_estimate_zero_distance_location() {
        let mut input = scenario_one();
        input.selected_locations = vec![
            location("Harbour", dec!(0), dec!(50)),
            location("Fort", dec!(20), dec!(3)),
        ];

        let result = estimate(&input).unwrap();

        assert_eq!(format_money(result.cost_breakdown[0].cost), "0.00");
        assert_eq!(result.total_travel_cost, dec!(60));
        assert_eq!(result.total_distance, dec!(20));
    }

    #[test]
    fn test_estimate_zero_rate_is_not_an_error() {
        let mut input = scenario_one();
        input.selected_locations = vec![location("Free shuttle", dec!(35), dec!(0))];

        let result = estimate(&input).unwrap();

        assert_eq!(result.total_travel_cost, dec!(0));
        assert_eq!(format_money(result.cost_breakdown[0].cost), "0.00");
    }

    #[test]
    fn test_estimate_zero_distance_gives_zero_hours() {
        let mut input = scenario_one();
        input.selected_locations = vec![location("Hotel", dec!(0), dec!(0))];

        let result = estimate(&input).unwrap();

        assert_eq!(result.estimated_time_hours, dec!(0));
    }

    #[test]
    fn test_estimate_rejects_zero_people() {
        let mut input = scenario_one();
        input.number_of_people = 0;

        let err = estimate(&input).unwrap_err();
        assert!(matches!(
            err,
            EstimateError::InvalidInput { ref field, .. } if field == "numberOfPeople"
        ));
    }

    #[test]
    fn test_estimate_rejects_zero_duration() {
        let mut input = scenario_one();
        input.tour_duration = 0;

        let err = estimate(&input).unwrap_err();
        assert!(matches!(
            err,
            EstimateError::InvalidInput { ref field, .. } if field == "tourDuration"
        ));
    }

    #[test]
    fn test_estimate_rejects_empty_locations() {
        let mut input = scenario_one();
        input.selected_locations.clear();

        let err = estimate(&input).unwrap_err();
        assert!(err.to_string().contains("selectedLocations"));
    }

    #[test]
    fn test_estimate_rejects_negative_distance_and_rate() {
        let mut input = scenario_one();
        input.selected_locations[1].distance = dec!(-5);
        let err = estimate(&input).unwrap_err();
        assert!(err.to_string().contains("selectedLocations[1].distance"));

        let mut input = scenario_one();
        input.selected_locations[0].price_per_unit = dec!(-0.01);
        let err = estimate(&input).unwrap_err();
        assert!(err.to_string().contains("selectedLocations[0].pricePerUnit"));
    }

    #[test]
    fn test_estimate_rejects_negative_base_price() {
        let mut input = scenario_one();
        input.tour_type.base_price_per_person = dec!(-1);

        assert!(estimate(&input).is_err());
    }

    #[test]
    fn test_estimate_overflow_is_invalid_input() {
        let mut input = scenario_one();
        input.selected_locations = vec![location("Far", Decimal::MAX, dec!(2))];

        assert!(estimate(&input).is_err());
    }

    #[test]
    fn test_estimate_end_date_past_calendar_end_is_invalid_input() {
        let mut input = scenario_one();
        input.tour_start_date = NaiveDate::MAX.pred_opt().unwrap();
        input.tour_duration = 5;

        let err = estimate(&input).unwrap_err();
        assert!(matches!(
            err,
            EstimateError::InvalidInput { ref field, .. } if field == "tourDuration"
        ));
    }

    #[test]
    fn test_estimate_end_date_crosses_month() {
        let mut input = scenario_one();
        input.tour_start_date = date(2025, 1, 30);
        input.tour_duration = 3;

        let result = estimate(&input).unwrap();
        assert_eq!(result.estimated_end_date, date(2025, 2, 2));
    }

    #[test]
    fn test_estimate_end_date_leap_year() {
        let mut input = scenario_one();
        input.tour_start_date = date(2024, 2, 28);
        input.tour_duration = 2;

        let result = estimate(&input).unwrap();
        assert_eq!(result.estimated_end_date, date(2024, 3, 1));
    }

    #[test]
    fn test_estimate_end_date_crosses_year() {
        let mut input = scenario_one();
        input.tour_start_date = date(2025, 12, 30);
        input.tour_duration = 5;

        let result = estimate(&input).unwrap();
        assert_eq!(result.estimated_end_date, date(2026, 1, 4));
        assert_eq!(
            (result.estimated_end_date - input.tour_start_date).num_days(),
            5
        );
    }

    #[test]
    fn test_estimate_budget_is_additive() {
        let mut input = scenario_one();
        input.selected_locations = vec![
            location("Kandy", dec!(115.3), dec!(0.75)),
            location("Ella", dec!(87.25), dec!(1.15)),
            location("Galle", dec!(0.333), dec!(3.333)),
        ];
        input.tour_type.base_price_per_person = dec!(33.33);

        let result = estimate(&input).unwrap();

        let travel: Decimal = input
            .selected_locations
            .iter()
            .map(|l| l.distance * l.price_per_unit)
            .sum();
        assert_eq!(result.total_travel_cost, travel);
        assert_eq!(
            result.estimated_budget,
            result.total_travel_cost + result.accommodation_cost
        );
        assert_eq!(result.total_distance, dec!(202.883));
        assert_eq!(result.estimated_time_hours, result.total_distance / AVERAGE_SPEED_KMH);
    }

    #[test]
    fn test_estimate_keeps_input_order() {
        let mut input = scenario_one();
        input.selected_locations = vec![
            location("Zeta", dec!(1), dec!(1)),
            location("Alpha", dec!(2), dec!(1)),
            location("Mu", dec!(3), dec!(1)),
        ];

        let result = estimate(&input).unwrap();
        let names: Vec<&str> = result
            .cost_breakdown
            .iter()
            .map(|e| e.location_name.as_str())
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let input = scenario_one();

        let first = estimate(&input).unwrap();
        let second = estimate(&input).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_estimation_result_json_shape() {
        let result = estimate(&scenario_one()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["estimatedBudget"], "1370.00");
        assert_eq!(json["accommodationCost"], "120.00");
        assert_eq!(json["totalTravelCost"], "1250.00");
        assert_eq!(json["estimatedTimeHours"], 2.5);
        assert_eq!(json["totalDistance"], 150.0);
        assert_eq!(json["estimatedEndDate"], "2025-06-04");
        assert_eq!(json["costBreakdown"][0]["locationName"], "A");
        assert_eq!(json["costBreakdown"][0]["cost"], "1000.00");
        assert_eq!(json["costBreakdown"][1]["cost"], "250.00");
    }
}
