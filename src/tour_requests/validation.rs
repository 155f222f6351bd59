//! Payload validation for tour request submissions and previews.
//!
//! Every problem is collected so the client can show all field errors at
//! once. A payload that passes is turned into a [`TourRequestInput`] with
//! its tour type resolved against the catalog.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::FieldError;
use crate::estimator::{SelectedLocation, TourCatalog, TourRequestInput};

use super::models::Customer;
use super::requests::TourRequestPayload;

/// Longest accepted free-text special request
pub const MAX_SPECIAL_REQUESTS_LEN: usize = 2000;

/// Validate the tour fields used by the preview.
pub fn validate_tour(
    payload: &TourRequestPayload,
    catalog: &TourCatalog,
) -> Result<TourRequestInput, Vec<FieldError>> {
    let mut errors = Vec::new();
    let input = collect_tour(payload, catalog, &mut errors);

    match input {
        Some(input) if errors.is_empty() => Ok(input),
        _ => Err(errors),
    }
}

/// Validate a full submission. `today` is the submission date; the tour
/// must start strictly after it.
pub fn validate_submission(
    payload: &TourRequestPayload,
    catalog: &TourCatalog,
    today: NaiveDate,
) -> Result<(Customer, TourRequestInput), Vec<FieldError>> {
    let mut errors = Vec::new();

    let customer = collect_customer(payload, &mut errors);

    if let Some(start) = payload.tour_start_date {
        if start <= today {
            errors.push(FieldError::new("tourStartDate", "must be a future date"));
        }
    }

    let input = collect_tour(payload, catalog, &mut errors);

    match (customer, input) {
        (Some(customer), Some(input)) if errors.is_empty() => Ok((customer, input)),
        _ => Err(errors),
    }
}

fn collect_customer(
    payload: &TourRequestPayload,
    errors: &mut Vec<FieldError>,
) -> Option<Customer> {
    let name = required_text(payload.customer_name.as_deref(), "customerName", errors);

    let email = required_text(payload.customer_email.as_deref(), "customerEmail", errors)
        .and_then(|email| {
            if is_plausible_email(&email) {
                Some(email)
            } else {
                errors.push(FieldError::new("customerEmail", "is not a valid email address"));
                None
            }
        });

    let special_requests = payload
        .special_requests
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    if let Some(text) = &special_requests {
        if text.chars().count() > MAX_SPECIAL_REQUESTS_LEN {
            errors.push(FieldError::new(
                "specialRequests",
                format!("must be at most {} characters", MAX_SPECIAL_REQUESTS_LEN),
            ));
        }
    }

    Some(Customer {
        name: name?,
        email: email?,
        special_requests,
    })
}

fn collect_tour(
    payload: &TourRequestPayload,
    catalog: &TourCatalog,
    errors: &mut Vec<FieldError>,
) -> Option<TourRequestInput> {
    let tour_start_location =
        required_text(payload.tour_start_location.as_deref(), "tourStartLocation", errors);

    let tour_start_date = payload.tour_start_date;
    if tour_start_date.is_none() {
        errors.push(FieldError::new("tourStartDate", "is required"));
    }

    let number_of_people = at_least_one(payload.number_of_people, "numberOfPeople", errors);
    let tour_duration = at_least_one(payload.tour_duration, "tourDuration", errors);

    let tour_type =
        required_text(payload.tour_type.as_deref(), "tourType", errors).and_then(|label| {
            let profile = catalog.resolve(&label).cloned();
            if profile.is_none() {
                errors.push(FieldError::new("tourType", format!("unknown tour type '{}'", label)));
            }
            profile
        });

    let selected_locations = collect_locations(&payload.selected_locations, errors);

    Some(TourRequestInput {
        tour_start_date: tour_start_date?,
        number_of_people: number_of_people?,
        tour_duration: tour_duration?,
        selected_locations: selected_locations?,
        tour_type: tour_type?,
        tour_start_location: tour_start_location?,
    })
}

fn collect_locations(
    locations: &[SelectedLocation],
    errors: &mut Vec<FieldError>,
) -> Option<Vec<SelectedLocation>> {
    if locations.is_empty() {
        errors.push(FieldError::new("selectedLocations", "select at least one location"));
        return None;
    }

    let before = errors.len();
    let mut seen = HashSet::new();

    for (i, location) in locations.iter().enumerate() {
        let name = location.location_name.trim();
        if name.is_empty() {
            errors.push(FieldError::new(
                format!("selectedLocations[{}].locationName", i),
                "is required",
            ));
        } else if !seen.insert(name.to_lowercase()) {
            errors.push(FieldError::new(
                format!("selectedLocations[{}].locationName", i),
                format!("'{}' is selected more than once", name),
            ));
        }
        if location.distance < Decimal::ZERO {
            errors.push(FieldError::new(
                format!("selectedLocations[{}].distance", i),
                "must not be negative",
            ));
        }
        if location.price_per_unit < Decimal::ZERO {
            errors.push(FieldError::new(
                format!("selectedLocations[{}].pricePerUnit", i),
                "must not be negative",
            ));
        }
    }

    if errors.len() > before {
        return None;
    }

    Some(
        locations
            .iter()
            .map(|l| SelectedLocation {
                location_name: l.location_name.trim().to_string(),
                ..l.clone()
            })
            .collect(),
    )
}

fn required_text(value: Option<&str>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
    }
}

fn at_least_one(value: Option<i32>, field: &str, errors: &mut Vec<FieldError>) -> Option<i32> {
    match value {
        Some(v) if v >= 1 => Some(v),
        Some(_) => {
            errors.push(FieldError::new(field, "must be at least 1"));
            None
        }
        None => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
