//! Human readable summary sentence for a tour request.

use rust_decimal::Decimal;

use super::calculators::format_money;
use super::models::TourRequestInput;

/// Date format used in summaries, e.g. "June 1, 2025"
pub const SUMMARY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Build the summary shown to the customer and the admin.
pub fn describe(
    input: &TourRequestInput,
    estimated_budget: Decimal,
    accommodation_cost: Decimal,
) -> String {
    format!(
        "A {}-day {} tour starting from {} on {}, covering {} locations, \
         with an estimated budget of ${} (including ${} for accommodation and food).",
        input.tour_duration,
        input.tour_type.label,
        input.tour_start_location,
        input.tour_start_date.format(SUMMARY_DATE_FORMAT),
        input.selected_locations.len(),
        format_money(estimated_budget),
        format_money(accommodation_cost),
    )
}
