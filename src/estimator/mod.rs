//! Tour request estimation engine.
//!
//! Derives the budget, travel time, end date, per-location cost breakdown
//! and summary of a custom tour request. Shared by the live preview and the
//! authoritative computation performed when a request is submitted.

pub mod calculators;
pub mod catalog;
pub mod models;
pub mod summary;

// Re-export commonly used items
pub use calculators::{estimate, format_money, round_money, EstimateError, AVERAGE_SPEED_KMH};
pub use catalog::TourCatalog;
pub use models::{
    CostBreakdownEntry, EstimationResult, SelectedLocation, TourRequestInput, TourTypeProfile,
};
