//! Tour request module.
//!
//! Preview and submission of custom tour requests, plus the admin decision
//! on pending requests. Cost figures always come from [`crate::estimator`].

pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod validation;

// Re-export commonly used items
pub use models::{TourRequest, TourRequestStatus};
pub use routes::router;
