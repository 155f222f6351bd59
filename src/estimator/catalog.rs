//! Tour type catalog.
//!
//! Maps a tour type label to its [`TourTypeProfile`]. The catalog is an
//! immutable value: callers resolve the profile and hand it to the
//! estimator, so estimation never reads shared state.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::TourTypeProfile;

/// Immutable lookup of tour type profiles, keyed case-insensitively
#[derive(Debug, Clone, PartialEq)]
pub struct TourCatalog {
    profiles: BTreeMap<String, TourTypeProfile>,
}

impl TourCatalog {
    /// Build a catalog from profiles. Later duplicates replace earlier ones.
    pub fn new(profiles: impl IntoIterator<Item = TourTypeProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|p| (Self::key(&p.label), p))
            .collect();
        Self { profiles }
    }

    /// Catalog used when no tour types are configured in the database
    pub fn builtin() -> Self {
        Self::new([
            profile("Standard", dec!(50.00)),
            profile("Luxury", dec!(120.00)),
            profile("Custom", dec!(80.00)),
        ])
    }

    /// Look up a tour type by label, ignoring case and surrounding whitespace
    pub fn resolve(&self, label: &str) -> Option<&TourTypeProfile> {
        self.profiles.get(&Self::key(label))
    }

    /// Profiles ordered by label
    pub fn profiles(&self) -> impl Iterator<Item = &TourTypeProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn key(label: &str) -> String {
        label.trim().to_lowercase()
    }
}

impl Default for TourCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn profile(label: &str, base_price_per_person: Decimal) -> TourTypeProfile {
    TourTypeProfile {
        label: label.to_string(),
        base_price_per_person,
    }
}
