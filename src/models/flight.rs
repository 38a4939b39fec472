//! Flight route and fare estimate models

use serde::{Deserialize, Serialize};

use super::Airport;

/// A suggested flight between the airports nearest to origin and destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightRoute {
    pub origin: Airport,
    pub destination: Airport,
    /// Great-circle distance between the two airports
    pub distance_km: f64,
}

/// Where a flight fare came from
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FareSource {
    /// A live quote service
    Quote,
    /// The distance-based fallback formula
    Formula,
}

/// Per-person round-trip fare for a route
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightEstimate {
    pub route: FlightRoute,
    pub cost_per_person: f64,
    pub source: FareSource,
}
