//! Trip query and estimation result models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Input to the trip cost estimator
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripQuery {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub start_date: NaiveDate,
    /// Inclusive last day of the trip
    pub end_date: NaiveDate,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    pub price_per_day: f64,
    #[serde(default)]
    pub include_flight: bool,
    /// Per-person round-trip fare. When absent and `include_flight` is set,
    /// the distance-based fare formula is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_cost_per_person: Option<f64>,
}

impl TripQuery {
    /// Builder-style constructor for a trip without flight
    #[must_use]
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        start_date: NaiveDate,
        end_date: NaiveDate,
        price_per_day: f64,
    ) -> Self {
        Self {
            origin,
            destination,
            start_date,
            end_date,
            adults: 1,
            children: 0,
            price_per_day,
            include_flight: false,
            flight_cost_per_person: None,
        }
    }

    #[must_use]
    pub fn with_travelers(mut self, adults: u32, children: u32) -> Self {
        self.adults = adults;
        self.children = children;
        self
    }

    /// Include a flight; `None` falls back to the fare formula
    #[must_use]
    pub fn with_flight(mut self, cost_per_person: Option<f64>) -> Self {
        self.include_flight = true;
        self.flight_cost_per_person = cost_per_person;
        self
    }
}

/// Output of the trip cost estimator
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    /// Days in the trip, counting both endpoints; always at least 1
    pub duration_days: u32,
    pub total_cost: f64,
    /// Accommodation and activities part of the total
    pub base_cost: f64,
    /// Flight part of the total, zero when no flight is included
    pub flight_cost: f64,
    pub distance_km: f64,
    pub flight_included: bool,
}
