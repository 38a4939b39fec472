//! Trip planning
//!
//! Combines distance, airport resolution, fare lookup and cost estimation
//! into one pass. The flight estimate is carried in a [`PlanningContext`]
//! value that the caller hands to the estimator; nothing is shared through
//! global state.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::Result;
use crate::airports::{AirportTable, suggest_flight};
use crate::config::TripEstimatorConfig;
use crate::estimator::{FlightQuoteSource, TripCostEstimator, resolve_flight_cost};
use crate::geo::distance_km;
use crate::models::{Airport, Coordinate, EstimationResult, FlightEstimate, TripQuery};

/// A planning request as submitted by a user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "one")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    /// Falls back to the configured default price when absent
    #[serde(default)]
    pub price_per_day: Option<f64>,
    #[serde(default)]
    pub include_flight: bool,
}

fn one() -> u32 {
    1
}

/// Travel facts derived from origin and destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanningContext {
    pub distance_km: f64,
    pub origin_airport: Airport,
    pub destination_airport: Airport,
    /// Set only when a flight is worth suggesting
    pub flight: Option<FlightEstimate>,
}

impl PlanningContext {
    /// Fare per person carried by this context, if any
    #[must_use]
    pub fn flight_cost_per_person(&self) -> Option<f64> {
        self.flight.as_ref().map(|f| f.cost_per_person)
    }

    /// Attach this context's fare to a query.
    ///
    /// A flight is included only when requested and a flight was suggested.
    #[must_use]
    pub fn apply_to(&self, mut query: TripQuery, include_flight: bool) -> TripQuery {
        match self.flight_cost_per_person() {
            Some(cost) if include_flight => {
                query.include_flight = true;
                query.flight_cost_per_person = Some(cost);
            }
            _ => {
                query.include_flight = false;
                query.flight_cost_per_person = None;
            }
        }
        query
    }
}

/// Result of planning a trip
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub context: PlanningContext,
    pub estimate: EstimationResult,
}

/// Plans trips against a shared, read-only airport table
#[derive(Clone)]
pub struct TripPlanner {
    airports: Arc<AirportTable>,
    estimator: TripCostEstimator,
    threshold_km: f64,
    quotes: Option<Arc<dyn FlightQuoteSource>>,
}

impl TripPlanner {
    #[must_use]
    pub fn new(airports: Arc<AirportTable>, estimator: TripCostEstimator, threshold_km: f64) -> Self {
        Self {
            airports,
            estimator,
            threshold_km,
            quotes: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &TripEstimatorConfig, airports: Arc<AirportTable>) -> Self {
        Self::new(
            airports,
            TripCostEstimator::from_config(config),
            config.flight.suggestion_threshold_km,
        )
    }

    /// Use a live fare source ahead of the formula
    #[must_use]
    pub fn with_quote_source(mut self, quotes: Arc<dyn FlightQuoteSource>) -> Self {
        self.quotes = Some(quotes);
        self
    }

    #[must_use]
    pub fn airports(&self) -> &AirportTable {
        &self.airports
    }

    #[must_use]
    pub fn estimator(&self) -> &TripCostEstimator {
        &self.estimator
    }

    /// Resolve airports and, if a flight is suggested, its fare
    #[instrument(level = "debug", skip(self))]
    pub fn flight_context(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<PlanningContext> {
        self.context(origin, destination, true)
    }

    /// Build the planning context; the live quote source is consulted only
    /// when `live_quote` is set, otherwise the fare formula prices the route
    fn context(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        live_quote: bool,
    ) -> Result<PlanningContext> {
        origin.validate()?;
        destination.validate()?;

        let quotes = if live_quote { self.quotes.as_deref() } else { None };
        let (origin_airport, destination_airport, flight) =
            match suggest_flight(origin, destination, &self.airports, self.threshold_km) {
                Some(route) => {
                    let estimate = resolve_flight_cost(quotes, self.estimator.formula(), &route)?;
                    (route.origin.clone(), route.destination.clone(), Some(estimate))
                }
                None => (
                    self.airports.nearest(origin).clone(),
                    self.airports.nearest(destination).clone(),
                    None,
                ),
            };

        Ok(PlanningContext {
            distance_km: distance_km(origin, destination),
            origin_airport,
            destination_airport,
            flight,
        })
    }

    /// Plan a trip end to end
    #[instrument(level = "debug", skip(self))]
    pub fn plan(&self, request: &PlanRequest) -> Result<TripPlan> {
        let context = self.context(&request.origin, &request.destination, request.include_flight)?;

        let price = request
            .price_per_day
            .unwrap_or_else(|| self.estimator.default_price_per_day());
        let query = TripQuery::new(
            request.origin,
            request.destination,
            request.start_date,
            request.end_date,
            price,
        )
        .with_travelers(request.adults, request.children);
        let query = context.apply_to(query, request.include_flight);

        if request.include_flight && !query.include_flight {
            debug!("Flight requested but not suggested for this trip");
        }

        let estimate = self.estimator.estimate(&query)?;
        Ok(TripPlan { context, estimate })
    }
}
