//! Trip cost estimation
//!
//! The cost model is plain arithmetic:
//!
//! ```text
//! duration  = (end - start) in days + 1
//! base      = price_per_day * duration * (adults + children * child_weight)
//! flight    = fare_per_person * (adults + children * child_flight_weight)
//! total     = base + flight (flight only when requested)
//! ```
//!
//! Fares come from a [`FlightQuoteSource`]. When no live quote is available
//! the distance-based [`FormulaQuoteSource`] is used instead.

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use crate::config::{EstimationConfig, FlightConfig, TripEstimatorConfig};
use crate::geo::distance_km;
use crate::models::{EstimationResult, FareSource, FlightEstimate, FlightRoute, TripQuery};
use crate::{Result, TripEstimatorError};

/// A provider of per-person round-trip fares
pub trait FlightQuoteSource: Send + Sync {
    /// Fare for `route`, or `MissingQuoteData` when none is available
    fn quote(&self, route: &FlightRoute) -> Result<f64>;
}

/// Fallback fare: `base_fare + distance_km * per_km_rate`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormulaQuoteSource {
    pub base_fare: f64,
    pub per_km_rate: f64,
}

impl FormulaQuoteSource {
    #[must_use]
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            base_fare: config.base_fare,
            per_km_rate: config.per_km_rate,
        }
    }

    #[must_use]
    pub fn fare_for_distance(&self, distance_km: f64) -> f64 {
        self.base_fare + distance_km * self.per_km_rate
    }
}

impl Default for FormulaQuoteSource {
    fn default() -> Self {
        Self::from_config(&FlightConfig::default())
    }
}

impl FlightQuoteSource for FormulaQuoteSource {
    fn quote(&self, route: &FlightRoute) -> Result<f64> {
        Ok(self.fare_for_distance(route.distance_km))
    }
}

/// Ask `live` for a fare, falling back to `formula` when it has none.
///
/// Only `MissingQuoteData` triggers the fallback; any other error from the
/// live source is returned to the caller.
pub fn resolve_flight_cost(
    live: Option<&dyn FlightQuoteSource>,
    formula: &FormulaQuoteSource,
    route: &FlightRoute,
) -> Result<FlightEstimate> {
    if let Some(source) = live {
        match source.quote(route) {
            Ok(cost) => {
                validate_amount("quoted fare", cost)?;
                return Ok(FlightEstimate {
                    route: route.clone(),
                    cost_per_person: cost,
                    source: FareSource::Quote,
                });
            }
            Err(TripEstimatorError::MissingQuoteData { .. }) => {
                warn!(
                    "No live quote for {} -> {}, using fare formula",
                    route.origin.code, route.destination.code
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(FlightEstimate {
        route: route.clone(),
        cost_per_person: formula.quote(route)?,
        source: FareSource::Formula,
    })
}

/// Number of days in an inclusive date range
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> Result<u32> {
    if end < start {
        return Err(TripEstimatorError::InvalidDateRange { start, end });
    }
    let days = (end - start).num_days() + 1;
    u32::try_from(days).map_err(|_| TripEstimatorError::validation("trip is too long"))
}

fn validate_amount(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TripEstimatorError::validation(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

/// Trip cost estimator holding the configured weights and fare formula
#[derive(Debug, Clone)]
pub struct TripCostEstimator {
    estimation: EstimationConfig,
    formula: FormulaQuoteSource,
}

impl Default for TripCostEstimator {
    fn default() -> Self {
        Self::new(EstimationConfig::default(), &FlightConfig::default())
    }
}

impl TripCostEstimator {
    #[must_use]
    pub fn new(estimation: EstimationConfig, flight: &FlightConfig) -> Self {
        Self {
            estimation,
            formula: FormulaQuoteSource::from_config(flight),
        }
    }

    #[must_use]
    pub fn from_config(config: &TripEstimatorConfig) -> Self {
        Self::new(config.estimation.clone(), &config.flight)
    }

    #[must_use]
    pub fn formula(&self) -> &FormulaQuoteSource {
        &self.formula
    }

    #[must_use]
    pub fn default_price_per_day(&self) -> f64 {
        self.estimation.default_price_per_day
    }

    /// Weighted head count for daily costs
    fn day_travelers(&self, query: &TripQuery) -> f64 {
        f64::from(query.adults) + f64::from(query.children) * self.estimation.child_weight
    }

    /// Weighted head count for fares
    fn flight_travelers(&self, query: &TripQuery) -> f64 {
        f64::from(query.adults) + f64::from(query.children) * self.estimation.child_flight_weight
    }

    fn validate(query: &TripQuery) -> Result<()> {
        query.origin.validate()?;
        query.destination.validate()?;
        if query.adults < 1 {
            return Err(TripEstimatorError::validation("at least one adult is required"));
        }
        validate_amount("price per day", query.price_per_day)?;
        if let Some(cost) = query.flight_cost_per_person {
            validate_amount("flight cost per person", cost)?;
        }
        Ok(())
    }

    /// Estimate the total cost of a trip
    #[instrument(level = "debug", skip(self), fields(start = %query.start_date, end = %query.end_date))]
    pub fn estimate(&self, query: &TripQuery) -> Result<EstimationResult> {
        Self::validate(query)?;

        let duration = duration_days(query.start_date, query.end_date)?;
        let distance = distance_km(&query.origin, &query.destination);

        let base_cost = query.price_per_day * f64::from(duration) * self.day_travelers(query);

        let flight_cost = if query.include_flight {
            let fare = query
                .flight_cost_per_person
                .unwrap_or_else(|| self.formula.fare_for_distance(distance));
            fare * self.flight_travelers(query)
        } else {
            0.0
        };

        let total_cost = base_cost + flight_cost;
        if !total_cost.is_finite() {
            return Err(TripEstimatorError::validation(
                "estimated cost is too large to represent",
            ));
        }

        let result = EstimationResult {
            duration_days: duration,
            total_cost,
            base_cost,
            flight_cost,
            distance_km: distance,
            flight_included: query.include_flight,
        };

        debug!(
            "Estimated {} days, {:.1} km: total {:.0}",
            result.duration_days, result.distance_km, result.total_cost
        );
        Ok(result)
    }
}

/// Estimate a trip with the weights and fare formula from `settings`
pub fn estimate_trip_cost(
    query: &TripQuery,
    settings: &TripEstimatorConfig,
) -> Result<EstimationResult> {
    TripCostEstimator::from_config(settings).estimate(query)
}
