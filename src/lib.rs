//! `trip-estimator` - trip cost, flight and nearest-airport estimation
//!
//! This library provides the pure planning core of a travel planner:
//! great-circle distances, nearest-airport resolution against a static
//! table, flight suggestion, and trip cost estimation. Every function is
//! synchronous and free of shared mutable state, so it can be called from
//! any number of threads or request handlers.

pub mod airports;
pub mod api;
pub mod config;
pub mod error;
pub mod estimator;
pub mod format;
pub mod geo;
pub mod logging;
pub mod models;
pub mod planner;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use airports::{AirportTable, nearest_airport, suggest_flight};
pub use config::TripEstimatorConfig;
pub use error::{ErrorCode, TripEstimatorError};
pub use estimator::{
    FlightQuoteSource, FormulaQuoteSource, TripCostEstimator, estimate_trip_cost,
    resolve_flight_cost,
};
pub use geo::distance_km;
pub use models::{Airport, Coordinate, EstimationResult, FlightRoute, Place, TripQuery};
pub use planner::{PlanRequest, PlanningContext, TripPlan, TripPlanner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripEstimatorError>;
