//! Data models for the trip estimator
//!
//! This module contains the core domain models organized by concern:
//! - Location: coordinates and range validation
//! - Airport: static airport reference data
//! - Trip: estimator input and output
//! - Flight: suggested routes and fare estimates
//! - Place: canonical destination record normalized from loose JSON

pub mod airport;
pub mod flight;
pub mod location;
pub mod place;
pub mod trip;

// Re-export all public types for convenient access
pub use airport::Airport;
pub use flight::{FareSource, FlightEstimate, FlightRoute};
pub use location::Coordinate;
pub use place::Place;
pub use trip::{EstimationResult, TripQuery};
