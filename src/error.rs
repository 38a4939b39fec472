//! Error types and handling for the trip estimator

use thiserror::Error;

/// Stable machine-readable error codes, used in HTTP error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidCoordinate,
    EmptyAirportTable,
    InvalidDateRange,
    MissingQuoteData,
    Validation,
    Config,
    Parse,
    Io,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidCoordinate => "invalid_coordinate",
            ErrorCode::EmptyAirportTable => "empty_airport_table",
            ErrorCode::InvalidDateRange => "invalid_date_range",
            ErrorCode::MissingQuoteData => "missing_quote_data",
            ErrorCode::Validation => "validation",
            ErrorCode::Config => "config",
            ErrorCode::Parse => "parse",
            ErrorCode::Io => "io",
        }
    }
}

/// Main error type for the trip estimator
#[derive(Error, Debug)]
pub enum TripEstimatorError {
    /// Latitude or longitude outside the valid range, or not a number
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// The airport table has no entries
    #[error("Airport table is empty")]
    EmptyAirportTable,

    /// End date lies before the start date
    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// No live flight quote is available for the route
    #[error("No flight quote available for {origin} -> {destination}")]
    MissingQuoteData { origin: String, destination: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Malformed data files or payloads
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TripEstimatorError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn missing_quote<A: Into<String>, B: Into<String>>(origin: A, destination: B) -> Self {
        Self::MissingQuoteData {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            TripEstimatorError::InvalidCoordinate { .. } => ErrorCode::InvalidCoordinate,
            TripEstimatorError::EmptyAirportTable => ErrorCode::EmptyAirportTable,
            TripEstimatorError::InvalidDateRange { .. } => ErrorCode::InvalidDateRange,
            TripEstimatorError::MissingQuoteData { .. } => ErrorCode::MissingQuoteData,
            TripEstimatorError::Validation { .. } => ErrorCode::Validation,
            TripEstimatorError::Config { .. } => ErrorCode::Config,
            TripEstimatorError::Parse { .. } => ErrorCode::Parse,
            TripEstimatorError::Io { .. } => ErrorCode::Io,
        }
    }

    /// Whether the caller supplied bad input (as opposed to a server-side fault)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TripEstimatorError::InvalidCoordinate { .. }
                | TripEstimatorError::InvalidDateRange { .. }
                | TripEstimatorError::Validation { .. }
                | TripEstimatorError::Parse { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripEstimatorError::InvalidCoordinate { .. } => {
                "Coordinates are out of range. Latitude must be within [-90, 90] and longitude within [-180, 180].".to_string()
            }
            TripEstimatorError::EmptyAirportTable => {
                "No airports configured. Please check the airport table in your config.".to_string()
            }
            TripEstimatorError::InvalidDateRange { .. } => {
                "The end date must not be before the start date.".to_string()
            }
            TripEstimatorError::MissingQuoteData { .. } => {
                "Live flight prices are unavailable; an estimated fare was used.".to_string()
            }
            TripEstimatorError::Validation { message } => format!("Invalid input: {message}"),
            TripEstimatorError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TripEstimatorError::Parse { .. } => "Malformed data could not be read.".to_string(),
            TripEstimatorError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
