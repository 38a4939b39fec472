//! Configuration management for the trip estimator
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. Every pricing
//! weight and the flight-suggestion threshold live here as named values
//! rather than constants in the estimator.

use crate::TripEstimatorError;
use crate::airports::AirportTable;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TripEstimatorConfig {
    /// Trip cost weights and defaults
    #[serde(default)]
    pub estimation: EstimationConfig,
    /// Flight suggestion and fare formula settings
    #[serde(default)]
    pub flight: FlightConfig,
    /// Airport reference table
    #[serde(default)]
    pub airports: AirportsConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Trip cost estimation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationConfig {
    /// Share of an adult's daily cost charged for a child
    #[serde(default = "default_child_weight")]
    pub child_weight: f64,
    /// Share of an adult's fare charged for a child
    #[serde(default = "default_child_flight_weight")]
    pub child_flight_weight: f64,
    /// Price per day used when a place does not report one
    #[serde(default = "default_price_per_day")]
    pub default_price_per_day: f64,
}

/// Flight suggestion and fallback fare settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightConfig {
    /// Trips longer than this get a flight suggestion
    #[serde(default = "default_suggestion_threshold")]
    pub suggestion_threshold_km: f64,
    /// Fixed part of the fallback fare
    #[serde(default = "default_base_fare")]
    pub base_fare: f64,
    /// Distance-dependent part of the fallback fare
    #[serde(default = "default_per_km_rate")]
    pub per_km_rate: f64,
}

/// Airport table settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AirportsConfig {
    /// JSON file replacing the built-in table
    pub table_path: Option<PathBuf>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body in KB
    #[serde(default = "default_body_limit")]
    pub body_limit_kb: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_child_weight() -> f64 {
    0.5
}

fn default_child_flight_weight() -> f64 {
    0.75
}

fn default_price_per_day() -> f64 {
    150_000.0
}

fn default_suggestion_threshold() -> f64 {
    crate::airports::DEFAULT_FLIGHT_THRESHOLD_KM
}

fn default_base_fare() -> f64 {
    800_000.0
}

fn default_per_km_rate() -> f64 {
    300.0
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            child_weight: default_child_weight(),
            child_flight_weight: default_child_flight_weight(),
            default_price_per_day: default_price_per_day(),
        }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            suggestion_threshold_km: default_suggestion_threshold(),
            base_fare: default_base_fare(),
            per_km_rate: default_per_km_rate(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            body_limit_kb: default_body_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TripEstimatorConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // An explicit path must exist; the default location is optional
        let (config_file, required) = match config_path {
            Some(path) => (path, true),
            None => (
                Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml")),
                false,
            ),
        };

        if required || config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(required)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TRIP_ESTIMATOR_FLIGHT__BASE_FARE=900000
        builder = builder.add_source(
            Environment::with_prefix("TRIP_ESTIMATOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", config_file.display()))?;

        let mut config: TripEstimatorConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trip-estimator").join("config.toml"))
    }

    /// Apply default values to empty string fields
    pub fn apply_defaults(&mut self) {
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.server.body_limit_kb == 0 {
            self.server.body_limit_kb = default_body_limit();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_weights()?;
        self.validate_flight()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Child weights are fractions of an adult's share
    fn validate_weights(&self) -> Result<()> {
        let e = &self.estimation;
        for (name, value) in [
            ("child_weight", e.child_weight),
            ("child_flight_weight", e.child_flight_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TripEstimatorError::config(format!(
                    "estimation.{name} must be between 0 and 1, got {value}"
                ))
                .into());
            }
        }

        if !e.default_price_per_day.is_finite() || e.default_price_per_day < 0.0 {
            return Err(
                TripEstimatorError::config("estimation.default_price_per_day cannot be negative")
                    .into(),
            );
        }

        Ok(())
    }

    fn validate_flight(&self) -> Result<()> {
        let f = &self.flight;
        if !f.suggestion_threshold_km.is_finite() || f.suggestion_threshold_km < 0.0 {
            return Err(TripEstimatorError::config(
                "flight.suggestion_threshold_km cannot be negative",
            )
            .into());
        }

        // Half the Earth's circumference; anything larger never suggests a flight
        if f.suggestion_threshold_km > 20_016.0 {
            return Err(TripEstimatorError::config(
                "flight.suggestion_threshold_km cannot exceed 20016 km",
            )
            .into());
        }

        if !f.base_fare.is_finite() || f.base_fare < 0.0 {
            return Err(TripEstimatorError::config("flight.base_fare cannot be negative").into());
        }

        if !f.per_km_rate.is_finite() || f.per_km_rate < 0.0 {
            return Err(TripEstimatorError::config("flight.per_km_rate cannot be negative").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripEstimatorError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripEstimatorError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    /// Load the configured airport table, or the built-in one
    pub fn airport_table(&self) -> Result<AirportTable> {
        match &self.airports.table_path {
            Some(path) => AirportTable::load_json(path)
                .with_context(|| format!("Failed to load airport table from {}", path.display())),
            None => Ok(AirportTable::builtin()),
        }
    }
}
