//! Airport reference data

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// An airport from the static reference table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Airport {
    /// Three-letter IATA code
    pub code: String,
    pub name: String,
    pub city: String,
    pub coordinate: Coordinate,
}

impl Airport {
    #[must_use]
    pub fn new(code: &str, name: &str, city: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            coordinate: Coordinate {
                latitude,
                longitude,
            },
        }
    }

    /// IATA codes are exactly three ASCII uppercase letters
    #[must_use]
    pub fn has_valid_code(&self) -> bool {
        self.code.len() == 3 && self.code.chars().all(|c| c.is_ascii_uppercase())
    }
}
