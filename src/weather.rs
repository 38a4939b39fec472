//! Weather condition categories for destination forecasts
//!
//! Forecast providers report WMO weather codes (0-99). Destinations only
//! need a coarse condition, so codes are bucketed into a handful of
//! categories with an Indonesian label for display.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Drizzle,
    RainShowers,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Bucket a WMO weather code
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            4..=9 => Self::Cloudy,
            10..=19 => Self::Fog,
            20..=29 | 40..=49 | 60..=69 => Self::Rain,
            30..=39 | 70..=79 => Self::Snow,
            50..=59 => Self::Drizzle,
            80..=89 => Self::RainShowers,
            90..=99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "Cerah",
            Self::PartlyCloudy => "Berawan Sebagian",
            Self::Cloudy => "Berawan",
            Self::Fog => "Berkabut",
            Self::Rain => "Hujan",
            Self::Snow => "Salju",
            Self::Drizzle => "Gerimis",
            Self::RainShowers => "Hujan Lokal",
            Self::Thunderstorm => "Badai Petir",
            Self::Unknown => "Tidak tersedia",
        }
    }

    /// Whether outdoor sightseeing is likely to be disrupted
    #[must_use]
    pub fn is_wet(self) -> bool {
        matches!(
            self,
            Self::Rain | Self::Drizzle | Self::RainShowers | Self::Thunderstorm | Self::Snow
        )
    }
}
