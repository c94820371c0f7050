//! Weather data models

use serde::{Deserialize, Serialize};

/// Current conditions used as context for a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// Temperature in °C
    pub temp: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Rainfall over the last hour in mm
    pub rainfall: f64,
}

impl WeatherSnapshot {
    pub const FALLBACK: WeatherSnapshot = WeatherSnapshot {
        temp: 32.0,
        humidity: 60.0,
        rainfall: 2.0,
    };

    /// Synthetic snapshot substituted when the weather provider fails
    pub fn fallback() -> Self {
        Self::FALLBACK
    }
}

/// Where a weather snapshot came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherSource {
    Live,
    Fallback,
}
