//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current weather endpoint

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::WeatherSnapshot;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    main: OWMMain,
    rain: Option<OWMRain>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<WeatherSnapshot> {
        if !self.is_configured() {
            return Err(AppError::Configuration(
                "Weather API key not configured".to_string(),
            ));
        }

        let url = format!("{}/weather", self.base_url);
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherApi(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherApi(format!("Failed to parse weather response: {}", e)))?;

        Ok(convert_current_response(data))
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> WeatherSnapshot {
    WeatherSnapshot {
        temp: data.main.temp,
        humidity: data.main.humidity,
        rainfall: data.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
    }
}
