//! Weather lookup that never fails
//!
//! Any provider problem is logged and replaced by the synthetic
//! [`WeatherSnapshot::FALLBACK`] so a recommendation can still be produced.

use shared::{WeatherSnapshot, WeatherSource};

use crate::external::WeatherClient;

/// Weather snapshot together with its origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReading {
    pub snapshot: WeatherSnapshot,
    pub source: WeatherSource,
}

#[derive(Clone)]
pub struct WeatherService {
    client: WeatherClient,
}

impl WeatherService {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Current weather at the coordinates, or the fallback snapshot
    pub async fn current_or_fallback(&self, latitude: f64, longitude: f64) -> WeatherReading {
        match self.client.get_current_weather(latitude, longitude).await {
            Ok(snapshot) => {
                tracing::info!(
                    latitude,
                    longitude,
                    temp = snapshot.temp,
                    humidity = snapshot.humidity,
                    rainfall = snapshot.rainfall,
                    "Real weather fetched"
                );
                WeatherReading {
                    snapshot,
                    source: WeatherSource::Live,
                }
            }
            Err(e) => {
                tracing::warn!(latitude, longitude, error = %e, "Weather API failed, using fallback data");
                WeatherReading {
                    snapshot: WeatherSnapshot::fallback(),
                    source: WeatherSource::Fallback,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_falls_back() {
        let service = WeatherService::new(WeatherClient::with_base_url(
            String::new(),
            "http://127.0.0.1:9".into(),
        ));
        let reading = service.current_or_fallback(20.0, 78.0).await;
        assert_eq!(reading.source, WeatherSource::Fallback);
        assert_eq!(reading.snapshot, WeatherSnapshot::fallback());
    }
}
