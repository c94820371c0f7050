//! Crop Advisor - Backend Proxy
//!
//! Receives a farm context from the browser, augments it with live weather
//! (falling back to a synthetic snapshot), asks a generative model for a
//! structured crop recommendation and returns both to the client.

use std::{sync::Arc, time::Duration};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::{GenerativeModelClient, WeatherClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: WeatherClient,
    pub model: GenerativeModelClient,
}

impl AppState {
    /// Build the outbound clients described by `config`
    pub fn from_config(config: Config) -> AppResult<Self> {
        let weather = WeatherClient::new(&config.weather)?;
        let model = GenerativeModelClient::new(&config.ai)?;

        if !weather.is_configured() {
            tracing::warn!("Weather API key not set; every request will use fallback weather");
        }
        if config.ai.api_key.is_empty() {
            tracing::warn!("Generative model API key not set; recommendations will fail");
        }

        Ok(Self {
            config: Arc::new(config),
            weather,
            model,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration: the page may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    routes::api_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
