//! Configuration management for the Crop Advisor backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CROP_ADVISOR__ prefix
//! 4. The plain deployment variables PORT, HOST, OPENWEATHER_KEY and GEMINI_API_KEY

use config::{ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_AI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Generative model configuration
    pub ai: AiConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Upper bound on a whole request, in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap API base URL
    pub api_endpoint: String,

    /// OpenWeatherMap API key; empty means every lookup falls back
    pub api_key: String,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Generative Language API base URL
    pub api_endpoint: String,

    /// Generative Language API key
    pub api_key: String,

    /// Model name, e.g. gemini-2.5-flash
    pub model: String,

    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ADVISOR_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.trim().parse::<i64>().ok());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("log_format", "pretty")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.request_timeout_secs", 90)?
            .set_default("weather.api_endpoint", DEFAULT_WEATHER_ENDPOINT)?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("ai.api_endpoint", DEFAULT_AI_ENDPOINT)?
            .set_default("ai.api_key", "")?
            .set_default("ai.model", DEFAULT_AI_MODEL)?
            .set_default("ai.timeout_secs", 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ADVISOR__ prefix)
            .add_source(
                Environment::with_prefix("CROP_ADVISOR")
                    .separator("__")
                    .try_parsing(true),
            )
            // Plain variables used by hosting platforms win over everything
            .set_override_option("server.port", port)?
            .set_override_option("server.host", std::env::var("HOST").ok())?
            .set_override_option("weather.api_key", std::env::var("OPENWEATHER_KEY").ok())?
            .set_override_option("ai.api_key", std::env::var("GEMINI_API_KEY").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Address string the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            request_timeout_secs: 90,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_AI_ENDPOINT.to_string(),
            api_key: String::new(),
            model: DEFAULT_AI_MODEL.to_string(),
            timeout_secs: 60,
        }
    }
}
