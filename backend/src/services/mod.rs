//! Business logic services for the Crop Advisor

pub mod prompt;
pub mod recommendation;
pub mod weather;

pub use recommendation::RecommendationService;
pub use weather::{WeatherReading, WeatherService};
