//! External API integrations

pub mod generative;
pub mod weather;

pub use generative::GenerativeModelClient;
pub use weather::WeatherClient;
