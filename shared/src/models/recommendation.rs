//! Recommendation models produced by the generative model

use serde::{Deserialize, Serialize};

use super::WeatherSnapshot;

/// A crop the model considers the best fit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BestCrop {
    pub name: String,
    pub water_need: String,
    pub reason: String,
}

/// Structured recommendation returned by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub best_crops: Vec<BestCrop>,
    pub budget_friendly: Vec<String>,
    pub not_recommended: Vec<String>,
    pub explanation: String,
}

/// Successful `/recommend` response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendResponse {
    pub weather: WeatherSnapshot,
    pub ai: Recommendation,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
