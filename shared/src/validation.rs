//! Validation utilities for the Crop Advisor

use std::borrow::Cow;

use validator::ValidationError;

use crate::models::Recommendation;

// ============================================================================
// Location Validations
// ============================================================================

pub fn is_valid_latitude(latitude: f64) -> bool {
    latitude.is_finite() && (-90.0..=90.0).contains(&latitude)
}

pub fn is_valid_longitude(longitude: f64) -> bool {
    longitude.is_finite() && (-180.0..=180.0).contains(&longitude)
}

/// Validate a coordinate pair, for use as a `validator` schema check
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    if !is_valid_latitude(latitude) {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some(Cow::from("latitude must be between -90 and 90"));
        return Err(err);
    }
    if !is_valid_longitude(longitude) {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some(Cow::from("longitude must be between -180 and 180"));
        return Err(err);
    }
    Ok(())
}

/// Soil must carry text once whitespace is trimmed
pub fn validate_soil(soil: &str) -> Result<(), ValidationError> {
    if soil.trim().is_empty() {
        let mut err = ValidationError::new("soil_required");
        err.message = Some(Cow::from("soil is required"));
        return Err(err);
    }
    Ok(())
}

// ============================================================================
// Model Output Validations
// ============================================================================

/// A recommendation that parsed as JSON but is unusable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendationShapeError {
    #[error("best_crops[{index}] has an empty name")]
    EmptyCropName { index: usize },

    #[error("{list}[{index}] is empty")]
    EmptyListItem { list: &'static str, index: usize },

    #[error("explanation is empty")]
    EmptyExplanation,
}

/// Check the fields serde cannot: required strings must carry content
pub fn validate_recommendation(rec: &Recommendation) -> Result<(), RecommendationShapeError> {
    if let Some(index) = rec.best_crops.iter().position(|c| c.name.trim().is_empty()) {
        return Err(RecommendationShapeError::EmptyCropName { index });
    }
    for (list, items) in [
        ("budget_friendly", &rec.budget_friendly),
        ("not_recommended", &rec.not_recommended),
    ] {
        if let Some(index) = items.iter().position(|s| s.trim().is_empty()) {
            return Err(RecommendationShapeError::EmptyListItem { list, index });
        }
    }
    if rec.explanation.trim().is_empty() {
        return Err(RecommendationShapeError::EmptyExplanation);
    }
    Ok(())
}
