//! Recommendation request submitted by the browser form

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use super::{LocationPoint, Season};

/// Placeholder soil classification used until real soil sensing exists
pub const AUTO_SOIL: &str = "loamy";

/// Farmer's budget for inputs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    Medium,
    High,
}

/// Farmer's tolerance for risk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

macro_rules! level_str {
    ($ty:ty) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    Self::Low => "low",
                    Self::Medium => "medium",
                    Self::High => "high",
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    "low" => Ok(Self::Low),
                    "medium" => Ok(Self::Medium),
                    "high" => Ok(Self::High),
                    other => Err(format!("unknown level: {:?}", other)),
                }
            }
        }
    };
}

level_str!(Budget);
level_str!(RiskLevel);

/// Context assembled from the form on each submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[validate(schema(function = "validate_form_location", skip_on_field_errors = false))]
pub struct FormContext {
    pub location: LocationPoint,
    pub season: Season,
    #[validate(custom = "crate::validation::validate_soil")]
    pub soil: String,
    pub budget: Budget,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub crop_preference: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub previous_crop: Option<String>,
    pub risk_level: RiskLevel,
}

fn validate_form_location(form: &FormContext) -> Result<(), ValidationError> {
    crate::validation::validate_coordinates(form.location.latitude, form.location.longitude)
}

/// Raw field values as read from the page
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pub location_name: String,
    pub latitude: String,
    pub longitude: String,
    pub season: String,
    pub soil: String,
    pub budget: String,
    pub crop_preference: String,
    pub previous_crop: String,
    pub risk_level: String,
}

/// A form field that could not be read
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {field}: {message}")]
pub struct FormFieldError {
    pub field: &'static str,
    pub message: String,
}

impl FormFieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl TryFrom<FormFields> for FormContext {
    type Error = FormFieldError;

    fn try_from(fields: FormFields) -> Result<Self, Self::Error> {
        let latitude = fields
            .latitude
            .trim()
            .parse::<f64>()
            .map_err(|_| FormFieldError::new("latitude", "location has not been resolved yet"))?;
        let longitude = fields
            .longitude
            .trim()
            .parse::<f64>()
            .map_err(|_| FormFieldError::new("longitude", "location has not been resolved yet"))?;

        let season = fields
            .season
            .parse()
            .map_err(|e: String| FormFieldError::new("season", e))?;
        let budget = fields
            .budget
            .parse()
            .map_err(|e: String| FormFieldError::new("budget", e))?;
        let risk_level = fields
            .risk_level
            .parse()
            .map_err(|e: String| FormFieldError::new("risk_level", e))?;

        let soil = if fields.soil.trim().is_empty() {
            AUTO_SOIL.to_string()
        } else {
            fields.soil
        };

        Ok(FormContext {
            location: LocationPoint::new(latitude, longitude, fields.location_name),
            season,
            soil,
            budget,
            crop_preference: non_empty(fields.crop_preference),
            previous_crop: non_empty(fields.previous_crop),
            risk_level,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(non_empty))
}
