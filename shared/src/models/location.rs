//! Location models

use serde::{Deserialize, Deserializer, Serialize};

/// A point on the map with a human-readable label.
///
/// On the wire the coordinates are `lat` / `lon`. The browser form sends them
/// as strings, so both JSON numbers and numeric strings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationPoint {
    #[serde(rename = "lat", deserialize_with = "number_or_string")]
    pub latitude: f64,

    #[serde(rename = "lon", deserialize_with = "number_or_string")]
    pub longitude: f64,

    #[serde(default)]
    pub name: String,
}

impl LocationPoint {
    pub fn new(latitude: f64, longitude: f64, name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            name: name.into(),
        }
    }

    /// Geographic centroid of India, used when no position can be detected
    pub fn default_india() -> Self {
        Self::new(20.5937, 78.9629, "Default location (India)")
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Bare latitude/longitude pair as reported by a position source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn labeled(self, name: impl Into<String>) -> LocationPoint {
        LocationPoint::new(self.latitude, self.longitude, name)
    }
}

/// Format a coordinate the way the form fields display it (4 decimals)
pub fn format_coordinate(value: f64) -> String {
    format!("{:.4}", value)
}

/// Short label for a manually selected point (2 decimals)
pub fn manual_location_label(coords: Coordinates) -> String {
    format!(
        "Selected location ({:.2}, {:.2})",
        coords.latitude, coords.longitude
    )
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate: {:?}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_string_coordinates() {
        let point: LocationPoint =
            serde_json::from_str(r#"{"name":"Farm","lat":"18.7883","lon":" 98.9853"}"#).unwrap();
        assert_eq!(point.latitude, 18.7883);
        assert_eq!(point.longitude, 98.9853);
        assert_eq!(point.name, "Farm");
    }

    #[test]
    fn test_accepts_numeric_coordinates() {
        let point: LocationPoint =
            serde_json::from_str(r#"{"name":"Farm","lat":12.5,"lon":77}"#).unwrap();
        assert_eq!(point.latitude, 12.5);
        assert_eq!(point.longitude, 77.0);
    }

    #[test]
    fn test_rejects_non_numeric_coordinates() {
        let result: Result<LocationPoint, _> =
            serde_json::from_str(r#"{"name":"Farm","lat":"north","lon":"77"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_wire_names() {
        let json = serde_json::to_value(LocationPoint::new(1.0, 2.0, "x")).unwrap();
        assert_eq!(json["lat"], 1.0);
        assert_eq!(json["lon"], 2.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(format_coordinate(20.59371), "20.5937");
        assert_eq!(
            manual_location_label(Coordinates::new(20.5937, 78.9629)),
            "Selected location (20.59, 78.96)"
        );
    }
}
