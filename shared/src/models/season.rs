//! Agricultural cropping seasons

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Cropping season of the Indian agricultural calendar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Monsoon-sown, June to October
    Kharif,
    /// Winter-sown, November to March
    Rabi,
    /// Short summer window, April and May
    Zaid,
}

impl Season {
    /// Classify a calendar month (1 = January)
    pub fn from_month(month: u32) -> Self {
        match month {
            6..=10 => Season::Kharif,
            11 | 12 | 1..=3 => Season::Rabi,
            _ => Season::Zaid,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// Season for today's local date. Recomputed on every call.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Zaid => "zaid",
        }
    }

    /// Status line shown once the season has been detected
    pub fn detected_label(&self) -> String {
        format!("🌱 {} season detected", self.as_str())
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kharif" => Ok(Season::Kharif),
            "rabi" => Ok(Season::Rabi),
            "zaid" => Ok(Season::Zaid),
            other => Err(format!("unknown season: {}", other)),
        }
    }
}
