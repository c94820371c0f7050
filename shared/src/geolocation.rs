//! Geolocation resolution with tiered fallback
//!
//! The browser's position API is modelled as an async [`PositionSource`] so
//! the fallback chain reads as sequential awaits:
//!
//! ```text
//! Unresolved -> Detecting(High) -> Resolved
//!                               \-> Detecting(Low) -> Resolved
//!                                                  \-> DefaultUsed
//! ```
//!
//! A source that is not available at all goes straight to `DefaultUsed`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{manual_location_label, Coordinates, LocationPoint};

/// Label given to a position reported by the device
pub const DETECTED_LOCATION_NAME: &str = "Detected location";

/// Accuracy tier of a position request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    High,
    Low,
}

/// Options passed to the position source for a single attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRequest {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Maximum age of a cached position; zero forces a fresh reading
    pub maximum_age: Duration,
}

impl PositionRequest {
    pub fn for_tier(accuracy: Accuracy, timeout: Duration) -> Self {
        Self {
            high_accuracy: accuracy == Accuracy::High,
            timeout,
            maximum_age: Duration::ZERO,
        }
    }
}

/// Why a position attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("position unavailable: {0}")]
    Unavailable(String),

    #[error("timed out waiting for position")]
    Timeout,

    #[error("geolocation is not supported")]
    NotSupported,
}

impl PositionError {
    /// Map a W3C `GeolocationPositionError.code` to an error
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            1 => PositionError::PermissionDenied(message.into()),
            3 => PositionError::Timeout,
            _ => PositionError::Unavailable(message.into()),
        }
    }
}

/// Something that can report the device position
#[allow(async_fn_in_trait)]
pub trait PositionSource {
    /// Whether the capability exists at all
    fn is_available(&self) -> bool;

    async fn current_position(&self, request: PositionRequest)
        -> Result<Coordinates, PositionError>;
}

/// Resolution state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "state", content = "accuracy")]
pub enum GeolocationState {
    Unresolved,
    Detecting(Accuracy),
    Resolved,
    DefaultUsed,
}

/// Input driving a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationEvent {
    /// The capability is missing
    Unavailable,
    /// Begin the first, high accuracy attempt
    Start,
    PositionFound,
    /// The current attempt failed; `retry` tells whether a low accuracy
    /// attempt is configured
    AttemptFailed { retry: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid geolocation transition from {from:?} on {event:?}")]
pub struct TransitionError {
    pub from: GeolocationState,
    pub event: GeolocationEvent,
}

impl GeolocationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GeolocationState::Resolved | GeolocationState::DefaultUsed)
    }

    pub fn advance(self, event: GeolocationEvent) -> Result<Self, TransitionError> {
        use GeolocationEvent as E;
        use GeolocationState as S;

        match (self, event) {
            (S::Unresolved, E::Unavailable) => Ok(S::DefaultUsed),
            (S::Unresolved, E::Start) => Ok(S::Detecting(Accuracy::High)),
            (S::Detecting(_), E::PositionFound) => Ok(S::Resolved),
            (S::Detecting(Accuracy::High), E::AttemptFailed { retry: true }) => {
                Ok(S::Detecting(Accuracy::Low))
            }
            (S::Detecting(Accuracy::High), E::AttemptFailed { retry: false })
            | (S::Detecting(Accuracy::Low), E::AttemptFailed { .. }) => Ok(S::DefaultUsed),
            (from, event) => Err(TransitionError { from, event }),
        }
    }
}

/// How hard to try before falling back to the default point
#[derive(Debug, Clone, PartialEq)]
pub struct GeolocationPolicy {
    pub high_accuracy_timeout: Duration,
    /// Timeout of the low accuracy retry; `None` disables the retry
    pub low_accuracy_retry: Option<Duration>,
    pub default_point: LocationPoint,
}

impl GeolocationPolicy {
    /// One high accuracy attempt, then the default
    pub fn single_attempt() -> Self {
        Self {
            low_accuracy_retry: None,
            ..Self::default()
        }
    }

    pub fn with_default_point(mut self, point: LocationPoint) -> Self {
        self.default_point = point;
        self
    }
}

impl Default for GeolocationPolicy {
    fn default() -> Self {
        Self {
            high_accuracy_timeout: Duration::from_secs(10),
            low_accuracy_retry: Some(Duration::from_secs(15)),
            default_point: LocationPoint::default_india(),
        }
    }
}

/// Outcome of the fallback chain
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Either `Resolved` or `DefaultUsed`
    pub state: GeolocationState,
    pub point: LocationPoint,
    /// Failures encountered along the way, in order
    pub errors: Vec<PositionError>,
    /// Every state visited, starting at `Unresolved`
    pub path: Vec<GeolocationState>,
}

impl Resolution {
    pub fn used_default(&self) -> bool {
        self.state == GeolocationState::DefaultUsed
    }
}

/// Run the fallback chain against `source` until a terminal state
pub async fn resolve_location<S: PositionSource>(
    source: &S,
    policy: &GeolocationPolicy,
) -> Resolution {
    let mut state = GeolocationState::Unresolved;
    let mut path = vec![state];
    let mut errors = Vec::new();
    let mut found = None;

    let mut event = if source.is_available() {
        GeolocationEvent::Start
    } else {
        errors.push(PositionError::NotSupported);
        GeolocationEvent::Unavailable
    };

    while !state.is_terminal() {
        state = match state.advance(event) {
            Ok(next) => next,
            // every event below is produced for the state it is applied to
            Err(_) => GeolocationState::DefaultUsed,
        };
        path.push(state);

        let GeolocationState::Detecting(accuracy) = state else {
            break;
        };
        let timeout = match accuracy {
            Accuracy::High => policy.high_accuracy_timeout,
            Accuracy::Low => policy
                .low_accuracy_retry
                .unwrap_or(policy.high_accuracy_timeout),
        };

        event = match source
            .current_position(PositionRequest::for_tier(accuracy, timeout))
            .await
        {
            Ok(coords) => {
                found = Some(coords);
                GeolocationEvent::PositionFound
            }
            Err(err) => {
                errors.push(err);
                GeolocationEvent::AttemptFailed {
                    retry: accuracy == Accuracy::High && policy.low_accuracy_retry.is_some(),
                }
            }
        };
    }

    let point = match (state, found) {
        (GeolocationState::Resolved, Some(coords)) => coords.labeled(DETECTED_LOCATION_NAME),
        _ => policy.default_point.clone(),
    };

    Resolution {
        state,
        point,
        errors,
        path,
    }
}

/// How the active location was obtained
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationOrigin {
    Detected,
    Default,
    Manual,
}

/// Owner of the single active location. Later writes replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct LocationTracker {
    active: Option<(LocationPoint, LocationOrigin)>,
}

impl LocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&LocationPoint> {
        self.active.as_ref().map(|(point, _)| point)
    }

    pub fn origin(&self) -> Option<LocationOrigin> {
        self.active.as_ref().map(|(_, origin)| *origin)
    }

    /// Apply the outcome of [`resolve_location`]
    pub fn apply_resolution(&mut self, resolution: &Resolution) {
        let origin = if resolution.used_default() {
            LocationOrigin::Default
        } else {
            LocationOrigin::Detected
        };
        self.active = Some((resolution.point.clone(), origin));
    }

    /// A marker drag; always wins over whatever was there
    pub fn set_manual(&mut self, coords: Coordinates) -> &LocationPoint {
        let name = manual_location_label(coords);
        let (point, _) = self
            .active
            .insert((coords.labeled(name), LocationOrigin::Manual));
        point
    }
}
