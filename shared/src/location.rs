//! Location acquisition state machine
//!
//! The device-facing part (asking the platform for a fix, applying the
//! timeout) lives with the caller. This module owns the states, the
//! failure taxonomy with its guidance, and coordinate validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::i18n::Localizer;

/// Fix timeout used when nothing else is configured
pub const DEFAULT_FIX_TIMEOUT: Duration = Duration::from_secs(15);

/// A validated device position. Held in memory only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeolocationReading {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy radius in metres
    pub accuracy: Option<f64>,
    pub captured_at: Option<DateTime<Utc>>,
}

/// Position as reported by the platform, before validation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawPosition {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub captured_at: Option<DateTime<Utc>>,
}

impl RawPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Default::default()
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }
}

/// Result of the optional permission query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Prompt,
    Denied,
}

/// Options passed with every fix request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Zero disables cached positions
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: DEFAULT_FIX_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

/// Failure reported by the platform while obtaining a fix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timeout")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

/// Why a detection attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("geolocation is not supported on this device")]
    Unsupported,
    /// The permission query reported `denied`; no fix was attempted
    #[error("location permission is blocked")]
    PermissionBlocked,
    #[error("location permission was denied")]
    PermissionDenied,
    #[error("location unavailable")]
    PositionUnavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("failed to get location: {0}")]
    Other(String),
    #[error("coordinates (0, 0) were reported")]
    SentinelCoordinates,
    #[error("coordinates are missing or not numbers")]
    MissingCoordinates,
    #[error("coordinates are out of range")]
    OutOfRange,
}

impl From<PositionError> for LocationError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::PermissionDenied => LocationError::PermissionDenied,
            PositionError::PositionUnavailable => LocationError::PositionUnavailable,
            PositionError::Timeout => LocationError::Timeout,
            PositionError::Other(msg) => LocationError::Other(msg),
        }
    }
}

impl LocationError {
    /// Dictionary key of the guidance shown to the farmer
    pub fn message_key(&self) -> &'static str {
        match self {
            LocationError::Unsupported => "location.error.unsupported",
            LocationError::PermissionBlocked => "location.error.blocked",
            LocationError::PermissionDenied => "location.error.denied",
            LocationError::PositionUnavailable => "location.error.unavailable",
            LocationError::Timeout => "location.error.timeout",
            LocationError::Other(_) => "location.error.other",
            LocationError::SentinelCoordinates => "location.error.sentinel",
            LocationError::MissingCoordinates => "location.error.missing",
            LocationError::OutOfRange => "location.error.range",
        }
    }

    /// Localized, cause-specific guidance
    pub fn guidance(&self, localizer: &Localizer) -> String {
        match self {
            LocationError::Other(msg) => localizer.format(self.message_key(), &[("message", msg)]),
            _ => localizer.t(self.message_key()).to_string(),
        }
    }

    pub fn is_permission_error(&self) -> bool {
        matches!(
            self,
            LocationError::PermissionBlocked | LocationError::PermissionDenied
        )
    }
}

/// Validate a platform position into a reading
pub fn validate_reading(raw: &RawPosition) -> Result<GeolocationReading, LocationError> {
    let (latitude, longitude) = match (raw.latitude, raw.longitude) {
        (Some(lat), Some(lon)) if !lat.is_nan() && !lon.is_nan() => (lat, lon),
        _ => return Err(LocationError::MissingCoordinates),
    };

    if latitude == 0.0 && longitude == 0.0 {
        return Err(LocationError::SentinelCoordinates);
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(LocationError::OutOfRange);
    }

    Ok(GeolocationReading {
        latitude,
        longitude,
        accuracy: raw.accuracy,
        captured_at: raw.captured_at,
    })
}

// ============================================================================
// State machine
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LocationState {
    #[default]
    Idle,
    RequestingPermission,
    AwaitingFix,
    Succeeded(GeolocationReading),
    Failed(LocationError),
}

impl LocationState {
    pub fn name(&self) -> &'static str {
        match self {
            LocationState::Idle => "idle",
            LocationState::RequestingPermission => "requesting-permission",
            LocationState::AwaitingFix => "awaiting-fix",
            LocationState::Succeeded(_) => "succeeded",
            LocationState::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LocationState::Succeeded(_) | LocationState::Failed(_))
    }
}

/// Pure transition logic for one detection attempt at a time.
///
/// `begin` always restarts from idle and drops the previous reading.
#[derive(Debug, Default)]
pub struct LocationMachine {
    state: LocationState,
    reading: Option<GeolocationReading>,
}

impl LocationMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LocationState {
        &self.state
    }

    /// Reading from the last successful attempt
    pub fn reading(&self) -> Option<&GeolocationReading> {
        self.reading.as_ref()
    }

    /// Start an attempt. Returns false (and fails) when the device has no
    /// geolocation capability.
    pub fn begin(&mut self, supported: bool) -> bool {
        self.state = LocationState::Idle;
        self.reading = None;
        if !supported {
            self.state = LocationState::Failed(LocationError::Unsupported);
            return false;
        }
        self.state = LocationState::RequestingPermission;
        true
    }

    /// Apply the permission query result (`None` when the query is not
    /// available). Returns true when a fix should be requested.
    pub fn permission_checked(&mut self, permission: Option<PermissionState>) -> bool {
        if self.state != LocationState::RequestingPermission {
            return false;
        }
        match permission {
            Some(PermissionState::Denied) => {
                self.state = LocationState::Failed(LocationError::PermissionBlocked);
                false
            }
            Some(PermissionState::Granted) | Some(PermissionState::Prompt) | None => {
                self.state = LocationState::AwaitingFix;
                true
            }
        }
    }

    /// Apply the outcome of the fix request
    pub fn fix_received(&mut self, outcome: Result<RawPosition, PositionError>) -> &LocationState {
        if self.state != LocationState::AwaitingFix {
            return &self.state;
        }
        let result = outcome
            .map_err(LocationError::from)
            .and_then(|raw| validate_reading(&raw));
        match result {
            Ok(reading) => {
                self.reading = Some(reading);
                self.state = LocationState::Succeeded(reading);
            }
            Err(err) => self.state = LocationState::Failed(err),
        }
        &self.state
    }

    /// Final outcome once the machine is terminal
    pub fn outcome(&self) -> Option<Result<GeolocationReading, LocationError>> {
        match &self.state {
            LocationState::Succeeded(reading) => Some(Ok(*reading)),
            LocationState::Failed(err) => Some(Err(err.clone())),
            _ => None,
        }
    }
}
