//! Observer fan-out over platform location services.
//!
//! A [`LocationSession`] wraps a [`PlatformLocationService`] and a
//! [`ReverseGeocoder`]. It tracks authorization, requests it when needed,
//! starts and stops continuous updates tuned by an [`AccuracyTier`], and
//! delivers every event to the [`LocationObserver`]s registered with it.
//! Updates are stopped as soon as no observer is left.

#![warn(missing_docs)]

mod config;
mod observer;
mod platform;
mod session;

use serde::{Deserialize, Serialize};

pub use config::{AccuracyTier, ActivityProfile, Precision, SessionConfig, UpdateConfig};
pub use locwatch_permission::{AuthorizationStatus, NeededPermission, PermissionState};
pub use observer::{LocationObserver, ObserverRegistry};
pub use platform::{
    ChannelDelegate, LocationDelegate, PlatformEvent, PlatformEventReceiver,
    PlatformLocationService, ReverseGeocoder, event_channel,
};
pub use session::{LocationSession, SessionPhase};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
}

impl Position {
    /// Creates a position from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// An update failure reported by the platform.
///
/// The payload is opaque to this crate and forwarded to observers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{domain} error {code}: {message}")]
pub struct PlatformError {
    /// Platform error domain.
    pub domain: String,
    /// Platform-specific error code.
    pub code: i64,
    /// Human readable description.
    pub message: String,
}

impl PlatformError {
    /// Creates a new platform error.
    pub fn new(domain: impl Into<String>, code: i64, message: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            code,
            message: message.into(),
        }
    }
}

/// Errors returned by a [`ReverseGeocoder`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    /// No placemark exists for the coordinate.
    #[error("no placemark found")]
    NotFound,
    /// The geocoding service could not be reached.
    #[error("geocoder unavailable: {0}")]
    Unavailable(String),
    /// An unknown error occurred.
    #[error("unknown error: {0}")]
    Unknown(String),
}

/// Errors that can occur when working with a location session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// A city name was requested before any position was known.
    #[error("no position available")]
    NoPosition,
    /// The platform failed to deliver updates.
    #[error("location update failed: {0}")]
    Platform(#[from] PlatformError),
    /// A configuration document could not be parsed or produced.
    #[error("invalid configuration: {message}")]
    Config {
        /// Parser message.
        message: String,
    },
}

/// Result alias for location operations.
pub type LocationResult<T> = Result<T, LocationError>;
