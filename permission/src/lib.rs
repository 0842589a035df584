//! Location authorization states.
//!
//! This crate holds the small vocabulary shared between a platform location
//! backend and the session that consumes it: what the platform reports
//! ([`AuthorizationStatus`]), what the session tracks ([`PermissionState`]),
//! and what the application asks for ([`NeededPermission`]).

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// The authorization status as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorizationStatus {
    /// The user has not been asked yet.
    NotDetermined,
    /// Access is restricted (e.g., parental controls).
    Restricted,
    /// The user denied access.
    Denied,
    /// Access granted at all times, including in the background.
    AuthorizedAlways,
    /// Access granted while the application is in use.
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    /// Returns `true` if the platform allows location updates.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::AuthorizedAlways | Self::AuthorizedWhenInUse)
    }
}

/// The permission state tracked by a location session.
///
/// Starts at [`PermissionState::NotDetermined`] and afterwards mirrors the
/// last status the platform reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionState {
    /// Always-on access.
    Always,
    /// Access while in use.
    WhenInUse,
    /// Access denied or restricted.
    Denied,
    /// No status has been reported yet.
    #[default]
    NotDetermined,
}

impl PermissionState {
    /// Returns `true` for [`PermissionState::Always`] and [`PermissionState::WhenInUse`].
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Always | Self::WhenInUse)
    }
}

impl From<AuthorizationStatus> for PermissionState {
    /// Maps a reported status. Anything other than an authorized status,
    /// including `NotDetermined`, maps to `Denied`.
    fn from(status: AuthorizationStatus) -> Self {
        match status {
            AuthorizationStatus::AuthorizedAlways => Self::Always,
            AuthorizationStatus::AuthorizedWhenInUse => Self::WhenInUse,
            AuthorizationStatus::NotDetermined
            | AuthorizationStatus::Restricted
            | AuthorizationStatus::Denied => Self::Denied,
        }
    }
}

/// The authorization level an application asks the platform for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeededPermission {
    /// Ask for background access.
    Always,
    /// Ask for foreground access only.
    #[default]
    WhenInUse,
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::WhenInUse => write!(f, "when in use"),
            Self::Denied => write!(f, "denied"),
            Self::NotDetermined => write!(f, "not determined"),
        }
    }
}
