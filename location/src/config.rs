//! Accuracy tiers and the update configuration handed to the platform.

use serde::{Deserialize, Serialize};

use crate::{LocationError, LocationResult, NeededPermission};

/// A precision/power tradeoff level chosen by the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccuracyTier {
    /// Highest precision, intended for turn-by-turn navigation.
    BestForNavigation,
    /// Best precision the device offers.
    #[default]
    Best,
    /// Within ten meters.
    TenMeters,
    /// Within a hundred meters.
    HundredMeters,
    /// Within a kilometer.
    OneKilometer,
    /// Within three kilometers.
    ThreeKilometers,
}

impl AccuracyTier {
    /// Precision the platform is asked for.
    #[must_use]
    pub const fn precision(self) -> Precision {
        match self {
            Self::BestForNavigation => Precision::NavigationGrade,
            Self::Best => Precision::Best,
            Self::TenMeters => Precision::TenMeters,
            Self::HundredMeters => Precision::HundredMeters,
            Self::OneKilometer => Precision::OneKilometer,
            Self::ThreeKilometers => Precision::ThreeKilometers,
        }
    }

    /// Minimum movement in meters before the platform reports a new position.
    #[must_use]
    pub const fn min_movement_meters(self) -> f64 {
        match self {
            Self::BestForNavigation => 2.0,
            Self::Best => 5.0,
            Self::TenMeters => 10.0,
            Self::HundredMeters => 35.0,
            Self::OneKilometer => 300.0,
            Self::ThreeKilometers => 1000.0,
        }
    }
}

/// Desired accuracy label understood by platform backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    /// Navigation-grade accuracy.
    #[serde(rename = "navigation-grade")]
    NavigationGrade,
    /// Best available accuracy.
    #[serde(rename = "best")]
    Best,
    /// Ten meter accuracy.
    #[serde(rename = "10m")]
    TenMeters,
    /// Hundred meter accuracy.
    #[serde(rename = "100m")]
    HundredMeters,
    /// One kilometer accuracy.
    #[serde(rename = "1km")]
    OneKilometer,
    /// Three kilometer accuracy.
    #[serde(rename = "3km")]
    ThreeKilometers,
}

impl Precision {
    /// Returns the label used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NavigationGrade => "navigation-grade",
            Self::Best => "best",
            Self::TenMeters => "10m",
            Self::HundredMeters => "100m",
            Self::OneKilometer => "1km",
            Self::ThreeKilometers => "3km",
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity hint that lets the platform tune its power strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityProfile {
    /// Vehicular navigation.
    #[default]
    AutomotiveNavigation,
}

impl ActivityProfile {
    /// Returns the label used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutomotiveNavigation => "automotive-navigation",
        }
    }
}

/// Parameters for continuous location updates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Requested precision.
    pub precision: Precision,
    /// Minimum movement in meters between reported positions.
    pub min_movement_meters: f64,
    /// Whether the platform may pause updates when the device looks idle.
    pub pauses_on_idle: bool,
    /// Activity hint.
    pub activity_profile: ActivityProfile,
    /// Whether updates continue while the application is in the background.
    pub allows_background_updates: bool,
}

impl UpdateConfig {
    /// Builds the configuration for an accuracy tier.
    #[must_use]
    pub const fn for_tier(tier: AccuracyTier, allows_background_updates: bool) -> Self {
        Self {
            precision: tier.precision(),
            min_movement_meters: tier.min_movement_meters(),
            pauses_on_idle: false,
            activity_profile: ActivityProfile::AutomotiveNavigation,
            allows_background_updates,
        }
    }

    /// Serializes the configuration for a platform bridge.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Config`] if serialization fails.
    pub fn to_json(&self) -> LocationResult<String> {
        serde_json::to_string(self).map_err(|err| LocationError::Config {
            message: err.to_string(),
        })
    }
}

/// Application-level session settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionConfig {
    /// Permission level requested from the platform.
    pub needed_permission: NeededPermission,
    /// Accuracy tier used when updates start.
    pub accuracy_tier: AccuracyTier,
    /// Whether updates continue in the background.
    pub allows_background_updates: bool,
}

impl SessionConfig {
    /// Sets the permission level to request.
    #[must_use]
    pub const fn with_needed_permission(mut self, permission: NeededPermission) -> Self {
        self.needed_permission = permission;
        self
    }

    /// Sets the accuracy tier.
    #[must_use]
    pub const fn with_accuracy_tier(mut self, tier: AccuracyTier) -> Self {
        self.accuracy_tier = tier;
        self
    }

    /// Enables or disables background updates.
    #[must_use]
    pub const fn with_background_updates(mut self, allowed: bool) -> Self {
        self.allows_background_updates = allowed;
        self
    }

    /// Parses settings from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Config`] if the document is not valid.
    pub fn from_json(json: &str) -> LocationResult<Self> {
        serde_json::from_str(json).map_err(|err| LocationError::Config {
            message: err.to_string(),
        })
    }

    /// Update configuration derived from these settings.
    #[must_use]
    pub const fn update_config(&self) -> UpdateConfig {
        UpdateConfig::for_tier(self.accuracy_tier, self.allows_background_updates)
    }
}
