//! The location session state machine.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};

use crate::{
    AccuracyTier, AuthorizationStatus, LocationDelegate, LocationError, LocationObserver,
    LocationResult, NeededPermission, ObserverRegistry, PermissionState, PlatformError,
    PlatformEvent, PlatformEventReceiver, PlatformLocationService, Position, ReverseGeocoder,
    SessionConfig,
};

/// Where the session is in its update lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No updates running and none pending.
    #[default]
    Idle,
    /// Waiting for the user to answer an authorization request.
    AwaitingAuthorization,
    /// Continuous updates are running.
    Polling,
}

#[derive(Debug, Default)]
struct SessionState {
    phase: SessionPhase,
    permission: PermissionState,
    pending_start: bool,
    position: Option<Position>,
    city_name: Option<String>,
    config: SessionConfig,
}

/// Adapter between a platform location service and a set of observers.
///
/// The session is meant to be created once by the application and shared
/// behind an [`Arc`]. Platform events reach it through
/// [`LocationDelegate::on_event`] or through [`LocationSession::pump`].
///
/// State is guarded by a mutex that is never held while the platform or an
/// observer is called, so both may call back into the session.
pub struct LocationSession {
    platform: Arc<dyn PlatformLocationService>,
    geocoder: Arc<dyn ReverseGeocoder>,
    observers: ObserverRegistry,
    state: Mutex<SessionState>,
}

impl fmt::Debug for LocationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationSession")
            .field("observers", &self.observers)
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}

impl LocationSession {
    /// Creates a session over the given platform collaborators.
    #[must_use]
    pub fn new(
        platform: Arc<dyn PlatformLocationService>,
        geocoder: Arc<dyn ReverseGeocoder>,
        config: SessionConfig,
    ) -> Self {
        Self {
            platform,
            geocoder,
            observers: ObserverRegistry::new(),
            state: Mutex::new(SessionState {
                config,
                ..SessionState::default()
            }),
        }
    }

    /// Registers an observer. Returns `false` if it was already registered.
    pub fn add_observer(&self, observer: &Arc<dyn LocationObserver>) -> bool {
        self.observers.add(observer)
    }

    /// Unregisters an observer, stopping updates if no live observer is left.
    pub fn remove_observer(&self, observer: &Arc<dyn LocationObserver>) {
        if self.observers.remove(observer) {
            debug!("last observer removed");
            self.stop_updating_location();
        }
    }

    /// Unregisters every observer and stops updates.
    pub fn remove_all_observers(&self) {
        self.observers.remove_all();
        self.stop_updating_location();
    }

    /// Number of live observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Asks the platform for authorization without starting updates.
    ///
    /// Does nothing if authorization is already granted.
    pub fn request_authorization(&self) {
        if self.platform.authorization_status().is_granted() {
            debug!("authorization already granted");
            return;
        }

        let permission = {
            let mut state = self.state();
            state.pending_start = false;
            state.phase = SessionPhase::AwaitingAuthorization;
            state.config.needed_permission
        };
        debug!("requesting {permission:?} authorization");
        self.platform.request_authorization(permission);
    }

    /// Starts continuous updates, requesting authorization first if needed.
    ///
    /// When authorization is missing the start is remembered and performed as
    /// soon as the platform reports a grant.
    pub fn start_updating_location(&self) {
        if self.platform.authorization_status().is_granted() {
            self.begin_updates();
            return;
        }

        let permission = {
            let mut state = self.state();
            state.pending_start = true;
            state.phase = SessionPhase::AwaitingAuthorization;
            state.config.needed_permission
        };
        debug!("requesting {permission:?} authorization before starting updates");
        self.platform.request_authorization(permission);
    }

    /// Stops continuous updates.
    pub fn stop_updating_location(&self) {
        self.state().phase = SessionPhase::Idle;
        info!("stopping location updates");
        self.platform.stop_updates();
    }

    /// Resolves the city name for the current position and broadcasts it.
    ///
    /// Uses the last reported position, or the platform's last known position
    /// if none was reported yet. The geocoder is called exactly once. On
    /// success the first locality becomes the cached city name; on failure or
    /// an empty answer the previous name is kept. Either way every observer
    /// receives the cached name once, and it is returned.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::NoPosition`] if no position is known at all.
    /// Geocoding failures are not errors.
    pub async fn resolve_city_name(&self) -> LocationResult<Option<String>> {
        let cached = self.state().position;
        let position = cached
            .or_else(|| self.platform.last_known_position())
            .ok_or(LocationError::NoPosition)?;

        let result = self.geocoder.resolve(position).await;

        let city_name = {
            let mut state = self.state();
            match result {
                Ok(localities) => match localities.into_iter().next() {
                    Some(locality) => state.city_name = Some(locality),
                    None => debug!("no locality for {position:?}"),
                },
                Err(err) => warn!("reverse geocoding failed: {err}"),
            }
            state.city_name.clone()
        };

        for observer in self.observers.snapshot() {
            observer.on_city_name_updated(city_name.as_deref());
        }
        Ok(city_name)
    }

    /// Applies one platform event.
    pub fn handle_event(&self, event: PlatformEvent) {
        match event {
            PlatformEvent::AuthorizationChanged(status) => self.authorization_changed(status),
            PlatformEvent::PositionsUpdated(positions) => self.positions_updated(&positions),
            PlatformEvent::UpdateFailed(error) => self.update_failed(error),
        }
    }

    /// Applies events from `receiver` in order until every sender is dropped.
    pub async fn pump(&self, receiver: PlatformEventReceiver) {
        while let Some(event) = receiver.recv().await {
            self.handle_event(event);
        }
        debug!("platform event channel closed");
    }

    /// Tracked permission state.
    #[must_use]
    pub fn permission(&self) -> PermissionState {
        self.state().permission
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state().phase
    }

    /// Whether updates will start once authorization is granted.
    #[must_use]
    pub fn is_start_pending(&self) -> bool {
        self.state().pending_start
    }

    /// Last reported position.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.state().position
    }

    /// Last resolved city name.
    #[must_use]
    pub fn city_name(&self) -> Option<String> {
        self.state().city_name.clone()
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.state().config
    }

    /// Sets the accuracy tier used the next time updates start.
    pub fn set_accuracy_tier(&self, tier: AccuracyTier) {
        self.state().config.accuracy_tier = tier;
    }

    /// Sets the permission level requested from the platform.
    pub fn set_needed_permission(&self, permission: NeededPermission) {
        self.state().config.needed_permission = permission;
    }

    /// Allows or forbids background updates the next time updates start.
    pub fn set_allows_background_updates(&self, allowed: bool) {
        self.state().config.allows_background_updates = allowed;
    }

    fn begin_updates(&self) {
        let config = {
            let mut state = self.state();
            state.phase = SessionPhase::Polling;
            state.pending_start = false;
            state.config.update_config()
        };
        info!(
            "starting location updates ({}, {}m)",
            config.precision, config.min_movement_meters
        );
        self.platform.start_updates(&config);
    }

    fn authorization_changed(&self, status: AuthorizationStatus) {
        let permission = PermissionState::from(status);
        let resume = {
            let mut state = self.state();
            state.permission = permission;
            let resume = status.is_granted() && state.pending_start;
            if resume {
                state.pending_start = false;
            } else if status.is_granted() && state.phase == SessionPhase::AwaitingAuthorization {
                state.phase = SessionPhase::Idle;
            }
            resume
        };
        debug!("authorization changed to {status:?}");

        for observer in self.observers.snapshot() {
            observer.on_permission_changed(permission);
        }

        if self.observers.is_empty() {
            self.state().phase = SessionPhase::Idle;
            self.platform.stop_updates();
        }

        if resume {
            self.begin_updates();
        }
    }

    fn positions_updated(&self, positions: &[Position]) {
        if self.observers.is_empty() {
            debug!("position update with no observers");
            self.stop_updating_location();
            return;
        }

        let Some(&position) = positions.last() else {
            warn!("ignoring empty position update");
            return;
        };
        self.state().position = Some(position);

        for observer in self.observers.snapshot() {
            observer.on_position_updated(position);
        }
    }

    fn update_failed(&self, error: PlatformError) {
        warn!("location update failed: {error}");
        let error = LocationError::Platform(error);
        for observer in self.observers.snapshot() {
            observer.on_error(&error);
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("session state mutex poisoned")
    }
}

impl LocationDelegate for LocationSession {
    fn on_event(&self, event: PlatformEvent) {
        self.handle_event(event);
    }
}
