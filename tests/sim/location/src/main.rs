//! Scripted simulation for locwatch-location.
//!
//! Run with: cargo run -p locwatch-location-sim

use std::sync::{Arc, Mutex, Weak};

use futures::future::BoxFuture;
use locwatch_location::{
    AccuracyTier, AuthorizationStatus, GeocodeError, LocationDelegate, LocationError,
    LocationObserver, LocationSession, NeededPermission, PermissionState, PlatformEvent,
    PlatformLocationService, Position, ReverseGeocoder, SessionConfig, UpdateConfig,
};

/// Platform that grants every request and replays a fixed route.
struct ScriptedPlatform {
    status: Mutex<AuthorizationStatus>,
    delegate: Mutex<Option<Weak<dyn LocationDelegate>>>,
    route: Vec<Position>,
}

impl ScriptedPlatform {
    fn new(route: Vec<Position>) -> Self {
        Self {
            status: Mutex::new(AuthorizationStatus::NotDetermined),
            delegate: Mutex::new(None),
            route,
        }
    }

    fn set_delegate(&self, delegate: Weak<dyn LocationDelegate>) {
        *self.delegate.lock().unwrap() = Some(delegate);
    }

    fn emit(&self, event: PlatformEvent) {
        let delegate = self.delegate.lock().unwrap().as_ref().and_then(Weak::upgrade);
        if let Some(delegate) = delegate {
            delegate.on_event(event);
        }
    }
}

impl PlatformLocationService for ScriptedPlatform {
    fn authorization_status(&self) -> AuthorizationStatus {
        *self.status.lock().unwrap()
    }

    fn request_authorization(&self, permission: NeededPermission) {
        println!("[platform] authorization requested: {permission:?}");
        let status = match permission {
            NeededPermission::Always => AuthorizationStatus::AuthorizedAlways,
            NeededPermission::WhenInUse => AuthorizationStatus::AuthorizedWhenInUse,
        };
        *self.status.lock().unwrap() = status;
        self.emit(PlatformEvent::AuthorizationChanged(status));
    }

    fn start_updates(&self, config: &UpdateConfig) {
        println!(
            "[platform] start updates: {} / {}m / background={}",
            config.precision, config.min_movement_meters, config.allows_background_updates
        );
        match config.to_json() {
            Ok(json) => println!("[platform] bridge payload: {json}"),
            Err(e) => println!("[platform] bridge payload unavailable: {e}"),
        }
        for position in &self.route {
            self.emit(PlatformEvent::PositionsUpdated(vec![*position]));
        }
    }

    fn stop_updates(&self) {
        println!("[platform] stop updates");
    }

    fn last_known_position(&self) -> Option<Position> {
        self.route.last().copied()
    }
}

struct TableGeocoder;

impl ReverseGeocoder for TableGeocoder {
    fn resolve(&self, position: Position) -> BoxFuture<'static, Result<Vec<String>, GeocodeError>> {
        Box::pin(async move {
            if position.latitude > 39.0 {
                Ok(vec!["Springfield".to_owned()])
            } else {
                Err(GeocodeError::NotFound)
            }
        })
    }
}

struct Printer;

impl LocationObserver for Printer {
    fn on_permission_changed(&self, permission: PermissionState) {
        println!("  permission: {permission}");
    }

    fn on_position_updated(&self, position: Position) {
        println!(
            "  position:   {:.4}°, {:.4}°",
            position.latitude, position.longitude
        );
    }

    fn on_error(&self, error: &LocationError) {
        println!("  error:      {error}");
    }

    fn on_city_name_updated(&self, city_name: Option<&str>) {
        println!("  city:       {}", city_name.unwrap_or("(unknown)"));
    }
}

#[tokio::main]
async fn main() {
    println!("=== Locwatch Location Simulation ===\n");

    let platform = Arc::new(ScriptedPlatform::new(vec![
        Position::new(39.7990, -89.6440),
        Position::new(39.7817, -89.6501),
    ]));
    let config = SessionConfig::default().with_accuracy_tier(AccuracyTier::TenMeters);
    let session = Arc::new(LocationSession::new(
        platform.clone(),
        Arc::new(TableGeocoder),
        config,
    ));
    let delegate: Arc<dyn LocationDelegate> = session.clone();
    platform.set_delegate(Arc::downgrade(&delegate));

    let printer: Arc<dyn LocationObserver> = Arc::new(Printer);
    session.add_observer(&printer);

    println!("Starting updates...");
    session.start_updating_location();
    println!("Session phase: {:?}\n", session.phase());

    println!("Resolving city name...");
    match session.resolve_city_name().await {
        Ok(Some(city)) => println!("✓ Resolved: {city}\n"),
        Ok(None) => println!("✗ No city name\n"),
        Err(e) => println!("✗ Failed to resolve city name: {e}\n"),
    }

    println!("Removing observer...");
    session.remove_observer(&printer);
    println!("Session phase: {:?}", session.phase());
}
