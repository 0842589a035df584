//! # Locwatch
//!
//! Fan-out of platform location services to any number of observers.
//!
//! Locwatch sits between a platform location framework and the parts of an
//! application that care about where the device is. It tracks authorization,
//! asks for it when needed, starts and stops continuous updates with an
//! accuracy/power tier, and delivers every update to the registered observers.
//! When the last observer goes away, hardware polling is stopped.
//!
//! ## Features
//!
//! - `permission`: Permission and authorization status types.
//! - `location`: Observer registry, location session and platform traits.
//!
//! No feature is enabled by default. `location` pulls in `permission`; use
//! the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! locwatch = { version = "0.1", features = ["full"] }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use locwatch::location::{LocationObserver, LocationSession, SessionConfig};
//!
//! let session = Arc::new(LocationSession::new(platform, geocoder, SessionConfig::default()));
//! let observer: Arc<dyn LocationObserver> = Arc::new(MyObserver);
//! session.add_observer(&observer);
//! session.start_updating_location();
//! ```

#[cfg(feature = "location")]
pub use locwatch_location as location;

#[cfg(feature = "permission")]
pub use locwatch_permission as permission;
