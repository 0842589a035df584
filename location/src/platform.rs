//! Capabilities the session consumes from the platform, and the path events
//! take back from the platform into the session.

use std::fmt;

use async_channel::{Receiver, Sender, unbounded};
use futures::future::BoxFuture;
use log::warn;

use crate::{
    AuthorizationStatus, GeocodeError, NeededPermission, PlatformError, Position, UpdateConfig,
};

/// Platform location service driven by a [`LocationSession`](crate::LocationSession).
///
/// Every method is fire-and-forget. Results come back as [`PlatformEvent`]s
/// delivered to the session's [`LocationDelegate`].
pub trait PlatformLocationService: Send + Sync {
    /// Current authorization status.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Asks the user for the given permission level.
    fn request_authorization(&self, permission: NeededPermission);

    /// Starts continuous updates with the given tuning.
    fn start_updates(&self, config: &UpdateConfig);

    /// Stops continuous updates.
    fn stop_updates(&self);

    /// The most recent position the platform knows about, if any.
    fn last_known_position(&self) -> Option<Position>;
}

/// Resolves coordinates into place names.
pub trait ReverseGeocoder: Send + Sync {
    /// Returns the localities for a position, most relevant first.
    fn resolve(&self, position: Position) -> BoxFuture<'static, Result<Vec<String>, GeocodeError>>;
}

/// Events a platform backend reports to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// The authorization status changed.
    AuthorizationChanged(AuthorizationStatus),
    /// New positions arrived, oldest first.
    PositionsUpdated(Vec<Position>),
    /// Updates failed.
    UpdateFailed(PlatformError),
}

/// Receiver of platform events.
pub trait LocationDelegate: Send + Sync {
    /// Called for each event produced by the platform.
    fn on_event(&self, event: PlatformEvent);
}

/// Delegate that forwards platform events into a channel.
///
/// Hand this to a platform backend whose callbacks arrive on arbitrary
/// threads; [`LocationSession::pump`](crate::LocationSession::pump) applies
/// them one at a time on a single task.
#[derive(Clone)]
pub struct ChannelDelegate {
    sender: Sender<PlatformEvent>,
}

impl fmt::Debug for ChannelDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelDelegate").finish()
    }
}

impl LocationDelegate for ChannelDelegate {
    fn on_event(&self, event: PlatformEvent) {
        if let Err(err) = self.sender.try_send(event) {
            warn!("dropping location event: {err}");
        }
    }
}

/// Receiving half of [`event_channel`].
#[derive(Debug)]
pub struct PlatformEventReceiver {
    receiver: Receiver<PlatformEvent>,
}

impl PlatformEventReceiver {
    /// Waits for the next event. Returns `None` once every sender is gone.
    pub async fn recv(&self) -> Option<PlatformEvent> {
        self.receiver.recv().await.ok()
    }
}

/// Creates an unbounded channel for platform events.
#[must_use]
pub fn event_channel() -> (ChannelDelegate, PlatformEventReceiver) {
    let (sender, receiver) = unbounded();
    (
        ChannelDelegate { sender },
        PlatformEventReceiver { receiver },
    )
}
