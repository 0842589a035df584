//! Observers and the registry that holds them.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use crate::{LocationError, PermissionState, Position};

/// Receives events from a [`LocationSession`](crate::LocationSession).
///
/// Callbacks run synchronously on the thread that delivered the triggering
/// event, one observer after another. A slow observer delays everyone after it.
pub trait LocationObserver: Send + Sync {
    /// The tracked permission state changed.
    fn on_permission_changed(&self, permission: PermissionState);

    /// A new position was reported.
    fn on_position_updated(&self, position: Position);

    /// The platform failed to deliver updates.
    fn on_error(&self, error: &LocationError);

    /// A city name resolution finished. `None` if no name was ever resolved.
    fn on_city_name_updated(&self, _city_name: Option<&str>) {}
}

/// Insertion-ordered set of observers, compared by identity.
///
/// The registry keeps [`Weak`] handles only; dropping the last strong
/// reference to an observer removes it from every registry it was added to.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Mutex<Vec<Weak<dyn LocationObserver>>>,
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("len", &self.len())
            .finish()
    }
}

fn same_observer(handle: &Weak<dyn LocationObserver>, observer: &Arc<dyn LocationObserver>) -> bool {
    std::ptr::addr_eq(handle.as_ptr(), Arc::as_ptr(observer))
}

impl ObserverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer. Returns `false` if it was already registered.
    pub fn add(&self, observer: &Arc<dyn LocationObserver>) -> bool {
        let mut observers = self.lock();
        prune(&mut observers);
        if observers.iter().any(|handle| same_observer(handle, observer)) {
            return false;
        }
        observers.push(Arc::downgrade(observer));
        true
    }

    /// Removes an observer and returns `true` if the registry is now empty.
    ///
    /// The result reflects the set after the call even when `observer` was
    /// not registered, so removing a stranger after every registered
    /// observer was dropped still reports `true`.
    pub fn remove(&self, observer: &Arc<dyn LocationObserver>) -> bool {
        let mut observers = self.lock();
        prune(&mut observers);
        if let Some(index) = observers
            .iter()
            .position(|handle| same_observer(handle, observer))
        {
            observers.remove(index);
        }
        observers.is_empty()
    }

    /// Removes every observer.
    pub fn remove_all(&self) {
        self.lock().clear();
    }

    /// Returns `true` if no live observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let mut observers = self.lock();
        prune(&mut observers);
        observers.is_empty()
    }

    /// Number of live observers.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut observers = self.lock();
        prune(&mut observers);
        observers.len()
    }

    /// Live observers in insertion order.
    ///
    /// Delivery iterates over the snapshot so observers may add or remove
    /// themselves from inside a callback.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<dyn LocationObserver>> {
        self.lock().iter().filter_map(Weak::upgrade).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Weak<dyn LocationObserver>>> {
        self.observers
            .lock()
            .expect("observer registry mutex poisoned")
    }
}

fn prune(observers: &mut Vec<Weak<dyn LocationObserver>>) {
    observers.retain(|handle| handle.strong_count() > 0);
}
