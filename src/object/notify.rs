//! Per-object change notification.
//!
//! Each introspectable object owns a [`NotifyRegistry`]: a table from property
//! name to the callbacks interested in that property. Subscriptions are plain
//! ids, so the lifecycle of every registration can be followed from the code
//! that created it.

use core::cell::{Cell, RefCell};
use std::rc::Rc;

use bevy::platform::collections::HashMap;

/// Callback invoked with the name of the property that changed.
pub type NotifyCallback = Rc<dyn Fn(&str)>;

/// Handle for one registration in a [`NotifyRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Registration {
    id: SubscriptionId,
    callback: NotifyCallback,
}

/// Callback registration table for one object.
#[derive(Default)]
pub struct NotifyRegistry {
    next_id: Cell<u64>,
    by_property: RefCell<HashMap<String, Vec<Registration>>>,
    /// Reverse lookup so `unsubscribe` does not scan every property.
    owners: RefCell<HashMap<SubscriptionId, String>>,
}

impl NotifyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for changes of `property`.
    pub fn subscribe(&self, property: &str, callback: impl Fn(&str) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.by_property
            .borrow_mut()
            .entry(property.to_string())
            .or_default()
            .push(Registration {
                id,
                callback: Rc::new(callback),
            });
        self.owners.borrow_mut().insert(id, property.to_string());
        id
    }

    /// Removes a registration.
    ///
    /// Returns `false` when the id was already disconnected; that is not an error.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let Some(property) = self.owners.borrow_mut().remove(&id) else {
            return false;
        };

        let mut by_property = self.by_property.borrow_mut();
        if let Some(registrations) = by_property.get_mut(&property) {
            registrations.retain(|r| r.id != id);
            if registrations.is_empty() {
                by_property.remove(&property);
            }
        }
        true
    }

    pub fn is_connected(&self, id: SubscriptionId) -> bool {
        self.owners.borrow().contains_key(&id)
    }

    /// Number of live registrations for `property`.
    pub fn subscriber_count(&self, property: &str) -> usize {
        self.by_property
            .borrow()
            .get(property)
            .map_or(0, |registrations| registrations.len())
    }

    /// Number of live registrations across all properties.
    pub fn len(&self) -> usize {
        self.owners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers a change of `property` to its subscribers and returns how many ran.
    ///
    /// Callbacks may subscribe or unsubscribe while the emission is in flight.
    /// A registration removed by an earlier callback is not invoked.
    pub fn emit(&self, property: &str) -> usize {
        // Snapshot first: callbacks must be free to touch the registry.
        let pending: Vec<(SubscriptionId, NotifyCallback)> = self
            .by_property
            .borrow()
            .get(property)
            .map(|registrations| {
                registrations
                    .iter()
                    .map(|r| (r.id, Rc::clone(&r.callback)))
                    .collect()
            })
            .unwrap_or_default();

        let mut delivered = 0;
        for (id, callback) in pending {
            if self.is_connected(id) {
                callback(property);
                delivered += 1;
            }
        }
        delivered
    }
}
