//! The property table.
//!
//! Holds one row per readable property of the bound object, an index from
//! property name to row, and one change subscription per row. Binding a new
//! object always tears all three down first, so a notification from a
//! previously bound object can never reach the table once `bind` returns.
//!
//! Failures never escape: a schema that cannot be listed leaves the table
//! empty, a property that cannot be read is left out, and notifications for
//! names the table does not track are ignored.

use core::cell::RefCell;
use std::rc::{Rc, Weak};

use bevy::log::{debug, trace, warn};
use bevy::platform::collections::HashMap;

use crate::inspector::config::{InspectorConfig, SortOrder};
use crate::inspector::enum_names::EnumRegistry;
use crate::inspector::render::{render_value, truncate_display};
use crate::inspector::rows::{DisplayRow, RowArena, RowId};
use crate::object::{Introspectable, ObjectId, PropertySpec, PropertyValue, SubscriptionId};

/// What changed in the table since the host last looked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableChange {
    /// All rows were replaced by a bind.
    Rebuilt,
    /// One row got a new rendered value.
    RowUpdated(RowId),
}

/// A live registration against the bound object's notifier.
struct Subscription {
    object: Weak<dyn Introspectable>,
    property: String,
    id: SubscriptionId,
}

impl Subscription {
    /// Returns whether a live registration was actually removed.
    fn disconnect(self) -> bool {
        let Some(object) = self.object.upgrade() else {
            // Object already dropped, and its registrations with it.
            return false;
        };
        let removed = object.notifier().unsubscribe(self.id);
        if !removed {
            trace!(property = %self.property, "subscription was already disconnected");
        }
        removed
    }
}

struct TableState {
    target: Option<Weak<dyn Introspectable>>,
    target_id: Option<ObjectId>,
    rows: RowArena,
    index: HashMap<String, RowId>,
    subscriptions: Vec<Subscription>,
    changes: Vec<TableChange>,
    enums: EnumRegistry,
    config: InspectorConfig,
}

impl TableState {
    fn render(&self, value: &PropertyValue, spec: &PropertySpec) -> String {
        truncate_display(
            render_value(value, spec, &self.enums),
            self.config.max_value_chars,
        )
    }

    fn teardown(&mut self) {
        let disconnected = self
            .subscriptions
            .drain(..)
            .map(Subscription::disconnect)
            .filter(|removed| *removed)
            .count();

        if let Some(id) = self.target_id.take() {
            debug!(object = %id, disconnected, "unbinding property table");
        }
        self.target = None;
        self.index.clear();
        self.rows.clear();
    }

    fn on_change_notification(&mut self, property: &str) {
        let Some(&row_id) = self.index.get(property) else {
            trace!(property, "ignoring notification for untracked property");
            return;
        };
        let Some(object) = self.target.as_ref().and_then(Weak::upgrade) else {
            trace!(property, "ignoring notification, bound object is gone");
            return;
        };

        let value = match object.get_property(property) {
            Ok(value) => value,
            Err(err) => {
                warn!(property, error = %err, "failed to re-read changed property");
                return;
            }
        };
        let Some(rendered) = self.rows.get(row_id).map(|row| self.render(&value, row.spec())) else {
            return;
        };
        if let Some(row) = self.rows.get_mut(row_id) {
            row.set_rendered(rendered);
            self.changes.push(TableChange::RowUpdated(row_id));
        }
    }

    fn sorted_rows(&self) -> Vec<&DisplayRow> {
        let mut rows: Vec<&DisplayRow> = self.rows.iter().map(|(_, row)| row).collect();
        match self.config.sort_order {
            SortOrder::Ascending => rows.sort_by(|a, b| a.name().cmp(b.name())),
            SortOrder::Descending => rows.sort_by(|a, b| b.name().cmp(a.name())),
            SortOrder::Schema => {}
        }
        rows
    }
}

/// State shared between the table and the callbacks it registers.
struct SharedTable {
    state: RefCell<TableState>,
    /// Notifications that arrived while `state` was borrowed, in arrival order.
    pending: RefCell<Vec<String>>,
}

impl SharedTable {
    /// Upper bound on replay rounds when re-reads keep emitting new changes.
    const MAX_REPLAY_ROUNDS: usize = 16;

    /// Re-renders rows for queued notifications until the queue stays empty.
    fn replay_pending(&self, state: &mut TableState) {
        for _ in 0..Self::MAX_REPLAY_ROUNDS {
            let pending = std::mem::take(&mut *self.pending.borrow_mut());
            if pending.is_empty() {
                return;
            }
            for property in pending {
                state.on_change_notification(&property);
            }
        }

        let dropped = std::mem::take(&mut *self.pending.borrow_mut()).len();
        if dropped > 0 {
            warn!(dropped, "property notifications keep re-triggering, giving up");
        }
    }
}

/// Property/Value table for one inspected object at a time.
///
/// The table is single-threaded: it shares its state with the notification
/// callbacks it registers, and those run on whatever thread emits them.
/// A notification emitted while the table is busy (for instance by a getter
/// it is calling) is queued and replayed before the busy call returns.
pub struct PropertyTable {
    shared: Rc<SharedTable>,
}

impl Default for PropertyTable {
    fn default() -> Self {
        Self::new(EnumRegistry::default(), InspectorConfig::default())
    }
}

impl PropertyTable {
    pub fn new(enums: EnumRegistry, config: InspectorConfig) -> Self {
        Self {
            shared: Rc::new(SharedTable {
                state: RefCell::new(TableState {
                    target: None,
                    target_id: None,
                    rows: RowArena::new(),
                    index: HashMap::default(),
                    subscriptions: Vec::new(),
                    changes: Vec::new(),
                    enums,
                    config,
                }),
                pending: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Shows `object`, or nothing when `None`.
    ///
    /// Always rebuilds from scratch, even when `object` is already bound.
    pub fn bind(&self, object: Option<&Rc<dyn Introspectable>>) {
        let Ok(mut guard) = self.shared.state.try_borrow_mut() else {
            warn!("property table is busy, ignoring bind");
            return;
        };
        let state = &mut *guard;

        state.teardown();
        self.shared.pending.borrow_mut().clear();
        state.changes.push(TableChange::Rebuilt);

        let Some(object) = object else {
            return;
        };
        state.target = Some(Rc::downgrade(object));
        state.target_id = Some(object.object_id());

        let schema = match object.list_properties() {
            Ok(schema) => schema,
            Err(err) => {
                warn!(
                    object = %object.object_id(),
                    type_name = object.type_name(),
                    error = %err,
                    "could not list properties, showing none"
                );
                return;
            }
        };

        for spec in schema {
            if !spec.readable {
                continue;
            }
            if state.index.contains_key(&spec.name) {
                debug!(property = %spec.name, "duplicate property in schema, keeping the first");
                continue;
            }

            let value = match object.get_property(&spec.name) {
                Ok(value) => value,
                Err(err) => {
                    warn!(property = %spec.name, error = %err, "skipping unreadable property");
                    continue;
                }
            };

            let rendered = state.render(&value, &spec);
            let name = spec.name.clone();
            let row_id = state.rows.insert(DisplayRow::new(spec, rendered, object));
            state.index.insert(name.clone(), row_id);

            let table = Rc::downgrade(&self.shared);
            let id = object
                .notifier()
                .subscribe(&name, move |property| deliver(&table, property));
            state.subscriptions.push(Subscription {
                object: Rc::downgrade(object),
                property: name,
                id,
            });
        }

        // Getters read above may have emitted changes for rows already built.
        self.shared.replay_pending(state);

        debug!(
            object = %object.object_id(),
            type_name = object.type_name(),
            rows = state.rows.len(),
            "bound property table"
        );
    }

    /// Equivalent to `bind(None)`.
    pub fn unbind(&self) {
        self.bind(None);
    }

    /// Re-renders the row for `property`, if the table has one.
    ///
    /// This is what the registered subscriptions call; it can also be invoked
    /// directly. Unknown names are ignored.
    pub fn on_change_notification(&self, property: &str) {
        deliver(&Rc::downgrade(&self.shared), property);
    }

    pub fn bound_object(&self) -> Option<Rc<dyn Introspectable>> {
        self.shared.state.borrow().target.as_ref().and_then(Weak::upgrade)
    }

    pub fn bound_object_id(&self) -> Option<ObjectId> {
        self.shared.state.borrow().target_id
    }

    pub fn len(&self) -> usize {
        self.shared.state.borrow().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state.borrow().rows.is_empty()
    }

    /// Number of live change subscriptions held by the table.
    pub fn subscription_count(&self) -> usize {
        self.shared.state.borrow().subscriptions.len()
    }

    /// All rows, in the configured presentation order.
    pub fn rows(&self) -> Vec<DisplayRow> {
        self.shared
            .state
            .borrow()
            .sorted_rows()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn row_id(&self, property: &str) -> Option<RowId> {
        self.shared.state.borrow().index.get(property).copied()
    }

    pub fn row(&self, property: &str) -> Option<DisplayRow> {
        let state = self.shared.state.borrow();
        let id = *state.index.get(property)?;
        state.rows.get(id).cloned()
    }

    /// Row behind a handle; `None` once the handle's generation is gone.
    pub fn row_by_id(&self, id: RowId) -> Option<DisplayRow> {
        self.shared.state.borrow().rows.get(id).cloned()
    }

    pub fn rendered_value(&self, property: &str) -> Option<String> {
        self.row(property).map(|row| row.rendered_value().to_string())
    }

    /// Rows whose name contains `query` or closely resembles it, in presentation order.
    pub fn filter(&self, query: &str) -> Vec<DisplayRow> {
        let state = self.shared.state.borrow();
        let query = query.to_lowercase();
        if query.is_empty() {
            return state.sorted_rows().into_iter().cloned().collect();
        }

        let threshold = state.config.fuzzy_match_threshold;
        state
            .sorted_rows()
            .into_iter()
            .filter(|row| {
                let name = row.name().to_lowercase();
                name.contains(&query) || strsim::jaro_winkler(&name, &query) >= threshold
            })
            .cloned()
            .collect()
    }

    /// Takes the changes recorded since the last call.
    pub fn drain_changes(&self) -> Vec<TableChange> {
        std::mem::take(&mut self.shared.state.borrow_mut().changes)
    }

    pub fn config(&self) -> InspectorConfig {
        self.shared.state.borrow().config.clone()
    }

    /// Replaces the configuration. Takes effect for values rendered afterwards.
    pub fn set_config(&self, config: InspectorConfig) {
        self.shared.state.borrow_mut().config = config;
    }
}

impl Drop for PropertyTable {
    fn drop(&mut self) {
        match self.shared.state.try_borrow_mut() {
            Ok(mut state) => state.teardown(),
            Err(_) => warn!("property table dropped while busy, subscriptions left to expire"),
        }
    }
}

/// Entry point for notifications; tolerates a dropped or busy table.
fn deliver(table: &Weak<SharedTable>, property: &str) {
    let Some(shared) = table.upgrade() else {
        return;
    };
    let Ok(mut state) = shared.state.try_borrow_mut() else {
        trace!(property, "property table busy, queueing notification");
        shared.pending.borrow_mut().push(property.to_string());
        return;
    };
    state.on_change_notification(property);
    shared.replay_pending(&mut state);
}
