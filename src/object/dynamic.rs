//! A property-bag object assembled at runtime.

use core::cell::RefCell;
use std::rc::Rc;

use crate::error::{InspectError, Result};
use crate::object::{Introspectable, NotifyRegistry, ObjectId, PropertySpec, PropertyValue};

/// Getter for a property whose value is computed on every read.
pub type PropertyGetter = Rc<dyn Fn() -> Result<PropertyValue>>;

enum Source {
    Stored(PropertyValue),
    Computed(PropertyGetter),
}

struct Slot {
    spec: PropertySpec,
    source: Source,
}

/// An introspectable object whose schema is given at construction time.
///
/// Properties are either stored (read back exactly as last written) or
/// computed by a getter, which may fail.
pub struct DynamicObject {
    id: ObjectId,
    type_name: String,
    slots: RefCell<Vec<Slot>>,
    notifier: NotifyRegistry,
}

impl DynamicObject {
    pub fn builder(type_name: impl Into<String>) -> DynamicObjectBuilder {
        DynamicObjectBuilder {
            type_name: type_name.into(),
            slots: Vec::new(),
        }
    }

    fn unknown(&self, name: &str) -> InspectError {
        let suggestion = closest_name(
            name,
            self.slots.borrow().iter().map(|slot| slot.spec.name.as_str()),
        );
        InspectError::UnknownProperty {
            type_name: self.type_name.clone(),
            name: name.to_string(),
            suggestion,
        }
    }
}

/// Best fuzzy match for `name` among `candidates`, if any is close enough.
fn closest_name<'a>(name: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    const MIN_SIMILARITY: f64 = 0.8;

    candidates
        .map(|candidate| (candidate, strsim::jaro_winkler(name, candidate)))
        .filter(|(_, score)| *score >= MIN_SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate.to_string())
}

impl Introspectable for DynamicObject {
    fn object_id(&self) -> ObjectId {
        self.id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn list_properties(&self) -> Result<Vec<PropertySpec>> {
        Ok(self
            .slots
            .borrow()
            .iter()
            .map(|slot| slot.spec.clone())
            .collect())
    }

    fn get_property(&self, name: &str) -> Result<PropertyValue> {
        let getter = {
            let slots = self.slots.borrow();
            let Some(slot) = slots.iter().find(|slot| slot.spec.name == name) else {
                drop(slots);
                return Err(self.unknown(name));
            };
            if !slot.spec.readable {
                return Err(InspectError::not_readable(name));
            }
            match &slot.source {
                Source::Stored(value) => return Ok(value.clone()),
                Source::Computed(getter) => Rc::clone(getter),
            }
        };

        // Getters may write back to this object.
        getter()
    }

    fn set_property(&self, name: &str, value: PropertyValue) -> Result<()> {
        {
            let mut slots = self.slots.borrow_mut();
            let Some(slot) = slots.iter_mut().find(|slot| slot.spec.name == name) else {
                drop(slots);
                return Err(self.unknown(name));
            };
            if !slot.spec.writable {
                return Err(InspectError::not_writable(name));
            }
            match &slot.source {
                Source::Stored(current) if !current.same_kind(&value) => {
                    return Err(InspectError::invalid_value(
                        name,
                        format!("expected {}, got {}", current.kind_name(), value.kind_name()),
                    ));
                }
                Source::Computed(_) => {
                    return Err(InspectError::invalid_value(name, "property is computed"));
                }
                Source::Stored(_) => {}
            }
            slot.source = Source::Stored(value);
        }

        // Subscribers read the new value back, so the borrow must be released first.
        self.notifier.emit(name);
        Ok(())
    }

    fn notifier(&self) -> &NotifyRegistry {
        &self.notifier
    }
}

/// Builder for [`DynamicObject`].
pub struct DynamicObjectBuilder {
    type_name: String,
    slots: Vec<Slot>,
}

impl DynamicObjectBuilder {
    /// Adds a stored property.
    pub fn property(mut self, spec: PropertySpec, value: impl Into<PropertyValue>) -> Self {
        self.slots.push(Slot {
            spec,
            source: Source::Stored(value.into()),
        });
        self
    }

    /// Adds a property computed by `getter` on every read.
    pub fn computed(
        mut self,
        spec: PropertySpec,
        getter: impl Fn() -> Result<PropertyValue> + 'static,
    ) -> Self {
        self.slots.push(Slot {
            spec,
            source: Source::Computed(Rc::new(getter)),
        });
        self
    }

    pub fn build(self) -> DynamicObject {
        DynamicObject {
            id: ObjectId::next(),
            type_name: self.type_name,
            slots: RefCell::new(self.slots),
            notifier: NotifyRegistry::new(),
        }
    }
}
