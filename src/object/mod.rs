//! Introspectable objects: identity, property schema, and typed values.
//!
//! An inspector only ever sees objects through [`Introspectable`]. Two
//! implementations ship with the crate:
//! - [`DynamicObject`]: a property bag assembled at runtime
//! - [`ReflectObject`]: the named fields of any reflected Bevy struct

pub mod dynamic;
pub mod notify;
pub mod reflected;
pub mod value;

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::inspector::enum_names::EnumClassId;

pub use dynamic::{DynamicObject, DynamicObjectBuilder};
pub use notify::{NotifyRegistry, SubscriptionId};
pub use reflected::ReflectObject;
pub use value::{ObjectRef, PropertyValue};

/// Stable identity of an inspected object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

impl ObjectId {
    /// Allocates a fresh, process-unique id.
    pub fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a property's value should be interpreted for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Ordinal into the member table of an enum class.
    Enum(EnumClassId),
    /// Bit set over the member table of a flags class.
    Flags(EnumClassId),
    /// Anything else; rendered through its natural textual form.
    Scalar,
}

/// Metadata for one property of an object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySpec {
    /// Unique within the object's schema.
    pub name: String,
    pub kind: ValueKind,
    pub readable: bool,
    pub writable: bool,
}

impl PropertySpec {
    /// A readable, writable property.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            readable: true,
            writable: true,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Scalar)
    }

    pub fn enumeration(name: impl Into<String>, class: impl Into<EnumClassId>) -> Self {
        Self::new(name, ValueKind::Enum(class.into()))
    }

    pub fn flags(name: impl Into<String>, class: impl Into<EnumClassId>) -> Self {
        Self::new(name, ValueKind::Flags(class.into()))
    }

    pub fn read_only(mut self) -> Self {
        self.readable = true;
        self.writable = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self.writable = true;
        self
    }
}

/// An object whose properties can be listed, read, written and observed.
///
/// Implementations keep their own interior mutability: every method takes
/// `&self` so that objects can be shared as `Rc<dyn Introspectable>` between
/// the object-graph browser, edit widgets and the property table.
pub trait Introspectable {
    fn object_id(&self) -> ObjectId;

    /// Type name shown in headers and error messages.
    fn type_name(&self) -> &str;

    /// Full property schema, including non-readable entries.
    fn list_properties(&self) -> Result<Vec<PropertySpec>>;

    fn get_property(&self, name: &str) -> Result<PropertyValue>;

    /// Writes a new value and emits a change notification for `name`.
    fn set_property(&self, name: &str, value: PropertyValue) -> Result<()>;

    /// Change-notification source for this object's properties.
    fn notifier(&self) -> &NotifyRegistry;
}
