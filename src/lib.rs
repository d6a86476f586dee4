//! A live property inspector for introspectable objects.
//!
//! Lists an object's readable properties, keeps their rendered values in
//! sync as they change, and hands edit widgets what they need to write back.
//! Reflected Bevy structs can be inspected through [`object::ReflectObject`].

pub mod error;
pub mod inspector;
pub mod object;

// Re-export the main types for convenience
pub use error::{InspectError, Result};
pub use inspector::{
    DisplayRow, EnumClassId, EnumRegistry, InspectorConfig, PropertyInspectorPlugin,
    PropertyTable, RowId, SortOrder, TableChange,
};
pub use object::{
    DynamicObject, Introspectable, NotifyRegistry, ObjectId, PropertySpec, PropertyValue,
    ReflectObject, ValueKind,
};
