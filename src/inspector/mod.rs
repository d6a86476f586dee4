//! Property inspector module.
//!
//! Lists the readable properties of one object at a time and keeps the
//! rendered values in sync with the object's change notifications.

pub mod config;
pub mod enum_names;
pub mod plugin;
pub mod render;
pub mod rows;
pub mod table;

pub use config::{InspectorConfig, SortOrder};
pub use enum_names::{EnumClassId, EnumMember, EnumRegistry};
pub use plugin::{property_table_from_world, PropertyInspectorPlugin};
pub use render::{render_plain, render_value};
pub use rows::{DisplayRow, RowArena, RowId};
pub use table::{PropertyTable, TableChange};
