//! Bevy plugin exposing the property inspector resources.

use bevy::prelude::*;

use super::config::InspectorConfig;
use super::enum_names::EnumRegistry;
use super::table::PropertyTable;

/// Plugin that registers the shared inspector resources.
///
/// Hosts register their enum classes on [`EnumRegistry`] during startup and
/// then build a [`PropertyTable`] per inspector panel with
/// [`property_table_from_world`].
pub struct PropertyInspectorPlugin;

impl Plugin for PropertyInspectorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnumRegistry>()
            .init_resource::<InspectorConfig>();

        info!("Property inspector resources registered");
    }
}

/// Builds a table from the registry and configuration stored in `world`.
///
/// Falls back to defaults for resources the plugin has not inserted.
pub fn property_table_from_world(world: &World) -> PropertyTable {
    let enums = world
        .get_resource::<EnumRegistry>()
        .cloned()
        .unwrap_or_default();
    let config = world
        .get_resource::<InspectorConfig>()
        .cloned()
        .unwrap_or_default();
    PropertyTable::new(enums, config)
}
