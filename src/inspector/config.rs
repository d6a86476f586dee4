//! Configuration for the property inspector.

use bevy::prelude::*;

/// Order in which rows are presented.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortOrder {
    /// Property column, A to Z.
    #[default]
    Ascending,
    /// Property column, Z to A.
    Descending,
    /// The order the object's schema lists its properties in.
    Schema,
}

/// Configuration for property table behaviour and presentation.
#[derive(Resource, Clone, Debug)]
pub struct InspectorConfig {
    /// Presentation order of the rows.
    pub sort_order: SortOrder,
    /// Rendered values longer than this are cut and end in `…`.
    pub max_value_chars: Option<usize>,
    /// Jaro-Winkler similarity above which a name counts as a fuzzy filter match.
    pub fuzzy_match_threshold: f64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::Ascending,
            max_value_chars: Some(512),
            fuzzy_match_threshold: 0.85,
        }
    }
}
