//! Enum and flags member-name registry.
//!
//! Maps an enum class identifier to its member table so the inspector can show
//! `GTK_ALIGN_CENTER` instead of `2` for an enum-typed property.

use core::fmt;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::reflect::{TypeInfo, Typed};

/// Identifier of an enum or flags class.
///
/// For reflected Rust enums this is the type path, e.g. `my_game::Team`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumClassId(String);

impl EnumClassId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EnumClassId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EnumClassId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for EnumClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One named member of an enum or flags class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumMember {
    /// Ordinal for enums, bit mask for flags.
    pub value: i64,
    pub name: String,
}

/// Registry mapping enum class ids to their member tables.
///
/// Populated at startup and then only read. Lookups are by ordinal, so
/// tables with gaps (`A = 0, B = 4`) are fine.
#[derive(Resource, Clone, Default)]
pub struct EnumRegistry {
    classes: HashMap<EnumClassId, Vec<EnumMember>>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the member table of a class.
    ///
    /// Re-registering a class replaces its table.
    pub fn register<N: Into<String>>(
        &mut self,
        class: impl Into<EnumClassId>,
        members: impl IntoIterator<Item = (i64, N)>,
    ) {
        let members = members
            .into_iter()
            .map(|(value, name)| EnumMember {
                value,
                name: name.into(),
            })
            .collect();
        self.classes.insert(class.into(), members);
    }

    /// Register a reflected Rust enum, using variant indices as ordinals.
    ///
    /// Returns the class id under which it was registered, or `None` if `T`
    /// is not an enum.
    pub fn register_reflect<T: Typed>(&mut self) -> Option<EnumClassId> {
        let TypeInfo::Enum(info) = T::type_info() else {
            warn!(
                "{} is not an enum, skipping registration",
                T::type_info().type_path()
            );
            return None;
        };

        let class = EnumClassId::new(info.type_path());
        self.register(
            class.clone(),
            info.iter()
                .enumerate()
                .map(|(index, variant)| (index as i64, variant.name())),
        );
        Some(class)
    }

    /// Symbolic name of the member with the given ordinal.
    ///
    /// Returns `None` for unknown classes and out-of-range ordinals.
    pub fn member_name(&self, class: &EnumClassId, ordinal: i64) -> Option<&str> {
        self.classes
            .get(class)?
            .iter()
            .find(|member| member.value == ordinal)
            .map(|member| member.name.as_str())
    }

    pub fn members(&self, class: &EnumClassId) -> Option<&[EnumMember]> {
        self.classes.get(class).map(Vec::as_slice)
    }

    /// Check if a class has a member table registered.
    pub fn contains(&self, class: &EnumClassId) -> bool {
        self.classes.contains_key(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::reflect::TypePath;

    #[allow(dead_code)]
    #[derive(Reflect)]
    enum Team {
        Red,
        Blue,
        Spectator { since: u32 },
    }

    #[allow(dead_code)]
    #[derive(Reflect)]
    struct NotAnEnum {
        value: f32,
    }

    #[test]
    fn test_member_name_lookup() {
        let mut registry = EnumRegistry::new();
        registry.register(
            "GtkAlign",
            [(0, "GTK_ALIGN_FILL"), (1, "GTK_ALIGN_START"), (2, "GTK_ALIGN_CENTER")],
        );

        let class = EnumClassId::from("GtkAlign");
        assert!(registry.contains(&class));
        assert_eq!(registry.member_name(&class, 2), Some("GTK_ALIGN_CENTER"));
        assert_eq!(registry.member_name(&class, 7), None);
        assert_eq!(registry.member_name(&EnumClassId::from("Nope"), 0), None);
    }

    #[test]
    fn test_sparse_members() {
        let mut registry = EnumRegistry::new();
        registry.register("Sparse", [(0, "ZERO"), (4, "FOUR")]);
        let class = EnumClassId::from("Sparse");
        assert_eq!(registry.member_name(&class, 4), Some("FOUR"));
        assert_eq!(registry.member_name(&class, 1), None);
        assert_eq!(registry.members(&class).map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_register_reflect_enum() {
        let mut registry = EnumRegistry::new();
        let class = registry.register_reflect::<Team>().expect("Team is an enum");

        assert_eq!(class.as_str(), Team::type_path());
        assert_eq!(registry.member_name(&class, 0), Some("Red"));
        assert_eq!(registry.member_name(&class, 1), Some("Blue"));
        assert_eq!(registry.member_name(&class, 2), Some("Spectator"));
        assert_eq!(registry.member_name(&class, 3), None);
    }

    #[test]
    fn test_register_reflect_rejects_structs() {
        let mut registry = EnumRegistry::new();
        assert!(registry.register_reflect::<NotAnEnum>().is_none());
    }
}
