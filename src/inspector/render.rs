//! Display rendering of property values.

use crate::inspector::enum_names::{EnumClassId, EnumRegistry};
use crate::object::{PropertySpec, PropertyValue, ValueKind};

/// Renders a property value for the Value column.
///
/// Enum-kinded properties show the member name for their ordinal, falling
/// back to the ordinal itself when the class has no such member. Flags show
/// the names of their set bits. Everything else uses [`render_plain`].
pub fn render_value(value: &PropertyValue, spec: &PropertySpec, enums: &EnumRegistry) -> String {
    match (&spec.kind, value) {
        (ValueKind::Enum(class), PropertyValue::Enum(ordinal)) => enums
            .member_name(class, *ordinal)
            .map_or_else(|| ordinal.to_string(), str::to_string),
        (ValueKind::Flags(class), PropertyValue::Flags(bits)) => render_flags(*bits, class, enums),
        _ => render_plain(value),
    }
}

/// Natural textual form of a value, without any enum lookup.
pub fn render_plain(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Bool(true) => "TRUE".to_string(),
        PropertyValue::Bool(false) => "FALSE".to_string(),
        PropertyValue::Int(v) => v.to_string(),
        PropertyValue::UInt(v) => v.to_string(),
        PropertyValue::Float(v) => v.to_string(),
        PropertyValue::Str(Some(s)) => s.clone(),
        PropertyValue::Str(None) | PropertyValue::Object(None) => "NULL".to_string(),
        PropertyValue::Enum(ordinal) => ordinal.to_string(),
        PropertyValue::Flags(bits) => bits.to_string(),
        PropertyValue::Object(Some(obj)) => format!("{}{}", obj.type_name, obj.id),
        PropertyValue::Structured(text) => text.clone(),
    }
}

fn render_flags(bits: u64, class: &EnumClassId, enums: &EnumRegistry) -> String {
    let Some(members) = enums.members(class) else {
        return bits.to_string();
    };

    if bits == 0 {
        return members
            .iter()
            .find(|m| m.value == 0)
            .map_or_else(|| "0".to_string(), |m| m.name.clone());
    }

    let mut names = Vec::new();
    let mut remaining = bits;
    // Negative members are not bit masks.
    for member in members.iter().filter(|m| m.value > 0) {
        let mask = member.value as u64;
        if bits & mask == mask {
            names.push(member.name.clone());
            remaining &= !mask;
        }
    }
    if remaining != 0 {
        names.push(format!("0x{remaining:x}"));
    }
    names.join(" | ")
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate_display(text: String, max_chars: Option<usize>) -> String {
    let Some(max) = max_chars else {
        return text;
    };
    if text.chars().count() <= max {
        return text;
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectId;

    fn registry() -> EnumRegistry {
        let mut enums = EnumRegistry::new();
        enums.register(
            "GtkAlign",
            [(0, "GTK_ALIGN_FILL"), (1, "GTK_ALIGN_START"), (2, "GTK_ALIGN_CENTER")],
        );
        enums.register(
            "GdkModifierType",
            [(0x1, "GDK_SHIFT_MASK"), (0x4, "GDK_CONTROL_MASK"), (0x8, "GDK_MOD1_MASK")],
        );
        enums.register("GtkStateFlags", [(0, "GTK_STATE_FLAG_NORMAL"), (1, "GTK_STATE_FLAG_ACTIVE")]);
        enums
    }

    #[test]
    fn test_enum_renders_member_name() {
        let spec = PropertySpec::enumeration("halign", "GtkAlign");
        let rendered = render_value(&PropertyValue::Enum(2), &spec, &registry());
        assert_eq!(rendered, "GTK_ALIGN_CENTER");
    }

    #[test]
    fn test_out_of_range_enum_falls_back_to_ordinal() {
        let spec = PropertySpec::enumeration("halign", "GtkAlign");
        assert_eq!(render_value(&PropertyValue::Enum(42), &spec, &registry()), "42");

        let spec = PropertySpec::enumeration("halign", "Unregistered");
        assert_eq!(render_value(&PropertyValue::Enum(1), &spec, &registry()), "1");
    }

    #[test]
    fn test_flags_render_member_names() {
        let spec = PropertySpec::flags("state", "GdkModifierType");
        let enums = registry();
        assert_eq!(
            render_value(&PropertyValue::Flags(0x5), &spec, &enums),
            "GDK_SHIFT_MASK | GDK_CONTROL_MASK"
        );
        assert_eq!(
            render_value(&PropertyValue::Flags(0x11), &spec, &enums),
            "GDK_SHIFT_MASK | 0x10"
        );
        assert_eq!(render_value(&PropertyValue::Flags(0), &spec, &enums), "0");

        let spec = PropertySpec::flags("state", "GtkStateFlags");
        assert_eq!(
            render_value(&PropertyValue::Flags(0), &spec, &enums),
            "GTK_STATE_FLAG_NORMAL"
        );
    }

    #[test]
    fn test_flags_ignore_negative_members() {
        let mut enums = registry();
        enums.register("GdkEventMask", [(-1, "GDK_ALL_EVENTS_MASK"), (0x2, "GDK_MOTION_MASK")]);
        let spec = PropertySpec::flags("events", "GdkEventMask");
        assert_eq!(
            render_value(&PropertyValue::Flags(0x2), &spec, &enums),
            "GDK_MOTION_MASK"
        );
        assert_eq!(render_value(&PropertyValue::Flags(0x4), &spec, &enums), "0x4");
    }

    #[test]
    fn test_plain_rendering() {
        assert_eq!(render_plain(&PropertyValue::Bool(true)), "TRUE");
        assert_eq!(render_plain(&PropertyValue::Bool(false)), "FALSE");
        assert_eq!(render_plain(&PropertyValue::Int(-12)), "-12");
        assert_eq!(render_plain(&PropertyValue::Float(0.5)), "0.5");
        assert_eq!(render_plain(&PropertyValue::string("Hello")), "Hello");
        assert_eq!(render_plain(&PropertyValue::Str(None)), "NULL");
        assert_eq!(render_plain(&PropertyValue::Object(None)), "NULL");

        let id = ObjectId::next();
        assert_eq!(
            render_plain(&PropertyValue::object(id, "GtkWindow")),
            format!("GtkWindow#{}", id.raw())
        );
    }

    #[test]
    fn test_enum_value_on_scalar_property_renders_ordinal() {
        let spec = PropertySpec::scalar("halign");
        assert_eq!(render_value(&PropertyValue::Enum(2), &spec, &registry()), "2");
    }

    #[test]
    fn test_truncate_display() {
        assert_eq!(truncate_display("short".to_string(), Some(10)), "short");
        assert_eq!(truncate_display("abcdef".to_string(), Some(4)), "abc…");
        assert_eq!(truncate_display("äöüßé".to_string(), Some(3)), "äö…");
        assert_eq!(truncate_display("anything".to_string(), None), "anything");
        assert_eq!(truncate_display("anything".to_string(), Some(1)), "…");
        assert_eq!(truncate_display("anything".to_string(), Some(0)), "");
        assert_eq!(truncate_display(String::new(), Some(0)), "");
    }
}
