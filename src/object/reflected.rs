//! Introspection over reflected Bevy structs.
//!
//! Every named field of the wrapped struct becomes a readable, writable
//! property. Enum-typed fields report [`ValueKind::Enum`] keyed by the enum's
//! type path, which is what [`EnumRegistry::register_reflect`] registers under.
//!
//! [`EnumRegistry::register_reflect`]: crate::inspector::EnumRegistry::register_reflect

use core::cell::RefCell;

use bevy::reflect::{
    DynamicEnum, DynamicVariant, FromReflect, PartialReflect, ReflectMut, ReflectRef, TypeInfo,
    VariantInfo,
};

use crate::error::{InspectError, Result};
use crate::inspector::enum_names::EnumClassId;
use crate::object::{
    Introspectable, NotifyRegistry, ObjectId, PropertySpec, PropertyValue, ValueKind,
};

/// An introspectable wrapper around a reflected struct value.
pub struct ReflectObject {
    id: ObjectId,
    type_name: String,
    value: RefCell<Box<dyn PartialReflect>>,
    notifier: NotifyRegistry,
}

impl ReflectObject {
    pub fn new<T: PartialReflect>(value: T) -> Self {
        Self {
            id: ObjectId::next(),
            type_name: value.reflect_short_type_path().to_string(),
            value: RefCell::new(Box::new(value)),
            notifier: NotifyRegistry::new(),
        }
    }

    /// Reads the wrapped value back as a concrete type.
    pub fn snapshot<T: FromReflect>(&self) -> Option<T> {
        T::from_reflect(&**self.value.borrow())
    }

    /// Writes a field with a reflected value of the field's own type.
    pub fn set_field<T: PartialReflect>(&self, name: &str, new_value: T) -> Result<()> {
        {
            let mut value = self.value.borrow_mut();
            let field = field_mut(&self.type_name, &mut **value, name)?;
            field
                .try_apply(&new_value)
                .map_err(|err| InspectError::invalid_value(name, err.to_string()))?;
        }
        self.notifier.emit(name);
        Ok(())
    }

    fn not_a_struct(&self) -> InspectError {
        InspectError::schema_unavailable(
            self.type_name.clone(),
            "only structs with named fields expose properties",
        )
    }
}

fn field_mut<'a>(
    type_name: &str,
    value: &'a mut dyn PartialReflect,
    name: &str,
) -> Result<&'a mut dyn PartialReflect> {
    let ReflectMut::Struct(s) = value.reflect_mut() else {
        return Err(InspectError::schema_unavailable(
            type_name,
            "only structs with named fields expose properties",
        ));
    };
    s.field_mut(name).ok_or_else(|| InspectError::UnknownProperty {
        type_name: type_name.to_string(),
        name: name.to_string(),
        suggestion: None,
    })
}

impl Introspectable for ReflectObject {
    fn object_id(&self) -> ObjectId {
        self.id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn list_properties(&self) -> Result<Vec<PropertySpec>> {
        let value = self.value.borrow();
        let ReflectRef::Struct(s) = value.reflect_ref() else {
            return Err(self.not_a_struct());
        };

        Ok((0..s.field_len())
            .filter_map(|i| {
                let name = s.name_at(i)?;
                let field = s.field_at(i)?;
                Some(PropertySpec::new(name, kind_of(field)))
            })
            .collect())
    }

    fn get_property(&self, name: &str) -> Result<PropertyValue> {
        let value = self.value.borrow();
        let ReflectRef::Struct(s) = value.reflect_ref() else {
            return Err(self.not_a_struct());
        };
        let field = s.field(name).ok_or_else(|| InspectError::UnknownProperty {
            type_name: self.type_name.clone(),
            name: name.to_string(),
            suggestion: None,
        })?;
        Ok(to_property_value(field))
    }

    fn set_property(&self, name: &str, new_value: PropertyValue) -> Result<()> {
        {
            let mut value = self.value.borrow_mut();
            let field = field_mut(&self.type_name, &mut **value, name)?;
            write_value(field, &new_value)
                .map_err(|reason| InspectError::invalid_value(name, reason))?;
        }
        self.notifier.emit(name);
        Ok(())
    }

    fn notifier(&self) -> &NotifyRegistry {
        &self.notifier
    }
}

fn kind_of(field: &dyn PartialReflect) -> ValueKind {
    match field.reflect_ref() {
        ReflectRef::Enum(_) => ValueKind::Enum(EnumClassId::new((*field).reflect_type_path())),
        _ => ValueKind::Scalar,
    }
}

/// Converts a reflected field to a property value.
fn to_property_value(field: &dyn PartialReflect) -> PropertyValue {
    if let Some(v) = field.try_downcast_ref::<bool>() {
        return PropertyValue::Bool(*v);
    }
    if let Some(v) = field.try_downcast_ref::<String>() {
        return PropertyValue::Str(Some(v.clone()));
    }
    if let Some(v) = field.try_downcast_ref::<f32>() {
        return PropertyValue::Float(f64::from(*v));
    }
    if let Some(v) = field.try_downcast_ref::<f64>() {
        return PropertyValue::Float(*v);
    }

    macro_rules! read_int {
        ($variant:ident, $target:ty; $($t:ty),*) => {
            $(
                if let Some(v) = field.try_downcast_ref::<$t>() {
                    return PropertyValue::$variant(*v as $target);
                }
            )*
        };
    }
    read_int!(Int, i64; i8, i16, i32, i64, isize);
    read_int!(UInt, u64; u8, u16, u32, u64, usize);

    match field.reflect_ref() {
        ReflectRef::Enum(e) => PropertyValue::Enum(e.variant_index() as i64),
        ReflectRef::List(l) => PropertyValue::Structured(format!("[{} items]", l.len())),
        ReflectRef::Array(a) => PropertyValue::Structured(format!("[{} items]", a.len())),
        ReflectRef::Map(m) => PropertyValue::Structured(format!("{{{} entries}}", m.len())),
        ReflectRef::Set(s) => PropertyValue::Structured(format!("{{{} items}}", s.len())),
        _ => PropertyValue::Structured(format!("{field:?}")),
    }
}

/// Writes `value` into a reflected field, converting between numeric widths.
fn write_value(
    field: &mut dyn PartialReflect,
    value: &PropertyValue,
) -> core::result::Result<(), String> {
    let type_path = (*field).reflect_type_path().to_string();
    let mismatch = || format!("cannot store {} in {type_path}", value.kind_name());

    match value {
        PropertyValue::Bool(v) => {
            let slot = field.try_downcast_mut::<bool>().ok_or_else(mismatch)?;
            *slot = *v;
            Ok(())
        }
        PropertyValue::Str(Some(v)) => {
            let slot = field.try_downcast_mut::<String>().ok_or_else(mismatch)?;
            v.clone_into(slot);
            Ok(())
        }
        PropertyValue::Float(v) => {
            if let Some(slot) = field.try_downcast_mut::<f32>() {
                *slot = *v as f32;
                return Ok(());
            }
            let slot = field.try_downcast_mut::<f64>().ok_or_else(mismatch)?;
            *slot = *v;
            Ok(())
        }
        PropertyValue::Int(v) => write_int(field, *v).unwrap_or_else(|| Err(mismatch())),
        PropertyValue::UInt(v) => match i64::try_from(*v) {
            Ok(v) => write_int(field, v).unwrap_or_else(|| Err(mismatch())),
            Err(_) => write_wide_uint(field, *v).unwrap_or_else(|| Err(mismatch())),
        },
        PropertyValue::Enum(ordinal) => write_enum(field, *ordinal),
        _ => Err(mismatch()),
    }
}

/// `None` when the field is not an integer at all.
fn write_int(field: &mut dyn PartialReflect, v: i64) -> Option<core::result::Result<(), String>> {
    macro_rules! write_as {
        ($($t:ty),*) => {
            $(
                if let Some(slot) = field.try_downcast_mut::<$t>() {
                    return Some(
                        <$t>::try_from(v)
                            .map(|n| *slot = n)
                            .map_err(|_| format!("{v} is out of range for {}", stringify!($t))),
                    );
                }
            )*
        };
    }
    write_as!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
    None
}

fn write_wide_uint(
    field: &mut dyn PartialReflect,
    v: u64,
) -> Option<core::result::Result<(), String>> {
    if let Some(slot) = field.try_downcast_mut::<u64>() {
        *slot = v;
        return Some(Ok(()));
    }
    if let Some(slot) = field.try_downcast_mut::<usize>() {
        return Some(
            usize::try_from(v)
                .map(|n| *slot = n)
                .map_err(|_| format!("{v} is out of range for usize")),
        );
    }
    None
}

/// Switches a reflected enum to the unit variant at `ordinal`.
fn write_enum(field: &mut dyn PartialReflect, ordinal: i64) -> core::result::Result<(), String> {
    let Some(TypeInfo::Enum(info)) = field.get_represented_type_info() else {
        return Err(format!("{} is not an enum", (*field).reflect_type_path()));
    };
    let variant = usize::try_from(ordinal)
        .ok()
        .and_then(|index| info.variant_at(index))
        .ok_or_else(|| format!("{} has no variant {ordinal}", info.type_path()))?;

    let VariantInfo::Unit(_) = variant else {
        return Err(format!(
            "variant {} of {} carries data",
            variant.name(),
            info.type_path()
        ));
    };

    let replacement = DynamicEnum::new(variant.name(), DynamicVariant::Unit);
    field.try_apply(&replacement).map_err(|err| err.to_string())
}
