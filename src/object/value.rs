//! Typed property values.

use crate::object::ObjectId;

/// A reference to another object held in a property, as seen by the inspector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    pub id: ObjectId,
    pub type_name: String,
}

/// The current value of a property.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// `None` is a null string.
    Str(Option<String>),
    /// Ordinal into an enum class.
    Enum(i64),
    /// Bit set over a flags class.
    Flags(u64),
    /// `None` is a null object reference.
    Object(Option<ObjectRef>),
    /// Any other value, already in its textual form.
    Structured(String),
}

impl PropertyValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(Some(value.into()))
    }

    pub fn object(id: ObjectId, type_name: impl Into<String>) -> Self {
        Self::Object(Some(ObjectRef {
            id,
            type_name: type_name.into(),
        }))
    }

    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::UInt(_) => "uint",
            PropertyValue::Float(_) => "float",
            PropertyValue::Str(_) => "string",
            PropertyValue::Enum(_) => "enum",
            PropertyValue::Flags(_) => "flags",
            PropertyValue::Object(_) => "object",
            PropertyValue::Structured(_) => "structured",
        }
    }

    /// Whether `other` can be stored where `self` currently lives.
    ///
    /// Integers of either signedness are interchangeable; everything else must
    /// keep its variant.
    pub fn same_kind(&self, other: &PropertyValue) -> bool {
        use PropertyValue::*;
        matches!(
            (self, other),
            (Bool(_), Bool(_))
                | (Int(_) | UInt(_), Int(_) | UInt(_))
                | (Float(_), Float(_))
                | (Str(_), Str(_))
                | (Enum(_), Enum(_))
                | (Flags(_), Flags(_))
                | (Object(_), Object(_))
                | (Structured(_), Structured(_))
        )
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        Self::UInt(value.into())
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(PropertyValue::from(true), PropertyValue::Bool(true));
        assert_eq!(PropertyValue::from(-3), PropertyValue::Int(-3));
        assert_eq!(PropertyValue::from(7u32), PropertyValue::UInt(7));
        assert_eq!(PropertyValue::from("hi"), PropertyValue::Str(Some("hi".into())));
    }

    #[test]
    fn test_same_kind() {
        assert!(PropertyValue::Int(1).same_kind(&PropertyValue::UInt(2)));
        assert!(PropertyValue::Str(None).same_kind(&PropertyValue::string("x")));
        assert!(!PropertyValue::Bool(true).same_kind(&PropertyValue::Int(1)));
        assert!(!PropertyValue::Enum(0).same_kind(&PropertyValue::Flags(0)));
    }
}
