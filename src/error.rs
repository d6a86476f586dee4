//! Error types for object introspection and property editing.

use thiserror::Error;

/// Result type alias using [`InspectError`].
pub type Result<T> = std::result::Result<T, InspectError>;

/// Errors raised by introspectable objects.
///
/// The property table never propagates these: it logs them and keeps going.
/// They matter to the code that talks to objects directly, e.g. an edit widget
/// writing a value back.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("property schema unavailable for {type_name}: {reason}")]
    SchemaUnavailable { type_name: String, reason: String },

    #[error("no property named `{name}` on {type_name}{}", suggestion_suffix(.suggestion))]
    UnknownProperty {
        type_name: String,
        name: String,
        suggestion: Option<String>,
    },

    #[error("property `{name}` is not readable")]
    NotReadable { name: String },

    #[error("property `{name}` is not writable")]
    NotWritable { name: String },

    #[error("cannot assign to `{name}`: {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("failed to read `{name}`: {reason}")]
    Fetch { name: String, reason: String },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{name}`?)"),
        None => String::new(),
    }
}

impl InspectError {
    pub fn schema_unavailable(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaUnavailable {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    pub fn not_readable(name: impl Into<String>) -> Self {
        Self::NotReadable { name: name.into() }
    }

    pub fn not_writable(name: impl Into<String>) -> Self {
        Self::NotWritable { name: name.into() }
    }

    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn fetch(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error only concerns a single property rather than the whole object.
    pub fn is_per_property(&self) -> bool {
        !matches!(self, InspectError::SchemaUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = InspectError::not_writable("visible");
        assert_eq!(err.to_string(), "property `visible` is not writable");

        let err = InspectError::schema_unavailable("GtkButton", "class not loaded");
        assert_eq!(
            err.to_string(),
            "property schema unavailable for GtkButton: class not loaded"
        );
    }

    #[test]
    fn test_unknown_property_suggestion() {
        let err = InspectError::UnknownProperty {
            type_name: "GtkButton".to_string(),
            name: "visibel".to_string(),
            suggestion: Some("visible".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "no property named `visibel` on GtkButton (did you mean `visible`?)"
        );

        let err = InspectError::UnknownProperty {
            type_name: "GtkButton".to_string(),
            name: "zzz".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "no property named `zzz` on GtkButton");
    }

    #[test]
    fn test_error_is_per_property() {
        assert!(InspectError::fetch("label", "boom").is_per_property());
        assert!(InspectError::not_readable("secret").is_per_property());
        assert!(!InspectError::schema_unavailable("Foo", "gone").is_per_property());
    }
}
