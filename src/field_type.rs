use crate::registry::{shape_key, Registry};
use serde_json::{Number, Value};
use std::fmt;

/// A resolved reference to the type of one field or collection.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A string, with the sample it was inferred from.
    Text { sample: String },

    /// A number, with the sample it was inferred from.
    Number { sample: Number },

    /// A boolean.
    Bool,

    /// Inferred from `null`; the value may be anything or absent.
    Maybe,

    /// A reference to a discovered record, by name.
    Record(String),

    /// A sequence of the inner type.
    Seq(Box<FieldType>),

    /// No type could be inferred. Rendered as a placeholder that needs a
    /// manual fix.
    Unknown,
}

impl FieldType {
    /// Whether this type is fully known, all the way down.
    pub fn is_concrete(&self) -> bool {
        match self {
            Self::Unknown | Self::Maybe => false,
            Self::Seq(inner) => inner.is_concrete(),
            Self::Text { .. } | Self::Number { .. } | Self::Bool | Self::Record(_) => true,
        }
    }

    /// Whether an [`FieldType::Unknown`] appears anywhere in this type.
    pub fn contains_unknown(&self) -> bool {
        match self {
            Self::Unknown => true,
            Self::Seq(inner) => inner.contains_unknown(),
            _ => false,
        }
    }

    /// Whether the field may be missing, so its decoder must tolerate that.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Maybe)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { .. } => f.write_str("Text"),
            Self::Number { sample } if sample.is_i64() || sample.is_u64() => f.write_str("Int"),
            Self::Number { .. } => f.write_str("Double"),
            Self::Bool => f.write_str("Bool"),
            Self::Maybe => f.write_str("Maybe Value"),
            Self::Record(name) => f.write_str(name),
            Self::Seq(inner) => write!(f, "[{}]", inner),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Maps a sample value to a type, consulting the shapes in `registry`.
pub fn resolve(registry: &Registry, value: &Value) -> FieldType {
    match value {
        Value::Null => FieldType::Maybe,
        Value::Bool(_) => FieldType::Bool,
        Value::Number(n) => FieldType::Number { sample: n.clone() },
        Value::String(s) => FieldType::Text { sample: s.clone() },
        Value::Object(object) => match registry.lookup(&shape_key(object)) {
            Some(name) => FieldType::Record(name.to_owned()),
            None => FieldType::Unknown,
        },
        Value::Array(elements) => FieldType::Seq(Box::new(
            first_resolved_element(registry, elements).unwrap_or(FieldType::Unknown),
        )),
    }
}

/// Element policy for collections: arrays are assumed homogeneous, so the
/// first element with a concrete type decides the element type and every
/// later element is ignored.
pub fn first_resolved_element(registry: &Registry, elements: &[Value]) -> Option<FieldType> {
    elements
        .iter()
        .map(|element| resolve(registry, element))
        .find(FieldType::is_concrete)
}
