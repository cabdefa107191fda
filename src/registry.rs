use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

/// The structural identity of a JSON object: its set of field names.
pub type ShapeKey = BTreeSet<String>;

/// Computes the [`ShapeKey`] of an object, independent of key order.
pub fn shape_key(object: &Map<String, Value>) -> ShapeKey {
    object.keys().cloned().collect()
}

/// A discovered declaration.
///
/// `T` is the payload of each field. While walking it is the raw sample
/// value; after finalization it is a resolved
/// [`FieldType`][`crate::FieldType`].
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration<T> {
    /// A named object shape, fields in first-seen key order.
    Record { name: String, fields: Vec<(String, T)> },

    /// A named collection. The payload describes the whole collection.
    Alias { name: String, element: T },
}

impl<T> Declaration<T> {
    /// The declared type name.
    pub fn name(&self) -> &str {
        match self {
            Self::Record { name, .. } | Self::Alias { name, .. } => name,
        }
    }

    /// Records are the declared types of a module; aliases are not.
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Field names of a record, as a set. `None` for aliases.
    pub fn field_names(&self) -> Option<ShapeKey> {
        match self {
            Self::Record { fields, .. } => {
                Some(fields.iter().map(|(k, _)| k.clone()).collect())
            }
            Self::Alias { .. } => None,
        }
    }

    /// Converts every payload, keeping names and field order.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Declaration<U> {
        match self {
            Self::Record { name, fields } => Declaration::Record {
                name: name.clone(),
                fields: fields.iter().map(|(k, v)| (k.clone(), f(v))).collect(),
            },
            Self::Alias { name, element } => Declaration::Alias {
                name: name.clone(),
                element: f(element),
            },
        }
    }
}

/// Accumulates the shapes discovered during one walk over one document.
///
/// The registry borrows from the document being walked. Use a fresh registry
/// for every document; mixing unrelated documents corrupts shape
/// deduplication.
#[derive(Debug, Default)]
pub struct Registry<'a> {
    by_shape: BTreeMap<ShapeKey, String>,
    discovered: Vec<Declaration<&'a Value>>,
    seen_records: BTreeSet<(String, ShapeKey)>,
    // Aliases are keyed by their compact JSON text.
    seen_aliases: HashSet<(String, String)>,
}

impl<'a> Registry<'a> {
    /// Creates an empty registry for one walk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an object shape under `name`.
    ///
    /// The shape index always points at the most recent name registered for
    /// `key`. The declaration itself is appended unless one with the same
    /// name and field set was already discovered.
    pub fn register_record(
        &mut self,
        name: &str,
        key: ShapeKey,
        fields: Vec<(String, &'a Value)>,
    ) {
        self.by_shape.insert(key.clone(), name.to_owned());

        if self.seen_records.insert((name.to_owned(), key)) {
            debug!(name, fields = fields.len(), "discovered record shape");
            self.discovered.push(Declaration::Record {
                name: name.to_owned(),
                fields,
            });
        }
    }

    /// Records a collection under `name`, unless an identical one was
    /// already discovered.
    pub fn register_alias(&mut self, name: &str, array: &'a Value) {
        if self.seen_aliases.insert((name.to_owned(), array.to_string())) {
            debug!(name, "discovered collection");
            self.discovered.push(Declaration::Alias {
                name: name.to_owned(),
                element: array,
            });
        }
    }

    /// Name of the record registered for `key`, if any.
    pub fn lookup(&self, key: &ShapeKey) -> Option<&str> {
        self.by_shape.get(key).map(String::as_str)
    }

    /// Declarations in the order they were first discovered.
    pub fn discovered(&self) -> &[Declaration<&'a Value>] {
        &self.discovered
    }
}
