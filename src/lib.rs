//! Generates Haskell record types and Aeson decoders from example JSON.
//!
//! Given a representative JSON payload, this crate discovers every distinct
//! object shape in it, gives each shape a name derived from the key it was
//! found under, and renders each one as a `data` declaration plus a
//! `FromJSON` instance. Arrays become `type` synonyms over their element
//! type.
//!
//! Inference runs in three steps:
//!
//! 1. [`walk()`] traverses the document and fills a [`Registry`] with one
//!    declaration per shape, deduplicating objects by their set of keys.
//! 2. [`finalize()`] drops same-named repeats and resolves each field's sample
//!    value into a [`FieldType`].
//! 3. [`render()`] turns each resolved declaration into source text;
//!    [`ModuleContext`] collects the text for one generated module.
//!
//! [`infer`] runs the first two steps on a fresh registry.
//!
//! # Quick start
//!
//! ```
//! use serde_json::json;
//! use aeson_infer::{infer, render};
//!
//! let schema = infer("Response", &json!({
//!     "id": 1,
//!     "owner": { "id": 2, "name": "x" },
//! }));
//!
//! assert_eq!(vec!["Response", "Owner"], schema.declared_names());
//!
//! let owner = schema.get("Owner").unwrap();
//! assert_eq!(
//!     "data Owner = Owner\n  { id   :: Int\n  , name :: Text -- ^ e.g. \"x\"\n  } deriving (Show, Eq, Generic)",
//!     render(owner).type_text,
//! );
//! ```

mod error;
mod field_type;
mod finalize;
mod jtd_export;
mod module_context;
pub mod naming;
mod num_type;
mod registry;
mod render;
mod walker;

pub use crate::error::{Error, Result};
pub use crate::field_type::{first_resolved_element, resolve, FieldType};
pub use crate::finalize::{finalize, NameCollision, ResolvedDeclaration, Schema};
pub use crate::jtd_export::to_jtd_schema;
pub use crate::module_context::ModuleContext;
pub use crate::num_type::NumType;
pub use crate::registry::{shape_key, Declaration, Registry, ShapeKey};
pub use crate::render::{render, string_literal, Rendered};
pub use crate::walker::walk;
use serde_json::Value;

/// Infers the declarations of one document, naming the top-level shape
/// `root_name`.
///
/// Each call uses its own [`Registry`], so shapes from unrelated documents
/// never mix. The returned schema knows the document's own type; see
/// [`Schema::root`].
pub fn infer(root_name: &str, document: &Value) -> Schema {
    let mut registry = Registry::new();
    walk(&mut registry, root_name, document);

    // The record named after the root is always the document's own, even
    // when a nested object with the same keys took over its shape.
    let root = match document {
        Value::Object(_) => FieldType::Record(root_name.to_owned()),
        _ => resolve(&registry, document),
    };

    finalize(&registry).with_root(root)
}
