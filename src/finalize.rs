use crate::field_type::{resolve, FieldType};
use crate::registry::{Declaration, Registry};
use std::collections::BTreeMap;
use tracing::warn;

/// A declaration whose every field has been resolved.
pub type ResolvedDeclaration = Declaration<FieldType>;

/// Two differently-shaped declarations that ended up with the same name.
///
/// Only `kept` makes it into the [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct NameCollision {
    pub name: String,
    pub kept: ResolvedDeclaration,
    pub dropped: ResolvedDeclaration,
}

/// The printable result of one inference run.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    declarations: Vec<ResolvedDeclaration>,
    collisions: Vec<NameCollision>,
    root: Option<FieldType>,
}

impl Schema {
    /// Attaches the type of the document itself.
    pub fn with_root(mut self, root: FieldType) -> Self {
        self.root = Some(root);
        self
    }

    /// The type of the document itself, when known.
    ///
    /// For a top-level array this is the only way back to the element type:
    /// the array and its elements are named alike, and the record wins.
    pub fn root(&self) -> Option<&FieldType> {
        self.root.as_ref()
    }

    /// Declarations in discovery order, one per name.
    pub fn declarations(&self) -> &[ResolvedDeclaration] {
        &self.declarations
    }

    /// Same-named declarations that were dropped because their shape
    /// differed from the one kept.
    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    /// Names of record declarations. Aliases are not included.
    pub fn declared_names(&self) -> Vec<&str> {
        self.declarations
            .iter()
            .filter(|decl| decl.is_record())
            .map(Declaration::name)
            .collect()
    }

    /// Names of declarations that still contain an unresolved type.
    pub fn unresolved(&self) -> Vec<&str> {
        self.declarations
            .iter()
            .filter(|decl| match decl {
                Declaration::Record { fields, .. } => {
                    fields.iter().any(|(_, type_)| type_.contains_unknown())
                }
                Declaration::Alias { element, .. } => element.contains_unknown(),
            })
            .map(Declaration::name)
            .collect()
    }

    /// The declaration named `name`.
    pub fn get(&self, name: &str) -> Option<&ResolvedDeclaration> {
        self.declarations.iter().find(|decl| decl.name() == name)
    }

    /// True when the document held no objects or arrays.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Deduplicates the discovered declarations by name, keeping the first, and
/// resolves every field against the registry.
pub fn finalize(registry: &Registry) -> Schema {
    let mut declarations: Vec<ResolvedDeclaration> = Vec::new();
    let mut by_name: BTreeMap<String, usize> = BTreeMap::new();
    let mut collisions = Vec::new();

    for decl in registry.discovered() {
        let resolved = decl.map(|value| resolve(registry, value));

        match by_name.get(resolved.name()).copied() {
            None => {
                by_name.insert(resolved.name().to_owned(), declarations.len());
                declarations.push(resolved);
            }
            Some(index) => {
                let kept = &declarations[index];
                if conflicts(kept, &resolved) {
                    warn!(
                        name = kept.name(),
                        "two different shapes share a name; keeping the first one discovered"
                    );

                    collisions.push(NameCollision {
                        name: kept.name().to_owned(),
                        kept: kept.clone(),
                        dropped: resolved,
                    });
                }
            }
        }
    }

    Schema {
        declarations,
        collisions,
        root: None,
    }
}

fn conflicts(kept: &ResolvedDeclaration, dropped: &ResolvedDeclaration) -> bool {
    match (kept, dropped) {
        (Declaration::Record { .. }, Declaration::Record { .. }) => {
            kept.field_names() != dropped.field_names()
        }
        (Declaration::Alias { element: a, .. }, Declaration::Alias { element: b, .. }) => {
            a.to_string() != b.to_string()
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::walk;
    use serde_json::{json, Number, Value};
    use std::collections::BTreeSet;

    fn run(document: &Value) -> Schema {
        let mut registry = Registry::new();
        walk(&mut registry, "Response", document);
        finalize(&registry)
    }

    #[test]
    fn end_to_end_declarations() {
        let schema = run(&json!({
            "id": 1,
            "tags": ["a", "b"],
            "owner": { "id": 2, "name": "x" },
        }));

        assert_eq!(
            &[
                Declaration::Record {
                    name: "Response".to_owned(),
                    fields: vec![
                        (
                            "id".to_owned(),
                            FieldType::Number {
                                sample: Number::from(1)
                            }
                        ),
                        (
                            "tags".to_owned(),
                            FieldType::Seq(Box::new(FieldType::Text {
                                sample: "a".to_owned()
                            }))
                        ),
                        ("owner".to_owned(), FieldType::Record("Owner".to_owned())),
                    ],
                },
                Declaration::Alias {
                    name: "Tags".to_owned(),
                    element: FieldType::Seq(Box::new(FieldType::Text {
                        sample: "a".to_owned()
                    })),
                },
                Declaration::Record {
                    name: "Owner".to_owned(),
                    fields: vec![
                        (
                            "id".to_owned(),
                            FieldType::Number {
                                sample: Number::from(2)
                            }
                        ),
                        (
                            "name".to_owned(),
                            FieldType::Text {
                                sample: "x".to_owned()
                            }
                        ),
                    ],
                },
            ][..],
            schema.declarations()
        );

        assert_eq!(vec!["Response", "Owner"], schema.declared_names());
        assert!(schema.collisions().is_empty());
        assert!(schema.unresolved().is_empty());
    }

    #[test]
    fn one_record_per_shape() {
        let schema = run(&json!({
            "author": { "id": 1, "name": "a" },
            "posts": [
                { "author": { "name": "b", "id": 2 } },
                { "author": { "id": 3, "name": "c" } },
            ],
        }));

        assert_eq!(
            vec!["Response", "Author", "Post"],
            schema.declared_names()
        );
    }

    #[test]
    fn first_of_same_named_shapes_is_kept_and_reported() {
        let schema = run(&json!({
            "item": { "id": 1 },
            "other": { "item": { "id": 2, "label": "x" } },
        }));

        assert_eq!(vec!["Response", "Item", "Other"], schema.declared_names());

        match schema.get("Item") {
            Some(Declaration::Record { fields, .. }) => assert_eq!(1, fields.len()),
            other => panic!("expected the first Item record, got {:?}", other),
        }

        assert_eq!(1, schema.collisions().len());
        let collision = &schema.collisions()[0];
        assert_eq!("Item", collision.name);
        assert_eq!(
            Some(["id", "label"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>()),
            collision.dropped.field_names()
        );
    }

    #[test]
    fn equivalent_aliases_are_not_collisions() {
        let schema = run(&json!({
            "tags": ["a"],
            "nested": { "tags": ["b", "c"] },
        }));

        let names: Vec<_> = schema.declarations().iter().map(Declaration::name).collect();
        assert_eq!(vec!["Response", "Tags", "Nested"], names);
        assert!(schema.collisions().is_empty());
    }

    #[test]
    fn record_and_alias_sharing_a_name_collide() {
        let schema = run(&json!({ "rows": [[{ "cell": 1 }]] }));

        assert_eq!(1, schema.collisions().len());
        assert!(schema.collisions()[0].kept.is_record());
        assert!(!schema.collisions()[0].dropped.is_record());
    }

    #[test]
    fn unresolved_declarations_are_listed() {
        let schema = run(&json!({ "ids": [], "ok": true }));

        assert_eq!(vec!["Response", "Ids"], schema.unresolved());
    }

    #[test]
    fn scalar_document_is_empty() {
        assert!(run(&json!("just text")).is_empty());
    }

    #[test]
    fn deterministic() {
        let document = json!({
            "b": { "z": 1, "a": [{ "k": "v" }] },
            "a": [1, 2, 3],
        });

        assert_eq!(run(&document), run(&document));
    }
}
