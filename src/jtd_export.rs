use crate::field_type::FieldType;
use crate::finalize::{ResolvedDeclaration, Schema};
use crate::num_type::NumType;
use crate::registry::Declaration;
use chrono::DateTime;
use jtd::Type;
use std::collections::BTreeMap;

/// Exports a finalized schema as a JSON Typedef schema.
///
/// Every declaration becomes a definition. The root schema describes the
/// document itself, as recorded by [`Schema::root`]: a reference for an
/// object, `elements` for an array. Without a recorded root it is the empty
/// form.
///
/// ```
/// use serde_json::json;
/// use aeson_infer::{infer, to_jtd_schema, NumType};
///
/// let schema = infer("Response", &json!({ "ok": true, "ts": "2021-03-04T05:06:07Z" }));
/// let jtd = to_jtd_schema(&schema, NumType::Uint8);
/// let value = serde_json::to_value(jtd.into_serde_schema()).unwrap();
///
/// assert_eq!(json!("Response"), value["ref"]);
/// assert_eq!(
///     json!("timestamp"),
///     value["definitions"]["Response"]["properties"]["ts"]["type"],
/// );
/// ```
pub fn to_jtd_schema(schema: &Schema, default_num_type: NumType) -> jtd::Schema {
    let definitions = schema
        .declarations()
        .iter()
        .map(|decl| {
            (
                decl.name().to_owned(),
                declaration_schema(decl, default_num_type),
            )
        })
        .collect();

    let mut root = match schema.root() {
        Some(type_) => field_schema(type_, default_num_type),
        None => jtd::Schema::Empty {
            definitions: Default::default(),
            metadata: Default::default(),
        },
    };

    match &mut root {
        jtd::Schema::Empty { definitions: d, .. }
        | jtd::Schema::Ref { definitions: d, .. }
        | jtd::Schema::Type { definitions: d, .. }
        | jtd::Schema::Enum { definitions: d, .. }
        | jtd::Schema::Elements { definitions: d, .. }
        | jtd::Schema::Properties { definitions: d, .. }
        | jtd::Schema::Values { definitions: d, .. }
        | jtd::Schema::Discriminator { definitions: d, .. } => *d = definitions,
    }

    root
}

fn declaration_schema(decl: &ResolvedDeclaration, num_type: NumType) -> jtd::Schema {
    match decl {
        Declaration::Record { fields, .. } => {
            let mut properties = BTreeMap::new();
            let mut optional_properties = BTreeMap::new();

            for (key, type_) in fields {
                let target = if type_.is_optional() {
                    &mut optional_properties
                } else {
                    &mut properties
                };

                target.insert(key.clone(), field_schema(type_, num_type));
            }

            // An object with no fields at all still needs the properties
            // form, or it would read back as the empty form.
            let properties_is_present = !properties.is_empty() || optional_properties.is_empty();

            jtd::Schema::Properties {
                definitions: Default::default(),
                metadata: Default::default(),
                nullable: false,
                properties,
                optional_properties,
                properties_is_present,
                additional_properties: true,
            }
        }
        Declaration::Alias { element, .. } => field_schema(element, num_type),
    }
}

fn field_schema(type_: &FieldType, num_type: NumType) -> jtd::Schema {
    match type_ {
        FieldType::Text { sample } => {
            if DateTime::parse_from_rfc3339(sample).is_ok() {
                type_schema(Type::Timestamp)
            } else {
                type_schema(Type::String)
            }
        }
        FieldType::Number { sample } => type_schema(
            sample
                .as_f64()
                .map_or(Type::Float64, |n| num_type.narrowest_for(n)),
        ),
        FieldType::Bool => type_schema(Type::Boolean),
        FieldType::Record(name) => jtd::Schema::Ref {
            definitions: Default::default(),
            metadata: Default::default(),
            nullable: false,
            ref_: name.clone(),
        },
        FieldType::Seq(inner) => jtd::Schema::Elements {
            definitions: Default::default(),
            metadata: Default::default(),
            nullable: false,
            elements: Box::new(field_schema(inner, num_type)),
        },
        FieldType::Maybe | FieldType::Unknown => jtd::Schema::Empty {
            definitions: Default::default(),
            metadata: Default::default(),
        },
    }
}

fn type_schema(type_: Type) -> jtd::Schema {
    jtd::Schema::Type {
        definitions: Default::default(),
        metadata: Default::default(),
        nullable: false,
        type_,
    }
}
