use crate::naming::{pascal_case, singularize};
use crate::registry::{shape_key, Registry};
use serde_json::Value;

/// Walks `value` depth-first, registering every object and array found.
///
/// Objects register a record named `name`, then each child is walked under
/// the PascalCased key. Arrays walk their elements under the singular form
/// of `name` and then register an alias named `name`. Scalars and null
/// register nothing.
pub fn walk<'a>(registry: &mut Registry<'a>, name: &str, value: &'a Value) {
    match value {
        Value::Object(object) => {
            let fields = object.iter().map(|(k, v)| (k.clone(), v)).collect();
            registry.register_record(name, shape_key(object), fields);

            for (key, child) in object {
                walk(registry, &pascal_case(key), child);
            }
        }
        Value::Array(elements) => {
            let element_name = pascal_case(singularize(name));
            for element in elements {
                walk(registry, &element_name, element);
            }

            registry.register_alias(name, value);
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}
