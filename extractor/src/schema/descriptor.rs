//! Provider-facing JSON-schema descriptors derived from the Rust types.
//!
//! `schemars` emits a draft-07 document with a `definitions` table and
//! `$ref` pointers. Neither provider follows refs reliably, so both
//! descriptor flavors inline every definition. The strict flavor
//! additionally rewrites each object for OpenAI strict mode, which
//! demands `additionalProperties: false` and every property listed in
//! `required` (optional fields stay nullable through their type).

use schemars::{schema_for, JsonSchema};
use serde_json::Value;

/// Generates an inlined schema descriptor for `T`.
///
/// Suitable for Gemini's `responseSchema`, which accepts nullable
/// optional fields without a strict-mode rewrite.
#[must_use]
pub fn schema_descriptor<T: JsonSchema>() -> Value {
    let mut value = serde_json::to_value(schema_for!(T)).unwrap_or_default();
    inline_refs(&mut value);
    if let Value::Object(map) = &mut value {
        map.remove("definitions");
        map.remove("$schema");
    }
    value
}

/// Generates a strict-mode descriptor for `T`.
///
/// Inlined like [`schema_descriptor`], then every object schema gets
/// `additionalProperties: false` and a `required` array naming all of
/// its properties.
#[must_use]
pub fn strict_descriptor<T: JsonSchema>() -> Value {
    let mut value = serde_json::to_value(schema_for!(T)).unwrap_or_default();
    enforce_strict_objects(&mut value);
    inline_refs(&mut value);
    if let Value::Object(map) = &mut value {
        map.remove("definitions");
        map.remove("$schema");
    }
    value
}

/// Rewrites every object schema in the tree for strict mode.
fn enforce_strict_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type") == Some(&Value::String("object".to_string())) {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
                if let Some(Value::Object(props)) = map.get("properties") {
                    let all_keys: Vec<Value> =
                        props.keys().map(|k| Value::String(k.clone())).collect();
                    map.insert("required".to_string(), Value::Array(all_keys));
                }
            }
            for (_, v) in map.iter_mut() {
                enforce_strict_objects(v);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                enforce_strict_objects(item);
            }
        }
        _ => {}
    }
}

/// Replaces every `$ref` pointer with a copy of its definition.
fn inline_refs(value: &mut Value) {
    let definitions = if let Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }
            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::MiningReport;

    #[test]
    fn descriptor_has_no_refs_or_definitions() {
        let descriptor = schema_descriptor::<MiningReport>();
        let map = descriptor.as_object().unwrap();
        assert!(!map.contains_key("definitions"));
        assert!(!map.contains_key("$schema"));

        let rendered = serde_json::to_string(&descriptor).unwrap();
        assert!(
            !rendered.contains("$ref"),
            "all definitions must be inlined"
        );
    }

    #[test]
    fn strict_descriptor_closes_every_object() {
        let descriptor = strict_descriptor::<MiningReport>();

        fn walk(value: &Value, failures: &mut Vec<String>) {
            if let Value::Object(map) = value {
                if map.get("type") == Some(&Value::String("object".to_string())) {
                    if map.get("additionalProperties") != Some(&Value::Bool(false)) {
                        failures.push("object without additionalProperties:false".to_string());
                    }
                    let props = map
                        .get("properties")
                        .and_then(Value::as_object)
                        .map(|p| p.len())
                        .unwrap_or(0);
                    let required = map
                        .get("required")
                        .and_then(Value::as_array)
                        .map(Vec::len)
                        .unwrap_or(0);
                    if props != required {
                        failures.push(format!(
                            "object with {props} properties but {required} required"
                        ));
                    }
                }
                for v in map.values() {
                    walk(v, failures);
                }
            } else if let Value::Array(arr) = value {
                for item in arr {
                    walk(item, failures);
                }
            }
        }

        let mut failures = Vec::new();
        walk(&descriptor, &mut failures);
        assert!(failures.is_empty(), "strict-mode violations: {failures:?}");
    }

    #[test]
    fn strict_descriptor_inlines_nested_types() {
        let descriptor = strict_descriptor::<MiningReport>();
        let rights = &descriptor["properties"]["rights"];
        // The rights field must be the inlined object, not a pointer.
        assert!(rights.get("$ref").is_none());

        let rendered = serde_json::to_string(&descriptor).unwrap();
        assert!(!rendered.contains("$ref"));
    }

    #[test]
    fn enum_literals_survive_into_the_descriptor() {
        let rendered = serde_json::to_string(&strict_descriptor::<MiningReport>()).unwrap();
        assert!(rendered.contains("prospecting-right"));
        assert!(rendered.contains("mining-right"));
        assert!(rendered.contains("detailed-survey"));
    }
}
