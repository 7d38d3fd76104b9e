//! JSON Schema export and structural checks.
//!
//! Renders a record type's schema as a draft 2020-12 JSON Schema, so a raw
//! document can be linted for shape problems (every violation, with its
//! instance path) before or instead of decoding it.

use serde_json::{json, Map, Value};

use crate::error::{CheckError, Violation};
use crate::record::OpenRecord;
use crate::schema::{ElementKind, FieldSchema, RecordSchema, ValueKind};

const DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// JSON Schema of a record type.
pub fn json_schema<R: OpenRecord>() -> Value {
    document_for(R::schema())
}

/// JSON Schema of the record described by `schema`.
///
/// Every record reachable from the root, the root included, is rendered once
/// under `$defs` and referenced by name.
pub fn document_for(schema: &'static RecordSchema) -> Value {
    let mut defs = Map::new();
    let root = record_ref(schema, &mut defs);

    let mut doc = Map::new();
    doc.insert("$schema".into(), json!(DRAFT));
    doc.insert("title".into(), json!(schema.name));
    if let Value::Object(reference) = root {
        doc.extend(reference);
    }
    doc.insert("$defs".into(), Value::Object(defs));
    Value::Object(doc)
}

fn record_ref(schema: &'static RecordSchema, defs: &mut Map<String, Value>) -> Value {
    if !defs.contains_key(schema.name) {
        // Placeholder first, so recursive references terminate.
        defs.insert(schema.name.to_string(), Value::Null);
        let def = record_def(schema, defs);
        defs.insert(schema.name.to_string(), def);
    }
    json!({ "$ref": format!("#/$defs/{}", schema.name) })
}

fn record_def(schema: &'static RecordSchema, defs: &mut Map<String, Value>) -> Value {
    let mut properties = Map::new();
    for field in schema.fields {
        properties.insert(field.wire_name.to_string(), field_schema(field, defs));
    }

    let mut object = Map::new();
    object.insert("type".into(), json!("object"));
    object.insert("properties".into(), Value::Object(properties));
    let required: Vec<&str> = schema.required_fields().map(|f| f.wire_name).collect();
    if !required.is_empty() {
        object.insert("required".into(), json!(required));
    }

    match schema.shorthand() {
        Some(field) => json!({
            "anyOf": [
                { "type": "string", "description": field.wire_name },
                Value::Object(object)
            ]
        }),
        None => Value::Object(object),
    }
}

fn field_schema(field: &FieldSchema, defs: &mut Map<String, Value>) -> Value {
    match field.kind {
        ValueKind::Single(kind) => element_schema(kind, defs),
        ValueKind::Sequence(kind) => {
            let element = element_schema(kind, defs);
            let array = json!({ "type": "array", "items": element.clone() });
            if field.collapsible {
                json!({ "anyOf": [element, array] })
            } else {
                array
            }
        }
    }
}

fn element_schema(kind: ElementKind, defs: &mut Map<String, Value>) -> Value {
    match kind {
        ElementKind::String => json!({ "type": "string" }),
        ElementKind::Int => json!({ "type": "integer" }),
        ElementKind::Bool => json!({ "type": "boolean" }),
        ElementKind::KeyMaterial => json!({ "type": "object" }),
        ElementKind::Token(tokens) => json!({ "type": "string", "enum": tokens }),
        ElementKind::Record(schema) => record_ref(schema(), defs),
    }
}

/// Check a raw document against a record type's JSON Schema.
///
/// # Errors
///
/// Returns `CheckError::Invalid` with every violation found.
pub fn check_document<R: OpenRecord>(document: &Value) -> Result<(), CheckError> {
    check_against(&json_schema::<R>(), document)
}

/// Check a document against an already rendered schema.
pub fn check_against(schema: &Value, document: &Value) -> Result<(), CheckError> {
    let validator = jsonschema::validator_for(schema).map_err(|e| CheckError::InvalidSchema {
        message: e.to_string(),
    })?;

    let violations: Vec<Violation> = validator
        .iter_errors(document)
        .map(|e| Violation {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(CheckError::Invalid { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gnap::{Client, GrantRequest, ResourceAccess};

    #[test]
    fn renders_fields_and_required() {
        let schema = json_schema::<ResourceAccess>();
        assert_eq!(schema["$schema"], DRAFT);
        assert_eq!(schema["$ref"], "#/$defs/ResourceAccess");

        let def = &schema["$defs"]["ResourceAccess"];
        assert_eq!(def["type"], "object");
        assert_eq!(def["required"], json!(["type"]));
        assert_eq!(
            def["properties"]["actions"],
            json!({"type": "array", "items": {"type": "string"}})
        );
    }

    #[test]
    fn renders_shorthand_and_collapsible() {
        let schema = json_schema::<GrantRequest>();
        let defs = &schema["$defs"];

        let client = &defs["Client"]["anyOf"];
        assert_eq!(client[0]["type"], "string");
        assert_eq!(client[1]["required"], json!(["key"]));

        let tokens = &defs["GrantRequest"]["properties"]["access_token"]["anyOf"];
        assert_eq!(tokens[0], json!({"$ref": "#/$defs/AccessTokenRequest"}));
        assert_eq!(tokens[1]["type"], "array");

        assert!(defs.get("ResourceAccess").is_some());
        assert!(defs.get("InteractionFinish").is_some());
        let start = &defs["InteractionRequest"]["properties"]["start"];
        assert_eq!(start["items"]["enum"], json!(["redirect", "app", "user_code"]));
    }

    #[test]
    fn check_accepts_protocol_shapes() {
        let document = json!({
            "access_token": {"access": [{"type": "photo-api", "actions": ["read"]}]},
            "client": "7C7C4AZ9KHRS6X63AJAO",
            "x-ext": true
        });
        assert!(check_document::<GrantRequest>(&document).is_ok());
        assert!(check_document::<Client>(&json!("abc")).is_ok());
    }

    #[test]
    fn check_reports_every_violation() {
        let err = check_document::<ResourceAccess>(&json!({"type": 5, "actions": "read"}))
            .unwrap_err();
        let CheckError::Invalid { violations } = err else {
            panic!("expected violations");
        };
        let mut paths: Vec<_> = violations.iter().map(|v| v.path.as_str()).collect();
        paths.sort();
        assert_eq!(paths, ["/actions", "/type"]);
    }

    #[test]
    fn check_reports_missing_required() {
        let err = check_document::<ResourceAccess>(&json!({"actions": ["read"]})).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
