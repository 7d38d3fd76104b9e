//! Tolerant decoding.
//!
//! Declared keys decode into their typed slots; every other key is kept
//! verbatim in the extension mapping. Required fields are not checked here.

use std::io;

use serde_json::Value;
use tracing::trace;

use crate::error::ParseError;
use crate::record::OpenRecord;
use crate::types::json_type_name;
use crate::value::child_path;

/// Decode a record from JSON bytes.
///
/// # Errors
///
/// Returns `ParseError` on malformed or truncated input, a top-level value
/// that is neither an object nor an allowed shorthand string, or a declared
/// field whose value does not fit its kind.
pub fn decode<R: OpenRecord>(bytes: &[u8]) -> Result<R, ParseError> {
    let value: Value = serde_json::from_slice(bytes).map_err(ParseError::from_json)?;
    decode_at(&value, "")
}

pub fn decode_str<R: OpenRecord>(s: &str) -> Result<R, ParseError> {
    decode(s.as_bytes())
}

pub fn decode_from_reader<R: OpenRecord, Rd: io::Read>(reader: Rd) -> Result<R, ParseError> {
    let value: Value = serde_json::from_reader(reader).map_err(ParseError::from_json)?;
    decode_at(&value, "")
}

/// Decode a record from an already parsed value.
pub fn decode_value<R: OpenRecord>(value: &Value) -> Result<R, ParseError> {
    decode_at(value, "")
}

/// Decode a record located at `path` in the enclosing document.
#[doc(hidden)]
pub fn decode_at<R: OpenRecord>(value: &Value, path: &str) -> Result<R, ParseError> {
    let schema = R::schema();
    let mut record = R::default();

    match value {
        Value::Object(members) => {
            // Duplicate keys were already resolved by the parser, last one wins.
            for (key, item) in members {
                if let Some(field) = schema.field(key) {
                    if let Some(slot) = record.slot_mut(field.wire_name) {
                        slot.assign(item, field.collapsible, &child_path(path, key))?;
                        continue;
                    }
                }
                trace!(record = schema.name, key = %key, "keeping extension field");
                record.extra_mut().insert(key.clone(), item.clone());
            }
            Ok(record)
        }
        Value::String(_) => {
            let shorthand = schema.shorthand().ok_or_else(|| unexpected(value, path, false))?;
            let slot = record
                .slot_mut(shorthand.wire_name)
                .ok_or_else(|| unexpected(value, path, false))?;
            slot.assign(value, false, path)?;
            Ok(record)
        }
        other => Err(unexpected(other, path, schema.shorthand().is_some())),
    }
}

fn unexpected(value: &Value, path: &str, shorthand: bool) -> ParseError {
    ParseError::UnexpectedToken {
        path: path.to_string(),
        expected: if shorthand { "object or string" } else { "object" }.to_string(),
        actual: json_type_name(value),
    }
}
