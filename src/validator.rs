//! Required-field validation.

use crate::error::{ValidateError, ValidationError};
use crate::record::OpenRecord;

fn is_missing<R: OpenRecord>(record: &R, wire_name: &str) -> bool {
    !record.slot(wire_name).is_some_and(|slot| slot.is_present())
}

/// Validate a record against its schema.
///
/// Checks every required field in schema order, then the record's
/// cross-field rule.
///
/// # Errors
///
/// Returns `ValidationError::Missing` for the first absent required field
/// (an empty sequence counts as absent), or the rule's own error.
pub fn validate<R: OpenRecord>(record: &R) -> Result<(), ValidationError> {
    if let Some(field) = R::schema()
        .required_fields()
        .find(|f| is_missing(record, f.wire_name))
    {
        return Err(ValidationError::Missing {
            field: field.wire_name,
        });
    }
    record.check_rules()
}

/// Wire names of all absent required fields, in schema order.
pub fn missing_fields<R: OpenRecord>(record: &R) -> Vec<&'static str> {
    R::schema()
        .required_fields()
        .filter(|f| is_missing(record, f.wire_name))
        .map(|f| f.wire_name)
        .collect()
}

/// Decode a document and validate the result.
///
/// Use this for inbound messages that must be complete.
pub fn decode_validated<R: OpenRecord>(bytes: &[u8]) -> Result<R, ValidateError> {
    let record: R = crate::decoder::decode(bytes)?;
    record.validate()?;
    Ok(record)
}
