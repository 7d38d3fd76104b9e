//! The open record contract.
//!
//! Every record type stores its declared fields in typed slots and keeps
//! anything else in an extension mapping. Typed accessors are generated per
//! type by [`record!`](crate::record!); the name-indexed operations below are
//! shared by all types and observe the same slots.

use std::collections::HashMap;
use std::fmt;
use std::io;

use serde_json::Value;

use crate::error::{ParseError, TypeError, ValidationError};
use crate::pairs::Pairs;
use crate::schema::RecordSchema;
use crate::types::json_type_name;
use crate::value::{child_path, Slot};

/// Undeclared wire keys and their raw values.
pub type ExtraFields = HashMap<String, Value>;

/// A record type defined by a [`RecordSchema`].
pub trait OpenRecord: Default + Clone + fmt::Debug {
    fn schema() -> &'static RecordSchema;

    #[doc(hidden)]
    fn slot(&self, wire_name: &str) -> Option<&dyn Slot>;

    #[doc(hidden)]
    fn slot_mut(&mut self, wire_name: &str) -> Option<&mut dyn Slot>;

    #[doc(hidden)]
    fn extra(&self) -> &ExtraFields;

    #[doc(hidden)]
    fn extra_mut(&mut self) -> &mut ExtraFields;

    /// Cross-field rule evaluated by [`validate`](OpenRecord::validate)
    /// after the required-field checks.
    fn check_rules(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Wire value of a field by name.
    ///
    /// Declared fields are looked up in their slot (`None` when absent),
    /// anything else in the extension mapping.
    fn get(&self, name: &str) -> Option<Value> {
        match self.slot(name) {
            Some(slot) => slot.to_wire(),
            None => self.extra().get(name).cloned(),
        }
    }

    /// Set a field by name.
    ///
    /// A declared field only accepts a value of its declared kind; `null`
    /// clears an optional scalar but is rejected for a sequence. An
    /// undeclared name stores any value as an extension field.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError`] if the value does not match a declared field's kind.
    fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), TypeError> {
        let value = value.into();
        let Some(field) = Self::schema().field(name) else {
            self.extra_mut().insert(name.to_string(), value);
            return Ok(());
        };
        if value.is_null() && field.kind.is_sequence() {
            let expected = field.kind.to_string();
            return Err(TypeError {
                field: name.to_string(),
                expected: expected.clone(),
                actual: "null",
                source: ParseError::UnexpectedToken {
                    path: child_path("", name),
                    expected,
                    actual: "null",
                },
            });
        }
        let Some(slot) = self.slot_mut(field.wire_name) else {
            self.extra_mut().insert(name.to_string(), value);
            return Ok(());
        };
        slot.assign(&value, false, &child_path("", name))
            .map_err(|source| TypeError {
                field: name.to_string(),
                expected: field.kind.to_string(),
                actual: match &source {
                    ParseError::UnexpectedToken { actual, .. } => *actual,
                    _ => json_type_name(&value),
                },
                source,
            })
    }

    /// Remove a field by name, returning whether it was present.
    fn unset(&mut self, name: &str) -> bool {
        match self.slot_mut(name) {
            Some(slot) => {
                let present = slot.is_present();
                slot.clear();
                present
            }
            None => self.extra_mut().remove(name).is_some(),
        }
    }

    fn is_present(&self, name: &str) -> bool {
        match self.slot(name) {
            Some(slot) => slot.is_present(),
            None => self.extra().contains_key(name),
        }
    }

    /// Value of an extension (undeclared) field.
    fn extension(&self, name: &str) -> Option<&Value> {
        self.extra().get(name)
    }

    fn extensions(&self) -> &ExtraFields {
        self.extra()
    }

    /// Check required fields, then the record's cross-field rule.
    ///
    /// Never called implicitly by encoding.
    fn validate(&self) -> Result<(), ValidationError> {
        crate::validator::validate(self)
    }

    /// Wire names of every absent required field.
    fn missing_fields(&self) -> Vec<&'static str> {
        crate::validator::missing_fields(self)
    }

    /// The canonical, key-ordered view of the record.
    fn pairs(&self) -> Pairs<'_> {
        crate::pairs::pairs(self)
    }

    fn to_value(&self) -> Value {
        crate::encoder::to_value(self)
    }

    /// Compact canonical encoding.
    fn encode(&self) -> Vec<u8> {
        crate::encoder::encode(self)
    }

    fn encode_pretty(&self) -> String {
        crate::encoder::encode_pretty(self)
    }

    fn encode_to_writer<W: io::Write>(&self, writer: W) -> io::Result<()> {
        crate::encoder::encode_to_writer(self, writer)
    }

    fn decode(bytes: &[u8]) -> Result<Self, ParseError> {
        crate::decoder::decode(bytes)
    }

    fn decode_str(s: &str) -> Result<Self, ParseError> {
        crate::decoder::decode_str(s)
    }

    fn from_value(value: &Value) -> Result<Self, ParseError> {
        crate::decoder::decode_value(value)
    }

    /// Clear every declared slot and the extension mapping.
    fn reset(&mut self) {
        *self = Self::default();
    }
}
