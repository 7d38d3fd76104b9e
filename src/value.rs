//! Typed field slots and their wire conversions.

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::schema::{ElementKind, ValueKind};
use crate::types::json_type_name;

/// A type that can live in a declared field slot.
pub trait WireValue: Sized + Clone {
    /// Kind reported by the schema for this type.
    const KIND: ElementKind;

    /// Convert a wire value, reporting failures at `path`.
    fn from_wire(value: &Value, path: &str) -> Result<Self, ParseError>;

    fn to_wire(&self) -> Value;
}

fn unexpected(value: &Value, expected: impl ToString, path: &str) -> ParseError {
    ParseError::UnexpectedToken {
        path: path.to_string(),
        expected: expected.to_string(),
        actual: json_type_name(value),
    }
}

/// Append an object key or array index to a JSON Pointer (RFC 6901).
pub(crate) fn child_path(path: &str, key: &str) -> String {
    format!("{}/{}", path, key.replace('~', "~0").replace('/', "~1"))
}

impl WireValue for String {
    const KIND: ElementKind = ElementKind::String;

    fn from_wire(value: &Value, path: &str) -> Result<Self, ParseError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(unexpected(other, Self::KIND, path)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }
}

impl WireValue for i64 {
    const KIND: ElementKind = ElementKind::Int;

    fn from_wire(value: &Value, path: &str) -> Result<Self, ParseError> {
        match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| ParseError::InvalidValue {
                path: path.to_string(),
                message: format!("{} is not a 64-bit integer", n),
            }),
            other => Err(unexpected(other, Self::KIND, path)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::from(*self)
    }
}

impl WireValue for bool {
    const KIND: ElementKind = ElementKind::Bool;

    fn from_wire(value: &Value, path: &str) -> Result<Self, ParseError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(unexpected(other, Self::KIND, path)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }
}

/// Opaque key material: a JSON Web Key kept as its raw members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Jwk(Map<String, Value>);

impl Jwk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key type (`kty` member), if present.
    pub fn kty(&self) -> Option<&str> {
        self.0.get("kty").and_then(Value::as_str)
    }

    pub fn get(&self, member: &str) -> Option<&Value> {
        self.0.get(member)
    }

    pub fn insert(&mut self, member: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(member.into(), value.into());
        self
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Jwk {
    fn from(members: Map<String, Value>) -> Self {
        Jwk(members)
    }
}

impl WireValue for Jwk {
    const KIND: ElementKind = ElementKind::KeyMaterial;

    fn from_wire(value: &Value, path: &str) -> Result<Self, ParseError> {
        match value {
            Value::Object(members) => Ok(Jwk(members.clone())),
            other => Err(unexpected(other, Self::KIND, path)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Storage of one declared field, as seen by the generic record operations.
///
/// Optional scalars are stored as `Option<T>`, sequences as `Vec<T>`; an
/// empty sequence is absent.
pub trait Slot {
    fn is_present(&self) -> bool;

    /// Wire form of the stored value, or `None` when absent.
    fn to_wire(&self) -> Option<Value>;

    fn clear(&mut self);

    /// Replace the stored value with `value`; `null` clears the slot.
    ///
    /// With `collapse`, a sequence slot also accepts a bare element and
    /// stores it as a one-element sequence. On error the slot is unchanged.
    fn assign(&mut self, value: &Value, collapse: bool, path: &str) -> Result<(), ParseError>;
}

impl<T: WireValue> Slot for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }

    fn to_wire(&self) -> Option<Value> {
        self.as_ref().map(WireValue::to_wire)
    }

    fn clear(&mut self) {
        *self = None;
    }

    fn assign(&mut self, value: &Value, _collapse: bool, path: &str) -> Result<(), ParseError> {
        *self = match value {
            Value::Null => None,
            other => Some(T::from_wire(other, path)?),
        };
        Ok(())
    }
}

impl<T: WireValue> Slot for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }

    fn to_wire(&self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        Some(Value::Array(self.iter().map(WireValue::to_wire).collect()))
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn assign(&mut self, value: &Value, collapse: bool, path: &str) -> Result<(), ParseError> {
        *self = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| T::from_wire(item, &child_path(path, &i.to_string())))
                .collect::<Result<_, _>>()?,
            // The collapsed form of a one-element sequence.
            other if collapse => vec![T::from_wire(other, path)?],
            other => return Err(unexpected(other, ValueKind::Sequence(T::KIND), path)),
        };
        Ok(())
    }
}
