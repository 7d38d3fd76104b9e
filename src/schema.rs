//! Declarative record schemas.
//!
//! A [`RecordSchema`] is pure data: the field list of one record type, with
//! each field's wire name, value kind, and encoding flags. Every generic
//! operation (dynamic access, validation, pair projection, encoding,
//! decoding) is driven by it.

use std::collections::HashSet;
use std::fmt;

use crate::error::SchemaError;

/// Storage name every record reserves for its extension mapping.
pub(crate) const RESERVED_ACCESSOR: &str = "extra";

/// Kind of a single (non-sequence) field value.
#[derive(Debug, Clone, Copy)]
pub enum ElementKind {
    String,
    Int,
    Bool,
    /// Opaque key material (a JSON Web Key object).
    KeyMaterial,
    /// One of a closed set of string tokens.
    Token(&'static [&'static str]),
    /// A nested record, resolved lazily to avoid cycles between schemas.
    Record(fn() -> &'static RecordSchema),
}

impl ElementKind {
    pub fn is_string(&self) -> bool {
        matches!(self, ElementKind::String)
    }

    /// Schema of the nested record, if this is a record kind.
    pub fn record(&self) -> Option<&'static RecordSchema> {
        match self {
            ElementKind::Record(schema) => Some(schema()),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::String => f.write_str("string"),
            ElementKind::Int => f.write_str("integer"),
            ElementKind::Bool => f.write_str("boolean"),
            ElementKind::KeyMaterial => f.write_str("key material object"),
            ElementKind::Token(tokens) => {
                f.write_str("one of ")?;
                for (i, token) in tokens.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{}\"", token)?;
                }
                Ok(())
            }
            ElementKind::Record(schema) => write!(f, "{} object", schema().name),
        }
    }
}

/// Kind of a field value: one element or a sequence of them.
#[derive(Debug, Clone, Copy)]
pub enum ValueKind {
    Single(ElementKind),
    Sequence(ElementKind),
}

impl ValueKind {
    pub fn is_sequence(&self) -> bool {
        matches!(self, ValueKind::Sequence(_))
    }

    pub fn element(&self) -> ElementKind {
        match self {
            ValueKind::Single(kind) | ValueKind::Sequence(kind) => *kind,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Single(kind) => kind.fmt(f),
            ValueKind::Sequence(kind) => write!(f, "array of {}", kind),
        }
    }
}

/// One declared field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    /// Key used on the wire.
    pub wire_name: &'static str,
    /// Name of the typed accessor.
    pub accessor: &'static str,
    pub kind: ValueKind,
    pub required: bool,
    /// A one-element sequence is encoded as its bare element.
    pub collapsible: bool,
    /// The whole record may be encoded as a bare string filling this field.
    pub shorthand: bool,
}

/// Schema of one record type.
#[derive(Debug)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSchema],
    /// Name of the cross-field rule evaluated after required-field checks.
    pub rule: Option<&'static str>,
}

impl RecordSchema {
    /// Look up a declared field by wire name.
    pub fn field(&self, wire_name: &str) -> Option<&'static FieldSchema> {
        self.fields.iter().find(|f| f.wire_name == wire_name)
    }

    /// The field a bare string decodes into, if the record allows shorthand.
    pub fn shorthand(&self) -> Option<&'static FieldSchema> {
        self.fields.iter().find(|f| f.shorthand)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSchema> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Check the basic shape rules of the schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found.
    pub fn check(&self) -> Result<(), SchemaError> {
        let shapes: Vec<FieldShape<'_>> = self
            .fields
            .iter()
            .map(|f| FieldShape {
                wire_name: f.wire_name,
                accessor: f.accessor,
                sequence: f.kind.is_sequence(),
                string: f.kind.element().is_string(),
                collapsible: f.collapsible,
                shorthand: f.shorthand,
            })
            .collect();
        check_shapes(self.name, &shapes)
    }
}

/// Shape of a field as far as schema checks are concerned.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldShape<'a> {
    pub wire_name: &'a str,
    pub accessor: &'a str,
    pub sequence: bool,
    pub string: bool,
    pub collapsible: bool,
    pub shorthand: bool,
}

/// Shared by [`RecordSchema::check`] and the generator.
pub(crate) fn check_shapes(record: &str, fields: &[FieldShape<'_>]) -> Result<(), SchemaError> {
    let mut wire_names = HashSet::new();
    let mut accessors = HashSet::new();

    for field in fields {
        if field.accessor == RESERVED_ACCESSOR {
            return Err(SchemaError::ReservedAccessor {
                record: record.to_string(),
                field: field.accessor.to_string(),
            });
        }
        if !wire_names.insert(field.wire_name) {
            return Err(SchemaError::DuplicateWireName {
                record: record.to_string(),
                wire_name: field.wire_name.to_string(),
            });
        }
        if !accessors.insert(field.accessor) {
            return Err(SchemaError::DuplicateAccessor {
                record: record.to_string(),
                accessor: field.accessor.to_string(),
            });
        }
        if field.collapsible && !field.sequence {
            return Err(SchemaError::CollapsibleNotSequence {
                record: record.to_string(),
                field: field.accessor.to_string(),
            });
        }
        if field.shorthand && (field.sequence || !field.string) {
            return Err(SchemaError::ShorthandNotString {
                record: record.to_string(),
                field: field.accessor.to_string(),
            });
        }
    }

    let shorthand: Vec<String> = fields
        .iter()
        .filter(|f| f.shorthand)
        .map(|f| f.accessor.to_string())
        .collect();
    if shorthand.len() > 1 {
        return Err(SchemaError::MultipleShorthand {
            record: record.to_string(),
            fields: shorthand,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(wire_name: &'static str, kind: ValueKind) -> FieldSchema {
        FieldSchema {
            wire_name,
            accessor: wire_name,
            kind,
            required: false,
            collapsible: false,
            shorthand: false,
        }
    }

    static INNER: RecordSchema = RecordSchema {
        name: "Inner",
        fields: &[],
        rule: None,
    };

    fn inner() -> &'static RecordSchema {
        &INNER
    }

    #[test]
    fn kind_display() {
        assert_eq!(ValueKind::Single(ElementKind::Int).to_string(), "integer");
        assert_eq!(
            ValueKind::Sequence(ElementKind::String).to_string(),
            "array of string"
        );
        assert_eq!(
            ValueKind::Sequence(ElementKind::Record(inner)).to_string(),
            "array of Inner object"
        );
        assert_eq!(
            ElementKind::Token(&["push", "redirect"]).to_string(),
            r#"one of "push", "redirect""#
        );
    }

    #[test]
    fn record_kind_resolves_schema() {
        let kind = ElementKind::Record(inner);
        assert_eq!(kind.record().map(|s| s.name), Some("Inner"));
        assert!(ElementKind::Bool.record().is_none());
    }

    #[test]
    fn check_accepts_valid_schema() {
        let mut id = field("instance_id", ValueKind::Single(ElementKind::String));
        id.shorthand = true;
        let mut tokens = field("access_token", ValueKind::Sequence(ElementKind::Record(inner)));
        tokens.collapsible = true;
        let fields = [id, tokens];
        let shapes = to_shapes(&fields);
        assert!(check_shapes("Test", &shapes).is_ok());
    }

    fn to_shapes(fields: &[FieldSchema]) -> Vec<FieldShape<'_>> {
        fields
            .iter()
            .map(|f| FieldShape {
                wire_name: f.wire_name,
                accessor: f.accessor,
                sequence: f.kind.is_sequence(),
                string: f.kind.element().is_string(),
                collapsible: f.collapsible,
                shorthand: f.shorthand,
            })
            .collect()
    }

    #[test]
    fn check_rejects_duplicate_wire_name() {
        let a = field("uri", ValueKind::Single(ElementKind::String));
        let mut b = field("uri", ValueKind::Single(ElementKind::String));
        b.accessor = "location";
        let err = check_shapes("Test", &to_shapes(&[a, b])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateWireName {
                record: "Test".into(),
                wire_name: "uri".into()
            }
        );
    }

    #[test]
    fn check_rejects_multiple_shorthand() {
        let mut a = field("a", ValueKind::Single(ElementKind::String));
        a.shorthand = true;
        let mut b = field("b", ValueKind::Single(ElementKind::String));
        b.shorthand = true;
        let err = check_shapes("Test", &to_shapes(&[a, b])).unwrap_err();
        assert!(matches!(err, SchemaError::MultipleShorthand { ref fields, .. } if fields.len() == 2));
    }

    #[test]
    fn check_rejects_bad_flags() {
        let mut a = field("a", ValueKind::Single(ElementKind::String));
        a.collapsible = true;
        let err = check_shapes("Test", &to_shapes(&[a])).unwrap_err();
        assert!(matches!(err, SchemaError::CollapsibleNotSequence { .. }));

        let mut b = field("b", ValueKind::Single(ElementKind::Int));
        b.shorthand = true;
        let err = check_shapes("Test", &to_shapes(&[b])).unwrap_err();
        assert!(matches!(err, SchemaError::ShorthandNotString { .. }));

        let c = field("extra", ValueKind::Single(ElementKind::Bool));
        let err = check_shapes("Test", &to_shapes(&[c])).unwrap_err();
        assert!(matches!(err, SchemaError::ReservedAccessor { .. }));
    }
}
