//! Ordered pair projection.
//!
//! The single source of truth for both encoding and field iteration: the
//! present declared fields and all extension fields of a record, as
//! `(wire name, value)` pairs sorted by wire name.

use std::vec;

use serde_json::Value;

use crate::record::OpenRecord;

/// One present field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair<'a> {
    pub key: &'a str,
    /// Wire form of the value, never collapsed.
    pub value: Value,
    /// Declared collapsible; the encoder may emit a one-element sequence bare.
    pub collapsible: bool,
}

/// Iterator over the ordered pairs of a record.
///
/// The pair list is fully materialized before iteration starts, so dropping
/// the iterator early only skips the remaining pairs.
#[derive(Debug, Clone)]
pub struct Pairs<'a> {
    inner: vec::IntoIter<Pair<'a>>,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = Pair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Pairs<'_> {}

/// Project a record into its ordered pairs.
pub fn pairs<R: OpenRecord>(record: &R) -> Pairs<'_> {
    let schema = R::schema();
    let mut list = Vec::with_capacity(schema.fields.len() + record.extra().len());

    for field in schema.fields {
        if let Some(value) = record.slot(field.wire_name).and_then(|slot| slot.to_wire()) {
            list.push(Pair {
                key: field.wire_name,
                value,
                collapsible: field.collapsible,
            });
        }
    }
    for (key, value) in record.extra() {
        list.push(Pair {
            key,
            value: value.clone(),
            collapsible: false,
        });
    }

    // Ordinal order. Keys are unique.
    list.sort_by(|a, b| a.key.cmp(b.key));

    Pairs {
        inner: list.into_iter(),
    }
}
