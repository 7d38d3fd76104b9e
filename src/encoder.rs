//! Canonical encoding.
//!
//! Output is driven by the ordered pair projection, so keys always appear in
//! ordinal order and absent fields are never emitted.

use std::io;

use serde_json::{Map, Value};

use crate::record::OpenRecord;

/// Emit a one-element array as its bare element.
fn collapse(value: Value) -> Value {
    match value {
        Value::Array(items) => match <[Value; 1]>::try_from(items) {
            Ok([single]) => single,
            Err(items) => Value::Array(items),
        },
        other => other,
    }
}

/// Encode a record into its canonical wire value.
///
/// A record whose only present field is its shorthand field encodes as that
/// bare string.
pub fn to_value<R: OpenRecord>(record: &R) -> Value {
    let mut pairs: Vec<_> = record.pairs().collect();

    if let Some(shorthand) = R::schema().shorthand() {
        if pairs.len() == 1 && pairs[0].key == shorthand.wire_name {
            if let Some(pair) = pairs.pop() {
                return pair.value;
            }
        }
    }

    let mut map = Map::with_capacity(pairs.len());
    for pair in pairs {
        let value = if pair.collapsible {
            collapse(pair.value)
        } else {
            pair.value
        };
        map.insert(pair.key.to_string(), value);
    }
    Value::Object(map)
}

/// Encode a record as compact JSON bytes.
pub fn encode<R: OpenRecord>(record: &R) -> Vec<u8> {
    to_value(record).to_string().into_bytes()
}

/// Encode a record as indented JSON.
pub fn encode_pretty<R: OpenRecord>(record: &R) -> String {
    format!("{:#}", to_value(record))
}

/// Encode a record as compact JSON into a writer.
pub fn encode_to_writer<R: OpenRecord, W: io::Write>(record: &R, writer: W) -> io::Result<()> {
    serde_json::to_writer(writer, &to_value(record)).map_err(io::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gnap::{Client, Key, ResourceAccess};
    use serde_json::json;

    #[test]
    fn collapse_only_single_element() {
        assert_eq!(collapse(json!(["a"])), json!("a"));
        assert_eq!(collapse(json!(["a", "b"])), json!(["a", "b"]));
        assert_eq!(collapse(json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn shorthand_only_when_alone() {
        let mut client = Client::default();
        client.set_instance_id("abc");
        assert_eq!(encode(&client), br#""abc""#);

        client.set_class_id("web");
        assert_eq!(
            String::from_utf8(encode(&client)).unwrap(),
            r#"{"class_id":"web","instance_id":"abc"}"#
        );
    }

    #[test]
    fn extension_defeats_shorthand() {
        let mut client = Client::default();
        client.set_instance_id("abc");
        client.set("display", "x").unwrap();
        assert_eq!(
            to_value(&client),
            json!({"display": "x", "instance_id": "abc"})
        );
    }

    #[test]
    fn empty_record_is_empty_object() {
        assert_eq!(encode(&Key::default()), b"{}");
    }

    #[test]
    fn pretty_and_writer_agree() {
        let mut access = ResourceAccess::new("photo-api");
        access.add_actions(["read"]);

        let mut buf = Vec::new();
        encode_to_writer(&access, &mut buf).unwrap();
        assert_eq!(buf, encode(&access));

        let pretty = encode_pretty(&access);
        assert!(pretty.contains("\n  \"actions\""));
        let reparsed: Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(reparsed, to_value(&access));
    }
}
