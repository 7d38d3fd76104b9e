//! The `record!` macro: one schema-driven record type per invocation.

/// Define a record type from its field list.
///
/// Each field is `accessor: Type => "wire name"` with an optional flag list
/// (`required`, `collapsible`, `shorthand`). A bracketed type such as
/// `[String]` declares a sequence. The macro emits the struct, a static
/// [`RecordSchema`](crate::schema::RecordSchema), typed accessors, and the
/// [`OpenRecord`](crate::OpenRecord), `WireValue`, and serde impls.
///
/// ```
/// use gnap_codec::{record, OpenRecord};
///
/// record! {
///     /// A labelled thing.
///     pub struct Thing: THING {
///         label: String => "label" [required],
///         tags: [String] => "tag" [collapsible],
///     }
/// }
///
/// let mut thing = Thing::default();
/// thing.set_label("a").add_tags(["x"]);
/// assert_eq!(thing.encode(), br#"{"label":"a","tag":"x"}"#);
/// assert!(Thing::default().validate().is_err());
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $schema:ident $(, rule = $rule:path)? {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $fty:tt => $wire:literal $([$($flag:ident),* $(,)?])?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                $field: $crate::__record_storage!($fty),
            )*
            extra: $crate::record::ExtraFields,
        }

        #[doc = concat!("Schema of [`", stringify!($name), "`].")]
        pub static $schema: $crate::schema::RecordSchema = $crate::schema::RecordSchema {
            name: stringify!($name),
            fields: &[
                $(
                    $crate::schema::FieldSchema {
                        wire_name: $wire,
                        accessor: stringify!($field),
                        kind: $crate::__record_kind!($fty),
                        required: $crate::__record_flag!(required; $($($flag),*)?),
                        collapsible: $crate::__record_flag!(collapsible; $($($flag),*)?),
                        shorthand: $crate::__record_flag!(shorthand; $($($flag),*)?),
                    },
                )*
            ],
            rule: $crate::__record_rule!($($rule)?),
        };

        impl $name {
            $( $crate::__record_accessors!($field: $fty); )*
        }

        impl $crate::record::OpenRecord for $name {
            fn schema() -> &'static $crate::schema::RecordSchema {
                &$schema
            }

            fn slot(&self, wire_name: &str) -> ::std::option::Option<&dyn $crate::value::Slot> {
                match wire_name {
                    $( $wire => ::std::option::Option::Some(&self.$field as &dyn $crate::value::Slot), )*
                    _ => ::std::option::Option::None,
                }
            }

            fn slot_mut(
                &mut self,
                wire_name: &str,
            ) -> ::std::option::Option<&mut dyn $crate::value::Slot> {
                match wire_name {
                    $( $wire => ::std::option::Option::Some(&mut self.$field as &mut dyn $crate::value::Slot), )*
                    _ => ::std::option::Option::None,
                }
            }

            fn extra(&self) -> &$crate::record::ExtraFields {
                &self.extra
            }

            fn extra_mut(&mut self) -> &mut $crate::record::ExtraFields {
                &mut self.extra
            }

            $(
                fn check_rules(&self) -> ::std::result::Result<(), $crate::ValidationError> {
                    $rule(self)
                }
            )?
        }

        impl $crate::value::WireValue for $name {
            const KIND: $crate::schema::ElementKind =
                $crate::schema::ElementKind::Record(<$name as $crate::record::OpenRecord>::schema);

            fn from_wire(
                value: &$crate::__private::serde_json::Value,
                path: &str,
            ) -> ::std::result::Result<Self, $crate::ParseError> {
                $crate::decoder::decode_at(value, path)
            }

            fn to_wire(&self) -> $crate::__private::serde_json::Value {
                $crate::encoder::to_value(self)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(
                    &$crate::encoder::to_value(self),
                    serializer,
                )
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let value = <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                $crate::decoder::decode_value(&value)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_storage {
    ([$ty:ident]) => { ::std::vec::Vec<$ty> };
    ($ty:ident) => { ::std::option::Option<$ty> };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_kind {
    ([$ty:ident]) => {
        $crate::schema::ValueKind::Sequence(<$ty as $crate::value::WireValue>::KIND)
    };
    ($ty:ident) => {
        $crate::schema::ValueKind::Single(<$ty as $crate::value::WireValue>::KIND)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_flag {
    ($want:ident;) => { false };
    (required; required $(, $rest:ident)*) => { true };
    (collapsible; collapsible $(, $rest:ident)*) => { true };
    (shorthand; shorthand $(, $rest:ident)*) => { true };
    ($want:ident; $other:ident $(, $rest:ident)*) => {
        $crate::__record_flag!($want; $($rest),*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_rule {
    () => { ::std::option::Option::None };
    ($rule:path) => { ::std::option::Option::Some(stringify!($rule)) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_accessors {
    ($field:ident: [$ty:ident]) => {
        $crate::__private::paste::paste! {
            pub fn $field(&self) -> &[$ty] {
                &self.$field
            }

            #[doc = concat!("Append to `", stringify!($field), "`.")]
            pub fn [<add_ $field>]<I, V>(&mut self, values: I) -> &mut Self
            where
                I: ::std::iter::IntoIterator<Item = V>,
                V: ::std::convert::Into<$ty>,
            {
                self.$field.extend(values.into_iter().map(::std::convert::Into::into));
                self
            }
        }
    };
    ($field:ident: String) => {
        $crate::__private::paste::paste! {
            pub fn $field(&self) -> &str {
                self.$field.as_deref().unwrap_or_default()
            }

            pub fn [<set_ $field>](&mut self, value: impl ::std::convert::Into<String>) -> &mut Self {
                self.$field = ::std::option::Option::Some(value.into());
                self
            }
        }
    };
    ($field:ident: i64) => {
        $crate::__private::paste::paste! {
            pub fn $field(&self) -> i64 {
                self.$field.unwrap_or_default()
            }

            pub fn [<set_ $field>](&mut self, value: i64) -> &mut Self {
                self.$field = ::std::option::Option::Some(value);
                self
            }
        }
    };
    ($field:ident: bool) => {
        $crate::__private::paste::paste! {
            pub fn $field(&self) -> bool {
                self.$field.unwrap_or_default()
            }

            pub fn [<set_ $field>](&mut self, value: bool) -> &mut Self {
                self.$field = ::std::option::Option::Some(value);
                self
            }
        }
    };
    ($field:ident: $ty:ident) => {
        $crate::__private::paste::paste! {
            pub fn $field(&self) -> ::std::option::Option<&$ty> {
                self.$field.as_ref()
            }

            pub fn [<set_ $field>](&mut self, value: impl ::std::convert::Into<$ty>) -> &mut Self {
                self.$field = ::std::option::Option::Some(value.into());
                self
            }
        }
    };
}
