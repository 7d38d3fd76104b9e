//! GNAP Record Codec
//!
//! Schema-driven, extensible records for GNAP protocol messages.
//!
//! Every message type is an [`OpenRecord`]: typed slots for the fields its
//! [`RecordSchema`] declares plus an extension mapping for anything else.
//! Records round-trip losslessly through JSON, including the two irregular
//! shapes GNAP allows: a field that is either one object or an array of
//! them, and a record that may be sent as a bare string.
//!
//! # Example
//!
//! ```
//! use gnap_codec::gnap::{AccessTokenRequest, Client, GrantRequest, ResourceAccess};
//! use gnap_codec::OpenRecord;
//!
//! let mut access = ResourceAccess::new("photo-api");
//! access.add_actions(["read", "write"]);
//!
//! let mut request = GrantRequest::default();
//! request
//!     .add_access_tokens([AccessTokenRequest::new(access)])
//!     .set_client(Client::default().set_instance_id("7C7C4AZ9KHRS6X63AJAO").clone());
//!
//! // One access token is sent bare; a client with only an instance
//! // identifier is sent as a string.
//! assert_eq!(
//!     String::from_utf8(request.encode()).unwrap(),
//!     r#"{"access_token":{"access":[{"actions":["read","write"],"type":"photo-api"}]},"client":"7C7C4AZ9KHRS6X63AJAO"}"#
//! );
//!
//! let decoded = GrantRequest::decode(&request.encode()).unwrap();
//! assert_eq!(decoded, request);
//! ```
//!
//! # Encoding Rules
//!
//! | Rule | Encode | Decode |
//! |------|--------|--------|
//! | Key order | Ordinal by wire name | Any order |
//! | Absent field | Omitted | Missing or `null` |
//! | Collapsible field, one element | Bare element | Bare element or array |
//! | Shorthand record, only shorthand field set | Bare string | String or object |
//! | Unknown key | Re-emitted verbatim | Kept as extension field |
//!
//! Required fields are checked only by an explicit [`OpenRecord::validate`].

#[macro_use]
mod macros;

pub mod decoder;
pub mod encoder;
mod error;
pub mod generator;
pub mod gnap;
pub mod json_schema;
pub mod pairs;
pub mod record;
pub mod schema;
mod types;
pub mod validator;
pub mod value;

#[cfg(feature = "remote")]
mod client;

pub use decoder::{decode, decode_from_reader, decode_str, decode_value};
pub use encoder::{encode, encode_pretty, encode_to_writer, to_value};
pub use error::{
    CheckError, GenerateError, ParseError, ParseErrorKind, SchemaError, TypeError, ValidateError,
    ValidationError, Violation,
};
pub use generator::{generate, load_table, parse_table, GeneratedFile, SchemaTable};
pub use json_schema::{check_document, json_schema};
pub use pairs::{Pair, Pairs};
pub use record::{ExtraFields, OpenRecord};
pub use schema::{ElementKind, FieldSchema, RecordSchema, ValueKind};
pub use types::{
    json_type_name, AccessTokenAttribute, ClientOptions, FinishMode, GenerateOptions, ProofForm,
    StartMode,
};
pub use validator::{decode_validated, missing_fields, validate};
pub use value::{Jwk, Slot, WireValue};

#[cfg(feature = "remote")]
pub use client::{GrantClient, GrantRequestCmd};
#[cfg(feature = "remote")]
pub use error::ClientError;

#[doc(hidden)]
pub mod __private {
    pub use paste;
    pub use serde;
    pub use serde_json;
}
