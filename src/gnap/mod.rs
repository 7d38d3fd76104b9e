//! GNAP protocol messages.
//!
//! The record files in this module are generated from `schemas/gnap.json`:
//!
//! ```text
//! gnap-codec generate schemas/gnap.json --out-dir src/gnap
//! ```

use std::fmt;
use std::str::FromStr;

use heck::ToSnakeCase;
use serde_json::Value;

use crate::decoder::decode;
use crate::error::{CheckError, ParseError, ValidateError};
use crate::json_schema::{check_document, json_schema};
use crate::record::OpenRecord;
use crate::schema::RecordSchema;
use crate::validator::decode_validated;

mod access_token;
mod access_token_request;
mod client;
mod client_display;
mod grant_request;
mod grant_response;
mod interaction_finish;
mod interaction_hint;
mod interaction_request;
mod interaction_response;
mod key;
mod request_continuation;
mod resource_access;
mod rules;
mod subject_request;
mod user_code;

pub use access_token::*;
pub use access_token_request::*;
pub use client::*;
pub use client_display::*;
pub use grant_request::*;
pub use grant_response::*;
pub use interaction_finish::*;
pub use interaction_hint::*;
pub use interaction_request::*;
pub use interaction_response::*;
pub use key::*;
pub use request_continuation::*;
pub use resource_access::*;
pub use subject_request::*;
pub use user_code::*;

macro_rules! record_types {
    ($($variant:ident),* $(,)?) => {
        /// A GNAP record type, for dispatch by name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum RecordType {
            $($variant),*
        }

        impl RecordType {
            pub const ALL: &'static [RecordType] = &[$(RecordType::$variant),*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(RecordType::$variant => stringify!($variant)),*
                }
            }

            pub fn schema(&self) -> &'static RecordSchema {
                match self {
                    $(RecordType::$variant => <$variant as OpenRecord>::schema()),*
                }
            }

            /// Decode a document as this type and return its canonical form.
            pub fn canonicalize(&self, bytes: &[u8]) -> Result<Value, ParseError> {
                match self {
                    $(RecordType::$variant => decode::<$variant>(bytes).map(|r| r.to_value())),*
                }
            }

            /// Decode a document as this type and validate it.
            pub fn validate(&self, bytes: &[u8]) -> Result<(), ValidateError> {
                match self {
                    $(RecordType::$variant => decode_validated::<$variant>(bytes).map(|_| ())),*
                }
            }

            pub fn json_schema(&self) -> Value {
                match self {
                    $(RecordType::$variant => json_schema::<$variant>()),*
                }
            }

            /// Check a raw document against this type's JSON Schema.
            pub fn check(&self, document: &Value) -> Result<(), CheckError> {
                match self {
                    $(RecordType::$variant => check_document::<$variant>(document)),*
                }
            }
        }
    };
}

record_types! {
    AccessToken,
    AccessTokenRequest,
    Client,
    ClientDisplay,
    GrantRequest,
    GrantResponse,
    InteractionFinish,
    InteractionHint,
    InteractionRequest,
    InteractionResponse,
    Key,
    RequestContinuation,
    ResourceAccess,
    SubjectRequest,
    UserCode,
}

impl RecordType {
    /// Look up a type by name in any case style (`GrantRequest`,
    /// `grant_request`, `grant-request`).
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.to_snake_case();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().to_snake_case() == wanted)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown record type '{}'", s))
    }
}
