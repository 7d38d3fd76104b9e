//! Core types: wire tokens and options.

use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::error::ParseError;
use crate::schema::ElementKind;
use crate::value::WireValue;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Declares a closed set of string tokens used as an enum-token field kind.
macro_rules! wire_tokens {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),*
        }

        impl $name {
            /// Every token accepted on the wire, in declaration order.
            pub const TOKENS: &'static [&'static str] = &[$($token),*];

            /// Returns the wire token.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),*
                }
            }

            /// Parse a wire token.
            ///
            /// Returns `None` for unknown tokens (caller should error).
            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $( $token => Some($name::$variant), )*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl WireValue for $name {
            const KIND: ElementKind = ElementKind::Token(Self::TOKENS);

            fn from_wire(value: &Value, path: &str) -> Result<Self, ParseError> {
                let Value::String(token) = value else {
                    return Err(ParseError::UnexpectedToken {
                        path: path.to_string(),
                        expected: Self::KIND.to_string(),
                        actual: json_type_name(value),
                    });
                };
                Self::parse(token).ok_or_else(|| ParseError::InvalidValue {
                    path: path.to_string(),
                    message: format!("unknown token \"{}\", expected {}", token, Self::KIND),
                })
            }

            fn to_wire(&self) -> Value {
                Value::String(self.as_str().to_string())
            }
        }
    };
}

wire_tokens! {
    /// Attribute flags of a requested access token.
    pub enum AccessTokenAttribute {
        Bearer => "bearer",
        Split => "split",
    }
}

wire_tokens! {
    /// How the client instance can start an interaction.
    pub enum StartMode {
        Redirect => "redirect",
        App => "app",
        UserCode => "user_code",
    }
}

wire_tokens! {
    /// How the client instance is told that an interaction finished.
    pub enum FinishMode {
        Redirect => "redirect",
        Push => "push",
    }
}

wire_tokens! {
    /// Key proofing method.
    pub enum ProofForm {
        /// Detached JWS.
        DetachedJws => "jwsd",
        /// Attached JWS.
        AttachedJws => "jws",
        MutualTls => "mtls",
        Dpop => "dpop",
        HttpSig => "httpsig",
        OAuthPop => "oauthpop",
    }
}

/// Names of the token types a generator table may reference as `token:<Name>`.
pub const TOKEN_TYPES: &[&str] = &["AccessTokenAttribute", "StartMode", "FinishMode", "ProofForm"];

/// Options for the record generator.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Emit a `new` constructor taking the required fields.
    pub constructors: bool,
    /// First line of every emitted file.
    pub header: String,
}

impl GenerateOptions {
    /// Create generator options with constructors enabled and the default header.
    pub fn new() -> Self {
        Self {
            constructors: true,
            header: "// Code generated by gnap-codec generate. DO NOT EDIT.".to_string(),
        }
    }

    /// Enable or disable required-field constructors.
    pub fn constructors(mut self, constructors: bool) -> Self {
        self.constructors = constructors;
        self
    }

    /// Set the header line of emitted files.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Default timeout for HTTP requests (10 seconds).
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Options for the network client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl ClientOptions {
    /// Create client options with a 10 second timeout.
    pub fn new() -> Self {
        Self {
            timeout: HTTP_TIMEOUT,
            user_agent: concat!("gnap-codec/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::new()
    }
}
