//! Error types for record encoding, decoding, validation and generation.

use std::path::PathBuf;
use thiserror::Error;

/// Render a JSON Pointer for display, using `/` for the document root.
fn pointer(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

/// Errors while decoding a wire document into a record.
#[derive(Debug, Error)]
pub enum ParseError {
    // Token stream errors
    #[error("invalid JSON: {source}")]
    Syntax {
        #[source]
        source: serde_json::Error,
    },

    #[error("truncated JSON: {source}")]
    Truncated {
        #[source]
        source: serde_json::Error,
    },

    // Shape errors, pinpointed by JSON Pointer
    #[error("unexpected {actual} at {}: expected {expected}", pointer(.path))]
    UnexpectedToken {
        path: String,
        expected: String,
        actual: &'static str,
    },

    #[error("invalid value at {}: {message}", pointer(.path))]
    InvalidValue { path: String, message: String },
}

/// Coarse classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Malformed token stream.
    Syntax,
    /// Input ended before the document was complete.
    Truncated,
    /// A value of the wrong JSON type where a record or field was expected.
    UnexpectedToken,
    /// A value of the right JSON type that cannot be coerced to the field kind.
    InvalidValue,
}

impl ParseError {
    /// Wrap a `serde_json` error, separating premature end of input from
    /// other syntax errors.
    pub fn from_json(source: serde_json::Error) -> Self {
        if source.is_eof() {
            ParseError::Truncated { source }
        } else {
            ParseError::Syntax { source }
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::Syntax { .. } => ParseErrorKind::Syntax,
            ParseError::Truncated { .. } => ParseErrorKind::Truncated,
            ParseError::UnexpectedToken { .. } => ParseErrorKind::UnexpectedToken,
            ParseError::InvalidValue { .. } => ParseErrorKind::InvalidValue,
        }
    }

    /// JSON Pointer of the offending value, if the error is not a token stream error.
    pub fn path(&self) -> Option<&str> {
        match self {
            ParseError::UnexpectedToken { path, .. } | ParseError::InvalidValue { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }

    /// The innermost object key (or array index) of the offending value.
    pub fn key(&self) -> Option<String> {
        let path = self.path()?;
        let (_, last) = path.rsplit_once('/')?;
        Some(last.replace("~1", "/").replace("~0", "~"))
    }

    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// A dynamic `set` received a value whose kind does not match the declared field.
#[derive(Debug, Error)]
#[error("invalid value for \"{field}\": expected {expected}, got {actual}")]
pub struct TypeError {
    /// Wire name of the declared field.
    pub field: String,
    /// Description of the declared value kind.
    pub expected: String,
    /// JSON type of the rejected value.
    pub actual: &'static str,
    #[source]
    pub source: ParseError,
}

/// Errors reported by an explicit `validate` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field \"{field}\" is required")]
    Missing { field: &'static str },

    #[error("{message}")]
    Rule { rule: &'static str, message: String },
}

impl ValidationError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Errors while decoding and then validating a document.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::Parse(e) => e.exit_code(),
            ValidateError::Invalid(e) => e.exit_code(),
        }
    }
}

/// Malformed record schema. Fatal at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("record '{record}' is declared more than once")]
    DuplicateRecord { record: String },

    #[error("record '{record}' declares wire name '{wire_name}' more than once")]
    DuplicateWireName { record: String, wire_name: String },

    #[error("record '{record}' declares accessor '{accessor}' more than once")]
    DuplicateAccessor { record: String, accessor: String },

    #[error("record '{record}' has more than one shorthand field: {}", fields.join(", "))]
    MultipleShorthand { record: String, fields: Vec<String> },

    #[error("shorthand field '{field}' of record '{record}' must be a single string")]
    ShorthandNotString { record: String, field: String },

    #[error("collapsible field '{field}' of record '{record}' must be a sequence")]
    CollapsibleNotSequence { record: String, field: String },

    #[error("field '{field}' of record '{record}' has unknown type '{kind}'")]
    UnknownType {
        record: String,
        field: String,
        kind: String,
    },

    #[error("field '{field}' of record '{record}' references unknown {what} '{target}'")]
    UnknownReference {
        record: String,
        field: String,
        what: &'static str,
        target: String,
    },

    #[error("field '{field}' of record '{record}' uses reserved accessor name")]
    ReservedAccessor { record: String, field: String },
}

impl SchemaError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors while running the record generator.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema table: {source}")]
    InvalidTable {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl GenerateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::FileNotFound { .. }
            | GenerateError::ReadError { .. }
            | GenerateError::WriteError { .. } => 3,
            GenerateError::InvalidTable { .. } => 2,
            GenerateError::Schema(e) => e.exit_code(),
        }
    }
}

/// Errors while checking a raw document against an exported JSON Schema.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("document does not conform: {} violation(s)", violations.len())]
    Invalid { violations: Vec<Violation> },
}

impl CheckError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::InvalidSchema { .. } => 2,
            CheckError::Invalid { .. } => 1,
        }
    }
}

/// Single structural violation with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Violation {
    /// JSON Pointer (RFC 6901) to the offending value.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", pointer(&self.path), self.message)
    }
}

/// Errors from the network client.
#[cfg(feature = "remote")]
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("refusing to send invalid request: {0}")]
    Invalid(#[from] ValidationError),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cannot decode response from {url}: {source}")]
    Response {
        url: String,
        #[source]
        source: ParseError,
    },
}

#[cfg(feature = "remote")]
impl ClientError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::Invalid(e) => e.exit_code(),
            ClientError::Http { .. } => 3,
            ClientError::Response { source, .. } => source.exit_code(),
        }
    }
}
