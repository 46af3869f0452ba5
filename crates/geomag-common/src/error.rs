//! Error taxonomy shared by the validator and the readers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Flat classification of every failure a read can produce.
///
/// Each crate keeps its own error enum; `kind()` on those maps into this so
/// callers can branch without matching on crate-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The validator was handed a non-sequence, an empty sequence or a
    /// descriptor with the wrong shape. Always a caller bug.
    MalformedRequest,
    /// A path failed its type, existence or format preconditions.
    InvalidArgument,
    /// A condition name is absent from the registry.
    UnknownCondition,
    /// The container's key set differs from the expected one.
    SchemaMismatch,
    /// The container library failed to open or read the file.
    Container,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedRequest => "malformed_request",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::UnknownCondition => "unknown_condition",
            ErrorKind::SchemaMismatch => "schema_mismatch",
            ErrorKind::Container => "container",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
