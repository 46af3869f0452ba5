//! Error types for precondition checks.

use geomag_common::ErrorKind;
use thiserror::Error;

/// Result type for precondition checks.
pub type CheckResult<T> = Result<T, CheckError>;

/// Fatal problems with a validation request.
///
/// A value that simply fails its checks is not an error; it yields a
/// `false` verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The request is not a list of descriptors
    #[error("Arguments must be organized in a sequence, got {0}")]
    NotASequence(String),

    /// The request holds no descriptors
    #[error("List of arguments is empty")]
    Empty,

    /// A descriptor does not carry exactly the expected keys
    #[error("Descriptor keys mismatching: expected {expected:?}, found {found:?}")]
    KeyMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A known key holds a value of the wrong shape
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// The condition name is not registered
    #[error("The condition '{0}' was not found in the registry")]
    UnknownCondition(String),
}

impl CheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::UnknownCondition(_) => ErrorKind::UnknownCondition,
            CheckError::NotASequence(_)
            | CheckError::Empty
            | CheckError::KeyMismatch { .. }
            | CheckError::InvalidDescriptor(_) => ErrorKind::MalformedRequest,
        }
    }
}
