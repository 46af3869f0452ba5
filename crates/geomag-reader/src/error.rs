//! Error types for reading geomagnetic model containers.

use std::collections::BTreeSet;
use std::path::PathBuf;

use geomag_common::ErrorKind;
use preconditions::CheckError;
use thiserror::Error;

/// Result type for reader operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Error types for reading model containers.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The path is not an existing HDF5 file
    #[error("Arguments are not valid: '{}' is not an existing HDF5 file", .path.display())]
    InvalidArgument { path: PathBuf },

    /// The precondition request itself was malformed
    #[error(transparent)]
    Precondition(#[from] CheckError),

    /// A group's key set differs from the expected one
    #[error(
        "Columns mismatching in group '{group}': missing {:?}, unexpected {:?}",
        missing_keys(.expected, .actual),
        missing_keys(.actual, .expected)
    )]
    SchemaMismatch {
        group: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// The root key set matches no known source
    #[error("Columns match no known source: found {actual:?}")]
    UnknownSource { actual: Vec<String> },

    /// A dataset cannot be used the way its source requires
    #[error("Dataset '{key}' has an unusable shape: {message}")]
    Shape { key: String, message: String },

    /// The HDF5 library failed to open or read
    #[error("Container error at '{path}': {message}")]
    Container { path: String, message: String },
}

impl ReadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReadError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            ReadError::Precondition(e) => e.kind(),
            ReadError::SchemaMismatch { .. }
            | ReadError::UnknownSource { .. }
            | ReadError::Shape { .. } => ErrorKind::SchemaMismatch,
            ReadError::Container { .. } => ErrorKind::Container,
        }
    }

    pub fn schema_mismatch(
        group: &str,
        expected: &[&str],
        actual: &BTreeSet<String>,
    ) -> Self {
        let mut expected: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
        expected.sort();
        ReadError::SchemaMismatch {
            group: group.to_string(),
            expected,
            actual: actual.iter().cloned().collect(),
        }
    }

    pub fn container(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ReadError::Container {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Expected keys the container lacks. Empty for other variants.
    pub fn missing_keys(&self) -> Vec<String> {
        match self {
            ReadError::SchemaMismatch { expected, actual, .. } => missing_keys(expected, actual),
            _ => Vec::new(),
        }
    }

    /// Keys the container has but the schema does not expect.
    pub fn unexpected_keys(&self) -> Vec<String> {
        match self {
            ReadError::SchemaMismatch { expected, actual, .. } => missing_keys(actual, expected),
            ReadError::UnknownSource { actual } => actual.clone(),
            _ => Vec::new(),
        }
    }
}

/// Entries of `wanted` absent from `present`.
fn missing_keys(wanted: &[String], present: &[String]) -> Vec<String> {
    wanted
        .iter()
        .filter(|k| !present.contains(k))
        .cloned()
        .collect()
}
