//! Argument precondition checks for the geomagnetic model readers.
//!
//! A read is gated by a batch of [`ConditionDescriptor`]s, each pairing a
//! value with its expected type and a chain of named conditions. The
//! [`Validator`] evaluates them in order against an immutable
//! [`ConditionRegistry`] and returns a single verdict.
//!
//! ```no_run
//! use preconditions::{validate, ArgType, ConditionDescriptor};
//!
//! let ok = validate(&[ConditionDescriptor::new(
//!     "/data/chaos.hdf5",
//!     ArgType::Str,
//!     "is_file,is_hdf5",
//! )])?;
//! # Ok::<(), preconditions::CheckError>(())
//! ```

pub mod conditions;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod validator;

pub use conditions::{
    has_hdf5_signature, opens_as_hdf5, silence_hdf5_errors, HDF5_SIGNATURE, IS_DIR, IS_FILE, IS_HDF5,
};
pub use descriptor::{split_conditions, ArgType, ArgValue, ConditionDescriptor, DESCRIPTOR_KEYS};
pub use error::{CheckError, CheckResult};
pub use registry::{ConditionRegistry, Predicate, RegistryBuilder};
pub use validator::{validate, Validator};
