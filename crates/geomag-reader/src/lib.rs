//! Schema-validated readers for geomagnetic model containers.
//!
//! Each supported source (forecast runs, CHAOS, COVOBS, KALMAG, priors)
//! stores its spectral coefficient series in an HDF5 container under its own
//! keys. The readers in this crate turn any of them into the same
//! [`Model`](geomag_common::Model):
//!
//! 1. the path is gated by the [`preconditions`] validator (existing file,
//!    HDF5 signature), so a bad path is an
//!    [`InvalidArgument`](ReadError::InvalidArgument) and never reaches HDF5;
//! 2. the container's key set must equal the source's schema exactly,
//!    otherwise the read fails with
//!    [`SchemaMismatch`](ReadError::SchemaMismatch);
//! 3. arrays are copied as stored, or reduced over their realization axis
//!    into a mean and a population standard deviation.
//!
//! ```no_run
//! use geomag_reader::{read_chaos, read_auto};
//!
//! let model = read_chaos("CHAOS-7.hdf5")?;
//! println!("{} epochs", model.time_len());
//!
//! let (source, model) = read_auto("unknown.hdf5")?;
//! println!("{}: {}", source, model.summary());
//! # Ok::<(), geomag_reader::ReadError>(())
//! ```

pub mod container;
pub mod ensemble;
pub mod error;
pub mod readers;
pub mod schema;

pub use container::{ArrayStore, Hdf5Container, MemoryStore};
pub use ensemble::{reduce, Ensemble};
pub use error::{ReadError, ReadResult};
pub use readers::{
    decode, decode_calc, decode_chaos, decode_covobs, decode_kalmag, decode_prior, detect_source,
    read_auto, read_calc, read_chaos, read_covobs, read_kalmag, read_model, read_prior,
};
pub use schema::Source;
