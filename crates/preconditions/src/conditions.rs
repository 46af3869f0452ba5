//! The standard conditions every registry starts from.
//!
//! Path predicates only accept [`ArgValue::Str`] values; anything else is
//! simply not a path and fails the condition.
//!
//! # HDF5 diagnostics
//!
//! The HDF5 C library prints its error stack to stderr even when the error
//! is handled on the Rust side. [`silence_hdf5_errors`] turns that off once
//! per process; [`is_hdf5`] calls it before asking the library to open a file.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Once;

use tracing::debug;

use crate::descriptor::ArgValue;

/// Path points at an existing regular file.
pub const IS_FILE: &str = "is_file";
/// Path points at an existing directory.
pub const IS_DIR: &str = "is_dir";
/// Path points at a file that opens as an HDF5 container.
pub const IS_HDF5: &str = "is_hdf5";

/// Format signature opening every HDF5 superblock.
pub const HDF5_SIGNATURE: [u8; 8] = [0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1a, b'\n'];

/// First superblock offset after 0 when the file carries a user block.
const FIRST_USER_BLOCK_OFFSET: u64 = 512;

pub fn is_existing_file(value: &ArgValue) -> bool {
    value.as_str().is_some_and(|p| Path::new(p).is_file())
}

pub fn is_existing_dir(value: &ArgValue) -> bool {
    value.as_str().is_some_and(|p| Path::new(p).is_dir())
}

pub fn is_hdf5(value: &ArgValue) -> bool {
    value.as_str().is_some_and(|p| opens_as_hdf5(Path::new(p)))
}

/// Silence HDF5's automatic error printing to stderr.
///
/// Safe to call any number of times; only the first call does anything.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// The file carries the HDF5 signature and the library opens it read-only.
///
/// The signature scan runs first so that arbitrary files never reach the C
/// library. A signature followed by a truncated or corrupt superblock fails
/// the open and therefore the check.
pub fn opens_as_hdf5(path: &Path) -> bool {
    if !has_hdf5_signature(path).unwrap_or(false) {
        return false;
    }

    silence_hdf5_errors();
    match hdf5::File::open(path) {
        Ok(_) => true,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "HDF5 signature found but file does not open");
            false
        }
    }
}

/// Look for the HDF5 signature where the superblock may live: offset 0, then
/// 512, 1024, 2048, ... up to the end of the file.
pub fn has_hdf5_signature(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let mut buf = [0u8; HDF5_SIGNATURE.len()];
    let mut offset = 0u64;

    while offset + HDF5_SIGNATURE.len() as u64 <= len {
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut buf)?;
        if buf == HDF5_SIGNATURE {
            return Ok(true);
        }
        offset = if offset == 0 {
            FIRST_USER_BLOCK_OFFSET
        } else {
            offset * 2
        };
    }

    Ok(false)
}
