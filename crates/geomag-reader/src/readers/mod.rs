//! The per-source readers and their shared plumbing.
//!
//! Every `read_*` function follows the same steps: gate the path through
//! the precondition validator, open the container read-only, assert its
//! schema, then extract or reduce the arrays into a [`Model`]. The
//! container is closed before the model is returned.

mod calc;
mod chaos;
mod covobs;
mod kalmag;
mod prior;

use std::path::Path;

use geomag_common::Model;
use ndarray::Array1;
use preconditions::{validate, ConditionDescriptor};
use tracing::{info, warn};

use crate::container::{ArrayStore, Hdf5Container};
use crate::ensemble::{self, Ensemble};
use crate::error::{ReadError, ReadResult};
use crate::schema::{self, Source};

pub use calc::{decode_calc, read_calc};
pub use chaos::{decode_chaos, read_chaos};
pub use covobs::{decode_covobs, read_covobs};
pub use kalmag::{decode_kalmag, read_kalmag};
pub use prior::{decode_prior, read_prior};

/// Read a container of a known source.
pub fn read_model(path: impl AsRef<Path>, source: Source) -> ReadResult<Model> {
    let container = open_gated(path.as_ref())?;
    decode(&container, source)
}

/// Identify a container's source from its top-level key set.
pub fn detect_source(path: impl AsRef<Path>) -> ReadResult<Source> {
    let container = open_gated(path.as_ref())?;
    schema::detect(&container)
}

/// Detect the source, then read the container as that source.
pub fn read_auto(path: impl AsRef<Path>) -> ReadResult<(Source, Model)> {
    let container = open_gated(path.as_ref())?;
    let source = schema::detect(&container)?;
    info!(path = %path.as_ref().display(), source = %source, "Detected container source");
    let model = decode(&container, source)?;
    Ok((source, model))
}

/// Decode an already opened store as `source`.
pub fn decode<S: ArrayStore>(store: &S, source: Source) -> ReadResult<Model> {
    match source {
        Source::Calc => decode_calc(store),
        Source::Chaos => decode_chaos(store),
        Source::Covobs => decode_covobs(store),
        Source::Kalmag => decode_kalmag(store),
        Source::Prior => decode_prior(store),
    }
}

/// Validate `path` as an existing HDF5 file, then open it.
///
/// A path failing its preconditions never reaches the container library.
pub(crate) fn open_gated(path: &Path) -> ReadResult<Hdf5Container> {
    if path.to_str().is_none() {
        warn!(path = %path.display(), "Rejected container path: not valid UTF-8");
        return Err(ReadError::InvalidArgument {
            path: path.to_path_buf(),
        });
    }
    if !validate(&[ConditionDescriptor::existing_hdf5(path)])? {
        warn!(path = %path.display(), "Rejected container path");
        return Err(ReadError::InvalidArgument {
            path: path.to_path_buf(),
        });
    }

    Hdf5Container::open(path)
}

/// Read the time axis, flattened to one dimension.
pub(crate) fn read_times<S: ArrayStore>(store: &S) -> ReadResult<Array1<f64>> {
    let times = store.read_array("times")?;
    Ok(times.iter().copied().collect())
}

/// Read `key` and reduce its realization axis.
pub(crate) fn read_ensemble<S: ArrayStore>(store: &S, key: &str) -> ReadResult<Ensemble> {
    let samples = store.read_array(key)?;
    ensemble::reduce(samples.view()).ok_or_else(|| ReadError::Shape {
        key: key.to_string(),
        message: "a scalar dataset has no realization axis".to_string(),
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryStore;

    #[test]
    fn test_decode_dispatches_by_source() {
        let stores = [
            (Source::Calc, fixtures::calc()),
            (Source::Chaos, fixtures::chaos()),
            (Source::Covobs, fixtures::covobs()),
            (Source::Kalmag, fixtures::kalmag()),
            (Source::Prior, fixtures::prior()),
        ];

        for (source, store) in stores {
            let model = decode(&store, source).unwrap();
            assert_eq!(model.kind, source.model_kind());
            assert_eq!(model.name, source.source_name());
            assert!(model.misaligned_fields().is_empty(), "{} fields misaligned", source);
        }
    }

    #[test]
    fn test_decode_wrong_source_is_schema_mismatch() {
        let err = decode(&fixtures::chaos(), Source::Kalmag).unwrap_err();
        assert!(matches!(err, ReadError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_times_are_flattened() {
        let store = MemoryStore::new().with_array(
            "times",
            ndarray::array![[2000.0], [2001.0], [2002.0]].into_dyn(),
        );
        let times = read_times(&store).unwrap();
        assert_eq!(times.to_vec(), vec![2000.0, 2001.0, 2002.0]);
    }

    #[test]
    fn test_scalar_ensemble_is_shape_error() {
        let store = MemoryStore::new().with_array(
            "MF",
            ndarray::ArrayD::from_elem(ndarray::IxDyn(&[]), 1.0),
        );
        let err = read_ensemble(&store, "MF").unwrap_err();
        assert!(matches!(err, ReadError::Shape { ref key, .. } if key == "MF"));
    }

    #[test]
    fn test_missing_path_is_invalid_argument() {
        let err = read_model("/no/such/container.hdf5", Source::Chaos).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_invalid_argument() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/tmp/model\xff.hdf5"));
        let err = read_model(path, Source::Chaos).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument { path: ref p } if p == path));
    }
}
