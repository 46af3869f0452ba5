//! Prior samples, read as stored.

use std::path::Path;

use geomag_common::{Model, ModelKind};

use super::{open_gated, read_times};
use crate::container::ArrayStore;
use crate::error::ReadResult;
use crate::schema::{check_schema, Source};

pub fn read_prior(path: impl AsRef<Path>) -> ReadResult<Model> {
    let container = open_gated(path.as_ref())?;
    decode_prior(&container)
}

pub fn decode_prior<S: ArrayStore>(store: &S) -> ReadResult<Model> {
    check_schema(store, Source::Prior)?;

    let times = read_times(store)?;
    let mf = store.read_array("MF")?;

    Ok(Model {
        u: Some(store.read_array("U")?),
        ..Model::new(ModelKind::Priors, times, mf)
    })
}
