//! KALMAG ensemble field model.

use std::path::Path;

use geomag_common::{Model, ModelKind, SourceName};

use super::{open_gated, read_ensemble, read_times};
use crate::container::ArrayStore;
use crate::error::ReadResult;
use crate::schema::{check_schema, Source};

pub fn read_kalmag(path: impl AsRef<Path>) -> ReadResult<Model> {
    let container = open_gated(path.as_ref())?;
    decode_kalmag(&container)
}

pub fn decode_kalmag<S: ArrayStore>(store: &S) -> ReadResult<Model> {
    check_schema(store, Source::Kalmag)?;

    let times = read_times(store)?;
    let mf = read_ensemble(store, "MF")?;
    let sv = read_ensemble(store, "SV")?;

    Ok(Model {
        name: Some(SourceName::Kalmag),
        sv: Some(sv.mean),
        var_mf: Some(mf.std),
        var_sv: Some(sv.std),
        ..Model::new(ModelKind::Observations, times, mf.mean)
    })
}
