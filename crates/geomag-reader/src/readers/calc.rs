//! Forecast/analysis run output.
//!
//! The series live in the `computed` group as ensembles over realizations;
//! `ER` is present but not carried into the model.

use std::path::Path;

use geomag_common::{Model, ModelKind};

use super::{open_gated, read_ensemble, read_times};
use crate::container::ArrayStore;
use crate::error::{ReadError, ReadResult};
use crate::schema::{check_schema, Source};

pub fn read_calc(path: impl AsRef<Path>) -> ReadResult<Model> {
    let container = open_gated(path.as_ref())?;
    decode_calc(&container)
}

pub fn decode_calc<S: ArrayStore>(store: &S) -> ReadResult<Model> {
    let computed = check_schema(store, Source::Calc)?
        .ok_or_else(|| ReadError::container(store.location(), "calc schema has no nested group"))?;

    let times = read_times(&computed)?;
    let mf = read_ensemble(&computed, "MF")?;
    let sv = read_ensemble(&computed, "SV")?;
    let u = read_ensemble(&computed, "U")?;

    Ok(Model {
        sv: Some(sv.mean),
        u: Some(u.mean),
        var_mf: Some(mf.std),
        var_sv: Some(sv.std),
        var_u: Some(u.std),
        ..Model::new(ModelKind::Calculations, times, mf.mean)
    })
}
