//! COVOBS ensemble field model, including the auxiliary q10 series.

use std::path::Path;

use geomag_common::{Model, ModelKind, SourceName};

use super::{open_gated, read_ensemble, read_times};
use crate::container::ArrayStore;
use crate::error::ReadResult;
use crate::schema::{check_schema, Source};

pub fn read_covobs(path: impl AsRef<Path>) -> ReadResult<Model> {
    let container = open_gated(path.as_ref())?;
    decode_covobs(&container)
}

pub fn decode_covobs<S: ArrayStore>(store: &S) -> ReadResult<Model> {
    check_schema(store, Source::Covobs)?;

    let times = read_times(store)?;
    let gnm = read_ensemble(store, "gnm")?;
    let dgnm = read_ensemble(store, "dgnm")?;
    let q10 = read_ensemble(store, "q10")?;
    let dq10 = read_ensemble(store, "dq10")?;

    Ok(Model {
        name: Some(SourceName::Covobs),
        sv: Some(dgnm.mean),
        q10: Some(q10.mean),
        dq10: Some(dq10.mean),
        var_mf: Some(gnm.std),
        var_sv: Some(dgnm.std),
        var_q10: Some(q10.std),
        var_dq10: Some(dq10.std),
        ..Model::new(ModelKind::Observations, times, gnm.mean)
    })
}
