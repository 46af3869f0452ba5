//! CHAOS field model: a single series with stored variances.

use std::path::Path;

use geomag_common::{Model, ModelKind, SourceName};

use super::{open_gated, read_times};
use crate::container::ArrayStore;
use crate::error::ReadResult;
use crate::schema::{check_schema, Source};

pub fn read_chaos(path: impl AsRef<Path>) -> ReadResult<Model> {
    let container = open_gated(path.as_ref())?;
    decode_chaos(&container)
}

/// No reduction: every field is copied as stored, variances included.
pub fn decode_chaos<S: ArrayStore>(store: &S) -> ReadResult<Model> {
    check_schema(store, Source::Chaos)?;

    let times = read_times(store)?;
    let gnm = store.read_array("gnm")?;

    Ok(Model {
        name: Some(SourceName::Chaos),
        sv: Some(store.read_array("dgnm")?),
        var_mf: Some(store.read_array("var_gnm")?),
        var_sv: Some(store.read_array("var_dgnm")?),
        ..Model::new(ModelKind::Observations, times, gnm)
    })
}
