//! Integration tests: write HDF5 containers laid out like each source and
//! read them back through the public readers.

use std::path::Path;

use geomag_common::{ErrorKind, Model, ModelKind, SourceName};
use geomag_reader::{
    detect_source, read_auto, read_calc, read_chaos, read_covobs, read_kalmag, read_model,
    read_prior, ReadError, ReadResult, Source,
};
use ndarray::Axis;
use preconditions::HDF5_SIGNATURE;
use test_utils::{
    assert_approx_eq, assert_arrays_approx_eq, calc_builder, chaos_builder, covobs_builder,
    create_series, ensemble_mean, ensemble_std, kalmag_builder, known_ensemble_3x4,
    prior_builder, ContainerBuilder, ContainerFixture, COEFFS, REALIZATIONS, TIMES,
};

type Reader = fn(&Path) -> ReadResult<Model>;

fn readers() -> [(Source, Reader); 5] {
    [
        (Source::Calc, |p: &Path| read_calc(p)),
        (Source::Chaos, |p: &Path| read_chaos(p)),
        (Source::Covobs, |p: &Path| read_covobs(p)),
        (Source::Kalmag, |p: &Path| read_kalmag(p)),
        (Source::Prior, |p: &Path| read_prior(p)),
    ]
}

fn builder_for(source: Source) -> ContainerBuilder {
    match source {
        Source::Calc => calc_builder(REALIZATIONS, TIMES, COEFFS),
        Source::Chaos => chaos_builder(TIMES, COEFFS),
        Source::Covobs => covobs_builder(REALIZATIONS, TIMES, COEFFS),
        Source::Kalmag => kalmag_builder(REALIZATIONS, TIMES, COEFFS),
        Source::Prior => prior_builder(TIMES, COEFFS),
    }
}

/// A top-level key each source stores as a dataset.
fn dataset_key(source: Source) -> &'static str {
    match source {
        Source::Calc => "misfits",
        Source::Chaos | Source::Covobs => "gnm",
        Source::Kalmag | Source::Prior => "MF",
    }
}

// ============================================================================
// Path preconditions
// ============================================================================

#[test]
fn test_nonexistent_path_is_invalid_argument() {
    let fixture = chaos_builder(TIMES, COEFFS).build();
    let missing = fixture.missing_sibling();

    for (source, read) in readers() {
        let err = read(&missing).unwrap_err();
        assert!(
            matches!(err, ReadError::InvalidArgument { .. }),
            "{}: expected InvalidArgument, got {:?}",
            source,
            err
        );
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_non_hdf5_file_is_invalid_argument() {
    let fixture = ContainerFixture::text_file("gnm,dgnm,times\n1,2,3\n");

    for (source, read) in readers() {
        let err = read(fixture.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{}", source);
    }
}

#[test]
fn test_corrupt_container_is_invalid_argument() {
    let mut bytes = HDF5_SIGNATURE.to_vec();
    bytes.extend_from_slice(&[0xff; 16]);
    let fixture = ContainerFixture::raw_file(&bytes);

    for (source, read) in readers() {
        let err = read(fixture.path()).unwrap_err();
        assert!(
            matches!(err, ReadError::InvalidArgument { .. }),
            "{}: expected InvalidArgument, got {:?}",
            source,
            err
        );
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_directory_is_invalid_argument() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_model(dir.path(), Source::Kalmag).unwrap_err();
    assert!(matches!(err, ReadError::InvalidArgument { .. }));
}

// ============================================================================
// Schema enforcement
// ============================================================================

#[test]
fn test_missing_key_is_schema_mismatch() {
    for (source, read) in readers() {
        let key = dataset_key(source);
        let fixture = builder_for(source).without(key).build();

        let err = read(fixture.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaMismatch, "{}", source);
        assert_eq!(err.missing_keys(), vec![key.to_string()], "{}", source);
    }
}

#[test]
fn test_extra_key_is_schema_mismatch() {
    for (source, read) in readers() {
        let fixture = builder_for(source)
            .dataset("comment", create_series(1, 1, 0.0).into_dyn())
            .build();

        let err = read(fixture.path()).unwrap_err();
        assert!(
            matches!(err, ReadError::SchemaMismatch { .. }),
            "{}: expected SchemaMismatch, got {:?}",
            source,
            err
        );
        assert_eq!(err.unexpected_keys(), vec!["comment".to_string()]);
    }
}

#[test]
fn test_kalmag_without_sv() {
    let fixture = kalmag_builder(REALIZATIONS, TIMES, COEFFS).without("SV").build();
    let err = read_kalmag(fixture.path()).unwrap_err();

    match &err {
        ReadError::SchemaMismatch { group, .. } => assert_eq!(group, "/"),
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
    assert_eq!(err.missing_keys(), vec!["SV".to_string()]);
}

#[test]
fn test_calc_nested_group_checked() {
    let fixture = calc_builder(REALIZATIONS, TIMES, COEFFS)
        .edit_group("computed", |computed| computed.without("U"))
        .build();
    let err = read_calc(fixture.path()).unwrap_err();

    match &err {
        ReadError::SchemaMismatch { group, .. } => assert_eq!(group, "/computed"),
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
    assert_eq!(err.missing_keys(), vec!["U".to_string()]);
}

#[test]
fn test_reading_as_wrong_source_fails() {
    let fixture = chaos_builder(TIMES, COEFFS).build();
    let err = read_model(fixture.path(), Source::Covobs).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
}

// ============================================================================
// Extraction and reduction
// ============================================================================

#[test]
fn test_every_reader_keeps_fields_aligned_with_times() {
    for (source, read) in readers() {
        let fixture = builder_for(source).build();
        let model = read(fixture.path()).unwrap();

        assert_eq!(model.kind, source.model_kind(), "{}", source);
        assert_eq!(model.time_len(), TIMES, "{}", source);
        assert!(
            model.misaligned_fields().is_empty(),
            "{}: misaligned {:?}",
            source,
            model.misaligned_fields()
        );
    }
}

#[test]
fn test_chaos_passes_arrays_through() {
    let fixture = chaos_builder(TIMES, COEFFS).build();
    let model = read_chaos(fixture.path()).unwrap();

    assert_eq!(model.kind, ModelKind::Observations);
    assert_eq!(model.name, Some(SourceName::Chaos));
    assert_eq!(model.times.len(), TIMES);
    assert_eq!(model.mf, create_series(TIMES, COEFFS, 0.0).into_dyn());
    assert_eq!(model.sv, Some(create_series(TIMES, COEFFS, 1000.0).into_dyn()));
    assert_eq!(model.var_mf, Some(create_series(TIMES, COEFFS, 2000.0).into_dyn()));
    assert_eq!(model.var_sv, Some(create_series(TIMES, COEFFS, 3000.0).into_dyn()));
    assert!(model.u.is_none());
}

#[test]
fn test_calc_reduces_computed_ensembles() {
    let fixture = calc_builder(4, TIMES, COEFFS).build();
    let model = read_calc(fixture.path()).unwrap();

    assert_eq!(model.kind, ModelKind::Calculations);
    assert!(model.name.is_none());
    assert_arrays_approx_eq!(model.mf, ensemble_mean(4, TIMES, COEFFS, 100.0).into_dyn(), 1e-9);
    assert_arrays_approx_eq!(
        model.u.as_ref().unwrap(),
        ensemble_mean(4, TIMES, COEFFS, 300.0).into_dyn(),
        1e-9
    );

    for std in [&model.var_mf, &model.var_sv, &model.var_u] {
        let std = std.as_ref().unwrap();
        assert_eq!(std.shape(), &[TIMES, COEFFS]);
        for &s in std.iter() {
            assert_approx_eq!(s, ensemble_std(4), 1e-9);
        }
    }
}

#[test]
fn test_covobs_reduces_q10_series() {
    let fixture = covobs_builder(REALIZATIONS, TIMES, COEFFS).build();
    let model = read_covobs(fixture.path()).unwrap();

    assert_eq!(model.name, Some(SourceName::Covobs));
    let q10 = model.q10.as_ref().unwrap();
    assert_eq!(q10.shape(), &[TIMES, 1]);
    assert_arrays_approx_eq!(q10, ensemble_mean(REALIZATIONS, TIMES, 1, 30.0).into_dyn(), 1e-9);
    for &s in model.var_dq10.as_ref().unwrap().iter() {
        assert_approx_eq!(s, ensemble_std(REALIZATIONS), 1e-9);
    }
}

#[test]
fn test_known_ensemble_statistics() {
    let (samples, mean, std) = known_ensemble_3x4();
    let mf = samples.insert_axis(Axis(1)).into_dyn();
    let sv = mf.mapv(|x| -x);

    let fixture = ContainerBuilder::new()
        .dataset("times", ndarray::array![2015.5].into_dyn())
        .dataset("MF", mf)
        .dataset("SV", sv)
        .build();
    let model = read_kalmag(fixture.path()).unwrap();

    assert_eq!(model.mf.shape(), &[1, 4]);
    assert_arrays_approx_eq!(model.mf, mean.clone().insert_axis(Axis(0)).into_dyn(), 1e-12);
    assert_arrays_approx_eq!(
        model.var_mf.as_ref().unwrap(),
        std.clone().insert_axis(Axis(0)).into_dyn(),
        1e-12
    );
    assert_arrays_approx_eq!(
        model.sv.as_ref().unwrap(),
        mean.mapv(|m| -m).insert_axis(Axis(0)).into_dyn(),
        1e-12
    );
    assert_arrays_approx_eq!(
        model.var_sv.as_ref().unwrap(),
        std.insert_axis(Axis(0)).into_dyn(),
        1e-12
    );
}

#[test]
fn test_prior_keeps_samples_unreduced() {
    let fixture = prior_builder(TIMES, COEFFS).build();
    let model = read_prior(fixture.path()).unwrap();

    assert_eq!(model.kind, ModelKind::Priors);
    assert_eq!(model.mf, create_series(TIMES, COEFFS, 5.0).into_dyn());
    assert_eq!(model.u, Some(create_series(TIMES, COEFFS, 500.0).into_dyn()));
    assert!(model.var_mf.is_none());
}

// ============================================================================
// Source detection
// ============================================================================

#[test]
fn test_detect_every_source() {
    for source in Source::ALL {
        let fixture = builder_for(source).build();
        assert_eq!(detect_source(fixture.path()).unwrap(), source);

        let (detected, model) = read_auto(fixture.path()).unwrap();
        assert_eq!(detected, source);
        assert_eq!(model.kind, source.model_kind());
    }
}

#[test]
fn test_detect_unknown_layout() {
    let fixture = ContainerBuilder::new()
        .dataset("times", create_series(1, 3, 0.0).into_dyn())
        .dataset("Br", create_series(3, 3, 0.0).into_dyn())
        .build();

    let err = read_auto(fixture.path()).unwrap_err();
    assert!(matches!(err, ReadError::UnknownSource { .. }));
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
}

#[test]
fn test_summary_serializes() {
    let fixture = kalmag_builder(REALIZATIONS, TIMES, COEFFS).build();
    let model = read_kalmag(fixture.path()).unwrap();

    let json = serde_json::to_value(model.summary()).unwrap();
    assert_eq!(json["type"], "observations");
    assert_eq!(json["time_len"], TIMES);
}
