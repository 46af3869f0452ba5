//! HDF5 container fixtures laid out like each supported source.
//!
//! Fixtures are written into a fresh temporary directory that is removed
//! when the [`ContainerFixture`] is dropped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ndarray::ArrayD;
use tempfile::TempDir;

use crate::generators::{create_ensemble, create_series, decimal_years};

/// Default fixture dimensions.
pub const REALIZATIONS: usize = 3;
pub const TIMES: usize = 10;
pub const COEFFS: usize = 8;

/// First epoch and spacing of fixture time axes, in decimal years.
pub const FIRST_EPOCH: f64 = 1990.0;
pub const EPOCH_STEP: f64 = 0.5;

/// A file on disk that lives as long as this value.
pub struct ContainerFixture {
    _dir: TempDir,
    path: PathBuf,
}

impl ContainerFixture {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path inside the fixture's directory that does not exist.
    pub fn missing_sibling(&self) -> PathBuf {
        self.path.with_file_name("missing.hdf5")
    }

    /// A plain file that is not an HDF5 container.
    pub fn text_file(contents: &str) -> Self {
        Self::raw_file(contents.as_bytes())
    }

    /// A file holding exactly `bytes`, named like a container.
    pub fn raw_file(bytes: &[u8]) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("not_a_container.hdf5");
        std::fs::write(&path, bytes).expect("write raw fixture");
        Self { _dir: dir, path }
    }
}

/// Describes the datasets and groups of a container to write.
#[derive(Debug, Clone, Default)]
pub struct ContainerBuilder {
    datasets: BTreeMap<String, ArrayD<f64>>,
    groups: BTreeMap<String, ContainerBuilder>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(mut self, name: &str, array: ArrayD<f64>) -> Self {
        self.groups.remove(name);
        self.datasets.insert(name.to_string(), array);
        self
    }

    pub fn group(mut self, name: &str, group: ContainerBuilder) -> Self {
        self.datasets.remove(name);
        self.groups.insert(name.to_string(), group);
        self
    }

    /// Drop a dataset or group.
    pub fn without(mut self, name: &str) -> Self {
        self.datasets.remove(name);
        self.groups.remove(name);
        self
    }

    /// Replace the nested group `name` by applying `f` to it.
    pub fn edit_group(mut self, name: &str, f: impl FnOnce(ContainerBuilder) -> ContainerBuilder) -> Self {
        let group = self.groups.remove(name).unwrap_or_default();
        self.groups.insert(name.to_string(), f(group));
        self
    }

    /// Write the container to `path`, truncating any existing file.
    pub fn write_to(&self, path: &Path) -> hdf5::Result<()> {
        let file = hdf5::File::create(path)?;
        self.write_group(&file)
    }

    fn write_group(&self, group: &hdf5::Group) -> hdf5::Result<()> {
        for (name, array) in &self.datasets {
            group
                .new_dataset_builder()
                .with_data(array)
                .create(name.as_str())?;
        }
        for (name, builder) in &self.groups {
            let nested = group.create_group(name)?;
            builder.write_group(&nested)?;
        }
        Ok(())
    }

    /// Write into a fresh temporary directory.
    pub fn build(&self) -> ContainerFixture {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("container.hdf5");
        self.write_to(&path).expect("write HDF5 fixture");
        ContainerFixture { _dir: dir, path }
    }
}

fn times(n: usize) -> ArrayD<f64> {
    decimal_years(n, FIRST_EPOCH, EPOCH_STEP).into_dyn()
}

/// Forecast run output: ensembles of `MF`, `SV`, `U`, `ER` under `computed`.
///
/// Bases: MF 100, SV 200, U 300, ER 400.
pub fn calc_builder(realizations: usize, n_times: usize, coeffs: usize) -> ContainerBuilder {
    let computed = ContainerBuilder::new()
        .dataset("times", times(n_times))
        .dataset("MF", create_ensemble(realizations, n_times, coeffs, 100.0).into_dyn())
        .dataset("SV", create_ensemble(realizations, n_times, coeffs, 200.0).into_dyn())
        .dataset("U", create_ensemble(realizations, n_times, coeffs, 300.0).into_dyn())
        .dataset("ER", create_ensemble(realizations, n_times, coeffs, 400.0).into_dyn());

    let misfits = ContainerBuilder::new()
        .dataset("MF", create_series(n_times, coeffs, 0.0).into_dyn());

    ContainerBuilder::new()
        .group("analysed", ContainerBuilder::new().dataset("times", times(n_times)))
        .group("computed", computed)
        .group("forecast", ContainerBuilder::new().dataset("times", times(n_times)))
        .group("misfits", misfits)
}

/// CHAOS: single series with stored variances.
///
/// Bases: gnm 0, dgnm 1000, var_gnm 2000, var_dgnm 3000.
pub fn chaos_builder(n_times: usize, coeffs: usize) -> ContainerBuilder {
    ContainerBuilder::new()
        .dataset("times", times(n_times))
        .dataset("gnm", create_series(n_times, coeffs, 0.0).into_dyn())
        .dataset("dgnm", create_series(n_times, coeffs, 1000.0).into_dyn())
        .dataset("var_gnm", create_series(n_times, coeffs, 2000.0).into_dyn())
        .dataset("var_dgnm", create_series(n_times, coeffs, 3000.0).into_dyn())
}

/// COVOBS: ensembles of gnm, dgnm, q10, dq10.
///
/// Bases: gnm 10, dgnm 20, q10 30, dq10 40.
pub fn covobs_builder(realizations: usize, n_times: usize, coeffs: usize) -> ContainerBuilder {
    ContainerBuilder::new()
        .dataset("times", times(n_times))
        .dataset("gnm", create_ensemble(realizations, n_times, coeffs, 10.0).into_dyn())
        .dataset("dgnm", create_ensemble(realizations, n_times, coeffs, 20.0).into_dyn())
        .dataset("q10", create_ensemble(realizations, n_times, 1, 30.0).into_dyn())
        .dataset("dq10", create_ensemble(realizations, n_times, 1, 40.0).into_dyn())
}

/// KALMAG: ensembles of MF and SV.
///
/// Bases: MF -50, SV 50.
pub fn kalmag_builder(realizations: usize, n_times: usize, coeffs: usize) -> ContainerBuilder {
    ContainerBuilder::new()
        .dataset("times", times(n_times))
        .dataset("MF", create_ensemble(realizations, n_times, coeffs, -50.0).into_dyn())
        .dataset("SV", create_ensemble(realizations, n_times, coeffs, 50.0).into_dyn())
}

/// Prior samples: MF, U, ER as stored.
///
/// Bases: MF 5, U 500, ER 700.
pub fn prior_builder(n_times: usize, coeffs: usize) -> ContainerBuilder {
    ContainerBuilder::new()
        .dataset("times", times(n_times))
        .dataset("MF", create_series(n_times, coeffs, 5.0).into_dyn())
        .dataset("U", create_series(n_times, coeffs, 500.0).into_dyn())
        .dataset("ER", create_series(n_times, coeffs, 700.0).into_dyn())
}
