//! Access to the hierarchical array containers the readers consume.
//!
//! Readers only need three things from a container: the names at one level,
//! a nested group, and a dataset as an `f64` array. [`ArrayStore`] captures
//! that, with an HDF5 implementation for files on disk and an in-memory one
//! for building containers in code.
//!
//! [`Hdf5Container::open`] silences the HDF5 library's stderr diagnostics
//! before touching any file, so failures surface only as [`ReadError`]s.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use ndarray::ArrayD;
use preconditions::silence_hdf5_errors;
use tracing::{debug, trace};

use crate::error::{ReadError, ReadResult};

/// Read-only view of one level of a container.
pub trait ArrayStore {
    /// Store type of nested groups.
    type Group: ArrayStore;

    /// Path of this level inside the container, `/` for the root.
    fn location(&self) -> String;

    /// Names of every dataset and group directly under this level.
    fn member_keys(&self) -> ReadResult<BTreeSet<String>>;

    /// Open the nested group `name`.
    fn subgroup(&self, name: &str) -> ReadResult<Self::Group>;

    /// Read dataset `name` fully into memory.
    fn read_array(&self, name: &str) -> ReadResult<ArrayD<f64>>;
}

/// An HDF5 file opened read-only.
///
/// The file handle is released when this value is dropped, on every exit
/// path of the read that opened it.
pub struct Hdf5Container {
    file: hdf5::File,
    path: PathBuf,
}

impl Hdf5Container {
    pub fn open(path: &Path) -> ReadResult<Self> {
        silence_hdf5_errors();

        let file = hdf5::File::open(path)
            .map_err(|e| ReadError::container(path.display().to_string(), e))?;
        debug!(path = %path.display(), "Opened container");

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn root(&self) -> &hdf5::Group {
        &self.file
    }
}

impl Drop for Hdf5Container {
    fn drop(&mut self) {
        trace!(path = %self.path.display(), "Closing container");
    }
}

impl ArrayStore for Hdf5Container {
    type Group = hdf5::Group;

    fn location(&self) -> String {
        ArrayStore::location(self.root())
    }

    fn member_keys(&self) -> ReadResult<BTreeSet<String>> {
        ArrayStore::member_keys(self.root())
    }

    fn subgroup(&self, name: &str) -> ReadResult<hdf5::Group> {
        ArrayStore::subgroup(self.root(), name)
    }

    fn read_array(&self, name: &str) -> ReadResult<ArrayD<f64>> {
        ArrayStore::read_array(self.root(), name)
    }
}

impl ArrayStore for hdf5::Group {
    type Group = hdf5::Group;

    fn location(&self) -> String {
        self.name()
    }

    fn member_keys(&self) -> ReadResult<BTreeSet<String>> {
        let names = self
            .member_names()
            .map_err(|e| ReadError::container(self.name(), e))?;
        Ok(names.into_iter().collect())
    }

    fn subgroup(&self, name: &str) -> ReadResult<hdf5::Group> {
        self.group(name)
            .map_err(|e| ReadError::container(join_location(&self.name(), name), e))
    }

    fn read_array(&self, name: &str) -> ReadResult<ArrayD<f64>> {
        let location = join_location(&self.name(), name);
        let dataset = self
            .dataset(name)
            .map_err(|e| ReadError::container(location.clone(), e))?;
        let array = dataset
            .read_dyn::<f64>()
            .map_err(|e| ReadError::container(location.clone(), e))?;
        trace!(dataset = %location, shape = ?array.shape(), "Read dataset");
        Ok(array)
    }
}

/// A container level held entirely in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStore {
    location: String,
    members: BTreeMap<String, MemoryMember>,
}

#[derive(Debug, Clone, PartialEq)]
enum MemoryMember {
    Array(ArrayD<f64>),
    Group(MemoryStore),
}

impl MemoryStore {
    /// An empty root level.
    pub fn new() -> Self {
        Self {
            location: "/".to_string(),
            members: BTreeMap::new(),
        }
    }

    pub fn with_array(mut self, name: &str, array: ArrayD<f64>) -> Self {
        self.members
            .insert(name.to_string(), MemoryMember::Array(array));
        self
    }

    /// Nest `group` under `name`, relocating it below this level.
    pub fn with_group(mut self, name: &str, mut group: MemoryStore) -> Self {
        group.relocate(&join_location(&self.location, name));
        self.members
            .insert(name.to_string(), MemoryMember::Group(group));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.members.remove(name);
        self
    }

    fn relocate(&mut self, location: &str) {
        self.location = location.to_string();
        for (name, member) in self.members.iter_mut() {
            if let MemoryMember::Group(group) = member {
                group.relocate(&join_location(location, name));
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayStore for MemoryStore {
    type Group = MemoryStore;

    fn location(&self) -> String {
        self.location.clone()
    }

    fn member_keys(&self) -> ReadResult<BTreeSet<String>> {
        Ok(self.members.keys().cloned().collect())
    }

    fn subgroup(&self, name: &str) -> ReadResult<MemoryStore> {
        match self.members.get(name) {
            Some(MemoryMember::Group(group)) => Ok(group.clone()),
            Some(MemoryMember::Array(_)) => Err(ReadError::container(
                join_location(&self.location, name),
                "not a group",
            )),
            None => Err(ReadError::container(
                join_location(&self.location, name),
                "no such group",
            )),
        }
    }

    fn read_array(&self, name: &str) -> ReadResult<ArrayD<f64>> {
        match self.members.get(name) {
            Some(MemoryMember::Array(array)) => Ok(array.clone()),
            Some(MemoryMember::Group(_)) => Err(ReadError::container(
                join_location(&self.location, name),
                "not a dataset",
            )),
            None => Err(ReadError::container(
                join_location(&self.location, name),
                "no such dataset",
            )),
        }
    }
}

fn join_location(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}
