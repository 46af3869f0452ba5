//! The immutable registry of named conditions.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::conditions::{is_existing_dir, is_existing_file, is_hdf5, IS_DIR, IS_FILE, IS_HDF5};
use crate::descriptor::ArgValue;

/// A named predicate over a single value.
pub type Predicate = Box<dyn Fn(&ArgValue) -> bool + Send + Sync>;

static STANDARD: Lazy<ConditionRegistry> =
    Lazy::new(|| ConditionRegistry::builder().with_standard_conditions().build());

/// Maps condition names to predicates. Read-only once built.
pub struct ConditionRegistry {
    conditions: BTreeMap<String, Predicate>,
}

impl ConditionRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The process-wide registry holding `is_file`, `is_dir` and `is_hdf5`.
    pub fn standard() -> &'static ConditionRegistry {
        &STANDARD
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.conditions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("conditions", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects conditions before freezing them into a [`ConditionRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    conditions: BTreeMap<String, Predicate>,
}

impl RegistryBuilder {
    pub fn with_standard_conditions(self) -> Self {
        self.register(IS_FILE, is_existing_file)
            .register(IS_DIR, is_existing_dir)
            .register(IS_HDF5, is_hdf5)
    }

    /// Register a predicate. A later registration under the same name
    /// replaces the earlier one.
    pub fn register<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&ArgValue) -> bool + Send + Sync + 'static,
    {
        self.conditions.insert(name.into(), Box::new(predicate));
        self
    }

    pub fn build(self) -> ConditionRegistry {
        ConditionRegistry {
            conditions: self.conditions,
        }
    }
}
