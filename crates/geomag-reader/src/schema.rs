//! Expected key sets for every supported source, and their enforcement.
//!
//! A container matches a source only if its key set at each checked level is
//! exactly the expected one: a missing, extra or renamed key is a mismatch.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use geomag_common::{ModelKind, SourceName};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::container::ArrayStore;
use crate::error::{ReadError, ReadResult};

/// Forecast run output, top level.
pub const CALC_KEYS: &[&str] = &["analysed", "computed", "forecast", "misfits"];
/// Group holding the computed series of a forecast run.
pub const CALC_COMPUTED_GROUP: &str = "computed";
/// Forecast run output, inside [`CALC_COMPUTED_GROUP`].
pub const CALC_COMPUTED_KEYS: &[&str] = &["ER", "MF", "SV", "U", "times"];
pub const CHAOS_KEYS: &[&str] = &["dgnm", "gnm", "times", "var_dgnm", "var_gnm"];
pub const COVOBS_KEYS: &[&str] = &["dgnm", "dq10", "gnm", "q10", "times"];
pub const KALMAG_KEYS: &[&str] = &["MF", "SV", "times"];
pub const PRIOR_KEYS: &[&str] = &["ER", "MF", "U", "times"];

/// A supported container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Forecast/analysis run output.
    Calc,
    /// CHAOS field model (single series with stored variances).
    Chaos,
    /// COVOBS ensemble field model.
    Covobs,
    /// KALMAG ensemble field model.
    Kalmag,
    /// Prior samples.
    Prior,
}

impl Source {
    pub const ALL: [Source; 5] = [
        Source::Calc,
        Source::Chaos,
        Source::Covobs,
        Source::Kalmag,
        Source::Prior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Calc => "calc",
            Source::Chaos => "chaos",
            Source::Covobs => "covobs",
            Source::Kalmag => "kalmag",
            Source::Prior => "prior",
        }
    }

    /// Exact top-level key set.
    pub fn expected_keys(&self) -> &'static [&'static str] {
        match self {
            Source::Calc => CALC_KEYS,
            Source::Chaos => CHAOS_KEYS,
            Source::Covobs => COVOBS_KEYS,
            Source::Kalmag => KALMAG_KEYS,
            Source::Prior => PRIOR_KEYS,
        }
    }

    /// Group checked one level down, with its exact key set.
    pub fn nested_schema(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Source::Calc => Some((CALC_COMPUTED_GROUP, CALC_COMPUTED_KEYS)),
            _ => None,
        }
    }

    pub fn model_kind(&self) -> ModelKind {
        match self {
            Source::Calc => ModelKind::Calculations,
            Source::Chaos | Source::Covobs | Source::Kalmag => ModelKind::Observations,
            Source::Prior => ModelKind::Priors,
        }
    }

    /// Name carried by observation models.
    pub fn source_name(&self) -> Option<SourceName> {
        match self {
            Source::Chaos => Some(SourceName::Chaos),
            Source::Covobs => Some(SourceName::Covobs),
            Source::Kalmag => Some(SourceName::Kalmag),
            Source::Calc | Source::Prior => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "calc" | "calculations" | "forecast" => Ok(Source::Calc),
            "chaos" => Ok(Source::Chaos),
            "covobs" => Ok(Source::Covobs),
            "kalmag" => Ok(Source::Kalmag),
            "prior" | "priors" => Ok(Source::Prior),
            other => Err(format!("unknown source '{}'", other)),
        }
    }
}

/// Fail with [`ReadError::SchemaMismatch`] unless `store`'s key set equals
/// `expected`.
pub fn check_keys<S: ArrayStore>(store: &S, expected: &[&str]) -> ReadResult<()> {
    let actual = store.member_keys()?;
    let location = store.location();

    if !same_keys(&actual, expected) {
        let err = ReadError::schema_mismatch(&location, expected, &actual);
        warn!(
            group = %location,
            missing = ?err.missing_keys(),
            unexpected = ?err.unexpected_keys(),
            "Container keys do not match the expected schema"
        );
        return Err(err);
    }

    debug!(group = %location, keys = expected.len(), "Schema matched");
    Ok(())
}

/// Check every level `source` constrains, returning the nested group when
/// there is one.
pub fn check_schema<S: ArrayStore>(store: &S, source: Source) -> ReadResult<Option<S::Group>> {
    check_keys(store, source.expected_keys())?;

    match source.nested_schema() {
        Some((group, keys)) => {
            let nested = store.subgroup(group)?;
            check_keys(&nested, keys)?;
            Ok(Some(nested))
        }
        None => Ok(None),
    }
}

/// The source whose top-level key set equals `store`'s.
///
/// Key sets are pairwise distinct, so at most one source matches.
pub fn detect<S: ArrayStore>(store: &S) -> ReadResult<Source> {
    let actual = store.member_keys()?;

    Source::ALL
        .into_iter()
        .find(|source| same_keys(&actual, source.expected_keys()))
        .ok_or_else(|| {
            warn!(keys = ?actual, "Container matches no known source");
            ReadError::UnknownSource {
                actual: actual.into_iter().collect(),
            }
        })
}

/// Set equality between a container's keys and a schema's.
fn same_keys(actual: &BTreeSet<String>, expected: &[&str]) -> bool {
    actual.len() == expected.len() && expected.iter().all(|key| actual.contains(*key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryStore;
    use ndarray::Array1;

    fn store_with(keys: &[&str]) -> MemoryStore {
        keys.iter().fold(MemoryStore::new(), |store, key| {
            store.with_array(key, Array1::<f64>::zeros(2).into_dyn())
        })
    }

    #[test]
    fn test_key_sets_are_distinct() {
        for (i, a) in Source::ALL.iter().enumerate() {
            for b in &Source::ALL[i + 1..] {
                let mut ka = a.expected_keys().to_vec();
                let mut kb = b.expected_keys().to_vec();
                ka.sort();
                kb.sort();
                assert_ne!(ka, kb, "{} and {} share a key set", a, b);
            }
        }
    }

    #[test]
    fn test_check_keys_exact() {
        assert!(check_keys(&store_with(KALMAG_KEYS), KALMAG_KEYS).is_ok());
    }

    #[test]
    fn test_check_keys_missing() {
        let err = check_keys(&store_with(&["MF", "times"]), KALMAG_KEYS).unwrap_err();
        assert!(matches!(err, ReadError::SchemaMismatch { .. }));
        assert_eq!(err.missing_keys(), vec!["SV"]);
    }

    #[test]
    fn test_check_keys_extra() {
        let err = check_keys(&store_with(&["MF", "SV", "times", "notes"]), KALMAG_KEYS).unwrap_err();
        assert_eq!(err.unexpected_keys(), vec!["notes"]);
    }

    #[test]
    fn test_check_keys_is_case_sensitive() {
        let err = check_keys(&store_with(&["mf", "SV", "times"]), KALMAG_KEYS).unwrap_err();
        assert_eq!(err.missing_keys(), vec!["MF"]);
        assert_eq!(err.unexpected_keys(), vec!["mf"]);
    }

    #[test]
    fn test_check_schema_nested() {
        let computed = store_with(&["ER", "MF", "SV", "times"]);
        let store = store_with(&["analysed", "forecast", "misfits"]).with_group("computed", computed);

        let err = check_schema(&store, Source::Calc).unwrap_err();
        match &err {
            ReadError::SchemaMismatch { group, .. } => assert_eq!(group, "/computed"),
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
        assert_eq!(err.missing_keys(), vec!["U"]);
    }

    #[test]
    fn test_detect() {
        for source in Source::ALL {
            assert_eq!(detect(&store_with(source.expected_keys())).unwrap(), source);
        }

        let err = detect(&store_with(&["gnm", "times"])).unwrap_err();
        assert!(matches!(err, ReadError::UnknownSource { .. }));
    }

    #[test]
    fn test_source_from_str() {
        assert_eq!("CHAOS".parse::<Source>().unwrap(), Source::Chaos);
        assert_eq!("priors".parse::<Source>().unwrap(), Source::Prior);
        assert!("igrf".parse::<Source>().is_err());
    }

    #[test]
    fn test_source_metadata() {
        assert_eq!(Source::Calc.model_kind(), ModelKind::Calculations);
        assert_eq!(Source::Kalmag.source_name(), Some(SourceName::Kalmag));
        assert!(Source::Prior.source_name().is_none());
    }
}
