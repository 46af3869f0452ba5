//! The unified model record produced by every format reader.
//!
//! Each source organizes its datasets differently, but downstream analysis
//! only ever sees a [`Model`]: a time axis plus spectral coefficient series
//! (main field, secular variation and auxiliary quantities), each paired with
//! its dispersion when the source provides or implies one.

use std::fmt;

use ndarray::{Array1, ArrayD};
use serde::{Deserialize, Serialize};

use crate::time::TimeSpan;

/// What a model describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Output of a forecast/analysis run.
    Calculations,
    /// An observation-based field model (CHAOS, COVOBS, KALMAG).
    Observations,
    /// Prior samples used to seed a forecast run.
    Priors,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Calculations => "calculations",
            ModelKind::Observations => "observations",
            ModelKind::Priors => "priors",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Representation domain of the coefficient arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Spherical harmonic (Gauss) coefficients.
    #[default]
    Spectral,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Spectral => "spectral",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of an observation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceName {
    Chaos,
    Covobs,
    Kalmag,
}

impl SourceName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceName::Chaos => "chaos",
            SourceName::Covobs => "covobs",
            SourceName::Kalmag => "kalmag",
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A geomagnetic model normalized from one container.
///
/// Every array is owned; nothing refers back to the container it was read
/// from. `times` indexes the first axis of every coefficient array.
///
/// Field names serialize the way downstream tooling spells them
/// (`type`, `MF`, `var_MF`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    #[serde(rename = "type")]
    pub kind: ModelKind,
    pub domain: Domain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<SourceName>,
    pub times: Array1<f64>,

    /// Main field coefficients.
    #[serde(rename = "MF")]
    pub mf: ArrayD<f64>,
    /// Secular variation coefficients.
    #[serde(rename = "SV", skip_serializing_if = "Option::is_none")]
    pub sv: Option<ArrayD<f64>>,
    /// Forecast correction (core flow) term.
    #[serde(rename = "U", skip_serializing_if = "Option::is_none")]
    pub u: Option<ArrayD<f64>>,
    #[serde(rename = "Q10", skip_serializing_if = "Option::is_none")]
    pub q10: Option<ArrayD<f64>>,
    #[serde(rename = "dQ10", skip_serializing_if = "Option::is_none")]
    pub dq10: Option<ArrayD<f64>>,

    #[serde(rename = "var_MF", skip_serializing_if = "Option::is_none")]
    pub var_mf: Option<ArrayD<f64>>,
    #[serde(rename = "var_SV", skip_serializing_if = "Option::is_none")]
    pub var_sv: Option<ArrayD<f64>>,
    #[serde(rename = "var_U", skip_serializing_if = "Option::is_none")]
    pub var_u: Option<ArrayD<f64>>,
    #[serde(rename = "var_Q10", skip_serializing_if = "Option::is_none")]
    pub var_q10: Option<ArrayD<f64>>,
    #[serde(rename = "var_dQ10", skip_serializing_if = "Option::is_none")]
    pub var_dq10: Option<ArrayD<f64>>,
}

impl Model {
    /// A model carrying only its time axis and main field.
    ///
    /// Readers fill in the remaining fields with struct update syntax.
    pub fn new(kind: ModelKind, times: Array1<f64>, mf: ArrayD<f64>) -> Self {
        Self {
            kind,
            domain: Domain::Spectral,
            name: None,
            times,
            mf,
            sv: None,
            u: None,
            q10: None,
            dq10: None,
            var_mf: None,
            var_sv: None,
            var_u: None,
            var_q10: None,
            var_dq10: None,
        }
    }

    /// Number of epochs in the model.
    pub fn time_len(&self) -> usize {
        self.times.len()
    }

    /// All populated coefficient arrays, keyed by their serialized name.
    pub fn per_time_fields(&self) -> Vec<(&'static str, &ArrayD<f64>)> {
        let optional = [
            ("SV", &self.sv),
            ("U", &self.u),
            ("Q10", &self.q10),
            ("dQ10", &self.dq10),
            ("var_MF", &self.var_mf),
            ("var_SV", &self.var_sv),
            ("var_U", &self.var_u),
            ("var_Q10", &self.var_q10),
            ("var_dQ10", &self.var_dq10),
        ];

        std::iter::once(("MF", &self.mf))
            .chain(
                optional
                    .into_iter()
                    .filter_map(|(name, field)| field.as_ref().map(|array| (name, array))),
            )
            .collect()
    }

    /// Names of fields whose leading dimension disagrees with `times`.
    pub fn misaligned_fields(&self) -> Vec<&'static str> {
        let n = self.time_len();
        self.per_time_fields()
            .into_iter()
            .filter(|(_, array)| array.shape().first() != Some(&n))
            .map(|(name, _)| name)
            .collect()
    }

    /// Lightweight description of the model, without the array contents.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            kind: self.kind,
            domain: self.domain,
            name: self.name,
            time_len: self.time_len(),
            time_span: TimeSpan::from_times(self.times.view()),
            fields: self
                .per_time_fields()
                .into_iter()
                .map(|(name, array)| FieldSummary {
                    name,
                    shape: array.shape().to_vec(),
                })
                .collect(),
        }
    }
}

/// Shape of one populated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    pub name: &'static str,
    pub shape: Vec<usize>,
}

/// Model metadata plus the shape of every populated field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    #[serde(rename = "type")]
    pub kind: ModelKind,
    pub domain: Domain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<SourceName>,
    pub time_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_span: Option<TimeSpan>,
    pub fields: Vec<FieldSummary>,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type: {}", self.kind)?;
        if let Some(name) = self.name {
            write!(f, " ({})", name)?;
        }
        writeln!(f)?;
        writeln!(f, "domain: {}", self.domain)?;
        write!(f, "times: {}", self.time_len)?;
        if let Some(span) = &self.time_span {
            write!(f, " [{}]", span)?;
        }
        writeln!(f)?;
        for field in &self.fields {
            writeln!(f, "  {:<9} {:?}", field.name, field.shape)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn observation_model() -> Model {
        let times = array![2000.0, 2000.5, 2001.0];
        let mf = Array2::<f64>::zeros((3, 8)).into_dyn();
        Model {
            name: Some(SourceName::Chaos),
            sv: Some(Array2::<f64>::ones((3, 8)).into_dyn()),
            var_mf: Some(Array2::<f64>::zeros((3, 8)).into_dyn()),
            ..Model::new(ModelKind::Observations, times, mf)
        }
    }

    #[test]
    fn test_new_defaults_to_spectral_domain() {
        let model = Model::new(
            ModelKind::Priors,
            array![1.0],
            Array2::<f64>::zeros((1, 2)).into_dyn(),
        );
        assert_eq!(model.domain, Domain::Spectral);
        assert!(model.name.is_none());
        assert!(model.sv.is_none());
    }

    #[test]
    fn test_per_time_fields_lists_populated_only() {
        let model = observation_model();
        let names: Vec<_> = model.per_time_fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["MF", "SV", "var_MF"]);
    }

    #[test]
    fn test_misaligned_fields() {
        let mut model = observation_model();
        assert!(model.misaligned_fields().is_empty());

        model.var_sv = Some(Array2::<f64>::zeros((2, 8)).into_dyn());
        assert_eq!(model.misaligned_fields(), vec!["var_SV"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(observation_model()).unwrap();
        assert_eq!(json["type"], "observations");
        assert_eq!(json["domain"], "spectral");
        assert_eq!(json["name"], "chaos");
        assert!(json.get("MF").is_some());
        assert!(json.get("var_MF").is_some());
        assert!(json.get("U").is_none());
    }

    #[test]
    fn test_summary_display() {
        let summary = observation_model().summary();
        assert_eq!(summary.time_len, 3);
        assert_eq!(summary.fields.len(), 3);

        let text = summary.to_string();
        assert!(text.contains("type: observations (chaos)"));
        assert!(text.contains("[3, 8]"));
    }
}
