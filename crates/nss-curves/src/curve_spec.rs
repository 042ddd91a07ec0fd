//! Curve specifications and the flat record format.
//!
//! Outside the library a curve is a flat JSON object of its parameters:
//!
//! ```text
//! {"beta0": 0.017, "beta1": -0.023, "beta2": 0.24, "tau": 2.2}
//! {"beta0": 0.017, "beta1": -0.023, "beta2": 0.24, "beta3": 0.1, "tau1": 2.2, "tau2": 3.1}
//! ```
//!
//! A record containing `beta3` is a Svensson curve; anything else is read
//! as Nelson-Siegel. Inside the library the two cases are the variants of
//! [`CurveSpec`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use nalgebra::{DMatrix, DVector};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CurveError, CurveResult};
use crate::models::{FactorModel, NelsonSiegel, Svensson};

const NELSON_SIEGEL_FIELDS: &[&str] = &["beta0", "beta1", "beta2", "tau"];
const SVENSSON_FIELDS: &[&str] = &["beta0", "beta1", "beta2", "beta3", "tau1", "tau2"];

/// Key whose presence marks a Svensson record.
pub const SVENSSON_DISCRIMINATOR: &str = "beta3";

/// A parsed curve record: parameter name to value.
pub type CurveRecord = BTreeMap<String, f64>;

/// Either of the supported curve models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveSpec {
    /// Three-factor Nelson-Siegel curve.
    NelsonSiegel(NelsonSiegel),
    /// Four-factor Nelson-Siegel-Svensson curve.
    Svensson(Svensson),
}

impl CurveSpec {
    /// Builds a curve from a flat record.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidRecord`] for missing or unknown fields
    /// and [`CurveError::InvalidShape`] for non-positive decay scales.
    pub fn from_record(record: &CurveRecord) -> CurveResult<Self> {
        if record.contains_key(SVENSSON_DISCRIMINATOR) {
            let v = fields(record, SVENSSON_FIELDS)?;
            Ok(Self::Svensson(Svensson::try_new(
                v[0], v[1], v[2], v[3], v[4], v[5],
            )?))
        } else {
            let v = fields(record, NELSON_SIEGEL_FIELDS)?;
            Ok(Self::NelsonSiegel(NelsonSiegel::try_new(
                v[0], v[1], v[2], v[3],
            )?))
        }
    }

    /// Flattens the curve into its record form.
    pub fn to_record(&self) -> BTreeMap<&'static str, f64> {
        let values = match self {
            Self::NelsonSiegel(ns) => {
                let (b0, b1, b2, tau) = ns.parameters();
                vec![b0, b1, b2, tau]
            }
            Self::Svensson(nss) => {
                let (b0, b1, b2, b3, tau1, tau2) = nss.parameters();
                vec![b0, b1, b2, b3, tau1, tau2]
            }
        };
        self.field_names().iter().copied().zip(values).collect()
    }

    /// Parameter names in record order.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::NelsonSiegel(_) => NELSON_SIEGEL_FIELDS,
            Self::Svensson(_) => SVENSSON_FIELDS,
        }
    }

    /// Model name.
    pub fn model_name(&self) -> &'static str {
        match self {
            Self::NelsonSiegel(_) => "Nelson-Siegel",
            Self::Svensson(_) => "Nelson-Siegel-Svensson",
        }
    }

    /// Serializes the curve as a flat JSON object.
    pub fn to_json(&self) -> CurveResult<String> {
        serde_json::to_string(self).map_err(|e| CurveError::invalid_record(e.to_string()))
    }

    fn as_model(&self) -> &dyn FactorModel {
        match self {
            Self::NelsonSiegel(ns) => ns,
            Self::Svensson(nss) => nss,
        }
    }
}

/// Extracts `names` from `record` in order, rejecting missing and unknown keys.
fn fields(record: &CurveRecord, names: &[&str]) -> CurveResult<Vec<f64>> {
    if let Some(unknown) = record.keys().find(|k| !names.contains(&k.as_str())) {
        return Err(CurveError::invalid_record(format!(
            "unknown field `{unknown}`, expected one of {}",
            names.join(", ")
        )));
    }
    names
        .iter()
        .map(|name| {
            record
                .get(*name)
                .copied()
                .ok_or_else(|| CurveError::invalid_record(format!("missing field `{name}`")))
        })
        .collect()
}

impl FactorModel for CurveSpec {
    fn factor_count(&self) -> usize {
        self.as_model().factor_count()
    }

    fn betas(&self) -> Vec<f64> {
        self.as_model().betas()
    }

    fn taus(&self) -> Vec<f64> {
        self.as_model().taus()
    }

    fn factor_vector(&self, t: f64) -> DVector<f64> {
        self.as_model().factor_vector(t)
    }

    fn factor_matrix(&self, t: &[f64]) -> DMatrix<f64> {
        self.as_model().factor_matrix(t)
    }

    fn zero(&self, t: f64) -> f64 {
        self.as_model().zero(t)
    }

    fn zeros(&self, t: &[f64]) -> Vec<f64> {
        self.as_model().zeros(t)
    }

    fn forward(&self, t: f64) -> f64 {
        self.as_model().forward(t)
    }

    fn forwards(&self, t: &[f64]) -> Vec<f64> {
        self.as_model().forwards(t)
    }
}

impl From<NelsonSiegel> for CurveSpec {
    fn from(ns: NelsonSiegel) -> Self {
        Self::NelsonSiegel(ns)
    }
}

impl From<Svensson> for CurveSpec {
    fn from(nss: Svensson) -> Self {
        Self::Svensson(nss)
    }
}

impl Serialize for CurveSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CurveSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = CurveRecord::deserialize(deserializer)?;
        Self::from_record(&record).map_err(de::Error::custom)
    }
}

impl FromStr for CurveSpec {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let record: CurveRecord =
            serde_json::from_str(s).map_err(|e| CurveError::invalid_record(e.to_string()))?;
        Self::from_record(&record)
    }
}

impl fmt::Display for CurveSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NelsonSiegel(ns) => fmt::Display::fmt(ns, f),
            Self::Svensson(nss) => fmt::Display::fmt(nss, f),
        }
    }
}

/// Evaluates the zero curve of `model` at every maturity in `times`.
pub fn evaluate_curve<M: FactorModel + ?Sized>(model: &M, times: &[f64]) -> Vec<f64> {
    model.zeros(times)
}

/// Evaluates the instantaneous forward curve of `model` at every maturity in `times`.
pub fn evaluate_forward<M: FactorModel + ?Sized>(model: &M, times: &[f64]) -> Vec<f64> {
    model.forwards(times)
}
