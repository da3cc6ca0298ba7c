//! # Parametric Sweep
//!
//! Re-evaluates the snap-fit model while one input walks across a range,
//! producing the ordered series a chart plots.
//!
//! The swept value starts at `start` and advances by repeated addition of
//! `step` (so it accumulates floating-point error exactly as an incremental
//! loop does) until it passes `end`, which is inclusive.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::calculations::snap_fit::SnapFitInputs;
//! use snapfit_core::calculations::sweep::{run_sweep, SweepSeries, SweepSpec, SweepVariable};
//!
//! let base = SnapFitInputs::default();
//! let spec = SweepSpec::with_defaults(SweepVariable::Thickness, &base);
//!
//! let points = run_sweep(&spec, &base)?;
//! let series = SweepSeries::from_points(&points);
//! assert_eq!(series.labels.first().map(String::as_str), Some("0.080"));
//! # Ok::<(), snapfit_core::errors::CalcError>(())
//! ```

use serde::{Deserialize, Serialize};

use super::snap_fit::{calculate, SnapFitInputs, SnapFitResult};
use crate::errors::{CalcError, CalcResult};

/// Upper bound on the number of points a single sweep may produce
pub const MAX_SWEEP_POINTS: usize = 100_000;

/// Decimals used for sweep labels unless a caller asks otherwise
pub const DEFAULT_LABEL_DECIMALS: usize = 3;

/// Chart title for a sweep
pub const CHART_TITLE: &str = "Parametric Study";
/// Dataset title for the deflection force series
pub const DEFLECTION_FORCE_TITLE: &str = "Deflection Force P (lbf)";
/// Dataset title for the mating force series
pub const MATING_FORCE_TITLE: &str = "Mating Force W (lbf)";
/// Dataset title for the permissible deflection series
pub const DEFLECTION_TITLE: &str = "Permissible Deflection y (in)";

/// Input that a sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepVariable {
    /// Arm length L
    #[serde(rename = "L")]
    Length,
    /// Arm thickness h
    #[serde(rename = "h")]
    Thickness,
    /// Arm width b
    #[serde(rename = "b")]
    Width,
    /// Elastic modulus E
    #[serde(rename = "E")]
    ElasticModulus,
    /// Permissible strain ε
    #[serde(rename = "eps")]
    MaxStrain,
    /// Friction coefficient μ
    #[serde(rename = "mu")]
    Friction,
    /// Lead angle α (degrees)
    #[serde(rename = "alpha")]
    LeadAngle,
}

impl SweepVariable {
    /// All variables, in form order
    pub const ALL: [SweepVariable; 7] = [
        SweepVariable::Length,
        SweepVariable::Thickness,
        SweepVariable::Width,
        SweepVariable::ElasticModulus,
        SweepVariable::MaxStrain,
        SweepVariable::Friction,
        SweepVariable::LeadAngle,
    ];

    /// Short form-field code
    pub fn code(&self) -> &'static str {
        match self {
            SweepVariable::Length => "L",
            SweepVariable::Thickness => "h",
            SweepVariable::Width => "b",
            SweepVariable::ElasticModulus => "E",
            SweepVariable::MaxStrain => "eps",
            SweepVariable::Friction => "mu",
            SweepVariable::LeadAngle => "alpha",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SweepVariable::Length => "Length L",
            SweepVariable::Thickness => "Thickness h",
            SweepVariable::Width => "Width b",
            SweepVariable::ElasticModulus => "Elastic Modulus E",
            SweepVariable::MaxStrain => "Max Strain ε",
            SweepVariable::Friction => "Friction μ",
            SweepVariable::LeadAngle => "Lead Angle α",
        }
    }

    /// Parse from a form code or a long name.
    ///
    /// Short codes are case-sensitive (`L` and `E` are upper case, the rest
    /// lower case); long names ignore case.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let s = s.trim();
        let by_code = SweepVariable::ALL.iter().find(|v| v.code() == s);
        if let Some(v) = by_code {
            return Ok(*v);
        }

        match s.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "length" => Ok(SweepVariable::Length),
            "thickness" => Ok(SweepVariable::Thickness),
            "width" => Ok(SweepVariable::Width),
            "elasticmodulus" | "modulus" => Ok(SweepVariable::ElasticModulus),
            "maxstrain" | "strain" => Ok(SweepVariable::MaxStrain),
            "friction" | "frictioncoefficient" => Ok(SweepVariable::Friction),
            "leadangle" => Ok(SweepVariable::LeadAngle),
            _ => Err(CalcError::invalid_input(
                "variable",
                s,
                "Expected one of L, h, b, E, eps, mu, alpha",
            )),
        }
    }

    /// Current value of this variable in `inputs`
    pub fn value_in(&self, inputs: &SnapFitInputs) -> f64 {
        match self {
            SweepVariable::Length => inputs.length,
            SweepVariable::Thickness => inputs.thickness,
            SweepVariable::Width => inputs.width,
            SweepVariable::ElasticModulus => inputs.elastic_modulus,
            SweepVariable::MaxStrain => inputs.max_strain,
            SweepVariable::Friction => inputs.friction_coefficient,
            SweepVariable::LeadAngle => inputs.lead_angle_deg,
        }
    }

    /// Copy of `inputs` with this variable replaced by `value`
    pub fn substitute(&self, inputs: &SnapFitInputs, value: f64) -> SnapFitInputs {
        let mut out = *inputs;
        match self {
            SweepVariable::Length => out.length = value,
            SweepVariable::Thickness => out.thickness = value,
            SweepVariable::Width => out.width = value,
            SweepVariable::ElasticModulus => out.elastic_modulus = value,
            SweepVariable::MaxStrain => out.max_strain = value,
            SweepVariable::Friction => out.friction_coefficient = value,
            SweepVariable::LeadAngle => out.lead_angle_deg = value,
        }
        out
    }
}

impl std::fmt::Display for SweepVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Start, end (inclusive) and increment of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

/// Default range around a variable's current value: ±20% in 5% steps.
///
/// A zero or NaN value gives `0..=1` in steps of `0.05`.
pub fn default_range(value: f64) -> SweepRange {
    if value.is_nan() || value == 0.0 {
        return SweepRange {
            start: 0.0,
            end: 1.0,
            step: 0.05,
        };
    }
    SweepRange {
        start: value * 0.8,
        end: value * 1.2,
        step: value * 0.05,
    }
}

/// A sweep over one input.
///
/// ## JSON Example
///
/// ```json
/// { "variable": "h", "start": 0.08, "end": 0.12, "step": 0.005 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    pub variable: SweepVariable,
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl SweepSpec {
    /// Sweep with an explicit range
    pub fn new(variable: SweepVariable, range: SweepRange) -> Self {
        SweepSpec {
            variable,
            start: range.start,
            end: range.end,
            step: range.step,
        }
    }

    /// Sweep with the default range around the variable's value in `base`
    pub fn with_defaults(variable: SweepVariable, base: &SnapFitInputs) -> Self {
        Self::new(variable, default_range(variable.value_in(base)))
    }

    /// Range part of this sweep
    pub fn range(&self) -> SweepRange {
        SweepRange {
            start: self.start,
            end: self.end,
            step: self.step,
        }
    }
}

/// One evaluated sample of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Value of the swept variable
    pub x: f64,
    #[serde(flatten)]
    pub result: SnapFitResult,
}

/// Walk `spec` over `base`, evaluating the model at each sample.
///
/// A step whose sign disagrees with `end - start` yields no points; a
/// negative step walks downward from `start` to `end`. NaN bounds yield no
/// points. A zero step, a step too small to move the swept value, or a range
/// needing more than [`MAX_SWEEP_POINTS`] samples is rejected with
/// [`CalcError::InvalidSweep`].
pub fn run_sweep(spec: &SweepSpec, base: &SnapFitInputs) -> CalcResult<Vec<SweepPoint>> {
    let SweepSpec {
        variable,
        start,
        end,
        step,
    } = *spec;

    let reject = |reason: &str| {
        tracing::warn!(%variable, start, end, step, reason, "sweep rejected");
        CalcError::invalid_sweep(variable.code(), start, end, step, reason)
    };

    if step == 0.0 {
        return Err(reject("Step must be non-zero"));
    }

    let descending = step < 0.0;
    let in_range = |x: f64| if descending { x >= end } else { x <= end };

    let mut points = Vec::new();
    let mut x = start;
    while in_range(x) {
        if points.len() >= MAX_SWEEP_POINTS {
            return Err(reject("Range needs too many steps"));
        }
        let inputs = variable.substitute(base, x);
        points.push(SweepPoint {
            x,
            result: calculate(&inputs),
        });

        let next = x + step;
        if next == x {
            return Err(reject("Step is too small to advance the swept value"));
        }
        x = next;
    }

    tracing::debug!(%variable, points = points.len(), "sweep complete");
    Ok(points)
}

/// Parallel chart series built from sweep points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepSeries {
    /// Swept values formatted to 3 decimals
    pub labels: Vec<String>,
    /// Raw swept values
    pub x: Vec<f64>,
    /// Deflection force P per sample
    pub deflection_force: Vec<f64>,
    /// Mating force W per sample
    pub mating_force: Vec<f64>,
    /// Permissible deflection y per sample
    pub deflection: Vec<f64>,
}

impl SweepSeries {
    /// Split points into label and dataset columns, labels to 3 decimals
    pub fn from_points(points: &[SweepPoint]) -> Self {
        Self::with_label_decimals(points, DEFAULT_LABEL_DECIMALS)
    }

    /// Like [`from_points`](Self::from_points) with a chosen label precision
    pub fn with_label_decimals(points: &[SweepPoint], decimals: usize) -> Self {
        let mut series = SweepSeries::default();
        for p in points {
            series.labels.push(format!("{:.*}", decimals, p.x));
            series.x.push(p.x);
            series.deflection_force.push(p.result.deflection_force);
            series.mating_force.push(p.result.mating_force);
            series.deflection.push(p.result.deflection);
        }
        series
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Titled datasets in plotting order (P, W, y)
    pub fn datasets(&self) -> [(&'static str, &[f64]); 3] {
        [
            (DEFLECTION_FORCE_TITLE, self.deflection_force.as_slice()),
            (MATING_FORCE_TITLE, self.mating_force.as_slice()),
            (DEFLECTION_TITLE, self.deflection.as_slice()),
        ]
    }
}
