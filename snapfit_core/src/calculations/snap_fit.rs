//! # Cantilever Snap-Fit Calculation
//!
//! Permissible deflection, deflection force and mating force of a straight
//! cantilever snap-fit arm.
//!
//! ## Assumptions
//!
//! - Arm fixed at the root, load applied at the tip
//! - Constant cross-section along the arm (profile factor from [`CrossSectionProfile`])
//! - Linear-elastic material up to the permissible strain
//! - Factor of safety divides both the deflection and the deflection force
//!
//! The calculation performs no validation: whatever the arithmetic yields
//! (including NaN and infinities) is returned. Call
//! [`SnapFitInputs::validate`] first when stricter behaviour is wanted.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::calculations::snap_fit::{calculate, SnapFitInputs};
//! use snapfit_core::materials::CrossSectionProfile;
//!
//! let input = SnapFitInputs {
//!     profile: CrossSectionProfile::RectangleConstant,
//!     elastic_modulus: 320_000.0, // psi (ABS)
//!     max_strain: 0.025,
//!     length: 1.0,                // in
//!     thickness: 0.1,             // in
//!     width: 0.5,                 // in
//!     friction_coefficient: 0.3,
//!     lead_angle_deg: 30.0,
//!     factor_of_safety: Some(1.5),
//! };
//!
//! let result = calculate(&input);
//! println!("y = {:.4} in", result.deflection);
//! println!("P = {:.2} lbf", result.deflection_force);
//! println!("W = {:.2} lbf", result.mating_force);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{
    deflection_force, lead_angle_radians, mating_force, permissible_deflection,
    rectangular_section_modulus,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{CrossSectionProfile, MaterialProperties};

/// Factor of safety used when none (or a non-positive one) is given
pub const DEFAULT_FACTOR_OF_SAFETY: f64 = 1.5;

/// Input parameters for a cantilever snap-fit.
///
/// ## JSON Example
///
/// ```json
/// {
///   "profile": "Rectangle – Constant Cross Section",
///   "elastic_modulus": 320000.0,
///   "max_strain": 0.025,
///   "length": 1.0,
///   "thickness": 0.1,
///   "width": 0.5,
///   "friction_coefficient": 0.3,
///   "lead_angle_deg": 30.0,
///   "factor_of_safety": 1.5
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapFitInputs {
    /// Arm cross-section profile
    #[serde(default)]
    pub profile: CrossSectionProfile,

    /// Elastic modulus E
    pub elastic_modulus: f64,

    /// Permissible strain ε
    pub max_strain: f64,

    /// Arm length L
    pub length: f64,

    /// Arm thickness h (direction of deflection)
    pub thickness: f64,

    /// Arm width b
    pub width: f64,

    /// Friction coefficient μ between arm and mating part
    pub friction_coefficient: f64,

    /// Lead angle α in degrees
    pub lead_angle_deg: f64,

    /// Factor of safety; `None`, zero, negative or NaN means 1.5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor_of_safety: Option<f64>,
}

impl Default for SnapFitInputs {
    /// ABS arm, 1" long, 0.1" thick, 0.5" wide, μ = 0.3, α = 30°
    fn default() -> Self {
        SnapFitInputs {
            profile: CrossSectionProfile::RectangleConstant,
            elastic_modulus: 320_000.0,
            max_strain: 0.025,
            length: 1.0,
            thickness: 0.1,
            width: 0.5,
            friction_coefficient: 0.3,
            lead_angle_deg: 30.0,
            factor_of_safety: Some(DEFAULT_FACTOR_OF_SAFETY),
        }
    }
}

impl SnapFitInputs {
    /// Copy a material's E and ε into these inputs
    pub fn with_material(mut self, material: MaterialProperties) -> Self {
        self.elastic_modulus = material.elastic_modulus;
        self.max_strain = material.max_strain;
        self
    }

    /// Material properties currently held by these inputs
    pub fn material(&self) -> MaterialProperties {
        MaterialProperties::new(self.elastic_modulus, self.max_strain)
    }

    /// Factor of safety actually applied
    pub fn effective_factor_of_safety(&self) -> f64 {
        match self.factor_of_safety {
            Some(fos) if fos > 0.0 => fos,
            _ => DEFAULT_FACTOR_OF_SAFETY,
        }
    }

    /// Optional strict check of input parameters.
    ///
    /// The calculation never calls this; it exists for callers that want to
    /// reject physically meaningless input instead of getting NaN back.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("elastic_modulus", self.elastic_modulus, "Elastic modulus must be positive"),
            ("max_strain", self.max_strain, "Permissible strain must be positive"),
            ("length", self.length, "Arm length must be positive"),
            ("thickness", self.thickness, "Arm thickness must be positive"),
            ("width", self.width, "Arm width must be positive"),
        ];
        for (field, value, reason) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), reason));
            }
        }

        if !(self.friction_coefficient.is_finite() && self.friction_coefficient >= 0.0) {
            return Err(CalcError::invalid_input(
                "friction_coefficient",
                self.friction_coefficient.to_string(),
                "Friction coefficient must be zero or positive",
            ));
        }

        if !(self.lead_angle_deg.is_finite() && (0.0..90.0).contains(&self.lead_angle_deg)) {
            return Err(CalcError::invalid_input(
                "lead_angle_deg",
                self.lead_angle_deg.to_string(),
                "Lead angle must be at least 0° and less than 90°",
            ));
        }

        if self.friction_coefficient * lead_angle_radians(self.lead_angle_deg).tan() >= 1.0 {
            return Err(CalcError::invalid_input(
                "lead_angle_deg",
                self.lead_angle_deg.to_string(),
                "μ·tan(α) ≥ 1: the joint is self-locking and cannot be assembled",
            ));
        }

        if let Some(fos) = self.factor_of_safety {
            if fos.is_infinite() {
                return Err(CalcError::invalid_input(
                    "factor_of_safety",
                    fos.to_string(),
                    "Factor of safety must be finite",
                ));
            }
        }

        Ok(())
    }
}

/// Results of a snap-fit calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "deflection": 0.11166666666666668,
///   "deflection_force": 4.444444444444445,
///   "mating_force": 4.716253882408006
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapFitResult {
    /// Permissible deflection y
    pub deflection: f64,
    /// Deflection force P
    pub deflection_force: f64,
    /// Mating force W
    pub mating_force: f64,
}

impl SnapFitResult {
    /// True when every value is a finite number
    pub fn is_finite(&self) -> bool {
        self.deflection.is_finite()
            && self.deflection_force.is_finite()
            && self.mating_force.is_finite()
    }
}

/// Snap-fit model on raw numbers.
///
/// ```text
/// α = α° π / 180
/// y = K ε L² / h / FOS
/// Z = b h² / 6
/// P = Z E ε / L / FOS
/// W = P (μ + tan α) / (1 − μ tan α)
/// ```
///
/// Pure and infallible; NaN and infinities propagate unchanged.
#[allow(clippy::too_many_arguments)]
pub fn compute_snap_fit(
    profile_factor: f64,
    elastic_modulus: f64,
    max_strain: f64,
    length: f64,
    thickness: f64,
    width: f64,
    friction_coefficient: f64,
    lead_angle_deg: f64,
    factor_of_safety: f64,
) -> SnapFitResult {
    let alpha = lead_angle_radians(lead_angle_deg);
    let y = permissible_deflection(profile_factor, max_strain, length, thickness, factor_of_safety);
    let z = rectangular_section_modulus(width, thickness);
    let p = deflection_force(z, elastic_modulus, max_strain, length, factor_of_safety);
    let w = mating_force(p, friction_coefficient, alpha);

    SnapFitResult {
        deflection: y,
        deflection_force: p,
        mating_force: w,
    }
}

/// Calculate a snap-fit from structured inputs.
///
/// Resolves the profile factor and the effective factor of safety, then
/// evaluates [`compute_snap_fit`].
pub fn calculate(input: &SnapFitInputs) -> SnapFitResult {
    compute_snap_fit(
        input.profile.factor(),
        input.elastic_modulus,
        input.max_strain,
        input.length,
        input.thickness,
        input.width,
        input.friction_coefficient,
        input.lead_angle_deg,
        input.effective_factor_of_safety(),
    )
}
