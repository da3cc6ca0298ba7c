//! # Cantilever Snap-Fit Formulas
//!
//! Closed-form formulas for a straight cantilever snap-fit arm of constant
//! cross-section, with a factor of safety applied to both the deflection and
//! the deflection force.
//!
//! ```text
//!   fixed ██┐
//!         ██│───────────────────┐  ← arm, thickness h, width b
//!         ██│                   │\
//!         ██┘───────────────────┘ \ ← lead angle α
//!            ◄──────── L ────────►
//! ```
//!
//! ## Notation
//!
//! - `K` = Profile factor (0.67 for a constant rectangular section)
//! - `ε` = Permissible strain of the material
//! - `E` = Elastic (secant) modulus
//! - `μ` = Coefficient of friction between arm and mating part
//! - `α` = Lead angle
//! - `FOS` = Factor of safety
//!
//! Every function is plain IEEE-754 arithmetic with no guards: zero
//! thickness, zero length or `μ·tan α = 1` yield infinities or NaN and the
//! caller decides what to make of them.

use crate::units::{Degrees, Radians};

/// Convert a lead angle in degrees to radians
///
/// # Formula
/// α = α° × π / 180
#[inline]
pub fn lead_angle_radians(alpha_deg: f64) -> f64 {
    Radians::from(Degrees(alpha_deg)).0
}

/// Permissible tip deflection of the arm
///
/// # Formula
/// y = K × ε × L² / h / FOS
///
/// # Example
/// ```rust
/// use snapfit_core::equations::snap_fit::permissible_deflection;
///
/// let y = permissible_deflection(0.67, 0.025, 1.0, 0.1, 1.5);
/// assert!((y - 0.11167).abs() < 1e-5);
/// ```
#[inline]
pub fn permissible_deflection(profile_factor: f64, eps: f64, l: f64, h: f64, fos: f64) -> f64 {
    profile_factor * eps * l * l / h / fos
}

/// Force needed to deflect the arm by the permissible deflection
///
/// # Formula
/// P = Z × E × ε / L / FOS
///
/// # Arguments
/// * `z` - Section modulus of the arm (see [`super::section::rectangular_section_modulus`])
/// * `e` - Elastic modulus
/// * `eps` - Permissible strain
/// * `l` - Arm length
/// * `fos` - Factor of safety
#[inline]
pub fn deflection_force(z: f64, e: f64, eps: f64, l: f64, fos: f64) -> f64 {
    z * e * eps / l / fos
}

/// Force needed to push the mating part past the arm
///
/// # Formula
/// W = P × (μ + tan α) / (1 − μ tan α)
///
/// The friction ratio is formed first and then applied to P. When
/// `μ tan α == 1` the result is infinite (self-locking lead angle).
#[inline]
pub fn mating_force(p: f64, mu: f64, alpha_rad: f64) -> f64 {
    let tan_alpha = alpha_rad.tan();
    p * ((mu + tan_alpha) / (1.0 - mu * tan_alpha))
}
