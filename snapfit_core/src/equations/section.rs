//! # Cross-Section Property Formulas
//!
//! Geometric properties of the snap-fit arm cross-section.
//!
//! ## Notation
//!
//! - `b` = Arm width (parallel to the neutral axis)
//! - `h` = Arm thickness (in the direction of deflection)
//! - `Z` = Section modulus (I/c)
//!
//! ## References
//!
//! - Bayer MaterialScience, "Snap-Fit Joints for Plastics - A Design Guide"
//! - Roark's Formulas for Stress and Strain, 8th Edition, Chapter 3

// =============================================================================
// RECTANGULAR SECTION PROPERTIES
// =============================================================================

/// Calculate section modulus for a rectangular arm
///
/// # Formula
/// Z = I/c = bh³/12 ÷ h/2 = bh²/6
///
/// ```text
///     ┌─────────┐
///   h │ ════════│ ← neutral axis at h/2
///     └─────────┘
///          b
/// ```
///
/// Evaluated strictly left to right as `b * h * h / 6`; the sweep and the
/// single-point calculation both depend on this exact rounding.
///
/// # Arguments
/// * `b` - Arm width
/// * `h` - Arm thickness
///
/// # Example
/// ```rust
/// use snapfit_core::equations::section::rectangular_section_modulus;
///
/// // 0.5" wide, 0.1" thick arm
/// let z = rectangular_section_modulus(0.5, 0.1);
/// assert!((z - 8.3333e-4).abs() < 1e-7);
/// ```
#[inline]
pub fn rectangular_section_modulus(b: f64, h: f64) -> f64 {
    b * h * h / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() / b.abs().max(1e-12) < 1e-9
    }

    #[test]
    fn test_rectangular_section_modulus() {
        let z = rectangular_section_modulus(0.5, 0.1);
        assert!(approx_eq(z, 0.5 * 0.01 / 6.0), "Z = {}", z);
    }

    #[test]
    fn test_zero_thickness_gives_zero_modulus() {
        assert_eq!(rectangular_section_modulus(0.5, 0.0), 0.0);
    }
}
