//! # Unit Types
//!
//! Lightweight unit wrappers and display labels.
//!
//! The snap-fit formulas are unit-consistent: feed lengths in inches and the
//! modulus in psi and forces come out in pounds-force; feed millimetres and
//! MPa and they come out in newtons. The engine therefore works on plain
//! `f64` values and only the lead angle, which must be converted from degrees,
//! gets a type of its own.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::units::{Degrees, Radians};
//!
//! let lead = Degrees(30.0);
//! let rad: Radians = lead.into();
//! assert!((rad.0.tan() - 0.57735).abs() < 1e-5);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

// `deg * PI / 180`, not `f64::to_radians`: the two can differ in the last bit.
impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0 * std::f64::consts::PI / 180.0)
    }
}

// ============================================================================
// Display Labels
// ============================================================================

/// Unit labels shown next to inputs and results.
///
/// Purely cosmetic: changing these does not rescale anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLabels {
    /// Length label for L, h, b and y (e.g. "in", "mm")
    pub length: String,
    /// Force label for P and W (e.g. "lbf", "N")
    pub force: String,
    /// Modulus label for E (e.g. "psi", "MPa")
    pub modulus: String,
}

impl UnitLabels {
    /// US customary labels (the calculator's historical defaults)
    pub fn us_customary() -> Self {
        UnitLabels {
            length: "in".to_string(),
            force: "lbf".to_string(),
            modulus: "psi".to_string(),
        }
    }

    /// SI labels for millimetre/MPa inputs
    pub fn metric() -> Self {
        UnitLabels {
            length: "mm".to_string(),
            force: "N".to_string(),
            modulus: "MPa".to_string(),
        }
    }
}

impl Default for UnitLabels {
    fn default() -> Self {
        UnitLabels::us_customary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(180.0).into();
        assert_eq!(rad.0, std::f64::consts::PI);

        let rad: Radians = Degrees(30.0).into();
        assert_eq!(rad.0, 30.0 * std::f64::consts::PI / 180.0);
    }

    #[test]
    fn test_serialization() {
        let deg = Degrees(12.5);
        let json = serde_json::to_string(&deg).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Degrees = serde_json::from_str(&json).unwrap();
        assert_eq!(deg, roundtrip);
    }

    #[test]
    fn test_unit_label_presets() {
        assert_eq!(UnitLabels::default().force, "lbf");
        assert_eq!(UnitLabels::metric().modulus, "MPa");
    }
}
