//! Cross-Section Profiles
//!
//! Deflection-shape factors for snap-fit arm cross-sections. This table is
//! the only place the profile factor lives; every calculation looks it up
//! through [`CrossSectionProfile::factor`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Snap-fit arm cross-section profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CrossSectionProfile {
    /// Rectangular section, constant along the arm
    #[default]
    #[serde(rename = "Rectangle – Constant Cross Section")]
    RectangleConstant,
}

impl CrossSectionProfile {
    /// All profiles for UI selection
    pub const ALL: [CrossSectionProfile; 1] = [CrossSectionProfile::RectangleConstant];

    /// Dimensionless deflection-shape factor
    pub fn factor(&self) -> f64 {
        match self {
            CrossSectionProfile::RectangleConstant => 0.67,
        }
    }

    /// Get display name (also the identifier stored in form state)
    pub fn display_name(&self) -> &'static str {
        match self {
            CrossSectionProfile::RectangleConstant => "Rectangle – Constant Cross Section",
        }
    }

    /// Short code for command-line use
    pub fn code(&self) -> &'static str {
        match self {
            CrossSectionProfile::RectangleConstant => "rect-constant",
        }
    }

    /// Parse from common string representations
    ///
    /// Accepts the display name (en dash or plain hyphen), the short code,
    /// or a few loose spellings.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s
            .trim()
            .to_lowercase()
            .replace('–', "-")
            .replace([' ', '_'], "");
        match normalized.as_str() {
            "rectangle-constantcrosssection"
            | "rect-constant"
            | "rectangle"
            | "rect"
            | "rectangular" => Ok(CrossSectionProfile::RectangleConstant),
            _ => Err(CalcError::profile_not_found(s)),
        }
    }
}

impl std::fmt::Display for CrossSectionProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_factor() {
        assert_eq!(CrossSectionProfile::RectangleConstant.factor(), 0.67);
        assert_eq!(CrossSectionProfile::default(), CrossSectionProfile::RectangleConstant);
    }

    #[test]
    fn test_profile_parsing() {
        for name in [
            "Rectangle – Constant Cross Section",
            "Rectangle - Constant Cross Section",
            "rect-constant",
            "rectangle",
        ] {
            assert_eq!(
                CrossSectionProfile::from_str_flexible(name).unwrap(),
                CrossSectionProfile::RectangleConstant,
                "failed to parse {:?}",
                name
            );
        }
        assert!(CrossSectionProfile::from_str_flexible("I-beam").is_err());
    }

    #[test]
    fn test_serialization_uses_display_name() {
        let json = serde_json::to_string(&CrossSectionProfile::RectangleConstant).unwrap();
        assert_eq!(json, "\"Rectangle – Constant Cross Section\"");
        let roundtrip: CrossSectionProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, CrossSectionProfile::RectangleConstant);
    }
}
