//! # Form Adapter
//!
//! Text-field state for the calculator and the rules that turn it into
//! numbers. Field text is kept verbatim so that what the user typed survives
//! a round trip; coercion happens when inputs are built.
//!
//! Two coercion rules are used:
//!
//! - [`coerce_number`] for model inputs: the whole (trimmed) string must be a
//!   number, an empty field counts as `0`, anything else is `NaN`.
//! - [`parse_float_prefix`] for sweep bounds: the longest leading numeric
//!   prefix is used (`"12abc"` is `12`), an empty field is `NaN`.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::form::{SnapFitForm, SweepForm};
//! use snapfit_core::calculations::{calculate, run_sweep, SweepVariable};
//!
//! let mut form = SnapFitForm::default();
//! form.thickness = "0.12".to_string();
//!
//! let inputs = form.to_inputs()?;
//! let result = calculate(&inputs);
//!
//! let sweep = SweepForm::from_defaults(SweepVariable::Thickness, &form);
//! assert_eq!(sweep.start, "0.0960");
//! let points = run_sweep(&sweep.to_spec(), &inputs)?;
//! # Ok::<(), snapfit_core::errors::CalcError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::snap_fit::{SnapFitInputs, DEFAULT_FACTOR_OF_SAFETY};
use crate::calculations::sweep::{default_range, SweepSpec, SweepVariable};
use crate::errors::CalcResult;
use crate::materials::{CrossSectionProfile, MaterialLibrary, MaterialProperties, BUILT_IN_MATERIALS};

/// Coerce field text to a number the way a numeric form field does.
///
/// Surrounding whitespace is ignored. An empty string is `0`. Decimal and
/// exponent notation, `Infinity` with an optional sign, and unsigned
/// `0x`/`0o`/`0b` integers are accepted; anything else is `NaN`.
pub fn coerce_number(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_integer(s) {
        return value;
    }

    // Rust's float grammar also takes "inf"/"nan" spellings, which are not numbers here
    if s.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_integer(s: &str) -> Option<f64> {
    let (radix, digits) = match s.get(..2)? {
        "0x" | "0X" => (16, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0b" | "0B" => (2, &s[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Parse the longest numeric prefix of `text`.
///
/// Leading whitespace is skipped; parsing stops at the first character that
/// cannot continue a decimal number. No numeric prefix at all gives `NaN`.
pub fn parse_float_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            i = 1;
            true
        }
        Some(b'+') => {
            i = 1;
            false
        }
        _ => false,
    };

    if s[i..].starts_with("Infinity") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_end = digits_from(i);
    let mut end = int_end;
    let mut has_digits = int_end > i;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut j = end + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Format a number with a fixed count of decimals for writing back into a
/// text field. Infinities use the spelling [`parse_float_prefix`] reads back.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // no "-0.0000"
        return format!("{:.*}", decimals, 0.0);
    }
    format!("{:.*}", decimals, value)
}

/// Text state of the calculator form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapFitForm {
    /// Selected material name
    pub material: String,
    /// Selected profile identifier
    pub profile: String,
    /// Elastic modulus E
    pub elastic_modulus: String,
    /// Permissible strain ε
    pub max_strain: String,
    /// Arm length L
    pub length: String,
    /// Arm thickness h
    pub thickness: String,
    /// Arm width b
    pub width: String,
    /// Friction coefficient μ
    pub friction: String,
    /// Lead angle α in degrees
    pub lead_angle: String,
    /// Factor of safety
    pub fos: String,
}

impl Default for SnapFitForm {
    fn default() -> Self {
        let abs = BUILT_IN_MATERIALS[0];
        SnapFitForm {
            material: abs.name.to_string(),
            profile: CrossSectionProfile::default().display_name().to_string(),
            elastic_modulus: abs.properties.elastic_modulus.to_string(),
            max_strain: abs.properties.max_strain.to_string(),
            length: "1.0".to_string(),
            thickness: "0.1".to_string(),
            width: "0.5".to_string(),
            friction: "0.3".to_string(),
            lead_angle: "30".to_string(),
            fos: DEFAULT_FACTOR_OF_SAFETY.to_string(),
        }
    }
}

impl SnapFitForm {
    /// Coerce the form into model inputs.
    ///
    /// Numeric fields never fail (bad text becomes `NaN`); only an
    /// unrecognised profile is an error.
    pub fn to_inputs(&self) -> CalcResult<SnapFitInputs> {
        Ok(SnapFitInputs {
            profile: CrossSectionProfile::from_str_flexible(&self.profile)?,
            elastic_modulus: coerce_number(&self.elastic_modulus),
            max_strain: coerce_number(&self.max_strain),
            length: coerce_number(&self.length),
            thickness: coerce_number(&self.thickness),
            width: coerce_number(&self.width),
            friction_coefficient: coerce_number(&self.friction),
            lead_angle_deg: coerce_number(&self.lead_angle),
            factor_of_safety: Some(coerce_number(&self.fos)),
        })
    }

    /// Write a material's E and ε into the form
    pub fn apply_material(&mut self, properties: MaterialProperties) {
        self.elastic_modulus = properties.elastic_modulus.to_string();
        self.max_strain = properties.max_strain.to_string();
    }

    /// Select a material by name, copying its properties into the form.
    ///
    /// An unknown name leaves the form untouched and returns `false`.
    pub fn select_material(&mut self, library: &MaterialLibrary, name: &str) -> bool {
        match library.get(name) {
            Some(properties) => {
                self.material = name.to_string();
                self.apply_material(properties);
                true
            }
            None => {
                tracing::warn!(material = name, "unknown material, form left unchanged");
                false
            }
        }
    }

    /// Current text of the field a sweep variable maps to
    pub fn field(&self, variable: SweepVariable) -> &str {
        match variable {
            SweepVariable::Length => &self.length,
            SweepVariable::Thickness => &self.thickness,
            SweepVariable::Width => &self.width,
            SweepVariable::ElasticModulus => &self.elastic_modulus,
            SweepVariable::MaxStrain => &self.max_strain,
            SweepVariable::Friction => &self.friction,
            SweepVariable::LeadAngle => &self.lead_angle,
        }
    }
}

/// Text state of the sweep controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepForm {
    pub variable: SweepVariable,
    pub start: String,
    pub end: String,
    pub step: String,
}

impl SweepForm {
    /// Sweep controls filled with the default range around the variable's
    /// current form value, written with 4 decimals
    pub fn from_defaults(variable: SweepVariable, form: &SnapFitForm) -> Self {
        let range = default_range(coerce_number(form.field(variable)));
        SweepForm {
            variable,
            start: to_fixed(range.start, 4),
            end: to_fixed(range.end, 4),
            step: to_fixed(range.step, 4),
        }
    }

    /// Parse the controls into a sweep
    pub fn to_spec(&self) -> SweepSpec {
        SweepSpec {
            variable: self.variable,
            start: parse_float_prefix(&self.start),
            end: parse_float_prefix(&self.end),
            step: parse_float_prefix(&self.step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::store::MemoryStore;
    use crate::materials::save_material;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
        assert_eq!(coerce_number(" 0.25 "), 0.25);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number(".5"), 0.5);
        assert_eq!(coerce_number("5."), 5.0);
        assert_eq!(coerce_number("-2"), -2.0);
        assert_eq!(coerce_number("0x1F"), 31.0);
        assert_eq!(coerce_number("Infinity"), f64::INFINITY);
        assert_eq!(coerce_number("-Infinity"), f64::NEG_INFINITY);

        assert!(coerce_number("12abc").is_nan());
        assert!(coerce_number("abc").is_nan());
        assert!(coerce_number("inf").is_nan());
        assert!(coerce_number("nan").is_nan());
        assert!(coerce_number("1,5").is_nan());
        assert!(coerce_number("0x").is_nan());
        assert!(coerce_number("0xZZ").is_nan());
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("12abc"), 12.0);
        assert_eq!(parse_float_prefix("  3.5 in"), 3.5);
        assert_eq!(parse_float_prefix("0.0800"), 0.08);
        assert_eq!(parse_float_prefix("-.5"), -0.5);
        assert_eq!(parse_float_prefix("1e-2x"), 0.01);
        assert_eq!(parse_float_prefix("2e"), 2.0);
        assert_eq!(parse_float_prefix("7.e+1"), 70.0);
        assert_eq!(parse_float_prefix("0x10"), 0.0);
        assert_eq!(parse_float_prefix("-Infinityx"), f64::NEG_INFINITY);

        assert!(parse_float_prefix("").is_nan());
        assert!(parse_float_prefix(".").is_nan());
        assert!(parse_float_prefix("-").is_nan());
        assert!(parse_float_prefix("abc").is_nan());
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(0.08000000000000002, 4), "0.0800");
        assert_eq!(to_fixed(-0.0, 4), "0.0000");
        assert_eq!(to_fixed(f64::INFINITY, 4), "Infinity");
        assert_eq!(to_fixed(f64::NAN, 4), "NaN");
    }

    #[test]
    fn test_default_form_matches_default_inputs() {
        let inputs = SnapFitForm::default().to_inputs().unwrap();
        assert_eq!(inputs, SnapFitInputs::default());
    }

    #[test]
    fn test_bad_text_flows_through_as_nan() {
        let form = SnapFitForm {
            length: "abc".to_string(),
            thickness: "".to_string(),
            ..SnapFitForm::default()
        };
        let inputs = form.to_inputs().unwrap();
        assert!(inputs.length.is_nan());
        assert_eq!(inputs.thickness, 0.0);
    }

    #[test]
    fn test_fos_text_defaults() {
        for text in ["", "0", "abc", "-1"] {
            let form = SnapFitForm {
                fos: text.to_string(),
                ..SnapFitForm::default()
            };
            let inputs = form.to_inputs().unwrap();
            assert_eq!(inputs.effective_factor_of_safety(), 1.5, "fos text {:?}", text);
        }
    }

    #[test]
    fn test_unknown_profile_is_error() {
        let form = SnapFitForm {
            profile: "I-Beam".to_string(),
            ..SnapFitForm::default()
        };
        assert_eq!(form.to_inputs().unwrap_err().error_code(), "PROFILE_NOT_FOUND");
    }

    #[test]
    fn test_select_material() {
        let mut store = MemoryStore::new();
        save_material(&mut store, "Custom PP", MaterialProperties::new(190_000.0, 0.045)).unwrap();
        let library = MaterialLibrary::load(&store).unwrap();

        let mut form = SnapFitForm::default();
        assert!(form.select_material(&library, "Nylon 6"));
        assert_eq!(form.material, "Nylon 6");
        assert_eq!(form.elastic_modulus, "400000");
        assert_eq!(form.max_strain, "0.015");

        assert!(form.select_material(&library, "Custom PP"));
        assert_eq!(form.elastic_modulus, "190000");

        let before = form.clone();
        assert!(!form.select_material(&library, "Unobtainium"));
        assert_eq!(form, before);
    }

    #[test]
    fn test_sweep_form_defaults() {
        let form = SnapFitForm::default();

        let sweep = SweepForm::from_defaults(SweepVariable::Thickness, &form);
        assert_eq!(sweep.start, "0.0800");
        assert_eq!(sweep.end, "0.1200");
        assert_eq!(sweep.step, "0.0050");

        let sweep = SweepForm::from_defaults(SweepVariable::ElasticModulus, &form);
        assert_eq!(sweep.start, "256000.0000");
        assert_eq!(sweep.step, "16000.0000");

        let blank = SnapFitForm {
            friction: "".to_string(),
            ..SnapFitForm::default()
        };
        let sweep = SweepForm::from_defaults(SweepVariable::Friction, &blank);
        assert_eq!((sweep.start.as_str(), sweep.end.as_str()), ("0.0000", "1.0000"));
        assert_eq!(sweep.step, "0.0500");
    }

    #[test]
    fn test_sweep_form_to_spec() {
        let sweep = SweepForm {
            variable: SweepVariable::Length,
            start: "0.5in".to_string(),
            end: "1.5".to_string(),
            step: "".to_string(),
        };
        let spec = sweep.to_spec();
        assert_eq!(spec.start, 0.5);
        assert_eq!(spec.end, 1.5);
        assert!(spec.step.is_nan());
    }
}
