//! # User Settings
//!
//! Persisted preferences: which material and profile a new form starts with,
//! how many decimals results are shown with, and the unit labels printed next
//! to values. Stored as `settings.json` in the data directory.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "default_material": "ABS (Generic)",
//!   "default_profile": "Rectangle – Constant Cross Section",
//!   "deflection_decimals": 4,
//!   "force_decimals": 2,
//!   "label_decimals": 3,
//!   "units": { "length": "in", "force": "lbf", "modulus": "psi" }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::file_io::{self, FileLock, SCHEMA_VERSION};
use crate::materials::{CrossSectionProfile, BUILT_IN_MATERIALS};
use crate::units::UnitLabels;

/// File name of the settings file inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Largest decimal count accepted for display precision
pub const MAX_DECIMALS: usize = 10;

fn schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema version (for migration compatibility)
    #[serde(default = "schema_version")]
    pub version: String,

    /// Material selected when a form is created
    pub default_material: String,

    /// Profile selected when a form is created
    pub default_profile: CrossSectionProfile,

    /// Decimals for the permissible deflection y
    pub deflection_decimals: usize,

    /// Decimals for the forces P and W
    pub force_decimals: usize,

    /// Decimals for sweep labels
    pub label_decimals: usize,

    /// Unit labels printed next to values
    pub units: UnitLabels,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: schema_version(),
            default_material: BUILT_IN_MATERIALS[0].name.to_string(),
            default_profile: CrossSectionProfile::default(),
            deflection_decimals: 4,
            force_decimals: 2,
            label_decimals: 3,
            units: UnitLabels::default(),
        }
    }
}

impl Settings {
    /// Keys accepted by [`Settings::set`]
    pub const KEYS: [&'static str; 9] = [
        "default_material",
        "default_profile",
        "deflection_decimals",
        "force_decimals",
        "label_decimals",
        "units",
        "units.length",
        "units.force",
        "units.modulus",
    ];

    /// Path of the settings file inside `data_dir`
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE)
    }

    /// Load settings from `data_dir`, falling back to defaults when no file
    /// has been written yet
    pub fn load_or_default(data_dir: &Path) -> CalcResult<Self> {
        let path = Self::path_in(data_dir);
        match file_io::read_json::<Settings>(&path)? {
            Some(settings) => {
                file_io::validate_version(&settings.version)?;
                tracing::debug!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            None => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Settings::default())
            }
        }
    }

    /// Write settings to `data_dir`
    pub fn save(&self, data_dir: &Path) -> CalcResult<()> {
        let path = Self::path_in(data_dir);
        file_io::ensure_parent_dir(&path)?;
        let _lock = FileLock::acquire(&path, file_io::current_user())?;

        let mut stored = self.clone();
        stored.version = schema_version();
        file_io::write_json_atomic(&path, &stored)?;

        tracing::info!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Delete the settings file so the next load yields defaults
    pub fn reset(data_dir: &Path) -> CalcResult<()> {
        let path = Self::path_in(data_dir);
        file_io::remove_if_exists(&path)?;
        tracing::info!(path = %path.display(), "reset settings");
        Ok(())
    }

    /// Set one value from text.
    ///
    /// `units` takes a preset (`us` or `metric`); `units.*` sets one label.
    pub fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
        match key {
            "default_material" => {
                if value.trim().is_empty() {
                    return Err(CalcError::invalid_input(key, value, "Material name must not be empty"));
                }
                self.default_material = value.to_string();
            }
            "default_profile" => {
                self.default_profile = CrossSectionProfile::from_str_flexible(value)?;
            }
            "deflection_decimals" => self.deflection_decimals = parse_decimals(key, value)?,
            "force_decimals" => self.force_decimals = parse_decimals(key, value)?,
            "label_decimals" => self.label_decimals = parse_decimals(key, value)?,
            "units" => {
                self.units = match value.trim().to_lowercase().as_str() {
                    "us" | "us_customary" | "imperial" => UnitLabels::us_customary(),
                    "metric" | "si" => UnitLabels::metric(),
                    _ => {
                        return Err(CalcError::invalid_input(key, value, "Expected 'us' or 'metric'"));
                    }
                }
            }
            "units.length" => self.units.length = value.to_string(),
            "units.force" => self.units.force = value.to_string(),
            "units.modulus" => self.units.modulus = value.to_string(),
            _ => {
                return Err(CalcError::invalid_input(
                    "key",
                    key,
                    format!("Unknown setting; expected one of {}", Self::KEYS.join(", ")),
                ));
            }
        }
        Ok(())
    }
}

fn parse_decimals(key: &str, value: &str) -> CalcResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n <= MAX_DECIMALS => Ok(n),
        _ => Err(CalcError::invalid_input(
            key,
            value,
            format!("Expected a whole number from 0 to {}", MAX_DECIMALS),
        )),
    }
}
