//! # Error Types
//!
//! Structured error types for snapfit_core. The snap-fit model itself never
//! fails (bad numbers flow through as NaN/Infinity), so these errors cover the
//! edges around it: strict input checks, degenerate sweeps, material lookups,
//! and the material library file.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::errors::{CalcError, CalcResult};
//!
//! fn check_thickness(thickness_in: f64) -> CalcResult<()> {
//!     if thickness_in <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "thickness_in",
//!             thickness_in.to_string(),
//!             "Arm thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for snapfit_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and storage operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (only raised by strict validation)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material not found in the built-in table or the custom library
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Cross-section profile identifier not recognised
    #[error("Cross-section profile not found: {profile}")]
    ProfileNotFound { profile: String },

    /// Sweep range cannot be walked in a finite number of steps
    #[error("Invalid sweep over '{variable}': start={start}, end={end}, step={step} - {reason}")]
    InvalidSweep {
        variable: String,
        start: f64,
        end: f64,
        step: f64,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a ProfileNotFound error
    pub fn profile_not_found(profile: impl Into<String>) -> Self {
        CalcError::ProfileNotFound {
            profile: profile.into(),
        }
    }

    /// Create an InvalidSweep error
    pub fn invalid_sweep(
        variable: impl Into<String>,
        start: f64,
        end: f64,
        step: f64,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidSweep {
            variable: variable.into(),
            start,
            end,
            step,
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError from any displayable cause
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        CalcError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::ProfileNotFound { .. } => "PROFILE_NOT_FOUND",
            CalcError::InvalidSweep { .. } => "INVALID_SWEEP",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("thickness_in", "-0.1", "Arm thickness must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::material_not_found("PEEK").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(
            CalcError::invalid_sweep("h", 0.0, 1.0, 0.0, "zero step").error_code(),
            "INVALID_SWEEP"
        );
    }

    #[test]
    fn test_sweep_error_message() {
        let error = CalcError::invalid_sweep("L", 0.8, 1.2, 0.0, "Step must be nonzero");
        let message = error.to_string();
        assert!(message.contains("'L'"));
        assert!(message.contains("step=0"));
    }
}
