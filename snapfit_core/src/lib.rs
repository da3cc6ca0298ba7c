//! # snapfit_core - Snap-Fit Joint Calculation Engine
//!
//! `snapfit_core` computes the permissible deflection, deflection force and
//! mating force of a cantilever snap-fit arm, and sweeps any one input across
//! a range to show how those results move. All inputs and outputs are
//! JSON-serializable so frontends (the `snapfit` CLI, a web page, a script)
//! can drive it without sharing Rust types.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: The model is a pure function; form and sweep state are passed by value
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Garbage In, NaN Out**: Bad numbers propagate instead of failing
//!
//! ## Quick Start
//!
//! ```rust
//! use snapfit_core::calculations::{calculate, SnapFitInputs};
//!
//! let result = calculate(&SnapFitInputs::default());
//! assert!((result.deflection - 0.11167).abs() < 1e-5);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Snap-fit model and parametric sweep
//! - [`equations`] - Individual closed-form formulas
//! - [`materials`] - Built-in and custom materials, cross-section profiles
//! - [`form`] - Text-field coercion for form-driven frontends
//! - [`settings`] - Persisted user preferences
//! - [`units`] - Type-safe unit wrappers and display labels
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod form;
pub mod materials;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, compute_snap_fit, run_sweep, SnapFitInputs, SnapFitResult, SweepSpec};
pub use errors::{CalcError, CalcResult};
pub use file_io::FileLock;
pub use materials::{MaterialLibrary, MaterialProperties};
pub use settings::Settings;
