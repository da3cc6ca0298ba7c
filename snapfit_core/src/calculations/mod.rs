//! # Snap-Fit Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Inputs` - Input parameters (JSON-serializable)
//! - `*Result` / points - Calculation results (JSON-serializable)
//! - a pure function from the former to the latter
//!
//! ## Available Calculations
//!
//! - [`snap_fit`] - Cantilever snap-fit deflection, deflection force and mating force
//! - [`sweep`] - Parametric study of one input across a range

pub mod snap_fit;
pub mod sweep;

// Re-export commonly used types
pub use snap_fit::{
    calculate, compute_snap_fit, SnapFitInputs, SnapFitResult, DEFAULT_FACTOR_OF_SAFETY,
};
pub use sweep::{
    default_range, run_sweep, SweepPoint, SweepRange, SweepSeries, SweepSpec, SweepVariable,
};
