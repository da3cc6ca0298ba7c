//! # Snap-Fit Equations
//!
//! Fundamental formulas used by the snap-fit calculation. The single-point
//! calculation and the parametric sweep both go through these.
//!
//! ## Modules
//!
//! - [`section`] - Cross-section modulus (Z)
//! - [`snap_fit`] - Deflection, deflection force, mating force
//!
//! ## Sign Conventions
//!
//! - **Deflection**: Positive in the direction the mating part pushes the arm
//! - **Lead angle**: Measured from the insertion direction, in degrees
//! - **Forces**: Positive magnitudes; a negative W means the lead angle and
//!   friction pull the parts together
//!
//! ## References
//!
//! - Bayer MaterialScience, "Snap-Fit Joints for Plastics - A Design Guide"
//! - BASF, "Snap-Fit Design Manual"

pub mod section;
pub mod snap_fit;

pub use section::rectangular_section_modulus;

pub use snap_fit::{deflection_force, lead_angle_radians, mating_force, permissible_deflection};
