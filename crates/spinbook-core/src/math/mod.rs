//! Mathematical utilities for SpinBook
//!
//! Implements quaternion kinematics, unit sphere (S²) operations,
//! and the fixed-step RK4 integrator.

pub mod quaternion;
pub mod sphere;
pub mod integrator;

pub use quaternion::*;
pub use sphere::*;
pub use integrator::*;
