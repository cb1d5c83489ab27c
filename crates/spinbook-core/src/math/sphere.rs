//! Unit sphere S² operations
//!
//! The polhode lives on S²: the inertia-normalised angular velocity is
//! projected onto the unit sphere before it is traced.

use nalgebra::Vector3;

/// Normalize a vector to unit length
///
/// Returns None if the vector is too small to normalize safely, or is not
/// finite.
pub fn normalize(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let norm = v.norm();
    if !norm.is_finite() || norm < 1e-10 {
        None
    } else {
        Some(v / norm)
    }
}

/// Check if a vector is a valid unit vector
pub fn is_unit_vector(v: &Vector3<f64>, tolerance: f64) -> bool {
    (v.norm() - 1.0).abs() < tolerance
}
