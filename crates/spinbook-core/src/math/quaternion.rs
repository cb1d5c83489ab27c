//! Quaternion kinematics for attitude representation
//!
//! Quaternions are stored scalar-first as `Vector4 (q0, q1, q2, q3)` while
//! they live inside an integrated state vector, since integration does not
//! keep them exactly unit-norm. Conversion to `UnitQuaternion` happens only
//! at the boundary to consumers.
//!
//! - Quaternion derivative: q̇ = 1/2 Λ(q)[0;ω]
//! - Norm helpers and renormalisation

use nalgebra::{Matrix4, Quaternion, UnitQuaternion, Vector3, Vector4};

/// Below this norm a quaternion is considered degenerate and is not rescaled.
const MIN_NORM: f64 = 1e-12;

/// Compute the quaternion derivative given body-frame angular velocity
///
/// q̇ = 1/2 Λ(q)[0;ω], written out per component:
///
/// ```text
/// q̇0 = 0.5 * (-q1*ω1 - q2*ω2 - q3*ω3)
/// q̇1 = 0.5 * ( q0*ω1 - q3*ω2 + q2*ω3)
/// q̇2 = 0.5 * ( q3*ω1 + q0*ω2 - q1*ω3)
/// q̇3 = 0.5 * (-q2*ω1 + q1*ω2 + q0*ω3)
/// ```
///
/// # Arguments
/// * `q` - Orientation quaternion (q0, q1, q2, q3), not required to be unit
/// * `omega` - Angular velocity in body frame [rad/s]
pub fn quaternion_derivative(q: &Vector4<f64>, omega: &Vector3<f64>) -> Vector4<f64> {
    // Λ(q) is the left quaternion multiplication matrix, q ⊗ p = Λ(q) p
    //
    // Λ(q) = [q0 -q1 -q2 -q3]
    //        [q1  q0 -q3  q2]
    //        [q2  q3  q0 -q1]
    //        [q3 -q2  q1  q0]
    let (q0, q1, q2, q3) = (q[0], q[1], q[2], q[3]);

    let omega_quat = Vector4::new(0.0, omega.x, omega.y, omega.z);

    let lambda = Matrix4::new(
        q0, -q1, -q2, -q3,
        q1,  q0, -q3,  q2,
        q2,  q3,  q0, -q1,
        q3, -q2,  q1,  q0,
    );

    0.5 * lambda * omega_quat
}

/// Squared Euclidean norm q0² + q1² + q2² + q3²
pub fn quaternion_norm_squared(q: &Vector4<f64>) -> f64 {
    q.norm_squared()
}

/// Rescale a quaternion to unit norm
///
/// Returns `None` when the norm is too small or not finite, in which case
/// there is no meaningful direction to keep.
pub fn normalize_quaternion(q: &Vector4<f64>) -> Option<Vector4<f64>> {
    let norm = q.norm();
    if !norm.is_finite() || norm < MIN_NORM {
        None
    } else {
        Some(q / norm)
    }
}

/// Convert a scalar-first raw quaternion into a normalised `UnitQuaternion`
pub fn to_unit_quaternion(q: &Vector4<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::from_quaternion(Quaternion::new(q[0], q[1], q[2], q[3]))
}

/// Scalar-first components of a `UnitQuaternion`
pub fn from_unit_quaternion(q: &UnitQuaternion<f64>) -> Vector4<f64> {
    Vector4::new(q.w, q.i, q.j, q.k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_quaternion_derivative_zero_angular_velocity() {
        let q = Vector4::new(1.0, 0.0, 0.0, 0.0);
        let q_dot = quaternion_derivative(&q, &Vector3::zeros());

        assert_relative_eq!(q_dot.norm(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_quaternion_derivative_identity_spin() {
        // Identity orientation spinning about body y: only q̇2 is non-zero
        let q = Vector4::new(1.0, 0.0, 0.0, 0.0);
        let q_dot = quaternion_derivative(&q, &Vector3::new(0.0, 3.0, 0.0));

        assert_relative_eq!(q_dot, Vector4::new(0.0, 0.0, 1.5, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn test_quaternion_derivative_matches_component_form() {
        let q = Vector4::new(0.5, -0.1, 0.7, 0.2);
        let (u1, u2, u3) = (0.3, -1.2, 2.5);
        let q_dot = quaternion_derivative(&q, &Vector3::new(u1, u2, u3));

        let expected = Vector4::new(
            0.5 * (-q[1] * u1 - q[2] * u2 - q[3] * u3),
            0.5 * (q[0] * u1 - q[3] * u2 + q[2] * u3),
            0.5 * (q[3] * u1 + q[0] * u2 - q[1] * u3),
            0.5 * (-q[2] * u1 + q[1] * u2 + q[0] * u3),
        );
        assert_relative_eq!(q_dot, expected, epsilon = 1e-15);
    }

    #[test]
    fn test_quaternion_derivative_tangent_to_unit_sphere() {
        // d/dt |q|² = 2 q·q̇ = 0 for any ω
        let q = from_unit_quaternion(&UnitQuaternion::from_axis_angle(
            &Vector3::z_axis(),
            PI / 3.0,
        ));
        let q_dot = quaternion_derivative(&q, &Vector3::new(1.0, -2.0, 0.5));

        assert_relative_eq!(q.dot(&q_dot), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_normalize_quaternion() {
        let q = Vector4::new(2.0, 0.0, 0.0, 0.0);
        let n = normalize_quaternion(&q).unwrap();

        assert_relative_eq!(n, Vector4::new(1.0, 0.0, 0.0, 0.0), epsilon = 1e-15);
        assert_relative_eq!(quaternion_norm_squared(&n), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_normalize_degenerate_quaternion() {
        assert!(normalize_quaternion(&Vector4::zeros()).is_none());
        assert!(normalize_quaternion(&Vector4::new(f64::NAN, 0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_unit_quaternion_conversion() {
        let q = Vector4::new(0.5, 0.5, 0.5, 0.5);
        let unit = to_unit_quaternion(&q);

        assert_relative_eq!(from_unit_quaternion(&unit), q, epsilon = 1e-15);
    }
}
