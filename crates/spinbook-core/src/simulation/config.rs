//! Simulation configuration
//!
//! Initial conditions and physical parameters for the spinning book.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed deviation of |q| from 1 for a configured initial orientation
pub const QUATERNION_NORM_TOLERANCE: f64 = 1e-6;

/// Default lower bound on any principal moment of inertia
pub const DEFAULT_INERTIA_FLOOR: f64 = 0.1;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("inertia floor must be finite and positive, got {0}")]
    InvalidInertiaFloor(f64),
    #[error("moment of inertia I{axis} = {value} is below the floor {floor} or not finite")]
    InvalidInertia { axis: usize, value: f64, floor: f64 },
    #[error("initial angular velocity must be finite, got {0:?}")]
    NonFiniteAngularVelocity([f64; 3]),
    #[error("initial quaternion must be finite, got {0:?}")]
    NonFiniteQuaternion([f64; 4]),
    #[error("initial quaternion must have unit norm, got |q| = {0}")]
    NonUnitQuaternion(f64),
}

/// SpinBook model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinBookConfig {
    /// Initial orientation (q0, q1, q2, q3), scalar first
    pub initial_quaternion: [f64; 4],
    /// Initial body-frame angular velocity (u1, u2, u3) [rad/s]
    pub initial_angular_velocity: [f64; 3],
    /// Principal moments of inertia (I1, I2, I3) [kg·m²]
    pub moments_of_inertia: [f64; 3],
    /// Setter writes below this value are rejected
    pub inertia_floor: f64,
    /// Rescale the quaternion to unit norm after every step
    pub renormalize: bool,
}

impl Default for SpinBookConfig {
    fn default() -> Self {
        // Near-axisymmetric spin about the intermediate axis: the small u1
        // seed grows into the characteristic tumbling wobble.
        Self {
            initial_quaternion: [1.0, 0.0, 0.0, 0.0],
            initial_angular_velocity: [0.001, 3.0, 0.0],
            moments_of_inertia: [1.0, 2.0, 3.0],
            inertia_floor: DEFAULT_INERTIA_FLOOR,
            renormalize: false,
        }
    }
}

impl SpinBookConfig {
    /// Check that every value describes a physically valid starting point
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floor = self.inertia_floor;
        if !floor.is_finite() || floor <= 0.0 {
            return Err(ConfigError::InvalidInertiaFloor(floor));
        }

        for (i, &value) in self.moments_of_inertia.iter().enumerate() {
            if !value.is_finite() || value < floor {
                return Err(ConfigError::InvalidInertia {
                    axis: i + 1,
                    value,
                    floor,
                });
            }
        }

        if self.initial_angular_velocity.iter().any(|u| !u.is_finite()) {
            return Err(ConfigError::NonFiniteAngularVelocity(
                self.initial_angular_velocity,
            ));
        }

        let q = &self.initial_quaternion;
        if q.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::NonFiniteQuaternion(*q));
        }
        let norm = q.iter().map(|c| c * c).sum::<f64>().sqrt();
        if (norm - 1.0).abs() > QUATERNION_NORM_TOLERANCE {
            return Err(ConfigError::NonUnitQuaternion(norm));
        }

        Ok(())
    }
}
