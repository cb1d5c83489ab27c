//! Spinning book: torque-free rigid body
//!
//! Couples quaternion kinematics with Euler's equations for a body with
//! three principal moments of inertia:
//!
//! q̇ = 1/2 Λ(q)[0;ω]
//! I₁ω̇₁ = (I₂ - I₃) ω₂ω₃
//! I₂ω̇₂ = (I₃ - I₁) ω₁ω₃
//! I₃ω̇₃ = (I₁ - I₂) ω₁ω₂
//!
//! State layout: x = [q0, q1, q2, q3, ω1, ω2, ω3]

use std::fmt;

use nalgebra::{SVector, UnitQuaternion, Vector3, Vector4};

use crate::math::{
    normalize_quaternion, quaternion_derivative, quaternion_norm_squared, to_unit_quaternion,
};
use crate::simulation::{ConfigError, OdeSimulator, SimError, SpinBookConfig};

use super::{Axis, StateObserver};

/// Length of the spinning book state vector
pub const STATE_DIM: usize = 7;

pub const Q0: usize = 0;
pub const Q1: usize = 1;
pub const Q2: usize = 2;
pub const Q3: usize = 3;
pub const OMEGA1: usize = 4;
pub const OMEGA2: usize = 5;
pub const OMEGA3: usize = 6;

/// Spinning book state vector
pub type SpinBookState = SVector<f64, STATE_DIM>;

/// Principal moments of inertia [kg·m²]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalMoments {
    pub i1: f64,
    pub i2: f64,
    pub i3: f64,
}

impl PrincipalMoments {
    pub fn new(i1: f64, i2: f64, i3: f64) -> Self {
        Self { i1, i2, i3 }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::First => self.i1,
            Axis::Second => self.i2,
            Axis::Third => self.i3,
        }
    }

    fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::First => self.i1 = value,
            Axis::Second => self.i2 = value,
            Axis::Third => self.i3 = value,
        }
    }

    /// Torque-free angular acceleration from Euler's equations
    pub fn angular_acceleration(&self, omega: &Vector3<f64>) -> Vector3<f64> {
        let (u1, u2, u3) = (omega.x, omega.y, omega.z);
        Vector3::new(
            (self.i2 - self.i3) * u2 * u3 / self.i1,
            (self.i3 - self.i1) * u1 * u3 / self.i2,
            (self.i1 - self.i2) * u1 * u2 / self.i3,
        )
    }
}

impl Default for PrincipalMoments {
    fn default() -> Self {
        Self::new(1.0, 2.0, 3.0)
    }
}

impl From<[f64; 3]> for PrincipalMoments {
    fn from(m: [f64; 3]) -> Self {
        Self::new(m[0], m[1], m[2])
    }
}

/// Right-hand side of the spinning book ODE
///
/// Autonomous: `_t` is accepted for compatibility with the generic
/// simulator and otherwise ignored.
pub fn spin_book_rhs(moments: &PrincipalMoments, x: &SpinBookState, _t: f64) -> SpinBookState {
    let q = x.fixed_rows::<4>(Q0).into_owned();
    let omega = x.fixed_rows::<3>(OMEGA1).into_owned();

    let q_dot = quaternion_derivative(&q, &omega);
    let omega_dot = moments.angular_acceleration(&omega);

    let mut dx = SpinBookState::zeros();
    dx.fixed_rows_mut::<4>(Q0).copy_from(&q_dot);
    dx.fixed_rows_mut::<3>(OMEGA1).copy_from(&omega_dot);
    dx
}

/// Outcome of a moment-of-inertia write
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterUpdate {
    Accepted,
    /// Value was below the floor; the previous value is still in effect
    Rejected { value: f64, floor: f64 },
}

impl ParameterUpdate {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ParameterUpdate::Accepted)
    }
}

/// Torque-free rigid body integrated with RK4
pub struct SpinBook {
    sim: OdeSimulator<STATE_DIM, PrincipalMoments>,
    inertia_floor: f64,
    renormalize: bool,
    observer: Option<Box<dyn StateObserver + Send>>,
}

impl SpinBook {
    /// Create a spinning book with the default initial conditions
    pub fn new() -> Self {
        let config = SpinBookConfig::default();
        Self::build(&config)
    }

    /// Create a spinning book from a validated configuration
    pub fn from_config(config: &SpinBookConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &SpinBookConfig) -> Self {
        let [q0, q1, q2, q3] = config.initial_quaternion;
        let [u1, u2, u3] = config.initial_angular_velocity;
        let state = SpinBookState::from_column_slice(&[q0, q1, q2, q3, u1, u2, u3]);

        let mut sim = OdeSimulator::with_state(state, PrincipalMoments::from(config.moments_of_inertia));
        sim.set_rhs(spin_book_rhs);

        Self {
            sim,
            inertia_floor: config.inertia_floor,
            renormalize: config.renormalize,
            observer: None,
        }
    }

    /// Install an observer, replacing any previous one
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: StateObserver + Send + 'static,
    {
        self.set_observer(observer);
        self
    }

    pub fn set_observer<O>(&mut self, observer: O)
    where
        O: StateObserver + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Remove the observer
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Advance by one RK4 step of size `dt` starting at `time`
    ///
    /// With renormalisation enabled the quaternion is rescaled to unit norm
    /// after the step. A zero step is a no-op in both modes.
    pub fn step(&mut self, time: f64, dt: f64) -> Result<(), SimError> {
        self.sim.step(time, dt)?;

        if self.renormalize && dt != 0.0 {
            self.renormalize_quaternion();
        }

        Ok(())
    }

    fn renormalize_quaternion(&mut self) {
        let q = self.quaternion();
        match normalize_quaternion(&q) {
            Some(unit) => self
                .sim
                .state_mut()
                .fixed_rows_mut::<4>(Q0)
                .copy_from(&unit),
            None => tracing::warn!(?q, "quaternion is degenerate, skipping renormalisation"),
        }
    }

    /// Full state vector [q0, q1, q2, q3, ω1, ω2, ω3]
    pub fn state(&self) -> &SpinBookState {
        self.sim.state()
    }

    pub fn q0(&self) -> f64 {
        self.sim.state()[Q0]
    }

    pub fn q1(&self) -> f64 {
        self.sim.state()[Q1]
    }

    pub fn q2(&self) -> f64 {
        self.sim.state()[Q2]
    }

    pub fn q3(&self) -> f64 {
        self.sim.state()[Q3]
    }

    /// Raw orientation quaternion (q0, q1, q2, q3) as integrated
    pub fn quaternion(&self) -> Vector4<f64> {
        self.sim.state().fixed_rows::<4>(Q0).into_owned()
    }

    /// Orientation as a normalised unit quaternion
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        to_unit_quaternion(&self.quaternion())
    }

    /// Body-frame angular velocity (ω1, ω2, ω3) [rad/s]
    pub fn angular_velocity(&self) -> Vector3<f64> {
        self.sim.state().fixed_rows::<3>(OMEGA1).into_owned()
    }

    pub fn omega(&self, axis: Axis) -> f64 {
        self.sim.state()[OMEGA1 + axis.index()]
    }

    /// Overwrite one angular velocity component
    ///
    /// The write is visible in the state vector immediately.
    pub fn set_omega(&mut self, axis: Axis, value: f64) {
        self.sim.state_mut()[OMEGA1 + axis.index()] = value;
        if let Some(observer) = self.observer.as_mut() {
            observer.angular_velocity_changed(axis, value);
        }
    }

    pub fn omega1(&self) -> f64 {
        self.omega(Axis::First)
    }

    pub fn omega2(&self) -> f64 {
        self.omega(Axis::Second)
    }

    pub fn omega3(&self) -> f64 {
        self.omega(Axis::Third)
    }

    pub fn set_omega1(&mut self, value: f64) {
        self.set_omega(Axis::First, value);
    }

    pub fn set_omega2(&mut self, value: f64) {
        self.set_omega(Axis::Second, value);
    }

    pub fn set_omega3(&mut self, value: f64) {
        self.set_omega(Axis::Third, value);
    }

    pub fn moments(&self) -> PrincipalMoments {
        *self.sim.params()
    }

    pub fn inertia(&self, axis: Axis) -> f64 {
        self.sim.params().get(axis)
    }

    /// Set a principal moment of inertia
    ///
    /// Values below the floor (and NaN) leave the previous value in place.
    /// There is no upper bound. Callers that do not care about rejection may
    /// ignore the returned value.
    pub fn set_inertia(&mut self, axis: Axis, value: f64) -> ParameterUpdate {
        let floor = self.inertia_floor;
        if value >= floor {
            self.sim.params_mut().set(axis, value);
            if let Some(observer) = self.observer.as_mut() {
                observer.inertia_changed(axis, value);
            }
            ParameterUpdate::Accepted
        } else {
            tracing::warn!(%axis, value, floor, "moment of inertia below floor, keeping previous value");
            if let Some(observer) = self.observer.as_mut() {
                observer.inertia_rejected(axis, value, floor);
            }
            ParameterUpdate::Rejected { value, floor }
        }
    }

    pub fn ig1(&self) -> f64 {
        self.inertia(Axis::First)
    }

    pub fn ig2(&self) -> f64 {
        self.inertia(Axis::Second)
    }

    pub fn ig3(&self) -> f64 {
        self.inertia(Axis::Third)
    }

    pub fn set_ig1(&mut self, value: f64) -> ParameterUpdate {
        self.set_inertia(Axis::First, value)
    }

    pub fn set_ig2(&mut self, value: f64) -> ParameterUpdate {
        self.set_inertia(Axis::Second, value)
    }

    pub fn set_ig3(&mut self, value: f64) -> ParameterUpdate {
        self.set_inertia(Axis::Third, value)
    }

    pub fn inertia_floor(&self) -> f64 {
        self.inertia_floor
    }

    pub fn renormalize(&self) -> bool {
        self.renormalize
    }

    pub fn set_renormalize(&mut self, enabled: bool) {
        self.renormalize = enabled;
    }

    /// q0² + q1² + q2² + q3²
    pub fn quaternion_norm_squared(&self) -> f64 {
        quaternion_norm_squared(&self.quaternion())
    }

    /// Σ Iᵢωᵢ², twice the rotational kinetic energy
    pub fn twice_kinetic_energy(&self) -> f64 {
        let m = self.moments();
        let u = self.angular_velocity();
        m.i1 * u.x * u.x + m.i2 * u.y * u.y + m.i3 * u.z * u.z
    }

    /// Σ (Iᵢωᵢ)², squared magnitude of the body angular momentum
    pub fn angular_momentum_squared(&self) -> f64 {
        self.angular_momentum().norm_squared()
    }

    /// Body-frame angular momentum (I₁ω₁, I₂ω₂, I₃ω₃)
    pub fn angular_momentum(&self) -> Vector3<f64> {
        let m = self.moments();
        let u = self.angular_velocity();
        Vector3::new(m.i1 * u.x, m.i2 * u.y, m.i3 * u.z)
    }

    /// Inertia-normalised angular velocity (ω1/I1, ω2/I2, ω3/I3)
    ///
    /// Not projected onto the unit sphere; see the polhode tracer for that.
    pub fn polhode_vector(&self) -> Vector3<f64> {
        let m = self.moments();
        let u = self.angular_velocity();
        Vector3::new(u.x / m.i1, u.y / m.i2, u.z / m.i3)
    }
}

impl Default for SpinBook {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpinBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinBook")
            .field("state", self.sim.state())
            .field("moments", self.sim.params())
            .field("inertia_floor", &self.inertia_floor)
            .field("renormalize", &self.renormalize)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
