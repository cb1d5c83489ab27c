//! # SpinBook Core
//!
//! Torque-free rigid-body attitude simulation - core library
//!
//! A "spinning book" tossed about its intermediate principal axis tumbles.
//! This library integrates that motion: quaternion attitude kinematics
//! coupled with Euler's equations, advanced by a generic fixed-step RK4
//! state-vector simulator that any other dynamical model can reuse.
//!
//! ## Modules
//!
//! - [`math`]: Mathematical utilities (quaternion kinematics, S², RK4)
//! - [`simulation`]: Generic ODE state simulator and model configuration
//! - [`dynamics`]: Spinning book model and state-change observation

pub mod math;
pub mod simulation;
pub mod dynamics;

pub use dynamics::{Axis, ParameterUpdate, PrincipalMoments, SpinBook, StateObserver, TracingObserver};
pub use simulation::{ConfigError, ErrorKind, OdeSimulator, SimError, SpinBookConfig};
