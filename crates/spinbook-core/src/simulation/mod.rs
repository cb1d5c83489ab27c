//! Simulation framework for SpinBook
//!
//! A generic fixed-length state vector advanced by a registered
//! right-hand-side function using classical RK4, plus the serde
//! configuration used to set up the rigid-body model.

pub mod simulator;
pub mod config;

pub use simulator::*;
pub use config::*;
