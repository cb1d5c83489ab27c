//! Dynamic models for SpinBook
//!
//! - Spinning book: torque-free rigid body with three principal moments
//! - State-change observation for externally driven writes

pub mod spin_book;
pub mod observer;

pub use spin_book::*;
pub use observer::*;
