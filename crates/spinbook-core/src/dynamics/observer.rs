//! State-change observation
//!
//! Setters on the model report writes here instead of printing. Observers
//! only see values after they are applied and cannot influence them.

use std::fmt;

/// Principal body axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    First,
    Second,
    Third,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::First, Axis::Second, Axis::Third];

    /// Zero-based index of the axis
    pub fn index(self) -> usize {
        match self {
            Axis::First => 0,
            Axis::Second => 1,
            Axis::Third => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}

/// Hook invoked by the model on every externally driven change
pub trait StateObserver {
    /// A body angular velocity component was overwritten
    fn angular_velocity_changed(&mut self, _axis: Axis, _value: f64) {}

    /// A principal moment of inertia was accepted
    fn inertia_changed(&mut self, _axis: Axis, _value: f64) {}

    /// A principal moment of inertia was rejected for being below the floor
    fn inertia_rejected(&mut self, _axis: Axis, _value: f64, _floor: f64) {}
}

/// Observer that forwards every change to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StateObserver for TracingObserver {
    fn angular_velocity_changed(&mut self, axis: Axis, value: f64) {
        tracing::debug!(%axis, value, "angular velocity set");
    }

    fn inertia_changed(&mut self, axis: Axis, value: f64) {
        tracing::debug!(%axis, value, "moment of inertia set");
    }

    fn inertia_rejected(&mut self, axis: Axis, value: f64, floor: f64) {
        tracing::debug!(%axis, value, floor, "moment of inertia rejected");
    }
}
