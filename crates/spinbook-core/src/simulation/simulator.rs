//! Generic fixed-size ODE state simulator
//!
//! Owns a state vector of length `N`, a parameter block `P`, and a
//! registered right-hand-side function. The simulator has no idea what the
//! state means; models give it meaning by choosing `N`, `P` and the RHS.

use std::fmt;

use nalgebra::SVector;
use thiserror::Error;

use crate::math::rk4;

/// Right-hand-side function: `f(params, state, time) -> dstate/dt`
pub type RhsFn<const N: usize, P> =
    Box<dyn Fn(&P, &SVector<f64, N>, f64) -> SVector<f64, N> + Send>;

/// Broad category of a simulation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The simulator was used before it was fully set up
    Configuration,
    /// An input was outside the domain the integrator accepts
    Domain,
}

/// Simulation errors
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimError {
    #[error("no right-hand-side function registered")]
    RhsNotRegistered,
    #[error("step size must be finite, got {0}")]
    NonFiniteStep(f64),
    #[error("simulation time must be finite, got {0}")]
    NonFiniteTime(f64),
}

impl SimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::RhsNotRegistered => ErrorKind::Configuration,
            SimError::NonFiniteStep(_) | SimError::NonFiniteTime(_) => ErrorKind::Domain,
        }
    }
}

/// Fixed-step RK4 simulator over an `N`-dimensional real state
pub struct OdeSimulator<const N: usize, P = ()> {
    state: SVector<f64, N>,
    params: P,
    rhs: Option<RhsFn<N, P>>,
}

impl<const N: usize, P> OdeSimulator<N, P> {
    const NON_EMPTY: () = assert!(N >= 1, "ODE state vector must have at least one element");

    /// Create a simulator with a zero-initialised state
    pub fn new(params: P) -> Self {
        Self::with_state(SVector::zeros(), params)
    }

    /// Create a simulator starting from the given state
    pub fn with_state(state: SVector<f64, N>, params: P) -> Self {
        let () = Self::NON_EMPTY;
        Self {
            state,
            params,
            rhs: None,
        }
    }

    /// Register the right-hand-side function
    ///
    /// There is a single slot; registering again replaces the previous
    /// function.
    pub fn set_rhs<F>(&mut self, f: F)
    where
        F: Fn(&P, &SVector<f64, N>, f64) -> SVector<f64, N> + Send + 'static,
    {
        self.rhs = Some(Box::new(f));
    }

    /// Whether a right-hand-side function has been registered
    pub fn has_rhs(&self) -> bool {
        self.rhs.is_some()
    }

    /// Advance the state by one RK4 step of size `dt` starting at `current_time`
    ///
    /// `dt == 0` leaves the state untouched without evaluating the RHS.
    /// Negative `dt` integrates backward. Non-finite derivatives are not
    /// trapped and propagate into the state.
    pub fn step(&mut self, current_time: f64, dt: f64) -> Result<(), SimError> {
        if !dt.is_finite() {
            return Err(SimError::NonFiniteStep(dt));
        }
        if !current_time.is_finite() {
            return Err(SimError::NonFiniteTime(current_time));
        }
        let rhs = self.rhs.as_ref().ok_or(SimError::RhsNotRegistered)?;

        if dt == 0.0 {
            return Ok(());
        }

        let params = &self.params;
        self.state = rk4(&self.state, current_time, dt, |t, x| rhs(params, x, t));

        Ok(())
    }

    /// Current state vector
    pub fn state(&self) -> &SVector<f64, N> {
        &self.state
    }

    /// State component `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<f64> {
        self.state.get(index).copied()
    }

    /// Length of the state vector
    pub fn dim(&self) -> usize {
        N
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut P {
        &mut self.params
    }

    /// Mutable access for models that expose writable state slots
    pub(crate) fn state_mut(&mut self) -> &mut SVector<f64, N> {
        &mut self.state
    }
}

impl<const N: usize, P: Default> Default for OdeSimulator<N, P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<const N: usize, P: fmt::Debug> fmt::Debug for OdeSimulator<N, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdeSimulator")
            .field("state", &self.state)
            .field("params", &self.params)
            .field("rhs_registered", &self.rhs.is_some())
            .finish()
    }
}
