//! Polhode tracer
//!
//! Drives a spinning book forward in time and records the direction of the
//! inertia-normalised angular velocity (ω1/I1, ω2/I2, ω3/I3) after every
//! step. The tracer owns the simulation clock; the model only ever sees the
//! time passed into `step`.

use nalgebra::Vector3;

use spinbook_core::math::normalize;
use spinbook_core::{SimError, SpinBook};

use crate::trace::PolhodeTrace;

/// Simulation driver that records the polhode
#[derive(Debug)]
pub struct PolhodeTracer {
    book: SpinBook,
    time: f64,
    trace: PolhodeTrace,
}

impl PolhodeTracer {
    pub fn new(book: SpinBook) -> Self {
        Self {
            book,
            time: 0.0,
            trace: PolhodeTrace::new(),
        }
    }

    /// Step the model by `dt`, advance the clock, and record the new point
    ///
    /// Returns the recorded unit-sphere point, or `None` when the
    /// angular velocity is zero (or not finite) and has no direction.
    pub fn advance(&mut self, dt: f64) -> Result<Option<Vector3<f64>>, SimError> {
        self.book.step(self.time, dt)?;
        self.time += dt;

        let point = normalize(&self.book.polhode_vector());
        match point {
            Some(p) => self.trace.push(self.time, p),
            None => tracing::debug!(time = self.time, "polhode vector has no direction, point skipped"),
        }

        Ok(point)
    }

    /// Advance `steps` times with a fixed `dt`
    pub fn run(&mut self, dt: f64, steps: usize) -> Result<&PolhodeTrace, SimError> {
        for _ in 0..steps {
            self.advance(dt)?;
        }
        Ok(&self.trace)
    }

    /// Current simulation time [s]
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn trace(&self) -> &PolhodeTrace {
        &self.trace
    }

    pub fn model(&self) -> &SpinBook {
        &self.book
    }

    /// Mutable model access for interactive edits between steps
    pub fn model_mut(&mut self) -> &mut SpinBook {
        &mut self.book
    }

    /// Consume the tracer, returning the model and the recorded trace
    pub fn into_parts(self) -> (SpinBook, PolhodeTrace) {
        (self.book, self.trace)
    }
}

impl Default for PolhodeTracer {
    fn default() -> Self {
        Self::new(SpinBook::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use spinbook_core::SpinBookConfig;

    #[test]
    fn test_advance_records_unit_point() {
        let mut tracer = PolhodeTracer::default();

        let point = tracer.advance(0.01).unwrap().unwrap();

        assert_relative_eq!(point.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(tracer.time(), 0.01, epsilon = 1e-15);
        assert_eq!(tracer.trace().len(), 1);
        assert_eq!(tracer.trace().times(), &[tracer.time()]);
    }

    #[test]
    fn test_initial_point_direction() {
        // Defaults are dominated by ω2/I2 = 1.5
        let mut tracer = PolhodeTracer::default();
        let point = tracer.advance(0.001).unwrap().unwrap();

        assert_relative_eq!(point.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_angular_velocity_is_skipped() {
        let config = SpinBookConfig {
            initial_angular_velocity: [0.0, 0.0, 0.0],
            ..Default::default()
        };
        let mut tracer = PolhodeTracer::new(SpinBook::from_config(&config).unwrap());

        assert_eq!(tracer.advance(0.01).unwrap(), None);
        assert!(tracer.trace().is_empty());
        assert_relative_eq!(tracer.time(), 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_error_leaves_clock_untouched() {
        let mut tracer = PolhodeTracer::default();

        assert!(matches!(
            tracer.advance(f64::NAN),
            Err(SimError::NonFiniteStep(_))
        ));
        assert_eq!(tracer.time(), 0.0);
        assert!(tracer.trace().is_empty());
    }

    #[test]
    fn test_inertia_edit_between_steps() {
        let mut tracer = PolhodeTracer::default();
        tracer.advance(0.01).unwrap();

        tracer.model_mut().set_ig2(6.0);
        let point = tracer.advance(0.01).unwrap().unwrap();

        // ω2/I2 dropped from 1.5 to 0.5, still dominant
        let expected = tracer.model().polhode_vector().normalize();
        assert_relative_eq!(point, expected, epsilon = 1e-15);
        assert_eq!(tracer.model().ig2(), 6.0);
    }

    #[test]
    fn test_run_and_into_parts() {
        let mut tracer = PolhodeTracer::default();
        let len = tracer.run(0.01, 25).unwrap().len();
        assert_eq!(len, 25);

        let (book, trace) = tracer.into_parts();
        assert_eq!(trace.len(), 25);
        assert_relative_eq!(book.quaternion_norm_squared(), 1.0, epsilon = 1e-6);
    }
}
