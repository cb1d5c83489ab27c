//! Polhode trace
//!
//! Append-only record of points on the unit sphere, stamped with the
//! simulation time at which each was taken.

use nalgebra::Vector3;

/// Recorded polhode curve
#[derive(Debug, Clone, Default)]
pub struct PolhodeTrace {
    /// Time stamps [s]
    times: Vec<f64>,
    /// Unit-sphere points, one per time stamp
    points: Vec<Vector3<f64>>,
}

impl PolhodeTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point
    pub fn push(&mut self, time: f64, point: Vector3<f64>) {
        self.times.push(time);
        self.points.push(point);
    }

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Most recent point
    pub fn last(&self) -> Option<&Vector3<f64>> {
        self.points.last()
    }

    /// Iterate over (time, point) pairs in recording order
    pub fn iter(&self) -> impl Iterator<Item = (f64, &Vector3<f64>)> + '_ {
        self.times.iter().copied().zip(self.points.iter())
    }

    /// Time span covered by the trace
    pub fn duration(&self) -> f64 {
        match (self.times.first(), self.times.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_trace() {
        let trace = PolhodeTrace::new();

        assert!(trace.is_empty());
        assert_eq!(trace.len(), 0);
        assert!(trace.last().is_none());
        assert_eq!(trace.duration(), 0.0);
    }

    #[test]
    fn test_push_preserves_order() {
        let mut trace = PolhodeTrace::new();
        trace.push(0.1, Vector3::x());
        trace.push(0.2, Vector3::y());
        trace.push(0.35, Vector3::z());

        assert_eq!(trace.len(), 3);
        assert_eq!(trace.last(), Some(&Vector3::z()));
        assert!((trace.duration() - 0.25).abs() < 1e-12);

        let collected: Vec<_> = trace.iter().map(|(t, p)| (t, *p)).collect();
        assert_eq!(
            collected,
            vec![(0.1, Vector3::x()), (0.2, Vector3::y()), (0.35, Vector3::z())]
        );
    }
}
