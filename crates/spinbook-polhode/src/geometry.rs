//! Renderer-agnostic line geometry
//!
//! Turns a polhode trace into a line strip that any renderer can upload as
//! a vertex buffer. Vertices are single precision since that is what
//! graphics APIs consume.

use nalgebra::Vector3;

use crate::trace::PolhodeTrace;

/// Connected polyline through a sequence of vertices
#[derive(Debug, Clone, PartialEq)]
pub struct LineStrip {
    vertices: Vec<[f32; 3]>,
}

impl LineStrip {
    /// Build a line strip through every point of the trace
    ///
    /// Returns `None` until the trace has at least two points to connect.
    pub fn from_trace(trace: &PolhodeTrace) -> Option<Self> {
        Self::from_points(trace.points(), 1.0)
    }

    /// Build a line strip through scaled points
    ///
    /// `scale` sizes the curve relative to the sphere it is drawn on, e.g.
    /// slightly above 1.0 to keep the line visible outside a unit sphere mesh.
    pub fn from_points(points: &[Vector3<f64>], scale: f64) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let vertices = points
            .iter()
            .map(|p| {
                let s = p * scale;
                [s.x as f32, s.y as f32, s.z as f32]
            })
            .collect();

        Some(Self { vertices })
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Number of line segments in the strip
    pub fn segment_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Segments as (start, end) vertex pairs, for renderers without strip support
    pub fn segments(&self) -> impl Iterator<Item = ([f32; 3], [f32; 3])> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_two_points() {
        let mut trace = PolhodeTrace::new();
        assert!(LineStrip::from_trace(&trace).is_none());

        trace.push(0.0, Vector3::x());
        assert!(LineStrip::from_trace(&trace).is_none());

        trace.push(0.1, Vector3::y());
        let strip = LineStrip::from_trace(&trace).unwrap();
        assert_eq!(strip.vertices(), &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(strip.segment_count(), 1);
    }

    #[test]
    fn test_scale_and_segments() {
        let points = [Vector3::x(), Vector3::y(), Vector3::z()];
        let strip = LineStrip::from_points(&points, 2.0).unwrap();

        let segments: Vec<_> = strip.segments().collect();
        assert_eq!(
            segments,
            vec![
                ([2.0, 0.0, 0.0], [0.0, 2.0, 0.0]),
                ([0.0, 2.0, 0.0], [0.0, 0.0, 2.0]),
            ]
        );
    }
}
