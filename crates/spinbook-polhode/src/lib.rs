//! SpinBook Polhode
//!
//! Traces the polhode of a spinning book: the path of the inertia-normalised
//! angular velocity (ω1/I1, ω2/I2, ω3/I3) projected onto the unit sphere.
//!
//! The tracer only reads the model after each step (and forwards the
//! setters a user would call interactively); rendering code consumes the
//! resulting trace or line geometry and never touches the simulation.
//!
//! # Components
//!
//! - [`trace`]: Append-only record of unit-sphere points
//! - [`tracer`]: Simulation driver owning the clock and the model
//! - [`geometry`]: Line-strip geometry for renderers

pub mod trace;
pub mod tracer;
pub mod geometry;

// Re-exports
pub use trace::PolhodeTrace;
pub use tracer::PolhodeTracer;
pub use geometry::LineStrip;
