//! Ember math - vector types and ray-tracing primitives shared by the renderer.
//!
//! Vector arithmetic comes from `glam`; this crate adds the small set of
//! geometric types the path tracer is built on.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod onb;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;
