//! Traces a ray through a 2D set of segment mirrors.
//!
//! The ray travels in straight legs, reflecting off the closest mirror each
//! leg crosses, until its length budget is spent. The result is an ordered
//! list of [`Waypoint`]s, ready to be drawn as a polyline.

mod config;
mod error;
pub mod geometry;
mod scene;
mod trace;

pub use nalgebra;

pub use config::*;
pub use error::*;
pub use geometry::{Segment, PARALLEL_EPSILON};
pub use scene::*;
pub use trace::*;

pub type Float = f64;

/// A position in the plane. In screen space, `y` increases downward.
pub type Point = nalgebra::Point2<Float>;

pub type Vector = nalgebra::Vector2<Float>;
