//! Segment intersection, distance and angle primitives.
//!
//! Angles follow the `atan2` convention: `0` points along the positive `x`
//! axis and increasing angles rotate toward the positive `y` axis (clockwise
//! on a screen where `y` grows downward).

use nalgebra::Matrix2;

use super::*;

/// Determinants smaller than this (in absolute value) are treated as parallel
/// segments by [`intersect`].
///
/// This is an absolute bound on `|ray.direction() × other.direction()|`,
/// so it scales with the product of both segments' lengths.
pub const PARALLEL_EPSILON: Float = 1e-6;

/// A finite line segment, going from `start` to `end`.
///
/// Used both for mirrors and for the legs of a trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn from_coords(x1: Float, y1: Float, x2: Float, y2: Float) -> Self {
        Self::new([x1, y1], [x2, y2])
    }

    /// `end - start`, not normalized.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Vector {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        distance(&self.start, &self.end)
    }

    /// The point at parameter `s`: `start` for `0.0`, `end` for `1.0`.
    #[inline]
    #[must_use]
    pub fn at(&self, s: Float) -> Point {
        self.start + self.direction() * s
    }

    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.start.iter().chain(self.end.iter()).all(|c| c.is_finite())
    }

    /// Whether both endpoints coincide. Such a segment has no angle and
    /// never intersects anything.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

impl From<[Float; 4]> for Segment {
    #[inline]
    fn from([x1, y1, x2, y2]: [Float; 4]) -> Self {
        Self::from_coords(x1, y1, x2, y2)
    }
}

#[inline]
#[must_use]
pub fn distance(p: &Point, q: &Point) -> Float {
    nalgebra::distance(p, q)
}

/// The direction of travel from `seg.start` to `seg.end`.
///
/// Meaningless for degenerate segments (it returns `0.0` for those),
/// which is why [`Scene`] rejects zero-length mirrors.
#[inline]
#[must_use]
pub fn segment_angle(seg: &Segment) -> Float {
    let d = seg.direction();
    d.y.atan2(d.x)
}

/// The unit vector pointing in the direction `angle`.
#[inline]
#[must_use]
pub fn unit_direction(angle: Float) -> Vector {
    let (sin, cos) = angle.sin_cos();
    Vector::new(cos, sin)
}

/// The direction of a ray travelling along `incoming` after bouncing off a
/// mirror whose own direction is `mirror_angle`.
///
/// The result isn't wrapped into `(-π, π]`.
#[inline]
#[must_use]
pub fn reflect_angle(incoming: Float, mirror_angle: Float) -> Float {
    2. * (mirror_angle - incoming) + incoming
}

/// Solves `ray.at(s) == other.at(t)` for `(s, t)`.
///
/// Returns `None` if the segments are (nearly) parallel, that is, if the
/// determinant of the system is below `eps` in absolute value, or if the
/// solution lies outside of either segment (`s` or `t` outside `[0, 1]`).
#[must_use]
pub fn intersection_params(ray: &Segment, other: &Segment, eps: Float) -> Option<(Float, Float)> {
    let a = Matrix2::from_columns(&[ray.direction(), -other.direction()]);

    if a.determinant().abs() < eps {
        return None;
    }

    let st = a.try_inverse()? * (other.start - ray.start);
    let (s, t) = (st.x, st.y);

    let unit = 0.0..=1.0;
    (unit.contains(&s) && unit.contains(&t)).then_some((s, t))
}

/// Like [`intersect`], with an explicit parallelism threshold.
#[inline]
#[must_use]
pub fn intersect_with(ray: &Segment, other: &Segment, eps: Float) -> Option<Point> {
    // evaluated on the ray's own parametric form, not `other`'s
    intersection_params(ray, other, eps).map(|(s, _)| ray.at(s))
}

/// The point where `ray` crosses `other`, if any.
///
/// Parallel, collinear and degenerate segments never intersect.
#[inline]
#[must_use]
pub fn intersect(ray: &Segment, other: &Segment) -> Option<Point> {
    intersect_with(ray, other, PARALLEL_EPSILON)
}
