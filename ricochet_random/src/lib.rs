use core::iter;

use rand::distributions::Open01;
use ricochet::*;

pub use rand;

/// The rectangle random mirrors and rays are placed in, with its top left corner at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: Float,
    pub height: Float,
}

impl Bounds {
    #[inline]
    #[must_use]
    pub const fn new(width: Float, height: Float) -> Self {
        Self { width, height }
    }

    /// A uniformly distributed point inside `self`.
    pub fn random_point(&self, rng: &mut (impl rand::Rng + ?Sized)) -> Point {
        Point::new(
            rng.gen::<Float>() * self.width,
            rng.gen::<Float>() * self.height,
        )
    }
}

pub trait Random: Sized {
    /// Generate a randomized value, within `bounds`, using the provided `rng`
    ///
    /// This method must not fail. If creating a value is faillible, keep trying until success
    fn random(rng: &mut (impl rand::Rng + ?Sized), bounds: &Bounds) -> Self;
}

impl Random for Segment {
    /// Never degenerate.
    fn random(rng: &mut (impl rand::Rng + ?Sized), bounds: &Bounds) -> Self {
        loop {
            let segment = Segment::new(bounds.random_point(rng), bounds.random_point(rng));
            if !segment.is_degenerate() {
                break segment;
            }
        }
    }
}

impl Random for TraceRequest {
    /// Starts strictly inside `bounds`, and travels between one
    /// and a hundred times the size of `bounds`.
    fn random(rng: &mut (impl rand::Rng + ?Sized), bounds: &Bounds) -> Self {
        let size = bounds.width.max(bounds.height);

        let origin = Point::new(
            rng.sample::<Float, _>(Open01) * bounds.width,
            rng.sample::<Float, _>(Open01) * bounds.height,
        );

        TraceRequest::new(
            origin,
            rng.gen_range(-core::f64::consts::PI..core::f64::consts::PI),
            rng.gen_range(1.0..100.) * size,
        )
    }
}

/// An arena the size of `bounds` (see [`Scene::arena`]) with `num_mirrors` random mirrors inside.
pub fn random_scene(
    rng: &mut (impl rand::Rng + ?Sized),
    bounds: &Bounds,
    num_mirrors: usize,
) -> Result<Scene, SceneError> {
    let inner = Bounds::new(bounds.width - 1., bounds.height - 1.);

    iter::repeat_with(|| Segment::random(rng, &inner))
        .take(num_mirrors)
        .try_fold(Scene::arena(bounds.width, bounds.height)?, Scene::with_mirror)
}
