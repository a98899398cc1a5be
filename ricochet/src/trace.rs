use core::iter::FusedIterator;

use super::{
    geometry::{distance, intersect_with, reflect_angle, segment_angle, unit_direction},
    *,
};

/// Where a ray starts, which way it goes, and how far it may travel in total.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceRequest {
    pub origin: Point,
    /// In radians, see [`geometry`] for the convention.
    pub angle: Float,
    /// The total length of the path, across all legs.
    pub length: Float,
}

impl TraceRequest {
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<Point>, angle: Float, length: Float) -> Self {
        Self {
            origin: origin.into(),
            angle,
            length,
        }
    }

    /// A request aiming from `origin` at `target`, e. g. the mouse cursor.
    ///
    /// Aiming at `origin` itself gives an angle of `0.0`.
    #[inline]
    #[must_use]
    pub fn toward(origin: impl Into<Point>, target: impl Into<Point>, length: Float) -> Self {
        let origin = origin.into();
        let angle = segment_angle(&Segment::new(origin, target));
        Self::new(origin, angle, length)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if !self.origin.iter().all(|c| c.is_finite()) {
            return Err(RequestError::NonFiniteOrigin);
        }

        if !self.angle.is_finite() {
            return Err(RequestError::NonFiniteAngle);
        }

        if self.length.is_nan() || self.length <= 0. {
            return Err(RequestError::NonPositiveLength(self.length));
        }

        if !self.length.is_finite() {
            return Err(RequestError::NonFiniteLength);
        }

        Ok(())
    }
}

/// A point of a [`Trajectory`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    pub point: Point,
    /// The index of the mirror the ray bounced off here, if any.
    pub mirror: Option<usize>,
    /// The length budget left once the ray reaches this point.
    pub remaining: Float,
}

/// Why a trace stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The last leg didn't hit any mirror, and was travelled in full.
    Unobstructed,
    /// The length budget ran out at a reflection.
    Exhausted,
    /// [`TraceConfig::max_reflections`] was reached. The legs
    /// add up to less than the requested length.
    ///
    /// Only a ray bouncing in place, between mirrors meeting exactly at its
    /// position, spends no budget and can't end any other way.
    ReflectionCap,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Hit {
    index: usize,
    point: Point,
    distance: Float,
}

/// The closest mirror `leg` crosses, other than `exclude`.
///
/// On ties, the mirror with the lowest index wins.
fn closest_hit(
    mirrors: &[Segment],
    leg: &Segment,
    exclude: Option<usize>,
    eps: Float,
) -> Option<Hit> {
    mirrors
        .iter()
        .enumerate()
        .filter(|&(index, _)| Some(index) != exclude)
        .filter_map(|(index, mirror)| {
            intersect_with(leg, mirror, eps).map(|point| Hit {
                index,
                point,
                distance: distance(&leg.start, &point),
            })
        })
        // `min_by` keeps the first of equal elements
        .min_by(|h1, h2| h1.distance.total_cmp(&h2.distance))
}

/// The path of a ray through a [`Scene`], computed lazily.
///
/// Yields every [`Waypoint`] after the origin, in order. Once it returns
/// `None`, [`Self::termination`] tells why.
#[derive(Clone, Debug)]
pub struct RayPath<'a> {
    scene: &'a Scene,
    config: TraceConfig,
    position: Point,
    angle: Float,
    remaining: Float,
    last_mirror: Option<usize>,
    reflections: usize,
    termination: Option<Termination>,
}

impl<'a> RayPath<'a> {
    /// Validates `request` and `config`, nothing is traced until iteration.
    pub fn new(
        scene: &'a Scene,
        request: &TraceRequest,
        config: &TraceConfig,
    ) -> Result<Self, TraceError> {
        request.validate()?;
        config.validate()?;

        Ok(Self {
            scene,
            config: *config,
            position: request.origin,
            angle: request.angle,
            remaining: request.length,
            last_mirror: None,
            reflections: 0,
            termination: None,
        })
    }

    /// The current direction of the ray.
    #[inline]
    #[must_use]
    pub fn angle(&self) -> Float {
        self.angle
    }

    #[inline]
    #[must_use]
    pub fn reflections(&self) -> usize {
        self.reflections
    }

    /// `None` until the path is over.
    #[inline]
    #[must_use]
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    fn finish(&mut self, termination: Termination) {
        log::debug!(
            "trace ended ({termination:?}) after {} reflection(s) at {:?}",
            self.reflections,
            self.position,
        );
        self.termination = Some(termination);
    }
}

impl Iterator for RayPath<'_> {
    type Item = Waypoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.termination.is_some() {
            return None;
        }

        if self.remaining <= 0. {
            self.finish(Termination::Exhausted);
            return None;
        }

        if self.reflections >= self.config.max_reflections {
            self.finish(Termination::ReflectionCap);
            return None;
        }

        let leg = Segment::new(
            self.position,
            self.position + unit_direction(self.angle) * self.remaining,
        );

        let Some(hit) = closest_hit(
            self.scene.mirrors(),
            &leg,
            self.last_mirror,
            self.config.parallel_epsilon,
        ) else {
            self.position = leg.end;
            self.remaining = 0.;
            self.finish(Termination::Unobstructed);

            return Some(Waypoint {
                point: leg.end,
                mirror: None,
                remaining: 0.,
            });
        };

        let incoming = segment_angle(&leg);
        let offset = self.config.reflection_offset;

        // a leg never runs backwards. When the mirror is within the offset the
        // ray stays put, and the distance to the mirror is charged instead
        let (travelled, charged) = if hit.distance > offset {
            let travelled = hit.distance - offset;
            (travelled, travelled)
        } else {
            (0., hit.distance)
        };

        self.position = leg.start + unit_direction(incoming) * travelled;
        self.angle = reflect_angle(incoming, segment_angle(&self.scene.mirrors()[hit.index]));
        self.remaining -= charged;
        self.last_mirror = Some(hit.index);
        self.reflections += 1;

        log::trace!(
            "bounce #{} off mirror {} at {:?}, {} left",
            self.reflections,
            hit.index,
            hit.point,
            self.remaining,
        );

        Some(Waypoint {
            point: self.position,
            mirror: Some(hit.index),
            remaining: self.remaining,
        })
    }
}

impl FusedIterator for RayPath<'_> {}

/// The full path of a ray: its origin, every reflection point, and its end.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    waypoints: Vec<Waypoint>,
    termination: Termination,
    final_angle: Float,
}

impl Trajectory {
    /// Always starts with the origin, and has at least two elements.
    #[inline]
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[inline]
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.waypoints.iter().map(|w| w.point)
    }

    /// The straight legs joining consecutive waypoints, as a renderer would draw them.
    #[inline]
    pub fn legs(&self) -> impl ExactSizeIterator<Item = Segment> + '_ {
        self.waypoints
            .windows(2)
            .map(|pair| Segment::new(pair[0].point, pair[1].point))
    }

    #[inline]
    #[must_use]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    #[inline]
    #[must_use]
    pub fn reflections(&self) -> usize {
        self.waypoints.iter().filter(|w| w.mirror.is_some()).count()
    }

    /// The sum of the lengths of all legs.
    #[inline]
    #[must_use]
    pub fn path_length(&self) -> Float {
        self.legs().map(|leg| leg.length()).sum()
    }

    /// The direction of the ray as it left the last waypoint.
    #[inline]
    #[must_use]
    pub fn final_angle(&self) -> Float {
        self.final_angle
    }
}

/// Traces `request` through `scene` with the default [`TraceConfig`].
#[inline]
pub fn trace(scene: &Scene, request: &TraceRequest) -> Result<Trajectory, TraceError> {
    trace_with(scene, request, &TraceConfig::default())
}

/// Traces `request` through `scene`.
///
/// Fails only if `request` or `config` are invalid, before tracing anything.
/// A ray that stops bouncing is not an error.
pub fn trace_with(
    scene: &Scene,
    request: &TraceRequest,
    config: &TraceConfig,
) -> Result<Trajectory, TraceError> {
    let mut path = RayPath::new(scene, request, config)?;

    let mut waypoints = vec![Waypoint {
        point: request.origin,
        mirror: None,
        remaining: request.length,
    }];
    waypoints.extend(path.by_ref());

    // the first call to `next` never ends the path early, unless the reflection
    // cap is zero, in which case the ray doesn't move
    if waypoints.len() == 1 {
        waypoints.push(waypoints[0]);
    }

    Ok(Trajectory {
        waypoints,
        termination: path.termination().unwrap_or(Termination::Unobstructed),
        final_angle: path.angle(),
    })
}
