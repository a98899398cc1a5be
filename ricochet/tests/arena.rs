use core::f64::consts::FRAC_PI_4;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ricochet::*;

/// A 300x200 arena with a ledge sticking out of its left border.
fn arena() -> Scene {
    Scene::arena(300., 200.)
        .and_then(|scene| scene.with_mirror([0., 100., 100., 100.]))
        .unwrap()
}

#[rustfmt::skip]
const GOLDEN: [([Float; 2], Option<usize>, Float); 9] = [
    ([150.0, 100.0], None, 1000.0),
    ([249.2928932188135, 0.707106781186539], Some(0), 859.5786437626905),
    ([298.29289321881345, 49.70710678118649], Some(1), 790.282179206409),
    ([149.7071067811865, 198.29289321881345], Some(2), 580.1501448504446),
    ([52.12132034355963, 100.70710678118655], Some(4), 442.1430021755082),
    ([0.7071067811865461, 152.12132034355966], Some(3), 369.4323240568534),
    ([46.87867965644034, 198.29289321881345], Some(2), 304.13585950057177),
    ([244.46446609406726, 0.7071067811865532], Some(0), 24.707360588325855),
    ([261.9352083112937, 18.177848998413012], None, 0.0),
];

#[test]
fn arena_golden_path() {
    let request = TraceRequest::new([150., 100.], -FRAC_PI_4, 1000.);
    let path = trace(&arena(), &request).unwrap();

    assert_eq!(path.termination(), Termination::Unobstructed);
    assert_eq!(path.reflections(), 7);
    assert_eq!(path.waypoints().len(), GOLDEN.len());

    for (waypoint, (point, mirror, remaining)) in path.waypoints().iter().zip(GOLDEN) {
        assert_abs_diff_eq!(waypoint.point, Point::from(point), epsilon = 1e-6);
        assert_eq!(waypoint.mirror, mirror);
        assert_abs_diff_eq!(waypoint.remaining, remaining, epsilon = 1e-6);
    }

    assert_relative_eq!(path.path_length(), 1000., epsilon = 1e-3);
}

#[test]
fn arena_path_is_reproducible() {
    let scene = arena();
    let request = TraceRequest::new([150., 100.], -FRAC_PI_4, 1000.);

    let first = trace(&scene, &request).unwrap();
    for _ in 0..16 {
        assert_eq!(trace(&scene, &request).unwrap(), first);
    }
}

#[test]
fn legs_join_consecutive_waypoints() {
    let path = trace(&arena(), &TraceRequest::new([150., 100.], -FRAC_PI_4, 1000.)).unwrap();

    let points: Vec<_> = path.points().collect();
    let legs: Vec<_> = path.legs().collect();

    assert_eq!(legs.len(), points.len() - 1);
    for (leg, pair) in legs.iter().zip(points.windows(2)) {
        assert_eq!(leg.start, pair[0]);
        assert_eq!(leg.end, pair[1]);
    }
}

#[test]
fn ray_never_leaves_the_arena() {
    let scene = arena();

    for i in 0..64 {
        let angle = Float::from(i) * 0.1;
        let request = TraceRequest::new([150., 60.], angle, 3000.);
        let path = trace(&scene, &request).unwrap();

        assert_relative_eq!(path.path_length(), 3000., epsilon = 1e-3);

        for p in path.points() {
            assert!((0. ..=299.).contains(&p.x), "{p:?} left the arena (angle {angle})");
            assert!((0. ..=199.).contains(&p.y), "{p:?} left the arena (angle {angle})");
        }

        let mirrors: Vec<_> = path.waypoints().iter().filter_map(|w| w.mirror).collect();
        assert!(mirrors.windows(2).all(|pair| pair[0] != pair[1]));
    }
}

#[test]
fn shooting_at_the_cursor() {
    // aim straight down, at the ledge, from above it
    let request = TraceRequest::toward([50., 20.], [50., 150.], 200.);
    let path = trace(&arena(), &request).unwrap();

    let bounce = path.waypoints()[1];
    assert_eq!(bounce.mirror, Some(4));
    assert_abs_diff_eq!(bounce.point, Point::new(50., 99.), epsilon = 1e-9);
    // and straight back up
    assert_abs_diff_eq!(path.waypoints()[2].point, Point::new(50., 1.), epsilon = 1e-9);
    assert_eq!(path.waypoints()[2].mirror, Some(0));
}
