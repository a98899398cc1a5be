use core::slice;

use super::*;

/// An ordered, validated set of mirrors.
///
/// Every mirror is finite and has a non-zero length. The index of a mirror
/// is its position in the set; when two mirrors are hit at the same distance,
/// the one with the lowest index wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    mirrors: Vec<Segment>,
}

impl Scene {
    /// Builds a scene, rejecting the first zero-length or non-finite mirror.
    pub fn new(mirrors: impl IntoIterator<Item = impl Into<Segment>>) -> Result<Self, SceneError> {
        let mut scene = Self::empty();
        for mirror in mirrors {
            scene.push(mirror.into())?;
        }
        Ok(scene)
    }

    /// A scene without any mirror. Rays traced in it never bounce.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            mirrors: Vec::new(),
        }
    }

    /// The four borders of a `width` by `height` arena whose top left corner
    /// is the origin, as seen on screen.
    ///
    /// Borders run along the outermost rows and columns of pixels,
    /// i. e. `x = 0`, `x = width - 1`, `y = 0` and `y = height - 1`.
    pub fn arena(width: Float, height: Float) -> Result<Self, SceneError> {
        let (right, bottom) = (width - 1., height - 1.);

        Self::new([
            [0., 0., right, 0.],
            [right, 0., right, bottom],
            [0., bottom, right, bottom],
            [0., 0., 0., bottom],
        ])
    }

    /// Appends `mirror`, after validating it.
    pub fn with_mirror(mut self, mirror: impl Into<Segment>) -> Result<Self, SceneError> {
        self.push(mirror.into())?;
        Ok(self)
    }

    fn push(&mut self, mirror: Segment) -> Result<(), SceneError> {
        let index = self.mirrors.len();

        if !mirror.is_finite() {
            return Err(SceneError::NonFiniteMirror { index });
        }

        if mirror.is_degenerate() {
            return Err(SceneError::DegenerateMirror { index });
        }

        self.mirrors.push(mirror);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn mirrors(&self) -> &[Segment] {
        &self.mirrors
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.mirrors.get(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.mirrors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mirrors.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Segment> {
        self.mirrors.iter()
    }
}

impl AsRef<[Segment]> for Scene {
    #[inline]
    fn as_ref(&self) -> &[Segment] {
        self.mirrors()
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Segment;
    type IntoIter = slice::Iter<'a, Segment>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_mirror_order() {
        let a = Segment::from_coords(0., 0., 1., 0.);
        let b = Segment::from_coords(2., 2., 3., 5.);
        let scene = Scene::new([a, b]).unwrap();

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.mirrors(), &[a, b]);
        assert_eq!(scene.get(1), Some(&b));
        assert_eq!(scene.get(2), None);
    }

    #[test]
    fn rejects_zero_length_mirrors() {
        let result = Scene::new([[0., 0., 1., 1.], [3., 4., 3., 4.]]);
        assert_eq!(result, Err(SceneError::DegenerateMirror { index: 1 }));
    }

    #[test]
    fn rejects_non_finite_mirrors() {
        let result = Scene::new([[0., Float::NAN, 1., 1.]]);
        assert_eq!(result, Err(SceneError::NonFiniteMirror { index: 0 }));

        let result = Scene::arena(300., 200.).unwrap().with_mirror([0., 0., Float::INFINITY, 1.]);
        assert_eq!(result, Err(SceneError::NonFiniteMirror { index: 4 }));
    }

    #[test]
    fn arena_borders() {
        let scene = Scene::arena(300., 200.).unwrap();

        assert_eq!(
            scene.mirrors(),
            &[
                Segment::from_coords(0., 0., 299., 0.),
                Segment::from_coords(299., 0., 299., 199.),
                Segment::from_coords(0., 199., 299., 199.),
                Segment::from_coords(0., 0., 0., 199.),
            ]
        );
    }

    #[test]
    fn degenerate_arena_is_rejected() {
        assert_eq!(
            Scene::arena(1., 1.),
            Err(SceneError::DegenerateMirror { index: 0 })
        );
    }

    #[test]
    fn empty_scene() {
        assert!(Scene::empty().is_empty());
        assert_eq!(Scene::empty(), Scene::default());
        assert_eq!((&Scene::empty()).into_iter().count(), 0);
    }
}
