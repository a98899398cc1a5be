use super::*;

/// Tunables of the tracer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceConfig {
    /// How far a reflection point is pulled back along the incoming leg,
    /// so the next leg doesn't start on the mirror it just left.
    ///
    /// Clamped to the distance to the mirror. The budget is still charged
    /// that distance, so a ray stuck between close mirrors runs out of length.
    pub reflection_offset: Float,
    /// See [`PARALLEL_EPSILON`].
    pub parallel_epsilon: Float,
    /// Stop after this many reflections, even if some length budget remains.
    pub max_reflections: usize,
}

impl TraceConfig {
    pub const DEFAULT_REFLECTION_OFFSET: Float = 1.;
    pub const DEFAULT_MAX_REFLECTIONS: usize = 4096;

    #[inline]
    #[must_use]
    pub fn with_reflection_offset(mut self, offset: Float) -> Self {
        self.reflection_offset = offset;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_parallel_epsilon(mut self, eps: Float) -> Self {
        self.parallel_epsilon = eps;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_reflections(mut self, cap: usize) -> Self {
        self.max_reflections = cap;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let offset = self.reflection_offset;
        if !offset.is_finite() || offset < 0. {
            return Err(ConfigError::InvalidOffset(offset));
        }

        let eps = self.parallel_epsilon;
        if !eps.is_finite() || eps <= 0. {
            return Err(ConfigError::InvalidEpsilon(eps));
        }

        Ok(())
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            reflection_offset: Self::DEFAULT_REFLECTION_OFFSET,
            parallel_epsilon: PARALLEL_EPSILON,
            max_reflections: Self::DEFAULT_MAX_REFLECTIONS,
        }
    }
}
