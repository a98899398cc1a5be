use thiserror::Error;

use super::Float;

/// A mirror that can't take part in a trace.
#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum SceneError {
    #[error("mirror {index} has zero length")]
    DegenerateMirror { index: usize },

    #[error("mirror {index} has a non-finite coordinate")]
    NonFiniteMirror { index: usize },
}

/// A trace request rejected before any tracing work begins.
#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum RequestError {
    #[error("trace length must be positive, got {0}")]
    NonPositiveLength(Float),

    #[error("trace length must be finite")]
    NonFiniteLength,

    #[error("ray origin must be finite")]
    NonFiniteOrigin,

    #[error("ray angle must be finite")]
    NonFiniteAngle,
}

#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    #[error("reflection offset must be finite and non-negative, got {0}")]
    InvalidOffset(Float),

    #[error("parallel epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(Float),
}

#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum TraceError {
    #[error("invalid request: {0}")]
    Request(#[from] RequestError),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}
