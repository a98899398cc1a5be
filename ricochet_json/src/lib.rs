//! JSON representations of scenes, trace requests and trajectories.
//!
//! A simulation file looks like this:
//!
//! ```json
//! {
//!     "mirrors": [[0, 0, 299, 0], [299, 0, 299, 199]],
//!     "request": { "origin": [150, 100], "angle": -0.785, "length": 1000 },
//!     "config": { "reflection_offset": 1, "max_reflections": 4096 }
//! }
//! ```
//!
//! `config`, and every field in it, is optional.

use std::io;

use ricochet::*;
use serde_json::{json, Value};
use thiserror::Error;

pub use serde_json;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("invalid value for `{0}`")]
    Invalid(&'static str),

    #[error("expected a json array")]
    ExpectedArray,

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

/// This is essentially `try_into` then `try_map` but the latter is nightly-only
pub fn json_array_to_float_array<const N: usize>(json: &Value) -> Option<[Float; N]> {
    let array: &[Value; N] = json.as_array()?.as_slice().try_into().ok()?;

    let mut floats = [0.; N];
    for (float, value) in floats.iter_mut().zip(array) {
        *float = value.as_f64()?;
    }
    Some(floats)
}

pub fn map_json_array<C: FromIterator<T>, T>(
    json: &Value,
    map: impl FnMut(&Value) -> Result<T, JsonError>,
) -> Result<C, JsonError> {
    json.as_array()
        .ok_or(JsonError::ExpectedArray)?
        .iter()
        .map(map)
        .collect()
}

fn field<'a>(json: &'a Value, name: &'static str) -> Result<&'a Value, JsonError> {
    json.get(name).ok_or(JsonError::Missing(name))
}

fn float_field(json: &Value, name: &'static str) -> Result<Float, JsonError> {
    field(json, name)?.as_f64().ok_or(JsonError::Invalid(name))
}

fn point_field(json: &Value, name: &'static str) -> Result<Point, JsonError> {
    Point::from_json(field(json, name)?).map_err(|_| JsonError::Invalid(name))
}

pub trait JsonSer {
    /// Serialize `self` into a JSON value.
    fn to_json(&self) -> Value;
}

impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(T::to_json).collect())
    }
}

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for &T {
    fn to_json(&self) -> Value {
        (*self).to_json()
    }
}

impl JsonSer for Point {
    /// `[x, y]`
    fn to_json(&self) -> Value {
        json!([self.x, self.y])
    }
}

impl JsonSer for Segment {
    /// `[x1, y1, x2, y2]`
    fn to_json(&self) -> Value {
        json!([self.start.x, self.start.y, self.end.x, self.end.y])
    }
}

impl JsonSer for Scene {
    fn to_json(&self) -> Value {
        self.mirrors().to_json()
    }
}

impl JsonSer for TraceRequest {
    fn to_json(&self) -> Value {
        json!({
            "origin": self.origin.to_json(),
            "angle": self.angle,
            "length": self.length,
        })
    }
}

impl JsonSer for TraceConfig {
    fn to_json(&self) -> Value {
        json!({
            "reflection_offset": self.reflection_offset,
            "parallel_epsilon": self.parallel_epsilon,
            "max_reflections": self.max_reflections,
        })
    }
}

impl JsonSer for Termination {
    fn to_json(&self) -> Value {
        Value::from(match self {
            Termination::Unobstructed => "unobstructed",
            Termination::Exhausted => "exhausted",
            Termination::ReflectionCap => "reflection_cap",
        })
    }
}

impl JsonSer for Waypoint {
    fn to_json(&self) -> Value {
        json!({
            "point": self.point.to_json(),
            "mirror": self.mirror,
            "remaining": self.remaining,
        })
    }
}

impl JsonSer for Trajectory {
    fn to_json(&self) -> Value {
        json!({
            "termination": self.termination().to_json(),
            "reflections": self.reflections(),
            "length": self.path_length(),
            "waypoints": self.waypoints().to_json(),
        })
    }
}

pub trait JsonDes {
    /// Deserialize from a JSON value.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &Value) -> Result<Self, JsonError>
    where
        Self: Sized;
}

impl<T: JsonDes> JsonDes for Vec<T> {
    fn from_json(json: &Value) -> Result<Self, JsonError> {
        map_json_array(json, T::from_json)
    }
}

impl JsonDes for Point {
    fn from_json(json: &Value) -> Result<Self, JsonError> {
        json_array_to_float_array::<2>(json)
            .map(Point::from)
            .ok_or(JsonError::Invalid("point"))
    }
}

impl JsonDes for Segment {
    fn from_json(json: &Value) -> Result<Self, JsonError> {
        json_array_to_float_array::<4>(json)
            .map(Segment::from)
            .ok_or(JsonError::Invalid("mirror"))
    }
}

impl JsonDes for Scene {
    /// Mirrors are validated, see [`Scene::new`].
    fn from_json(json: &Value) -> Result<Self, JsonError> {
        let mirrors: Vec<Segment> = Vec::from_json(json)?;
        Ok(Scene::new(mirrors)?)
    }
}

impl JsonDes for TraceRequest {
    /// ```json
    /// {
    ///     "origin": [x, y],
    ///     "angle": 0.5, // radians, or "toward": [x, y] to aim at a point instead
    ///     "length": 100
    /// }
    /// ```
    fn from_json(json: &Value) -> Result<Self, JsonError> {
        let origin = point_field(json, "origin")?;
        let length = float_field(json, "length")?;

        let request = if json.get("toward").is_some() {
            TraceRequest::toward(origin, point_field(json, "toward")?, length)
        } else {
            TraceRequest::new(origin, float_field(json, "angle")?, length)
        };

        request.validate()?;
        Ok(request)
    }
}

impl JsonDes for TraceConfig {
    /// Missing fields keep their default value.
    fn from_json(json: &Value) -> Result<Self, JsonError> {
        if !json.is_object() {
            return Err(JsonError::Invalid("config"));
        }

        let mut config = TraceConfig::default();

        if json.get("reflection_offset").is_some() {
            config.reflection_offset = float_field(json, "reflection_offset")?;
        }

        if json.get("parallel_epsilon").is_some() {
            config.parallel_epsilon = float_field(json, "parallel_epsilon")?;
        }

        if let Some(cap) = json.get("max_reflections") {
            config.max_reflections = cap
                .as_u64()
                .and_then(|cap| usize::try_from(cap).ok())
                .ok_or(JsonError::Invalid("max_reflections"))?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Everything needed to run a trace.
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    pub scene: Scene,
    pub request: TraceRequest,
    pub config: TraceConfig,
}

impl Simulation {
    #[inline]
    pub fn run(&self) -> Result<Trajectory, TraceError> {
        trace_with(&self.scene, &self.request, &self.config)
    }
}

impl JsonSer for Simulation {
    fn to_json(&self) -> Value {
        serialize_simulation(&self.scene, &self.request, &self.config)
    }
}

impl JsonDes for Simulation {
    fn from_json(json: &Value) -> Result<Self, JsonError> {
        deserialize_simulation(json)
    }
}

pub fn serialize_simulation(scene: &Scene, request: &TraceRequest, config: &TraceConfig) -> Value {
    json!({
        "mirrors": scene.to_json(),
        "request": request.to_json(),
        "config": config.to_json(),
    })
}

pub fn deserialize_simulation(json: &Value) -> Result<Simulation, JsonError> {
    let config = match json.get("config") {
        Some(config) => TraceConfig::from_json(config)?,
        None => TraceConfig::default(),
    };

    Ok(Simulation {
        scene: Scene::from_json(field(json, "mirrors")?)?,
        request: TraceRequest::from_json(field(json, "request")?)?,
        config,
    })
}

pub fn read_simulation(reader: impl io::Read) -> Result<Simulation, JsonError> {
    deserialize_simulation(&serde_json::from_reader(reader)?)
}
