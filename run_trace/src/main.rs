use core::f64::consts::FRAC_PI_4;
use std::{error::Error, fs::File, io, path::PathBuf};

use clap::Parser;
use ricochet::*;
use ricochet_json::{serde_json, JsonSer, Simulation};

/// Traces a ray through a set of mirrors, and prints its path as JSON.
///
/// Without a simulation file, the ray is shot across a 300x200 arena
/// with a ledge sticking out of its left border.
#[derive(Parser, Debug)]
#[command(name = "run_trace")]
struct Args {
    /// Path to a simulation JSON file
    simulation: Option<PathBuf>,

    /// Where the ray starts
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    origin: Option<Point>,

    /// Initial direction, in radians
    #[arg(long, allow_negative_numbers = true, conflicts_with = "toward")]
    angle: Option<Float>,

    /// Aim at this point instead of giving an angle
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    toward: Option<Point>,

    /// Total length of the path
    #[arg(long, allow_negative_numbers = true)]
    length: Option<Float>,

    /// Distance reflection points are pulled back from mirrors
    #[arg(long)]
    offset: Option<Float>,

    /// Stop after this many reflections
    #[arg(long)]
    max_reflections: Option<usize>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

/// Parses `X,Y`.
fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;

    let coord = |c: &str| c.trim().parse::<Float>().map_err(|e| format!("{c:?}: {e}"));

    Ok(Point::new(coord(x)?, coord(y)?))
}

impl Args {
    /// Overrides the parts of `simulation` given on the command line.
    fn apply(&self, simulation: &mut Simulation) {
        let request = &mut simulation.request;

        if let Some(origin) = self.origin {
            request.origin = origin;
        }

        if let Some(length) = self.length {
            request.length = length;
        }

        if let Some(angle) = self.angle {
            request.angle = angle;
        }

        if let Some(target) = self.toward {
            *request = TraceRequest::toward(request.origin, target, request.length);
        }

        let config = &mut simulation.config;

        if let Some(offset) = self.offset {
            config.reflection_offset = offset;
        }

        if let Some(cap) = self.max_reflections {
            config.max_reflections = cap;
        }
    }
}

/// A 300x200 arena with a ledge, and a ray shot from its center, up and to the right.
fn default_simulation() -> Result<Simulation, SceneError> {
    Ok(Simulation {
        scene: Scene::arena(300., 200.)?.with_mirror([0., 100., 100., 100.])?,
        request: TraceRequest::new([150., 100.], -FRAC_PI_4, 1000.),
        config: TraceConfig::default(),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    let mut simulation = match &args.simulation {
        Some(path) => {
            log::info!("Loading simulation from {}", path.display());
            ricochet_json::read_simulation(File::open(path)?)?
        }
        None => default_simulation()?,
    };

    args.apply(&mut simulation);

    let path = simulation.run().inspect_err(|e| log::error!("Refusing to trace: {e}"))?;

    log::info!(
        "{} reflection(s), {:?}, length {}",
        path.reflections(),
        path.termination(),
        path.path_length(),
    );

    let json = path.to_json();
    let stdout = io::stdout().lock();

    if args.pretty {
        serde_json::to_writer_pretty(stdout, &json)?;
    } else {
        serde_json::to_writer(stdout, &json)?;
    }

    println!();

    Ok(())
}
