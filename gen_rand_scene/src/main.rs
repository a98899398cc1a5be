use std::{error::Error, fs::File, path::PathBuf};

use clap::Parser;
use ricochet::*;
use ricochet_json::{serde_json, JsonSer, Simulation};
use ricochet_random::{
    rand::{rngs::StdRng, SeedableRng},
    *,
};

/// Writes a random simulation (an arena with mirrors inside, and a ray) to a JSON file.
#[derive(Parser, Debug)]
#[command(name = "gen_rand_scene")]
struct Args {
    /// Where to write the simulation
    path: PathBuf,

    /// Number of mirrors inside the arena
    #[arg(short, long, default_value_t = 12)]
    mirrors: usize,

    #[arg(long, default_value_t = 300.)]
    width: Float,

    #[arg(long, default_value_t = 200.)]
    height: Float,

    /// Seed for reproducible simulations
    #[arg(long)]
    seed: Option<u64>,
}

fn generate_random_simulation(args: &Args) -> Result<Simulation, SceneError> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let bounds = Bounds::new(args.width, args.height);

    Ok(Simulation {
        scene: random_scene(&mut rng, &bounds, args.mirrors)?,
        request: TraceRequest::random(&mut rng, &Bounds::new(args.width - 1., args.height - 1.)),
        config: TraceConfig::default(),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    let simulation = generate_random_simulation(&args)?;

    log::info!(
        "Writing {} mirror(s) to {}",
        simulation.scene.len(),
        args.path.display(),
    );

    serde_json::to_writer_pretty(File::create(&args.path)?, &simulation.to_json())?;

    Ok(())
}
