// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Headless driver for the orb simulation
//!
//! Scatters random orbs over a virtual screen, runs the simulation thread
//! for a while and logs momentum, energy and center of mass once a second.
//!
//! ```bash
//! RUST_LOG=debug cargo run --release -- --bodies 12 --seconds 10 --gravity-scale 5
//! cargo run -- --config profile.toml --dump-config
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use orb_sim::physics::{center_of_mass, total_kinetic_energy, total_momentum};
use orb_sim::runner::{share, SimulationLoop};
use orb_sim::{SimConfig, World};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "orb-sim", about = "Headless 2D N-body orb simulation")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of orbs to scatter before starting
    #[arg(short, long, default_value_t = 8)]
    bodies: usize,

    /// Wall-clock run time in seconds
    #[arg(short, long, default_value_t = 5.0)]
    seconds: f64,

    /// Seed for orb placement, radii and colors
    #[arg(long)]
    seed: Option<u64>,

    /// Initial time-scale exponent
    #[arg(long, allow_hyphen_values = true)]
    time_scale: Option<i32>,

    /// Initial gravity-scale exponent
    #[arg(long, allow_hyphen_values = true)]
    gravity_scale: Option<i32>,

    /// Initial restitution level
    #[arg(long, allow_hyphen_values = true)]
    restitution: Option<i32>,

    /// Width of the virtual screen in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Height of the virtual screen in pixels
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn build_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };

    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    if let Some(level) = args.time_scale {
        config.world.time_scale = level;
    }
    if let Some(level) = args.gravity_scale {
        config.world.gravity_scale = level;
    }
    if let Some(level) = args.restitution {
        config.world.restitution = level;
    }

    config.validate()?;

    if !(args.seconds >= 0.0 && args.seconds.is_finite()) {
        anyhow::bail!("--seconds must be a non-negative number, got {}", args.seconds);
    }
    let finite_positive = |v: f64| v > 0.0 && v.is_finite();
    if !(finite_positive(args.width) && finite_positive(args.height)) {
        anyhow::bail!("screen size must be positive and finite, got {}x{}", args.width, args.height);
    }
    Ok(config)
}

fn report(world: &World, elapsed: Duration) {
    let bodies = world.bodies();
    let (px, py) = total_momentum(bodies);
    let ke = total_kinetic_energy(bodies);
    let params = world.params();

    log::info!(
        "t={:.1}s tick={} orbs={} speed={} gravity={} elasticity={:.1}",
        elapsed.as_secs_f64(),
        world.tick_count(),
        bodies.len(),
        params.time_scale(),
        params.gravity_scale(),
        params.restitution_coefficient()
    );
    log::info!("  momentum=({:.3e}, {:.3e}) kinetic energy={:.3e}", px, py, ke);
    if let Some((cx, cy)) = center_of_mass(bodies) {
        log::info!("  center of mass=({:.1}, {:.1})", cx, cy);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = build_config(&args)?;

    if args.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let mut world = World::try_with_config(&config)?;
    let mut placement = match config.world.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    for _ in 0..args.bodies {
        let x = placement.gen_range(0.0..args.width);
        let y = placement.gen_range(0.0..args.height);
        world.enqueue_random_body(x, y);
    }
    log::info!("Queued {} orbs on a {}x{} screen", args.bodies, args.width, args.height);

    let shared = share(world);
    let started = Instant::now();
    let mut last_report = started;
    let interval = Duration::from_millis(config.runner.tick_interval_ms);

    let sim = SimulationLoop::spawn_with_observer(shared.clone(), interval, move |world| {
        if last_report.elapsed() >= Duration::from_secs(1) {
            last_report = Instant::now();
            report(world, started.elapsed());
        }
    })?;

    std::thread::sleep(Duration::from_secs_f64(args.seconds));
    let frames = sim.join()?;

    let world = shared
        .read()
        .map_err(|_| anyhow::anyhow!("world lock poisoned"))?;
    report(&world, started.elapsed());
    log::info!("Ran {} frames", frames);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("orb-sim").chain(extra.iter().copied())).unwrap()
    }

    #[test]
    fn test_negative_levels_are_accepted() {
        let args = args(&["--time-scale", "-2", "--gravity-scale", "-3", "--restitution", "-1"]);
        assert_eq!(args.restitution, Some(-1));

        let config = build_config(&args).unwrap();
        assert_eq!(config.world.time_scale, -2);
        assert_eq!(config.world.gravity_scale, -3);
        assert_eq!(config.world.restitution, -1);
        assert_eq!(World::try_with_config(&config).unwrap().params().restitution(), 0);
    }

    #[test]
    fn test_infinite_screen_is_rejected() {
        assert!(build_config(&args(&["--width", "inf"])).is_err());
        assert!(build_config(&args(&["--height", "inf"])).is_err());
        assert!(build_config(&args(&["--width", "0"])).is_err());
        assert!(build_config(&args(&[])).is_ok());
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        assert!(build_config(&args(&["--seconds=-1"])).is_err());
    }
}
