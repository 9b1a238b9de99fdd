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
//! Head-on collision example
//!
//! Two orbs fly at each other along the x axis. The run is repeated for
//! every restitution level so the effect of elasticity on the rebound and
//! on the kinetic energy is visible side by side.
//!
//! # Running
//!
//! ```bash
//! cargo run --example head_on
//! ```

use orb_sim::body::{Body, Color, Position, Velocity};
use orb_sim::physics::{total_kinetic_energy, total_momentum};
use orb_sim::world::RESTITUTION_RANGE;
use orb_sim::{SimConfig, World};

const FRAMES: usize = 120;
const DT: f64 = 1.0 / 60.0;

fn run(level: i32) {
    let mut config = SimConfig::default();
    config.world.seed = Some(1);
    config.world.gravity_scale = -4;
    config.world.restitution = level;
    let mut world = World::with_config(&config);

    world.enqueue_with(|id| {
        Body::new(id, Position::new(0.0, 0.0), 30.0, Color::rgb(220, 60, 60), Default::default())
            .with_velocity(Velocity::new(60.0, 0.0))
    });
    world.enqueue_with(|id| {
        Body::new(id, Position::new(300.0, 0.0), 20.0, Color::rgb(60, 60, 220), Default::default())
            .with_velocity(Velocity::new(-60.0, 0.0))
    });
    world.flush_pending();

    let energy_before = total_kinetic_energy(world.bodies());
    let mut collisions = 0;
    for _ in 0..FRAMES {
        collisions += world.tick(DT).collisions;
    }
    let energy_after = total_kinetic_energy(world.bodies());
    let (px, _) = total_momentum(world.bodies());

    println!(
        "  elasticity {:.1}: {} contact(s), kinetic energy kept {:5.1}%, momentum {:.3e}",
        world.params().restitution_coefficient(),
        collisions,
        100.0 * energy_after / energy_before,
        px
    );
    for view in world.live_bodies() {
        let heading = match view.velocity().direction() {
            Some((ux, _)) if ux > 0.0 => "right",
            Some(_) => "left",
            None => "nowhere",
        };
        println!(
            "    {} heading {} at {:.2} px/s, {}",
            view.id(),
            heading,
            view.velocity().magnitude(),
            view.body().to_string().replace('\n', ", ")
        );
    }
}

fn main() {
    println!("=== Head-on Collision ===\n");

    for level in RESTITUTION_RANGE {
        run(level);
    }

    println!("\n=== Example Complete ===");
}
