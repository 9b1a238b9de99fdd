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
//! Integration tests verifying momentum and energy behaviour of collisions

use orb_sim::body::{Body, Color, Position, Velocity};
use orb_sim::physics::{total_kinetic_energy, total_momentum};
use orb_sim::{BodyId, SimConfig, World};

/// World with negligible gravity so collisions dominate
fn collision_world(restitution_level: i32) -> World {
    let mut config = SimConfig::default();
    config.world.seed = Some(3);
    config.world.gravity_scale = -4;
    config.world.restitution = restitution_level;
    World::with_config(&config)
}

fn add_body(world: &mut World, x: f64, radius: f64, vx: f64) -> BodyId {
    world.enqueue_with(|id| {
        Body::new(id, Position::new(x, 0.0), radius, Color::default(), Default::default())
            .with_velocity(Velocity::new(vx, 0.0))
    })
}

fn relative_error(after: f64, before: f64) -> f64 {
    (after - before).abs() / before.abs()
}

#[test]
fn test_elastic_head_on_conserves_momentum() {
    let mut world = collision_world(5);
    add_body(&mut world, 0.0, 20.0, 12.0);
    add_body(&mut world, 39.0, 20.0, -4.0);
    world.flush_pending();

    let (before, _) = total_momentum(world.bodies());
    world.tick(0.001);
    let (after, after_y) = total_momentum(world.bodies());

    assert!(
        relative_error(after, before) < 1e-3,
        "Momentum not conserved: before = {}, after = {}",
        before,
        after
    );
    assert!(after_y.abs() < 1e-9 * before.abs());
}

#[test]
fn test_elastic_equal_masses_exchange_velocities() {
    let mut world = collision_world(5);
    let a = add_body(&mut world, 0.0, 20.0, 12.0);
    let b = add_body(&mut world, 39.0, 20.0, -4.0);
    world.flush_pending();

    let energy_before = total_kinetic_energy(world.bodies());
    world.tick(0.001);
    let energy_after = total_kinetic_energy(world.bodies());

    let va = world.body(a).unwrap().velocity().dx();
    let vb = world.body(b).unwrap().velocity().dx();
    assert!((va + 4.0).abs() < 1e-3, "unexpected velocity {}", va);
    assert!((vb - 12.0).abs() < 1e-3, "unexpected velocity {}", vb);
    assert!(relative_error(energy_after, energy_before) < 1e-3);
}

#[test]
fn test_unequal_masses_conserve_momentum() {
    let mut world = collision_world(5);
    add_body(&mut world, 0.0, 30.0, 6.0);
    add_body(&mut world, 44.0, 15.0, -9.0);
    world.flush_pending();

    let (before, _) = total_momentum(world.bodies());
    world.tick(0.001);
    let (after, _) = total_momentum(world.bodies());

    assert!(relative_error(after, before) < 1e-3);
}

#[test]
fn test_inelastic_collision_loses_energy_but_keeps_momentum() {
    let mut world = collision_world(0);
    add_body(&mut world, 0.0, 20.0, 12.0);
    add_body(&mut world, 39.0, 20.0, -4.0);
    world.flush_pending();

    let (p_before, _) = total_momentum(world.bodies());
    let e_before = total_kinetic_energy(world.bodies());
    world.tick(0.001);
    let (p_after, _) = total_momentum(world.bodies());
    let e_after = total_kinetic_energy(world.bodies());

    assert!(relative_error(p_after, p_before) < 1e-3);
    assert!(e_after < e_before);

    // Equal masses with e = 0 end up moving together
    let bodies = world.bodies();
    let va = bodies[0].velocity().dx();
    let vb = bodies[1].velocity().dx();
    assert!((va - vb).abs() < 1e-3);
    assert!((va - 4.0).abs() < 1e-3);
}

#[test]
fn test_fixed_restitution_profile_ignores_level() {
    let mut config = SimConfig::default();
    config.world.seed = Some(3);
    config.world.gravity_scale = -4;
    config.world.restitution = 0;
    config.physics.fixed_restitution = Some(1.0);
    let mut world = World::with_config(&config);

    let a = add_body(&mut world, 0.0, 20.0, 12.0);
    add_body(&mut world, 39.0, 20.0, -4.0);
    world.tick(0.001);

    let va = world.body(a).unwrap().velocity().dx();
    assert!((va + 4.0).abs() < 1e-3);
}
