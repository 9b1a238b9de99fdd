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
//! The per-body integration step
//!
//! Bodies are advanced one after another, in collection order, against the
//! current state of the collection. A body that integrates later in the tick
//! therefore sees the positions its predecessors already moved to. Collision
//! response is applied to both bodies of a pair as soon as the overlap is
//! found.

use super::collision::resolve_collision;
use super::gravity::attraction;
use super::{IntegrationOrder, StepContext};
use crate::body::Body;

/// Counters gathered while stepping a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Bodies that were integrated
    pub bodies: usize,
    /// Overlapping pairs that went through collision resolution
    pub collisions: usize,
}

/// Integrate every body of the collection once
pub fn integrate_all(bodies: &mut [Body], ctx: &StepContext) -> StepStats {
    let mut stats = StepStats::default();
    for index in 0..bodies.len() {
        stats.collisions += integrate_body(bodies, index, ctx);
        stats.bodies += 1;
    }
    stats
}

/// Integrate the body at `index` against all other bodies of the collection
///
/// Returns the number of collisions resolved for this body.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn integrate_body(bodies: &mut [Body], index: usize, ctx: &StepContext) -> usize {
    assert!(index < bodies.len(), "Body index out of bounds");
    let dt = ctx.adjusted_dt;
    let mut collisions = 0;

    for other_index in 0..bodies.len() {
        if other_index == index {
            continue;
        }
        let (body, other) = pair_mut(bodies, index, other_index);

        let pull = attraction(body, other, ctx.gravity);
        body.accelerate(pull.ax * dt, pull.ay * dt);

        if ctx.order == IntegrationOrder::PerNeighbor {
            drift(body, dt);
        }

        if ctx.collision_enabled && pull.is_overlapping() {
            if let Some(contact) =
                resolve_collision(body, other, ctx.restitution, ctx.correction_threshold)
            {
                log::trace!(
                    "{} hit {}: impulse {:.3e}, overlap {:.3}",
                    body.id(),
                    other.id(),
                    contact.impulse,
                    contact.overlap
                );
                collisions += 1;
            }
        }
    }

    if ctx.order == IntegrationOrder::PerTick {
        drift(&mut bodies[index], dt);
    }

    collisions
}

fn drift(body: &mut Body, dt: f64) {
    let velocity = body.velocity();
    body.translate(velocity.dx() * dt, velocity.dy() * dt);
}

/// Borrow two distinct elements of a slice mutably
fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(first, second);
    if first < second {
        let (head, tail) = items.split_at_mut(second);
        (&mut head[first], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(first);
        (&mut tail[0], &mut head[second])
    }
}
