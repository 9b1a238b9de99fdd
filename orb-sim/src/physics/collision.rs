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
//! Impulse-based collision response between two overlapping bodies
//!
//! # Algorithm
//!
//! ```text
//! n  = (p_b - p_a) / |p_b - p_a|
//! vn = (v_b - v_a) · n
//! j  = (1 + e) · vn / (1/m_a + 1/m_b)
//! v_a += (j / m_a) · n
//! v_b -= (j / m_b) · n
//! ```
//!
//! The impulse is only applied while the bodies approach each other
//! (`vn < 0`). Equal and opposite impulses keep total momentum unchanged for
//! every coefficient of restitution `e`; with `e = 1` kinetic energy along
//! the normal is preserved as well.
//!
//! After the impulse, bodies that still overlap by more than a threshold are
//! pushed apart along the normal, each by half of the overlap.
//!
//! Both the approach gate and the reduced-mass denominator are deliberate
//! corrections of the older `(1 + e) · vn / (m_a + m_b)` form, which applied
//! the impulse unconditionally and did not conserve momentum for unequal
//! masses.

use crate::body::Body;

/// What a resolved collision did to the pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal from the first body toward the second
    pub normal: (f64, f64),
    /// Signed impulse along the normal; zero when the bodies were separating
    pub impulse: f64,
    /// Penetration depth before correction
    pub overlap: f64,
    /// Whether the positional correction was applied
    pub corrected: bool,
}

/// Resolve a collision between `a` and `b`
///
/// Returns `None` without touching either body when their centers coincide,
/// since no contact normal exists in that case.
pub fn resolve_collision(
    a: &mut Body,
    b: &mut Body,
    restitution: f64,
    correction_threshold: f64,
) -> Option<Contact> {
    let (dx, dy) = a.position().displacement_to(&b.position());
    let distance = (dx * dx + dy * dy).sqrt();
    if distance == 0.0 {
        return None;
    }

    let nx = dx / distance;
    let ny = dy / distance;

    let va = a.velocity();
    let vb = b.velocity();
    let normal_velocity = (vb.dx() - va.dx()) * nx + (vb.dy() - va.dy()) * ny;

    let impulse = if normal_velocity < 0.0 {
        let inverse_mass_sum = 1.0 / a.mass() + 1.0 / b.mass();
        (1.0 + restitution) * normal_velocity / inverse_mass_sum
    } else {
        0.0
    };

    if impulse != 0.0 {
        let dva = impulse / a.mass();
        let dvb = impulse / b.mass();
        a.accelerate(dva * nx, dva * ny);
        b.accelerate(-dvb * nx, -dvb * ny);
    }

    let overlap = a.radius() + b.radius() - distance;
    let corrected = overlap > correction_threshold;
    if corrected {
        let half = overlap * 0.5;
        a.translate(-half * nx, -half * ny);
        b.translate(half * nx, half * ny);
    }

    Some(Contact {
        normal: (nx, ny),
        impulse,
        overlap,
        corrected,
    })
}
