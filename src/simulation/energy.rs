//! Energy diagnostic: kinetic + potential energy of the system at an instant.

use crate::simulation::states::System;

/// Kinetic and potential energy sampled at a single instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySample {
    pub kinetic: f64,
    pub potential: f64,
}

impl EnergySample {
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Compute total kinetic and potential energy of `sys`.
///
/// KE = 1/2 sum_i m_i |v_i|^2. PE = -G sum_{i<j} m_i m_j / r_ij, each
/// unordered pair counted exactly once.
///
/// The potential term is deliberately *not* softened even though the force
/// kernel is: the reference regularizes accelerations only, so PE diverges
/// for a coincident pair while the force stays finite. Kept as-is for
/// behavioral parity (see DESIGN.md).
pub fn total_energy(sys: &System, g: f64) -> EnergySample {
    let mut kinetic = 0.0;
    for b in &sys.bodies {
        kinetic += 0.5 * b.m * b.v.norm_squared();
    }

    let mut potential = 0.0;
    let n = sys.bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let r = (sys.bodies[j].x - sys.bodies[i].x).norm();
            potential -= g * sys.bodies[i].m * sys.bodies[j].m / r;
        }
    }

    EnergySample { kinetic, potential }
}
