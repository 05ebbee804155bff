//! Fixed-step time integrators for the N-body system
//!
//! Provides the symplectic kick-drift-kick leapfrog scheme and a naive
//! explicit Euler scheme for contrast, both driven by an [`AccelSet`].
//! The leapfrog carries the acceleration buffer between steps so each
//! step costs one force evaluation.

use crate::simulation::forces::AccelSet;
use crate::simulation::states::{System, Vec3};

/// Advance the system by one kick-drift-kick leapfrog step.
///
/// `acc` must hold the accelerations at the current positions on entry
/// (the caller computes them once before the first step); on exit it holds
/// the accelerations at the new positions, ready for the next call.
///
/// The ordering is load-bearing: half-kick, drift, force re-evaluation,
/// half-kick. This is what makes the scheme time-symmetric and symplectic;
/// reordering forfeits the bounded long-term energy error.
pub fn leapfrog_step(sys: &mut System, forces: &AccelSet, acc: &mut [Vec3], dt: f64) {
    let half_dt = 0.5 * dt;

    // Kick: v_n+1/2 = v_n + (dt/2) * a_n
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    // a_n+1 from x_n+1, overwriting the carried buffer
    forces.accumulate_accels(&*sys, acc);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += half_dt * *a;
    }

    sys.t += dt;
}

/// Advance the system by one explicit (naive) Euler step.
///
/// First order and not symplectic: for a bound orbit its total energy
/// drifts roughly linearly with the step count, which is exactly why it
/// exists here as a reference point for the leapfrog.
pub fn euler_step(sys: &mut System, forces: &AccelSet, acc: &mut [Vec3], dt: f64) {
    // x_n+1 = x_n + dt * v_n, using the velocity at the old time level
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    // v_n+1 = v_n + dt * a_n, with a_n carried from the previous step
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += dt * *a;
    }

    // refresh the buffer for the next step
    forces.accumulate_accels(&*sys, acc);

    sys.t += dt;
}
