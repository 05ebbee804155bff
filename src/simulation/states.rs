//! Core state types for the N-body simulation.
//!
//! `Body` carries position, velocity and mass; `System` holds the list of
//! bodies and the current simulation time `t`. The body count and the
//! masses are fixed for the lifetime of a run; the integrator mutates
//! positions and velocities in place.

use nalgebra::Vector3;
pub type Vec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub x: Vec3, // position
    pub v: Vec3, // velocity
    pub m: f64,  // mass
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies
    pub t: f64,            // time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Shift every velocity into the center-of-mass frame by subtracting
    /// the mass-weighted mean velocity. Applied once by the scenario
    /// builder before integration, never per step.
    pub fn remove_mean_drift(&mut self) {
        let total_mass = self.total_mass();
        if total_mass == 0.0 {
            return;
        }
        let mut momentum = Vec3::zeros();
        for b in &self.bodies {
            momentum += b.m * b.v;
        }
        let v_cm = momentum / total_mass;
        for b in &mut self.bodies {
            b.v -= v_cm;
        }
    }

    /// True while every position component is finite. Zero softening with
    /// coincident bodies divides by zero and the non-finite values spread
    /// through subsequent steps; this only detects it, nothing recovers.
    pub fn positions_finite(&self) -> bool {
        self.bodies.iter().all(|b| b.x.iter().all(|c| c.is_finite()))
    }
}
