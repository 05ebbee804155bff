//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! run. A scenario consists of:
//!
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`IntegratorConfig`] – which time integrator advances the system
//! - either [`BodyConfig`] entries or a [`LatticeConfig`] for generated
//!   initial conditions
//! - an optional [`FieldConfig`] for the Gaussian random field generator
//! - [`ScenarioConfig`]   – top-level wrapper used to load a run from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! integrator: "leapfrog"    # or "euler"
//!
//! parameters:
//!   t_end: 10.0             # total simulation time
//!   dt: 0.01                # fixed step size
//!   softening: 0.1          # softening length
//!   g: 1.0                  # gravitational constant
//!   seed: 42                # deterministic seed for generated ICs
//!   sample_energy: true     # record (KE, PE) every step
//!
//! bodies:
//!   - x: [ -0.5, 0.0, 0.0 ]
//!     v: [  0.0, 1.0, 0.0 ]
//!     m: 1.0
//!   - x: [  0.5, 0.0, 0.0 ]
//!     v: [  0.0, -1.0, 0.0 ]
//!     m: 1.0
//!
//! # ...or, instead of an explicit body list:
//! # lattice:
//! #   n: 1000
//! #   total_mass: 100.0
//!
//! # field:
//! #   alpha: 3.0
//! #   size: 256
//! #   normalize: true
//! #   seed: 7
//! ```

use serde::Deserialize;

/// Which integrator method advances the system.
/// `integrator: "leapfrog"` or `integrator: "euler"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorConfig {
    // Kick-drift-kick leapfrog. Symplectic, bounded long-term energy error,
    // fixed step size.
    #[serde(rename = "leapfrog")]
    Leapfrog,

    // Naive explicit Euler. First order and not symplectic; kept as the
    // contrast integrator for energy-drift comparisons.
    #[serde(rename = "euler")]
    Euler,
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64,     // time end
    pub dt: f64,        // time step size
    pub softening: f64, // softening length - prevents singular forces at small separations
    pub g: f64,         // gravitational constant
    #[serde(default)]
    pub seed: u64, // deterministic seed to make generated ICs reproducible
    #[serde(default)]
    pub sample_energy: bool, // record the energy diagnostic every step
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position [x, y, z]
    pub v: Vec<f64>, // initial velocity [vx, vy, vz]
    pub m: f64,      // mass of the body
}

/// Generated initial conditions: bodies placed on a uniform cubic grid,
/// randomly perturbed, with standard-normal velocities recentered to the
/// center-of-mass frame.
#[derive(Deserialize, Debug, Clone)]
pub struct LatticeConfig {
    pub n: usize, // number of bodies
    #[serde(default = "default_total_mass")]
    pub total_mass: f64, // mass shared equally across the bodies
}

fn default_total_mass() -> f64 {
    100.0
}

/// Parameters for the spectral Gaussian random field generator
#[derive(Deserialize, Debug, Clone)]
pub struct FieldConfig {
    pub alpha: f64,      // power-law exponent of the spectrum
    pub size: usize,     // grid side length
    #[serde(default = "default_normalize")]
    pub normalize: bool, // rescale to zero mean, unit variance
    #[serde(default)]
    pub seed: u64,       // noise seed
}

fn default_normalize() -> bool {
    true
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub integrator: IntegratorConfig,     // time integrator used for advancing the system
    pub parameters: ParametersConfig,     // global numerical and physical parameters
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,          // explicit initial state, if given
    pub lattice: Option<LatticeConfig>,   // generated initial state, if given
    pub field: Option<FieldConfig>,       // optional Gaussian random field job
}
