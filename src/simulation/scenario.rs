//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a [`ScenarioConfig`] (YAML-facing) and produces the runtime bundle
//! consumed by the engine:
//! - numerical parameters ([`Parameters`])
//! - system state ([`System`] with bodies at t = 0)
//! - active force set ([`AccelSet`])
//! - the chosen integrator
//!
//! Initial conditions come either from an explicit body list or from a
//! perturbed uniform lattice (bodies on a cubic grid, randomly nudged, with
//! standard-normal velocities). Either way the velocities are recentered to
//! the center-of-mass frame exactly once, here, before the engine ever sees
//! the system.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use crate::configuration::config::{BodyConfig, IntegratorConfig, LatticeConfig, ScenarioConfig};
use crate::errors::{Result, SimError};
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System, Vec3};

/// Fully-initialized runtime bundle for one simulation run.
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
    pub integrator: IntegratorConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            dt: p_cfg.dt,
            softening: p_cfg.softening,
            g: p_cfg.g,
            seed: p_cfg.seed,
            sample_energy: p_cfg.sample_energy,
        };

        let mut system = match (cfg.bodies.is_empty(), &cfg.lattice) {
            (false, Some(_)) => return Err(SimError::AmbiguousInitialConditions),
            (false, None) => System::new(bodies_from_config(&cfg.bodies)?),
            (true, Some(lattice)) => lattice_system(lattice, parameters.seed),
            (true, None) => return Err(SimError::NoBodies),
        };

        system.remove_mean_drift();

        let forces = AccelSet::new().with(NewtonianGravity {
            g: parameters.g,
            softening: parameters.softening,
        });

        Ok(Self {
            parameters,
            system,
            forces,
            integrator: cfg.integrator,
        })
    }
}

/// Map `BodyConfig` entries to runtime bodies, checking that every vector
/// actually has three components.
fn bodies_from_config(configs: &[BodyConfig]) -> Result<Vec<Body>> {
    let mut bodies = Vec::with_capacity(configs.len());
    for (index, bc) in configs.iter().enumerate() {
        if bc.x.len() != 3 {
            return Err(SimError::BadBodyDimension {
                index,
                field: "x",
                found: bc.x.len(),
            });
        }
        if bc.v.len() != 3 {
            return Err(SimError::BadBodyDimension {
                index,
                field: "v",
                found: bc.v.len(),
            });
        }
        bodies.push(Body {
            x: Vec3::new(bc.x[0], bc.x[1], bc.x[2]),
            v: Vec3::new(bc.v[0], bc.v[1], bc.v[2]),
            m: bc.m,
        });
    }
    Ok(bodies)
}

/// Generate lattice initial conditions: `n` equal-mass bodies on a uniform
/// cubic grid of side ceil(n^(1/3)), each nudged by a random perturbation
/// scaled so the largest component has unit magnitude, with unit-normal
/// velocities.
pub fn lattice_system(cfg: &LatticeConfig, seed: u64) -> System {
    let n = cfg.n;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mass = cfg.total_mass / n as f64;

    // grid side covering n points
    let side = (n as f64).cbrt().ceil() as usize;

    let mut bodies = Vec::with_capacity(n);
    'fill: for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                if bodies.len() == n {
                    break 'fill;
                }
                bodies.push(Body {
                    x: Vec3::new(x as f64, y as f64, z as f64),
                    v: Vec3::zeros(),
                    m: mass,
                });
            }
        }
    }

    // perturbations: normal + uniform(-1, 1) per component, rescaled by the
    // largest absolute component so no body moves more than one grid cell
    let mut nudges = Vec::with_capacity(n);
    let mut max_abs: f64 = 0.0;
    for _ in 0..n {
        let normal: Vec3 = Vec3::from_fn(|_, _| StandardNormal.sample(&mut rng));
        let uniform: Vec3 = Vec3::from_fn(|_, _| rng.gen_range(-1.0..1.0));
        let a = normal + uniform;
        max_abs = max_abs.max(a.amax());
        nudges.push(a);
    }
    if max_abs > 0.0 {
        for (body, a) in bodies.iter_mut().zip(&nudges) {
            body.x += a / max_abs;
        }
    }

    for body in &mut bodies {
        body.v = Vec3::from_fn(|_, _| StandardNormal.sample(&mut rng));
    }

    System::new(bodies)
}
