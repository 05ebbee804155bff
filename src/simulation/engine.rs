//! Simulation runner: owns the evolving state and drives the integrator.
//!
//! [`Simulation::new`] validates the scenario up front (fail fast, before
//! any physics runs), computes the initial accelerations once, then
//! [`Simulation::run`] advances the system for `ceil(t_end / dt)` fixed
//! steps, collecting a position snapshot per step and, when enabled, an
//! energy sample per step.

use log::{info, warn};

use crate::configuration::config::IntegratorConfig;
use crate::errors::{Result, SimError};
use crate::simulation::energy::{total_energy, EnergySample};
use crate::simulation::integrator::{euler_step, leapfrog_step};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::Vec3;

/// Everything a run emits: `steps + 1` snapshots (the initial state
/// included), matching timestamps, and the energy series when sampling
/// was enabled (empty otherwise).
pub struct RunResult {
    pub times: Vec<f64>,
    pub trajectory: Vec<Vec<Vec3>>,
    pub energies: Vec<EnergySample>,
}

pub struct Simulation {
    scenario: Scenario,
    acc: Vec<Vec3>, // carried acceleration buffer, one entry per body
}

impl Simulation {
    /// Validate the scenario and prepare the run.
    ///
    /// Rejects empty systems, non-positive `dt`/`t_end`, negative
    /// softening and non-positive masses before any computation starts.
    pub fn new(scenario: Scenario) -> Result<Self> {
        let p = &scenario.parameters;
        if scenario.system.is_empty() {
            return Err(SimError::NoBodies);
        }
        if p.dt <= 0.0 {
            return Err(SimError::NonPositiveTimeStep { dt: p.dt });
        }
        if p.t_end <= 0.0 {
            return Err(SimError::NonPositiveDuration { t_end: p.t_end });
        }
        if p.softening < 0.0 {
            return Err(SimError::NegativeSoftening {
                softening: p.softening,
            });
        }
        for (index, body) in scenario.system.bodies.iter().enumerate() {
            if body.m <= 0.0 {
                return Err(SimError::NonPositiveMass {
                    index,
                    mass: body.m,
                });
            }
        }

        let n = scenario.system.len();
        Ok(Self {
            scenario,
            acc: vec![Vec3::zeros(); n],
        })
    }

    /// Run the full simulation and hand back the collected series.
    pub fn run(mut self) -> RunResult {
        let steps = self.scenario.parameters.step_count();
        let dt = self.scenario.parameters.dt;
        let g = self.scenario.parameters.g;
        let sample_energy = self.scenario.parameters.sample_energy;
        let integrator = self.scenario.integrator;

        let Scenario {
            system,
            forces,
            ..
        } = &mut self.scenario;

        info!(
            "starting run: {} bodies, {} steps, dt = {}, integrator = {:?}",
            system.len(),
            steps,
            dt,
            integrator
        );

        // initial accelerations from the initial state, once before the loop
        forces.accumulate_accels(&*system, &mut self.acc);

        let mut times = Vec::with_capacity(steps + 1);
        let mut trajectory = Vec::with_capacity(steps + 1);
        let mut energies = Vec::with_capacity(if sample_energy { steps + 1 } else { 0 });

        times.push(system.t);
        trajectory.push(system.bodies.iter().map(|b| b.x).collect());
        if sample_energy {
            energies.push(total_energy(system, g));
        }

        let mut warned_non_finite = false;

        for _ in 0..steps {
            match integrator {
                IntegratorConfig::Leapfrog => leapfrog_step(system, forces, &mut self.acc, dt),
                IntegratorConfig::Euler => euler_step(system, forces, &mut self.acc, dt),
            }

            if !warned_non_finite && !system.positions_finite() {
                // No recovery: masking the blow-up would corrupt the physics.
                warn!("non-finite positions at t = {}; values will propagate", system.t);
                warned_non_finite = true;
            }

            times.push(system.t);
            trajectory.push(system.bodies.iter().map(|b| b.x).collect());
            if sample_energy {
                energies.push(total_energy(system, g));
            }
        }

        if let (Some(first), Some(last)) = (energies.first(), energies.last()) {
            info!(
                "run finished at t = {}: E_total {} -> {}",
                system.t,
                first.total(),
                last.total()
            );
        } else {
            info!("run finished at t = {}", system.t);
        }

        RunResult {
            times,
            trajectory,
            energies,
        }
    }
}
