pub mod configuration;
pub mod errors;
pub mod recorder;
pub mod simulation;
pub mod spectral;

pub use simulation::states::{Body, System, Vec3};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::energy::{total_energy, EnergySample};
pub use simulation::integrator::{euler_step, leapfrog_step};
pub use simulation::engine::{RunResult, Simulation};
pub use simulation::scenario::{lattice_system, Scenario};
pub use simulation::params::Parameters;

pub use configuration::config::{
    BodyConfig, FieldConfig, IntegratorConfig, LatticeConfig, ParametersConfig, ScenarioConfig,
};

pub use spectral::grf::{fft_frequencies, gaussian_random_field};

pub use errors::{Result, SimError};
