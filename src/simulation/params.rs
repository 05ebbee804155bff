//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size and end time,
//! - softening length and gravitational constant (`softening`, `g`),
//! - random seed for generated initial conditions,
//! - whether to sample the energy diagnostic each step

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64,         // time end
    pub dt: f64,            // step size
    pub softening: f64,     // softening length, added in quadrature to pair separations
    pub g: f64,             // gravitational constant
    pub seed: u64,          // deterministic seed for generated initial conditions
    pub sample_energy: bool, // record (KE, PE) every step
}

impl Parameters {
    /// Number of fixed steps covering `t_end`: ceil(t_end / dt).
    pub fn step_count(&self) -> usize {
        (self.t_end / self.dt).ceil() as usize
    }
}
