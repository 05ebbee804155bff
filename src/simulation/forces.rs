//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait and the direct all-pairs Newtonian
//! gravity kernel with softening.

use crate::simulation::states::{System, Vec3};

/// Collection of acceleration terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body.
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, sys: &System, out: &mut [Vec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = Vec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(sys, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on [`System`].
/// Implementations add their contribution into `out[i]` for each body.
pub trait Acceleration {
    fn acceleration(&self, sys: &System, out: &mut [Vec3]);
}

/// Newtonian gravity with softening (direct n^2 sum).
///
/// For every pair the squared separation gets `softening^2` added before
/// the inverse-cube scaling, so the pairwise coefficient stays finite for
/// coincident bodies whenever `softening > 0`. Self-pairs are excluded by
/// the loop structure. With `softening == 0` an exactly coincident pair
/// divides by zero; the non-finite result propagates on purpose rather
/// than being substituted.
pub struct NewtonianGravity {
    pub g: f64,         // gravitational constant
    pub softening: f64, // softening length
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &System, out: &mut [Vec3]) {
        let n = sys.bodies.len();
        if n == 0 {
            return;
        }

        let soft2 = self.softening * self.softening;

        // Loop over each unordered pair (i, j) with i < j and apply the
        // equal-and-opposite contributions at once: single O(n^2) pass,
        // Newton's third law holds by construction.
        for i in 0..n {
            let bi = &sys.bodies[i];
            let xi = bi.x;
            let mi = bi.m;

            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                // displacement from i to j: i is pulled along +r, j along -r
                let r = bj.x - xi;

                // softened squared distance d^2 = |r|^2 + softening^2
                let d2 = r.dot(&r) + soft2;

                // d^(-3/2) of the squared distance, i.e. 1 / |r_soft|^3
                let inv_r = d2.sqrt().recip();
                let inv_r3 = inv_r * inv_r * inv_r;

                let coef = self.g * inv_r3;

                // a_i +=  G * m_j * r / |r_soft|^3
                // a_j += -G * m_i * r / |r_soft|^3
                out[i] += coef * bj.m * r;
                out[j] -= coef * mi * r;
            }
        }
    }
}
