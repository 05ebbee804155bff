use nbsim::configuration::config::{
    IntegratorConfig, LatticeConfig, ParametersConfig, ScenarioConfig,
};
use nbsim::simulation::energy::total_energy;
use nbsim::simulation::engine::Simulation;
use nbsim::simulation::forces::{AccelSet, NewtonianGravity};
use nbsim::simulation::integrator::{euler_step, leapfrog_step};
use nbsim::simulation::params::Parameters;
use nbsim::simulation::scenario::Scenario;
use nbsim::simulation::states::{Body, System, Vec3};
use nbsim::spectral::grf::{fft_frequencies, gaussian_random_field};
use nbsim::SimError;

/// Build a simple 2-body system separated along the x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    let b1 = Body {
        x: [-dist / 2.0, 0.0, 0.0].into(),
        v: [0.0, 0.0, 0.0].into(),
        m: m1,
    };
    let b2 = Body {
        x: [dist / 2.0, 0.0, 0.0].into(),
        v: [0.0, 0.0, 0.0].into(),
        m: m2,
    };
    System::new(vec![b1, b2])
}

/// Two equal masses on a circular orbit about their barycenter:
/// v = sqrt(G m / (2 d)) perpendicular to the separation
pub fn circular_orbit_system(d: f64, m: f64, g: f64) -> System {
    let v = (g * m / (2.0 * d)).sqrt();
    let b1 = Body {
        x: [-d / 2.0, 0.0, 0.0].into(),
        v: [0.0, -v, 0.0].into(),
        m,
    };
    let b2 = Body {
        x: [d / 2.0, 0.0, 0.0].into(),
        v: [0.0, v, 0.0].into(),
        m,
    };
    System::new(vec![b1, b2])
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        t_end: 1.0,
        dt: 0.001,
        softening: 0.0,
        g: 0.1,
        seed: 42,
        sample_energy: false,
    }
}

/// Build a gravity term + AccelSet
pub fn gravity_set(g: f64, softening: f64) -> AccelSet {
    AccelSet::new().with(NewtonianGravity { g, softening })
}

fn accels(sys: &System, forces: &AccelSet) -> Vec<Vec3> {
    let mut acc = vec![Vec3::zeros(); sys.len()];
    forces.accumulate_accels(sys, &mut acc);
    acc
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(1.0, 2.0, 3.0);
    let forces = gravity_set(0.1, 0.0);

    let acc = accels(&sys, &forces);
    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;

    assert!(net.norm() < 1e-12, "Net momentum change not zero: {:?}", net);
}

#[test]
fn gravity_zero_self_force() {
    for softening in [0.0, 0.1, 10.0] {
        let sys = System::new(vec![Body {
            x: [3.0, -1.0, 2.0].into(),
            v: [0.0, 0.0, 0.0].into(),
            m: 5.0,
        }]);
        let forces = gravity_set(1.0, softening);

        let acc = accels(&sys, &forces);
        assert_eq!(acc[0], Vec3::zeros(), "Single body must feel no force");
    }
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set(0.1, 0.0);

    let acc = accels(&sys, &forces);
    let dx = sys.bodies[1].x - sys.bodies[0].x;

    assert!(dx.norm() > 0.0);
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
}

#[test]
fn gravity_inverse_square_law() {
    let sys_r = two_body_system(1.0, 1.0, 1.0);
    let sys_2r = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set(0.1, 0.0);

    let acc_r = accels(&sys_r, &forces);
    let acc_2r = accels(&sys_2r, &forces);

    let ratio = acc_r[0].norm() / acc_2r[0].norm();
    assert!((ratio - 4.0).abs() < 1e-3, "Expected ~4x, got {}", ratio);
}

#[test]
fn gravity_softening_monotonicity() {
    // near-coincident pair: larger softening must strictly weaken the pull
    let sys = two_body_system(1e-6, 1.0, 1.0);

    let mut previous = f64::INFINITY;
    for softening in [0.05, 0.1, 0.2, 0.4] {
        let forces = gravity_set(1.0, softening);
        let acc = accels(&sys, &forces);
        let magnitude = acc[0].norm();

        assert!(magnitude.is_finite());
        assert!(
            magnitude < previous,
            "softening {} did not reduce acceleration ({} >= {})",
            softening,
            magnitude,
            previous
        );
        previous = magnitude;
    }
}

// ==================================================================================
// Energy tests
// ==================================================================================

#[test]
fn energy_two_body_closed_form() {
    let mut sys = two_body_system(2.0, 3.0, 5.0);
    sys.bodies[0].v = [1.0, 0.0, 0.0].into();
    sys.bodies[1].v = [0.0, 2.0, 0.0].into();

    let sample = total_energy(&sys, 0.1);

    // KE = 0.5*3*1 + 0.5*5*4, PE = -0.1 * 3 * 5 / 2
    assert!((sample.kinetic - 11.5).abs() < 1e-12);
    assert!((sample.potential + 0.75).abs() < 1e-12);
    assert!((sample.total() - 10.75).abs() < 1e-12);
}

#[test]
fn energy_counts_each_pair_once() {
    // three equal masses at mutual distance 1 (equilateral triangle)
    let h = 3f64.sqrt() / 2.0;
    let sys = System::new(
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.5, h, 0.0),
        ]
        .into_iter()
        .map(|x| Body {
            x,
            v: Vec3::zeros(),
            m: 1.0,
        })
        .collect(),
    );

    let sample = total_energy(&sys, 1.0);
    // three unordered pairs, each contributing -1
    assert!((sample.potential + 3.0).abs() < 1e-12);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn leapfrog_two_body_closes_orbit() {
    let (d, m, g) = (1.0, 1.0, 1.0);
    let mut sys = circular_orbit_system(d, m, g);
    let forces = gravity_set(g, 0.0);
    let initial: Vec<Vec3> = sys.bodies.iter().map(|b| b.x).collect();

    // circular period: T = 2*pi*r / v with r = d/2
    let v = (g * m / (2.0 * d)).sqrt();
    let period = std::f64::consts::PI * d / v;
    let dt = 1e-3;
    let steps = (period / dt).round() as usize;

    let mut acc = accels(&sys, &forces);
    for _ in 0..steps {
        leapfrog_step(&mut sys, &forces, &mut acc, dt);
    }

    for (b, x0) in sys.bodies.iter().zip(&initial) {
        let error = (b.x - x0).norm();
        assert!(error < 1e-2, "orbit did not close: |dx| = {}", error);
    }
}

#[test]
fn leapfrog_energy_drift_bounded_and_below_euler() {
    let (d, m, g) = (1.0, 1.0, 1.0);
    let dt = 5e-3;
    let steps = 2000;
    let forces = gravity_set(g, 0.0);

    let drift_of = |mut sys: System, use_euler: bool| -> f64 {
        let e0 = total_energy(&sys, g).total();
        let mut acc = accels(&sys, &forces);
        let mut worst: f64 = 0.0;
        for _ in 0..steps {
            if use_euler {
                euler_step(&mut sys, &forces, &mut acc, dt);
            } else {
                leapfrog_step(&mut sys, &forces, &mut acc, dt);
            }
            let e = total_energy(&sys, g).total();
            worst = worst.max(((e - e0) / e0).abs());
        }
        worst
    };

    let leapfrog_drift = drift_of(circular_orbit_system(d, m, g), false);
    let euler_drift = drift_of(circular_orbit_system(d, m, g), true);

    assert!(
        leapfrog_drift < 1e-3,
        "leapfrog drift too large: {}",
        leapfrog_drift
    );
    assert!(
        euler_drift > 20.0 * leapfrog_drift,
        "euler ({}) should drift far more than leapfrog ({})",
        euler_drift,
        leapfrog_drift
    );
}

#[test]
fn leapfrog_advances_time() {
    let mut sys = two_body_system(1.0, 1.0, 1.0);
    let forces = gravity_set(1.0, 0.1);
    let mut acc = accels(&sys, &forces);

    for _ in 0..10 {
        leapfrog_step(&mut sys, &forces, &mut acc, 0.25);
    }
    assert!((sys.t - 2.5).abs() < 1e-12);
}

// ==================================================================================
// Engine / scenario tests
// ==================================================================================

fn scenario_from(system: System, params: Parameters) -> Scenario {
    let forces = gravity_set(params.g, params.softening);
    Scenario {
        parameters: params,
        system,
        forces,
        integrator: IntegratorConfig::Leapfrog,
    }
}

#[test]
fn run_emits_steps_plus_one_snapshots() {
    let mut params = test_params();
    params.t_end = 1.0;
    params.dt = 0.1;
    params.sample_energy = true;

    let sim = Simulation::new(scenario_from(two_body_system(1.0, 1.0, 1.0), params))
        .expect("valid scenario");
    let result = sim.run();

    assert_eq!(result.trajectory.len(), 11);
    assert_eq!(result.times.len(), 11);
    assert_eq!(result.energies.len(), 11);
    assert_eq!(result.times[0], 0.0);
    assert_eq!(result.trajectory[0].len(), 2);
}

#[test]
fn run_rejects_non_positive_time_step() {
    let mut params = test_params();
    params.dt = 0.0;

    let err = Simulation::new(scenario_from(two_body_system(1.0, 1.0, 1.0), params))
        .err()
        .expect("zero dt must be rejected");
    assert!(matches!(err, SimError::NonPositiveTimeStep { .. }));
}

#[test]
fn run_rejects_non_positive_mass() {
    let err = Simulation::new(scenario_from(two_body_system(1.0, 1.0, -2.0), test_params()))
        .err()
        .expect("negative mass must be rejected");
    assert!(matches!(err, SimError::NonPositiveMass { index: 1, .. }));
}

#[test]
fn run_rejects_empty_system() {
    let err = Simulation::new(scenario_from(System::new(Vec::new()), test_params()))
        .err()
        .expect("empty system must be rejected");
    assert!(matches!(err, SimError::NoBodies));
}

#[test]
fn lattice_scenario_recenters_momentum() {
    let cfg = ScenarioConfig {
        integrator: IntegratorConfig::Leapfrog,
        parameters: ParametersConfig {
            t_end: 1.0,
            dt: 0.1,
            softening: 0.1,
            g: 1.0,
            seed: 7,
            sample_energy: false,
        },
        bodies: Vec::new(),
        lattice: Some(LatticeConfig {
            n: 40,
            total_mass: 100.0,
        }),
        field: None,
    };

    let scenario = Scenario::build_scenario(cfg).expect("lattice scenario builds");
    assert_eq!(scenario.system.len(), 40);

    let mut momentum = Vec3::zeros();
    for b in &scenario.system.bodies {
        assert!((b.m - 2.5).abs() < 1e-12);
        momentum += b.m * b.v;
    }
    assert!(momentum.norm() < 1e-10, "CoM momentum not removed: {:?}", momentum);
}

#[test]
fn lattice_scenario_is_seed_deterministic() {
    let make = |seed: u64| {
        let cfg = ScenarioConfig {
            integrator: IntegratorConfig::Leapfrog,
            parameters: ParametersConfig {
                t_end: 1.0,
                dt: 0.1,
                softening: 0.1,
                g: 1.0,
                seed,
                sample_energy: false,
            },
            bodies: Vec::new(),
            lattice: Some(LatticeConfig {
                n: 27,
                total_mass: 27.0,
            }),
            field: None,
        };
        Scenario::build_scenario(cfg).expect("scenario builds").system
    };

    let a = make(5);
    let b = make(5);
    for (ba, bb) in a.bodies.iter().zip(&b.bodies) {
        assert_eq!(ba.x, bb.x);
        assert_eq!(ba.v, bb.v);
    }
}

// ==================================================================================
// Spectral field tests
// ==================================================================================

#[test]
fn grf_frequency_bins_standard_ordering() {
    let k = fft_frequencies(4);
    let step = std::f64::consts::PI / 2.0;

    assert!((k[0] - 0.0).abs() < 1e-15, "bin 0 must be the zero frequency");
    assert!((k[1] - step).abs() < 1e-15);
    assert!((k[2] + 2.0 * step).abs() < 1e-15);
    assert!((k[3] + step).abs() < 1e-15);
}

#[test]
fn grf_frequency_bins_odd_size() {
    // fftshift is a right-roll by floor(size / 2), so the zero frequency
    // stays in bin 0 for odd sizes too
    let k = fft_frequencies(5);
    let step = 2.0 * std::f64::consts::PI / 5.0;
    let expected = [0.0, 1.0, -3.0, -2.0, -1.0];

    for (bin, (actual, want)) in k.iter().zip(&expected).enumerate() {
        assert!(
            (actual - want * step).abs() < 1e-15,
            "bin {}: got {}, want {}",
            bin,
            actual,
            want * step
        );
    }
}

#[test]
fn grf_odd_size_spectrum_stays_power_law() {
    // with a mislabeled zero bin on an odd grid, the k^2 regularizer's
    // amplitude (~3e7 for alpha = 3) would land on a genuine low-frequency
    // mode and blow the raw field scale up by orders of magnitude
    let field = gaussian_random_field(3.0, 9, false, 11).expect("field generates");
    let n = (field.nrows() * field.ncols()) as f64;
    let std = (field.map(|v| v * v).sum() / n).sqrt();

    assert!(field.iter().all(|v| v.is_finite()));
    assert!(field.mean().abs() < 1e-9, "raw mean {}", field.mean());
    assert!(std < 100.0, "raw std {} far above the power-law scale", std);
}

#[test]
fn grf_normalized_field_has_zero_mean_unit_std() {
    for alpha in [0.5, 2.0, 4.0] {
        let field = gaussian_random_field(alpha, 32, true, 9).expect("field generates");
        let n = (field.nrows() * field.ncols()) as f64;

        let mean = field.mean();
        let std = (field.map(|v| v * v).sum() / n).sqrt();

        assert!(mean.abs() < 1e-9, "mean {} not ~0 for alpha {}", mean, alpha);
        assert!((std - 1.0).abs() < 1e-9, "std {} not ~1 for alpha {}", std, alpha);
    }
}

#[test]
fn grf_dc_removal_zeroes_raw_mean() {
    // with the DC bin forced to zero the unnormalized field mean collapses
    // to rounding noise
    let field = gaussian_random_field(3.0, 64, false, 11).expect("field generates");
    assert!(field.mean().abs() < 1e-9, "raw mean {}", field.mean());
}

#[test]
fn grf_is_deterministic_per_seed() {
    let a = gaussian_random_field(3.0, 16, true, 1234).expect("field generates");
    let b = gaussian_random_field(3.0, 16, true, 1234).expect("field generates");
    assert_eq!(a, b, "same seed must give bit-identical fields");

    let c = gaussian_random_field(3.0, 16, true, 1235).expect("field generates");
    assert_ne!(a, c, "different seeds should give different fields");
}

#[test]
fn grf_white_noise_alpha_zero_is_finite() {
    let field = gaussian_random_field(0.0, 8, true, 3).expect("field generates");
    assert!(field.iter().all(|v| v.is_finite()));
}

#[test]
fn grf_rejects_zero_size() {
    let err = gaussian_random_field(3.0, 0, true, 0)
        .err()
        .expect("size 0 must be rejected");
    assert!(matches!(err, SimError::ZeroFieldSize));
}
