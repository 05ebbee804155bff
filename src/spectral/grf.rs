//! Scale-invariant 2-D Gaussian random field via spectral synthesis.
//!
//! Complex white noise is filtered in Fourier space by a power-law
//! amplitude (kx^2 + ky^2)^(-alpha/4) and transformed back; the real part
//! is the field. `alpha = 0` gives white noise, larger `alpha` gives
//! smoother, longer-correlated fields.

use nalgebra::DMatrix;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::errors::{Result, SimError};

// regularizer added to k^2 so the amplitude is defined for every alpha
const K2_FLOOR: f64 = 1e-10;

/// Fourier frequencies for one axis of a `size`-point grid, in standard
/// FFT bin ordering: centered indices i - floor((size + 1) / 2), rolled
/// right by floor(size / 2) (fftshift) so the zero frequency lands in
/// bin 0, scaled by 2*pi/size.
pub fn fft_frequencies(size: usize) -> Vec<f64> {
    let center = ((size + 1) / 2) as f64;
    let shift = size / 2;
    (0..size)
        .map(|i| {
            let centered = ((i + size - shift) % size) as f64 - center;
            2.0 * std::f64::consts::PI / size as f64 * centered
        })
        .collect()
}

/// Generate a `size x size` Gaussian random field with spectral slope
/// `alpha`, deterministically from `seed`.
///
/// The amplitude at the DC bin [0, 0] is forced to zero so the raw field
/// carries no mean offset. With `normalize` the output is additionally
/// rescaled to zero sample mean and unit sample standard deviation.
pub fn gaussian_random_field(
    alpha: f64,
    size: usize,
    normalize: bool,
    seed: u64,
) -> Result<DMatrix<f64>> {
    if size == 0 {
        return Err(SimError::ZeroFieldSize);
    }

    let k = fft_frequencies(size);

    // filtered noise: amplitude(kx, ky) * (gaussian + i*gaussian) per bin
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut spectrum = vec![Complex::new(0.0, 0.0); size * size];
    for row in 0..size {
        let ky2 = k[row] * k[row];
        for col in 0..size {
            let k2 = k[col] * k[col] + ky2 + K2_FLOOR;
            let amplitude = if row == 0 && col == 0 {
                0.0 // DC removal
            } else {
                k2.powf(-alpha / 4.0)
            };
            let re: f64 = StandardNormal.sample(&mut rng);
            let im: f64 = StandardNormal.sample(&mut rng);
            spectrum[row * size + col] = amplitude * Complex::new(re, im);
        }
    }

    ifft2_in_place(&mut spectrum, size);

    let mut field = DMatrix::from_fn(size, size, |r, c| spectrum[r * size + c].re);

    if normalize {
        let mean = field.mean();
        field.add_scalar_mut(-mean);
        // population standard deviation, matching the reference
        let std = (field.map(|v| v * v).sum() / (size * size) as f64).sqrt();
        if std > 0.0 {
            field /= std;
        }
    }

    Ok(field)
}

/// Unitary inverse 2-D FFT of a row-major `size x size` complex grid:
/// inverse transform of every row, then of every column, then the 1/size^2
/// normalization rustfft leaves to the caller.
fn ifft2_in_place(data: &mut [Complex<f64>], size: usize) {
    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(size);

    for row in data.chunks_exact_mut(size) {
        ifft.process(row);
    }

    let mut column = vec![Complex::new(0.0, 0.0); size];
    for col in 0..size {
        for row in 0..size {
            column[row] = data[row * size + col];
        }
        ifft.process(&mut column);
        for row in 0..size {
            data[row * size + col] = column[row];
        }
    }

    let scale = 1.0 / (size * size) as f64;
    for value in data.iter_mut() {
        *value *= scale;
    }
}
