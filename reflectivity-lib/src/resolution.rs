//! Gaussian Q-resolution: extension sizing and convolution.

use serde::{Deserialize, Serialize};

use crate::constants::{FWHM_SQ_PER_SIGMA_SQ, GAUSSIAN_CUTOFF, MIN_TWO_SIGMA_SQ, MIN_WAVE_VECTOR};
use crate::error::{ReflectivityError, Result};

/// Instrument resolution, `ΔQ = ΔQ₀ + Q·(ΔQ₁/Q)` (full width at half maximum).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Resolution {
    /// Constant resolution term ΔQ₀ (Å⁻¹)
    pub delta_q0: f64,
    /// Relative resolution term ΔQ₁/Q (dimensionless)
    pub delta_q1_over_q: f64,
}

impl Resolution {
    pub const fn new(delta_q0: f64, delta_q1_over_q: f64) -> Self {
        Resolution {
            delta_q0,
            delta_q1_over_q,
        }
    }

    /// Full width at half maximum at `q`.
    #[inline]
    pub fn fwhm(&self, q: f64) -> f64 {
        self.delta_q0 + q * self.delta_q1_over_q
    }

    /// Gaussian exponent denominator 2σ² at `q`, floored at 1e-10.
    #[inline]
    pub fn two_sigma_sq(&self, q: f64) -> f64 {
        let dq = self.fwhm(q);
        (2.0 * dq * dq / FWHM_SQ_PER_SIGMA_SQ).max(MIN_TWO_SIGMA_SQ)
    }
}

/// Steps of `step` needed before the Gaussian of width `two_sigma_sq`
/// drops below the cutoff, stopping early once `admit(count)` refuses the
/// next point.
fn count_steps(step: f64, two_sigma_sq: f64, admit: impl Fn(usize) -> bool) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    let mut count = 0usize;
    loop {
        let q_r = count as f64 * step;
        if q_r * q_r / two_sigma_sq > GAUSSIAN_CUTOFF || !admit(count + 1) {
            return count;
        }
        count += 1;
    }
}

/// Number of points to synthesize below `wave_vector[0]`.
///
/// Extension points never reach Q ≤ 0.
pub fn low_extension_length(wave_vector: &[f64], resolution: &Resolution) -> usize {
    let [first, second, ..] = wave_vector else {
        return 0;
    };
    let step = second - first;
    count_steps(step, resolution.two_sigma_sq(*first), |n| {
        first - n as f64 * step > 0.0
    })
}

/// Number of points to synthesize above the last element of `wave_vector`.
pub fn high_extension_length(wave_vector: &[f64], resolution: &Resolution) -> usize {
    let [.., before, last] = wave_vector else {
        return 0;
    };
    count_steps(last - before, resolution.two_sigma_sq(*last), |_| true)
}

/// `(low, high)` extension lengths for `wave_vector`.
pub fn extension_lengths(wave_vector: &[f64], resolution: &Resolution) -> (usize, usize) {
    (
        low_extension_length(wave_vector, resolution),
        high_extension_length(wave_vector, resolution),
    )
}

/// Pad `wave_vector` with `num_low` and `num_high` points continuing the
/// spacing at each end.
pub fn extend_wave_vector(wave_vector: &[f64], num_low: usize, num_high: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(num_low + wave_vector.len() + num_high);
    if wave_vector.len() < 2 {
        out.extend_from_slice(wave_vector);
        return out;
    }

    let n = wave_vector.len();
    let low_step = wave_vector[1] - wave_vector[0];
    let high_step = wave_vector[n - 1] - wave_vector[n - 2];

    out.extend((1..=num_low).rev().map(|i| wave_vector[0] - i as f64 * low_step));
    out.extend_from_slice(wave_vector);
    out.extend((1..=num_high).map(|i| wave_vector[n - 1] + i as f64 * high_step));
    out
}

/// Smear `reflectivity` with the Gaussian resolution function.
///
/// `wave_vector` and `reflectivity` cover the extended range; the returned
/// curve holds only the `num_points` values starting at index `num_low`.
/// Each side of the kernel stops at the Gaussian cutoff or at the array end,
/// whichever comes first.
pub fn convolve(
    wave_vector: &[f64],
    reflectivity: &[f64],
    resolution: &Resolution,
    num_low: usize,
    num_points: usize,
) -> Result<Vec<f64>> {
    if wave_vector.len() != reflectivity.len() {
        return Err(ReflectivityError::LengthMismatch {
            wave_vector: wave_vector.len(),
            reflectivity: reflectivity.len(),
        });
    }
    if num_low + num_points > wave_vector.len() {
        return Err(ReflectivityError::ExtensionOutOfRange {
            num_low,
            num_points,
            len: wave_vector.len(),
        });
    }

    let mut smeared = Vec::with_capacity(num_points);
    for i in num_low..num_low + num_points {
        let q = wave_vector[i];
        let two_sigma_sq = resolution.two_sigma_sq(q.max(MIN_WAVE_VECTOR));

        let mut sum = reflectivity[i];
        let mut norm = 1.0;

        let mut accumulate = |j: usize| -> bool {
            let q_res = wave_vector[j] - q;
            let exponent = q_res * q_res / two_sigma_sq;
            if exponent > GAUSSIAN_CUTOFF {
                return false;
            }
            let weight = (-exponent).exp();
            sum += weight * reflectivity[j];
            norm += weight;
            true
        };

        for j in (0..i).rev() {
            if !accumulate(j) {
                break;
            }
        }
        for j in i + 1..wave_vector.len() {
            if !accumulate(j) {
                break;
            }
        }

        smeared.push(sum / norm);
    }

    Ok(smeared)
}
