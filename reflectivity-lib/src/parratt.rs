//! Specular reflectivity of a tile stack by Parratt recursion.

use num_complex::Complex64;
use std::f64::consts::PI;

use reflectivity_data::Tile;

/// Complex normal component of the wave vector inside `tile`.
///
/// `q_sq` is Q² of the incident beam (Å⁻²). The critical term is
/// `16π·ρ` and absorption enters as `-2iβ` with
/// `β = 4π·(true_abs + inc_abs / wavelength)`; the principal square root
/// keeps the imaginary part non-positive, so the wave decays with depth.
#[inline]
pub fn normal_wave_vector(q_sq: f64, tile: &Tile, wavelength: f64) -> Complex64 {
    let qc_sq = 16.0 * PI * tile.scattering_length;
    let beta = 4.0 * PI * (tile.true_abs_length + tile.inc_abs_length / wavelength);
    Complex64::new(q_sq - qc_sq, -2.0 * beta).sqrt()
}

/// Fresnel coefficient between two media with normal wave vectors
/// `upper` and `lower`.
#[inline]
fn fresnel(upper: Complex64, lower: Complex64) -> Complex64 {
    let sum = upper + lower;
    if sum.norm_sqr() == 0.0 {
        // Q = 0 between two identical transparent media
        return Complex64::new(0.0, 0.0);
    }
    (upper - lower) / sum
}

/// Squared modulus of the specular reflectivity amplitude at momentum
/// transfer `q` (Å⁻¹).
///
/// `tiles` run from the incident medium (first) to the substrate (last).
/// The recursion starts with no reflected wave in the substrate and walks
/// every boundary upward; at each boundary the amplitude carried from below
/// is combined with the local Fresnel coefficient and propagated through the
/// finite tile above it. The incident medium and the substrate are
/// semi-infinite, so their thicknesses never enter the result.
///
/// Returns 0 when `wavelength <= 0` or the stack has no interface.
pub fn specular_reflectivity(q: f64, wavelength: f64, tiles: &[Tile]) -> f64 {
    if wavelength <= 0.0 || tiles.len() < 2 {
        return 0.0;
    }

    let q_sq = q * q;
    let one = Complex64::new(1.0, 0.0);
    let last = tiles.len() - 1;

    let mut q_lower = normal_wave_vector(q_sq, &tiles[last], wavelength);
    let mut r_amp = Complex64::new(0.0, 0.0);

    for (i, tile) in tiles[..last].iter().enumerate().rev() {
        let q_upper = normal_wave_vector(q_sq, tile, wavelength);
        let f = fresnel(q_upper, q_lower);
        r_amp = (r_amp + f) / (r_amp * f + one);

        if i > 0 {
            // a = exp(-i·d·q/2), so a² is the round-trip phase and attenuation
            let a = (Complex64::new(0.0, -0.5 * tile.thickness) * q_upper).exp();
            r_amp *= a * a;
        }

        q_lower = q_upper;
    }

    r_amp.norm_sqr()
}

/// Evaluate [`specular_reflectivity`] at every point of `wave_vector`.
pub fn reflectivity_curve(wave_vector: &[f64], wavelength: f64, tiles: &[Tile]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        wave_vector
            .par_iter()
            .map(|&q| specular_reflectivity(q, wavelength, tiles))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        wave_vector
            .iter()
            .map(|&q| specular_reflectivity(q, wavelength, tiles))
            .collect()
    }
}
