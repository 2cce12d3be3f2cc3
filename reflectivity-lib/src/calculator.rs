//! Full reflectivity calculation: discretize, extend, recurse, convolve.

use serde::{Deserialize, Serialize};
use tracing::debug;

use reflectivity_data::{ReflectivityProfile, Slab};

use crate::error::Result;
use crate::parratt::reflectivity_curve;
use crate::resolution::{Resolution, convolve, extend_wave_vector, extension_lengths};
use crate::roughness::discretize;

/// How the reflectivity curve is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scaling {
    /// Plain reflectivity R(Q)
    #[default]
    Reflectivity,
    /// R(Q)·Q⁴
    Rq4,
}

impl Scaling {
    /// Scale a reflectivity value `r` measured at `q`.
    #[inline]
    pub fn apply(self, q: f64, r: f64) -> f64 {
        match self {
            Scaling::Reflectivity => r,
            Scaling::Rq4 => r * q.powi(4),
        }
    }
}

/// Compute the resolution-smeared reflectivity of `slabs` at every point of
/// `wave_vector`, together with the depth profile of the discretized stack.
///
/// # Arguments
/// * `slabs` - Layers from the incident medium (first) to the substrate (last)
/// * `num_roughness_layers` - Tiles per rough interface (0 keeps interfaces sharp)
/// * `resolution` - Gaussian Q-resolution of the instrument
/// * `wavelength` - Neutron/X-ray wavelength in Å
/// * `wave_vector` - Requested Q values in Å⁻¹, ascending
/// * `scaling` - Report R or R·Q⁴
pub fn reflectivity_profile(
    slabs: &[Slab],
    num_roughness_layers: usize,
    resolution: &Resolution,
    wavelength: f64,
    wave_vector: &[f64],
    scaling: Scaling,
) -> Result<ReflectivityProfile> {
    let stack = discretize(slabs, num_roughness_layers);

    let (num_low, num_high) = extension_lengths(wave_vector, resolution);
    let extended = extend_wave_vector(wave_vector, num_low, num_high);
    debug!(
        points = wave_vector.len(),
        num_low, num_high, "extended wave vector for resolution"
    );

    let raw = reflectivity_curve(&extended, wavelength, &stack.tiles);
    let smeared = convolve(&extended, &raw, resolution, num_low, wave_vector.len())?;

    let reflectivity = wave_vector
        .iter()
        .zip(smeared)
        .map(|(&q, r)| scaling.apply(q, r))
        .collect();

    Ok(ReflectivityProfile::new(
        stack.profile,
        wave_vector.to_vec(),
        reflectivity,
    ))
}
