#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// One homogeneous computational layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tile {
    /// Real part of the scattering-length density (Å⁻²)
    pub scattering_length: f64,
    /// True (coherent) absorption term
    pub true_abs_length: f64,
    /// Incoherent absorption term, scaled by 1/wavelength in the recursion
    pub inc_abs_length: f64,
    /// Thickness (Å)
    pub thickness: f64,
}

impl Tile {
    pub const fn new(
        scattering_length: f64,
        true_abs_length: f64,
        inc_abs_length: f64,
        thickness: f64,
    ) -> Self {
        Tile {
            scattering_length,
            true_abs_length,
            inc_abs_length,
            thickness,
        }
    }

    /// Same material constants, different thickness.
    pub const fn with_thickness(self, thickness: f64) -> Self {
        Tile { thickness, ..self }
    }
}

/// A user-specified material layer: a [`Tile`] plus the RMS width of the
/// interface below it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Slab {
    pub tile: Tile,
    /// Roughness of the interface between this layer and the next one down (Å)
    pub interface_width: f64,
}

impl Slab {
    pub const fn new(tile: Tile, interface_width: f64) -> Self {
        Slab {
            tile,
            interface_width,
        }
    }

    pub const fn scattering_length(&self) -> f64 {
        self.tile.scattering_length
    }

    pub const fn thickness(&self) -> f64 {
        self.tile.thickness
    }
}

/// Scattering-length density as a function of depth.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Depth (Å), non-decreasing
    pub depth: Vec<f64>,
    /// Effective scattering-length density at each depth (Å⁻²)
    pub scattering_density: Vec<f64>,
}

impl Profile {
    pub fn new(depth: Vec<f64>, scattering_density: Vec<f64>) -> Self {
        debug_assert_eq!(depth.len(), scattering_density.len());
        Profile {
            depth,
            scattering_density,
        }
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Iterate over `(depth, scattering_density)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.depth
            .iter()
            .copied()
            .zip(self.scattering_density.iter().copied())
    }
}

/// Result of a full reflectivity calculation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReflectivityProfile {
    /// Depth profile of the discretized stack
    pub profile: Profile,
    /// Momentum transfer Q (Å⁻¹), ascending
    pub wave_vector: Vec<f64>,
    /// Reflectivity at each Q (plain or RQ⁴-scaled)
    pub reflectivity: Vec<f64>,
}

impl ReflectivityProfile {
    pub fn new(profile: Profile, wave_vector: Vec<f64>, reflectivity: Vec<f64>) -> Self {
        debug_assert_eq!(wave_vector.len(), reflectivity.len());
        ReflectivityProfile {
            profile,
            wave_vector,
            reflectivity,
        }
    }

    pub fn len(&self) -> usize {
        self.wave_vector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wave_vector.is_empty()
    }

    /// Iterate over `(Q, reflectivity)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wave_vector
            .iter()
            .copied()
            .zip(self.reflectivity.iter().copied())
    }
}
