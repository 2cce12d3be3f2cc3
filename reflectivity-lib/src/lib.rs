//! Specular neutron/X-ray reflectivity of layered thin films.
//!
//! A slab stack is expanded into thin tiles that follow an error-function
//! roughness profile, the reflectivity of the tile stack is computed by
//! Parratt recursion and the curve is smeared with a Gaussian Q-resolution.

pub mod calculator;
pub mod constants;
pub mod error;
pub mod fit;
pub mod materials;
pub mod measured;
pub mod parratt;
pub mod resolution;
pub mod roughness;

pub use calculator::{Scaling, reflectivity_profile};
pub use error::{ReflectivityError, Result};
pub use fit::{ChiSquared, chi_squared};
pub use materials::{Material, find_material, slab_for_material};
pub use measured::MeasuredData;
pub use parratt::{reflectivity_curve, specular_reflectivity};
pub use reflectivity_data;
pub use reflectivity_data::{Profile, ReflectivityProfile, Slab, Tile};
pub use resolution::{
    Resolution, convolve, extend_wave_vector, extension_lengths, high_extension_length,
    low_extension_length,
};
pub use roughness::{Discretization, discretize};
