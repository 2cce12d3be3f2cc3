//! Built-in neutron scattering-length densities for common materials.

use reflectivity_data::{Slab, Tile};

use crate::error::{ReflectivityError, Result};

/// Each entry: (name, formula, scattering-length density in 1e-6 Å⁻²)
const MATERIALS: &[(&str, &str, f64)] = &[
    // Ambient media
    ("air", "", 0.0),
    ("vacuum", "", 0.0),
    ("water", "H2O", -0.560),
    ("heavy water", "D2O", 6.393),
    // Substrates
    ("silicon", "Si", 2.073),
    ("silicon dioxide", "SiO2", 3.475),
    ("sapphire", "Al2O3", 5.750),
    ("germanium", "Ge", 3.618),
    // Metals
    ("aluminum", "Al", 2.078),
    ("titanium", "Ti", -1.925),
    ("chromium", "Cr", 3.027),
    ("iron", "Fe", 8.024),
    ("cobalt", "Co", 2.265),
    ("nickel", "Ni", 9.408),
    ("copper", "Cu", 6.554),
    ("silver", "Ag", 3.501),
    ("tantalum", "Ta", 3.829),
    ("tungsten", "W", 3.066),
    ("platinum", "Pt", 6.357),
    ("gold", "Au", 4.662),
    // Polymers
    ("polystyrene", "C8H8", 1.412),
    ("deuterated polystyrene", "C8D8", 6.407),
    ("pmma", "C5H8O2", 1.059),
];

/// A tabulated material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub name: &'static str,
    pub formula: &'static str,
    /// Scattering-length density (Å⁻²)
    pub scattering_length: f64,
}

impl Material {
    fn from_entry(&(name, formula, sld): &(&'static str, &'static str, f64)) -> Self {
        Material {
            name,
            formula,
            scattering_length: sld * 1e-6,
        }
    }

    /// Slab of this material with the given thickness (Å) and roughness of
    /// the interface below it (Å).
    pub fn slab(&self, thickness: f64, interface_width: f64) -> Slab {
        Slab::new(
            Tile::new(self.scattering_length, 0.0, 0.0, thickness),
            interface_width,
        )
    }
}

/// All tabulated materials, in table order.
pub fn materials() -> impl Iterator<Item = Material> {
    MATERIALS.iter().map(Material::from_entry)
}

/// Find a material by name (case-insensitive) or formula.
pub fn find_material(name: &str) -> Option<Material> {
    let lower = name.trim().to_lowercase();
    // Try by name first
    if let Some(entry) = MATERIALS.iter().find(|(n, _, _)| *n == lower) {
        return Some(Material::from_entry(entry));
    }
    // Try by formula
    MATERIALS
        .iter()
        .find(|(_, formula, _)| !formula.is_empty() && formula.eq_ignore_ascii_case(name.trim()))
        .map(Material::from_entry)
}

/// Slab of the named material, or [`ReflectivityError::UnknownMaterial`].
pub fn slab_for_material(name: &str, thickness: f64, interface_width: f64) -> Result<Slab> {
    find_material(name)
        .map(|m| m.slab(thickness, interface_width))
        .ok_or_else(|| ReflectivityError::UnknownMaterial(name.to_string()))
}
