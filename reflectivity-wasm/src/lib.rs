//! WASM bindings for the reflectivity calculator.
//!
//! Build with:
//! ```sh
//! wasm-pack build -p reflectivity-wasm
//! ```
//!
//! Layer stacks cross the boundary as flat arrays with
//! [`LAYER_STRIDE`] values per layer:
//! `[sld, true_abs, inc_abs, thickness, roughness, ...]`.

use wasm_bindgen::prelude::*;

use reflectivity::{Resolution, Scaling, Slab, Tile};

/// Values per layer in a flattened stack.
pub const LAYER_STRIDE: usize = 5;

fn to_js(e: reflectivity::ReflectivityError) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_scaling(scaling: &str) -> Result<Scaling, JsError> {
    match scaling.to_lowercase().as_str() {
        "reflectivity" | "r" => Ok(Scaling::Reflectivity),
        "rq4" => Ok(Scaling::Rq4),
        _ => Err(JsError::new(&format!("unknown scaling: {scaling}"))),
    }
}

fn unflatten(layers: &[f64]) -> Result<Vec<Slab>, JsError> {
    if layers.len() % LAYER_STRIDE != 0 {
        return Err(JsError::new(&format!(
            "layer array length {} is not a multiple of {LAYER_STRIDE}",
            layers.len()
        )));
    }
    Ok(layers
        .chunks_exact(LAYER_STRIDE)
        .map(|l| Slab::new(Tile::new(l[0], l[1], l[2], l[3]), l[4]))
        .collect())
}

// ── Reflectivity ──

/// Resolution-smeared reflectivity at every point of `wave_vector`.
///
/// `scaling` is one of: "reflectivity", "rq4".
#[wasm_bindgen]
pub fn reflectivity(
    layers: &[f64],
    roughness_layers: usize,
    wavelength: f64,
    delta_q0: f64,
    delta_q1_over_q: f64,
    wave_vector: &[f64],
    scaling: &str,
) -> Result<Vec<f64>, JsError> {
    let slabs = unflatten(layers)?;
    let scaling = parse_scaling(scaling)?;
    let resolution = Resolution::new(delta_q0, delta_q1_over_q);
    reflectivity::reflectivity_profile(
        &slabs,
        roughness_layers,
        &resolution,
        wavelength,
        wave_vector,
        scaling,
    )
    .map(|p| p.reflectivity)
    .map_err(to_js)
}

/// Unsmeared reflectivity of the sharp slab stack (no roughness expansion).
#[wasm_bindgen]
pub fn sharp_reflectivity(
    layers: &[f64],
    wavelength: f64,
    wave_vector: &[f64],
) -> Result<Vec<f64>, JsError> {
    let tiles: Vec<Tile> = unflatten(layers)?.into_iter().map(|s| s.tile).collect();
    Ok(reflectivity::reflectivity_curve(
        wave_vector,
        wavelength,
        &tiles,
    ))
}

// ── Profile ──

/// Depth profile of the discretized stack as `[z0, rho0, z1, rho1, ...]`.
#[wasm_bindgen]
pub fn density_profile(layers: &[f64], roughness_layers: usize) -> Result<Vec<f64>, JsError> {
    let slabs = unflatten(layers)?;
    let stack = reflectivity::discretize(&slabs, roughness_layers);
    Ok(stack
        .profile
        .points()
        .flat_map(|(z, rho)| [z, rho])
        .collect())
}

// ── Materials ──

/// Scattering-length density (Å⁻²) of a built-in material.
#[wasm_bindgen]
pub fn material_sld(name: &str) -> Result<f64, JsError> {
    reflectivity::find_material(name)
        .map(|m| m.scattering_length)
        .ok_or_else(|| to_js(reflectivity::ReflectivityError::UnknownMaterial(name.to_string())))
}

/// Names of all built-in materials.
#[wasm_bindgen]
pub fn material_names() -> js_sys::Array {
    reflectivity::materials::materials()
        .map(|m| JsValue::from_str(m.name))
        .collect()
}
