//! Roughness expansion of a slab stack into computational tiles.
//!
//! Each rough interface is replaced by a window of thin tiles whose
//! constants follow an error-function profile. Interfaces are superposed,
//! so the blended value at depth `z` is
//!
//! ```text
//! p(z) = p_0 + Σ_k (p_{k+1} - p_k) · Φ((z - z_k) / σ_k)
//! ```
//!
//! with Φ the standard normal CDF. A sharp interface contributes a step.

use std::f64::consts::SQRT_2;

use reflectivity_data::{Profile, Slab, Tile};
use tracing::debug;

use crate::constants::{MIN_INTERFACE_WIDTH, ROUGHNESS_HALF_WIDTH};

/// Tile stack and depth profile produced by [`discretize`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Discretization {
    pub tiles: Vec<Tile>,
    pub profile: Profile,
}

/// Standard normal cumulative distribution function.
#[inline]
pub fn cumulative_normal(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / SQRT_2))
}

#[derive(Debug, Clone, Copy)]
struct Interface {
    depth: f64,
    width: f64,
    /// Window extent above the interface (Å)
    above: f64,
    /// Window extent below the interface (Å)
    below: f64,
}

impl Interface {
    fn is_sharp(&self) -> bool {
        self.width.is_nan() || self.width <= MIN_INTERFACE_WIDTH
    }

    /// Fraction of the lower material present at depth `z`.
    fn weight(&self, z: f64) -> f64 {
        if self.is_sharp() {
            if z >= self.depth { 1.0 } else { 0.0 }
        } else {
            cumulative_normal((z - self.depth) / self.width)
        }
    }
}

/// Place every interface and size its roughness window.
///
/// The window spans ±3σ but never reaches past the middle of a finite
/// neighbouring layer; the incident medium and the substrate are
/// semi-infinite and do not clamp it.
fn locate_interfaces(slabs: &[Slab], num_roughness_layers: usize) -> Vec<Interface> {
    let last = slabs.len() - 1;
    let mut interfaces = Vec::with_capacity(last);
    let mut depth = 0.0;

    for k in 0..last {
        if k > 0 {
            depth += slabs[k].thickness();
        }
        let width = slabs[k].interface_width;
        let mut iface = Interface {
            depth,
            width,
            above: 0.0,
            below: 0.0,
        };

        if num_roughness_layers > 0 && !iface.is_sharp() {
            let half = ROUGHNESS_HALF_WIDTH * width;
            iface.above = if k > 0 {
                half.min(0.5 * slabs[k].thickness())
            } else {
                half
            };
            iface.below = if k + 1 < last {
                half.min(0.5 * slabs[k + 1].thickness())
            } else {
                half
            };
            iface.above = iface.above.max(0.0);
            iface.below = iface.below.max(0.0);
        }

        interfaces.push(iface);
    }

    interfaces
}

fn blended(
    slabs: &[Slab],
    interfaces: &[Interface],
    z: f64,
    field: impl Fn(&Tile) -> f64,
) -> f64 {
    let mut value = field(&slabs[0].tile);
    for (k, iface) in interfaces.iter().enumerate() {
        let step = field(&slabs[k + 1].tile) - field(&slabs[k].tile);
        if step != 0.0 {
            value += step * iface.weight(z);
        }
    }
    value
}

#[derive(Default)]
struct StackBuilder {
    tiles: Vec<Tile>,
    depth: Vec<f64>,
}

impl StackBuilder {
    /// Append `tile` whose top edge sits at depth `top`.
    fn push(&mut self, tile: Tile, top: f64) {
        self.push_sampled(tile, top + 0.5 * tile.thickness);
    }

    /// Append a semi-infinite `tile` sampled at `depth`.
    fn push_sampled(&mut self, tile: Tile, depth: f64) {
        self.depth.push(depth);
        self.tiles.push(tile);
    }

    fn finish(self) -> Discretization {
        let density = self.tiles.iter().map(|t| t.scattering_length).collect();
        Discretization {
            profile: Profile::new(self.depth, density),
            tiles: self.tiles,
        }
    }
}

/// Expand `slabs` (incident medium first, substrate last) into tiles.
///
/// Every interface with a width above 1e-10 Å becomes
/// `num_roughness_layers` equal tiles spanning its window; the remaining
/// bulk of each finite layer becomes a single tile. With
/// `num_roughness_layers == 0` all interfaces are left sharp.
///
/// The profile holds one sample per tile at its depth midpoint, with depth
/// measured from the first interface. The incident medium and the substrate
/// are semi-infinite; their thicknesses are ignored and they are sampled at
/// the edge of the stack they bound.
pub fn discretize(slabs: &[Slab], num_roughness_layers: usize) -> Discretization {
    let mut builder = StackBuilder::default();

    match slabs {
        [] => return builder.finish(),
        [only] => {
            builder.push_sampled(only.tile, 0.0);
            return builder.finish();
        }
        _ => {}
    }

    let last = slabs.len() - 1;
    let interfaces = locate_interfaces(slabs, num_roughness_layers);

    builder.push_sampled(slabs[0].tile, interfaces[0].depth - interfaces[0].above);

    for (k, iface) in interfaces.iter().enumerate() {
        let span = iface.above + iface.below;
        if span > 0.0 {
            let dz = span / num_roughness_layers as f64;
            let start = iface.depth - iface.above;
            for j in 0..num_roughness_layers {
                let tile_top = start + j as f64 * dz;
                let mid = tile_top + 0.5 * dz;
                let tile = Tile::new(
                    blended(slabs, &interfaces, mid, |t| t.scattering_length),
                    blended(slabs, &interfaces, mid, |t| t.true_abs_length),
                    blended(slabs, &interfaces, mid, |t| t.inc_abs_length),
                    dz,
                );
                builder.push(tile, tile_top);
            }
        }

        let window_end = iface.depth + iface.below;
        if k + 1 < last {
            let next = &interfaces[k + 1];
            let bulk = (next.depth - next.above) - window_end;
            if bulk > 0.0 {
                builder.push(slabs[k + 1].tile.with_thickness(bulk), window_end);
            }
        } else {
            builder.push_sampled(slabs[last].tile, window_end);
        }
    }

    let out = builder.finish();
    debug!(
        slabs = slabs.len(),
        tiles = out.tiles.len(),
        num_roughness_layers,
        "discretized layer stack"
    );
    out
}
