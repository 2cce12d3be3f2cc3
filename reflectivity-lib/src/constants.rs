/// Gaussian exponent beyond which resolution weights are dropped (exp(-6.908) ≈ 0.001)
pub const GAUSSIAN_CUTOFF: f64 = 6.908;

/// Floor for the Gaussian denominator 2σ² (Å⁻²)
pub const MIN_TWO_SIGMA_SQ: f64 = 1e-10;

/// Smallest Q used when evaluating the resolution width (Å⁻¹)
pub const MIN_WAVE_VECTOR: f64 = 1e-10;

/// Interface widths at or below this are treated as sharp (Å)
pub const MIN_INTERFACE_WIDTH: f64 = 1e-10;

/// Half-width of the roughness window, in units of the interface width σ
pub const ROUGHNESS_HALF_WIDTH: f64 = 3.0;

/// FWHM² = 8 ln2 σ² for a Gaussian
pub const FWHM_SQ_PER_SIGMA_SQ: f64 = 8.0 * std::f64::consts::LN_2;
