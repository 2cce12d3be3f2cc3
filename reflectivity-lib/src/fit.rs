//! Goodness of fit between a calculated curve and measured data.

use crate::error::{ReflectivityError, Result};
use crate::measured::MeasuredData;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquared {
    /// Σ ((R_calc - R_meas) / σ)²
    pub total: f64,
    /// `total` divided by the number of points used
    pub reduced: f64,
    /// Points with a positive, finite error bar
    pub points: usize,
}

/// Chi-squared of `calculated` against `measured`, point by point.
///
/// Points whose error bar is not positive and finite carry no weight and
/// are skipped.
pub fn chi_squared(calculated: &[f64], measured: &MeasuredData) -> Result<ChiSquared> {
    if calculated.len() != measured.len() {
        return Err(ReflectivityError::LengthMismatch {
            wave_vector: measured.len(),
            reflectivity: calculated.len(),
        });
    }

    let mut total = 0.0;
    let mut points = 0usize;
    for ((&calc, &meas), &err) in calculated
        .iter()
        .zip(&measured.reflectivity)
        .zip(&measured.error)
    {
        if !(err.is_finite() && err > 0.0) {
            continue;
        }
        let residual = (calc - meas) / err;
        total += residual * residual;
        points += 1;
    }

    let reduced = if points > 0 {
        total / points as f64
    } else {
        0.0
    };

    Ok(ChiSquared {
        total,
        reduced,
        points,
    })
}
