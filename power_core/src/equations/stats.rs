//! # Forecast Error Statistics
//!
//! Normal-distribution model of the deviation between forecast and actual
//! generated power, used by the imbalance penalty calculator.

use std::f64::consts::PI;

use super::guard::finite;
use crate::errors::{CalcError, CalcResult};

/// Number of trapezoids used to integrate the density over the tolerance band
pub const INTEGRATION_STEPS: u32 = 10_000;

/// Normal probability density
///
/// # Formula
/// - f(p) = 1 / (σ·√(2π)) · exp(−(p − μ)² / (2σ²))
#[inline]
pub fn normal_density(p: f64, mean: f64, sigma: f64) -> f64 {
    let deviation = p - mean;
    (1.0 / (sigma * (2.0 * PI).sqrt())) * (-(deviation * deviation) / (2.0 * sigma * sigma)).exp()
}

/// Probability that power stays within `mean · (1 ± band)`.
///
/// Integrates [`normal_density`] with the trapezoidal rule over a fixed
/// number of steps, so the work is bounded regardless of input.
pub fn share_within_band(mean: f64, sigma: f64, band: f64, steps: u32) -> CalcResult<f64> {
    if sigma <= 0.0 {
        return Err(CalcError::computation_failed(
            "balancedShare",
            "standard deviation must be positive",
        ));
    }
    if steps == 0 {
        return Err(CalcError::computation_failed("balancedShare", "no integration steps"));
    }

    let lower = mean * (1.0 - band);
    let upper = mean * (1.0 + band);
    let step = (upper - lower) / f64::from(steps);

    let mut share = 0.0;
    for i in 0..steps {
        let a = lower + f64::from(i) * step;
        let b = a + step;
        share += 0.5 * (normal_density(a, mean, sigma) + normal_density(b, mean, sigma)) * step;
    }

    finite("balancedShare", share)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_peak() {
        let peak = normal_density(0.0, 0.0, 1.0);
        assert!((peak - 0.3989422804014327).abs() < 1e-15);
    }

    #[test]
    fn test_share_matches_error_function() {
        // erf(0.25 / √2) for Pc = 5, σ = 1, ±5 %
        let share = share_within_band(5.0, 1.0, 0.05, INTEGRATION_STEPS).unwrap();
        assert!((share - 0.19741265136584743).abs() < 1e-8, "share = {}", share);
    }

    #[test]
    fn test_one_sigma_band() {
        let share = share_within_band(5.0, 0.25, 0.05, INTEGRATION_STEPS).unwrap();
        assert!((share - 0.6826894921370859).abs() < 1e-8, "share = {}", share);
    }

    #[test]
    fn test_zero_sigma_rejected() {
        assert!(share_within_band(5.0, 0.0, 0.05, INTEGRATION_STEPS).is_err());
    }
}
