//! # Numeric Guards
//!
//! Checked arithmetic for formulas whose inputs can make a derived quantity
//! undefined. Each guard names the quantity it protects so the resulting
//! [`CalcError::ComputationFailed`] points at the failing step instead of
//! letting NaN or infinity reach the output.

use crate::errors::{CalcError, CalcResult};

/// `numerator / denominator`, failing on a zero denominator or a non-finite
/// quotient.
#[inline]
pub fn checked_div(quantity: &str, numerator: f64, denominator: f64) -> CalcResult<f64> {
    if denominator == 0.0 {
        return Err(CalcError::computation_failed(quantity, "division by zero"));
    }
    finite(quantity, numerator / denominator)
}

/// `√x`, failing on a negative argument.
#[inline]
pub fn checked_sqrt(quantity: &str, x: f64) -> CalcResult<f64> {
    if x < 0.0 {
        return Err(CalcError::computation_failed(
            quantity,
            format!("square root of negative value {}", x),
        ));
    }
    finite(quantity, x.sqrt())
}

/// `√(a² + b²)`, the magnitude of an impedance or power triangle.
#[inline]
pub fn checked_hypot(quantity: &str, a: f64, b: f64) -> CalcResult<f64> {
    finite(quantity, a.hypot(b))
}

/// Pass a value through, failing if it is NaN or infinite.
#[inline]
pub fn finite(quantity: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::computation_failed(
            quantity,
            format!("result is not a finite number ({})", value),
        ))
    }
}
