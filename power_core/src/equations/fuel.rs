//! # Fuel Basis Conversions
//!
//! Coefficients for moving a fuel composition between the as-received
//! (working), dry and combustible mass bases, and the lower heating value
//! regression used for solid fuels.
//!
//! ## Notation
//!
//! - `W` = moisture content, % of working mass
//! - `A` = ash content, % of working mass (or % of dry mass for fuel oil)
//! - `C, H, S, O` = element content, %
//! - `Q` = lower heating value, MJ/kg
//!
//! ## References
//!
//! - D.I. Mendeleev's formula for the lower heating value of solid fuel
//! - Latent heat correction 0.025 MJ/kg per percent of moisture

use super::guard::{checked_div, finite};
use crate::errors::CalcResult;

/// Heat of vaporization correction, MJ/kg per percent of moisture
pub const MOISTURE_HEAT_CORRECTION: f64 = 0.025;

/// Working → dry mass coefficient
///
/// # Formula
/// - K_WD = 100 / (100 - W)
pub fn dry_basis_coefficient(moisture: f64) -> CalcResult<f64> {
    checked_div("krs", 100.0, 100.0 - moisture)
}

/// Working → combustible mass coefficient
///
/// # Formula
/// - K_WC = 100 / (100 - W - A)
pub fn combustible_basis_coefficient(moisture: f64, ash: f64) -> CalcResult<f64> {
    checked_div("krg", 100.0, 100.0 - moisture - ash)
}

/// Combustible → working mass coefficient for fuel oil, where ash is given
/// on the dry basis
///
/// # Formula
/// - K = (100 - W - A) / 100
pub fn combustible_to_working_coefficient(moisture: f64, ash: f64) -> f64 {
    (100.0 - moisture - ash) / 100.0
}

/// Lower heating value of the working mass, MJ/kg (Mendeleev)
///
/// # Formula
/// - Q = (339·C + 1030·H − 108.8·(O − S) − 25·W) / 1000
pub fn mendeleev_lower_heating_value(carbon: f64, hydrogen: f64, oxygen: f64, sulfur: f64, moisture: f64) -> f64 {
    (339.0 * carbon + 1030.0 * hydrogen - 108.8 * (oxygen - sulfur) - 25.0 * moisture) / 1000.0
}

/// Recalculate a working-mass heating value to another basis
///
/// # Formula
/// - Q_basis = (Q_working + 0.025·W) · K
pub fn heating_value_on_basis(quantity: &str, working_value: f64, moisture: f64, coefficient: f64) -> CalcResult<f64> {
    finite(quantity, (working_value + MOISTURE_HEAT_CORRECTION * moisture) * coefficient)
}

/// Recalculate a combustible-mass heating value to the working mass
///
/// # Formula
/// - Q_working = Q_combustible · K − 0.025·W
pub fn working_heating_value(combustible_value: f64, moisture: f64, coefficient: f64) -> f64 {
    combustible_value * coefficient - MOISTURE_HEAT_CORRECTION * moisture
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_dry_basis_coefficient() {
        let k = dry_basis_coefficient(32.0).unwrap();
        assert!(approx_eq(k, 100.0 / 68.0), "K = {}", k);
    }

    #[test]
    fn test_combustible_coefficient_all_moisture_and_ash() {
        // Nothing combustible left: coefficient is undefined
        assert!(combustible_basis_coefficient(60.0, 40.0).is_err());
    }

    #[test]
    fn test_mendeleev() {
        let q = mendeleev_lower_heating_value(48.7, 3.5, 5.5, 1.2, 32.0);
        assert!(approx_eq(q, 18.84646), "Q = {}", q);
    }

    #[test]
    fn test_working_heating_value_fuel_oil() {
        let k = combustible_to_working_coefficient(2.0, 0.15);
        let q = working_heating_value(40.4, 2.0, k);
        assert!(approx_eq(q, 39.4814), "Q = {}", q);
    }
}
