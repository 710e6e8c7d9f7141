//! # Electrical Load Formulas
//!
//! Design load of a group of electrical receivers by the ordered-diagram
//! method: utilization coefficient, effective number of receivers, and
//! design active, reactive and apparent power.
//!
//! ## Notation
//!
//! - `n` = number of identical receivers in a row
//! - `P_n` = nominal power of one receiver, kW
//! - `K_v` = utilization coefficient
//! - `tg φ` = reactive power factor

use super::guard::{checked_div, checked_hypot};
use crate::errors::CalcResult;

/// Effective count at or below which the reactive load is increased
pub const SMALL_GROUP_SIZE: f64 = 10.0;

/// Reactive load factor for small groups
pub const SMALL_GROUP_REACTIVE_FACTOR: f64 = 1.1;

/// Running totals over a set of receivers
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadSums {
    /// Σ n·P_n, kW
    pub nominal: f64,
    /// Σ n·P_n·K_v, kW
    pub utilized: f64,
    /// Σ n·P_n·K_v·tg φ, kvar
    pub utilized_reactive: f64,
    /// Σ n·P_n², kW²
    pub nominal_squared: f64,
}

impl LoadSums {
    /// Add `quantity` receivers of one row
    pub fn add(&mut self, quantity: f64, nominal_power: f64, usage: f64, tg_phi: f64) {
        let row = quantity * nominal_power;
        self.nominal += row;
        self.utilized += row * usage;
        self.utilized_reactive += row * usage * tg_phi;
        self.nominal_squared += quantity * nominal_power * nominal_power;
    }

    /// Group utilization coefficient K_v = Σ n·P_n·K_v / Σ n·P_n
    pub fn utilization_coefficient(&self, quantity: &str) -> CalcResult<f64> {
        checked_div(quantity, self.utilized, self.nominal)
    }

    /// Effective number of receivers n_e = (Σ n·P_n)² / Σ n·P_n², unrounded
    pub fn effective_count(&self, quantity: &str) -> CalcResult<f64> {
        checked_div(quantity, self.nominal * self.nominal, self.nominal_squared)
    }
}

/// Reactive load factor: 1.1 for n_e ≤ 10, otherwise 1.0
#[inline]
pub fn reactive_load_factor(effective_count: f64) -> f64 {
    if effective_count <= SMALL_GROUP_SIZE {
        SMALL_GROUP_REACTIVE_FACTOR
    } else {
        1.0
    }
}

/// Apparent power S = √(P² + Q²)
pub fn apparent_power(quantity: &str, active: f64, reactive: f64) -> CalcResult<f64> {
    checked_hypot(quantity, active, reactive)
}

/// Rated current of one row: I = n·P_n / (√3 · U · cos φ · η)
pub fn rated_current(quantity: &str, row_power: f64, voltage_kv: f64, power_factor: f64, efficiency: f64) -> CalcResult<f64> {
    checked_div(
        quantity,
        row_power,
        3f64.sqrt() * voltage_kv * power_factor * efficiency,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_usage_gives_same_coefficient() {
        let mut sums = LoadSums::default();
        sums.add(3.0, 15.0, 0.4, 1.0);
        sums.add(1.0, 7.5, 0.4, 1.0);
        let kv = sums.utilization_coefficient("Kv").unwrap();
        assert!((kv - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_coefficient() {
        let mut sums = LoadSums::default();
        sums.add(1.0, 10.0, 0.5, 1.0);
        sums.add(1.0, 20.0, 0.25, 1.0);
        let kv = sums.utilization_coefficient("Kv").unwrap();
        assert!((kv - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_identical_receivers_effective_count() {
        let mut sums = LoadSums::default();
        sums.add(8.0, 11.0, 0.2, 1.0);
        let ne = sums.effective_count("ne").unwrap();
        assert!((ne - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_reactive_factor_boundary() {
        assert_eq!(reactive_load_factor(10.0), 1.1);
        assert_eq!(reactive_load_factor(11.0), 1.0);
    }

    #[test]
    fn test_rated_current() {
        let i = rated_current("I", 80.0, 0.38, 0.9, 0.92).unwrap();
        assert!((i - 146.79640711660966).abs() < 1e-9);
    }

    #[test]
    fn test_empty_sums_fail() {
        let sums = LoadSums::default();
        assert!(sums.utilization_coefficient("Kv").is_err());
    }
}
