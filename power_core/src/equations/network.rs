//! # Network and Conductor Formulas
//!
//! Element reactances, fault currents and conductor cross-sections for
//! radial networks with one step-down transformer.
//!
//! ## Notation
//!
//! - `U` = line voltage, kV
//! - `S` = apparent power (MVA for the system and transformers, kVA for loads)
//! - `u_k` = transformer short-circuit voltage, %
//! - `R, X, Z` = resistance, reactance, impedance magnitude, Ω
//! - `I(3), I(2)` = three- and two-phase fault currents
//!
//! ## References
//!
//! - Method of named units for short-circuit calculations in networks above 1 kV
//! - Economic current density and thermal withstand criteria for conductor selection

use super::guard::{checked_div, checked_hypot, checked_sqrt};
use crate::errors::CalcResult;
use crate::units::{Amperes, KiloVoltAmperes, Kiloamperes, Kilovolts, MegaVoltAmperes, Ohms, SquareMillimeters};

// =============================================================================
// ELEMENT REACTANCES
// =============================================================================

/// Reactance of the supply system seen from a bus
///
/// # Formula
/// - X_c = U² / S_k
pub fn system_reactance(u: Kilovolts, short_circuit_power: MegaVoltAmperes) -> CalcResult<Ohms> {
    checked_div("Xc", u.0 * u.0, short_circuit_power.0).map(Ohms)
}

/// Transformer reactance referred to voltage `u`
///
/// # Formula
/// - X_t = u_k · U² / (100 · S_nom)
pub fn transformer_reactance(uk_percent: f64, u: Kilovolts, rating: MegaVoltAmperes) -> CalcResult<Ohms> {
    checked_div("Xt", uk_percent * u.0 * u.0, 100.0 * rating.0).map(Ohms)
}

/// Resistance or reactance of a line section
///
/// # Formula
/// - R_l = L · r₀ (likewise X_l = L · x₀)
#[inline]
pub fn line_parameter(length_km: f64, per_km: Ohms) -> Ohms {
    per_km * length_km
}

/// Impedance magnitude
///
/// # Formula
/// - Z = √(R² + X²)
pub fn impedance(quantity: &str, r: Ohms, x: Ohms) -> CalcResult<Ohms> {
    checked_hypot(quantity, r.0, x.0).map(Ohms)
}

/// Coefficient that refers impedances from the HV to the LV side
///
/// # Formula
/// - k_pr = U_lv² / U_hv²
pub fn transfer_coefficient(lv: Kilovolts, hv: Kilovolts) -> CalcResult<f64> {
    checked_div("kpr", lv.0 * lv.0, hv.0 * hv.0)
}

// =============================================================================
// FAULT CURRENTS
// =============================================================================

/// Three-phase fault current behind impedance `z`
///
/// # Formula
/// - I(3) = U · 1000 / (√3 · Z), A
pub fn three_phase_fault_current(quantity: &str, u: Kilovolts, z: Ohms) -> CalcResult<Amperes> {
    checked_div(quantity, u.0 * 1000.0, 3f64.sqrt() * z.0).map(Amperes)
}

/// Two-phase fault current from the three-phase value
///
/// # Formula
/// - I(2) = I(3) · √3 / 2
#[inline]
pub fn two_phase_fault_current(three_phase: Amperes) -> Amperes {
    three_phase * (3f64.sqrt() / 2.0)
}

/// Initial symmetrical fault current in kA behind reactance `x`
///
/// # Formula
/// - I_p0 = U / (√3 · X), kA
pub fn initial_fault_current(u: Kilovolts, x: Ohms) -> CalcResult<Kiloamperes> {
    three_phase_fault_current("Ip0", u, x).map(Kiloamperes::from)
}

// =============================================================================
// CONDUCTOR SELECTION
// =============================================================================

/// Load current of a three-phase connection
///
/// # Formula
/// - I = S / (√3 · U)
pub fn load_current(quantity: &str, s: KiloVoltAmperes, u: Kilovolts) -> CalcResult<Amperes> {
    checked_div(quantity, s.0, 3f64.sqrt() * u.0).map(Amperes)
}

/// Cross-section by economic current density
///
/// # Formula
/// - s_ek = I / j_ek
pub fn economic_section(current: Amperes, current_density: f64) -> CalcResult<SquareMillimeters> {
    checked_div("Sek", current.0, current_density).map(SquareMillimeters)
}

/// Minimum cross-section by thermal withstand of the fault current
///
/// # Formula
/// - s_min = I_k · √t_f / C_t, with I_k in A
pub fn thermal_minimum_section(fault: Kiloamperes, clearing_time_s: f64, thermal_coefficient: f64) -> CalcResult<SquareMillimeters> {
    let ik: Amperes = fault.into();
    let root_t = checked_sqrt("Smin", clearing_time_s)?;
    checked_div("Smin", ik.0 * root_t, thermal_coefficient).map(SquareMillimeters)
}
