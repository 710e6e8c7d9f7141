//! # Solid Particle Emissions
//!
//! Emission index of solid particles (fly ash and unburned carbon) for a
//! boiler burning solid fuel, and the gross emission for a given fuel
//! consumption.
//!
//! ## Formulas
//!
//! - k = 10⁶ / Q · a_vun · A / (100 − Γ_vun) · (1 − η_zu) + k_s, g/GJ
//! - E = 10⁻⁶ · k · Q · B, t

use serde::{Deserialize, Serialize};

use super::FieldSpec;
use crate::equations::{checked_div, finite};
use crate::errors::CalcResult;
use crate::validation::{require_fraction, require_non_negative, require_percentage, require_positive, FieldBag};

/// Fuel and boiler parameters for the emission estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "Q_i_r": 20.47, "a_vun": 0.8, "A_r": 25.2, "G_vun": 1.5,
///   "eta_z_y": 0.985, "k_tv_s": 0, "B": 1096363
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionInput {
    /// Lower heating value of the working mass, MJ/kg
    #[serde(rename = "Q_i_r")]
    pub heating_value: f64,

    /// Share of ash carried away with flue gas
    #[serde(rename = "a_vun")]
    pub fly_ash_fraction: f64,

    /// Ash content of the working mass, %
    #[serde(rename = "A_r")]
    pub ash_content: f64,

    /// Combustibles in the fly ash, %
    #[serde(rename = "G_vun")]
    pub fly_ash_combustibles: f64,

    /// Ash collector efficiency
    #[serde(rename = "eta_z_y")]
    pub collector_efficiency: f64,

    /// Particle emission index from sulfur capture sorbent, g/GJ
    #[serde(rename = "k_tv_s")]
    pub sorbent_index: f64,

    /// Fuel burned, t
    #[serde(rename = "B")]
    pub fuel_mass: f64,
}

impl EmissionInput {
    /// Form fields, in display order
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("Q_i_r", "Lower heating value", "MJ/kg"),
        FieldSpec::new("a_vun", "Fly ash fraction", ""),
        FieldSpec::new("A_r", "Ash content", "%"),
        FieldSpec::new("G_vun", "Combustibles in fly ash", "%"),
        FieldSpec::new("eta_z_y", "Ash collector efficiency", ""),
        FieldSpec::new("k_tv_s", "Sorbent particle index", "g/GJ"),
        FieldSpec::new("B", "Fuel burned", "t"),
    ];

    /// Read the fields from a raw form payload.
    pub fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        Ok(Self {
            heating_value: bag.require_number("Q_i_r")?,
            fly_ash_fraction: bag.require_number("a_vun")?,
            ash_content: bag.require_number("A_r")?,
            fly_ash_combustibles: bag.require_number("G_vun")?,
            collector_efficiency: bag.require_number("eta_z_y")?,
            sorbent_index: bag.require_number("k_tv_s")?,
            fuel_mass: bag.require_number("B")?,
        })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("Q_i_r", self.heating_value)?;
        require_fraction("a_vun", self.fly_ash_fraction)?;
        require_percentage("A_r", self.ash_content)?;
        require_percentage("G_vun", self.fly_ash_combustibles)?;
        require_fraction("eta_z_y", self.collector_efficiency)?;
        require_non_negative("k_tv_s", self.sorbent_index)?;
        require_non_negative("B", self.fuel_mass)?;
        Ok(())
    }
}

/// Emission results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    /// Solid particle emission index, g/GJ
    #[serde(rename = "emissionIndex")]
    pub emission_index: f64,

    /// Gross solid particle emission, t
    #[serde(rename = "grossEmission")]
    pub gross_emission: f64,
}

/// Calculate the emission index and gross emission.
pub fn calculate(input: &EmissionInput) -> CalcResult<EmissionResult> {
    input.validate()?;

    let per_heat = checked_div("emissionIndex", 1e6, input.heating_value)?;
    let ash_share = checked_div(
        "emissionIndex",
        input.ash_content,
        100.0 - input.fly_ash_combustibles,
    )?;
    let emission_index = finite(
        "emissionIndex",
        per_heat * (input.fly_ash_fraction * ash_share * (1.0 - input.collector_efficiency))
            + input.sorbent_index,
    )?;

    let gross_emission = finite(
        "grossEmission",
        1e-6 * emission_index * input.heating_value * input.fuel_mass,
    )?;

    Ok(EmissionResult {
        emission_index,
        gross_emission,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coal() -> EmissionInput {
        EmissionInput {
            heating_value: 20.47,
            fly_ash_fraction: 0.8,
            ash_content: 25.2,
            fly_ash_combustibles: 1.5,
            collector_efficiency: 0.985,
            sorbent_index: 0.0,
            fuel_mass: 1_096_363.0,
        }
    }

    #[test]
    fn test_coal_emission_index() {
        let result = calculate(&coal()).unwrap();
        assert!(
            (result.emission_index - 149.97805380661077).abs() < 1e-8,
            "k = {}",
            result.emission_index
        );
    }

    #[test]
    fn test_coal_gross_emission() {
        let result = calculate(&coal()).unwrap();
        assert!(
            (result.gross_emission - 3365.890062944165).abs() < 1e-6,
            "E = {}",
            result.gross_emission
        );
    }

    #[test]
    fn test_perfect_collector_leaves_sorbent_only() {
        let mut input = coal();
        input.collector_efficiency = 1.0;
        input.sorbent_index = 12.5;
        let result = calculate(&input).unwrap();
        assert!((result.emission_index - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_combustible_fly_ash_fails() {
        let mut input = coal();
        input.fly_ash_combustibles = 100.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "COMPUTATION_FAILED");
    }

    #[test]
    fn test_zero_heating_value_rejected() {
        let mut input = coal();
        input.heating_value = 0.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
