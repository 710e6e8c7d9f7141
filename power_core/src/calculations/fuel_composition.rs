//! # Solid Fuel Composition
//!
//! Recalculates an as-received (working) solid fuel composition to the dry
//! and combustible mass bases and estimates the lower heating value on each
//! basis.
//!
//! ## Assumptions
//!
//! - The seven working-mass components (H, C, S, N, O, moisture, ash) add up
//!   to 100 %
//! - Lower heating value by Mendeleev's formula, MJ/kg
//!
//! ## Example
//!
//! ```rust
//! use power_core::calculations::fuel_composition::{calculate, FuelCompositionInput};
//!
//! let input = FuelCompositionInput {
//!     hydrogen: 3.5,
//!     carbon: 48.7,
//!     sulfur: 1.2,
//!     nitrogen: 1.1,
//!     oxygen: 5.5,
//!     moisture: 32.0,
//!     ash: 8.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.dry_coefficient - 1.4706).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};

use super::FieldSpec;
use crate::equations::fuel::{
    combustible_basis_coefficient, dry_basis_coefficient, heating_value_on_basis,
    mendeleev_lower_heating_value,
};
use crate::equations::finite;
use crate::errors::CalcResult;
use crate::validation::{check_closure_sum, require_percentage, FieldBag, DEFAULT_CLOSURE_TOLERANCE};

/// Working-mass composition of a solid fuel, %.
///
/// ## JSON Example
///
/// ```json
/// { "hp": 3.5, "cp": 48.7, "sp": 1.2, "np": 1.1, "op": 5.5, "wp": 32, "ap": 8 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCompositionInput {
    #[serde(rename = "hp")]
    pub hydrogen: f64,
    #[serde(rename = "cp")]
    pub carbon: f64,
    #[serde(rename = "sp")]
    pub sulfur: f64,
    #[serde(rename = "np")]
    pub nitrogen: f64,
    #[serde(rename = "op")]
    pub oxygen: f64,
    /// Moisture W
    #[serde(rename = "wp")]
    pub moisture: f64,
    /// Ash A
    #[serde(rename = "ap")]
    pub ash: f64,
}

impl FuelCompositionInput {
    /// Form fields, in display order
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("hp", "Hydrogen H", "%"),
        FieldSpec::new("cp", "Carbon C", "%"),
        FieldSpec::new("sp", "Sulfur S", "%"),
        FieldSpec::new("np", "Nitrogen N", "%"),
        FieldSpec::new("op", "Oxygen O", "%"),
        FieldSpec::new("wp", "Moisture W", "%"),
        FieldSpec::new("ap", "Ash A", "%"),
    ];

    /// Read the fields from a raw form payload.
    pub fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        Ok(Self {
            hydrogen: bag.require_number("hp")?,
            carbon: bag.require_number("cp")?,
            sulfur: bag.require_number("sp")?,
            nitrogen: bag.require_number("np")?,
            oxygen: bag.require_number("op")?,
            moisture: bag.require_number("wp")?,
            ash: bag.require_number("ap")?,
        })
    }

    fn components(&self) -> [(&'static str, f64); 7] {
        [
            ("hp", self.hydrogen),
            ("cp", self.carbon),
            ("sp", self.sulfur),
            ("np", self.nitrogen),
            ("op", self.oxygen),
            ("wp", self.moisture),
            ("ap", self.ash),
        ]
    }

    /// Validate with the default closure tolerance.
    pub fn validate(&self) -> CalcResult<()> {
        self.validate_with_tolerance(DEFAULT_CLOSURE_TOLERANCE)
    }

    /// Validate; the components must add up to 100 within `tolerance`.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> CalcResult<()> {
        let components = self.components();
        for (field, value) in components {
            require_percentage(field, value)?;
        }
        check_closure_sum(&components, 100.0, tolerance)?;
        Ok(())
    }
}

/// Dry-mass composition, %
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DryMassComposition {
    #[serde(rename = "hp")]
    pub hydrogen: f64,
    #[serde(rename = "cp")]
    pub carbon: f64,
    #[serde(rename = "sp")]
    pub sulfur: f64,
    #[serde(rename = "np")]
    pub nitrogen: f64,
    #[serde(rename = "op")]
    pub oxygen: f64,
    #[serde(rename = "ap")]
    pub ash: f64,
}

impl DryMassComposition {
    /// Sum of all components (100 for a closed working composition)
    pub fn total(&self) -> f64 {
        self.hydrogen + self.carbon + self.sulfur + self.nitrogen + self.oxygen + self.ash
    }
}

/// Combustible-mass composition, %
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombustibleMassComposition {
    #[serde(rename = "hp")]
    pub hydrogen: f64,
    #[serde(rename = "cp")]
    pub carbon: f64,
    #[serde(rename = "sp")]
    pub sulfur: f64,
    #[serde(rename = "np")]
    pub nitrogen: f64,
    #[serde(rename = "op")]
    pub oxygen: f64,
}

impl CombustibleMassComposition {
    /// Sum of all components (100 for a closed working composition)
    pub fn total(&self) -> f64 {
        self.hydrogen + self.carbon + self.sulfur + self.nitrogen + self.oxygen
    }
}

/// Results of the basis recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCompositionResult {
    /// Working → dry coefficient
    #[serde(rename = "krs")]
    pub dry_coefficient: f64,

    /// Working → combustible coefficient
    #[serde(rename = "krg")]
    pub combustible_coefficient: f64,

    #[serde(rename = "dryMassComposition")]
    pub dry_mass: DryMassComposition,

    #[serde(rename = "combustibleMassComposition")]
    pub combustible_mass: CombustibleMassComposition,

    /// Lower heating value of the working mass, MJ/kg
    #[serde(rename = "qph")]
    pub working_heating_value: f64,

    /// Lower heating value of the dry mass, MJ/kg
    #[serde(rename = "qch")]
    pub dry_heating_value: f64,

    /// Lower heating value of the combustible mass, MJ/kg
    #[serde(rename = "qgh")]
    pub combustible_heating_value: f64,
}

/// Recalculate the composition and heating values.
pub fn calculate(input: &FuelCompositionInput) -> CalcResult<FuelCompositionResult> {
    calculate_with_tolerance(input, DEFAULT_CLOSURE_TOLERANCE)
}

/// [`calculate`] with an explicit closure-sum tolerance (`0.0` for exact).
pub fn calculate_with_tolerance(input: &FuelCompositionInput, tolerance: f64) -> CalcResult<FuelCompositionResult> {
    input.validate_with_tolerance(tolerance)?;

    let krs = dry_basis_coefficient(input.moisture)?;
    let krg = combustible_basis_coefficient(input.moisture, input.ash)?;

    let dry_mass = DryMassComposition {
        hydrogen: input.hydrogen * krs,
        carbon: input.carbon * krs,
        sulfur: input.sulfur * krs,
        nitrogen: input.nitrogen * krs,
        oxygen: input.oxygen * krs,
        ash: input.ash * krs,
    };

    let combustible_mass = CombustibleMassComposition {
        hydrogen: input.hydrogen * krg,
        carbon: input.carbon * krg,
        sulfur: input.sulfur * krg,
        nitrogen: input.nitrogen * krg,
        oxygen: input.oxygen * krg,
    };

    let qph = finite(
        "qph",
        mendeleev_lower_heating_value(
            input.carbon,
            input.hydrogen,
            input.oxygen,
            input.sulfur,
            input.moisture,
        ),
    )?;
    let qch = heating_value_on_basis("qch", qph, input.moisture, krs)?;
    let qgh = heating_value_on_basis("qgh", qph, input.moisture, krg)?;

    Ok(FuelCompositionResult {
        dry_coefficient: krs,
        combustible_coefficient: krg,
        dry_mass,
        combustible_mass,
        working_heating_value: qph,
        dry_heating_value: qch,
        combustible_heating_value: qgh,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn test_fuel() -> FuelCompositionInput {
        FuelCompositionInput {
            hydrogen: 3.5,
            carbon: 48.7,
            sulfur: 1.2,
            nitrogen: 1.1,
            oxygen: 5.5,
            moisture: 32.0,
            ash: 8.0,
        }
    }

    #[test]
    fn test_basis_coefficients() {
        let result = calculate(&test_fuel()).unwrap();
        assert!(approx_eq(result.dry_coefficient, 100.0 / 68.0, 1e-12));
        assert!(approx_eq(result.combustible_coefficient, 100.0 / 60.0, 1e-12));
        assert!(approx_eq(result.dry_coefficient, 1.4706, 1e-4));
        assert!(approx_eq(result.combustible_coefficient, 1.6667, 1e-4));
    }

    #[test]
    fn test_dry_ash() {
        let result = calculate(&test_fuel()).unwrap();
        assert!(approx_eq(result.dry_mass.ash, 11.7647, 1e-4), "A_dry = {}", result.dry_mass.ash);
    }

    #[test]
    fn test_compositions_close_to_hundred() {
        let result = calculate(&test_fuel()).unwrap();
        assert!(approx_eq(result.dry_mass.total(), 100.0, 1e-6));
        assert!(approx_eq(result.combustible_mass.total(), 100.0, 1e-6));
    }

    #[test]
    fn test_heating_values() {
        let result = calculate(&test_fuel()).unwrap();
        assert!(approx_eq(result.working_heating_value, 18.84646, 1e-9));
        assert!(approx_eq(result.dry_heating_value, 28.891852941176474, 1e-9));
        assert!(approx_eq(result.combustible_heating_value, 32.7441, 1e-9));
    }

    #[test]
    fn test_pure_function() {
        let a = calculate(&test_fuel()).unwrap();
        let b = calculate(&test_fuel()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.working_heating_value.to_bits(), b.working_heating_value.to_bits());
    }

    #[test]
    fn test_rejects_open_composition() {
        let mut fuel = test_fuel();
        fuel.ash = 7.999;
        assert_eq!(calculate(&fuel).unwrap_err().error_code(), "CLOSURE_SUM");
        fuel.ash = 8.001;
        assert_eq!(calculate(&fuel).unwrap_err().error_code(), "CLOSURE_SUM");
    }

    #[test]
    fn test_exact_closure_mode() {
        let fuel = FuelCompositionInput {
            hydrogen: 3.4,
            carbon: 70.6,
            sulfur: 2.7,
            nitrogen: 1.2,
            oxygen: 1.9,
            moisture: 5.0,
            ash: 15.2,
        };
        assert!(calculate(&fuel).is_ok());
        let err = calculate_with_tolerance(&fuel, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "CLOSURE_SUM");
    }

    #[test]
    fn test_rejects_out_of_range_component() {
        let mut fuel = test_fuel();
        fuel.carbon = -1.0;
        fuel.moisture = 81.7;
        assert_eq!(calculate(&fuel).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_all_moisture_is_computation_error() {
        let fuel = FuelCompositionInput {
            hydrogen: 0.0,
            carbon: 0.0,
            sulfur: 0.0,
            nitrogen: 0.0,
            oxygen: 0.0,
            moisture: 100.0,
            ash: 0.0,
        };
        let err = calculate(&fuel).unwrap_err();
        assert_eq!(err.error_code(), "COMPUTATION_FAILED");
        assert!(err.to_string().contains("krs"));
    }
}
