//! # Fuel Oil Composition
//!
//! Recalculates a fuel oil composition given on the combustible mass to the
//! working mass, and the heating value with it.

use serde::{Deserialize, Serialize};

use super::FieldSpec;
use crate::equations::finite;
use crate::equations::fuel::{combustible_to_working_coefficient, working_heating_value};
use crate::errors::{CalcError, CalcResult};
use crate::validation::{require_non_negative, require_percentage, FieldBag};

/// Fuel oil composition.
///
/// ## JSON Example
///
/// ```json
/// { "h": 11.2, "c": 85.5, "s": 2.5, "o": 0.8, "w": 2, "a": 0.15, "v": 333.3, "qFO": 40.4 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelOilInput {
    /// Hydrogen, % of combustible mass
    #[serde(rename = "h")]
    pub hydrogen: f64,
    /// Carbon, % of combustible mass
    #[serde(rename = "c")]
    pub carbon: f64,
    /// Sulfur, % of combustible mass
    #[serde(rename = "s")]
    pub sulfur: f64,
    /// Oxygen, % of combustible mass
    #[serde(rename = "o")]
    pub oxygen: f64,
    /// Moisture, % of working mass
    #[serde(rename = "w")]
    pub moisture: f64,
    /// Ash, % of dry mass
    #[serde(rename = "a")]
    pub ash: f64,
    /// Vanadium, mg/kg of dry mass
    #[serde(rename = "v")]
    pub vanadium: f64,
    /// Lower heating value of the combustible mass, MJ/kg
    #[serde(rename = "qFO")]
    pub combustible_heating_value: f64,
}

impl FuelOilInput {
    /// Form fields, in display order
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("h", "Hydrogen H (combustible)", "%"),
        FieldSpec::new("c", "Carbon C (combustible)", "%"),
        FieldSpec::new("s", "Sulfur S (combustible)", "%"),
        FieldSpec::new("o", "Oxygen O (combustible)", "%"),
        FieldSpec::new("w", "Moisture W (working)", "%"),
        FieldSpec::new("a", "Ash A (dry)", "%"),
        FieldSpec::new("v", "Vanadium V", "mg/kg"),
        FieldSpec::new("qFO", "Lower heating value (combustible)", "MJ/kg"),
    ];

    /// Read the fields from a raw form payload.
    pub fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        Ok(Self {
            hydrogen: bag.require_number("h")?,
            carbon: bag.require_number("c")?,
            sulfur: bag.require_number("s")?,
            oxygen: bag.require_number("o")?,
            moisture: bag.require_number("w")?,
            ash: bag.require_number("a")?,
            vanadium: bag.require_number("v")?,
            combustible_heating_value: bag.require_number("qFO")?,
        })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("h", self.hydrogen),
            ("c", self.carbon),
            ("s", self.sulfur),
            ("o", self.oxygen),
            ("w", self.moisture),
            ("a", self.ash),
        ] {
            require_percentage(field, value)?;
        }
        if self.moisture + self.ash > 100.0 {
            return Err(CalcError::invalid_input(
                "w",
                self.moisture.to_string(),
                "Moisture and ash together exceed 100%",
            ));
        }
        require_non_negative("v", self.vanadium)?;
        require_non_negative("qFO", self.combustible_heating_value)?;
        Ok(())
    }
}

/// Working-mass composition, %; vanadium in mg/kg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingComposition {
    #[serde(rename = "CP")]
    pub carbon: f64,
    #[serde(rename = "HP")]
    pub hydrogen: f64,
    #[serde(rename = "SP")]
    pub sulfur: f64,
    #[serde(rename = "OP")]
    pub oxygen: f64,
    #[serde(rename = "AP")]
    pub ash: f64,
    #[serde(rename = "VP")]
    pub vanadium: f64,
}

/// Results of the fuel oil recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelOilResult {
    pub composition: WorkingComposition,
    /// Lower heating value of the working mass, MJ/kg
    #[serde(rename = "qR")]
    pub working_heating_value: f64,
}

/// Recalculate the fuel oil to the working mass.
pub fn calculate(input: &FuelOilInput) -> CalcResult<FuelOilResult> {
    input.validate()?;

    let k = combustible_to_working_coefficient(input.moisture, input.ash);

    let composition = WorkingComposition {
        carbon: input.carbon * k,
        hydrogen: input.hydrogen * k,
        sulfur: input.sulfur * k,
        oxygen: input.oxygen * k,
        // Ash is already on the dry basis and is reported as given
        ash: input.ash,
        vanadium: input.vanadium * (100.0 - input.moisture) / 100.0,
    };

    let q_r = finite(
        "qR",
        working_heating_value(input.combustible_heating_value, input.moisture, k),
    )?;

    Ok(FuelOilResult {
        composition,
        working_heating_value: q_r,
    })
}
