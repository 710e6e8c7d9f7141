//! # Fault Current at the 10 kV Bus
//!
//! Initial three-phase fault current at the low-voltage bus of a step-down
//! substation, from the system short-circuit power and the transformer data.

use serde::{Deserialize, Serialize};

use super::FieldSpec;
use crate::equations::finite;
use crate::equations::network::{initial_fault_current, system_reactance, transformer_reactance};
use crate::errors::CalcResult;
use crate::units::{Kiloamperes, Kilovolts, MegaVoltAmperes, Ohms};
use crate::validation::{require_positive, require_percentage, FieldBag};

/// Bus and transformer data.
///
/// ## JSON Example
///
/// ```json
/// { "Ucn": 10.5, "Sk": 200, "UkPerc": 10.5, "SNomT": 6.3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultCurrentInput {
    /// Average rated voltage of the bus
    #[serde(rename = "Ucn")]
    pub bus_voltage: Kilovolts,

    /// System short-circuit power
    #[serde(rename = "Sk")]
    pub short_circuit_power: MegaVoltAmperes,

    /// Transformer short-circuit voltage, %
    #[serde(rename = "UkPerc")]
    pub uk_percent: f64,

    /// Transformer rating
    #[serde(rename = "SNomT")]
    pub transformer_rating: MegaVoltAmperes,
}

impl FaultCurrentInput {
    /// Form fields, in display order
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("Ucn", "Bus voltage", "kV"),
        FieldSpec::new("Sk", "System short-circuit power", "MVA"),
        FieldSpec::new("UkPerc", "Transformer short-circuit voltage", "%"),
        FieldSpec::new("SNomT", "Transformer rating", "MVA"),
    ];

    /// Read the fields from a raw form payload.
    pub fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        Ok(Self {
            bus_voltage: Kilovolts(bag.require_number("Ucn")?),
            short_circuit_power: MegaVoltAmperes(bag.require_number("Sk")?),
            uk_percent: bag.require_number("UkPerc")?,
            transformer_rating: MegaVoltAmperes(bag.require_number("SNomT")?),
        })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("Ucn", self.bus_voltage.0)?;
        require_positive("Sk", self.short_circuit_power.0)?;
        require_percentage("UkPerc", self.uk_percent)?;
        require_positive("SNomT", self.transformer_rating.0)?;
        Ok(())
    }
}

/// Reactances and fault current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultCurrentResult {
    /// System reactance
    #[serde(rename = "Xc")]
    pub system_reactance: Ohms,

    /// Transformer reactance
    #[serde(rename = "Xt")]
    pub transformer_reactance: Ohms,

    /// Total reactance to the fault
    #[serde(rename = "XSum")]
    pub total_reactance: Ohms,

    /// Initial three-phase fault current
    #[serde(rename = "Ip0")]
    pub initial_current: Kiloamperes,
}

/// Calculate the initial fault current.
pub fn calculate(input: &FaultCurrentInput) -> CalcResult<FaultCurrentResult> {
    input.validate()?;

    let xc = system_reactance(input.bus_voltage, input.short_circuit_power)?;
    let xt = transformer_reactance(input.uk_percent, input.bus_voltage, input.transformer_rating)?;
    let x_sum = Ohms(finite("XSum", (xc + xt).0)?);
    let ip0 = initial_fault_current(input.bus_voltage, x_sum)?;

    Ok(FaultCurrentResult {
        system_reactance: xc,
        transformer_reactance: xt,
        total_reactance: x_sum,
        initial_current: ip0,
    })
}
