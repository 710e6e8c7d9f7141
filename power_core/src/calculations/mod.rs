//! # Power Engineering Calculations
//!
//! One module per coursework calculator. Each follows the pattern:
//!
//! - `*Input` - Typed input, serialized under the form's wire names
//! - `*Input::from_fields` - Reads a raw [`FieldBag`](crate::validation::FieldBag)
//! - `*Input::validate` - Domain checks, run first by `calculate`
//! - `*Result` - Results, serialized under the response's wire names
//! - `calculate(input) -> CalcResult<*Result>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`fuel_composition`] - Solid fuel mass bases and heating values
//! - [`fuel_oil`] - Fuel oil combustible → working mass
//! - [`emissions`] - Solid particle emission index and gross emission
//! - [`imbalance_penalty`] - Solar plant revenue and imbalance fine
//! - [`conductor_sizing`] - Cable currents and cross-sections
//! - [`fault_current`] - Initial fault current at the 10 kV bus
//! - [`network_fault`] - Fault currents of a 110/10 kV network
//! - [`reliability`] - Single vs double circuit failure rates
//! - [`outage_losses`] - Undelivered energy and outage losses
//! - [`electrical_load`] - Group and workshop design loads

pub mod conductor_sizing;
pub mod electrical_load;
pub mod emissions;
pub mod fault_current;
pub mod fuel_composition;
pub mod fuel_oil;
pub mod imbalance_penalty;
pub mod network_fault;
pub mod outage_losses;
pub mod reliability;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

// Re-export commonly used types
pub use conductor_sizing::{ConductorSizingInput, ConductorSizingResult};
pub use electrical_load::{ElectricalLoadInput, ElectricalLoadResult};
pub use emissions::{EmissionInput, EmissionResult};
pub use fault_current::{FaultCurrentInput, FaultCurrentResult};
pub use fuel_composition::{FuelCompositionInput, FuelCompositionResult};
pub use fuel_oil::{FuelOilInput, FuelOilResult};
pub use imbalance_penalty::{PenaltyInput, PenaltyResult};
pub use network_fault::{NetworkFaultInput, NetworkFaultResult};
pub use outage_losses::{OutageLossInput, OutageLossResult};
pub use reliability::{ReliabilityInput, ReliabilityResult};

/// Describes one top-level input field of a calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Wire name in the request payload
    pub name: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Unit, empty when dimensionless
    pub unit: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, unit: &'static str) -> Self {
        Self { name, label, unit }
    }
}

/// Enum wrapper over all calculator inputs.
///
/// Lets the dispatcher hold any parsed request and serializes with a
/// `calculator` tag, so a stored request can be replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", content = "input", rename_all = "snake_case")]
pub enum CalculationItem {
    FuelComposition(FuelCompositionInput),
    FuelOil(FuelOilInput),
    Emissions(EmissionInput),
    ImbalancePenalty(PenaltyInput),
    ConductorSizing(ConductorSizingInput),
    FaultCurrent(FaultCurrentInput),
    NetworkFault(NetworkFaultInput),
    Reliability(ReliabilityInput),
    OutageLosses(OutageLossInput),
    ElectricalLoad(ElectricalLoadInput),
}

/// Enum wrapper over all calculator results; serializes as the bare result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationOutput {
    FuelComposition(FuelCompositionResult),
    FuelOil(FuelOilResult),
    Emissions(EmissionResult),
    ImbalancePenalty(PenaltyResult),
    ConductorSizing(ConductorSizingResult),
    FaultCurrent(FaultCurrentResult),
    NetworkFault(NetworkFaultResult),
    Reliability(ReliabilityResult),
    OutageLosses(OutageLossResult),
    ElectricalLoad(ElectricalLoadResult),
}

impl CalculationItem {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::FuelComposition(_) => "FuelComposition",
            CalculationItem::FuelOil(_) => "FuelOil",
            CalculationItem::Emissions(_) => "Emissions",
            CalculationItem::ImbalancePenalty(_) => "ImbalancePenalty",
            CalculationItem::ConductorSizing(_) => "ConductorSizing",
            CalculationItem::FaultCurrent(_) => "FaultCurrent",
            CalculationItem::NetworkFault(_) => "NetworkFault",
            CalculationItem::Reliability(_) => "Reliability",
            CalculationItem::OutageLosses(_) => "OutageLosses",
            CalculationItem::ElectricalLoad(_) => "ElectricalLoad",
        }
    }

    /// Run the wrapped calculation. `closure_tolerance` applies to
    /// composition closure sums only.
    pub fn calculate(&self, closure_tolerance: f64) -> CalcResult<CalculationOutput> {
        Ok(match self {
            CalculationItem::FuelComposition(input) => CalculationOutput::FuelComposition(
                fuel_composition::calculate_with_tolerance(input, closure_tolerance)?,
            ),
            CalculationItem::FuelOil(input) => CalculationOutput::FuelOil(fuel_oil::calculate(input)?),
            CalculationItem::Emissions(input) => CalculationOutput::Emissions(emissions::calculate(input)?),
            CalculationItem::ImbalancePenalty(input) => {
                CalculationOutput::ImbalancePenalty(imbalance_penalty::calculate(input)?)
            }
            CalculationItem::ConductorSizing(input) => {
                CalculationOutput::ConductorSizing(conductor_sizing::calculate(input)?)
            }
            CalculationItem::FaultCurrent(input) => {
                CalculationOutput::FaultCurrent(fault_current::calculate(input)?)
            }
            CalculationItem::NetworkFault(input) => {
                CalculationOutput::NetworkFault(network_fault::calculate(input)?)
            }
            CalculationItem::Reliability(input) => {
                CalculationOutput::Reliability(reliability::calculate(input)?)
            }
            CalculationItem::OutageLosses(input) => {
                CalculationOutput::OutageLosses(outage_losses::calculate(input)?)
            }
            CalculationItem::ElectricalLoad(input) => {
                CalculationOutput::ElectricalLoad(electrical_load::calculate(input)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::DEFAULT_CLOSURE_TOLERANCE;

    #[test]
    fn test_item_roundtrip_keeps_tag() {
        let item = CalculationItem::OutageLosses(OutageLossInput {
            omega: 0.01,
            restoration_time: 0.045,
            max_load: 5120.0,
            utilization_hours: 6451.0,
            planned_outage_coefficient: 0.004,
            emergency_loss_rate: 23.6,
            planned_loss_rate: 17.6,
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["calculator"], "outage_losses");
        assert_eq!(json["input"]["pM"], 5120.0);
        let back: CalculationItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_output_serializes_bare() {
        let item = CalculationItem::Emissions(EmissionInput {
            heating_value: 20.47,
            fly_ash_fraction: 0.8,
            ash_content: 25.2,
            fly_ash_combustibles: 1.5,
            collector_efficiency: 0.985,
            sorbent_index: 0.0,
            fuel_mass: 1_096_363.0,
        });
        let output = item.calculate(DEFAULT_CLOSURE_TOLERANCE).unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert!(json["emissionIndex"].is_number());
        assert_eq!(item.calc_type(), "Emissions");
    }
}
