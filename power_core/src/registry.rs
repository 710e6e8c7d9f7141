//! # Calculator Registry and Dispatch
//!
//! Maps a calculator identifier (project number + per-project slug) to its
//! calculator, parses the raw payload, runs it, and wraps the result.
//!
//! | Project | Slug | Calculator |
//! |---|---|---|
//! | 1 | 1 | Solid fuel composition |
//! | 1 | 2 | Fuel oil composition |
//! | 2 | 1 | Solid particle emissions |
//! | 3 | 1 | Imbalance penalty |
//! | 4 | 1 | Cable selection |
//! | 4 | 2 | Fault current at the 10 kV bus |
//! | 4 | 3 | 110/10 kV network faults |
//! | 5 | 1 | Reliability comparison |
//! | 5 | 2 | Outage losses |
//! | 6 | 1 | Electrical load |
//!
//! ## Example
//!
//! ```rust
//! use power_core::{evaluate, EvaluationOptions};
//! use serde_json::json;
//!
//! let payload = json!({ "Ucn": 10.5, "Sk": 200, "UkPerc": 10.5, "SNomT": 6.3 });
//! let response = evaluate(4, "2", &payload, &EvaluationOptions::default()).unwrap();
//! assert_eq!(response.calculator, "fault_current");
//! assert!((response.result["Ip0"].as_f64().unwrap() - 2.54).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::calculations::{
    conductor_sizing::ConductorSizingInput, electrical_load::ElectricalLoadInput,
    emissions::EmissionInput, fault_current::FaultCurrentInput,
    fuel_composition::FuelCompositionInput, fuel_oil::FuelOilInput,
    imbalance_penalty::PenaltyInput, network_fault::NetworkFaultInput,
    outage_losses::OutageLossInput, reliability::ReliabilityInput, CalculationItem, FieldSpec,
};
use crate::errors::{CalcError, CalcResult};
use crate::format::{round_value, Response, MAX_PRECISION};
use crate::validation::{FieldBag, DEFAULT_CLOSURE_TOLERANCE};

/// Display precision used by most calculators, decimals
pub const DEFAULT_PRECISION: u32 = 2;

/// Every calculator the engine serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Calculator {
    FuelComposition,
    FuelOil,
    Emissions,
    ImbalancePenalty,
    ConductorSizing,
    FaultCurrent,
    NetworkFault,
    Reliability,
    OutageLosses,
    ElectricalLoad,
}

impl Calculator {
    /// All calculators, in project order
    pub const ALL: [Calculator; 10] = [
        Calculator::FuelComposition,
        Calculator::FuelOil,
        Calculator::Emissions,
        Calculator::ImbalancePenalty,
        Calculator::ConductorSizing,
        Calculator::FaultCurrent,
        Calculator::NetworkFault,
        Calculator::Reliability,
        Calculator::OutageLosses,
        Calculator::ElectricalLoad,
    ];

    /// Look up a calculator by identifier
    pub fn resolve(project: u8, slug: &str) -> CalcResult<Self> {
        let slug = slug.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.project() == project && c.slug() == slug)
            .ok_or_else(|| CalcError::calculator_not_found(project, slug))
    }

    /// Project (coursework assignment) number
    pub fn project(&self) -> u8 {
        match self {
            Calculator::FuelComposition | Calculator::FuelOil => 1,
            Calculator::Emissions => 2,
            Calculator::ImbalancePenalty => 3,
            Calculator::ConductorSizing | Calculator::FaultCurrent | Calculator::NetworkFault => 4,
            Calculator::Reliability | Calculator::OutageLosses => 5,
            Calculator::ElectricalLoad => 6,
        }
    }

    /// Calculator slug within its project
    pub fn slug(&self) -> &'static str {
        match self {
            Calculator::FuelComposition
            | Calculator::Emissions
            | Calculator::ImbalancePenalty
            | Calculator::ConductorSizing
            | Calculator::Reliability
            | Calculator::ElectricalLoad => "1",
            Calculator::FuelOil | Calculator::FaultCurrent | Calculator::OutageLosses => "2",
            Calculator::NetworkFault => "3",
        }
    }

    /// Stable snake_case identifier
    pub fn name(&self) -> &'static str {
        match self {
            Calculator::FuelComposition => "fuel_composition",
            Calculator::FuelOil => "fuel_oil",
            Calculator::Emissions => "emissions",
            Calculator::ImbalancePenalty => "imbalance_penalty",
            Calculator::ConductorSizing => "conductor_sizing",
            Calculator::FaultCurrent => "fault_current",
            Calculator::NetworkFault => "network_fault",
            Calculator::Reliability => "reliability",
            Calculator::OutageLosses => "outage_losses",
            Calculator::ElectricalLoad => "electrical_load",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Calculator::FuelComposition => "Solid fuel composition",
            Calculator::FuelOil => "Fuel oil composition",
            Calculator::Emissions => "Solid particle emissions",
            Calculator::ImbalancePenalty => "Imbalance penalty",
            Calculator::ConductorSizing => "Cable selection",
            Calculator::FaultCurrent => "Fault current at the 10 kV bus",
            Calculator::NetworkFault => "110/10 kV network faults",
            Calculator::Reliability => "Single vs double circuit reliability",
            Calculator::OutageLosses => "Outage losses",
            Calculator::ElectricalLoad => "Workshop electrical load",
        }
    }

    /// Top-level input fields
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Calculator::FuelComposition => FuelCompositionInput::FIELDS,
            Calculator::FuelOil => FuelOilInput::FIELDS,
            Calculator::Emissions => EmissionInput::FIELDS,
            Calculator::ImbalancePenalty => PenaltyInput::FIELDS,
            Calculator::ConductorSizing => ConductorSizingInput::FIELDS,
            Calculator::FaultCurrent => FaultCurrentInput::FIELDS,
            Calculator::NetworkFault => NetworkFaultInput::FIELDS,
            Calculator::Reliability => ReliabilityInput::FIELDS,
            Calculator::OutageLosses => OutageLossInput::FIELDS,
            Calculator::ElectricalLoad => ElectricalLoadInput::FIELDS,
        }
    }

    /// True when every field is a scalar, so the form can be entered field
    /// by field
    pub fn is_flat(&self) -> bool {
        !matches!(self, Calculator::Reliability | Calculator::ElectricalLoad)
    }

    /// Decimals shown by default
    pub fn default_precision(&self) -> u32 {
        match self {
            Calculator::ImbalancePenalty => 1,
            Calculator::Reliability | Calculator::ElectricalLoad => 5,
            _ => DEFAULT_PRECISION,
        }
    }

    /// Parse a raw payload into this calculator's typed input
    pub fn parse(&self, payload: &Value) -> CalcResult<CalculationItem> {
        let bag = FieldBag::from_value(payload)?;
        Ok(match self {
            Calculator::FuelComposition => {
                CalculationItem::FuelComposition(FuelCompositionInput::from_fields(&bag)?)
            }
            Calculator::FuelOil => CalculationItem::FuelOil(FuelOilInput::from_fields(&bag)?),
            Calculator::Emissions => CalculationItem::Emissions(EmissionInput::from_fields(&bag)?),
            Calculator::ImbalancePenalty => {
                CalculationItem::ImbalancePenalty(PenaltyInput::from_fields(&bag)?)
            }
            Calculator::ConductorSizing => {
                CalculationItem::ConductorSizing(ConductorSizingInput::from_fields(&bag)?)
            }
            Calculator::FaultCurrent => {
                CalculationItem::FaultCurrent(FaultCurrentInput::from_fields(&bag)?)
            }
            Calculator::NetworkFault => {
                CalculationItem::NetworkFault(NetworkFaultInput::from_fields(&bag)?)
            }
            Calculator::Reliability => {
                CalculationItem::Reliability(ReliabilityInput::from_fields(&bag)?)
            }
            Calculator::OutageLosses => {
                CalculationItem::OutageLosses(OutageLossInput::from_fields(&bag)?)
            }
            Calculator::ElectricalLoad => {
                CalculationItem::ElectricalLoad(ElectricalLoadInput::from_fields(&bag)?)
            }
        })
    }
}

impl std::fmt::Display for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Per-request options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOptions {
    /// Allowed deviation of composition sums from 100 %
    pub closure_tolerance: f64,
    /// Decimals in the response, at most [`MAX_PRECISION`]; `None` uses the
    /// calculator default. Rounding applies to the response only.
    pub precision: Option<u32>,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            closure_tolerance: DEFAULT_CLOSURE_TOLERANCE,
            precision: None,
        }
    }
}

impl EvaluationOptions {
    /// Exact closure sums, as in strict mode
    pub fn strict() -> Self {
        Self {
            closure_tolerance: 0.0,
            ..Self::default()
        }
    }
}

/// Evaluate one request end to end: resolve, validate, compute, format.
pub fn evaluate(project: u8, slug: &str, payload: &Value, options: &EvaluationOptions) -> CalcResult<Response> {
    if let Some(precision) = options.precision.filter(|p| *p > MAX_PRECISION) {
        let err = CalcError::invalid_input(
            "precision",
            precision.to_string(),
            format!("At most {} decimals", MAX_PRECISION),
        );
        warn!(project, slug, "{}", err);
        return Err(err);
    }

    let calculator = Calculator::resolve(project, slug).inspect_err(|err| {
        warn!(project, slug, "{}", err);
    })?;
    debug!(calculator = calculator.name(), "resolved calculator");

    let item = calculator.parse(payload).inspect_err(|err| {
        warn!(calculator = calculator.name(), code = err.error_code(), "{}", err);
    })?;

    let output = item.calculate(options.closure_tolerance).inspect_err(|err| {
        warn!(calculator = calculator.name(), code = err.error_code(), "{}", err);
    })?;

    let precision = options.precision.unwrap_or_else(|| calculator.default_precision());
    let result = round_value(serde_json::to_value(&output)?, precision);
    debug!(calculator = calculator.name(), precision, "evaluation complete");

    Ok(Response {
        calculator: calculator.name().to_string(),
        project: calculator.project(),
        slug: calculator.slug().to_string(),
        result,
    })
}
