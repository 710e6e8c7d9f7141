//! # Supply Reliability: Single vs Double Circuit
//!
//! Compares the failure rate of a single-circuit supply built from a set of
//! series elements with a double-circuit supply of the same elements, with
//! and without a sectional breaker.
//!
//! ## Formulas
//!
//! - ω_oc = Σ nᵢ·ωᵢ
//! - t_v,oc = Σ nᵢ·ωᵢ·t_v,i / ω_oc
//! - k_a,oc = ω_oc · t_v,oc / 8760
//! - k_p,os = 1.2 · t_p,max / 8760
//! - ω_dk = 2 · ω_oc · (k_a,oc + k_p,os)
//! - ω_ds = ω_dk + ω_sv

use serde::{Deserialize, Serialize};

use super::FieldSpec;
use crate::catalog::EquipmentClass;
use crate::equations::{checked_div, finite};
use crate::errors::{CalcError, CalcResult};
use crate::validation::FieldBag;

/// Hours per year
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Planned outage factor applied to the longest planned outage
pub const PLANNED_OUTAGE_FACTOR: f64 = 1.2;

/// Longest planned outage in the chain (110 kV transformer), h
pub const PLANNED_OUTAGE_HOURS: f64 = 43.0;

/// Failure rate of the 10 kV sectional breaker, 1/yr
pub const SECTIONAL_BREAKER_FAILURE_RATE: f64 = 0.02;

/// Equipment amounts of one supply circuit.
///
/// ## JSON Example
///
/// ```json
/// { "amounts": { "OHL-110": 10, "T-110": 1, "CB-110-SF6": 1, "CB-10-OIL": 1, "BUS-10": 6 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityInput {
    /// Count (or length in km for lines) per class, in catalog order
    pub amounts: Vec<(EquipmentClass, u32)>,
}

impl ReliabilityInput {
    /// Keys of `amounts` are the catalog codes (or labels) of [`EquipmentClass`]
    pub const FIELDS: &'static [FieldSpec] = &[FieldSpec::new("amounts", "Equipment amounts by class", "")];

    /// Read the fields from a raw form payload.
    pub fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        let amounts_bag = bag.require_object("amounts")?;
        let mut amounts = Vec::new();
        for (key, count) in amounts_bag.counts()? {
            let class = EquipmentClass::from_str_flexible(key)
                .ok_or_else(|| CalcError::unknown_category(amounts_bag.field_path(key), key))?;
            amounts.push((class, count));
        }
        amounts.sort_by_key(|(class, _)| *class);
        Ok(Self { amounts })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for window in self.amounts.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(CalcError::invalid_input(
                    "amounts",
                    window[0].0.code(),
                    "Class given more than once",
                ));
            }
        }
        Ok(())
    }
}

/// Share of one class in the circuit failure rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassContribution {
    pub class: EquipmentClass,
    pub amount: u32,
    /// n·ω, 1/yr
    #[serde(rename = "failureRate")]
    pub failure_rate: f64,
    /// n·ω·t_v, h/yr
    #[serde(rename = "downtime")]
    pub downtime: f64,
}

/// Reliability comparison results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityResult {
    /// Single-circuit failure rate, 1/yr
    #[serde(rename = "wOc")]
    pub single_failure_rate: f64,

    /// Mean restoration time, h
    #[serde(rename = "tVOc")]
    pub mean_restoration_hours: f64,

    /// Emergency outage coefficient
    #[serde(rename = "kAOc")]
    pub emergency_outage_coefficient: f64,

    /// Planned outage coefficient
    #[serde(rename = "kPOs")]
    pub planned_outage_coefficient: f64,

    /// Double-circuit failure rate, 1/yr
    #[serde(rename = "wDk")]
    pub double_failure_rate: f64,

    /// Double circuit with sectional breaker, 1/yr
    #[serde(rename = "wDs")]
    pub double_with_breaker_failure_rate: f64,

    pub contributions: Vec<ClassContribution>,
}

/// Compare single- and double-circuit reliability.
pub fn calculate(input: &ReliabilityInput) -> CalcResult<ReliabilityResult> {
    input.validate()?;

    let contributions: Vec<ClassContribution> = input
        .amounts
        .iter()
        .filter(|(_, amount)| *amount > 0)
        .map(|&(class, amount)| {
            let indicators = class.indicators();
            let failure_rate = f64::from(amount) * indicators.failure_rate;
            ClassContribution {
                class,
                amount,
                failure_rate,
                downtime: failure_rate * indicators.restoration_hours,
            }
        })
        .collect();

    let w_oc: f64 = contributions.iter().map(|c| c.failure_rate).sum();
    let downtime: f64 = contributions.iter().map(|c| c.downtime).sum();

    let t_v_oc = checked_div("tVOc", downtime, w_oc)?;
    let k_a_oc = finite("kAOc", t_v_oc * w_oc / HOURS_PER_YEAR)?;
    let k_p_os = PLANNED_OUTAGE_FACTOR * PLANNED_OUTAGE_HOURS / HOURS_PER_YEAR;
    let w_dk = finite("wDk", 2.0 * w_oc * (k_a_oc + k_p_os))?;

    Ok(ReliabilityResult {
        single_failure_rate: w_oc,
        mean_restoration_hours: t_v_oc,
        emergency_outage_coefficient: k_a_oc,
        planned_outage_coefficient: k_p_os,
        double_failure_rate: w_dk,
        double_with_breaker_failure_rate: w_dk + SECTIONAL_BREAKER_FAILURE_RATE,
        contributions,
    })
}
