//! # Outage Losses
//!
//! Expected undelivered energy from emergency and planned outages and the
//! resulting losses to the consumer.

use serde::{Deserialize, Serialize};

use super::FieldSpec;
use crate::equations::finite;
use crate::errors::CalcResult;
use crate::validation::{require_non_negative, FieldBag};

/// Outage statistics and tariffs.
///
/// ## JSON Example
///
/// ```json
/// { "omega": 0.01, "tV": 0.045, "pM": 5120, "tM": 6451, "kP": 0.004, "zPerA": 23.6, "zPerP": 17.6 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutageLossInput {
    /// Failure rate, 1/yr
    pub omega: f64,
    /// Mean restoration time, yr per outage
    #[serde(rename = "tV")]
    pub restoration_time: f64,
    /// Maximum load, kW
    #[serde(rename = "pM")]
    pub max_load: f64,
    /// Hours of maximum load utilization, h
    #[serde(rename = "tM")]
    pub utilization_hours: f64,
    /// Planned outage coefficient
    #[serde(rename = "kP")]
    pub planned_outage_coefficient: f64,
    /// Specific loss from emergency outages, UAH/kWh
    #[serde(rename = "zPerA")]
    pub emergency_loss_rate: f64,
    /// Specific loss from planned outages, UAH/kWh
    #[serde(rename = "zPerP")]
    pub planned_loss_rate: f64,
}

impl OutageLossInput {
    /// Form fields, in display order
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("omega", "Failure rate", "1/yr"),
        FieldSpec::new("tV", "Mean restoration time", "yr"),
        FieldSpec::new("pM", "Maximum load", "kW"),
        FieldSpec::new("tM", "Maximum load utilization", "h"),
        FieldSpec::new("kP", "Planned outage coefficient", ""),
        FieldSpec::new("zPerA", "Emergency outage loss", "UAH/kWh"),
        FieldSpec::new("zPerP", "Planned outage loss", "UAH/kWh"),
    ];

    /// Read the fields from a raw form payload.
    pub fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        Ok(Self {
            omega: bag.require_number("omega")?,
            restoration_time: bag.require_number("tV")?,
            max_load: bag.require_number("pM")?,
            utilization_hours: bag.require_number("tM")?,
            planned_outage_coefficient: bag.require_number("kP")?,
            emergency_loss_rate: bag.require_number("zPerA")?,
            planned_loss_rate: bag.require_number("zPerP")?,
        })
    }

    /// All inputs are rates, durations or tariffs and must not be negative.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("omega", self.omega),
            ("tV", self.restoration_time),
            ("pM", self.max_load),
            ("tM", self.utilization_hours),
            ("kP", self.planned_outage_coefficient),
            ("zPerA", self.emergency_loss_rate),
            ("zPerP", self.planned_loss_rate),
        ] {
            require_non_negative(field, value)?;
        }
        Ok(())
    }
}

/// Undelivered energy and losses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutageLossResult {
    /// Undelivered energy, emergency outages, kWh
    #[serde(rename = "mWnedA")]
    pub emergency_undelivered: f64,
    /// Undelivered energy, planned outages, kWh
    #[serde(rename = "mWnedP")]
    pub planned_undelivered: f64,
    /// Expected losses, UAH
    #[serde(rename = "mZper")]
    pub expected_losses: f64,
}

/// Calculate undelivered energy and losses.
pub fn calculate(input: &OutageLossInput) -> CalcResult<OutageLossResult> {
    input.validate()?;

    let energy = input.max_load * input.utilization_hours;
    let emergency = finite("mWnedA", input.omega * input.restoration_time * energy)?;
    let planned = finite("mWnedP", input.planned_outage_coefficient * energy)?;
    let losses = finite(
        "mZper",
        input.emergency_loss_rate * emergency + input.planned_loss_rate * planned,
    )?;

    Ok(OutageLossResult {
        emergency_undelivered: emergency,
        planned_undelivered: planned,
        expected_losses: losses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn test_consumer() -> OutageLossInput {
        OutageLossInput {
            omega: 0.01,
            restoration_time: 0.045,
            max_load: 5120.0,
            utilization_hours: 6451.0,
            planned_outage_coefficient: 0.004,
            emergency_loss_rate: 23.6,
            planned_loss_rate: 17.6,
        }
    }

    #[test]
    fn test_undelivered_energy() {
        let r = calculate(&test_consumer()).unwrap();
        assert!(approx_eq(r.emergency_undelivered, 14863.104, 1e-6));
        assert!(approx_eq(r.planned_undelivered, 132116.48, 1e-6));
    }

    #[test]
    fn test_expected_losses() {
        let r = calculate(&test_consumer()).unwrap();
        assert!(approx_eq(r.expected_losses, 2676019.3024, 1e-4));
    }

    #[test]
    fn test_no_failures_leaves_planned_losses() {
        let mut input = test_consumer();
        input.omega = 0.0;
        let r = calculate(&input).unwrap();
        assert_eq!(r.emergency_undelivered, 0.0);
        assert!(approx_eq(r.expected_losses, 17.6 * r.planned_undelivered, 1e-6));
    }

    #[test]
    fn test_negative_load_rejected() {
        let mut input = test_consumer();
        input.max_load = -1.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
