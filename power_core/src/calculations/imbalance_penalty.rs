//! # Imbalance Penalty
//!
//! Daily revenue and imbalance fine of a solar plant selling at the
//! day-ahead price. Energy generated within ±5 % of the forecast is paid
//! for; the rest is charged as imbalance.
//!
//! ## Model
//!
//! Generated power is N(P_c, σ). The balanced share δ is the probability
//! mass in `[0.95·P_c, 1.05·P_c]`.
//!
//! - revenue = P_c · 24 · δ · B
//! - fine = P_c · 24 · (1 − δ) · B
//! - profit = revenue − fine (negative means a loss)

use serde::{Deserialize, Serialize};

use super::FieldSpec;
use crate::equations::finite;
use crate::equations::stats::{share_within_band, INTEGRATION_STEPS};
use crate::errors::CalcResult;
use crate::validation::{require_non_negative, require_positive, FieldBag};

/// Allowed deviation from the forecast without penalty
pub const TOLERANCE_BAND: f64 = 0.05;

/// Hours per trading day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Forecast and price data.
///
/// ## JSON Example
///
/// ```json
/// { "Pc": 5, "Sigma": 0.25, "B": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyInput {
    /// Mean daily power forecast, MW
    #[serde(rename = "Pc")]
    pub forecast_power: f64,

    /// Standard deviation of the forecast error, MW
    #[serde(rename = "Sigma")]
    pub sigma: f64,

    /// Energy price, thousand UAH/MWh
    #[serde(rename = "B")]
    pub price: f64,
}

impl PenaltyInput {
    /// Form fields, in display order
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("Pc", "Mean daily power", "MW"),
        FieldSpec::new("Sigma", "Forecast standard deviation", "MW"),
        FieldSpec::new("B", "Energy price", "kUAH/MWh"),
    ];

    /// Read the fields from a raw form payload.
    pub fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        Ok(Self {
            forecast_power: bag.require_number("Pc")?,
            sigma: bag.require_number("Sigma")?,
            price: bag.require_number("B")?,
        })
    }

    /// Validate input parameters.
    ///
    /// A non-positive `Sigma` is left to the integration step, which reports
    /// it as a computation failure of `balancedShare`.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("Pc", self.forecast_power)?;
        require_non_negative("B", self.price)?;
        Ok(())
    }
}

/// Penalty results, thousand UAH per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyResult {
    pub revenue: f64,
    pub fine: f64,
    pub profit: f64,

    /// Probability that generation stays within the band
    #[serde(rename = "balancedShare")]
    pub balanced_share: f64,
}

/// Calculate revenue, fine and profit for one day.
pub fn calculate(input: &PenaltyInput) -> CalcResult<PenaltyResult> {
    input.validate()?;

    let delta = share_within_band(input.forecast_power, input.sigma, TOLERANCE_BAND, INTEGRATION_STEPS)?;
    let daily_value = input.forecast_power * HOURS_PER_DAY * input.price;

    let revenue = finite("revenue", daily_value * delta)?;
    let fine = finite("fine", daily_value * (1.0 - delta))?;

    Ok(PenaltyResult {
        revenue,
        fine,
        profit: revenue - fine,
        balanced_share: delta,
    })
}
