//! # Cable Selection
//!
//! Sizes the cable feeding a two-transformer substation: normal and
//! post-emergency load currents, the economic cross-section, and the minimum
//! cross-section that withstands the fault current thermally.
//!
//! ## Assumptions
//!
//! - Load is split evenly between two circuits in normal mode
//! - After losing one circuit the other carries twice its normal current
//! - Economic current density from the standard table (see
//!   [`crate::catalog::conductors`])
//!
//! ## Example
//!
//! ```rust
//! use power_core::calculations::conductor_sizing::{calculate, ConductorSizingInput};
//! use power_core::catalog::{ConductorKind, ConductorMaterial};
//! use power_core::units::{Kiloamperes, KiloVoltAmperes, Kilovolts};
//!
//! let input = ConductorSizingInput {
//!     nominal_voltage: Kilovolts(10.0),
//!     design_load: KiloVoltAmperes(1300.0),
//!     fault_current: Kiloamperes(2.5),
//!     transformer_rating: KiloVoltAmperes(2000.0),
//!     clearing_time: 2.5,
//!     utilization_hours: 4000.0,
//!     thermal_coefficient: 92.0,
//!     kind: ConductorKind::PaperInsulatedCable,
//!     material: ConductorMaterial::Aluminum,
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.economic_section.0 - 26.81).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use super::FieldSpec;
use crate::catalog::{economic_current_density, ConductorKind, ConductorMaterial, UtilizationBand};
use crate::equations::finite;
use crate::equations::network::{economic_section, load_current, thermal_minimum_section};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Amperes, KiloVoltAmperes, Kiloamperes, Kilovolts, SquareMillimeters};
use crate::validation::{require_non_negative, require_positive, FieldBag};

/// Cable selection input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "Unom": 10, "Sm": 1300, "Ik": 2.5, "P_TP": 2000, "Tf": 2.5,
///   "Tm": 4000, "Ct": 92, "ConductorType": 1, "ConductorMaterial": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorSizingInput {
    /// Nominal line voltage
    #[serde(rename = "Unom")]
    pub nominal_voltage: Kilovolts,

    /// Design apparent load of the substation
    #[serde(rename = "Sm")]
    pub design_load: KiloVoltAmperes,

    /// Three-phase fault current at the cable
    #[serde(rename = "Ik")]
    pub fault_current: Kiloamperes,

    /// Transformer rating. Accepted for form compatibility; does not enter
    /// the sizing.
    #[serde(rename = "P_TP")]
    pub transformer_rating: KiloVoltAmperes,

    /// Fault clearing time, s
    #[serde(rename = "Tf")]
    pub clearing_time: f64,

    /// Annual hours of maximum load utilization, h
    #[serde(rename = "Tm")]
    pub utilization_hours: f64,

    /// Thermal coefficient C_t, A·s^½/mm²
    #[serde(rename = "Ct")]
    pub thermal_coefficient: f64,

    #[serde(rename = "ConductorType")]
    pub kind: ConductorKind,

    #[serde(rename = "ConductorMaterial")]
    pub material: ConductorMaterial,
}

impl ConductorSizingInput {
    /// Form fields, in display order
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("Unom", "Nominal voltage", "kV"),
        FieldSpec::new("Sm", "Design load", "kVA"),
        FieldSpec::new("Ik", "Fault current", "kA"),
        FieldSpec::new("P_TP", "Transformer rating", "kVA"),
        FieldSpec::new("Tf", "Fault clearing time", "s"),
        FieldSpec::new("Tm", "Maximum load utilization", "h/yr"),
        FieldSpec::new("Ct", "Thermal coefficient", ""),
        FieldSpec::new("ConductorType", "Conductor type (0 bare, 1 paper cable, 2 plastic cable)", ""),
        FieldSpec::new("ConductorMaterial", "Conductor material (0 Cu, 1 Al)", ""),
    ];

    /// Read the fields from a raw form payload.
    pub fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        let kind = ConductorKind::from_selector(
            &bag.field_path("ConductorType"),
            bag.require_selector("ConductorType")?,
        )?;
        let material = ConductorMaterial::from_selector(
            &bag.field_path("ConductorMaterial"),
            bag.require_selector("ConductorMaterial")?,
        )?;

        Ok(Self {
            nominal_voltage: Kilovolts(bag.require_number("Unom")?),
            design_load: KiloVoltAmperes(bag.require_number("Sm")?),
            fault_current: Kiloamperes(bag.require_number("Ik")?),
            transformer_rating: KiloVoltAmperes(bag.require_number("P_TP")?),
            clearing_time: bag.require_number("Tf")?,
            utilization_hours: bag.require_number("Tm")?,
            thermal_coefficient: bag.require_number("Ct")?,
            kind,
            material,
        })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("Unom", self.nominal_voltage.0)?;
        require_non_negative("Sm", self.design_load.0)?;
        require_non_negative("Ik", self.fault_current.0)?;
        require_non_negative("P_TP", self.transformer_rating.0)?;
        require_non_negative("Tf", self.clearing_time)?;
        require_positive("Ct", self.thermal_coefficient)?;
        self.utilization_band()?;
        Ok(())
    }

    /// Utilization band for the density table
    pub fn utilization_band(&self) -> CalcResult<UtilizationBand> {
        UtilizationBand::for_hours(self.utilization_hours).ok_or_else(|| {
            CalcError::invalid_input(
                "Tm",
                self.utilization_hours.to_string(),
                "No economic current density below 1000 h/yr",
            )
        })
    }
}

/// Cable selection results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorSizingResult {
    /// Normal-mode current per circuit
    #[serde(rename = "Im")]
    pub normal_current: Amperes,

    /// Post-emergency current
    #[serde(rename = "Im_pa")]
    pub emergency_current: Amperes,

    /// Economic cross-section
    #[serde(rename = "Sek")]
    pub economic_section: SquareMillimeters,

    /// Minimum cross-section for thermal withstand
    #[serde(rename = "Smin")]
    pub thermal_minimum_section: SquareMillimeters,
}

/// Size the cable.
pub fn calculate(input: &ConductorSizingInput) -> CalcResult<ConductorSizingResult> {
    input.validate()?;

    let per_circuit = KiloVoltAmperes(input.design_load.0 / 2.0);
    let im = load_current("Im", per_circuit, input.nominal_voltage)?;
    let im_pa = Amperes(finite("Im_pa", (im * 2.0).0)?);

    let jek = economic_current_density(input.kind, input.material, input.utilization_band()?);
    let sek = economic_section(im, jek)?;
    let smin = thermal_minimum_section(input.fault_current, input.clearing_time, input.thermal_coefficient)?;

    Ok(ConductorSizingResult {
        normal_current: im,
        emergency_current: im_pa,
        economic_section: sek,
        thermal_minimum_section: smin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn test_feeder() -> ConductorSizingInput {
        ConductorSizingInput {
            nominal_voltage: Kilovolts(10.0),
            design_load: KiloVoltAmperes(1300.0),
            fault_current: Kiloamperes(2.5),
            transformer_rating: KiloVoltAmperes(2000.0),
            clearing_time: 2.5,
            utilization_hours: 4000.0,
            thermal_coefficient: 92.0,
            kind: ConductorKind::PaperInsulatedCable,
            material: ConductorMaterial::Aluminum,
        }
    }

    #[test]
    fn test_feeder_currents() {
        let result = calculate(&test_feeder()).unwrap();
        assert!(approx_eq(result.normal_current.0, 37.52776749732568));
        assert!(approx_eq(result.emergency_current.0, 75.05553499465135));
    }

    #[test]
    fn test_feeder_sections() {
        let result = calculate(&test_feeder()).unwrap();
        assert!(approx_eq(result.economic_section.0, 26.805548212375484));
        assert!(approx_eq(result.thermal_minimum_section.0, 42.96572907837472));
    }

    #[test]
    fn test_doubling_load_doubles_current() {
        let base = calculate(&test_feeder()).unwrap();
        let mut heavier = test_feeder();
        heavier.design_load = KiloVoltAmperes(2600.0);
        let result = calculate(&heavier).unwrap();
        assert!(approx_eq(result.normal_current.0, 2.0 * base.normal_current.0));
    }

    #[test]
    fn test_transformer_rating_does_not_affect_sizing() {
        let base = calculate(&test_feeder()).unwrap();
        let mut other = test_feeder();
        other.transformer_rating = KiloVoltAmperes(630.0);
        assert_eq!(calculate(&other).unwrap(), base);
    }

    #[test]
    fn test_emergency_current_overflow() {
        let mut input = test_feeder();
        input.design_load = KiloVoltAmperes(1.7e308);
        input.nominal_voltage = Kilovolts(0.5);
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "COMPUTATION_FAILED");
        assert!(err.to_string().contains("Im_pa"), "{}", err);
    }

    #[test]
    fn test_low_utilization_rejected() {
        let mut feeder = test_feeder();
        feeder.utilization_hours = 999.0;
        let err = calculate(&feeder).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("Tm"));
    }

    #[test]
    fn test_selectors_from_codes() {
        let payload = json!({
            "Unom": "10", "Sm": 1300, "Ik": 2.5, "P_TP": 2000, "Tf": 2.5,
            "Tm": 4000, "Ct": 92, "ConductorType": "1", "ConductorMaterial": 1
        });
        let bag = FieldBag::from_value(&payload).unwrap();
        let input = ConductorSizingInput::from_fields(&bag).unwrap();
        assert_eq!(input, test_feeder());
    }

    #[test]
    fn test_unknown_selector_code() {
        let payload = json!({
            "Unom": 10, "Sm": 1300, "Ik": 2.5, "P_TP": 2000, "Tf": 2.5,
            "Tm": 4000, "Ct": 92, "ConductorType": 7, "ConductorMaterial": 1
        });
        let bag = FieldBag::from_value(&payload).unwrap();
        let err = ConductorSizingInput::from_fields(&bag).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CATEGORY");
    }
}
