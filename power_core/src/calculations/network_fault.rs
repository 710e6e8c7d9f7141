//! # Short-Circuit Currents of a 110/10 kV Network
//!
//! Three- and two-phase fault currents for a substation fed from a 110 kV
//! system through one transformer, at three points:
//!
//! 1. The HV bus (`sh`), impedances in HV ohms
//! 2. The same bus referred to the LV side (`sh_n`)
//! 3. The end of an outgoing LV line (`l_n`)
//!
//! Each point is computed for the normal and the minimum system mode.
//!
//! ## Example
//!
//! ```rust
//! use power_core::calculations::network_fault::{calculate, NetworkFaultInput};
//! use power_core::units::{Kilovolts, MegaVoltAmperes, Ohms};
//!
//! let input = NetworkFaultInput {
//!     uk_max: 11.1,
//!     hv_voltage: Kilovolts(115.0),
//!     lv_voltage: Kilovolts(11.0),
//!     transformer_rating: MegaVoltAmperes(6.3),
//!     system_resistance: Ohms(10.65),
//!     system_resistance_min: Ohms(34.88),
//!     system_reactance: Ohms(24.02),
//!     system_reactance_min: Ohms(65.68),
//!     line_length_km: 12.37,
//!     line_resistance_per_km: Ohms(0.64),
//!     line_reactance_per_km: Ohms(0.363),
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.transformer_reactance.0 - 233.01).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use super::FieldSpec;
use crate::equations::network::{
    impedance, line_parameter, three_phase_fault_current, transfer_coefficient,
    transformer_reactance, two_phase_fault_current,
};
use crate::errors::CalcResult;
use crate::units::{Amperes, Kilovolts, MegaVoltAmperes, Ohms};
use crate::validation::{require_non_negative, require_percentage, require_positive, FieldBag};

/// Network data.
///
/// ## JSON Example
///
/// ```json
/// {
///   "Uk_max": 11.1, "Uv_n": 115, "Un_n": 11, "Snom_t": 6.3,
///   "Rc_n": 10.65, "Rc_min": 34.88, "Xc_n": 24.02, "Xc_min": 65.68,
///   "L_l": 12.37, "R_0": 0.64, "X_0": 0.363
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkFaultInput {
    /// Transformer short-circuit voltage at the extreme tap, %
    #[serde(rename = "Uk_max")]
    pub uk_max: f64,

    #[serde(rename = "Uv_n")]
    pub hv_voltage: Kilovolts,

    #[serde(rename = "Un_n")]
    pub lv_voltage: Kilovolts,

    #[serde(rename = "Snom_t")]
    pub transformer_rating: MegaVoltAmperes,

    /// System resistance, normal mode
    #[serde(rename = "Rc_n")]
    pub system_resistance: Ohms,

    /// System resistance, minimum mode
    #[serde(rename = "Rc_min")]
    pub system_resistance_min: Ohms,

    /// System reactance, normal mode
    #[serde(rename = "Xc_n")]
    pub system_reactance: Ohms,

    /// System reactance, minimum mode
    #[serde(rename = "Xc_min")]
    pub system_reactance_min: Ohms,

    #[serde(rename = "L_l")]
    pub line_length_km: f64,

    /// Line resistance per km
    #[serde(rename = "R_0")]
    pub line_resistance_per_km: Ohms,

    /// Line reactance per km
    #[serde(rename = "X_0")]
    pub line_reactance_per_km: Ohms,
}

impl NetworkFaultInput {
    /// Form fields, in display order
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("Uk_max", "Transformer short-circuit voltage", "%"),
        FieldSpec::new("Uv_n", "HV nominal voltage", "kV"),
        FieldSpec::new("Un_n", "LV nominal voltage", "kV"),
        FieldSpec::new("Snom_t", "Transformer rating", "MVA"),
        FieldSpec::new("Rc_n", "System resistance (normal)", "Ω"),
        FieldSpec::new("Rc_min", "System resistance (minimum)", "Ω"),
        FieldSpec::new("Xc_n", "System reactance (normal)", "Ω"),
        FieldSpec::new("Xc_min", "System reactance (minimum)", "Ω"),
        FieldSpec::new("L_l", "Line length", "km"),
        FieldSpec::new("R_0", "Line resistance per km", "Ω/km"),
        FieldSpec::new("X_0", "Line reactance per km", "Ω/km"),
    ];

    /// Read the fields from a raw form payload.
    pub fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        Ok(Self {
            uk_max: bag.require_number("Uk_max")?,
            hv_voltage: Kilovolts(bag.require_number("Uv_n")?),
            lv_voltage: Kilovolts(bag.require_number("Un_n")?),
            transformer_rating: MegaVoltAmperes(bag.require_number("Snom_t")?),
            system_resistance: Ohms(bag.require_number("Rc_n")?),
            system_resistance_min: Ohms(bag.require_number("Rc_min")?),
            system_reactance: Ohms(bag.require_number("Xc_n")?),
            system_reactance_min: Ohms(bag.require_number("Xc_min")?),
            line_length_km: bag.require_number("L_l")?,
            line_resistance_per_km: Ohms(bag.require_number("R_0")?),
            line_reactance_per_km: Ohms(bag.require_number("X_0")?),
        })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_percentage("Uk_max", self.uk_max)?;
        require_positive("Uv_n", self.hv_voltage.0)?;
        require_positive("Un_n", self.lv_voltage.0)?;
        require_positive("Snom_t", self.transformer_rating.0)?;
        for (field, value) in [
            ("Rc_n", self.system_resistance.0),
            ("Rc_min", self.system_resistance_min.0),
            ("Xc_n", self.system_reactance.0),
            ("Xc_min", self.system_reactance_min.0),
            ("L_l", self.line_length_km),
            ("R_0", self.line_resistance_per_km.0),
            ("X_0", self.line_reactance_per_km.0),
        ] {
            require_non_negative(field, value)?;
        }
        Ok(())
    }
}

/// Impedance and currents at one fault point in one mode
#[derive(Debug, Clone, Copy, PartialEq)]
struct FaultPoint {
    r: Ohms,
    x: Ohms,
    z: Ohms,
    i3: Amperes,
    i2: Amperes,
}

impl FaultPoint {
    /// `name` is the wire name of the impedance, used in error reports
    fn at(name: &str, u: Kilovolts, r: Ohms, x: Ohms) -> CalcResult<Self> {
        let z = impedance(name, r, x)?;
        let i3 = three_phase_fault_current(name, u, z)?;
        Ok(Self {
            r,
            x,
            z,
            i3,
            i2: two_phase_fault_current(i3),
        })
    }
}

/// Fault currents at all points. Field names follow the form contract:
/// `_n` marks LV-referred values, `_min` the minimum system mode, and
/// the trailing digit the number of faulted phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkFaultResult {
    #[serde(rename = "Xt")]
    pub transformer_reactance: Ohms,

    // HV bus
    #[serde(rename = "Rsh")]
    pub rsh: Ohms,
    #[serde(rename = "Xsh")]
    pub xsh: Ohms,
    #[serde(rename = "Zsh")]
    pub zsh: Ohms,
    #[serde(rename = "Rsh_min")]
    pub rsh_min: Ohms,
    #[serde(rename = "Xsh_min")]
    pub xsh_min: Ohms,
    #[serde(rename = "Zsh_min")]
    pub zsh_min: Ohms,
    #[serde(rename = "Ish3")]
    pub ish3: Amperes,
    #[serde(rename = "Ish2")]
    pub ish2: Amperes,
    #[serde(rename = "Ish_min3")]
    pub ish_min3: Amperes,
    #[serde(rename = "Ish_min2")]
    pub ish_min2: Amperes,

    /// Transfer coefficient HV → LV
    #[serde(rename = "kpr")]
    pub kpr: f64,

    // HV bus referred to LV
    #[serde(rename = "Rsh_n")]
    pub rsh_n: Ohms,
    #[serde(rename = "Xsh_n")]
    pub xsh_n: Ohms,
    #[serde(rename = "Zsh_n")]
    pub zsh_n: Ohms,
    #[serde(rename = "Rsh_n_min")]
    pub rsh_n_min: Ohms,
    #[serde(rename = "Xsh_n_min")]
    pub xsh_n_min: Ohms,
    #[serde(rename = "Zsh_n_min")]
    pub zsh_n_min: Ohms,
    #[serde(rename = "Ish_n3")]
    pub ish_n3: Amperes,
    #[serde(rename = "Ish_n2")]
    pub ish_n2: Amperes,
    #[serde(rename = "Ish_n_min3")]
    pub ish_n_min3: Amperes,
    #[serde(rename = "Ish_n_min2")]
    pub ish_n_min2: Amperes,

    // Outgoing line
    #[serde(rename = "R_l")]
    pub r_l: Ohms,
    #[serde(rename = "X_l")]
    pub x_l: Ohms,

    // End of line
    #[serde(rename = "R_sum_n")]
    pub r_sum_n: Ohms,
    #[serde(rename = "X_sum_n")]
    pub x_sum_n: Ohms,
    #[serde(rename = "Z_sum_n")]
    pub z_sum_n: Ohms,
    #[serde(rename = "R_sum_n_min")]
    pub r_sum_n_min: Ohms,
    #[serde(rename = "X_sum_n_min")]
    pub x_sum_n_min: Ohms,
    #[serde(rename = "Z_sum_n_min")]
    pub z_sum_n_min: Ohms,
    #[serde(rename = "I_l_n3")]
    pub i_l_n3: Amperes,
    #[serde(rename = "I_l_n2")]
    pub i_l_n2: Amperes,
    #[serde(rename = "I_l_n_min3")]
    pub i_l_n_min3: Amperes,
    #[serde(rename = "I_l_n_min2")]
    pub i_l_n_min2: Amperes,
}

/// Calculate fault currents at the bus and at the line end.
pub fn calculate(input: &NetworkFaultInput) -> CalcResult<NetworkFaultResult> {
    input.validate()?;

    let uv = input.hv_voltage;
    let un = input.lv_voltage;
    let xt = transformer_reactance(input.uk_max, uv, input.transformer_rating)?;

    let bus = FaultPoint::at("Zsh", uv, input.system_resistance, input.system_reactance + xt)?;
    let bus_min = FaultPoint::at(
        "Zsh_min",
        uv,
        input.system_resistance_min,
        input.system_reactance_min + xt,
    )?;

    let kpr = transfer_coefficient(un, uv)?;
    let referred = FaultPoint::at("Zsh_n", un, bus.r * kpr, bus.x * kpr)?;
    let referred_min = FaultPoint::at("Zsh_n_min", un, bus_min.r * kpr, bus_min.x * kpr)?;

    let r_l = line_parameter(input.line_length_km, input.line_resistance_per_km);
    let x_l = line_parameter(input.line_length_km, input.line_reactance_per_km);
    let line_end = FaultPoint::at("Z_sum_n", un, referred.r + r_l, referred.x + x_l)?;
    let line_end_min = FaultPoint::at("Z_sum_n_min", un, referred_min.r + r_l, referred_min.x + x_l)?;

    Ok(NetworkFaultResult {
        transformer_reactance: xt,
        rsh: bus.r,
        xsh: bus.x,
        zsh: bus.z,
        rsh_min: bus_min.r,
        xsh_min: bus_min.x,
        zsh_min: bus_min.z,
        ish3: bus.i3,
        ish2: bus.i2,
        ish_min3: bus_min.i3,
        ish_min2: bus_min.i2,
        kpr,
        rsh_n: referred.r,
        xsh_n: referred.x,
        zsh_n: referred.z,
        rsh_n_min: referred_min.r,
        xsh_n_min: referred_min.x,
        zsh_n_min: referred_min.z,
        ish_n3: referred.i3,
        ish_n2: referred.i2,
        ish_n_min3: referred_min.i3,
        ish_n_min2: referred_min.i2,
        r_l,
        x_l,
        r_sum_n: line_end.r,
        x_sum_n: line_end.x,
        z_sum_n: line_end.z,
        r_sum_n_min: line_end_min.r,
        x_sum_n_min: line_end_min.x,
        z_sum_n_min: line_end_min.z,
        i_l_n3: line_end.i3,
        i_l_n2: line_end.i2,
        i_l_n_min3: line_end_min.i3,
        i_l_n_min2: line_end_min.i2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn test_network() -> NetworkFaultInput {
        NetworkFaultInput {
            uk_max: 11.1,
            hv_voltage: Kilovolts(115.0),
            lv_voltage: Kilovolts(11.0),
            transformer_rating: MegaVoltAmperes(6.3),
            system_resistance: Ohms(10.65),
            system_resistance_min: Ohms(34.88),
            system_reactance: Ohms(24.02),
            system_reactance_min: Ohms(65.68),
            line_length_km: 12.37,
            line_resistance_per_km: Ohms(0.64),
            line_reactance_per_km: Ohms(0.363),
        }
    }

    #[test]
    fn test_hv_bus() {
        let r = calculate(&test_network()).unwrap();
        assert!(approx_eq(r.transformer_reactance.0, 233.01190476190476, 1e-9));
        assert!(approx_eq(r.zsh.0, 257.25244909530574, 1e-9));
        assert!(approx_eq(r.zsh_min.0, 300.7215794888933, 1e-9));
        assert!(approx_eq(r.ish3.0, 258.0938731207536, 1e-9));
        assert!(approx_eq(r.ish2.0, 223.51585068369027, 1e-9));
        assert!(approx_eq(r.ish_min3.0, 220.78655302905912, 1e-9));
    }

    #[test]
    fn test_lv_referred_bus() {
        let r = calculate(&test_network()).unwrap();
        assert!(approx_eq(r.kpr, 0.009149338374291115, 1e-15));
        assert!(approx_eq(r.zsh_n.0, 2.3536897043880525, 1e-9));
        assert!(approx_eq(r.zsh_n_min.0, 2.7514034871951676, 1e-9));
        assert!(approx_eq(r.ish_n3.0, 2698.2541280806063, 1e-6));
        assert!(approx_eq(r.ish_n_min3.0, 2308.2230543947094, 1e-6));
    }

    #[test]
    fn test_line_end() {
        let r = calculate(&test_network()).unwrap();
        assert!(approx_eq(r.r_l.0, 7.9168, 1e-9));
        assert!(approx_eq(r.x_l.0, 4.49031, 1e-9));
        assert!(approx_eq(r.z_sum_n.0, 10.537588241822288, 1e-9));
        assert!(approx_eq(r.z_sum_n_min.0, 10.954648531109891, 1e-9));
        assert!(approx_eq(r.i_l_n3.0, 602.6856255286378, 1e-6));
        assert!(approx_eq(r.i_l_n2.0, 521.9410622035156, 1e-6));
        assert!(approx_eq(r.i_l_n_min3.0, 579.7404584045049, 1e-6));
    }

    #[test]
    fn test_minimum_mode_gives_lower_currents() {
        let r = calculate(&test_network()).unwrap();
        assert!(r.ish_min3.0 < r.ish3.0);
        assert!(r.ish_n_min3.0 < r.ish_n3.0);
        assert!(r.i_l_n_min3.0 < r.i_l_n3.0);
    }

    #[test]
    fn test_contract_has_34_fields() {
        let r = calculate(&test_network()).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 34);
        for key in ["Xt", "kpr", "Ish_n_min2", "I_l_n_min2", "Z_sum_n_min"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
    }

    #[test]
    fn test_zero_impedance_is_computation_error() {
        let mut input = test_network();
        input.uk_max = 0.0;
        input.system_resistance = Ohms(0.0);
        input.system_reactance = Ohms(0.0);
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "COMPUTATION_FAILED");
        assert!(err.to_string().contains("Zsh"));
    }
}
