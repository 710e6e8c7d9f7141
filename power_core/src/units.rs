//! # Unit Types
//!
//! Type-safe wrappers for the electrical quantities shared by the network
//! and conductor formulas. They are plain `f64` newtypes that serialize as
//! bare numbers.
//!
//! ## Conventions
//!
//! Inputs follow the units used on the coursework forms:
//! - Voltage: kilovolts (kV)
//! - Apparent power: kilovolt-amperes (kVA) for loads, megavolt-amperes (MVA)
//!   for transformers and system short-circuit power
//! - Current: amperes (A), kiloamperes (kA) for fault currents
//! - Impedance: ohms (Ω)
//! - Cross-section: square millimetres (mm²)
//!
//! ## Example
//!
//! ```rust
//! use power_core::units::{Amperes, Kiloamperes, KiloVoltAmperes, MegaVoltAmperes};
//!
//! let fault: Amperes = Kiloamperes(2.5).into();
//! assert_eq!(fault.0, 2500.0);
//!
//! let rating: KiloVoltAmperes = MegaVoltAmperes(6.3).into();
//! assert_eq!(rating.0, 6300.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

// ============================================================================
// Voltage and Power
// ============================================================================

/// Line voltage in kilovolts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilovolts(pub f64);

/// Apparent power in kilovolt-amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloVoltAmperes(pub f64);

/// Apparent power in megavolt-amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaVoltAmperes(pub f64);

impl From<MegaVoltAmperes> for KiloVoltAmperes {
    fn from(mva: MegaVoltAmperes) -> Self {
        KiloVoltAmperes(mva.0 * 1000.0)
    }
}

// ============================================================================
// Current
// ============================================================================

/// Current in amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amperes(pub f64);

/// Current in kiloamperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kiloamperes(pub f64);

impl From<Kiloamperes> for Amperes {
    fn from(ka: Kiloamperes) -> Self {
        Amperes(ka.0 * 1000.0)
    }
}

impl From<Amperes> for Kiloamperes {
    fn from(a: Amperes) -> Self {
        Kiloamperes(a.0 / 1000.0)
    }
}

impl Mul<f64> for Amperes {
    type Output = Amperes;
    fn mul(self, rhs: f64) -> Amperes {
        Amperes(self.0 * rhs)
    }
}

// ============================================================================
// Impedance and Section
// ============================================================================

/// Resistance, reactance or impedance magnitude in ohms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ohms(pub f64);

impl Add for Ohms {
    type Output = Ohms;
    fn add(self, rhs: Ohms) -> Ohms {
        Ohms(self.0 + rhs.0)
    }
}

impl Mul<f64> for Ohms {
    type Output = Ohms;
    fn mul(self, rhs: f64) -> Ohms {
        Ohms(self.0 * rhs)
    }
}

/// Conductor cross-section in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_conversions() {
        let a: Amperes = Kiloamperes(1.25).into();
        assert!((a.0 - 1250.0).abs() < 1e-9);
        let ka: Kiloamperes = Amperes(500.0).into();
        assert!((ka.0 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ohm_arithmetic() {
        let z = Ohms(1.5) + Ohms(2.0) * 2.0;
        assert_eq!(z, Ohms(5.5));
    }

    #[test]
    fn test_transparent_serialization() {
        let json = serde_json::to_string(&Kilovolts(10.5)).unwrap();
        assert_eq!(json, "10.5");
    }
}
