//! # Reference Data
//!
//! Tabulated engineering data the calculators look up: economic current
//! densities for conductor sizing and reliability indicators per equipment
//! class. Categorical inputs are closed enums with explicit tables rather
//! than positional integer codes.
//!
//! ## Example
//!
//! ```rust
//! use power_core::catalog::{
//!     economic_current_density, ConductorKind, ConductorMaterial, UtilizationBand,
//! };
//!
//! let band = UtilizationBand::for_hours(4000.0).unwrap();
//! let jek = economic_current_density(
//!     ConductorKind::PaperInsulatedCable,
//!     ConductorMaterial::Aluminum,
//!     band,
//! );
//! assert_eq!(jek, 1.4);
//! ```

pub mod conductors;
pub mod equipment;

pub use conductors::{
    economic_current_density, ConductorKind, ConductorMaterial, UtilizationBand,
    MIN_UTILIZATION_HOURS,
};
pub use equipment::{EquipmentClass, ReliabilityIndicators};
