//! # Power Engineering Equations
//!
//! Formula building blocks shared by the calculators. Nothing here knows
//! about payloads or wire names.
//!
//! ## Modules
//!
//! - [`guard`] - Checked division, square roots and finiteness checks
//! - [`fuel`] - Fuel mass-basis coefficients and heating values
//! - [`load`] - Utilization coefficient and design load of receiver groups
//! - [`network`] - Reactances, fault currents, conductor cross-sections
//! - [`stats`] - Normal-distribution model of forecast error

pub mod fuel;
pub mod guard;
pub mod load;
pub mod network;
pub mod stats;

pub use guard::{checked_div, checked_hypot, checked_sqrt, finite};
