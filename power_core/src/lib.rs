//! # power_core - Power Engineering Calculation Engine
//!
//! `power_core` implements the calculators of a power engineering course:
//! fuel composition and heating value, particle emissions, solar imbalance
//! penalties, cable selection, short-circuit currents, supply reliability,
//! outage losses and workshop electrical loads. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: Wire names of the original forms are kept on every type
//! - **Rich Errors**: Validation, computation and not-found errors are distinct
//! - **Presentation last**: Rounding happens in [`format`], never in a formula
//!
//! ## Quick Start
//!
//! ```rust
//! use power_core::{evaluate, EvaluationOptions};
//! use serde_json::json;
//!
//! let payload = json!({ "hp": 3.5, "cp": 48.7, "sp": 1.2, "np": 1.1, "op": 5.5, "wp": 32, "ap": 8 });
//! let response = evaluate(1, "1", &payload, &EvaluationOptions::default()).unwrap();
//! assert_eq!(response.result["krs"], 1.47);
//! ```
//!
//! ## Modules
//!
//! - [`registry`] - Calculator identifiers and the [`evaluate`] entry point
//! - [`calculations`] - One module per calculator
//! - [`validation`] - Raw payload parsing and domain checks
//! - [`equations`] - Shared engineering formulas
//! - [`catalog`] - Reference tables (current densities, reliability data)
//! - [`units`] - Type-safe unit wrappers
//! - [`format`] - Response envelopes, rounding, text rendering
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod equations;
pub mod errors;
pub mod format;
pub mod registry;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult, ErrorKind};
pub use format::{ErrorEnvelope, Response};
pub use registry::{evaluate, Calculator, EvaluationOptions};
