//! Conductor Materials and Economic Current Density
//!
//! Economic current density j_ek (A/mm²) by conductor construction,
//! conductor material, and annual hours of maximum load utilization T_m.
//!
//! The forms submit both selectors as dropdown indices; [`ConductorKind::from_code`]
//! and [`ConductorMaterial::from_code`] keep those codes working.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validation::Selector;

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConductorMaterial {
    Copper,
    Aluminum,
}

impl ConductorMaterial {
    /// All materials, in dropdown order
    pub const ALL: [ConductorMaterial; 2] = [ConductorMaterial::Copper, ConductorMaterial::Aluminum];

    /// Dropdown index used by the forms
    pub fn code(&self) -> i64 {
        match self {
            ConductorMaterial::Copper => 0,
            ConductorMaterial::Aluminum => 1,
        }
    }

    /// Parse a dropdown index
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }

    /// Parse common names (`copper`, `Cu`, `aluminium`, `Al`)
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "copper" | "cu" => Some(ConductorMaterial::Copper),
            "aluminum" | "aluminium" | "al" => Some(ConductorMaterial::Aluminum),
            _ => None,
        }
    }

    /// Resolve a submitted selector
    pub fn from_selector(field: &str, selector: Selector<'_>) -> CalcResult<Self> {
        match selector {
            Selector::Code(code) => Self::from_code(code)
                .ok_or_else(|| CalcError::unknown_category(field, code.to_string())),
            Selector::Label(label) => Self::from_str_flexible(label)
                .ok_or_else(|| CalcError::unknown_category(field, label)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Copper",
            ConductorMaterial::Aluminum => "Aluminum",
        }
    }
}

impl std::fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Conductor construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConductorKind {
    /// Bare wires and busbars
    Bare,
    /// Paper-insulated cables; wires with rubber or PVC insulation
    PaperInsulatedCable,
    /// Cables with rubber or plastic insulation
    PlasticInsulatedCable,
}

impl ConductorKind {
    /// All kinds, in dropdown order
    pub const ALL: [ConductorKind; 3] = [
        ConductorKind::Bare,
        ConductorKind::PaperInsulatedCable,
        ConductorKind::PlasticInsulatedCable,
    ];

    /// Dropdown index used by the forms
    pub fn code(&self) -> i64 {
        match self {
            ConductorKind::Bare => 0,
            ConductorKind::PaperInsulatedCable => 1,
            ConductorKind::PlasticInsulatedCable => 2,
        }
    }

    /// Parse a dropdown index
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    /// Parse snake_case or spaced names
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "bare" | "bare_conductor" | "busbar" => Some(ConductorKind::Bare),
            "paper_insulated_cable" | "paper" => Some(ConductorKind::PaperInsulatedCable),
            "plastic_insulated_cable" | "plastic" | "rubber" => {
                Some(ConductorKind::PlasticInsulatedCable)
            }
            _ => None,
        }
    }

    /// Resolve a submitted selector
    pub fn from_selector(field: &str, selector: Selector<'_>) -> CalcResult<Self> {
        match selector {
            Selector::Code(code) => Self::from_code(code)
                .ok_or_else(|| CalcError::unknown_category(field, code.to_string())),
            Selector::Label(label) => Self::from_str_flexible(label)
                .ok_or_else(|| CalcError::unknown_category(field, label)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorKind::Bare => "Bare conductors and busbars",
            ConductorKind::PaperInsulatedCable => "Paper-insulated cables, rubber/PVC-insulated wires",
            ConductorKind::PlasticInsulatedCable => "Rubber/plastic-insulated cables",
        }
    }
}

impl std::fmt::Display for ConductorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Band of annual maximum-load utilization hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    /// 1000–3000 h
    Low,
    /// 3000–5000 h
    Medium,
    /// Over 5000 h
    High,
}

/// Lowest utilization covered by the density table, h/yr
pub const MIN_UTILIZATION_HOURS: f64 = 1000.0;

impl UtilizationBand {
    /// Classify T_m. Band edges belong to the lower band (3000 h is `Low`).
    pub fn for_hours(hours: f64) -> Option<Self> {
        if hours < MIN_UTILIZATION_HOURS {
            None
        } else if hours <= 3000.0 {
            Some(UtilizationBand::Low)
        } else if hours <= 5000.0 {
            Some(UtilizationBand::Medium)
        } else {
            Some(UtilizationBand::High)
        }
    }
}

/// Economic current density j_ek, A/mm²
pub fn economic_current_density(kind: ConductorKind, material: ConductorMaterial, band: UtilizationBand) -> f64 {
    use ConductorKind::*;
    use ConductorMaterial::*;
    use UtilizationBand::*;

    match (kind, material, band) {
        (Bare, Copper, Low) => 2.5,
        (Bare, Copper, Medium) => 2.1,
        (Bare, Copper, High) => 1.8,
        (Bare, Aluminum, Low) => 1.3,
        (Bare, Aluminum, Medium) => 1.1,
        (Bare, Aluminum, High) => 1.0,
        (PaperInsulatedCable, Copper, Low) => 3.0,
        (PaperInsulatedCable, Copper, Medium) => 2.5,
        (PaperInsulatedCable, Copper, High) => 2.0,
        (PaperInsulatedCable, Aluminum, Low) => 1.6,
        (PaperInsulatedCable, Aluminum, Medium) => 1.4,
        (PaperInsulatedCable, Aluminum, High) => 1.2,
        (PlasticInsulatedCable, Copper, Low) => 3.5,
        (PlasticInsulatedCable, Copper, Medium) => 3.1,
        (PlasticInsulatedCable, Copper, High) => 2.7,
        (PlasticInsulatedCable, Aluminum, Low) => 1.9,
        (PlasticInsulatedCable, Aluminum, Medium) => 1.7,
        (PlasticInsulatedCable, Aluminum, High) => 1.6,
    }
}
