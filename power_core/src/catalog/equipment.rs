//! Equipment Reliability Indicators
//!
//! Failure and repair statistics per equipment class for distribution
//! networks: failure rate ω (1/yr), mean restoration time t_v (h),
//! planned outage rate μ (1/yr) and mean planned outage time t_p (h).
//!
//! For lines and cables the quantity is a length in km and ω is per km.

use serde::{Deserialize, Serialize};

/// Reliability statistics of one equipment class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityIndicators {
    /// Failure rate ω, 1/yr
    pub failure_rate: f64,
    /// Mean restoration time t_v, h
    pub restoration_hours: f64,
    /// Planned outage rate μ, 1/yr
    pub planned_outage_rate: f64,
    /// Mean planned outage duration t_p, h
    pub planned_outage_hours: f64,
}

/// Equipment classes with tabulated reliability data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentClass {
    #[serde(rename = "OHL-110")]
    OverheadLine110kV,
    #[serde(rename = "OHL-35")]
    OverheadLine35kV,
    #[serde(rename = "OHL-10")]
    OverheadLine10kV,
    #[serde(rename = "CL-10-TRENCH")]
    CableLine10kVTrench,
    #[serde(rename = "CL-10-DUCT")]
    CableLine10kVDuct,
    #[serde(rename = "T-110")]
    Transformer110kV,
    #[serde(rename = "T-35")]
    Transformer35kV,
    #[serde(rename = "T-10-CABLE")]
    Transformer10kVCableNetwork,
    #[serde(rename = "T-10-OVERHEAD")]
    Transformer10kVOverheadNetwork,
    #[serde(rename = "CB-110-SF6")]
    Breaker110kVSf6,
    #[serde(rename = "CB-10-OIL")]
    Breaker10kVLowOil,
    #[serde(rename = "CB-10-VACUUM")]
    Breaker10kVVacuum,
    #[serde(rename = "BUS-10")]
    Busbar10kVPerConnection,
    #[serde(rename = "ACB-0.38")]
    CircuitBreaker380V,
    #[serde(rename = "M-6-10")]
    Motor6To10kV,
    #[serde(rename = "M-0.38")]
    Motor380V,
}

impl EquipmentClass {
    /// All classes, in catalog order
    pub const ALL: [EquipmentClass; 16] = [
        EquipmentClass::OverheadLine110kV,
        EquipmentClass::OverheadLine35kV,
        EquipmentClass::OverheadLine10kV,
        EquipmentClass::CableLine10kVTrench,
        EquipmentClass::CableLine10kVDuct,
        EquipmentClass::Transformer110kV,
        EquipmentClass::Transformer35kV,
        EquipmentClass::Transformer10kVCableNetwork,
        EquipmentClass::Transformer10kVOverheadNetwork,
        EquipmentClass::Breaker110kVSf6,
        EquipmentClass::Breaker10kVLowOil,
        EquipmentClass::Breaker10kVVacuum,
        EquipmentClass::Busbar10kVPerConnection,
        EquipmentClass::CircuitBreaker380V,
        EquipmentClass::Motor6To10kV,
        EquipmentClass::Motor380V,
    ];

    /// Tabulated indicators for this class
    pub fn indicators(&self) -> ReliabilityIndicators {
        let (failure_rate, restoration_hours, planned_outage_rate, planned_outage_hours) = match self {
            EquipmentClass::OverheadLine110kV => (0.007, 10.0, 0.167, 35.0),
            EquipmentClass::OverheadLine35kV => (0.02, 8.0, 0.167, 35.0),
            EquipmentClass::OverheadLine10kV => (0.02, 10.0, 0.167, 35.0),
            EquipmentClass::CableLine10kVTrench => (0.03, 44.0, 1.0, 9.0),
            EquipmentClass::CableLine10kVDuct => (0.005, 17.5, 1.0, 9.0),
            EquipmentClass::Transformer110kV => (0.015, 100.0, 1.0, 43.0),
            EquipmentClass::Transformer35kV => (0.02, 80.0, 1.0, 28.0),
            EquipmentClass::Transformer10kVCableNetwork => (0.005, 60.0, 0.5, 10.0),
            EquipmentClass::Transformer10kVOverheadNetwork => (0.05, 60.0, 0.5, 10.0),
            EquipmentClass::Breaker110kVSf6 => (0.01, 30.0, 0.1, 30.0),
            EquipmentClass::Breaker10kVLowOil => (0.02, 15.0, 0.33, 15.0),
            EquipmentClass::Breaker10kVVacuum => (0.01, 15.0, 0.33, 15.0),
            EquipmentClass::Busbar10kVPerConnection => (0.03, 2.0, 0.167, 5.0),
            EquipmentClass::CircuitBreaker380V => (0.05, 4.0, 0.33, 10.0),
            EquipmentClass::Motor6To10kV => (0.1, 160.0, 0.5, 0.0),
            EquipmentClass::Motor380V => (0.1, 50.0, 0.5, 0.0),
        };
        ReliabilityIndicators {
            failure_rate,
            restoration_hours,
            planned_outage_rate,
            planned_outage_hours,
        }
    }

    /// Stable ASCII code
    pub fn code(&self) -> &'static str {
        match self {
            EquipmentClass::OverheadLine110kV => "OHL-110",
            EquipmentClass::OverheadLine35kV => "OHL-35",
            EquipmentClass::OverheadLine10kV => "OHL-10",
            EquipmentClass::CableLine10kVTrench => "CL-10-TRENCH",
            EquipmentClass::CableLine10kVDuct => "CL-10-DUCT",
            EquipmentClass::Transformer110kV => "T-110",
            EquipmentClass::Transformer35kV => "T-35",
            EquipmentClass::Transformer10kVCableNetwork => "T-10-CABLE",
            EquipmentClass::Transformer10kVOverheadNetwork => "T-10-OVERHEAD",
            EquipmentClass::Breaker110kVSf6 => "CB-110-SF6",
            EquipmentClass::Breaker10kVLowOil => "CB-10-OIL",
            EquipmentClass::Breaker10kVVacuum => "CB-10-VACUUM",
            EquipmentClass::Busbar10kVPerConnection => "BUS-10",
            EquipmentClass::CircuitBreaker380V => "ACB-0.38",
            EquipmentClass::Motor6To10kV => "M-6-10",
            EquipmentClass::Motor380V => "M-0.38",
        }
    }

    /// Catalog label as printed on the data sheets the forms submit
    pub fn catalog_label(&self) -> &'static str {
        match self {
            EquipmentClass::OverheadLine110kV => "ПЛ-110 кВ",
            EquipmentClass::OverheadLine35kV => "ПЛ-35 кВ",
            EquipmentClass::OverheadLine10kV => "ПЛ-10 кВ",
            EquipmentClass::CableLine10kVTrench => "КЛ-10 кВ (траншея)",
            EquipmentClass::CableLine10kVDuct => "КЛ-10 кВ (кабельний канал)",
            EquipmentClass::Transformer110kV => "T-110 кВ",
            EquipmentClass::Transformer35kV => "T-35 кВ",
            EquipmentClass::Transformer10kVCableNetwork => "T-10 кВ (кабельна мережа 10 кВ)",
            EquipmentClass::Transformer10kVOverheadNetwork => "T-10 кВ (повітряна мережа 10 кВ)",
            EquipmentClass::Breaker110kVSf6 => "B-110 кВ (елегазовий)",
            EquipmentClass::Breaker10kVLowOil => "B-10 кВ (малооливний)",
            EquipmentClass::Breaker10kVVacuum => "B-10 кВ (вакуумний)",
            EquipmentClass::Busbar10kVPerConnection => "Збірні шини 10 кВ на 1 приєднання",
            EquipmentClass::CircuitBreaker380V => "АВ-0,38 кВ",
            EquipmentClass::Motor6To10kV => "ЕД 6,10 кВ",
            EquipmentClass::Motor380V => "ЕД 0,38 кВ",
        }
    }

    /// English display name
    pub fn display_name(&self) -> &'static str {
        match self {
            EquipmentClass::OverheadLine110kV => "Overhead line 110 kV",
            EquipmentClass::OverheadLine35kV => "Overhead line 35 kV",
            EquipmentClass::OverheadLine10kV => "Overhead line 10 kV",
            EquipmentClass::CableLine10kVTrench => "Cable line 10 kV (trench)",
            EquipmentClass::CableLine10kVDuct => "Cable line 10 kV (cable duct)",
            EquipmentClass::Transformer110kV => "Transformer 110 kV",
            EquipmentClass::Transformer35kV => "Transformer 35 kV",
            EquipmentClass::Transformer10kVCableNetwork => "Transformer 10 kV (cable network)",
            EquipmentClass::Transformer10kVOverheadNetwork => "Transformer 10 kV (overhead network)",
            EquipmentClass::Breaker110kVSf6 => "Breaker 110 kV (SF6)",
            EquipmentClass::Breaker10kVLowOil => "Breaker 10 kV (low-oil)",
            EquipmentClass::Breaker10kVVacuum => "Breaker 10 kV (vacuum)",
            EquipmentClass::Busbar10kVPerConnection => "Busbars 10 kV per connection",
            EquipmentClass::CircuitBreaker380V => "Circuit breaker 0.38 kV",
            EquipmentClass::Motor6To10kV => "Motor 6-10 kV",
            EquipmentClass::Motor380V => "Motor 0.38 kV",
        }
    }

    /// Look up by ASCII code (case-insensitive) or catalog label
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.code().eq_ignore_ascii_case(trimmed) || class.catalog_label() == trimmed)
    }
}

impl std::fmt::Display for EquipmentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_every_alias() {
        for class in EquipmentClass::ALL {
            assert_eq!(EquipmentClass::from_str_flexible(class.code()), Some(class));
            assert_eq!(EquipmentClass::from_str_flexible(class.catalog_label()), Some(class));
        }
        assert_eq!(EquipmentClass::from_str_flexible("T-220"), None);
        assert_eq!(EquipmentClass::from_str_flexible("ohl-110"), Some(EquipmentClass::OverheadLine110kV));
    }

    #[test]
    fn test_codes_unique() {
        let codes: HashSet<_> = EquipmentClass::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), EquipmentClass::ALL.len());
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&EquipmentClass::Breaker10kVVacuum).unwrap();
        assert_eq!(json, "\"CB-10-VACUUM\"");
    }

    #[test]
    fn test_transformer_110_indicators() {
        let ind = EquipmentClass::Transformer110kV.indicators();
        assert_eq!(ind.failure_rate, 0.015);
        assert_eq!(ind.restoration_hours, 100.0);
        assert_eq!(ind.planned_outage_hours, 43.0);
    }
}
