//! # Workshop Electrical Load
//!
//! Design load of one group of receivers (a distribution point) and of the
//! whole workshop at the 0.38 kV bus of the shop transformer substation.
//!
//! ## Group level
//!
//! - K_v = Σ n·P_n·K_v / Σ n·P_n
//! - n_e = ⌈(Σ n·P_n)² / Σ n·P_n²⌉
//! - P = k_r · Σ n·P_n·K_v
//! - Q = f · Σ n·P_n·K_v·tg φ, f = 1.1 for n_e ≤ 10, else 1.0
//! - S = √(P² + Q²), I = P / U
//!
//! ## Bus level
//!
//! Same coefficients from workshop totals, with `k_r2` applied to both the
//! active and reactive utilized power and n_e left unrounded. The totals come
//! from a `departments` list, explicit `workshop` totals, or the reference
//! workshop ([`WorkshopTotals::REFERENCE`]).

use serde::{Deserialize, Serialize};

use super::FieldSpec;
use crate::equations::finite;
use crate::equations::load::{apparent_power, rated_current, reactive_load_factor, LoadSums};
use crate::errors::{CalcError, CalcResult};
use crate::units::Kilovolts;
use crate::validation::{require_fraction, require_non_negative, require_positive, FieldBag};

/// Voltages closer than this are treated as the same bus
const VOLTAGE_MATCH_TOLERANCE: f64 = 1e-9;

// =============================================================================
// INPUT
// =============================================================================

/// One row of identical receivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    /// Efficiency η
    pub efficiency: f64,
    /// cos φ
    #[serde(rename = "powerFactor")]
    pub power_factor: f64,
    pub voltage: Kilovolts,
    pub quantity: u32,
    /// Nominal power of one receiver, kW
    #[serde(rename = "nominalPower")]
    pub nominal_power: f64,
    /// Utilization coefficient K_v
    #[serde(rename = "usageCoefficient")]
    pub usage_coefficient: f64,
    /// tg φ
    #[serde(rename = "reactivePowerFactor")]
    pub reactive_power_factor: f64,
}

impl Equipment {
    fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        Ok(Self {
            name: bag.require_text("name")?.trim().to_string(),
            efficiency: bag.require_number("efficiency")?,
            power_factor: bag.require_number("powerFactor")?,
            voltage: Kilovolts(bag.require_number("voltage")?),
            quantity: bag.require_count("quantity")?,
            nominal_power: bag.require_number("nominalPower")?,
            usage_coefficient: bag.require_number("usageCoefficient")?,
            reactive_power_factor: bag.require_number("reactivePowerFactor")?,
        })
    }

    fn validate(&self, path: &str) -> CalcResult<()> {
        let field = |name: &str| format!("{}.{}", path, name);
        require_positive(&field("efficiency"), self.efficiency)?;
        require_fraction(&field("efficiency"), self.efficiency)?;
        require_positive(&field("powerFactor"), self.power_factor)?;
        require_fraction(&field("powerFactor"), self.power_factor)?;
        require_positive(&field("voltage"), self.voltage.0)?;
        require_non_negative(&field("nominalPower"), self.nominal_power)?;
        require_fraction(&field("usageCoefficient"), self.usage_coefficient)?;
        require_non_negative(&field("reactivePowerFactor"), self.reactive_power_factor)?;
        Ok(())
    }

    /// n·P_n, kW
    pub fn row_power(&self) -> f64 {
        f64::from(self.quantity) * self.nominal_power
    }
}

/// Workshop totals at the 0.38 kV bus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkshopTotals {
    /// Σ n·P_n, kW
    #[serde(rename = "totalNominalPower")]
    pub total_nominal_power: f64,
    /// Σ n·P_n·K_v, kW
    #[serde(rename = "totalUtilizedPower")]
    pub total_utilized_power: f64,
    /// Σ n·P_n·K_v·tg φ, kvar
    #[serde(rename = "totalUtilizedReactivePower")]
    pub total_utilized_reactive_power: f64,
    /// Σ n·P_n², kW²
    #[serde(rename = "totalNominalPowerSquared")]
    pub total_nominal_power_squared: f64,
    pub voltage: Kilovolts,
}

impl WorkshopTotals {
    /// Reference workshop used when no departments or totals are given
    pub const REFERENCE: WorkshopTotals = WorkshopTotals {
        total_nominal_power: 2330.0,
        total_utilized_power: 752.0,
        total_utilized_reactive_power: 657.0,
        total_nominal_power_squared: 96399.0,
        voltage: Kilovolts(0.38),
    };

    fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        Ok(Self {
            total_nominal_power: bag.require_number("totalNominalPower")?,
            total_utilized_power: bag.require_number("totalUtilizedPower")?,
            total_utilized_reactive_power: bag.require_number("totalUtilizedReactivePower")?,
            total_nominal_power_squared: bag.require_number("totalNominalPowerSquared")?,
            voltage: Kilovolts(bag.require_number("voltage")?),
        })
    }

    fn validate(&self) -> CalcResult<()> {
        require_non_negative("workshop.totalNominalPower", self.total_nominal_power)?;
        require_non_negative("workshop.totalUtilizedPower", self.total_utilized_power)?;
        require_non_negative(
            "workshop.totalUtilizedReactivePower",
            self.total_utilized_reactive_power,
        )?;
        require_non_negative(
            "workshop.totalNominalPowerSquared",
            self.total_nominal_power_squared,
        )?;
        require_positive("workshop.voltage", self.voltage.0)?;
        Ok(())
    }

    fn sums(&self) -> LoadSums {
        LoadSums {
            nominal: self.total_nominal_power,
            utilized: self.total_utilized_power,
            utilized_reactive: self.total_utilized_reactive_power,
            nominal_squared: self.total_nominal_power_squared,
        }
    }
}

/// Where the bus-level totals come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkshopSource {
    Reference,
    Departments(Vec<Vec<Equipment>>),
    Totals(WorkshopTotals),
}

/// Electrical load input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "equipmentList": [
///     { "name": "Grinding machine", "efficiency": 0.92, "powerFactor": 0.9, "voltage": 0.38,
///       "quantity": 4, "nominalPower": 20, "usageCoefficient": 0.15, "reactivePowerFactor": 1.33 }
///   ],
///   "kr": 1.25,
///   "kr2": 0.7
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricalLoadInput {
    #[serde(rename = "equipmentList")]
    pub equipment: Vec<Equipment>,

    /// Design coefficient of the group
    #[serde(rename = "kr")]
    pub group_design_coefficient: f64,

    /// Design coefficient of the bus
    #[serde(rename = "kr2")]
    pub bus_design_coefficient: f64,

    pub workshop: WorkshopSource,
}

impl ElectricalLoadInput {
    /// Top-level form fields. `equipmentList` rows carry `name, efficiency,
    /// powerFactor, voltage, quantity, nominalPower, usageCoefficient,
    /// reactivePowerFactor`.
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("equipmentList", "Equipment rows", ""),
        FieldSpec::new("kr", "Group design coefficient", ""),
        FieldSpec::new("kr2", "Bus design coefficient", ""),
        FieldSpec::new("departments", "Workshop departments (optional)", ""),
        FieldSpec::new("workshop", "Workshop totals (optional)", ""),
    ];

    /// Read the fields from a raw form payload.
    pub fn from_fields(bag: &FieldBag<'_>) -> CalcResult<Self> {
        let equipment = bag
            .require_array("equipmentList")?
            .iter()
            .map(Equipment::from_fields)
            .collect::<CalcResult<Vec<_>>>()?;

        let workshop = match (bag.contains("departments"), bag.contains("workshop")) {
            (true, true) => {
                return Err(CalcError::invalid_input(
                    "workshop",
                    "departments + workshop",
                    "Give either departments or workshop totals, not both",
                ));
            }
            (true, false) => {
                let departments = bag
                    .require_nested_arrays("departments")?
                    .iter()
                    .map(|rows| -> CalcResult<Vec<Equipment>> {
                        rows.iter().map(Equipment::from_fields).collect()
                    })
                    .collect::<CalcResult<Vec<Vec<Equipment>>>>()?;
                WorkshopSource::Departments(departments)
            }
            (false, true) => WorkshopSource::Totals(WorkshopTotals::from_fields(
                &bag.require_object("workshop")?,
            )?),
            (false, false) => WorkshopSource::Reference,
        };

        Ok(Self {
            equipment,
            group_design_coefficient: bag.require_number("kr")?,
            bus_design_coefficient: bag.require_number("kr2")?,
            workshop,
        })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.equipment.is_empty() {
            return Err(CalcError::invalid_input(
                "equipmentList",
                "[]",
                "At least one equipment row is required",
            ));
        }
        validate_rows("equipmentList", &self.equipment)?;
        require_non_negative("kr", self.group_design_coefficient)?;
        require_non_negative("kr2", self.bus_design_coefficient)?;

        match &self.workshop {
            WorkshopSource::Reference => {}
            WorkshopSource::Totals(totals) => totals.validate()?,
            WorkshopSource::Departments(departments) => {
                let rows: Vec<Equipment> = departments.iter().flatten().cloned().collect();
                if rows.is_empty() {
                    return Err(CalcError::invalid_input(
                        "departments",
                        "[]",
                        "At least one equipment row is required",
                    ));
                }
                for (i, department) in departments.iter().enumerate() {
                    for (j, row) in department.iter().enumerate() {
                        row.validate(&format!("departments[{}][{}]", i, j))?;
                    }
                }
                common_voltage("departments", &rows)?;
            }
        }
        Ok(())
    }

    /// Bus-level totals for the selected source
    pub fn workshop_totals(&self) -> CalcResult<WorkshopTotals> {
        match &self.workshop {
            WorkshopSource::Reference => Ok(WorkshopTotals::REFERENCE),
            WorkshopSource::Totals(totals) => Ok(*totals),
            WorkshopSource::Departments(departments) => {
                let rows: Vec<Equipment> = departments.iter().flatten().cloned().collect();
                let sums = sum_rows(&rows);
                Ok(WorkshopTotals {
                    total_nominal_power: sums.nominal,
                    total_utilized_power: sums.utilized,
                    total_utilized_reactive_power: sums.utilized_reactive,
                    total_nominal_power_squared: sums.nominal_squared,
                    voltage: common_voltage("departments", &rows)?,
                })
            }
        }
    }
}

fn validate_rows(field: &str, rows: &[Equipment]) -> CalcResult<()> {
    for (i, row) in rows.iter().enumerate() {
        row.validate(&format!("{}[{}]", field, i))?;
    }
    common_voltage(field, rows)?;
    Ok(())
}

/// All rows of one bus must share its voltage
fn common_voltage(field: &str, rows: &[Equipment]) -> CalcResult<Kilovolts> {
    let first = rows.first().map(|row| row.voltage).ok_or_else(|| {
        CalcError::invalid_input(field, "[]", "At least one equipment row is required")
    })?;
    for (i, row) in rows.iter().enumerate() {
        if (row.voltage.0 - first.0).abs() > VOLTAGE_MATCH_TOLERANCE {
            return Err(CalcError::invalid_input(
                format!("{}[{}].voltage", field, i),
                row.voltage.0.to_string(),
                format!("Rows on one bus must share a voltage ({} kV)", first.0),
            ));
        }
    }
    Ok(first)
}

fn sum_rows(rows: &[Equipment]) -> LoadSums {
    let mut sums = LoadSums::default();
    for row in rows {
        sums.add(
            f64::from(row.quantity),
            row.nominal_power,
            row.usage_coefficient,
            row.reactive_power_factor,
        );
    }
    sums
}

// =============================================================================
// RESULT
// =============================================================================

/// Per-row totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentLoad {
    pub name: String,
    /// n·P_n, kW
    #[serde(rename = "totalNominalPower")]
    pub total_nominal_power: f64,
    /// Rated current of the row, A
    pub current: f64,
}

/// Design loads of the group and the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricalLoadResult {
    pub group_utilization_coefficient: f64,
    pub effective_equipment_count: f64,
    /// kW
    pub total_active_power_dept: f64,
    /// kvar
    pub total_reactive_power_dept: f64,
    /// kVA
    pub total_apparent_power_dept: f64,
    /// A
    pub total_current_dept: f64,

    pub total_dept_utilization_coef: f64,
    pub effective_equipment_dept_amount: f64,
    #[serde(rename = "totalActivePowerDept1")]
    pub total_active_power_bus: f64,
    #[serde(rename = "totalReactivePowerDept1")]
    pub total_reactive_power_bus: f64,
    #[serde(rename = "totalApparentPowerDept1")]
    pub total_apparent_power_bus: f64,
    #[serde(rename = "totalCurrentDept1")]
    pub total_current_bus: f64,

    pub equipment: Vec<EquipmentLoad>,
}

/// Calculate group and bus design loads.
pub fn calculate(input: &ElectricalLoadInput) -> CalcResult<ElectricalLoadResult> {
    input.validate()?;

    let group_voltage = common_voltage("equipmentList", &input.equipment)?;
    let group = sum_rows(&input.equipment);

    let kv = group.utilization_coefficient("groupUtilizationCoefficient")?;
    let ne = group.effective_count("effectiveEquipmentCount")?.ceil();
    let p = input.group_design_coefficient * group.utilized;
    let q = reactive_load_factor(ne) * group.utilized_reactive;
    let s = apparent_power("totalApparentPowerDept", p, q)?;
    let i = finite("totalCurrentDept", p / group_voltage.0)?;

    let totals = input.workshop_totals()?;
    let bus = totals.sums();
    let kv_bus = bus.utilization_coefficient("totalDeptUtilizationCoef")?;
    let ne_bus = bus.effective_count("effectiveEquipmentDeptAmount")?;
    let p_bus = input.bus_design_coefficient * bus.utilized;
    let q_bus = input.bus_design_coefficient * bus.utilized_reactive;
    let s_bus = apparent_power("totalApparentPowerDept1", p_bus, q_bus)?;
    let i_bus = finite("totalCurrentDept1", p_bus / totals.voltage.0)?;

    let equipment = input
        .equipment
        .iter()
        .map(|row| {
            let total = row.row_power();
            rated_current("current", total, row.voltage.0, row.power_factor, row.efficiency).map(
                |current| EquipmentLoad {
                    name: row.name.clone(),
                    total_nominal_power: total,
                    current,
                },
            )
        })
        .collect::<CalcResult<Vec<_>>>()?;

    Ok(ElectricalLoadResult {
        group_utilization_coefficient: kv,
        effective_equipment_count: ne,
        total_active_power_dept: p,
        total_reactive_power_dept: q,
        total_apparent_power_dept: s,
        total_current_dept: i,
        total_dept_utilization_coef: kv_bus,
        effective_equipment_dept_amount: ne_bus,
        total_active_power_bus: p_bus,
        total_reactive_power_bus: q_bus,
        total_apparent_power_bus: s_bus,
        total_current_bus: i_bus,
        equipment,
    })
}
