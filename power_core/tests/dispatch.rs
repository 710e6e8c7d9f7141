//! End-to-end requests through `evaluate`, payloads as the forms post them.

use power_core::{evaluate, Calculator, ErrorEnvelope, ErrorKind, EvaluationOptions};
use serde_json::{json, Value};

fn full_precision() -> EvaluationOptions {
    EvaluationOptions {
        precision: Some(12),
        ..EvaluationOptions::default()
    }
}

fn assert_close(label: &str, actual: &Value, expected: f64, tol: f64) {
    let actual = actual
        .as_f64()
        .unwrap_or_else(|| panic!("{label} is not a number: {actual}"));
    assert!(
        (actual - expected).abs() <= tol,
        "{label} expected {expected} got {actual}"
    );
}

fn reference_equipment() -> Value {
    let rows = [
        ("Grinding machine", 4, 20, 0.15, 1.33),
        ("Drilling machine", 2, 14, 0.12, 1.0),
        ("Jointing machine", 4, 42, 0.15, 1.33),
        ("Circular saw", 1, 36, 0.3, 1.52),
        ("Press", 1, 20, 0.5, 0.75),
        ("Polishing machine", 1, 40, 0.2, 1.0),
        ("Milling machine", 2, 32, 0.2, 1.0),
        ("Fan", 1, 20, 0.65, 0.75),
    ];
    Value::Array(
        rows.iter()
            .map(|(name, n, pn, kv, tg)| {
                json!({
                    "name": name,
                    "efficiency": "0.92",
                    "powerFactor": "0.9",
                    "voltage": "0.38",
                    "quantity": n.to_string(),
                    "nominalPower": pn.to_string(),
                    "usageCoefficient": kv.to_string(),
                    "reactivePowerFactor": tg.to_string()
                })
            })
            .collect(),
    )
}

#[test]
fn unknown_calculator_is_not_found() {
    let err = evaluate(4, "9", &json!({}), &EvaluationOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.error_code(), "CALCULATOR_NOT_FOUND");

    let err = evaluate(9, "1", &json!({}), &EvaluationOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn fuel_form_with_string_numbers() {
    let payload = json!({
        "hp": "3.5", "cp": "48.7", "sp": "1.2", "np": "1.1", "op": "5.5", "wp": "32", "ap": "8"
    });
    let response = evaluate(1, "1", &payload, &full_precision()).unwrap();
    assert_eq!(response.calculator, "fuel_composition");
    assert_eq!(response.project, 1);
    assert_eq!(response.slug, "1");
    assert_close("krs", &response.result["krs"], 1.4706, 1e-4);
    assert_close("krg", &response.result["krg"], 1.6667, 1e-4);
    assert_close("dry ash", &response.result["dryMassComposition"]["ap"], 11.7647, 1e-4);
}

#[test]
fn fuel_form_empty_field_rejected() {
    let payload = json!({
        "hp": "", "cp": "48.7", "sp": "1.2", "np": "1.1", "op": "5.5", "wp": "32", "ap": "8"
    });
    let err = evaluate(1, "1", &payload, &EvaluationOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let envelope = ErrorEnvelope::from(&err);
    assert!(envelope.error.contains("hp"));
}

#[test]
fn fuel_closure_tolerance_modes() {
    let payload = json!({
        "hp": 3.4, "cp": 70.6, "sp": 2.7, "np": 1.2, "op": 1.9, "wp": 5, "ap": 15.2
    });
    assert!(evaluate(1, "1", &payload, &EvaluationOptions::default()).is_ok());

    let err = evaluate(1, "1", &payload, &EvaluationOptions::strict()).unwrap_err();
    assert_eq!(err.error_code(), "CLOSURE_SUM");

    for ash in [7.999, 8.001] {
        let payload = json!({
            "hp": 3.5, "cp": 48.7, "sp": 1.2, "np": 1.1, "op": 5.5, "wp": 32, "ap": ash
        });
        let err = evaluate(1, "1", &payload, &EvaluationOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), "CLOSURE_SUM");
    }
}

#[test]
fn default_precision_rounds_response() {
    let payload = json!({ "Pc": 5, "Sigma": 1, "B": 7 });
    let response = evaluate(3, "1", &payload, &EvaluationOptions::default()).unwrap();
    assert_eq!(response.result["profit"], -508.3);
    assert_eq!(response.result["revenue"], 165.8);
}

#[test]
fn repeated_requests_are_identical() {
    let payload = json!({ "Pc": 5, "Sigma": 0.25, "B": 7 });
    let a = evaluate(3, "1", &payload, &full_precision()).unwrap();
    let b = evaluate(3, "1", &payload, &full_precision()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn smoke_fuel_oil() {
    let payload = json!({ "h": 11.2, "c": 85.5, "s": 2.5, "o": 0.8, "w": 2, "a": 0.15, "v": 333.3, "qFO": 40.4 });
    let response = evaluate(1, "2", &payload, &full_precision()).unwrap();
    assert_close("CP", &response.result["composition"]["CP"], 83.66175, 1e-9);
    assert_close("qR", &response.result["qR"], 39.4814, 1e-9);
}

#[test]
fn smoke_emissions() {
    let payload = json!({
        "Q_i_r": 20.47, "a_vun": 0.8, "A_r": 25.2, "G_vun": 1.5,
        "eta_z_y": 0.985, "k_tv_s": 0, "B": 1096363
    });
    let response = evaluate(2, "1", &payload, &EvaluationOptions::default()).unwrap();
    assert_eq!(response.result["emissionIndex"], 149.98);
    assert_eq!(response.result["grossEmission"], 3365.89);
}

#[test]
fn smoke_conductor_sizing() {
    let payload = json!({
        "Unom": 10, "Sm": 1300, "Ik": 2.5, "P_TP": 2000, "Tf": 2.5,
        "Tm": 4000, "Ct": 92, "ConductorType": 1, "ConductorMaterial": "Al"
    });
    let response = evaluate(4, "1", &payload, &EvaluationOptions::default()).unwrap();
    assert_eq!(response.result["Im"], 37.53);
    assert_eq!(response.result["Im_pa"], 75.06);
    assert_eq!(response.result["Sek"], 26.81);
    assert_eq!(response.result["Smin"], 42.97);
}

#[test]
fn conductor_sizing_low_utilization_rejected() {
    let payload = json!({
        "Unom": 10, "Sm": 1300, "Ik": 2.5, "P_TP": 2000, "Tf": 2.5,
        "Tm": 500, "Ct": 92, "ConductorType": 1, "ConductorMaterial": 1
    });
    let err = evaluate(4, "1", &payload, &EvaluationOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn smoke_fault_current() {
    let payload = json!({ "Ucn": 10.5, "Sk": 200, "UkPerc": 10.5, "SNomT": 6.3 });
    let response = evaluate(4, "2", &payload, &full_precision()).unwrap();
    assert_close("Ip0", &response.result["Ip0"], 2.5378033810533, 1e-9);
}

#[test]
fn smoke_network_fault() {
    let payload = json!({
        "Uk_max": 11.1, "Uv_n": 115, "Un_n": 11, "Snom_t": 6.3,
        "Rc_n": 10.65, "Rc_min": 34.88, "Xc_n": 24.02, "Xc_min": 65.68,
        "L_l": 12.37, "R_0": 0.64, "X_0": 0.363
    });
    let response = evaluate(4, "3", &payload, &EvaluationOptions::default()).unwrap();
    let result = response.result.as_object().unwrap();
    assert_eq!(result.len(), 34);
    assert_eq!(result["Xt"], 233.01);
    assert_eq!(result["Ish3"], 258.09);
    assert_eq!(result["kpr"], 0.01);
    assert_eq!(result["I_l_n3"], 602.69);
}

#[test]
fn smoke_reliability_with_catalog_labels() {
    let payload = json!({
        "amounts": {
            "ПЛ-110 кВ": 10,
            "T-110 кВ": 1,
            "B-110 кВ (елегазовий)": 1,
            "B-10 кВ (малооливний)": 1,
            "Збірні шини 10 кВ на 1 приєднання": 6,
            "ЕД 0,38 кВ": 0
        }
    });
    let response = evaluate(5, "1", &payload, &EvaluationOptions::default()).unwrap();
    assert_eq!(response.result["wOc"], 0.295);
    assert_eq!(response.result["tVOc"], 10.71186);
    assert_eq!(response.result["wDs"], 0.02369);
    assert_eq!(response.result["contributions"].as_array().unwrap().len(), 5);
}

#[test]
fn reliability_unknown_class_rejected() {
    let payload = json!({ "amounts": { "T-750": 1 } });
    let err = evaluate(5, "1", &payload, &EvaluationOptions::default()).unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_CATEGORY");
}

#[test]
fn smoke_outage_losses() {
    let payload = json!({
        "omega": 0.01, "tV": 0.045, "pM": 5120, "tM": 6451,
        "kP": 0.004, "zPerA": 23.6, "zPerP": 17.6
    });
    let response = evaluate(5, "2", &payload, &EvaluationOptions::default()).unwrap();
    assert_eq!(response.result["mWnedA"], 14863.1);
    assert_eq!(response.result["mWnedP"], 132116.48);
    assert_eq!(response.result["mZper"], 2676019.3);
}

#[test]
fn smoke_electrical_load() {
    let payload = json!({
        "equipmentList": reference_equipment(),
        "kr": "1.25",
        "kr2": "0.7"
    });
    let response = evaluate(6, "1", &payload, &full_precision()).unwrap();
    let result = &response.result;
    assert_close("Kv", &result["groupUtilizationCoefficient"], 0.2087, 1e-4);
    assert_eq!(result["effectiveEquipmentCount"], 15.0);
    assert_close("P", &result["totalActivePowerDept"], 118.95, 1e-9);
    assert_close("Q", &result["totalReactivePowerDept"], 107.302, 1e-9);
    assert_close("P bus", &result["totalActivePowerDept1"], 526.4, 1e-9);
    assert_eq!(result["equipment"].as_array().unwrap().len(), 8);
}

#[test]
fn electrical_load_row_error_names_path() {
    let mut rows = reference_equipment();
    rows[2]["quantity"] = json!("-1");
    let payload = json!({ "equipmentList": rows, "kr": 1.25, "kr2": 0.7 });
    let err = evaluate(6, "1", &payload, &EvaluationOptions::default()).unwrap_err();
    assert!(err.to_string().contains("equipmentList[2].quantity"), "{}", err);
}

#[test]
fn every_calculator_lists_fields() {
    for calculator in Calculator::ALL {
        assert!(!calculator.fields().is_empty(), "{}", calculator.name());
    }
}

#[test]
fn non_object_payload_rejected() {
    let err = evaluate(4, "2", &json!([1, 2, 3]), &EvaluationOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
