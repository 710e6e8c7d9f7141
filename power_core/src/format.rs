//! # Result Formatting
//!
//! Presentation of calculator output: response and error envelopes,
//! decimal rounding, and a plain-text rendering for terminals.
//!
//! Rounding happens here only. Calculators always return full precision.
//!
//! ## Example
//!
//! ```rust
//! use power_core::format::{render_text, round_value};
//! use serde_json::json;
//!
//! let result = round_value(json!({ "Ip0": 2.5378033810533, "Xc": 0.55125 }), 2);
//! assert_eq!(result["Ip0"], 2.54);
//! assert_eq!(render_text(&result, 2), "Ip0: 2.54\nXc: 0.55\n");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::errors::{CalcError, ErrorKind};

/// Most decimals worth showing for an `f64`. Larger requests are clamped.
pub const MAX_PRECISION: u32 = 17;

/// Successful evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Calculator name, e.g. `fault_current`
    pub calculator: String,
    pub project: u8,
    pub slug: String,
    pub result: Value,
}

/// Error body, `{"error": message, "code": ..., "kind": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub code: String,
    pub kind: ErrorKind,
}

impl From<&CalcError> for ErrorEnvelope {
    fn from(err: &CalcError) -> Self {
        Self {
            error: err.to_string(),
            code: err.error_code().to_string(),
            kind: err.kind(),
        }
    }
}

/// Round a float to `decimals` places (at most [`MAX_PRECISION`]);
/// non-finite values pass through.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals.min(MAX_PRECISION) as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        // Normalizes -0.0
        rounded + 0.0
    } else {
        value
    }
}

/// Round every float in a JSON tree. Integers are left untouched.
pub fn round_value(value: Value, decimals: u32) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => {
            let rounded = n.as_f64().map(|f| round_to(f, decimals));
            match rounded.and_then(Number::from_f64) {
                Some(number) => Value::Number(number),
                None => Value::Number(n),
            }
        }
        Value::Array(items) => Value::Array(items.into_iter().map(|v| round_value(v, decimals)).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k, round_value(v, decimals)))
                .collect(),
        ),
        other => other,
    }
}

/// Render one `key: value` line per leaf; nested keys are dotted and list
/// entries indexed (`equipment[0].current`). Floats show `decimals` places.
pub fn render_text(value: &Value, decimals: u32) -> String {
    let mut out = String::new();
    render_into(&mut out, "", value, decimals);
    out
}

fn render_into(out: &mut String, path: &str, value: &Value, decimals: u32) {
    match value {
        Value::Object(fields) => {
            for (key, child) in fields {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                render_into(out, &child_path, child, decimals);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                render_into(out, &format!("{}[{}]", path, i), child, decimals);
            }
        }
        leaf => {
            out.push_str(path);
            out.push_str(": ");
            out.push_str(&leaf_text(leaf, decimals));
            out.push('\n');
        }
    }
}

fn leaf_text(value: &Value, decimals: u32) -> String {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) => format!("{:.*}", decimals.min(MAX_PRECISION) as usize, f),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.5378033810533, 2), 2.54);
        assert_eq!(round_to(-508.3467457730427, 1), -508.3);
        assert_eq!(round_to(0.0003607305936073059, 5), 0.00036);
        assert_eq!(round_to(-0.001, 2).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_round_value_nested() {
        let value = json!({
            "krs": 1.4705882352941178,
            "dryMassComposition": { "ap": 11.764705882352942 },
            "contributions": [{ "amount": 10, "failureRate": 0.07000000000000001 }]
        });
        let rounded = round_value(value, 2);
        assert_eq!(rounded["krs"], 1.47);
        assert_eq!(rounded["dryMassComposition"]["ap"], 11.76);
        assert_eq!(rounded["contributions"][0]["amount"], 10);
        assert_eq!(rounded["contributions"][0]["failureRate"], 0.07);
    }

    #[test]
    fn test_render_text_paths() {
        let value = json!({
            "composition": { "CP": 83.66175 },
            "equipment": [{ "name": "Fan", "current": 36.69910177915241 }],
            "qR": 39.4814
        });
        let text = render_text(&value, 2);
        assert!(text.contains("composition.CP: 83.66\n"));
        assert!(text.contains("equipment[0].name: Fan\n"));
        assert!(text.contains("equipment[0].current: 36.70\n"));
        assert!(text.contains("qR: 39.48\n"));
    }

    #[test]
    fn test_precision_clamped() {
        assert!((round_to(2.5378033810533, u32::MAX) - 2.5378033810533).abs() < 1e-12);
        assert_eq!(round_to(1.5, 70_000), 1.5);
        let text = render_text(&json!({ "x": 1.5 }), 70_000);
        assert_eq!(text, "x: 1.50000000000000000\n");
    }

    #[test]
    fn test_render_integers_unchanged() {
        let text = render_text(&json!({ "amount": 6 }), 5);
        assert_eq!(text, "amount: 6\n");
    }

    #[test]
    fn test_error_envelope() {
        let err = CalcError::missing_field("hp");
        let envelope = ErrorEnvelope::from(&err);
        assert_eq!(envelope.code, "MISSING_FIELD");
        assert_eq!(envelope.kind, ErrorKind::Validation);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["error"], "Missing required field: hp");
        assert_eq!(json["kind"], "validation");
    }
}
