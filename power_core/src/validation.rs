//! # Input Validation
//!
//! Turns a raw request payload (what a form posts: field name → raw value)
//! into checked numbers before any calculator sees it.
//!
//! A field is accepted when it is present, non-empty, and parses to a finite
//! number. JSON numbers and numeric strings are both accepted, since HTML
//! number inputs submit strings.
//!
//! ## Closure sums
//!
//! Composition inputs (fuel as-received percentages) must add up to 100.
//! Binary floating point rarely makes that exact, e.g. `3.4 + 70.6 + 2.7 +
//! 1.2 + 1.9 + 5 + 15.2` evaluates to `100.00000000000001`, so the check
//! uses [`DEFAULT_CLOSURE_TOLERANCE`]. Pass a tolerance of `0.0` to demand
//! exact equality.
//!
//! ## Example
//!
//! ```rust
//! use power_core::validation::FieldBag;
//! use serde_json::json;
//!
//! let payload = json!({ "Unom": "10", "Sm": 1300 });
//! let bag = FieldBag::from_value(&payload).unwrap();
//! assert_eq!(bag.require_number("Unom").unwrap(), 10.0);
//! assert!(bag.require_number("Ik").is_err());
//! ```

use serde_json::{Map, Value};

use crate::errors::{CalcError, CalcResult};

/// Default allowed deviation of a closure sum from its target.
///
/// Small enough to reject `99.999` and `100.001`, large enough to absorb
/// accumulated rounding of decimal percentages.
pub const DEFAULT_CLOSURE_TOLERANCE: f64 = 1e-9;

/// A categorical selector as submitted: either an integer code (dropdown
/// index) or a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selector<'a> {
    Code(i64),
    Label(&'a str),
}

/// Read-only view over one JSON object of raw form values.
#[derive(Debug, Clone)]
pub struct FieldBag<'a> {
    fields: &'a Map<String, Value>,
    path: String,
}

impl<'a> FieldBag<'a> {
    /// Wrap a payload, which must be a JSON object.
    pub fn from_value(value: &'a Value) -> CalcResult<Self> {
        Self::at_path(value, String::new())
    }

    fn at_path(value: &'a Value, path: String) -> CalcResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields, path }),
            other => Err(CalcError::invalid_input(
                if path.is_empty() { "payload".to_string() } else { path },
                short_repr(other),
                "Expected a JSON object",
            )),
        }
    }

    /// Full dotted path of a field, used in error messages.
    pub fn field_path(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.path, field)
        }
    }

    /// True when the field is present and not `null`.
    pub fn contains(&self, field: &str) -> bool {
        matches!(self.fields.get(field), Some(v) if !v.is_null())
    }

    fn raw(&self, field: &str) -> CalcResult<&'a Value> {
        match self.fields.get(field) {
            Some(Value::Null) | None => Err(CalcError::missing_field(self.field_path(field))),
            Some(value) => Ok(value),
        }
    }

    /// A required finite number.
    pub fn require_number(&self, field: &str) -> CalcResult<f64> {
        let value = self.raw(field)?;
        parse_number(&self.field_path(field), value)
    }

    /// An optional number: absent, `null` and blank strings yield `None`.
    pub fn optional_number(&self, field: &str) -> CalcResult<Option<f64>> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(value) => parse_number(&self.field_path(field), value).map(Some),
        }
    }

    /// A required non-negative whole number (quantities, amounts).
    pub fn require_count(&self, field: &str) -> CalcResult<u32> {
        let value = self.raw(field)?;
        parse_count(&self.field_path(field), value)
    }

    /// A required non-empty string.
    pub fn require_text(&self, field: &str) -> CalcResult<&'a str> {
        match self.raw(field)? {
            Value::String(s) if !s.trim().is_empty() => Ok(s.as_str()),
            Value::String(_) => Err(CalcError::invalid_input(
                self.field_path(field),
                "\"\"",
                "Field is empty",
            )),
            other => Err(CalcError::invalid_input(
                self.field_path(field),
                short_repr(other),
                "Expected text",
            )),
        }
    }

    /// A required categorical selector, given as an integer code or a label.
    pub fn require_selector(&self, field: &str) -> CalcResult<Selector<'a>> {
        let path = self.field_path(field);
        match self.raw(field)? {
            Value::Number(n) => n
                .as_i64()
                .map(Selector::Code)
                .ok_or_else(|| CalcError::unknown_category(path, n.to_string())),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(CalcError::invalid_input(path, "\"\"", "Field is empty"));
                }
                Ok(trimmed
                    .parse::<i64>()
                    .map(Selector::Code)
                    .unwrap_or(Selector::Label(trimmed)))
            }
            other => Err(CalcError::unknown_category(path, short_repr(other))),
        }
    }

    /// A required nested object.
    pub fn require_object(&self, field: &str) -> CalcResult<FieldBag<'a>> {
        let value = self.raw(field)?;
        Self::at_path(value, self.field_path(field))
    }

    /// An optional nested object.
    pub fn optional_object(&self, field: &str) -> CalcResult<Option<FieldBag<'a>>> {
        if !self.contains(field) {
            return Ok(None);
        }
        self.require_object(field).map(Some)
    }

    /// A required array of objects; each element becomes its own bag.
    pub fn require_array(&self, field: &str) -> CalcResult<Vec<FieldBag<'a>>> {
        let path = self.field_path(field);
        match self.raw(field)? {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Self::at_path(item, format!("{}[{}]", path, i)))
                .collect(),
            other => Err(CalcError::invalid_input(path, short_repr(other), "Expected a list")),
        }
    }

    /// A required array of arrays of objects (e.g. departments of equipment).
    pub fn require_nested_arrays(&self, field: &str) -> CalcResult<Vec<Vec<FieldBag<'a>>>> {
        let path = self.field_path(field);
        match self.raw(field)? {
            Value::Array(groups) => groups
                .iter()
                .enumerate()
                .map(|(i, group)| -> CalcResult<Vec<FieldBag<'a>>> {
                    let group_path = format!("{}[{}]", path, i);
                    match group {
                        Value::Array(items) => items
                            .iter()
                            .enumerate()
                            .map(|(j, item)| Self::at_path(item, format!("{}[{}]", group_path, j)))
                            .collect(),
                        other => Err(CalcError::invalid_input(
                            group_path,
                            short_repr(other),
                            "Expected a list",
                        )),
                    }
                })
                .collect(),
            other => Err(CalcError::invalid_input(path, short_repr(other), "Expected a list")),
        }
    }

    /// Interpret every entry of this object as `key → count`.
    pub fn counts(&self) -> CalcResult<Vec<(&'a str, u32)>> {
        self.fields
            .iter()
            .map(|(key, value)| {
                parse_count(&self.field_path(key), value).map(|count| (key.as_str(), count))
            })
            .collect()
    }
}

/// Check that a set of named components adds up to `target`.
///
/// Returns the observed sum on success.
pub fn check_closure_sum(components: &[(&str, f64)], target: f64, tolerance: f64) -> CalcResult<f64> {
    let sum: f64 = components.iter().map(|(_, value)| value).sum();
    if (sum - target).abs() > tolerance {
        let names: Vec<&str> = components.iter().map(|(name, _)| *name).collect();
        return Err(CalcError::closure_sum(&names, sum, target));
    }
    Ok(sum)
}

/// Reject zero and negative values.
pub fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
    }
    Ok(())
}

/// Reject negative values.
pub fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Cannot be negative"));
    }
    Ok(())
}

/// Require a fraction in `[0, 1]`.
pub fn require_fraction(field: &str, value: f64) -> CalcResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be between 0 and 1",
        ));
    }
    Ok(())
}

/// Require a percentage in `[0, 100]`.
pub fn require_percentage(field: &str, value: f64) -> CalcResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be between 0 and 100%",
        ));
    }
    Ok(())
}

fn parse_number(path: &str, value: &Value) -> CalcResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(CalcError::invalid_input(path, "\"\"", "Field is empty"));
            }
            trimmed.parse::<f64>().ok()
        }
        Value::Null => return Err(CalcError::missing_field(path)),
        other => {
            return Err(CalcError::invalid_input(path, short_repr(other), "Expected a number"));
        }
    };

    match parsed {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(CalcError::invalid_input(
            path,
            short_repr(value),
            "Not a finite number",
        )),
    }
}

fn parse_count(path: &str, value: &Value) -> CalcResult<u32> {
    let number = parse_number(path, value)?;
    if number < 0.0 {
        return Err(CalcError::invalid_input(path, number.to_string(), "Cannot be negative"));
    }
    if number.fract() != 0.0 || number > f64::from(u32::MAX) {
        return Err(CalcError::invalid_input(
            path,
            number.to_string(),
            "Must be a whole number",
        ));
    }
    Ok(number as u32)
}

fn short_repr(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > 40 {
        let head: String = text.chars().take(37).collect();
        format!("{}...", head)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_numbers_and_numeric_strings() {
        let payload = json!({ "a": 1.5, "b": " 2.25 ", "c": -3 });
        let bag = FieldBag::from_value(&payload).unwrap();
        assert_eq!(bag.require_number("a").unwrap(), 1.5);
        assert_eq!(bag.require_number("b").unwrap(), 2.25);
        assert_eq!(bag.require_number("c").unwrap(), -3.0);
    }

    #[test]
    fn test_missing_and_null_fields() {
        let payload = json!({ "a": null });
        let bag = FieldBag::from_value(&payload).unwrap();
        assert_eq!(
            bag.require_number("a").unwrap_err(),
            CalcError::missing_field("a")
        );
        assert_eq!(
            bag.require_number("b").unwrap_err(),
            CalcError::missing_field("b")
        );
    }

    #[test]
    fn test_empty_field_rejected() {
        let payload = json!({ "hp": "" , "cp": "   " });
        let bag = FieldBag::from_value(&payload).unwrap();
        for field in ["hp", "cp"] {
            let err = bag.require_number(field).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_non_numeric_and_non_finite_rejected() {
        let payload = json!({ "a": "abc", "b": "NaN", "c": "inf", "d": true, "e": [1] });
        let bag = FieldBag::from_value(&payload).unwrap();
        for field in ["a", "b", "c", "d", "e"] {
            assert!(bag.require_number(field).is_err(), "field {} accepted", field);
        }
    }

    #[test]
    fn test_payload_must_be_object() {
        let payload = json!([1, 2, 3]);
        assert!(FieldBag::from_value(&payload).is_err());
    }

    #[test]
    fn test_optional_number() {
        let payload = json!({ "a": "", "b": 4 });
        let bag = FieldBag::from_value(&payload).unwrap();
        assert_eq!(bag.optional_number("a").unwrap(), None);
        assert_eq!(bag.optional_number("b").unwrap(), Some(4.0));
        assert_eq!(bag.optional_number("zzz").unwrap(), None);
    }

    #[test]
    fn test_counts() {
        let payload = json!({ "n": "3", "m": 2.5, "k": -1 });
        let bag = FieldBag::from_value(&payload).unwrap();
        assert_eq!(bag.require_count("n").unwrap(), 3);
        assert!(bag.require_count("m").is_err());
        assert!(bag.require_count("k").is_err());
    }

    #[test]
    fn test_selector_code_and_label() {
        let payload = json!({ "a": 1, "b": "2", "c": "copper" });
        let bag = FieldBag::from_value(&payload).unwrap();
        assert_eq!(bag.require_selector("a").unwrap(), Selector::Code(1));
        assert_eq!(bag.require_selector("b").unwrap(), Selector::Code(2));
        assert_eq!(bag.require_selector("c").unwrap(), Selector::Label("copper"));
    }

    #[test]
    fn test_nested_paths_in_errors() {
        let payload = json!({ "equipmentList": [{ "quantity": 2 }, { "quantity": "" }] });
        let bag = FieldBag::from_value(&payload).unwrap();
        let rows = bag.require_array("equipmentList").unwrap();
        assert_eq!(rows.len(), 2);
        match rows[1].require_number("quantity").unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "equipmentList[1].quantity"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_closure_sum_exact_hundred() {
        let parts = [("a", 40.0), ("b", 60.0)];
        assert_eq!(check_closure_sum(&parts, 100.0, DEFAULT_CLOSURE_TOLERANCE).unwrap(), 100.0);
    }

    #[test]
    fn test_closure_sum_rejects_near_misses() {
        for total in [99.999, 100.001] {
            let parts = [("a", 50.0), ("b", total - 50.0)];
            let err = check_closure_sum(&parts, 100.0, DEFAULT_CLOSURE_TOLERANCE).unwrap_err();
            assert_eq!(err.error_code(), "CLOSURE_SUM");
        }
    }

    #[test]
    fn test_closure_sum_absorbs_rounding() {
        let parts = [
            ("hp", 3.4),
            ("cp", 70.6),
            ("sp", 2.7),
            ("np", 1.2),
            ("op", 1.9),
            ("wp", 5.0),
            ("ap", 15.2),
        ];
        assert!(check_closure_sum(&parts, 100.0, DEFAULT_CLOSURE_TOLERANCE).is_ok());
        // Exact comparison trips over the binary representation
        assert!(check_closure_sum(&parts, 100.0, 0.0).is_err());
    }

    #[test]
    fn test_range_helpers() {
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_non_negative("x", 0.0).is_ok());
        assert!(require_fraction("x", 1.2).is_err());
        assert!(require_percentage("x", 100.0).is_ok());
    }
}
