//! Defensive extraction helpers over `serde_json::Value`.
//!
//! The upstream model's output is schema-shaped but not guaranteed: any
//! nested object or array may be absent, null, or wrongly typed. These
//! helpers back the single deep default-fill pass in `normalize`: a missing
//! or mistyped leaf degrades to its documented default instead of failing
//! the request.

use serde_json::Value;

/// Placeholder for descriptive fields the model left blank.
pub const NOT_AVAILABLE: &str = "Not available";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NOT_DISCLOSED: &str = "Not disclosed";
/// The literal the model uses for listings without salary data. The legacy
/// `jobDetails.salaryProvided` projection compares against this exact string.
pub const NOT_LISTED: &str = "Not listed";

static NULL: Value = Value::Null;

/// Nested field access that never fails: absent keys read as `Null`.
pub fn field<'a>(value: &'a Value, key: &str) -> &'a Value {
    value.get(key).unwrap_or(&NULL)
}

pub fn str_or(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

pub fn bool_or(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

pub fn count_or(value: &Value, key: &str) -> u32 {
    value
        .get(key)
        .and_then(Value::as_u64)
        .map(|n| n.min(u64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

pub fn f64_or(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Array access that degrades to an empty slice.
pub fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// String-array access; non-string elements are dropped.
pub fn str_list(value: &Value, key: &str) -> Vec<String> {
    items(value, key)
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_tolerates_absent_keys_and_non_objects() {
        let v = json!({"a": {"b": 1}});
        assert_eq!(field(&v, "a")["b"], 1);
        assert!(field(&v, "missing").is_null());
        assert!(field(field(&v, "missing"), "deeper").is_null());
        assert!(field(&json!(42), "key").is_null());
    }

    #[test]
    fn test_str_or_substitutes_on_wrong_type() {
        let v = json!({"name": 7, "ok": "fine"});
        assert_eq!(str_or(&v, "name", NOT_AVAILABLE), NOT_AVAILABLE);
        assert_eq!(str_or(&v, "ok", NOT_AVAILABLE), "fine");
        assert_eq!(str_or(&v, "missing", NOT_SPECIFIED), NOT_SPECIFIED);
    }

    #[test]
    fn test_bool_or_defaults_false() {
        let v = json!({"flag": "true", "real": true});
        assert!(!bool_or(&v, "flag")); // string, not a bool
        assert!(bool_or(&v, "real"));
        assert!(!bool_or(&v, "missing"));
    }

    #[test]
    fn test_count_or_defaults_zero_on_negatives_and_junk() {
        let v = json!({"n": 12, "neg": -3, "s": "12"});
        assert_eq!(count_or(&v, "n"), 12);
        assert_eq!(count_or(&v, "neg"), 0);
        assert_eq!(count_or(&v, "s"), 0);
        assert_eq!(count_or(&v, "missing"), 0);
    }

    #[test]
    fn test_items_degrades_to_empty() {
        let v = json!({"list": [1, 2], "obj": {}});
        assert_eq!(items(&v, "list").len(), 2);
        assert!(items(&v, "obj").is_empty());
        assert!(items(&v, "missing").is_empty());
    }

    #[test]
    fn test_str_list_drops_non_strings() {
        let v = json!({"tags": ["a", 1, null, "b"]});
        assert_eq!(str_list(&v, "tags"), vec!["a", "b"]);
    }
}
