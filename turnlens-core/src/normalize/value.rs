//! Loose value semantics shared by the extractors
//!
//! Upstream payloads treat "missing", `null`, `""`, `0` and `false` alike, so
//! presence checks go through [`is_truthy`] rather than `Option::is_some`.

use serde_json::Value;

/// Whether a value counts as present for fallback chains.
///
/// `null`, `false`, `0`, `NaN` and the empty string are absent; every array
/// and object (even empty) is present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look up `key` on an object and return it only when truthy
pub fn truthy_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_truthy(v))
}

/// Return the first truthy field among `keys`, in order
pub fn first_truthy<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| truthy_field(value, key))
}

/// Compact structural serialization
pub fn to_json_text(value: &Value) -> String {
    value.to_string()
}

/// Coerce a value to display text the way a host page would print it.
///
/// Strings are returned verbatim, scalars use their JSON spelling, arrays are
/// joined with `,` (nulls inside become empty) and objects collapse to
/// `[object Object]`.
pub fn coerce_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Render a value as a string when it is one, or its serialization otherwise
pub fn string_or_json(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => to_json_text(other),
    }
}

/// Read a token count, clamping anything non-numeric or negative to zero
pub fn count_field(value: Option<&Value>, key: &str) -> u64 {
    let Some(raw) = value.and_then(|v| v.get(key)) else {
        return 0;
    };

    if let Some(n) = raw.as_u64() {
        return n;
    }

    match raw.as_f64() {
        Some(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(-1)));
    }

    #[test]
    fn test_coerce_to_text() {
        assert_eq!(coerce_to_text(&json!("a")), "a");
        assert_eq!(coerce_to_text(&json!(42)), "42");
        assert_eq!(coerce_to_text(&json!(true)), "true");
        assert_eq!(coerce_to_text(&json!([1, null, "x"])), "1,,x");
        assert_eq!(coerce_to_text(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn test_first_truthy_skips_empty() {
        let value = json!({"question": "", "input": "fallback"});
        assert_eq!(
            first_truthy(&value, &["question", "input"]),
            Some(&json!("fallback"))
        );
    }

    #[test]
    fn test_count_field() {
        let usage = json!({"a": 5, "b": "7", "c": -3, "d": 2.9});
        assert_eq!(count_field(Some(&usage), "a"), 5);
        assert_eq!(count_field(Some(&usage), "b"), 0);
        assert_eq!(count_field(Some(&usage), "c"), 0);
        assert_eq!(count_field(Some(&usage), "d"), 2);
        assert_eq!(count_field(Some(&usage), "missing"), 0);
        assert_eq!(count_field(None, "a"), 0);
    }
}
