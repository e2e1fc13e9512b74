// Tolerant field extraction over raw `serde_json::Value` payloads.
//
// Providers disagree on key names for the same semantic field and sometimes
// ship numbers as strings; these helpers absorb both so the adapters in
// `nba.rs`, `mlb.rs`, and the live feed never fail on a malformed or renamed
// field. A field that cannot be read yields its safe default instead.

use serde_json::Value;

/// Return the first present (non-null) value among `keys`.
pub fn first<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(k))
        .find(|v| !v.is_null())
}

/// Interpret a JSON value as a number, accepting numeric strings.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Numeric field lookup across key aliases; malformed or missing reads as 0.
pub fn num(obj: &Value, keys: &[&str]) -> f64 {
    first(obj, keys).and_then(as_f64).unwrap_or(0.0)
}

/// String field lookup across key aliases, with a domain-conventional default.
/// Numbers are rendered back to strings so a provider that sends `0.287`
/// where another sends `".287"` still yields usable text.
pub fn text(obj: &Value, keys: &[&str], default: &str) -> String {
    match first(obj, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

/// Flatten a player collection that may be a JSON array or a keyed map
/// (some live-feed shapes key players by id instead of listing them).
pub fn as_entries(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn num_reads_numbers_and_numeric_strings() {
        let obj = json!({"pts": 25.4, "reb": "7"});
        assert_eq!(num(&obj, &["pts"]), 25.4);
        assert_eq!(num(&obj, &["reb"]), 7.0);
    }

    #[test]
    fn num_defaults_to_zero_on_missing_or_malformed() {
        let obj = json!({"ast": "N/A"});
        assert_eq!(num(&obj, &["ast"]), 0.0);
        assert_eq!(num(&obj, &["stl"]), 0.0);
    }

    #[test]
    fn num_tries_aliases_in_order() {
        let obj = json!({"turnover": 3.1});
        assert_eq!(num(&obj, &["tov", "turnover"]), 3.1);
    }

    #[test]
    fn text_skips_null_and_falls_back() {
        let obj = json!({"avg": null});
        assert_eq!(text(&obj, &["avg"], ".000"), ".000");
        let obj = json!({"avg": ".312"});
        assert_eq!(text(&obj, &["avg"], ".000"), ".312");
    }

    #[test]
    fn text_renders_numbers() {
        let obj = json!({"era": 3.5});
        assert_eq!(text(&obj, &["era"], "0.00"), "3.5");
    }

    #[test]
    fn entries_accepts_array_or_map() {
        let arr = json!([{"name": "A"}, {"name": "B"}]);
        assert_eq!(as_entries(&arr).len(), 2);

        let map = json!({"12": {"name": "A"}, "34": {"name": "B"}});
        assert_eq!(as_entries(&map).len(), 2);

        assert!(as_entries(&json!("not a collection")).is_empty());
    }
}
