//! Lenient deserializers for the JSON input boundary.
//!
//! Resumes and job postings arrive from form state, parsed uploads and scrapers,
//! so individual fields are frequently missing, null, or of the wrong JSON type.
//! These helpers never fail: a value that cannot be read as the target type is
//! treated as absent, and list items that fail to decode are dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a string field. Non-string values become `None`.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Reads a string field into a plain `String`, defaulting to empty.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string(deserializer)?.unwrap_or_default())
}

/// Reads a boolean. Accepts JSON booleans and the strings "true"/"false".
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Reads a numeric id given either as a JSON number or a numeric string.
pub fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_i64(&value).unwrap_or_default())
}

/// Reads an optional float given either as a JSON number or a numeric string.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value))
}

/// Reads a list, dropping items that do not decode as `T`.
/// Anything other than a JSON array yields an empty list.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Treats blank strings as missing.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "flag")]
        remote: bool,
        #[serde(default, deserialize_with = "id")]
        id: i64,
        #[serde(default, deserialize_with = "list")]
        tags: Vec<String>,
    }

    #[test]
    fn test_wrong_types_become_absent() {
        let probe: Probe =
            serde_json::from_value(json!({"name": 42, "remote": "nope", "tags": "rust"})).unwrap();
        assert_eq!(probe.name, None);
        assert!(!probe.remote);
        assert!(probe.tags.is_empty());
    }

    #[test]
    fn test_id_accepts_numeric_string() {
        let probe: Probe = serde_json::from_value(json!({"id": "17"})).unwrap();
        assert_eq!(probe.id, 17);
    }

    #[test]
    fn test_list_drops_undecodable_items() {
        let probe: Probe = serde_json::from_value(json!({"tags": ["rust", 3, null, "go"]})).unwrap();
        assert_eq!(probe.tags, vec!["rust", "go"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let probe: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(probe.name, None);
        assert_eq!(probe.id, 0);
    }

    #[test]
    fn test_present_treats_blank_as_missing() {
        assert_eq!(present(&Some("   ".to_string())), None);
        assert_eq!(present(&Some(" a ".to_string())), Some("a"));
        assert_eq!(present(&None), None);
    }
}
