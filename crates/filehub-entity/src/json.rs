//! Lenient field extraction from server JSON.
//!
//! A field that is absent, `null`, or falsy yields the fallback.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Read a string field, falling back to an empty string.
///
/// Numbers and `true` are rendered as text.
pub fn string_or_default(data: &Value, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

/// Read an identifier that may be a string or a number.
///
/// Empty strings and zero are treated as absent.
pub fn optional_id(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a non-negative integer field, falling back to zero.
pub fn u64_or_zero(data: &Value, key: &str) -> u64 {
    match data.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Read a timestamp field.
///
/// Accepts RFC 3339 strings, naive `YYYY-MM-DDTHH:MM:SS[.fff]` strings
/// (taken as UTC), and epoch milliseconds.
pub fn optional_timestamp(data: &Value, key: &str) -> Option<DateTime<Utc>> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => parse_timestamp(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
