// Lenient deserializers for fields the API returns as either numbers or
// numeric strings depending on the plugin version.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn f64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(value_to_f64(&Value::deserialize(deserializer)?).unwrap_or_default())
}

pub(crate) fn i64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(value_to_i64(&Value::deserialize(deserializer)?).unwrap_or_default())
}

pub(crate) fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate_to_i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn truncate_to_i64(value: f64) -> i64 {
    value.trunc() as i64
}
