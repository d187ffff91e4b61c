//! Forgiving decoders for generator output.
//!
//! Generated JSON often uses numbers or booleans where text is expected, and
//! sometimes sends the plan as a list of lines. Scalars decode to their text
//! form so they still compare equal; nested objects are rejected.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn scalar_text(value: Value) -> Result<String, String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(format!("expected text, found {other}")),
    }
}

/// A string, or any JSON scalar rendered as text. `null` decodes as empty.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

/// An array of scalars rendered as text. `null` decodes as empty.
pub(crate) fn texts<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(scalar_text)
            .collect::<Result<_, _>>()
            .map_err(D::Error::custom),
        Value::Null => Ok(Vec::new()),
        other => Err(D::Error::custom(format!("expected a list, found {other}"))),
    }
}

/// A scalar, or an array of scalars joined one per line.
pub(crate) fn lines<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(scalar_text)
            .collect::<Result<Vec<_>, _>>()
            .map(|lines| lines.join("\n"))
            .map_err(D::Error::custom),
        other => scalar_text(other).map_err(D::Error::custom),
    }
}
