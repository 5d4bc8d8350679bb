use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a boolean-ish value. Booleans pass through, the strings `"true"` and
/// `"false"` are accepted regardless of case or surrounding whitespace, and
/// anything else yields `prior`.
pub fn parse_flag(raw: &Value, prior: bool) -> bool {
    match raw {
        Value::Bool(flag) => *flag,
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => prior,
        },
        _ => prior,
    }
}

pub(super) fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(parse_flag(&raw, false))
}

pub(super) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(text) if !text.is_empty() => Some(text),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    })
}

pub(super) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(text) => text,
        Value::Null => String::new(),
        Value::Number(num) => num.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    })
}

pub(super) fn lenient_choices<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let Value::Array(items) = raw else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            Value::Number(num) => Some(num.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        })
        .collect())
}
