use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes a field, falling back to its default when the upstream sends
/// `null` or a value of the wrong type.
///
/// Malformed JSON is still an error.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
