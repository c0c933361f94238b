use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// AniWatch delivers unix timestamps sometimes as number, sometimes as string and sometimes not
/// at all. Everything which cannot be interpreted as timestamp becomes [`None`].
pub(crate) fn deserialize_maybe_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let secs = match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f as i64)),
        Some(Value::String(string)) => string.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(secs.and_then(|s| DateTime::<Utc>::from_timestamp(s, 0)))
}

/// Flags are delivered as `true` / `false`, `1` / `0` or even `"1"` / `"0"`. Unknown values
/// become [`None`].
pub(crate) fn deserialize_maybe_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(bool)) => Some(bool),
        Some(Value::Number(number)) => number.as_i64().map(|n| n != 0),
        Some(Value::String(string)) => match string.trim() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Numbers which may be delivered as json number or as string. Values which are neither (or not
/// parsable) become [`None`].
pub(crate) fn deserialize_maybe_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(string)) => string.trim().parse::<T>().ok(),
        Some(number @ Value::Number(_)) => serde_json::from_value(number).ok(),
        _ => None,
    })
}

/// Like [`deserialize_maybe_number`] but for required values like ids.
pub(crate) fn deserialize_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
{
    deserialize_maybe_number(deserializer)?
        .ok_or_else(|| Error::custom("value is neither a number nor a number string"))
}

/// Strings which are sometimes delivered as number. `null` and empty strings become [`None`].
pub(crate) fn deserialize_maybe_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(string)) if !string.is_empty() => Some(string),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(bool)) => Some(bool.to_string()),
        _ => None,
    })
}

/// Some response values are `null` for whatever reason even though they shouldn't be.
pub(crate) fn deserialize_maybe_null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value: Option<T> = Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Lists which are sometimes a comma separated string (e.g. synonyms) and sometimes an actual
/// json array.
pub(crate) fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(string)) => string
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::Array(array)) => array
            .into_iter()
            .filter_map(|v| match v {
                Value::String(string) => Some(string),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        _ => vec![],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Fields {
        #[serde(deserialize_with = "deserialize_maybe_timestamp")]
        timestamp: Option<DateTime<Utc>>,
        #[serde(deserialize_with = "deserialize_maybe_bool")]
        flag: Option<bool>,
        #[serde(deserialize_with = "deserialize_maybe_number")]
        number: Option<u32>,
        #[serde(deserialize_with = "deserialize_string_or_vec")]
        list: Vec<String>,
    }

    #[test]
    fn broken_timestamp_is_none() {
        let fields: Fields = serde_json::from_str(r#"{"timestamp": "not a date"}"#).unwrap();
        assert!(fields.timestamp.is_none());

        let fields: Fields = serde_json::from_str(r#"{"timestamp": null}"#).unwrap();
        assert!(fields.timestamp.is_none())
    }

    #[test]
    fn timestamp_as_number_and_string() {
        let fields: Fields = serde_json::from_str(r#"{"timestamp": 1577836800}"#).unwrap();
        assert_eq!(fields.timestamp.unwrap().to_rfc3339(), "2020-01-01T00:00:00+00:00");

        let fields: Fields = serde_json::from_str(r#"{"timestamp": "1577836800"}"#).unwrap();
        assert_eq!(fields.timestamp.unwrap().timestamp(), 1577836800)
    }

    #[test]
    fn flags_and_numbers() {
        let fields: Fields =
            serde_json::from_str(r#"{"flag": 1, "number": "12", "list": "a, b,,c"}"#).unwrap();
        assert_eq!(fields.flag, Some(true));
        assert_eq!(fields.number, Some(12));
        assert_eq!(fields.list, vec!["a", "b", "c"]);

        let fields: Fields = serde_json::from_str(r#"{"flag": "maybe", "number": "x"}"#).unwrap();
        assert_eq!(fields.flag, None);
        assert_eq!(fields.number, None)
    }
}
