//! Deserialization helpers for payloads produced by loosely typed backends.

/// Accepts a JSON array and decodes every element on its own. Elements that
/// do not decode are skipped. `null`, a missing field or any non-array value
/// yields an empty vec. Use together with `#[serde(default)]`.
pub mod lenient_vec {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let items = match value {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(other) => {
                log::warn!("expected an array, found {other}; treating it as empty");
                return Ok(Vec::new());
            }
        };

        let total = items.len();
        let decoded = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
                Ok(value) => Some(value),
                Err(why) => {
                    log::warn!("skipping array element {index}: {why}");
                    None
                }
            })
            .collect::<Vec<_>>();
        if decoded.len() != total {
            log::debug!("decoded {} of {} array elements", decoded.len(), total);
        }
        Ok(decoded)
    }
}

/// Decodes an optional value, yielding `None` with a warning if it is present
/// but does not decode. Use together with `#[serde(default)]`.
pub mod lenient_option {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => match serde_json::from_value::<T>(value) {
                Ok(value) => Ok(Some(value)),
                Err(why) => {
                    log::warn!("ignoring undecodable value: {why}");
                    Ok(None)
                }
            },
        }
    }
}

/// Accepts either a JSON string or a JSON number and yields its string form.
pub mod string_or_number {
    use core::fmt;

    use serde::{
        de::{self, Visitor},
        Deserializer,
    };

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrNumberVisitor;

        impl<'de> Visitor<'de> for StringOrNumberVisitor {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a number")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
                Ok(value.to_owned())
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
                Ok(value)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
                Ok(value.to_string())
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
                Ok(value.to_string())
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<String, E> {
                Ok(value.to_string())
            }
        }

        deserializer.deserialize_any(StringOrNumberVisitor)
    }
}

/// Maps an explicit `null` to `T::default()`. Use together with
/// `#[serde(default)]` to also cover a missing field.
pub mod null_as_default {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
