// Null-tolerant decoding for response fields. The API sends `null` for
// unset values as often as it omits the key.

use serde::{Deserialize, Deserializer};

/// Decode `T`, reading an explicit `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "super::null_as_default")]
        count: i64,
    }

    #[test]
    fn null_missing_and_present() {
        let p: Sample = serde_json::from_value(json!({ "name": null })).unwrap();
        assert_eq!((p.name.as_str(), p.count), ("", 0));

        let p: Sample = serde_json::from_value(json!({ "name": "x", "count": 3 })).unwrap();
        assert_eq!((p.name.as_str(), p.count), ("x", 3));

        assert!(serde_json::from_value::<Sample>(json!({ "count": "3" })).is_err());
    }
}
