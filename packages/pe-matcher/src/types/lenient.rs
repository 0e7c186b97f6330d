//! Forgiving deserializers for model-produced JSON.
//!
//! Model replies follow the requested shape loosely: numbers arrive as
//! strings, lists arrive as `null`, a one-item list arrives as a bare
//! string, a nested record arrives as a sentence. These helpers map such values onto the typed fields instead of
//! failing the whole parse. Values that cannot be interpreted become `None`
//! (or empty), never an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Optional float from a number or a numeric string.
pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Optional integer from an integer, an integral float, or a numeric string.
pub fn option_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }))
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

/// Optional string; scalars are stringified, blanks become `None`.
pub fn option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string))
}

/// List of strings; `null` is empty, a bare string is a one-item list,
/// non-scalar items are dropped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
        None => Vec::new(),
    })
}

/// Optional nested record; anything but an object becomes `None`.
pub fn option_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| record(v, None)))
}

/// Like [`option_record`], but a bare string is turned into a record by
/// `from_text`.
pub fn option_record_or_text<'de, D, T>(
    deserializer: D,
    from_text: fn(String) -> T,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| record(v, Some(from_text))))
}

/// List of records; `null` is empty, a lone object is a one-item list,
/// items that are not objects are dropped.
pub fn record_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(records(value, None))
}

/// Like [`record_list`], but bare-string items go through `from_text`.
pub fn record_list_or_text<'de, D, T>(
    deserializer: D,
    from_text: fn(String) -> T,
) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(records(value, Some(from_text)))
}

fn records<T: DeserializeOwned>(value: Option<Value>, from_text: Option<fn(String) -> T>) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| record(item, from_text))
            .collect(),
        Some(other) => record(other, from_text).into_iter().collect(),
        None => Vec::new(),
    }
}

fn record<T: DeserializeOwned>(value: Value, from_text: Option<fn(String) -> T>) -> Option<T> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        Value::String(s) if !s.trim().is_empty() => from_text.map(|f| f(s)),
        _ => None,
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "option_f64")]
        confidence: Option<f64>,
        #[serde(default, deserialize_with = "option_i64")]
        year: Option<i64>,
        #[serde(default, deserialize_with = "option_string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "string_list")]
        tags: Vec<String>,
    }

    fn fields(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers_from_strings() {
        let p = fields(r#"{"confidence": "0.75", "year": "2011"}"#);
        assert_eq!(p.confidence, Some(0.75));
        assert_eq!(p.year, Some(2011));
    }

    #[test]
    fn test_integral_float_year() {
        assert_eq!(fields(r#"{"year": 1998.0}"#).year, Some(1998));
        assert_eq!(fields(r#"{"year": 1998.5}"#).year, None);
        assert_eq!(fields(r#"{"year": "unknown"}"#).year, None);
    }

    #[test]
    fn test_absent_and_null() {
        let p = fields(r#"{"confidence": null, "tags": null}"#);
        assert_eq!(p.confidence, None);
        assert_eq!(p.year, None);
        assert!(p.tags.is_empty());
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Named {
        #[serde(default, deserialize_with = "option_string")]
        name: Option<String>,
    }

    fn named(text: String) -> Named {
        Named { name: Some(text) }
    }

    fn named_or_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Named>, D::Error> {
        option_record_or_text(d, named)
    }

    fn named_list_or_text<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Named>, D::Error> {
        record_list_or_text(d, named)
    }

    #[derive(Debug, Deserialize)]
    struct Records {
        #[serde(default, deserialize_with = "option_record")]
        strict: Option<Named>,
        #[serde(default, deserialize_with = "named_or_text")]
        loose: Option<Named>,
        #[serde(default, deserialize_with = "record_list")]
        items: Vec<Named>,
        #[serde(default, deserialize_with = "named_list_or_text")]
        loose_items: Vec<Named>,
    }

    fn records_of(json: &str) -> Records {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_records_accept_objects() {
        let r = records_of(r#"{"strict": {"name": "a"}, "items": [{"name": "b"}], "loose": {"name": "c"}}"#);
        assert_eq!(r.strict, Some(named("a".into())));
        assert_eq!(r.items, vec![named("b".into())]);
        assert_eq!(r.loose, Some(named("c".into())));
    }

    #[test]
    fn test_records_tolerate_other_shapes() {
        let r = records_of(
            r#"{"strict": "text", "loose": "text", "items": ["x", 3, {"name": "b"}, null], "loose_items": ["Dana", 7]}"#,
        );
        assert_eq!(r.strict, None);
        assert_eq!(r.loose, Some(named("text".into())));
        assert_eq!(r.items, vec![named("b".into())]);
        assert_eq!(r.loose_items, vec![named("Dana".into())]);

        let r = records_of(r#"{"strict": [1, 2], "loose": 12, "items": {"name": "solo"}, "loose_items": null}"#);
        assert_eq!(r.strict, None);
        assert_eq!(r.loose, None);
        assert_eq!(r.items, vec![named("solo".into())]);
        assert!(r.loose_items.is_empty());
    }

    #[test]
    fn test_string_shapes() {
        let p = fields(r#"{"name": "  ", "tags": "SaaS"}"#);
        assert_eq!(p.name, None);
        assert_eq!(p.tags, vec!["SaaS".to_string()]);

        let p = fields(r#"{"name": 42, "tags": ["a", {"x": 1}, 3]}"#);
        assert_eq!(p.name.as_deref(), Some("42"));
        assert_eq!(p.tags, vec!["a".to_string(), "3".to_string()]);
    }
}
