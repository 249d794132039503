//! Raw text to [`Document`].

use jsview_schema::Document;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

use crate::error::LoadError;

/// Parse schema text: JSON first, YAML when that fails.
///
/// When both fail the YAML error is reported, since YAML accepts a superset
/// of what JSON does.
pub fn parse_text(text: &str) -> Result<Value, String> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) => {
            let yaml: YamlValue = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
            yaml_to_json(yaml)
        }
    }
}

/// YAML mapping keys may be scalars of any kind (`200:` in OpenAPI
/// responses); they become JSON strings.
fn yaml_to_json(value: YamlValue) -> Result<Value, String> {
    match value {
        YamlValue::Null => Ok(Value::Null),
        YamlValue::Bool(b) => Ok(Value::Bool(b)),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| format!("Cannot represent {n} as a JSON number"))
            }
        }
        YamlValue::String(s) => Ok(Value::String(s)),
        YamlValue::Sequence(items) => items
            .into_iter()
            .map(yaml_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                let key = match key {
                    YamlValue::String(s) => s,
                    YamlValue::Number(n) => n.to_string(),
                    YamlValue::Bool(b) => b.to_string(),
                    YamlValue::Null => "null".to_string(),
                    other => return Err(format!("Unsupported mapping key: {other:?}")),
                };
                map.insert(key, yaml_to_json(value)?);
            }
            Ok(Value::Object(map))
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

/// Parse schema text loaded from `location` into a document.
pub fn parse_document(location: &str, text: &str) -> Result<Document, LoadError> {
    let value = parse_text(text).map_err(|message| LoadError::new(location, message))?;
    Document::from_value(value).map_err(|e| LoadError::new(location, e.to_string()))
}
