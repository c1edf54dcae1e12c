//! Fragment parsing from structured records (JSON, TOML or parsed values)

use super::fragment::{ConfigFragment, FragmentKind, MergeKind};
use crate::error::{CalcError, Result};
use crate::numeric::{to_exact, StatValue};
use serde_json::{Map, Value};
use tracing::debug;

/// A structured record to parse into a [`ConfigFragment`]
#[derive(Debug, Clone, Copy)]
pub enum FragmentSource<'a> {
    Json(&'a str),
    Toml(&'a str),
    Value(&'a Value),
}

/// Parse a structured record into a fragment
///
/// Keys starting with `_` are metadata. Every other key is a field whose value
/// is either a bare number / numeric string (merged with the key's default
/// kind) or an object:
///
/// ```json
/// { "Bonus_Crit_DMG": { "value": 20, "merge": "mapped", "to": "CRIT_DMG" } }
/// ```
pub fn load_fragment(
    name: &str,
    kind: FragmentKind,
    source: FragmentSource<'_>,
) -> Result<ConfigFragment> {
    let owned;
    let value = match source {
        FragmentSource::Json(text) => {
            owned = serde_json::from_str::<Value>(text).map_err(|e| parse_error(name, e))?;
            &owned
        }
        FragmentSource::Toml(text) => {
            let table: toml::Value = toml::from_str(text).map_err(|e| parse_error(name, e))?;
            owned = serde_json::to_value(table).map_err(|e| parse_error(name, e))?;
            &owned
        }
        FragmentSource::Value(value) => value,
    };

    let record = value
        .as_object()
        .ok_or_else(|| parse_error(name, "record must be an object"))?;

    let fragment = parse_record(name, kind, record)?;
    debug!(
        fragment = name,
        fields = fragment.fields.len(),
        meta = fragment.meta.len(),
        "Loaded config fragment"
    );
    Ok(fragment)
}

/// Parse a JSON record
pub fn parse_json_fragment(name: &str, kind: FragmentKind, text: &str) -> Result<ConfigFragment> {
    load_fragment(name, kind, FragmentSource::Json(text))
}

/// Parse a TOML record
pub fn parse_toml_fragment(name: &str, kind: FragmentKind, text: &str) -> Result<ConfigFragment> {
    load_fragment(name, kind, FragmentSource::Toml(text))
}

fn parse_record(name: &str, kind: FragmentKind, record: &Map<String, Value>) -> Result<ConfigFragment> {
    let mut fragment = ConfigFragment::new(name, kind);

    for (key, raw) in record {
        if key.starts_with('_') {
            fragment.meta.insert(key.clone(), raw.clone());
            continue;
        }

        let (value, merge) = match raw {
            Value::Object(entry) => parse_field_entry(name, key, entry)?,
            other => (parse_number(name, key, other)?, MergeKind::default_for(key)),
        };
        fragment = fragment.with_field(key.clone(), value, merge);
    }

    Ok(fragment)
}

fn parse_field_entry(name: &str, key: &str, entry: &Map<String, Value>) -> Result<(StatValue, MergeKind)> {
    let raw = entry
        .get("value")
        .ok_or_else(|| parse_error(name, format!("field `{key}` is missing `value`")))?;
    let value = parse_number(name, key, raw)?;

    let merge = match entry.get("merge") {
        None => MergeKind::default_for(key),
        Some(Value::String(kind)) => match kind.as_str() {
            "additive" => MergeKind::Additive,
            "replace" => MergeKind::Replace,
            "mapped" => {
                let to = entry
                    .get("to")
                    .and_then(Value::as_str)
                    .ok_or_else(|| parse_error(name, format!("mapped field `{key}` needs a `to` key")))?;
                MergeKind::Mapped { to: to.to_string() }
            }
            other => {
                return Err(parse_error(
                    name,
                    format!("field `{key}` has unknown merge kind `{other}`"),
                ))
            }
        },
        Some(_) => {
            return Err(parse_error(
                name,
                format!("field `{key}` has a non-string merge kind"),
            ))
        }
    };

    Ok((value, merge))
}

fn parse_number(name: &str, key: &str, raw: &Value) -> Result<StatValue> {
    let converted = match raw {
        Value::Number(n) => to_exact(n.to_string()),
        Value::String(s) => to_exact(s.as_str()),
        _ => {
            return Err(parse_error(
                name,
                format!("field `{key}` must be a number or numeric string"),
            ))
        }
    };

    converted.map_err(|_| parse_error(name, format!("field `{key}` is not numeric: {raw}")))
}

fn parse_error(name: &str, reason: impl std::fmt::Display) -> CalcError {
    CalcError::ConfigParse {
        fragment: name.to_string(),
        reason: reason.to_string(),
    }
}
