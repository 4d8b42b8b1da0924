//! Validation layer for field configuration maps.
//!
//! Every field kind declares a `ParamSpec` table; `validate_params` rejects
//! configs that are not JSON objects, carry unknown keys, or bind a key to a
//! wrongly typed value. A `null` bound to an optional key counts as unset,
//! since snapshots persist unset attributes as explicit nulls.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Int,
    Float,
    Str,
    List,
}

#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub key: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl ParamSpec {
    pub const fn new(key: &'static str, kind: ParamKind, required: bool) -> Self {
        Self {
            key,
            kind,
            required,
        }
    }
}

pub struct ParamMap<'a> {
    map: Option<&'a Map<String, Value>>,
}

pub fn validate_params<'a>(
    params: &'a Value,
    specs: &[ParamSpec],
    ctx: &'static str,
) -> Result<ParamMap<'a>> {
    let map = match params {
        Value::Object(map) => Some(map),
        Value::Null => None,
        _ => {
            return Err(Error::InvalidConfig(format!(
                "{ctx}: config must be a JSON object"
            )));
        }
    };

    if let Some(map) = map {
        for (key, value) in map {
            let Some(spec) = specs.iter().find(|spec| spec.key == key.as_str()) else {
                return Err(Error::InvalidConfig(format!("{ctx}: unknown key '{key}'")));
            };
            if value.is_null() && !spec.required {
                continue;
            }
            validate_kind(ctx, key, spec.kind, value)?;
        }
    }

    for spec in specs {
        let present = map.is_some_and(|map| {
            map.get(spec.key)
                .is_some_and(|value| !value.is_null())
        });
        if spec.required && !present {
            return Err(Error::InvalidConfig(format!(
                "{ctx}: missing required key '{}'",
                spec.key
            )));
        }
    }

    Ok(ParamMap { map })
}

impl<'a> ParamMap<'a> {
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|value| value.as_bool())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|value| value.as_i64())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|value| value.as_u64())
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|value| value.as_f64())
    }

    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(|value| value.as_str())
    }

    pub fn get_list(&self, key: &str) -> Option<&'a [Value]> {
        self.get(key)
            .and_then(|value| value.as_array())
            .map(|list| list.as_slice())
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|map| map.get(key))
    }
}

fn validate_kind(ctx: &'static str, key: &str, kind: ParamKind, value: &Value) -> Result<()> {
    let valid = match kind {
        ParamKind::Bool => value.is_boolean(),
        ParamKind::Int => value.as_i64().is_some(),
        ParamKind::Float => value.as_f64().is_some(),
        ParamKind::Str => value.is_string(),
        ParamKind::List => value.is_array(),
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{ctx}: invalid value for key '{key}'"
        )))
    }
}
