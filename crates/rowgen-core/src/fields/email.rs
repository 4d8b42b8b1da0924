use rand::RngCore;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::fields::{Field, FieldBase, config_name};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::value::FieldValue;

const KIND: &str = "emailfield";

const LOCAL_PARTS: &[&str] = &["johndoe", "janedoe", "johnsmith", "janesmith"];
const DOMAINS: &[&str] = &["test.com", "example.com"];

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("name", ParamKind::Str, false),
    ParamSpec::new("unique", ParamKind::Bool, false),
];

/// Uniform local-part and domain from small fixed vocabularies.
///
/// The per-instance counter advances on every call, whether or not
/// uniqueness is requested; when it is, the counter is appended to the
/// local part, so the first unique address carries a `1`.
#[derive(Debug, Clone)]
pub struct EmailField {
    base: FieldBase,
    unique: bool,
    counter: u64,
}

impl EmailField {
    pub fn new(name: impl Into<String>, unique: bool) -> Self {
        Self {
            base: FieldBase::new(KIND, name.into()),
            unique,
            counter: 0,
        }
    }

    pub fn from_config(config: &Value) -> Result<Self> {
        let params = validate_params(config, PARAMS, KIND)?;
        let unique = params.get_bool("unique").unwrap_or(true);
        Ok(Self::new(config_name(&params), unique))
    }

    pub fn unique(&self) -> bool {
        self.unique
    }
}

impl Field for EmailField {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn name(&self) -> &str {
        &self.base.name
    }

    fn set_name(&mut self, name: String) {
        self.base.name = name;
    }

    fn id(&self) -> &str {
        &self.base.id
    }

    fn row_count(&self) -> u64 {
        self.base.row_count
    }

    fn set_row_count(&mut self, rows: u64) {
        self.base.row_count = rows;
    }

    fn generate_value(&mut self, rng: &mut dyn RngCore) -> Result<FieldValue> {
        self.counter += 1;
        let local = LOCAL_PARTS.choose(rng).copied().unwrap_or_default();
        let domain = DOMAINS.choose(rng).copied().unwrap_or_default();
        let address = if self.unique {
            format!("{local}{}@{domain}", self.counter)
        } else {
            format!("{local}@{domain}")
        };
        Ok(FieldValue::Text(address))
    }

    fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("name".to_string(), Value::from(self.base.name.as_str()));
        config.insert("unique".to_string(), Value::from(self.unique));
        config
    }
}
