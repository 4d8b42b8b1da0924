use rand::RngCore;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::fields::{Field, FieldBase, config_name};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::value::FieldValue;

const KIND: &str = "namefield";

const NAMES: &[&str] = &["JOHN DOE", "JANE DOE", "JOHN SMITH", "JANE SMITH"];

const PARAMS: &[ParamSpec] = &[ParamSpec::new("name", ParamKind::Str, false)];

/// Uniform draw from a fixed person-name vocabulary.
#[derive(Debug, Clone)]
pub struct NameField {
    base: FieldBase,
}

impl NameField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: FieldBase::new(KIND, name.into()),
        }
    }

    pub fn from_config(config: &Value) -> Result<Self> {
        let params = validate_params(config, PARAMS, KIND)?;
        Ok(Self::new(config_name(&params)))
    }
}

impl Field for NameField {
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
        let name = NAMES.choose(rng).copied().unwrap_or_default();
        Ok(FieldValue::Text(name.to_string()))
    }

    fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("name".to_string(), Value::from(self.base.name.as_str()));
        config
    }
}
