use rand::RngCore;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::fields::{Field, FieldBase, config_name};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::value::FieldValue;

const KIND: &str = "incrementfield";

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("name", ParamKind::Str, false),
    ParamSpec::new("startValue", ParamKind::Int, false),
];

/// Monotonic counter: the n-th call emits `start + n`, starting at n = 1.
/// State is retained for the field's lifetime, not per generation pass.
#[derive(Debug, Clone)]
pub struct IncrementField {
    base: FieldBase,
    start: i64,
    current: i64,
}

impl IncrementField {
    pub fn new(name: impl Into<String>, start: i64) -> Self {
        Self {
            base: FieldBase::new(KIND, name.into()),
            start,
            current: start,
        }
    }

    pub fn from_config(config: &Value) -> Result<Self> {
        let params = validate_params(config, PARAMS, KIND)?;
        let start = params.get_i64("startValue").unwrap_or(0);
        Ok(Self::new(config_name(&params), start))
    }

    pub fn start_value(&self) -> i64 {
        self.start
    }
}

impl Field for IncrementField {
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

    fn generate_value(&mut self, _rng: &mut dyn RngCore) -> Result<FieldValue> {
        self.current = self.current.saturating_add(1);
        Ok(FieldValue::Int(self.current))
    }

    fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("name".to_string(), Value::from(self.base.name.as_str()));
        config.insert("startValue".to_string(), Value::from(self.start));
        config
    }
}
