use rand::{Rng, RngCore};
use rand::seq::IndexedRandom;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::fields::{Field, FieldBase, config_name};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::value::FieldValue;

const KIND: &str = "numberfield";

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("name", ParamKind::Str, false),
    ParamSpec::new("type", ParamKind::Str, false),
    ParamSpec::new("lowerBound", ParamKind::Float, false),
    ParamSpec::new("upperBound", ParamKind::Float, false),
    ParamSpec::new("continuous", ParamKind::Bool, false),
    ParamSpec::new("discretValues", ParamKind::List, false),
    ParamSpec::new("precision", ParamKind::Int, false),
    ParamSpec::new("symbolPrefix", ParamKind::Str, false),
    ParamSpec::new("symbolSuffix", ParamKind::Str, false),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Int,
    Float,
}

impl NumberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NumberKind::Int => "int",
            NumberKind::Float => "float",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "int" => Ok(NumberKind::Int),
            "float" => Ok(NumberKind::Float),
            other => Err(Error::InvalidConfig(format!(
                "{KIND}: unknown numeric kind '{other}'"
            ))),
        }
    }
}

/// Random numbers in a continuous range or from a discrete candidate set,
/// wrapped with optional prefix/suffix symbols.
///
/// Unset continuous bounds resolve to the representable extremes of the
/// chosen kind; a discrete set with any non-numeric candidate degrades to
/// `Null` rather than failing.
#[derive(Debug, Clone)]
pub struct NumberField {
    base: FieldBase,
    kind: NumberKind,
    lower: Option<f64>,
    upper: Option<f64>,
    continuous: bool,
    discrete: Option<Vec<Value>>,
    precision: usize,
    prefix: String,
    suffix: String,
}

impl NumberField {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        kind: NumberKind,
        lower: Option<f64>,
        upper: Option<f64>,
        continuous: bool,
        discrete: Option<Vec<Value>>,
        precision: usize,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Result<Self> {
        if let (Some(lower), Some(upper)) = (lower, upper)
            && lower > upper
        {
            return Err(Error::InvalidConfig(format!(
                "{KIND}: lowerBound must be <= upperBound"
            )));
        }
        Ok(Self {
            base: FieldBase::new(KIND, name.into()),
            kind,
            lower,
            upper,
            continuous,
            discrete,
            precision,
            prefix: prefix.into(),
            suffix: suffix.into(),
        })
    }

    pub fn from_config(config: &Value) -> Result<Self> {
        let params = validate_params(config, PARAMS, KIND)?;
        let kind = NumberKind::parse(params.get_str("type").unwrap_or("int"))?;
        Self::new(
            config_name(&params),
            kind,
            params.get_f64("lowerBound"),
            params.get_f64("upperBound"),
            params.get_bool("continuous").unwrap_or(true),
            params.get_list("discretValues").map(<[Value]>::to_vec),
            params.get_u64("precision").unwrap_or(2) as usize,
            params.get_str("symbolPrefix").unwrap_or(""),
            params.get_str("symbolSuffix").unwrap_or(""),
        )
    }

    fn prefix_symbol(&self) -> String {
        if self.prefix.trim().is_empty() {
            String::new()
        } else {
            format!("{} ", self.prefix)
        }
    }

    fn suffix_symbol(&self) -> String {
        if self.suffix.trim().is_empty() {
            String::new()
        } else {
            format!(" {}", self.suffix)
        }
    }

    fn continuous_value(&self, rng: &mut dyn RngCore) -> String {
        match self.kind {
            NumberKind::Int => {
                let lower = self.lower.map_or(i64::MIN, |bound| bound as i64);
                let upper = self.upper.map_or(i64::MAX, |bound| bound as i64);
                rng.random_range(lower..=upper).to_string()
            }
            NumberKind::Float => {
                let lower = self.lower.unwrap_or(f64::MIN);
                let upper = self.upper.unwrap_or(f64::MAX);
                format!("{:.*}", self.precision, uniform_float(rng, lower, upper))
            }
        }
    }

    fn discrete_value(&self, rng: &mut dyn RngCore) -> Option<String> {
        let candidates = self.discrete.as_ref()?;
        if candidates.is_empty() || candidates.iter().any(|value| !value.is_number()) {
            return None;
        }
        candidates.choose(rng).map(Value::to_string)
    }

    fn bound_value(&self, bound: Option<f64>) -> Value {
        match (bound, self.kind) {
            (None, _) => Value::Null,
            (Some(value), NumberKind::Int) if value.fract() == 0.0 => Value::from(value as i64),
            (Some(value), _) => Value::from(value),
        }
    }
}

/// Uniform float where the span may overflow to infinity: split the range at
/// its midpoint and draw from one half with an even coin flip.
fn uniform_float(rng: &mut dyn RngCore, lower: f64, upper: f64) -> f64 {
    if (upper - lower).is_finite() {
        rng.random_range(lower..=upper)
    } else {
        let mid = lower / 2.0 + upper / 2.0;
        if rng.random_bool(0.5) {
            rng.random_range(lower..=mid)
        } else {
            rng.random_range(mid..=upper)
        }
    }
}

impl Field for NumberField {
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
        let body = if self.continuous {
            self.continuous_value(rng)
        } else {
            match self.discrete_value(rng) {
                Some(value) => value,
                None => return Ok(FieldValue::Null),
            }
        };
        Ok(FieldValue::Text(format!(
            "{}{body}{}",
            self.prefix_symbol(),
            self.suffix_symbol()
        )))
    }

    fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("name".to_string(), Value::from(self.base.name.as_str()));
        config.insert("type".to_string(), Value::from(self.kind.as_str()));
        config.insert("lowerBound".to_string(), self.bound_value(self.lower));
        config.insert("upperBound".to_string(), self.bound_value(self.upper));
        config.insert("continuous".to_string(), Value::from(self.continuous));
        config.insert(
            "discretValues".to_string(),
            match &self.discrete {
                Some(values) => Value::Array(values.clone()),
                None => Value::Null,
            },
        );
        config.insert("precision".to_string(), Value::from(self.precision));
        config.insert("symbolPrefix".to_string(), Value::from(self.prefix.as_str()));
        config.insert("symbolSuffix".to_string(), Value::from(self.suffix.as_str()));
        config
    }
}
