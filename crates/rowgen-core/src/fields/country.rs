use rand::RngCore;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::fields::{Field, FieldBase, config_name};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::value::FieldValue;

const KIND: &str = "countryfield";

const COUNTRIES_CSV: &str = include_str!("../../data/countries.csv");

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("name", ParamKind::Str, false),
    ParamSpec::new("abbr", ParamKind::Bool, false),
];

/// Uniform draw from an embedded (abbreviation, full name) country table.
#[derive(Debug, Clone)]
pub struct CountryField {
    base: FieldBase,
    abbr: bool,
    countries: Vec<(String, String)>,
}

impl CountryField {
    pub fn new(name: impl Into<String>, abbr: bool) -> Result<Self> {
        Ok(Self {
            base: FieldBase::new(KIND, name.into()),
            abbr,
            countries: load_countries()?,
        })
    }

    pub fn from_config(config: &Value) -> Result<Self> {
        let params = validate_params(config, PARAMS, KIND)?;
        Self::new(config_name(&params), params.get_bool("abbr").unwrap_or(false))
    }

    pub fn abbreviated(&self) -> bool {
        self.abbr
    }
}

fn load_countries() -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(COUNTRIES_CSV.as_bytes());
    let mut countries = Vec::new();
    for record in reader.records() {
        let record = record?;
        countries.push((
            record.get(0).unwrap_or_default().to_string(),
            record.get(1).unwrap_or_default().to_string(),
        ));
    }
    Ok(countries)
}

impl Field for CountryField {
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
        let Some((abbr, full)) = self.countries.choose(rng) else {
            return Ok(FieldValue::Null);
        };
        let value = if self.abbr { abbr } else { full };
        Ok(FieldValue::Text(value.clone()))
    }

    fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("name".to_string(), Value::from(self.base.name.as_str()));
        config.insert("abbr".to_string(), Value::from(self.abbr));
        config
    }
}
