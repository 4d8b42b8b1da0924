use std::collections::HashMap;

use rand::RngCore;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::fields::{Field, FieldBase, config_name};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::value::FieldValue;

const KIND: &str = "cityfield";

const CITIES_CSV: &str = include_str!("../../data/cities.csv");

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("name", ParamKind::Str, false),
    ParamSpec::new("country", ParamKind::Str, false),
];

/// City names from an embedded city/country reference table.
///
/// Without a country filter the draw is uniform over the flattened city
/// list, so countries with more cities are proportionally more likely. A
/// filter that matches nothing degrades to `Null`.
#[derive(Debug, Clone)]
pub struct CityField {
    base: FieldBase,
    country: Option<String>,
    by_country: HashMap<String, Vec<String>>,
    all_cities: Vec<String>,
}

impl CityField {
    pub fn new(name: impl Into<String>, country: Option<String>) -> Result<Self> {
        let (by_country, all_cities) = load_cities()?;
        Ok(Self {
            base: FieldBase::new(KIND, name.into()),
            country,
            by_country,
            all_cities,
        })
    }

    pub fn from_config(config: &Value) -> Result<Self> {
        let params = validate_params(config, PARAMS, KIND)?;
        Self::new(
            config_name(&params),
            params.get_str("country").map(str::to_string),
        )
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

/// Parse the embedded reference table once per field instance.
fn load_cities() -> Result<(HashMap<String, Vec<String>>, Vec<String>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(CITIES_CSV.as_bytes());
    let mut by_country: HashMap<String, Vec<String>> = HashMap::new();
    let mut all_cities = Vec::new();
    for record in reader.records() {
        let record = record?;
        let city = record.get(0).unwrap_or_default().to_string();
        let country = record.get(1).unwrap_or_default().to_string();
        all_cities.push(city.clone());
        by_country.entry(country).or_default().push(city);
    }
    Ok((by_country, all_cities))
}

impl Field for CityField {
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
        let pool: &[String] = match &self.country {
            None => &self.all_cities,
            Some(country) => match self.by_country.get(country) {
                Some(cities) => cities,
                None => return Ok(FieldValue::Null),
            },
        };
        let city = pool.choose(rng).cloned().unwrap_or_default();
        Ok(FieldValue::Text(city))
    }

    fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("name".to_string(), Value::from(self.base.name.as_str()));
        config.insert("country".to_string(), Value::from(self.country.clone()));
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng;

    #[test]
    fn unknown_country_filter_degrades_to_null() {
        let mut field = CityField::new("city", Some("Atlantis".to_string())).expect("builds");
        let mut rng = rng::seeded(3);
        assert!(field.generate_value(&mut rng).expect("generates").is_null());
    }

    #[test]
    fn filtered_draw_stays_inside_the_country() {
        let mut field = CityField::new("city", Some("Portugal".to_string())).expect("builds");
        let expected = field.by_country["Portugal"].clone();
        let mut rng = rng::seeded(3);
        for _ in 0..20 {
            let value = field.generate_value(&mut rng).expect("generates");
            let city = value.as_str().expect("text value").to_string();
            assert!(expected.contains(&city));
        }
    }
}
