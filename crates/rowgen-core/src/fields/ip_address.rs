use rand::{Rng, RngCore};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::fields::{Field, FieldBase, config_name};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::value::FieldValue;

const KIND: &str = "ipaddressfield";

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("name", ParamKind::Str, false),
    ParamSpec::new("type", ParamKind::Int, false),
];

/// Address family selector, integer-coded in persisted configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
    Either,
}

impl IpVersion {
    pub fn as_i64(self) -> i64 {
        match self {
            IpVersion::V4 => 0,
            IpVersion::V6 => 1,
            IpVersion::Either => 2,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(IpVersion::V4),
            1 => Some(IpVersion::V6),
            2 => Some(IpVersion::Either),
            _ => None,
        }
    }
}

/// Random IPv4/IPv6 addresses; `Either` flips a coin per call.
#[derive(Debug, Clone)]
pub struct IpAddressField {
    base: FieldBase,
    version: IpVersion,
}

impl IpAddressField {
    pub fn new(name: impl Into<String>, version: IpVersion) -> Self {
        Self {
            base: FieldBase::new(KIND, name.into()),
            version,
        }
    }

    pub fn from_config(config: &Value) -> Result<Self> {
        let params = validate_params(config, PARAMS, KIND)?;
        let version = match params.get_i64("type") {
            None => IpVersion::Either,
            Some(raw) => IpVersion::from_i64(raw).ok_or_else(|| {
                Error::InvalidConfig(format!("{KIND}: unknown address type {raw}"))
            })?,
        };
        Ok(Self::new(config_name(&params), version))
    }

    pub fn version(&self) -> IpVersion {
        self.version
    }
}

fn v4(rng: &mut dyn RngCore) -> String {
    let octets: Vec<String> = (0..4)
        .map(|_| rng.random_range(0..=255u16).to_string())
        .collect();
    octets.join(".")
}

fn v6(rng: &mut dyn RngCore) -> String {
    let hextets: Vec<String> = (0..8)
        .map(|_| format!("{:x}", rng.random_range(0..=65535u32)))
        .collect();
    hextets.join(":")
}

impl Field for IpAddressField {
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
        let address = match self.version {
            IpVersion::V4 => v4(rng),
            IpVersion::V6 => v6(rng),
            IpVersion::Either => {
                if rng.random_bool(0.5) {
                    v4(rng)
                } else {
                    v6(rng)
                }
            }
        };
        Ok(FieldValue::Text(address))
    }

    fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("name".to_string(), Value::from(self.base.name.as_str()));
        config.insert("type".to_string(), Value::from(self.version.as_i64()));
        config
    }
}
