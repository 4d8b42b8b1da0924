//! Field variants and the shared generation capability.

mod city;
mod country;
mod custom;
mod date;
mod email;
mod increment;
mod ip_address;
mod name;
mod number;
mod string;

use std::sync::atomic::{AtomicU64, Ordering};

use rand::RngCore;
use serde_json::{Map, Value};

pub use city::CityField;
pub use country::CountryField;
pub use custom::CustomField;
pub use date::DateField;
pub use email::EmailField;
pub use increment::IncrementField;
pub use ip_address::{IpAddressField, IpVersion};
pub use name::NameField;
pub use number::{NumberField, NumberKind};
pub use string::StringField;

use crate::error::Result;
use crate::value::FieldValue;

/// A typed, self-contained value generator with persistable configuration.
///
/// Mutable per-instance state (counters, dedup sets) lives on the field and
/// accumulates across `generate_value` calls within one generation pass.
pub trait Field {
    /// Registry discriminant, also the first segment of the identity token.
    fn kind(&self) -> &'static str;

    /// Display label, used as the generated column header.
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    /// Identity token the field's configuration is snapshotted under.
    /// Unique within one snapshot; not stable across process restarts.
    fn id(&self) -> &str;

    /// Row count for the next generation pass; set by the owning dataset
    /// and never persisted.
    fn row_count(&self) -> u64;

    fn set_row_count(&mut self, rows: u64);

    /// Produce one cell.
    fn generate_value(&mut self, rng: &mut dyn RngCore) -> Result<FieldValue>;

    /// Constructor-relevant attributes, keyed by persisted-config names.
    fn config(&self) -> Map<String, Value>;

    /// Produce the full column: the field name as header, then exactly
    /// `row_count` generated values. Any per-value failure aborts the
    /// column, so callers never see a partial one.
    fn generate_column(&mut self, rng: &mut dyn RngCore) -> Result<Vec<FieldValue>> {
        let mut column = Vec::with_capacity(self.row_count() as usize + 1);
        column.push(FieldValue::Text(self.name().to_string()));
        for _ in 0..self.row_count() {
            column.push(self.generate_value(rng)?);
        }
        Ok(column)
    }
}

static FIELD_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Mint an identity token for a freshly constructed field.
fn field_id(kind: &str) -> String {
    let token = FIELD_TOKEN.fetch_add(1, Ordering::Relaxed);
    format!("{kind}_{token}")
}

/// Shared attributes of every variant.
#[derive(Debug, Clone)]
struct FieldBase {
    name: String,
    id: String,
    row_count: u64,
}

impl FieldBase {
    fn new(kind: &'static str, name: String) -> Self {
        Self {
            name,
            id: field_id(kind),
            row_count: 0,
        }
    }
}

const DEFAULT_FIELD_NAME: &str = "datafield";

fn config_name(params: &crate::params::ParamMap<'_>) -> String {
    params
        .get_str("name")
        .unwrap_or(DEFAULT_FIELD_NAME)
        .to_string()
}
