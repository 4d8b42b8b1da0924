use std::fmt::Write;

use chrono::format::{Fixed, Item, StrftimeItems};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::{Rng, RngCore};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::fields::{Field, FieldBase, config_name};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::value::FieldValue;

const KIND: &str = "datefield";

const LOWER_YEAR: i32 = 1900;
const UPPER_YEAR: i32 = 2080;
const DEFAULT_FORMAT: &str = "%m-%d-%Y";

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("name", ParamKind::Str, false),
    ParamSpec::new("dateFormat", ParamKind::Str, false),
    ParamSpec::new("fromYear", ParamKind::Int, false),
    ParamSpec::new("fromMonth", ParamKind::Int, false),
    ParamSpec::new("fromDay", ParamKind::Int, false),
    ParamSpec::new("toYear", ParamKind::Int, false),
    ParamSpec::new("toMonth", ParamKind::Int, false),
    ParamSpec::new("toDay", ParamKind::Int, false),
    ParamSpec::new("addTime", ParamKind::Bool, false),
];

/// Uniform date (optionally with a time of day) inside a configured range.
///
/// Range endpoints are independently optional and resolved per call; the
/// endpoints swap when given in reverse order, so the generated value always
/// lands inside the interval.
#[derive(Debug, Clone)]
pub struct DateField {
    base: FieldBase,
    format: String,
    from_year: Option<i64>,
    from_month: i64,
    from_day: i64,
    to_year: Option<i64>,
    to_month: i64,
    to_day: i64,
    add_time: bool,
}

impl DateField {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        format: impl Into<String>,
        from_year: Option<i64>,
        from_month: i64,
        from_day: i64,
        to_year: Option<i64>,
        to_month: i64,
        to_day: i64,
        add_time: bool,
    ) -> Result<Self> {
        let format = format.into();
        validate_format(&format)?;
        Ok(Self {
            base: FieldBase::new(KIND, name.into()),
            format,
            from_year,
            from_month,
            from_day,
            to_year,
            to_month,
            to_day,
            add_time,
        })
    }

    pub fn from_config(config: &Value) -> Result<Self> {
        let params = validate_params(config, PARAMS, KIND)?;
        Self::new(
            config_name(&params),
            params.get_str("dateFormat").unwrap_or(DEFAULT_FORMAT),
            params.get_i64("fromYear"),
            params.get_i64("fromMonth").unwrap_or(1),
            params.get_i64("fromDay").unwrap_or(1),
            params.get_i64("toYear"),
            params.get_i64("toMonth").unwrap_or(1),
            params.get_i64("toDay").unwrap_or(1),
            params.get_bool("addTime").unwrap_or(true),
        )
    }

    fn from_point(&self) -> NaiveDate {
        resolve_date(resolve_year(self.from_year, LOWER_YEAR), self.from_month, self.from_day)
    }

    fn to_point(&self) -> NaiveDate {
        resolve_date(resolve_year(self.to_year, UPPER_YEAR), self.to_month, self.to_day)
    }
}

/// Missing or non-positive years fall back to the fixed default.
fn resolve_year(year: Option<i64>, default: i32) -> i32 {
    match year {
        Some(year) if year > 0 => i32::try_from(year).unwrap_or(default),
        _ => default,
    }
}

/// Out-of-range month/day components resolve to 1, as does a day that does
/// not exist in the resolved month (e.g. February 31).
fn resolve_date(year: i32, month: i64, day: i64) -> NaiveDate {
    let month = if (1..=12).contains(&month) { month as u32 } else { 1 };
    let day = if (1..=31).contains(&day) { day as u32 } else { 1 };
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
        .unwrap_or_default()
}

fn validate_format(format: &str) -> Result<()> {
    // Offset and zone specifiers cannot render from a naive datetime.
    let invalid = StrftimeItems::new(format).any(|item| {
        matches!(
            item,
            Item::Error
                | Item::Fixed(
                    Fixed::TimezoneName
                        | Fixed::TimezoneOffset
                        | Fixed::TimezoneOffsetColon
                        | Fixed::TimezoneOffsetColonZ
                        | Fixed::TimezoneOffsetDoubleColon
                        | Fixed::TimezoneOffsetTripleColon
                        | Fixed::TimezoneOffsetZ
                        | Fixed::RFC2822
                        | Fixed::RFC3339,
                )
        )
    });
    if invalid {
        return Err(Error::InvalidConfig(format!(
            "{KIND}: invalid date format '{format}'"
        )));
    }
    Ok(())
}

impl Field for DateField {
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
        // Time of day is drawn first and applied to both endpoints, so the
        // random offset below only ever moves whole days.
        let time_of_day = if self.add_time {
            let hour = rng.random_range(0..=23u32);
            let minute = rng.random_range(0..=59u32);
            let second = rng.random_range(0..=59u32);
            (hour, minute, second)
        } else {
            (0, 0, 0)
        };

        let (hour, minute, second) = time_of_day;
        let mut start: NaiveDateTime = self
            .from_point()
            .and_hms_opt(hour, minute, second)
            .unwrap_or_default();
        let mut end: NaiveDateTime = self
            .to_point()
            .and_hms_opt(hour, minute, second)
            .unwrap_or_default();

        if end < start {
            std::mem::swap(&mut start, &mut end);
        }

        let span = (end - start).num_days();
        // Zero-span ranges return the single valid instant instead of
        // feeding an empty range to the RNG.
        let point = if span > 0 {
            start + Duration::days(rng.random_range(0..span))
        } else {
            start
        };

        // Formatting the full datetime even when addTime is off keeps time
        // specifiers in a date-only pattern well defined (they render 00).
        // Rendering through write! turns any specifier the construction-time
        // check missed into an error instead of a panic.
        let mut rendered = String::new();
        write!(rendered, "{}", point.format(&self.format)).map_err(|_| {
            Error::InvalidConfig(format!("{KIND}: invalid date format '{}'", self.format))
        })?;
        Ok(FieldValue::Text(rendered))
    }

    fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("name".to_string(), Value::from(self.base.name.as_str()));
        config.insert("dateFormat".to_string(), Value::from(self.format.as_str()));
        config.insert("fromYear".to_string(), Value::from(self.from_year));
        config.insert("fromMonth".to_string(), Value::from(self.from_month));
        config.insert("fromDay".to_string(), Value::from(self.from_day));
        config.insert("toYear".to_string(), Value::from(self.to_year));
        config.insert("toMonth".to_string(), Value::from(self.to_month));
        config.insert("toDay".to_string(), Value::from(self.to_day));
        config.insert("addTime".to_string(), Value::from(self.add_time));
        config
    }
}
