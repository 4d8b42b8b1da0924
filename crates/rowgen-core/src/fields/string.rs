use rand::RngCore;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::fields::{Field, FieldBase, config_name};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::value::FieldValue;

const KIND: &str = "stringfield";

const ASCII_LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const ASCII_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("name", ParamKind::Str, false),
    ParamSpec::new("length", ParamKind::Int, false),
    ParamSpec::new("strCount", ParamKind::Int, false),
    ParamSpec::new("charset", ParamKind::Str, false),
    ParamSpec::new("case", ParamKind::Str, false),
    ParamSpec::new("includeDigits", ParamKind::Bool, false),
    ParamSpec::new("strSep", ParamKind::Str, false),
];

/// Random fixed-length strings over a resolved charset, repeated `strCount`
/// times and joined with a separator.
///
/// The case policy is kept verbatim so unknown values round-trip; they
/// resolve to no usable charset and the field then emits `Null`.
#[derive(Debug, Clone)]
pub struct StringField {
    base: FieldBase,
    length: i64,
    str_count: i64,
    charset: Option<String>,
    case: Option<String>,
    include_digits: bool,
    separator: String,
}

impl StringField {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        length: i64,
        str_count: i64,
        charset: Option<String>,
        case: Option<String>,
        include_digits: bool,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            base: FieldBase::new(KIND, name.into()),
            length,
            str_count,
            charset,
            case,
            include_digits,
            separator: separator.into(),
        }
    }

    pub fn from_config(config: &Value) -> Result<Self> {
        let params = validate_params(config, PARAMS, KIND)?;
        Ok(Self::new(
            config_name(&params),
            params.get_i64("length").unwrap_or(10),
            params.get_i64("strCount").unwrap_or(1),
            params.get_str("charset").map(str::to_string),
            params.get_str("case").map(str::to_string),
            params.get_bool("includeDigits").unwrap_or(false),
            params.get_str("strSep").unwrap_or(" "),
        ))
    }

    /// Effective charset: explicit override wins verbatim, otherwise the
    /// case policy picks a letter set, optionally extended with digits.
    fn resolve_charset(&self) -> Option<Vec<char>> {
        if let Some(charset) = &self.charset {
            return Some(charset.chars().collect());
        }
        let mut charset: String = match self.case.as_deref() {
            None => format!("{ASCII_LOWER}{ASCII_UPPER}"),
            Some("upper") => ASCII_UPPER.to_string(),
            Some("lower") => ASCII_LOWER.to_string(),
            Some(_) => return None,
        };
        if self.include_digits {
            charset.push_str(DIGITS);
        }
        Some(charset.chars().collect())
    }

    fn random_string(&self, charset: &[char], rng: &mut dyn RngCore) -> String {
        (0..self.length)
            .map(|_| charset.choose(rng).copied().unwrap_or_default())
            .collect()
    }
}

impl Field for StringField {
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
        if self.str_count < 1 {
            return Ok(FieldValue::Null);
        }
        let Some(charset) = self.resolve_charset() else {
            return Ok(FieldValue::Null);
        };
        if charset.is_empty() {
            return Ok(FieldValue::Null);
        }
        let parts: Vec<String> = (0..self.str_count)
            .map(|_| self.random_string(&charset, rng))
            .collect();
        Ok(FieldValue::Text(parts.join(&self.separator)))
    }

    fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("name".to_string(), Value::from(self.base.name.as_str()));
        config.insert("length".to_string(), Value::from(self.length));
        config.insert("strCount".to_string(), Value::from(self.str_count));
        config.insert("charset".to_string(), Value::from(self.charset.clone()));
        config.insert("case".to_string(), Value::from(self.case.clone()));
        config.insert(
            "includeDigits".to_string(),
            Value::from(self.include_digits),
        );
        config.insert("strSep".to_string(), Value::from(self.separator.as_str()));
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(case: Option<&str>, include_digits: bool) -> StringField {
        StringField::new(
            "col",
            8,
            1,
            None,
            case.map(str::to_string),
            include_digits,
            " ",
        )
    }

    #[test]
    fn default_case_uses_both_letter_cases() {
        let charset = field(None, false).resolve_charset().expect("charset");
        assert_eq!(charset.len(), 52);
    }

    #[test]
    fn lower_case_with_digits() {
        let charset = field(Some("lower"), true).resolve_charset().expect("charset");
        assert!(charset.contains(&'a'));
        assert!(charset.contains(&'7'));
        assert!(!charset.contains(&'A'));
    }

    #[test]
    fn unknown_case_yields_no_charset() {
        assert!(field(Some("title"), false).resolve_charset().is_none());
    }

    #[test]
    fn negative_length_yields_empty_strings() {
        let mut string_field = StringField::new("col", -3, 2, None, None, false, "-");
        let mut rng = crate::rng::seeded(1);
        let value = string_field.generate_value(&mut rng).expect("generates");
        assert_eq!(value.as_str(), Some("-"));
    }

    #[test]
    fn explicit_charset_overrides_digits_flag() {
        let mut string_field = field(None, true);
        string_field.charset = Some("xyz".to_string());
        let charset = string_field.resolve_charset().expect("charset");
        assert_eq!(charset, vec!['x', 'y', 'z']);
    }
}
