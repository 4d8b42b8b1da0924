//! The one extensibility seam for field variants.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::fields::{
    CityField, CountryField, CustomField, DateField, EmailField, Field, IncrementField,
    IpAddressField, NameField, NumberField, StringField,
};

/// Construct a field from its registry discriminant and a configuration map.
///
/// Discriminants are matched case-sensitively. Configuration problems
/// propagate from the variant's own constructor; only an unrecognized
/// discriminant is reported here.
pub fn create(key: &str, config: &Value) -> Result<Box<dyn Field>> {
    let field: Box<dyn Field> = match key {
        "cityfield" => Box::new(CityField::from_config(config)?),
        "countryfield" => Box::new(CountryField::from_config(config)?),
        "datefield" => Box::new(DateField::from_config(config)?),
        "emailfield" => Box::new(EmailField::from_config(config)?),
        "incrementfield" => Box::new(IncrementField::from_config(config)?),
        "ipaddressfield" => Box::new(IpAddressField::from_config(config)?),
        "namefield" => Box::new(NameField::from_config(config)?),
        "numberfield" => Box::new(NumberField::from_config(config)?),
        "stringfield" => Box::new(StringField::from_config(config)?),
        "customfield" => Box::new(CustomField::from_config(config)?),
        other => return Err(Error::UnsupportedFieldType(other.to_string())),
    };
    Ok(field)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_discriminant_is_rejected_by_name() {
        let result = create("uuidfield", &json!({"name": "id"}));
        assert!(
            matches!(result, Err(Error::UnsupportedFieldType(key)) if key == "uuidfield")
        );
    }

    #[test]
    fn discriminants_are_case_sensitive() {
        assert!(create("NameField", &json!({})).is_err());
    }

    #[test]
    fn config_errors_propagate_from_the_variant() {
        let result = create("numberfield", &json!({"name": "n", "type": "decimal"}));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn builds_every_self_contained_variant() {
        for key in [
            "cityfield",
            "countryfield",
            "datefield",
            "emailfield",
            "incrementfield",
            "ipaddressfield",
            "namefield",
            "numberfield",
            "stringfield",
        ] {
            let field = create(key, &json!({"name": "col"})).expect("builds");
            assert_eq!(field.kind(), key);
            assert!(field.id().starts_with(&format!("{key}_")));
        }
    }
}
