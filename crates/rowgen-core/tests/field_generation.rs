use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde_json::json;

use rowgen_core::dataset::{Dataset, ExportFormat};
use rowgen_core::error::Error;
use rowgen_core::{FieldValue, factory, rng};

fn temp_csv(label: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rowgen_core_{label}_{}.csv", uuid::Uuid::new_v4()));
    fs::write(&path, contents).expect("write fixture csv");
    path
}

#[test]
fn date_stays_inside_swapped_range() {
    let config = json!({
        "name": "created",
        "dateFormat": "%Y-%m-%d",
        "fromYear": 2020, "fromMonth": 1, "fromDay": 1,
        "toYear": 2010, "toMonth": 1, "toDay": 1,
        "addTime": false,
    });
    let mut field = factory::create("datefield", &config).expect("build date field");
    field.set_row_count(50);
    let mut rng = rng::seeded(11);

    let lower = NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid date");
    let upper = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
    for _ in 0..50 {
        let value = field.generate_value(&mut rng).expect("generate date");
        let date = NaiveDate::parse_from_str(value.as_str().expect("text"), "%Y-%m-%d")
            .expect("parse generated date");
        assert!(date >= lower && date <= upper, "{date} outside range");
    }
}

#[test]
fn identical_date_endpoints_yield_the_single_instant() {
    let config = json!({
        "name": "when",
        "dateFormat": "%Y-%m-%d",
        "fromYear": 2020, "fromMonth": 6, "fromDay": 15,
        "toYear": 2020, "toMonth": 6, "toDay": 15,
        "addTime": true,
    });
    let mut field = factory::create("datefield", &config).expect("build date field");
    let mut rng = rng::seeded(13);

    for _ in 0..10 {
        let value = field.generate_value(&mut rng).expect("generate date");
        assert_eq!(value.as_str(), Some("2020-06-15"));
    }
}

#[test]
fn unbounded_number_output_parses() {
    let mut int_field =
        factory::create("numberfield", &json!({"name": "n", "type": "int"})).expect("int field");
    let mut float_field = factory::create(
        "numberfield",
        &json!({"name": "f", "type": "float", "precision": 3}),
    )
    .expect("float field");
    let mut rng = rng::seeded(5);

    for _ in 0..20 {
        let value = int_field.generate_value(&mut rng).expect("generate int");
        value
            .as_str()
            .expect("text")
            .parse::<i64>()
            .expect("integer output parses");

        let value = float_field.generate_value(&mut rng).expect("generate float");
        let parsed = value
            .as_str()
            .expect("text")
            .parse::<f64>()
            .expect("float output parses");
        assert!(parsed.is_finite());
    }
}

#[test]
fn bounded_number_respects_range_and_symbols() {
    let config = json!({
        "name": "price",
        "type": "int",
        "lowerBound": 10,
        "upperBound": 20,
        "symbolPrefix": "$",
        "symbolSuffix": "USD",
    });
    let mut field = factory::create("numberfield", &config).expect("build number field");
    let mut rng = rng::seeded(9);

    for _ in 0..30 {
        let value = field.generate_value(&mut rng).expect("generate");
        let text = value.as_str().expect("text");
        let body = text
            .strip_prefix("$ ")
            .and_then(|rest| rest.strip_suffix(" USD"))
            .expect("prefix/suffix wrapping");
        let number: i64 = body.parse().expect("numeric body");
        assert!((10..=20).contains(&number));
    }
}

#[test]
fn discrete_number_draws_from_the_candidate_set() {
    let config = json!({
        "name": "size",
        "continuous": false,
        "discretValues": [2, 4, 8],
        "symbolPrefix": "x",
        "symbolSuffix": "GB",
    });
    let mut field = factory::create("numberfield", &config).expect("build number field");
    let mut rng = rng::seeded(29);

    for _ in 0..20 {
        let value = field.generate_value(&mut rng).expect("generate");
        let text = value.as_str().expect("text");
        let body = text
            .strip_prefix("x ")
            .and_then(|rest| rest.strip_suffix(" GB"))
            .expect("prefix/suffix wrapping");
        assert!(["2", "4", "8"].contains(&body), "{text}");
    }
}

#[test]
fn increment_continues_from_start_value() {
    let mut field =
        factory::create("incrementfield", &json!({"name": "id", "startValue": 10}))
            .expect("build increment field");
    let mut rng = rng::seeded(0);

    let values: Vec<i64> = (0..3)
        .map(|_| {
            field
                .generate_value(&mut rng)
                .expect("generate")
                .as_i64()
                .expect("int value")
        })
        .collect();
    assert_eq!(values, vec![11, 12, 13]);
}

#[test]
fn unique_email_appends_advancing_counter() {
    let mut field = factory::create("emailfield", &json!({"name": "email", "unique": true}))
        .expect("build email field");
    let mut rng = rng::seeded(21);

    for expected in 1..=5u64 {
        let value = field.generate_value(&mut rng).expect("generate");
        let address = value.as_str().expect("text");
        let (local, domain) = address.split_once('@').expect("address shape");
        assert!(local.ends_with(&expected.to_string()), "{address}");
        assert!(domain == "test.com" || domain == "example.com");
    }
}

#[test]
fn ip_field_formats_both_families() {
    let mut v4 = factory::create("ipaddressfield", &json!({"name": "ip", "type": 0}))
        .expect("build v4 field");
    let mut v6 = factory::create("ipaddressfield", &json!({"name": "ip", "type": 1}))
        .expect("build v6 field");
    let mut rng = rng::seeded(33);

    for _ in 0..10 {
        let value = v4.generate_value(&mut rng).expect("generate v4");
        let octets: Vec<&str> = value.as_str().expect("text").split('.').collect();
        assert_eq!(octets.len(), 4);
        for octet in octets {
            octet.parse::<u8>().expect("octet in 0..=255");
        }

        let value = v6.generate_value(&mut rng).expect("generate v6");
        let hextets: Vec<&str> = value.as_str().expect("text").split(':').collect();
        assert_eq!(hextets.len(), 8);
        for hextet in hextets {
            let parsed = u32::from_str_radix(hextet, 16).expect("hex hextet");
            assert!(parsed <= 0xffff);
            assert_eq!(hextet, hextet.to_lowercase());
        }
    }
}

#[test]
fn unknown_ip_type_fails_construction() {
    let result = factory::create("ipaddressfield", &json!({"name": "ip", "type": 7}));
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn degenerate_configs_yield_null_not_errors() {
    let mut rng = rng::seeded(2);

    let mut no_repeat = factory::create(
        "stringfield",
        &json!({"name": "s", "strCount": 0}),
    )
    .expect("build string field");
    assert!(no_repeat.generate_value(&mut rng).expect("generate").is_null());

    let mut bad_case = factory::create(
        "stringfield",
        &json!({"name": "s", "case": "title"}),
    )
    .expect("build string field");
    assert!(bad_case.generate_value(&mut rng).expect("generate").is_null());

    let mut empty_discrete = factory::create(
        "numberfield",
        &json!({"name": "n", "continuous": false, "discretValues": []}),
    )
    .expect("build number field");
    assert!(empty_discrete.generate_value(&mut rng).expect("generate").is_null());

    let mut no_match = factory::create(
        "cityfield",
        &json!({"name": "city", "country": "Atlantis"}),
    )
    .expect("build city field");
    assert!(no_match.generate_value(&mut rng).expect("generate").is_null());
}

#[test]
fn custom_unique_yields_distinct_values() {
    let path = temp_csv(
        "unique",
        "alpha\nbravo\ncharlie\ndelta\necho\nfoxtrot\n",
    );
    let config = json!({
        "name": "callsign",
        "filePath": path.to_str().expect("utf-8 path"),
        "columnIndex": 0,
        "fetchBy": 0,
        "unique": true,
    });
    let mut field = factory::create("customfield", &config).expect("build custom field");
    field.set_row_count(6);
    let mut rng = rng::seeded(17);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..6 {
        let value = field.generate_value(&mut rng).expect("generate");
        assert!(seen.insert(value.as_str().expect("text").to_string()));
    }
    let _ = fs::remove_file(&path);
}

#[test]
fn custom_unique_fails_fast_when_pool_is_too_small() {
    let path = temp_csv("exhausted", "alpha\nbravo\ncharlie\n");
    let config = json!({
        "name": "callsign",
        "filePath": path.to_str().expect("utf-8 path"),
        "unique": true,
    });
    let mut field = factory::create("customfield", &config).expect("build custom field");
    field.set_row_count(10);
    let mut rng = rng::seeded(17);

    let result = field.generate_value(&mut rng);
    match result {
        Err(Error::UniquePoolExhausted {
            required,
            available,
        }) => {
            assert_eq!(required, 10);
            assert_eq!(available, 3);
        }
        other => panic!("expected pool exhaustion, got {other:?}"),
    }
    let _ = fs::remove_file(&path);
}

#[test]
fn custom_missing_source_fails_construction() {
    let config = json!({
        "name": "callsign",
        "filePath": "definitely/not/here.csv",
    });
    let result = factory::create("customfield", &config);
    assert!(matches!(result, Err(Error::SourceUnavailable(_))));
}

#[test]
fn custom_fetch_by_name_uses_header_row() {
    let path = temp_csv("named", "code,label\na1,first\nb2,second\nc3,third\n");
    let config = json!({
        "name": "label",
        "filePath": path.to_str().expect("utf-8 path"),
        "fetchBy": 1,
        "columnName": "label",
    });
    let mut field = factory::create("customfield", &config).expect("build custom field");
    let mut rng = rng::seeded(4);

    for _ in 0..10 {
        let value = field.generate_value(&mut rng).expect("generate");
        let text = value.as_str().expect("text");
        assert!(["first", "second", "third"].contains(&text), "{text}");
    }
    let _ = fs::remove_file(&path);
}

#[test]
fn string_dataset_scenario_produces_expected_shape() {
    let config = json!({
        "name": "name",
        "length": 5,
        "strCount": 1,
        "case": "lower",
    });
    let mut dataset = Dataset::new(3, "demo", "demo", "out", ExportFormat::Csv);
    dataset.add_field(factory::create("stringfield", &config).expect("build string field"));

    let mut rng = rng::seeded(8);
    let table = dataset.generate_values(&mut rng).expect("generate table");

    assert_eq!(table.len(), 4);
    assert_eq!(table[0], vec![FieldValue::Text("name".to_string())]);
    for row in &table[1..] {
        assert_eq!(row.len(), 1);
        let text = row[0].as_str().expect("text");
        assert_eq!(text.len(), 5);
        assert!(text.chars().all(|c| c.is_ascii_lowercase()));
    }
}

#[test]
fn generation_is_deterministic_under_a_fixed_seed() {
    let build = || {
        let mut dataset = Dataset::new(5, "seeded", "seeded", "out", ExportFormat::Csv);
        for (kind, config) in [
            ("namefield", json!({"name": "who"})),
            ("datefield", json!({"name": "when", "fromYear": 2000, "toYear": 2001})),
            ("numberfield", json!({"name": "amount", "lowerBound": 0, "upperBound": 100})),
            ("ipaddressfield", json!({"name": "addr"})),
        ] {
            dataset.add_field(factory::create(kind, &config).expect("build field"));
        }
        dataset
    };

    let mut first = build();
    let mut second = build();
    let table_a = first
        .generate_values(&mut rng::seeded(99))
        .expect("generate");
    let table_b = second
        .generate_values(&mut rng::seeded(99))
        .expect("generate");
    assert_eq!(table_a, table_b);
}

#[test]
fn dataset_aborts_without_partial_table_on_field_failure() {
    let path = temp_csv("abort", "only\n");
    let mut dataset = Dataset::new(5, "abort", "abort", "out", ExportFormat::Csv);
    dataset.add_field(factory::create("namefield", &json!({"name": "who"})).expect("build"));
    dataset.add_field(
        factory::create(
            "customfield",
            &json!({
                "name": "callsign",
                "filePath": path.to_str().expect("utf-8 path"),
                "unique": true,
            }),
        )
        .expect("build custom field"),
    );

    let mut rng = rng::seeded(1);
    let result = dataset.generate_values(&mut rng);
    assert!(matches!(result, Err(Error::UniquePoolExhausted { .. })));
    let _ = fs::remove_file(&path);
}
