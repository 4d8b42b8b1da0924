use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};

use rowgen_core::dataset::{Dataset, ExportFormat};
use rowgen_core::{factory, rng};
use rowgen_export::export_dataset;

fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rowgen_export_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn sample_dataset(dir: &PathBuf, format: ExportFormat) -> Dataset {
    let mut dataset = Dataset::new(
        3,
        "people",
        "people",
        dir.to_str().expect("utf-8 path"),
        format,
    );
    dataset.add_field(
        factory::create("incrementfield", &json!({"name": "id", "startValue": 0}))
            .expect("build increment field"),
    );
    dataset.add_field(
        factory::create("namefield", &json!({"name": "who"})).expect("build name field"),
    );
    dataset
}

#[test]
fn csv_sink_writes_header_then_rows() {
    let dir = temp_dir("csv");
    let mut dataset = sample_dataset(&dir, ExportFormat::Csv);
    let mut rng = rng::seeded(41);

    let path = export_dataset(&mut dataset, &mut rng).expect("export");
    assert_eq!(path, dir.join("people.csv"));

    let contents = fs::read_to_string(&path).expect("read output");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "id,who");
    for (index, line) in lines[1..].iter().enumerate() {
        let (id, who) = line.split_once(',').expect("two columns");
        assert_eq!(id.parse::<i64>().expect("numeric id"), index as i64 + 1);
        assert!(!who.is_empty());
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn json_sink_writes_objects_keyed_by_header() {
    let dir = temp_dir("json");
    let mut dataset = sample_dataset(&dir, ExportFormat::Json);
    let mut rng = rng::seeded(41);

    let path = export_dataset(&mut dataset, &mut rng).expect("export");
    let document: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read output")).expect("parse");
    let entries = document.as_array().expect("array of entries");
    assert_eq!(entries.len(), 3);
    for (index, entry) in entries.iter().enumerate() {
        assert_eq!(entry.get("id").and_then(Value::as_i64), Some(index as i64 + 1));
        assert!(entry.get("who").and_then(Value::as_str).is_some());
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn xml_sink_nests_entries_under_a_dataset_root() {
    let dir = temp_dir("xml");
    let mut dataset = sample_dataset(&dir, ExportFormat::Xml);
    let mut rng = rng::seeded(41);

    let path = export_dataset(&mut dataset, &mut rng).expect("export");
    let contents = fs::read_to_string(&path).expect("read output");

    assert!(contents.starts_with("<dataset>"));
    assert!(contents.ends_with("</dataset>"));
    assert_eq!(contents.matches("<entry>").count(), 3);
    assert_eq!(contents.matches("<id>").count(), 3);
    assert!(contents.contains("<id>1</id>"));
    assert_eq!(contents.matches("<who>").count(), 3);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn null_cells_render_as_empty_csv_fields() {
    let dir = temp_dir("nulls");
    let mut dataset = Dataset::new(
        2,
        "nulls",
        "nulls",
        dir.to_str().expect("utf-8 path"),
        ExportFormat::Csv,
    );
    dataset.add_field(
        factory::create("incrementfield", &json!({"name": "id"})).expect("build increment field"),
    );
    dataset.add_field(
        factory::create("stringfield", &json!({"name": "blank", "strCount": 0}))
            .expect("build string field"),
    );

    let mut rng = rng::seeded(3);
    let path = export_dataset(&mut dataset, &mut rng).expect("export");
    let contents = fs::read_to_string(&path).expect("read output");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "id,blank");
    assert_eq!(lines[1], "1,");
    assert_eq!(lines[2], "2,");

    let _ = fs::remove_dir_all(&dir);
}
