//! Integration tests for the JSON minifier.

use geobound::minify::minify_dir;

use std::fs;
use std::path::Path;

mod common;
use common::helpers::*;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_minify_after_download_shape() {
    // The usual pipeline: a dist directory of indented boundary files
    // turns into a flat directory of compact ones.
    let input = create_temp_dir();
    let output = create_temp_dir();
    write(
        input.path(),
        "110000.json",
        "{\n    \"adcode\": \"110000\",\n    \"name\": \"北京市\",\n    \"features\": []\n}",
    );
    write(
        input.path(),
        "110000_full.json",
        "{\n    \"adcode\": \"110000\",\n    \"features\": [1, 2]\n}",
    );

    let report = minify_dir(input.path(), output.path()).unwrap();
    assert_eq!(report.written.len(), 2);
    assert!(report.failed.is_empty());

    let compact = fs::read_to_string(output.path().join("110000.json")).unwrap();
    assert!(!compact.contains('\n'));
    assert!(!compact.contains(": "));
    assert!(compact.contains("北京市"));
    assert!(!compact.contains("\\u"));
}

#[test]
fn test_round_trip_is_deep_equal() {
    let input = create_temp_dir();
    let output = create_temp_dir();
    let original = r#"{
        "adcode": 650000,
        "center": [87.617733, 43.792818],
        "name": "新疆维吾尔自治区",
        "nested": {"deep": [{"a": null}, {"b": 1.5}, "文"]}
    }"#;
    write(input.path(), "650000.json", original);

    minify_dir(input.path(), output.path()).unwrap();

    let before: serde_json::Value = serde_json::from_str(original).unwrap();
    let after: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.path().join("650000.json")).unwrap())
            .unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_one_bad_file_does_not_affect_the_rest() {
    let input = create_temp_dir();
    let output = create_temp_dir();
    let nested = input.path().join("province/city");
    fs::create_dir_all(&nested).unwrap();

    for i in 0..5 {
        write(input.path(), &format!("file{}.json", i), r#"{"ok": true}"#);
    }
    write(&nested, "deep.json", r#"[{"ok": true}]"#);
    write(&nested, "broken.json", "{ definitely not json ]");

    let report = minify_dir(input.path(), output.path()).unwrap();
    assert_eq!(report.written.len(), 6);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].ends_with("broken.json"));

    for i in 0..5 {
        assert_eq!(
            fs::read_to_string(output.path().join(format!("file{}.json", i))).unwrap(),
            r#"{"ok":true}"#
        );
    }
    assert!(output.path().join("deep.json").exists());
    assert!(!output.path().join("broken.json").exists());
}

#[test]
fn test_missing_input_reports_and_continues() {
    let scratch = create_temp_dir();
    let missing = scratch.path().join("no-such-dir");
    let output = scratch.path().join("out");

    let report = minify_dir(&missing, &output).unwrap();
    assert!(report.written.is_empty());
    assert!(report.failed.is_empty());
    // Nothing to do, so the output directory is not even created.
    assert!(!output.exists());
}
