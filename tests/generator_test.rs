//! Generator integration tests: the checked-in GNAP records match the table.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use gnap_codec::generator::write_files;
use gnap_codec::gnap::RecordType;
use gnap_codec::{generate, load_table, GenerateError, GenerateOptions, SchemaError};
use tempfile::TempDir;

fn manifest_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn checked_in_records_are_up_to_date() {
    let table = load_table(&manifest_path("schemas/gnap.json")).unwrap();
    let files = generate(&table, &GenerateOptions::new()).unwrap();
    assert_eq!(files.len(), RecordType::ALL.len());

    for file in &files {
        let path = manifest_path("src/gnap").join(&file.file_name);
        let checked_in = fs::read_to_string(&path).unwrap();
        assert_eq!(
            checked_in, file.source,
            "{} is stale; regenerate it from schemas/gnap.json",
            file.file_name
        );
    }
}

#[test]
fn table_and_record_types_agree() {
    let table = load_table(&manifest_path("schemas/gnap.json")).unwrap();
    let from_table: BTreeSet<&str> = table.records.iter().map(|r| r.name.as_str()).collect();
    let from_types: BTreeSet<&str> = RecordType::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(from_table, from_types);
}

#[test]
fn written_files_match_generated_sources() {
    let table = load_table(&manifest_path("schemas/gnap.json")).unwrap();
    let files = generate(&table, &GenerateOptions::new().constructors(false)).unwrap();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("gnap");
    write_files(&out, &files).unwrap();

    for file in &files {
        let written = fs::read_to_string(out.join(&file.file_name)).unwrap();
        assert_eq!(written, file.source);
        assert!(!written.contains("pub fn new("));
    }
}

#[test]
fn custom_header() {
    let table = load_table(&manifest_path("schemas/gnap.json")).unwrap();
    let options = GenerateOptions::new().header("// generated");
    let files = generate(&table, &options).unwrap();
    assert!(files.iter().all(|f| f.source.starts_with("// generated\n\n")));
}

#[test]
fn rejects_malformed_tables() {
    let cases = [
        (
            r#"{"records": [{"name": "A", "fields": []}, {"name": "A", "fields": []}]}"#,
            "declared more than once",
        ),
        (
            r#"{"records": [{"name": "A", "fields": [
                {"name": "x", "type": "string", "shorthand": true},
                {"name": "y", "type": "string", "shorthand": true}
            ]}]}"#,
            "more than one shorthand",
        ),
        (
            r#"{"records": [{"name": "A", "fields": [{"name": "x", "type": "int", "shorthand": true}]}]}"#,
            "must be a single string",
        ),
        (
            r#"{"records": [{"name": "A", "fields": [{"name": "x", "type": "record:B"}]}]}"#,
            "unknown record 'B'",
        ),
        (
            r#"{"records": [{"name": "A", "fields": [{"name": "x", "type": "token:Colour"}]}]}"#,
            "unknown token type 'Colour'",
        ),
        (
            r#"{"records": [{"name": "A", "fields": [{"name": "x", "type": "float"}]}]}"#,
            "unknown type 'float'",
        ),
        (
            r#"{"records": [{"name": "A", "fields": [{"name": "extra", "type": "string"}]}]}"#,
            "reserved accessor",
        ),
    ];

    for (json, message) in cases {
        let table = gnap_codec::parse_table(json).unwrap();
        let err: SchemaError = generate(&table, &GenerateOptions::new()).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "{:?} should mention {:?}",
            err.to_string(),
            message
        );
        assert_eq!(err.exit_code(), 2);
    }
}

#[test]
fn missing_table_file() {
    let err = load_table(Path::new("/nonexistent/table.json")).unwrap_err();
    assert!(matches!(err, GenerateError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 3);
}
