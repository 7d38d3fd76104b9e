//! CLI integration tests for gnap-codec binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gnap-codec"))
}

fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const GRANT_REQUEST: &str = r#"{
    "client": "7C7C4AZ9KHRS6X63AJAO",
    "access_token": [{"access": [{"type": "photo-api", "actions": ["read", "write"]}]}]
}"#;

mod canonical_command {
    use super::*;

    #[test]
    fn orders_and_collapses() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "req.json", GRANT_REQUEST);

        cmd()
            .args(["canonical", doc.to_str().unwrap(), "--type", "GrantRequest"])
            .assert()
            .success()
            .stdout(concat!(
                r#"{"access_token":{"access":[{"actions":["read","write"],"type":"photo-api"}]},"client":"7C7C4AZ9KHRS6X63AJAO"}"#,
                "\n"
            ));
    }

    #[test]
    fn reads_stdin_and_any_case_type() {
        cmd()
            .args(["canonical", "-", "--type", "user-code"])
            .write_stdin(r#"{"url":"https://srv.ex/device","code":"A1BC-3DFF","x":null}"#)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"{"code":"A1BC-3DFF","url":"https://srv.ex/device","x":null}"#,
            ));
    }

    #[test]
    fn pretty_output_file() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "code.json", r#"{"code":"A1BC"}"#);
        let out = dir.path().join("out.json");

        cmd()
            .args([
                "canonical",
                doc.to_str().unwrap(),
                "-t",
                "UserCode",
                "--pretty",
                "--output",
                out.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("{\n"));
        assert!(written.contains(r#""code": "A1BC""#));
    }

    #[test]
    fn wrong_shape_exits_2() {
        cmd()
            .args(["canonical", "-", "--type", "ResourceAccess"])
            .write_stdin(r#"{"type":"a","actions":[1]}"#)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("/actions/0"));
    }

    #[test]
    fn missing_file_exits_3() {
        cmd()
            .args(["canonical", "/nonexistent/doc.json", "--type", "UserCode"])
            .assert()
            .code(3);
    }

    #[test]
    fn unknown_type_rejected() {
        cmd()
            .args(["canonical", "-", "--type", "Grant"])
            .write_stdin("{}")
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown record type"));
    }
}

mod validate_command {
    use super::*;

    #[test]
    fn valid_document() {
        cmd()
            .args(["validate", "-", "--type", "GrantRequest"])
            .write_stdin(GRANT_REQUEST)
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid"));
    }

    #[test]
    fn missing_required_field() {
        cmd()
            .args(["validate", "-", "--type", "UserCode"])
            .write_stdin(r#"{"url":"https://srv.ex/device"}"#)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Validation failed:"))
            .stderr(predicate::str::contains(r#"field "code" is required"#));
    }

    #[test]
    fn json_output() {
        cmd()
            .args(["validate", "-", "--type", "UserCode", "--json"])
            .write_stdin(r#"{"code":"A1BC"}"#)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"{"valid":true}"#));

        cmd()
            .args(["validate", "-", "--type", "UserCode", "--json"])
            .write_stdin(r#"{}"#)
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""valid":false"#));
    }

    #[test]
    fn rule_violation() {
        cmd()
            .args(["validate", "-", "--type", "GrantRequest"])
            .write_stdin(
                r#"{"access_token":[{"access":[{"type":"a"}],"label":"t1"},{"access":[{"type":"b"}]}]}"#,
            )
            .assert()
            .code(1)
            .stderr(predicate::str::contains("access_token/1"));
    }

    #[test]
    fn truncated_document_exits_2() {
        cmd()
            .args(["validate", "-", "--type", "UserCode", "--json"])
            .write_stdin(r#"{"code":"#)
            .assert()
            .code(2)
            .stdout(predicate::str::contains(r#""valid":false"#));
    }

    #[test]
    fn structural_lists_every_violation() {
        cmd()
            .args(["validate", "-", "--type", "ResourceAccess", "--structural"])
            .write_stdin(r#"{"type":5,"actions":"read"}"#)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("/type"))
            .stderr(predicate::str::contains("/actions"));
    }
}

mod schema_command {
    use super::*;

    #[test]
    fn prints_json_schema() {
        cmd()
            .args(["schema", "--type", "grant_request"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r##""$ref":"#/$defs/GrantRequest""##))
            .stdout(predicate::str::contains("draft/2020-12"));
    }
}

mod generate_command {
    use super::*;

    const TABLE: &str = r#"{"records": [
        {"name": "Code", "fields": [
            {"name": "value", "type": "string", "required": true},
            {"name": "uri", "type": "string"}
        ]},
        {"name": "Holder", "fields": [{"name": "codes", "type": "[]record:Code", "collapsible": true}]}
    ]}"#;

    #[test]
    fn writes_one_file_per_record() {
        let dir = TempDir::new().unwrap();
        let table = write_temp_file(&dir, "table.json", TABLE);
        let out = dir.path().join("gen");

        cmd()
            .args([
                "generate",
                table.to_str().unwrap(),
                "--out-dir",
                out.to_str().unwrap(),
            ])
            .assert()
            .success();

        let code = fs::read_to_string(out.join("code.rs")).unwrap();
        assert!(code.contains("pub struct Code: CODE {"));
        assert!(code.contains("pub fn new(value: impl Into<String>) -> Self"));
        let holder = fs::read_to_string(out.join("holder.rs")).unwrap();
        assert!(holder.contains(r#"codes: [Code] => "codes" [collapsible],"#));
        assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    }

    #[test]
    fn stdout_without_constructors() {
        let dir = TempDir::new().unwrap();
        let table = write_temp_file(&dir, "table.json", TABLE);

        cmd()
            .args(["generate", table.to_str().unwrap(), "--no-constructors"])
            .assert()
            .success()
            .stdout(predicate::str::contains("// code.rs"))
            .stdout(predicate::str::contains("pub fn new").not());
    }

    #[test]
    fn bad_table_exits_2() {
        let dir = TempDir::new().unwrap();
        let table = write_temp_file(
            &dir,
            "table.json",
            r#"{"records": [{"name": "A", "fields": [{"name": "x", "type": "int", "collapsible": true}]}]}"#,
        );

        cmd()
            .args(["generate", table.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("collapsible"));
    }

    #[test]
    fn missing_table_exits_3() {
        cmd()
            .args(["generate", "/nonexistent/table.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }
}
