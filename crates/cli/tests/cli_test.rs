//! Integration tests for the decogen binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A module `example.com/app` with a `svc` package, plus a fake GOROOT.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(&root.join("app/go.mod"), "module example.com/app\n");
    write(
        &root.join("app/svc/svc.go"),
        r#"package svc

import "context"

type User struct{}

type UserService interface {
	Find(ctx context.Context, id string) (*User, error)
	Close()
}
"#,
    );
    write(
        &root.join("goroot/src/context/context.go"),
        "package context\n\ntype Context interface{}\n",
    );
    write(
        &root.join(".decogen.json"),
        r#"{ "goroot": "goroot", "gopath": ["gopath"] }"#,
    );
    temp
}

fn decogen(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("decogen").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("GOROOT")
        .env_remove("GOPATH")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_inspect_prints_method_set() {
    let temp = project();

    let output = decogen(&temp)
        .args(["inspect", "app/svc", "UserService"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["location"], "example.com/app/svc");
    assert_eq!(report["interface"], "UserService");
    assert_eq!(report["methods"][0]["name"], "Find");
    assert_eq!(
        report["methods"][0]["results"][0],
        serde_json::json!({"name": "result1", "type": "*svc.User"})
    );
    assert_eq!(report["methods"][1]["name"], "Close");
    assert_eq!(
        report["imports"],
        serde_json::json!([
            {"alias": "context", "location": "context"},
            {"alias": "svc", "location": "example.com/app/svc"},
        ])
    );
}

#[test]
fn test_trace_to_stdout() {
    let temp = project();

    decogen(&temp)
        .args(["trace", "app/svc", "UserService"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "// Code generated by decogen. DO NOT EDIT.\n\npackage svcmws\n",
        ))
        .stdout(predicate::str::contains("type tracingUserService struct {"))
        .stdout(predicate::str::contains(
            "func NewTracingUserService(next svc.UserService, tracer trace.Tracer) svc.UserService {",
        ))
        .stdout(predicate::str::contains(
            "\tctx, span := t.tracer.Start(ctx, \"UserService.Find\")",
        ))
        .stdout(predicate::str::contains("span.RecordError(result2)"));
}

#[test]
fn test_trace_into_directory() {
    let temp = project();
    let out_dir = temp.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();

    decogen(&temp)
        .args(["trace", "app/svc", "UserService", "--package", "tracing"])
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote tracing implementation"));

    let code = fs::read_to_string(out_dir.join("tracing_user_service.go")).unwrap();
    assert!(code.contains("package tracing\n"));
    assert!(code.contains("func (t *tracingUserService) Close() {\n\tt.next.Close()\n}"));
}

#[test]
fn test_import_path_source_with_explicit_config() {
    let temp = project();
    write(
        &temp.path().join("custom.json"),
        r#"{ "goroot": "goroot", "modules": { "example.com/app": "app" } }"#,
    );

    decogen(&temp)
        .args(["inspect", "example.com/app/svc", "UserService", "--config"])
        .arg(temp.path().join("custom.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interface\": \"UserService\""));
}

#[test]
fn test_unknown_interface_fails() {
    let temp = project();

    decogen(&temp)
        .args(["trace", "app/svc", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find 'Missing' type"));
}

#[test]
fn test_not_an_interface_fails() {
    let temp = project();

    decogen(&temp)
        .args(["inspect", "app/svc", "User"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not an interface"));
}
