//! Development mode turns internal faults into a process exit.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::process::{Command, Output};

use yare::parameterized;

fn run_jtd(arg: Option<&str>, mode: Option<&str>, statements: &str) -> Output {
    let temp = tempfile::tempdir().unwrap();
    let catalog = temp.path().join("statements.toml");
    std::fs::write(&catalog, statements).unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jtd"));
    cmd.args(arg)
        .env("JT_STATE_DIR", temp.path().join("state"))
        .env("JT_STATEMENTS", &catalog)
        .env("JT_BIND", "127.0.0.1:0")
        .env("RUST_LOG", "error");
    match mode {
        Some(mode) => cmd.env("JT_MODE", mode),
        None => cmd.env_remove("JT_MODE"),
    };
    cmd.output().expect("jtd should run")
}

#[parameterized(
    unknown_statement = { "[statements]\nnot_an_op = \"SELECT 1\"\n" },
    malformed_toml = { "[statements\n" },
)]
fn dev_arg_exits_on_broken_catalog(statements: &str) {
    let output = run_jtd(Some("dev"), None, statements);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("jtd: fatal fault in development mode: loading statement catalog"),
        "stderr should name the fault, got: {stderr}"
    );
}

#[test]
fn dev_mode_from_env_exits_on_broken_catalog() {
    let output = run_jtd(None, Some("development"), "[statements]\nnot_an_op = \"SELECT 1\"\n");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fatal fault in development mode"), "got: {stderr}");
}
