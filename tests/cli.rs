//! End-to-end tests for the modviz binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GRAPH: &str = "example.com/app example.com/a@v1.0.0
example.com/app example.com/b@v1.2.0
example.com/a@v1.0.0 example.com/b@v1.1.0
example.com/a@v1.0.0 golang.org/x/text@v0.3.7
";

fn modviz(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("modviz").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("MODVIZ_INPUT")
        .env_remove("MODVIZ_OUTPUT")
        .env_remove("MODVIZ_FORMAT")
        .env_remove("MODVIZ_CONFIG");
    cmd
}

#[test]
fn test_dot_from_stdin() {
    let dir = TempDir::new().unwrap();

    modviz(&dir)
        .write_stdin(GRAPH)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"))
        .stdout(predicate::str::contains(
            "\"example.com/app\" -> \"example.com/a@v1.0.0\";",
        ))
        .stdout(predicate::str::contains(
            "\"example.com/a@v1.0.0\" -> \"example.com/b@v1.1.0\" [style=dashed];",
        ))
        .stderr(predicate::str::contains("Starting visualization"));
}

#[test]
fn test_html_to_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("graph.txt");
    let output = dir.path().join("graph.html");
    fs::write(&input, GRAPH).unwrap();

    modviz(&dir)
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--format", "html"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("\"unselected\":[\"example.com/b@v1.1.0\"]"));
    assert!(html.contains("<td>golang.org/x/text</td><td>v0.3.7</td>"));
}

#[test]
fn test_malformed_line_fails() {
    let dir = TempDir::new().unwrap();

    modviz(&dir)
        .write_stdin("example.com/app example.com/a@v1.0.0\nexample.com/app\n")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 2 must be formatted"));
}

#[test]
fn test_unknown_format_flag_shows_usage() {
    let dir = TempDir::new().unwrap();

    modviz(&dir)
        .args(["--format", "svg"])
        .write_stdin(GRAPH)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid value 'svg'"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_format_in_config_fails_before_reading() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("modviz.toml"), "[output]\nformat = \"svg\"\n").unwrap();

    modviz(&dir)
        .write_stdin(GRAPH)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unsupported output format: 'svg'"))
        .stderr(predicate::str::contains("Starting visualization").not());
}

#[test]
fn test_config_file_in_current_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("modviz.toml"), "[output]\nformat = \"html\"\n").unwrap();

    modviz(&dir)
        .write_stdin(GRAPH)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_format_flag_beats_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("modviz.toml"), "[output]\nformat = \"html\"\n").unwrap();

    modviz(&dir)
        .args(["--format", "dot"])
        .write_stdin(GRAPH)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"));
}

#[test]
fn test_custom_template() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("list.tmpl");
    fs::write(
        &template,
        "{{#selected}}\n{{path}} {{version}}\n{{/selected}}\n",
    )
    .unwrap();

    modviz(&dir)
        .arg("--template")
        .arg(&template)
        .write_stdin(GRAPH)
        .assert()
        .success()
        .stdout("example.com/a v1.0.0\nexample.com/b v1.2.0\ngolang.org/x/text v0.3.7\n");
}

#[test]
fn test_broken_template_reports_template_error() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("broken.tmpl");
    fs::write(&template, "{{#edges}}unterminated").unwrap();

    modviz(&dir)
        .arg("--template")
        .arg(&template)
        .write_stdin(GRAPH)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to parse template"));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();

    modviz(&dir)
        .args(["--input", "does-not-exist.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to open input file"));
}

#[test]
fn test_empty_input_renders_empty_graph() {
    let dir = TempDir::new().unwrap();

    modviz(&dir)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"))
        .stdout(predicate::str::contains("->").not())
        .stderr(predicate::str::contains("no dependencies"));
}

#[test]
fn test_format_from_environment() {
    let dir = TempDir::new().unwrap();

    modviz(&dir)
        .env("MODVIZ_FORMAT", "html")
        .write_stdin(GRAPH)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"));
}
