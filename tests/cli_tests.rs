//! End-to-end tests for the `eduguide` binary.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command isolated from the caller's config file and credentials.
fn eduguide(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("eduguide");
    cmd.current_dir(dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("GEMINI_BASE_URL")
        .env_remove("EDUGUIDE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn topics_lists_suggestions() {
    let dir = TempDir::new().unwrap();
    eduguide(&dir)
        .arg("topics")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Python Programming\n"))
        .stdout(predicate::str::contains("UI/UX Design\n"))
        .stdout(predicate::str::ends_with("Project Management\n"));
}

#[test]
fn render_from_stdin() {
    let dir = TempDir::new().unwrap();
    eduguide(&dir)
        .arg("render")
        .write_stdin("# Hi\n\n**bold** and `code`")
        .assert()
        .success()
        .stdout("<h1>Hi</h1><p><strong>bold</strong> and <code>code</code></p>");
}

#[test]
fn render_traces_each_inline_rule() {
    let dir = TempDir::new().unwrap();
    eduguide(&dir)
        .env("NO_COLOR", "1")
        .args(["-vv", "render"])
        .write_stdin("**bold**")
        .assert()
        .success()
        .stdout("<p><strong>bold</strong></p>")
        .stderr(predicate::str::contains("inline pass"))
        .stderr(predicate::str::contains("rule=\"bold\""))
        .stderr(predicate::str::contains("rule=\"code\""));
}

#[test]
fn render_file_to_output_with_protection() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.md");
    let output = dir.path().join("notes.html");
    fs::write(&input, "```\nx = **y**\n```").unwrap();

    eduguide(&dir)
        .args(["render", "notes.md", "-o", "notes.html", "--protect-code-blocks"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "<pre><code>x = **y**</code></pre>"
    );
}

#[test]
fn render_reads_protection_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("eduguide.toml"),
        "[render]\nprotect_code_blocks = true\n",
    )
    .unwrap();

    eduguide(&dir)
        .arg("render")
        .write_stdin("```\n`a`\n```")
        .assert()
        .success()
        .stdout("<pre><code>`a`</code></pre>");
}

#[test]
fn render_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    eduguide(&dir)
        .args(["render", "absent.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read absent.md"));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    eduguide(&dir)
        .args(["--config", "nope.toml", "topics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn generate_requires_title() {
    let dir = TempDir::new().unwrap();
    eduguide(&dir)
        .args(["generate", "--topic", "Ownership"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("course title is required"));
}

#[test]
fn generate_requires_api_key() {
    let dir = TempDir::new().unwrap();
    eduguide(&dir)
        .args(["generate", "--title", "Rust", "--topic", "Ownership"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Gemini API key found"));
}

#[test]
fn generate_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    eduguide(&dir)
        .args(["generate", "--title", "Rust", "--topic", "x", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn guide_response() -> serde_json::Value {
    let guide = json!({
        "title": "Intro to Rust",
        "overview": "Safe systems programming.",
        "learningObjectives": ["Explain ownership"],
        "sections": [{ "title": "Ownership", "content": "Values have **one** owner." }]
    });
    json!({
        "candidates": [{ "content": { "parts": [{ "text": guide.to_string() }] } }]
    })
}

#[tokio::test]
async fn generate_from_outline_file_as_json() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(guide_response()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("outline.toml"),
        "title = \"Intro to Rust\"\ntopics = [\"Ownership\"]\n",
    )
    .unwrap();

    eduguide(&dir)
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.uri())
        .env("NO_COLOR", "1")
        .args(["generate", "--outline", "outline.toml", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"learningObjectives\""))
        .stdout(predicate::str::contains("\"references\": []"))
        .stderr(predicate::str::contains("guide generated"))
        .stderr(predicate::str::contains("elapsed="));
}

#[tokio::test]
async fn generate_html_with_model_override() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(guide_response()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    eduguide(&dir)
        .env("API_KEY", "legacy-key")
        .env("GEMINI_BASE_URL", server.uri())
        .args([
            "generate",
            "--title",
            "Intro to Rust",
            "--topic",
            "Ownership",
            "--model",
            "gemini-2.5-pro",
            "-o",
            "guide.html",
        ])
        .assert()
        .success();

    let html = fs::read_to_string(dir.path().join("guide.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h2>Ownership</h2><p>Values have <strong>one</strong> owner.</p>"));
}

#[tokio::test]
async fn generate_reports_malformed_response() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "not json" }] } }]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    eduguide(&dir)
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.uri())
        .args(["generate", "--title", "Rust", "--topic", "Traits"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The AI returned an invalid format. Please try refining your topics or generating again.",
        ));
}
