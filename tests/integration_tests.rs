//! Integration tests for description loading and the pbxgen binary

use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use pbxgen::description::GraphDescription;
use pbxgen::identity::IdentityService;
use pbxgen::serialize::{self, SerializeConfig};

/// Helper to run the full pipeline on a description file
fn render_file(path: &Path) -> Result<String, String> {
    let source = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let desc = GraphDescription::from_json(&source).map_err(|e| e.to_string())?;
    let graph = desc.build(Arc::new(IdentityService::new())).map_err(|e| e.to_string())?;
    let version = desc.format_version.unwrap_or(serialize::DEFAULT_FORMAT_VERSION);
    serialize::serialize_to_string(&graph, &SerializeConfig::new().with_format_version(version)).map_err(|e| e.to_string())
}

fn json_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    files.sort();
    files
}

/// Test that all valid fixtures render
#[test]
fn test_valid_fixtures() {
    let files = json_files(Path::new("tests/fixtures"));
    assert!(!files.is_empty());
    for path in files {
        let result = render_file(&path);
        assert!(result.is_ok(), "Expected {} to render, got: {:?}", path.display(), result.err());
    }
}

/// Test that all invalid fixtures are rejected
#[test]
fn test_invalid_fixtures() {
    let files = json_files(Path::new("tests/fixtures/invalid"));
    assert!(!files.is_empty());
    for path in files {
        assert!(render_file(&path).is_err(), "Expected {} to be rejected", path.display());
    }
}

// ============================================================================
// Binary
// ============================================================================

fn pbxgen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pbxgen"))
}

#[test]
fn test_cli_render_matches_library() {
    let output = pbxgen()
        .args(["render", "tests/fixtures/hello_world.json"])
        .output()
        .expect("Failed to run pbxgen");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let expected = render_file(Path::new("tests/fixtures/hello_world.json")).unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn test_cli_render_reports_invalid_description() {
    let output = pbxgen()
        .args(["render", "tests/fixtures/invalid/unknown_isa.json"])
        .output()
        .expect("Failed to run pbxgen");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("PBXWidget"));
}

#[test]
fn test_cli_id_is_deterministic() {
    let run = || {
        pbxgen()
            .args(["id", "--key", "rootgroup", "-n", "3"])
            .output()
            .expect("Failed to run pbxgen")
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let ids = IdentityService::new();
    let stdout = String::from_utf8_lossy(&first.stdout);
    assert_eq!(stdout.trim_end(), format!("{}  rootgroup", ids.hashed_id("rootgroup")));
}

#[test]
fn test_cli_sequential_ids() {
    let output = pbxgen().args(["id", "-n", "2"]).output().expect("Failed to run pbxgen");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["010000000000000000000001", "010000000000000000000002"]);
}

#[test]
fn test_cli_package_missing_template() {
    let dir = tempfile::tempdir().unwrap();
    let output = pbxgen()
        .arg("package")
        .arg("--template")
        .arg(dir.path().join("missing.nsi.in"))
        .arg("--toplevel")
        .arg(dir.path())
        .arg("--program")
        .arg("makensis")
        .output()
        .expect("Failed to run pbxgen");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not find NSIS installer template file"));
}
