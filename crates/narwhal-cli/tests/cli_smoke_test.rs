use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    let fixture = repo_root().join("fixtures").join("energy.json");
    assert!(fixture.exists(), "fixture missing: {}", fixture.display());
    fixture
}

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_narwhal-cli"));
    cmd.current_dir(repo_root());
    cmd
}

#[test]
fn cli_prints_layout_json() {
    let output = cli()
        .args(["layout", fixture().to_string_lossy().as_ref()])
        .output()
        .expect("run narwhal-cli");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("layout JSON");
    assert_eq!(json["nodes"].as_array().map(Vec::len), Some(7));
    assert_eq!(json["edges"].as_array().map(Vec::len), Some(7));
    assert_eq!(json["config"]["size"]["width"].as_f64(), Some(600.0));
    assert!(json["ky"].as_f64().unwrap() > 0.0);
}

#[test]
fn cli_flags_override_embedded_config() {
    let output = cli()
        .args([
            "layout",
            "--width",
            "900",
            "--node-width",
            "30",
            "--curvature",
            "0.2",
            fixture().to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run narwhal-cli");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("layout JSON");
    assert_eq!(json["config"]["size"]["width"].as_f64(), Some(900.0));
    assert_eq!(json["config"]["size"]["height"].as_f64(), Some(400.0));
    assert_eq!(json["config"]["nodeWidth"].as_f64(), Some(30.0));
    assert_eq!(json["config"]["curvature"].as_f64(), Some(0.2));
}

#[test]
fn cli_reads_stdin() {
    let input = r#"{"nodes":[{"id":"a"},{"id":"b"}],"edges":[{"source":"a","target":"b","value":10}],
        "config":{"nodeWidth":20,"nodePadding":5,"size":{"width":200,"height":100}}}"#;
    let output = cli()
        .arg("paths")
        .write_stdin(input)
        .output()
        .expect("run narwhal-cli");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("paths JSON");
    assert_eq!(json[0]["source"], "a");
    assert_eq!(json[0]["target"], "b");
    assert_eq!(json[0]["d"], "M20,50L40,50C100,50 100,50 160,50L180,50");
}

#[test]
fn cli_renders_svg_to_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("energy.svg");

    cli()
        .args([
            "render",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg"), "output is not an SVG document");
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<rect").count(), 7);
    assert_eq!(svg.matches("<path").count(), 7);
    assert!(svg.contains("<title>Conversion losses</title>"));
}

#[test]
fn cli_reports_layout_errors() {
    let input = r#"{"nodes":[{"id":"a"}],"edges":[{"source":"a","target":"missing","value":1}]}"#;
    let output = cli()
        .arg("layout")
        .write_stdin(input)
        .output()
        .expect("run narwhal-cli");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error:"), "stderr: {stderr}");
    assert!(stderr.contains("missing"), "stderr: {stderr}");
}

#[test]
fn cli_rejects_unknown_flags() {
    cli().arg("--bogus").assert().code(2);
}
