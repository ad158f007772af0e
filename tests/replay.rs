use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

const CONFIG: &str = r#"
[settings]
layouts = ["tall", "wide"]
enables_layout_hud = false
"#;

const SCRIPT: &str = r#"
(
    screens: [
        (
            id: 1,
            frame: (origin: (x: 0.0, y: 0.0), size: (width: 1000.0, height: 800.0)),
            space: (id: 1),
        ),
    ],
    steps: [
        set_windows(screen: 1, windows: (
            windows: [(pid: 1, idx: 1), (pid: 1, idx: 2)],
            active: [(pid: 1, idx: 1), (pid: 1, idx: 2)],
        )),
        change(screen: 1, change: add((pid: 1, idx: 1))),
        change(screen: 1, change: add((pid: 1, idx: 2))),
        drain,
        command(screen: 1, command: select("wide")),
        drain,
        set_tiling(false),
        change(screen: 1, change: unknown),
        drain,
    ],
)
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run(script: &Path, config: &Path, extra: &[&str]) -> Output {
    test_bin::get_test_bin("rift-reflow")
        .arg(script)
        .arg("--config")
        .arg(config)
        .args(extra)
        .output()
        .expect("failed to start rift-reflow")
}

fn frame(x: f64, y: f64, width: f64, height: f64) -> Value {
    json!({ "origin": { "x": x, "y": y }, "size": { "width": width, "height": height } })
}

#[test]
fn replays_script_and_prints_applied_frames() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.toml", CONFIG);
    let script = write(&dir, "script.ron", SCRIPT);

    let output = run(&script, &config, &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines, vec![
        json!({ "screen": 1, "frames": [
            { "window": { "pid": 1, "idx": 1 }, "frame": frame(0.0, 0.0, 500.0, 800.0) },
            { "window": { "pid": 1, "idx": 2 }, "frame": frame(500.0, 0.0, 500.0, 800.0) },
        ]}),
        json!({ "screen": 1, "frames": [
            { "window": { "pid": 1, "idx": 1 }, "frame": frame(0.0, 0.0, 1000.0, 400.0) },
            { "window": { "pid": 1, "idx": 2 }, "frame": frame(0.0, 400.0, 1000.0, 400.0) },
        ]}),
    ]);
}

#[test]
fn validate_only_loads_files() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.toml", CONFIG);
    let script = write(&dir, "script.ron", SCRIPT);

    let output = run(&script, &config, &["--validate"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
}

#[test]
fn validate_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.toml", CONFIG);
    let bad_script = write(&dir, "bad.ron", "(screens: [], steps: [drain])");
    assert!(!run(&bad_script, &config, &["--validate"]).status.success());

    let bad_config = write(&dir, "bad.toml", "[settings]\nlayouts = [\"spiral\"]\n");
    let script = write(&dir, "script.ron", SCRIPT);
    assert!(!run(&script, &bad_config, &["--validate"]).status.success());
}
