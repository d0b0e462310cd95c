use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

struct TestContext {
    _dir: TempDir,
    board_path: PathBuf,
}

impl TestContext {
    fn new(rows: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let board_path = dir.path().join("board.csv");
        let mut file = File::create(&board_path).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        Self {
            _dir: dir,
            board_path,
        }
    }
}

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sweepcore"))
}

#[test]
fn solve_reports_success_on_trivial_board() {
    let ctx = TestContext::new(&[".,.,.", ".,.,.", ".,.,."]);

    let output = bin()
        .args(["solve", "--board"])
        .arg(&ctx.board_path)
        .args(["--seed", "7"])
        .output()
        .expect("failed to run sweepcore");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Solved"), "stdout: {}", stdout);

    let revealed = Regex::new(r"revealed (\d+)").unwrap();
    let caps = revealed.captures(&stdout).expect("missing reveal count");
    assert_eq!(&caps[1], "9");
}

#[test]
fn solve_rejects_malformed_board() {
    let ctx = TestContext::new(&[".,?,."]);

    let output = bin()
        .args(["solve", "--board"])
        .arg(&ctx.board_path)
        .output()
        .expect("failed to run sweepcore");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Construction Error"), "stderr: {}", stderr);
}

#[test]
fn explore_prints_lane_summary() {
    let ctx = TestContext::new(&[".,.,.", ".,.,."]);

    let output = bin()
        .args(["explore", "--board"])
        .arg(&ctx.board_path)
        .args(["--lanes", "3", "--seed", "5"])
        .output()
        .expect("failed to run sweepcore");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Collapsed lanes: [] (0 of 3)"), "stdout: {}", stdout);
    assert!(stdout.contains("Mean lane quality: 1.000"), "stdout: {}", stdout);
}

#[test]
fn solve_accepts_config_file() {
    let ctx = TestContext::new(&[".,.", ".,."]);
    let config_path = ctx._dir.path().join("config.json");
    let mut file = File::create(&config_path).unwrap();
    writeln!(
        file,
        r#"{{"risk": {{"local_weight": 1.0, "distance_weight": 0.8, "risk_cap": 0.95}}, "policy": {{"move_budget": 50, "stall_limit": 10, "default_tau": 0.5}}}}"#
    )
    .unwrap();

    let output = bin()
        .args(["solve", "--board"])
        .arg(&ctx.board_path)
        .arg("--config")
        .arg(&config_path)
        .output()
        .expect("failed to run sweepcore");

    assert!(output.status.success());
}
