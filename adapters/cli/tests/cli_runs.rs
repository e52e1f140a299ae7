use std::{path::PathBuf, process::Command};

fn demos() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_elemental-defence"));
    let _ = command
        .arg("--resources")
        .arg(demos().join("resources"))
        .env("RUST_LOG", "warn");
    command
}

#[test]
fn validate_accepts_the_demo_game() {
    let output = cli()
        .arg("validate")
        .output()
        .expect("failed to invoke elemental-defence validate");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("game 'default' is valid (2 levels)"), "{stdout}");
}

#[test]
fn validate_fails_for_unknown_games() {
    let output = cli()
        .args(["--game", "missing", "validate"])
        .output()
        .expect("failed to invoke elemental-defence validate");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.g"));
}

#[test]
fn run_prints_a_summary() {
    let output = cli()
        .arg("run")
        .arg("--config")
        .arg(demos().join("config.toml"))
        .arg("--plan")
        .arg(demos().join("plan.toml"))
        .args(["--dt", "0.1", "--max-ticks", "5000"])
        .output()
        .expect("failed to invoke elemental-defence run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("outcome: "), "{stdout}");
    assert!(stdout.contains("towers placed: "), "{stdout}");
}
