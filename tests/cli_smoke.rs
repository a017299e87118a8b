// Smoke tests for the binary surface. The TUI itself needs a pseudo
// terminal, so these only exercise the argument parser and the tty guard.

use assert_cmd::Command;

#[test]
fn help_prints_and_exits_cleanly() {
    let mut cmd = Command::cargo_bin("keyrace").unwrap();
    let assert = cmd.arg("--help").assert();
    let output = assert.get_output();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--language"));
    assert!(stdout.contains("--bots"));
    assert!(stdout.contains("--seed"));
}

#[test]
fn refuses_to_run_without_a_tty() {
    let mut cmd = Command::cargo_bin("keyrace").unwrap();
    let output = cmd.write_stdin("").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stdin must be a tty"));
}

#[test]
fn rejects_an_unknown_language() {
    let mut cmd = Command::cargo_bin("keyrace").unwrap();
    let output = cmd.args(["--language", "fr"]).output().unwrap();

    assert!(!output.status.success());
}
