use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pomo(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomo").unwrap();
    cmd.env_remove("POMO_HOME")
        .env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(dir.path());
    cmd
}

#[test]
fn status_shows_defaults() {
    let dir = TempDir::new().unwrap();

    pomo(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work:          25 min"))
        .stdout(predicate::str::contains("Short break:   5 min"));
}

#[test]
fn set_duration_is_persisted() {
    let dir = TempDir::new().unwrap();

    pomo(&dir)
        .args(["set", "work", "45"])
        .assert()
        .success()
        .stdout(predicate::str::contains("work set to 45 minutes"));

    pomo(&dir)
        .args(["status", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"workMinutes\": 45"));
}

#[test]
fn set_duration_rejects_zero() {
    let dir = TempDir::new().unwrap();

    pomo(&dir)
        .args(["set", "break", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive"));

    pomo(&dir)
        .args(["status", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"breakMinutes\": 5"));
}

#[test]
fn set_duration_rejects_huge_values() {
    let dir = TempDir::new().unwrap();

    pomo(&dir)
        .args(["set", "work", "999999999999999999h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));

    pomo(&dir)
        .args(["set", "work", "99999999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));

    pomo(&dir)
        .args(["status", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"workMinutes\": 25"));
}

#[test]
fn history_starts_empty() {
    let dir = TempDir::new().unwrap();

    pomo(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No completed sessions yet"));
}

#[test]
fn history_clear_needs_force() {
    let dir = TempDir::new().unwrap();

    pomo(&dir)
        .args(["history", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    pomo(&dir)
        .args(["history", "clear", "--force"])
        .assert()
        .success();
}

#[test]
fn report_rejects_unknown_period() {
    let dir = TempDir::new().unwrap();

    pomo(&dir)
        .args(["report", "decade"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown period"));

    pomo(&dir)
        .args(["report", "today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pomodoro Report: Today"));
}

#[test]
fn music_add_and_mode() {
    let dir = TempDir::new().unwrap();
    let track = dir.path().join("focus.mp3");
    std::fs::write(&track, b"").unwrap();

    pomo(&dir)
        .args(["music", "add"])
        .arg(&track)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 track(s)"));

    pomo(&dir)
        .args(["music", "mode", "loop"])
        .assert()
        .success();

    pomo(&dir)
        .args(["music", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("focus"))
        .stdout(predicate::str::contains("loop"));
}

#[test]
fn completions_for_bash() {
    let dir = TempDir::new().unwrap();

    pomo(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomo"));
}

#[test]
fn creates_data_files() {
    let dir = TempDir::new().unwrap();

    pomo(&dir).arg("status").assert().success();

    assert!(dir.path().join("pomo.db").exists());
    assert!(dir.path().join("pomo.log").exists());
    assert!(dir.path().join("music").is_dir());
}
