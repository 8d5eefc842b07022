use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `blitz` command isolated in its own home directory.
fn blitz(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("blitz").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("BLITZ_TOKEN")
        .env_remove("BLITZ_LOG")
        .env("BLITZ_API_URL", "http://127.0.0.1:9");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("focus"))
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn test_commands_require_login() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_whoami_without_token() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("blitz login"));
}

#[test]
fn test_blank_project_name_is_rejected() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .env("BLITZ_TOKEN", "tok-123")
        .args(["project", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_blank_task_title_is_rejected() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .env("BLITZ_TOKEN", "tok-123")
        .args(["task", "add", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_bad_focus_duration_is_rejected() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .env("BLITZ_TOKEN", "tok-123")
        .args(["focus", "--duration", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration"));
}

#[test]
fn test_huge_focus_duration_is_rejected() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .env("BLITZ_TOKEN", "tok-123")
        .args(["focus", "--duration", "9999999999999999h"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid duration"));
}

#[test]
fn test_unreachable_server_is_a_network_error() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .env("BLITZ_TOKEN", "tok-123")
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_logout_when_signed_out() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_logout_removes_token_file() {
    let home = TempDir::new().unwrap();
    let token = home.path().join(".blitz").join("token");
    std::fs::create_dir_all(token.parent().unwrap()).unwrap();
    std::fs::write(&token, "tok-123").unwrap();

    blitz(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!token.exists());
}

#[test]
fn test_invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join(".blitz").join("config.yaml");
    std::fs::create_dir_all(config.parent().unwrap()).unwrap();
    std::fs::write(&config, "focus:\n  pomodoro_minutes: 0\n").unwrap();

    blitz(&home)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pomodoro_minutes"));
}

#[test]
fn test_json_output_for_logout() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .args(["--output", "json", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"logged_out\":false"));
}

#[test]
fn test_bash_completions() {
    let home = TempDir::new().unwrap();
    blitz(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blitz"));
}
