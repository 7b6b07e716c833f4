use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tsa 0.1.0"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal Session Admin"));
}

#[test]
fn test_no_command_prints_help() {
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_list_without_servers() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.env("TSA_HOME", temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No servers configured"));
}

#[test]
fn test_locate_on_unreachable_server() {
    // The listing tool is absent here, so the host reads as zero sessions
    // and the lookup falls through to "not found" on a clean exit.
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.env("TSA_HOME", temp_dir.path())
        .args(["--server", "ts01.invalid", "locate", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bob was not found on any server."));
}

#[test]
fn test_list_on_unreachable_server() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.env("TSA_HOME", temp_dir.path())
        .args(["--server", "ts01.invalid", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Server: ts01.invalid")
                .and(predicate::str::contains("no sessions")),
        );
}

#[test]
fn test_logoff_not_found_exits_normally() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.env("TSA_HOME", temp_dir.path())
        .args(["--server", "ts01.invalid", "logoff", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bob was not found on any server."));
}

#[test]
fn test_broadcast_on_unreachable_server() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.env("TSA_HOME", temp_dir.path())
        .args(["--server", "ts01.invalid", "broadcast", "maintenance at noon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Message delivered to 0 session(s)"));
}

#[test]
fn test_server_file_is_read() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("servers");
    let mut file = std::fs::File::create(&file_path).unwrap();
    writeln!(file, "# fleet").unwrap();
    writeln!(file, "ts01.invalid").unwrap();
    writeln!(file, "ts02.invalid").unwrap();

    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.env("TSA_HOME", temp_dir.path())
        .args(["--server-file"])
        .arg(&file_path)
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Server: ts01.invalid")
                .and(predicate::str::contains("Server: ts02.invalid"))
                .and(predicate::str::contains("2 server(s), 0 session(s)")),
        );
}

#[test]
fn test_missing_server_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.env("TSA_HOME", temp_dir.path())
        .args(["--server-file", "/nonexistent/servers", "list"])
        .assert()
        .failure();
}

#[test]
fn test_default_server_file_under_tsa_home() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("servers"), "ts01.invalid\n").unwrap();

    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.env("TSA_HOME", temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Server: ts01.invalid"));
}

#[test]
fn test_msg_requires_message_argument() {
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.args(["--server", "ts01.invalid", "msg", "bob"])
        .assert()
        .failure();
}

#[test]
fn test_list_json_roster() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("tsa").unwrap();
    cmd.env("TSA_HOME", temp_dir.path())
        .args(["--server", "ts01.invalid", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"server\": \"ts01.invalid\""));
}
