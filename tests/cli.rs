// ABOUTME: Integration tests for the berth CLI commands.
// ABOUTME: Runs against the fixture engine and unreachable sockets.

use assert_cmd::Command;
use predicates::prelude::*;

fn berth_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("berth"));
    cmd.env_remove("BERTH_SOCKET")
        .env_remove("DOCKER_HOST")
        .env_remove("RUST_LOG");
    cmd
}

fn fixture_cmd() -> Command {
    let mut cmd = berth_cmd();
    cmd.arg("--fixture");
    cmd
}

#[test]
fn help_shows_commands() {
    berth_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("images"))
        .stdout(predicate::str::contains("containers"))
        .stdout(predicate::str::contains("networks"))
        .stdout(predicate::str::contains("overview"))
        .stdout(predicate::str::contains("--socket"));
}

#[test]
fn images_table() {
    fixture_cmd()
        .arg("images")
        .assert()
        .success()
        .stdout(predicate::str::contains("REPOSITORY"))
        .stdout(predicate::str::contains("nginx"))
        .stdout(predicate::str::contains("a8758716bb6a"))
        .stdout(predicate::str::contains("187.7MB"));
}

#[test]
fn quiet_containers_print_full_ids() {
    fixture_cmd()
        .args(["--output", "quiet", "containers"])
        .assert()
        .success()
        .stdout(
            "3f4c1a9b2e7d8c6a5b4f3e2d1c0b9a8f7e6d5c4b3a291807f6e5d4c3b2a19080\n\
             9e8d7c6b5a4f3e2d1c0b9a8f7e6d5c4b3a2918070f6e5d4c3b2a190807f6e5d4\n",
        );
}

#[test]
fn running_filter() {
    fixture_cmd()
        .args(["containers", "--running"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web"))
        .stdout(predicate::str::contains("cache").not());
}

#[test]
fn networks_as_json() {
    let output = fixture_cmd()
        .args(["-o", "json", "networks"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let networks = value.as_array().unwrap();
    assert_eq!(networks.len(), 3);
    assert_eq!(networks[0]["name"], "bridge");
    assert_eq!(networks[0]["ipam"]["config"][0]["subnet"], "172.17.0.0/16");
}

#[test]
fn disk_usage_table() {
    fixture_cmd()
        .arg("df")
        .assert()
        .success()
        .stdout(predicate::str::contains("RECLAIMABLE"))
        .stdout(predicate::str::contains("Images"))
        .stdout(predicate::str::contains("Local Volumes"))
        .stdout(predicate::str::contains("Build Cache"));
}

#[test]
fn overview_shows_every_section() {
    fixture_cmd()
        .arg("overview")
        .assert()
        .success()
        .stdout(predicate::str::contains("IMAGES"))
        .stdout(predicate::str::contains("CONTAINERS"))
        .stdout(predicate::str::contains("NETWORKS"))
        .stdout(predicate::str::contains("DISK USAGE"));
}

#[test]
fn overview_json_has_all_keys() {
    let output = fixture_cmd()
        .args(["--output", "json", "overview"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    for key in ["images", "containers", "networks", "disk_usage"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn mutation_prints_affected_id() {
    fixture_cmd()
        .args(["stop", "web"])
        .assert()
        .success()
        .stdout("Stopped container web\n");
}

#[test]
fn unknown_image_fails() {
    fixture_cmd()
        .args(["rmi", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: request failed"))
        .stderr(predicate::str::contains("No such image: nope"));
}

#[test]
fn ping_fixture() {
    fixture_cmd().arg("ping").assert().success().stdout("OK\n");
}

#[test]
fn unreachable_socket_fails() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("missing.sock");

    berth_cmd()
        .arg("--socket")
        .arg(&socket)
        .arg("ping")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot connect to engine socket"));
}

#[test]
fn remote_docker_host_is_rejected() {
    let home = tempfile::tempdir().unwrap();

    berth_cmd()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("DOCKER_HOST", "tcp://10.0.0.5:2376")
        .arg("images")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported engine endpoint"));
}

#[test]
fn config_file_socket_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yml");
    let socket = dir.path().join("from-config.sock");
    std::fs::write(&config, format!("socket: {}\n", socket.display())).unwrap();

    berth_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--timeout", "500ms", "ping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("from-config.sock"));
}

#[test]
fn bad_timeout_is_a_usage_error() {
    berth_cmd()
        .args(["--timeout", "soon", "ping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout"));
}
