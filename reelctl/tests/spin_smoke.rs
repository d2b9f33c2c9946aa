use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from any config in the environment or working directory.
fn reelctl(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("reelctl");
    cmd.current_dir(dir.path())
        .env_remove("REEL_CONFIG_PATH")
        .env_remove("REEL_CONFIG_JSON")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn spin_prints_winner_summary() {
    let dir = TempDir::new().expect("tempdir");
    reelctl(&dir)
        .args(["spin", "--entries", "5", "--winner", "3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("winner: 3")
                .and(predicate::str::contains("working set: 100 (repeated)")),
        );
}

#[test]
fn spin_json_reports_centered_winner() {
    let dir = TempDir::new().expect("tempdir");
    let output = reelctl(&dir)
        .args([
            "spin",
            "--entries",
            "10000",
            "--winner",
            "9999",
            "--duration",
            "short",
            "--deceleration",
            "fast",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value =
        serde_json::from_slice(&output).expect("json summary");
    assert_eq!(report["working_set_len"], 5000);
    assert_eq!(report["regime"], "windowed");
    assert_eq!(report["centered"], "9999");
    assert_eq!(report["winner"]["ticketId"], "9999");
    assert!(report["frames"].as_u64().expect("frames") > 0);
}

#[test]
fn spin_reads_pool_file() {
    let dir = TempDir::new().expect("tempdir");
    let pool = dir.path().join("pool.json");
    fs::write(
        &pool,
        r#"[
            {"ticketId": "TICKET-005", "displayFirst": "Ada", "displayLast": "Lovelace"},
            {"ticketId": "TICKET-007", "displayFirst": "Grace", "displayLast": "Hopper"}
        ]"#,
    )
    .expect("write pool");

    reelctl(&dir)
        .arg("spin")
        .arg("--pool")
        .arg(&pool)
        .args(["--winner", "#7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("winner: TICKET-007 (Grace Hopper)"));
}

#[test]
fn unknown_winner_fails() {
    let dir = TempDir::new().expect("tempdir");
    reelctl(&dir)
        .args(["spin", "--entries", "3", "--winner", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("999"));
}

#[test]
fn window_lists_neighbours() {
    let dir = TempDir::new().expect("tempdir");
    reelctl(&dir)
        .args([
            "window",
            "--entries",
            "6000",
            "--winner",
            "1",
            "--context",
            "1",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("working set: 5000 (windowed)")
                .and(predicate::str::contains("winner index: 2500"))
                .and(predicate::str::contains("6000")),
        );
}

#[test]
fn config_uses_file_from_working_directory() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("reel.toml"), "[geometry]\nitem_height = 64.0\n")
        .expect("write config");

    reelctl(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("item_height = 64.0"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[window]\nmin_len = 10\nmax_len = 5\n").expect("write");

    reelctl(&dir)
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_len"));
}
