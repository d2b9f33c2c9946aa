use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn spin_help_mentions_options() {
    let mut cmd = cargo_bin_cmd!("reelctl");
    let output = cmd
        .arg("spin")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    for flag in [
        "--entries",
        "--pool",
        "--winner",
        "--duration",
        "--deceleration",
        "--json",
    ] {
        assert!(text.contains(flag), "spin help missing {flag}");
    }
}

#[test]
fn top_level_help_lists_subcommands() {
    cargo_bin_cmd!("reelctl")
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("spin")
                .and(predicate::str::contains("window"))
                .and(predicate::str::contains("config")),
        );
}

#[test]
fn spin_requires_a_pool() {
    cargo_bin_cmd!("reelctl")
        .args(["spin", "--winner", "3"])
        .assert()
        .failure();
}

#[test]
fn entries_and_pool_are_exclusive() {
    cargo_bin_cmd!("reelctl")
        .args([
            "spin",
            "--entries",
            "5",
            "--pool",
            "pool.json",
            "--winner",
            "3",
        ])
        .assert()
        .failure();
}
