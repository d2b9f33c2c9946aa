use std::collections::HashMap;
use std::fs;

use reel_config::{
    CONFIG_PATH_VAR, ConfigLoadError, ConfigLoader, ReelConfig,
    ReelConfigSource,
};
use reel_model::{Deceleration, SpinDuration};
use tempfile::TempDir;

fn loader_in(dir: &TempDir) -> ConfigLoader {
    ConfigLoader::new()
        .with_search_root(dir.path())
        .with_env_overrides(HashMap::new())
}

#[test]
fn default_candidate_file_is_discovered() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("config")).expect("config dir");
    fs::write(
        dir.path().join("config/reel.toml"),
        "[spin]\nduration = \"short\"\n",
    )
    .expect("write config");

    let load = loader_in(&dir).load().expect("load");
    assert_eq!(
        load.source,
        ReelConfigSource::File(dir.path().join("config/reel.toml"))
    );
    assert_eq!(load.config.spin.duration, SpinDuration::Short);
}

#[test]
fn top_level_toml_beats_nested_candidate() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("config")).expect("config dir");
    fs::write(dir.path().join("reel.toml"), "[diagnostics]\nmax_frames = 10\n")
        .expect("write reel.toml");
    fs::write(
        dir.path().join("config/reel.toml"),
        "[diagnostics]\nmax_frames = 20\n",
    )
    .expect("write nested");

    let load = loader_in(&dir).load().expect("load");
    assert_eq!(load.config.diagnostics.max_frames, 10);
}

#[test]
fn json_file_is_parsed_by_extension() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("custom.json");
    fs::write(
        &path,
        r#"{"spin": {"deceleration": "slow", "align_winner_front": true}}"#,
    )
    .expect("write json");

    let load = loader_in(&dir)
        .with_config_path(&path)
        .load()
        .expect("load json");
    assert_eq!(load.source, ReelConfigSource::File(path));
    assert_eq!(load.config.spin.deceleration, Deceleration::Slow);
    assert!(load.config.into_settings().align_winner_front);
}

#[test]
fn env_path_takes_precedence_over_candidates() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("reel.toml"), "[window]\nmin_len = 10\n")
        .expect("write candidate");
    let env_file = dir.path().join("env.toml");
    fs::write(&env_file, "[window]\nmin_len = 50\n").expect("write env file");

    let vars = HashMap::from([(
        CONFIG_PATH_VAR.to_owned(),
        env_file.display().to_string(),
    )]);
    let load = loader_in(&dir)
        .with_env_overrides(vars)
        .load()
        .expect("load");
    assert_eq!(load.source, ReelConfigSource::EnvPath(env_file));
    assert_eq!(load.config.window.min_len, 50);
}

#[test]
fn malformed_explicit_file_is_a_parse_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[geometry\nitem_height = ").expect("write");

    let err = loader_in(&dir)
        .with_config_path(&path)
        .load()
        .expect_err("parse failure");
    assert!(matches!(err, ConfigLoadError::Parse { .. }));
}

#[test]
fn rendered_config_loads_back_from_disk() {
    let dir = TempDir::new().expect("tempdir");
    let mut config = ReelConfig::default();
    config.geometry.item_height = 72.0;
    config.physics.durations.long = 6.5;
    let path = dir.path().join("reel.toml");
    fs::write(&path, config.to_toml_string().expect("render")).expect("write");

    let loaded = ReelConfig::load_from_file(&path).expect("load");
    assert_eq!(loaded, config);
    assert!(loaded.validate().is_ok());
}
