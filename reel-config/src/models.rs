use anyhow::{Context, anyhow};
use reel_core::{
    PhysicsTuning, ReelGeometry, ReelSettings, StyleDescriptor, WindowLimits,
};
use reel_model::{Deceleration, SpinDuration};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const CONFIG_PATH_VAR: &str = "REEL_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "REEL_CONFIG_JSON";

pub(crate) const DEFAULT_CANDIDATES: &[&str] =
    &["reel.toml", "reel.json", "config/reel.toml"];

/// Source that produced the reel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReelConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Settings used when a spin request does not carry its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SpinDefaults {
    pub duration: SpinDuration,
    pub deceleration: Deceleration,
    /// Rotate the working set so the winner sits at index 0 before planning.
    pub align_winner_front: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Frame ceiling for headless runs. A spin that has not settled after this
    /// many ticks is reported as a stall.
    pub max_frames: u64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { max_frames: 20_000 }
    }
}

/// Top-level reel settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Slot height and viewport shape. `center_index` is the slot the winner
    /// lands in and must be inside the viewport.
    pub geometry: ReelGeometry,
    /// Working-set bounds. Pools under `min_len` are repeated, pools over
    /// `max_len` are windowed around the winner.
    pub window: WindowLimits,
    /// Velocity law, completion thresholds, duration and deceleration tables.
    pub physics: PhysicsTuning,
    pub spin: SpinDefaults,
    /// Passed through to the render surface untouched.
    pub style: StyleDescriptor,
    pub diagnostics: DiagnosticsConfig,
}

impl ReelConfig {
    /// Load reel configuration using environment variables.
    /// Evaluation order:
    /// 1) `$REEL_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$REEL_CONFIG_JSON` (inline JSON),
    /// 3) the first of `reel.toml`, `reel.json`, `config/reel.toml`,
    /// 4) defaults if none of the above is present.
    pub fn load_from_env() -> anyhow::Result<(Self, ReelConfigSource)> {
        Self::load_with(|key| std::env::var(key).ok(), Path::new("."))
    }

    pub(crate) fn load_with(
        var: impl Fn(&str) -> Option<String>,
        root: &Path,
    ) -> anyhow::Result<(Self, ReelConfigSource)> {
        if let Some(path_str) = var(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str.trim());
            let config = Self::load_from_file(&path)?;
            return Ok((config, ReelConfigSource::EnvPath(path)));
        }

        if let Some(raw) = var(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .context("failed to parse REEL_CONFIG_JSON")?;
            return Ok((parsed, ReelConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(root) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ReelConfigSource::File(path)));
        }

        Ok((Self::default(), ReelConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read reel config from {}", path.display())
        })?;
        Self::parse_for_path(&contents, path)
    }

    /// Parse `contents` with the format implied by the extension of `path`.
    pub fn parse_for_path(
        contents: &str,
        path: &Path,
    ) -> anyhow::Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(contents).with_context(|| {
                format!("invalid reel config {}", path.display())
            }),
            Some("toml") | Some("tml") => {
                toml::from_str(contents).map_err(|err| {
                    anyhow!("invalid reel config {}: {}", path.display(), err)
                })
            }
            _ => Self::parse_from_str(contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        // TOML first, JSON as a fallback.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse reel config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid reel config json: {err}"))
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        toml::to_string(self).context("failed to render reel config as TOML")
    }

    pub fn find_default_file(root: &Path) -> Option<PathBuf> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.is_file())
    }

    /// Engine settings for the facade. Style dimensions follow the geometry so
    /// the render surface never disagrees with the position calculator.
    pub fn into_settings(self) -> ReelSettings {
        let mut style = self.style;
        style.item_height = self.geometry.item_height;
        style.visible_items = self.geometry.visible_items;
        style.center_index = self.geometry.center_index;

        ReelSettings {
            geometry: self.geometry,
            window: self.window,
            physics: self.physics,
            style,
            align_winner_front: self.spin.align_winner_front,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_engine_defaults() {
        let config = ReelConfig::default();
        assert_eq!(config.geometry, ReelGeometry::default());
        assert_eq!(config.window, WindowLimits::default());
        assert_eq!(config.diagnostics.max_frames, 20_000);
        assert_eq!(config.into_settings(), ReelSettings::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = ReelConfig::parse_from_str(
            r#"
            [geometry]
            item_height = 64.0

            [spin]
            duration = "long"
            deceleration = "fast"
            "#,
            "inline",
        )
        .expect("valid toml");

        assert_eq!(config.geometry.item_height, 64.0);
        assert_eq!(config.geometry.visible_items, 5);
        assert_eq!(config.spin.duration, SpinDuration::Long);
        assert_eq!(config.spin.deceleration, Deceleration::Fast);
        assert_eq!(config.physics, PhysicsTuning::default());
    }

    #[test]
    fn json_is_accepted_as_fallback() {
        let config = ReelConfig::parse_from_str(
            r#"{"window": {"min_len": 20, "max_len": 400}}"#,
            "inline",
        )
        .expect("valid json");
        assert_eq!(config.window.min_len, 20);
        assert_eq!(config.window.max_len, 400);
    }

    #[test]
    fn garbage_reports_both_parsers() {
        let err = ReelConfig::parse_from_str("[[[", "inline")
            .expect_err("neither toml nor json");
        let message = err.to_string();
        assert!(message.contains("toml error"));
        assert!(message.contains("json error"));
    }

    #[test]
    fn unknown_spin_setting_is_rejected() {
        let err =
            ReelConfig::parse_json(r#"{"spin": {"duration": "forever"}}"#);
        assert!(err.is_err());
    }

    #[test]
    fn inline_env_json_wins_over_default_files() {
        let root = Path::new("/nonexistent-reel-root");
        let (config, source) = ReelConfig::load_with(
            vars(&[(CONFIG_JSON_VAR, r#"{"diagnostics": {"max_frames": 5}}"#)]),
            root,
        )
        .expect("inline json");
        assert_eq!(source, ReelConfigSource::EnvInline);
        assert_eq!(config.diagnostics.max_frames, 5);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let root = Path::new("/nonexistent-reel-root");
        let (config, source) = ReelConfig::load_with(
            vars(&[(CONFIG_PATH_VAR, "  "), (CONFIG_JSON_VAR, "")]),
            root,
        )
        .expect("defaults");
        assert_eq!(source, ReelConfigSource::Default);
        assert_eq!(config, ReelConfig::default());
    }

    #[test]
    fn missing_env_path_is_an_error() {
        let root = Path::new("/nonexistent-reel-root");
        let err = ReelConfig::load_with(
            vars(&[(CONFIG_PATH_VAR, "/nonexistent-reel-root/reel.toml")]),
            root,
        );
        assert!(err.is_err());
    }

    #[test]
    fn toml_rendering_parses_back() {
        let mut config = ReelConfig::default();
        config.style.theme = "neon".into();
        config.spin.align_winner_front = true;

        let rendered = config.to_toml_string().expect("render");
        assert!(rendered.contains("[physics.durations]"));
        let parsed =
            ReelConfig::parse_from_str(&rendered, "rendered").expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn settings_take_style_dimensions_from_geometry() {
        let mut config = ReelConfig::default();
        config.geometry.item_height = 48.0;
        config.geometry.visible_items = 7;
        config.geometry.center_index = 3;
        config.style.item_height = 999.0;
        config.style.theme = "dark".into();

        let settings = config.into_settings();
        assert_eq!(settings.style.item_height, 48.0);
        assert_eq!(settings.style.visible_items, 7);
        assert_eq!(settings.style.center_index, 3);
        assert_eq!(settings.style.theme, "dark");
    }
}
