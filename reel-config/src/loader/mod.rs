pub mod error;

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use self::error::ConfigLoadError;
use super::{
    models::{ReelConfig, ReelConfigSource},
    validation::{self, ConfigWarnings},
};

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    /// Explicit file (e.g. `--config`). Takes precedence over the environment
    /// and must exist.
    pub config_path: Option<PathBuf>,
    /// Directory searched for the default candidate files. Defaults to the
    /// working directory.
    pub search_root: Option<PathBuf>,
    /// Variables consulted instead of the process environment when set.
    pub env_overrides: Option<HashMap<String, String>>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: ReelConfig,
    pub source: ReelConfigSource,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_search_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.options.search_root = Some(root.into());
        self
    }

    pub fn with_env_overrides(mut self, vars: HashMap<String, String>) -> Self {
        self.options.env_overrides = Some(vars);
        self
    }

    /// Resolve, parse and validate the configuration.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (config, source) = match &self.options.config_path {
            Some(path) => (
                Self::load_explicit(path)?,
                ReelConfigSource::File(path.clone()),
            ),
            None => {
                let root = self
                    .options
                    .search_root
                    .as_deref()
                    .unwrap_or(Path::new("."));
                ReelConfig::load_with(|key| self.var(key), root)
                    .map_err(ConfigLoadError::Source)?
            }
        };
        debug!(?source, "reel configuration resolved");

        let warnings = validation::apply_guard_rails(&config)?;
        for warning in &warnings.items {
            match &warning.hint {
                Some(hint) => warn!(hint = %hint, "{}", warning.message),
                None => warn!("{}", warning.message),
            }
        }

        info!(
            item_height = config.geometry.item_height,
            min_len = config.window.min_len,
            max_len = config.window.max_len,
            "reel configuration loaded"
        );

        Ok(ConfigLoad {
            config,
            source,
            warnings,
        })
    }

    fn load_explicit(path: &Path) -> Result<ReelConfig, ConfigLoadError> {
        if !path.exists() {
            return Err(ConfigLoadError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        ReelConfig::parse_for_path(&contents, path).map_err(|source| {
            ConfigLoadError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    fn var(&self, key: &str) -> Option<String> {
        match &self.options.env_overrides {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        }
    }
}
