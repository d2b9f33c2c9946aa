use super::super::validation::ConfigGuardRailError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to load reel configuration: {0}")]
    Source(#[source] anyhow::Error),
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
}
