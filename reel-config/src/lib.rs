//! Configuration library for the reel engine.
//!
//! Loads the engine's tunables (geometry, working-set limits, physics tables,
//! default spin settings) from TOML or JSON, validates them, and converts them
//! into the [`reel_core::ReelSettings`] the facade runs with.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{
    CONFIG_JSON_VAR, CONFIG_PATH_VAR, DiagnosticsConfig, ReelConfig,
    ReelConfigSource, SpinDefaults,
};
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};
