use thiserror::Error;

use super::models::ReelConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigGuardRailError {
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be between 0 and 1 exclusive (got {value})")]
    FactorOutOfRange { field: &'static str, value: f64 },
    #[error(
        "geometry.center_index {center_index} is outside the viewport of {visible_items} items"
    )]
    CenterOutsideViewport {
        center_index: usize,
        visible_items: usize,
    },
    #[error("window.min_len {min_len} exceeds window.max_len {max_len}")]
    InvertedWindow { min_len: usize, max_len: usize },
    #[error("window.max_len must be at least 2 (got {max_len})")]
    WindowTooSmall { max_len: usize },
    #[error("velocity floor bands must be descending: {reason}")]
    UnorderedFloorBands { reason: String },
    #[error("diagnostics.max_frames must be greater than zero")]
    NoFrameBudget,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ReelConfig {
    pub fn validate(&self) -> Result<(), ConfigGuardRailError> {
        apply_guard_rails(self).map(|_| ())
    }
}

/// Reject configurations the engine cannot run with and collect warnings for
/// ones it can run with but probably should not.
pub fn apply_guard_rails(
    config: &ReelConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    let geometry = &config.geometry;
    positive("geometry.item_height", geometry.item_height)?;
    if geometry.center_index >= geometry.visible_items {
        return Err(ConfigGuardRailError::CenterOutsideViewport {
            center_index: geometry.center_index,
            visible_items: geometry.visible_items,
        });
    }

    let window = &config.window;
    if window.max_len < 2 {
        return Err(ConfigGuardRailError::WindowTooSmall {
            max_len: window.max_len,
        });
    }
    if window.min_len > window.max_len {
        return Err(ConfigGuardRailError::InvertedWindow {
            min_len: window.min_len,
            max_len: window.max_len,
        });
    }

    let physics = &config.physics;
    positive("physics.max_rotation_speed", physics.max_rotation_speed)?;
    positive("physics.frame_rate", physics.frame_rate)?;
    positive("physics.complete_threshold", physics.complete_threshold)?;
    non_negative("physics.settle_distance", physics.settle_distance)?;
    non_negative("physics.negligible_velocity", physics.negligible_velocity)?;

    positive("physics.durations.short", physics.durations.short)?;
    positive("physics.durations.medium", physics.durations.medium)?;
    positive("physics.durations.long", physics.durations.long)?;

    factor("physics.decelerations.slow", physics.decelerations.slow)?;
    factor("physics.decelerations.medium", physics.decelerations.medium)?;
    factor("physics.decelerations.fast", physics.decelerations.fast)?;

    let floors = &physics.floors;
    non_negative("physics.floors.far_distance", floors.far_distance)?;
    non_negative("physics.floors.far_velocity", floors.far_velocity)?;
    non_negative("physics.floors.medium_distance", floors.medium_distance)?;
    non_negative("physics.floors.medium_velocity", floors.medium_velocity)?;
    non_negative("physics.floors.near_distance", floors.near_distance)?;
    non_negative("physics.floors.near_velocity", floors.near_velocity)?;
    non_negative(
        "physics.floors.very_near_velocity",
        floors.very_near_velocity,
    )?;
    if floors.far_distance < floors.medium_distance {
        return Err(ConfigGuardRailError::UnorderedFloorBands {
            reason: format!(
                "far_distance {} < medium_distance {}",
                floors.far_distance, floors.medium_distance
            ),
        });
    }
    if floors.medium_distance < floors.near_distance {
        return Err(ConfigGuardRailError::UnorderedFloorBands {
            reason: format!(
                "medium_distance {} < near_distance {}",
                floors.medium_distance, floors.near_distance
            ),
        });
    }

    if config.diagnostics.max_frames == 0 {
        return Err(ConfigGuardRailError::NoFrameBudget);
    }

    if floors.very_near_velocity == 0.0 {
        warnings.push_with_hint(
            "physics.floors.very_near_velocity is 0; spins may crawl through their last pixels",
            "Keep a small positive floor so the final approach ends in bounded time",
        );
    }

    if physics.complete_threshold >= geometry.item_height / 2.0 {
        warnings.push(format!(
            "physics.complete_threshold {} is at least half a slot; the final snap will be visible",
            physics.complete_threshold
        ));
    }

    let decelerations = &physics.decelerations;
    if !(decelerations.fast <= decelerations.medium
        && decelerations.medium <= decelerations.slow)
    {
        warnings.push_with_hint(
            "deceleration factors are not ordered fast <= medium <= slow",
            "A smaller factor brakes harder; 'fast' should carry the smallest value",
        );
    }

    if physics.frame_rate > 240.0 {
        warnings.push(format!(
            "physics.frame_rate {} is above typical display refresh rates",
            physics.frame_rate
        ));
    }

    if window.min_len < geometry.visible_items + 1 {
        warnings.push_with_hint(
            format!(
                "window.min_len {} is smaller than the viewport; entries will repeat on screen",
                window.min_len
            ),
            "Use a min_len of at least visible_items + 1",
        );
    }

    Ok(warnings)
}

fn positive(
    field: &'static str,
    value: f64,
) -> Result<(), ConfigGuardRailError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigGuardRailError::NotPositive { field, value })
    }
}

fn non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), ConfigGuardRailError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigGuardRailError::Negative { field, value })
    }
}

fn factor(
    field: &'static str,
    value: f64,
) -> Result<(), ConfigGuardRailError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigGuardRailError::FactorOutOfRange { field, value })
    }
}
