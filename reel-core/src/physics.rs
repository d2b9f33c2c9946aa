//! Physics engine: turns the user-facing spin settings into a velocity law and
//! computes where the reel has to stop.

use reel_model::{Deceleration, SpinDuration};
use serde::{Deserialize, Serialize};

use crate::position::{self, ReelGeometry, VelocityFloors};

/// Seconds per duration setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationTable {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl Default for DurationTable {
    fn default() -> Self {
        Self {
            short: 2.0,
            medium: 3.0,
            long: 5.0,
        }
    }
}

impl DurationTable {
    pub fn seconds(&self, duration: SpinDuration) -> f64 {
        match duration {
            SpinDuration::Short => self.short,
            SpinDuration::Medium => self.medium,
            SpinDuration::Long => self.long,
        }
    }
}

/// Deceleration factor per setting, each in (0, 1). Smaller = faster stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecelerationTable {
    pub slow: f64,
    pub medium: f64,
    pub fast: f64,
}

impl Default for DecelerationTable {
    fn default() -> Self {
        Self {
            slow: 0.95,
            medium: 0.90,
            fast: 0.85,
        }
    }
}

impl DecelerationTable {
    pub fn factor(&self, deceleration: Deceleration) -> f64 {
        match deceleration {
            Deceleration::Slow => self.slow,
            Deceleration::Medium => self.medium,
            Deceleration::Fast => self.fast,
        }
    }
}

/// Tunable constants of the velocity law and completion test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Full rotations per second at top speed.
    pub max_rotation_speed: f64,
    /// Simulation rate; one tick advances the reel by `1 / frame_rate` seconds.
    pub frame_rate: f64,
    /// Distance (px) below which a spin is complete.
    pub complete_threshold: f64,
    /// Distance (px) below which a spin is complete once it has also slowed
    /// under `negligible_velocity`.
    pub settle_distance: f64,
    /// Raw proportional velocity (px/s) treated as standing still.
    pub negligible_velocity: f64,
    pub durations: DurationTable,
    pub decelerations: DecelerationTable,
    pub floors: VelocityFloors,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            max_rotation_speed: 5.0,
            frame_rate: 60.0,
            complete_threshold: 0.5,
            settle_distance: 1.0,
            negligible_velocity: 1.0,
            durations: DurationTable::default(),
            decelerations: DecelerationTable::default(),
            floors: VelocityFloors::default(),
        }
    }
}

impl PhysicsTuning {
    #[inline]
    pub fn frame_interval_seconds(&self) -> f64 {
        1.0 / self.frame_rate.max(1.0)
    }
}

/// Constants derived once per spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsState {
    pub duration_seconds: f64,
    pub total_rotations: f64,
    pub deceleration_factor: f64,
    /// Top speed in rotations per second. Multiply by the circumference for
    /// px/s.
    pub max_velocity: f64,
}

/// Inputs to [`PhysicsEngine::target_offset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRequest {
    pub winner_index: usize,
    pub len: usize,
    pub current_position: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsEngine {
    state: PhysicsState,
    floors: VelocityFloors,
    complete_threshold: f64,
    settle_distance: f64,
    negligible_velocity: f64,
    frame_interval: f64,
}

impl PhysicsEngine {
    pub fn new(
        duration: SpinDuration,
        deceleration: Deceleration,
        tuning: &PhysicsTuning,
    ) -> Self {
        let duration_seconds = tuning.durations.seconds(duration);
        let state = PhysicsState {
            duration_seconds,
            total_rotations: duration_seconds * tuning.max_rotation_speed,
            deceleration_factor: tuning.decelerations.factor(deceleration),
            max_velocity: tuning.max_rotation_speed,
        };
        Self {
            state,
            floors: tuning.floors,
            complete_threshold: tuning.complete_threshold,
            settle_distance: tuning.settle_distance,
            negligible_velocity: tuning.negligible_velocity,
            frame_interval: tuning.frame_interval_seconds(),
        }
    }

    pub fn state(&self) -> &PhysicsState {
        &self.state
    }

    /// Seconds of motion simulated per tick.
    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }

    /// Velocity (px/s) for the remaining distance, capped at top speed for a
    /// reel of the given circumference.
    pub fn velocity_for_distance(
        &self,
        distance: f64,
        circumference: f64,
    ) -> f64 {
        let velocity = position::velocity_for_distance(
            distance,
            self.state.deceleration_factor,
            &self.floors,
        );
        let cap = self.state.max_velocity * circumference;
        if cap > 0.0 {
            velocity.clamp(-cap, cap)
        } else {
            velocity
        }
    }

    pub fn is_complete(&self, distance: f64) -> bool {
        position::is_settled(distance, self.complete_threshold)
    }

    /// Second completion test: close enough and the proportional law has
    /// decayed to nothing.
    pub fn is_settled_slow(&self, distance: f64) -> bool {
        let raw = (distance * self.state.deceleration_factor).abs();
        position::is_settled(distance, self.settle_distance)
            && raw < self.negligible_velocity
    }

    /// Stop offset that lands the winner on the centre slot after the full
    /// number of rotations, always strictly ahead of the current position.
    pub fn target_offset(
        &self,
        request: TargetRequest,
        geometry: &ReelGeometry,
    ) -> f64 {
        let h = geometry.item_height;
        let circumference = geometry.circumference(request.len);
        let p0 = request.current_position;
        if !circumference.is_finite()
            || circumference <= 0.0
            || !p0.is_finite()
        {
            return p0;
        }

        let winner_offset =
            (request.winner_index as f64 - geometry.center_index as f64) * h;
        let spin_distance = self.state.total_rotations * circumference;
        let raw_target = p0 + spin_distance;

        let mut target = raw_target
            + position::wrap_offset(winner_offset - raw_target, circumference);
        if target <= p0 {
            target += circumference;
        }
        target
    }
}
