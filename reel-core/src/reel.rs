//! Orchestration facade: pool + winner ticket in, frames and one completion
//! event out.

use reel_model::{Deceleration, Entry, SpinDuration};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::driver::{
    AnimationDriver, FrameHandle, FrameScheduler, PositionUpdate, SpinPlan,
    TickOutcome,
};
use crate::error::ReelError;
use crate::physics::{PhysicsEngine, PhysicsTuning, TargetRequest};
use crate::position::{self, ReelGeometry, ViewportIndices};
use crate::working_set::{
    WindowLimits, WorkingSet, build_working_set_with, rotate_to_winner_front,
};

/// Opaque styling handed through to the render surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDescriptor {
    pub theme: String,
    pub item_height: f64,
    pub visible_items: usize,
    pub center_index: usize,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self::from_geometry(&ReelGeometry::default(), "default")
    }
}

impl StyleDescriptor {
    pub fn from_geometry(
        geometry: &ReelGeometry,
        theme: impl Into<String>,
    ) -> Self {
        Self {
            theme: theme.into(),
            item_height: geometry.item_height,
            visible_items: geometry.visible_items,
            center_index: geometry.center_index,
        }
    }
}

/// What the render surface receives once per published position.
#[derive(Debug, Clone)]
pub struct ReelFrame<'a> {
    /// Entries under the viewport, top to bottom.
    pub window: Vec<&'a Entry>,
    pub position: f64,
    pub viewport: ViewportIndices,
    pub update: PositionUpdate,
    pub style: &'a StyleDescriptor,
}

impl ReelFrame<'_> {
    /// Entry in the centre slot of the window.
    pub fn center(&self) -> Option<&Entry> {
        self.window.get(self.style.center_index).copied()
    }
}

/// Outbound side of the reel: render surface plus completion/error events.
pub trait ReelObserver {
    fn render(&mut self, frame: &ReelFrame<'_>);

    /// Called exactly once per spin that runs to completion.
    fn spin_completed(&mut self, winner: &Entry);

    /// Called synchronously from `spin` when the request is invalid.
    fn spin_failed(&mut self, error: &ReelError);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReelSettings {
    pub geometry: ReelGeometry,
    pub window: WindowLimits,
    pub physics: PhysicsTuning,
    pub style: StyleDescriptor,
    /// Rotate each working set so the winner is at index 0 before planning.
    pub align_winner_front: bool,
}

impl Default for ReelSettings {
    fn default() -> Self {
        let geometry = ReelGeometry::default();
        Self {
            geometry,
            window: WindowLimits::default(),
            physics: PhysicsTuning::default(),
            style: StyleDescriptor::from_geometry(&geometry, "default"),
            align_winner_front: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinStatus {
    Started,
    /// A spin was already active; the request was dropped.
    AlreadySpinning,
    /// Validation failed and `spin_failed` was called.
    Rejected,
}

#[derive(Debug)]
pub struct Reel<S, O> {
    settings: ReelSettings,
    driver: AnimationDriver<S>,
    observer: O,
    working_set: Option<WorkingSet>,
    last_pool_len: Option<usize>,
}

impl<S: FrameScheduler, O: ReelObserver> Reel<S, O> {
    pub fn new(settings: ReelSettings, scheduler: S, observer: O) -> Self {
        Self {
            settings,
            driver: AnimationDriver::new(scheduler),
            observer,
            working_set: None,
            last_pool_len: None,
        }
    }

    pub fn spin(
        &mut self,
        pool: &[Entry],
        winner_ticket: &str,
        duration: SpinDuration,
        deceleration: Deceleration,
    ) -> SpinStatus {
        if self.driver.is_spinning() {
            debug!(winner_ticket, "spin requested while spinning; ignored");
            return SpinStatus::AlreadySpinning;
        }

        let working_set = match build_working_set_with(
            pool,
            winner_ticket,
            &self.settings.window,
        ) {
            Ok(set) if self.settings.align_winner_front => {
                rotate_to_winner_front(&set)
            }
            Ok(set) => set,
            Err(err) => {
                warn!(error = %err, pool_len = pool.len(), "spin rejected");
                self.observer.spin_failed(&err);
                return SpinStatus::Rejected;
            }
        };

        if self.last_pool_len != Some(pool.len()) {
            debug!(
                previous = ?self.last_pool_len,
                current = pool.len(),
                "candidate pool changed; resetting reel position"
            );
            self.driver.reset_position();
        }

        let physics = PhysicsEngine::new(
            duration,
            deceleration,
            &self.settings.physics,
        );
        let geometry = self.settings.geometry;
        let target = physics.target_offset(
            TargetRequest {
                winner_index: working_set.winner_index(),
                len: working_set.len(),
                current_position: self.driver.position(),
            },
            &geometry,
        );
        let plan = SpinPlan {
            winner: working_set.winner().clone(),
            target,
            physics,
            circumference: geometry.circumference(working_set.len()),
        };

        match self.driver.start(plan) {
            Ok(()) => {
                self.last_pool_len = Some(pool.len());
                self.working_set = Some(working_set);
                SpinStatus::Started
            }
            Err(ReelError::AlreadySpinning) => SpinStatus::AlreadySpinning,
            Err(err) => {
                warn!(error = %err, pool_len = pool.len(), "spin rejected");
                self.observer.spin_failed(&err);
                SpinStatus::Rejected
            }
        }
    }

    /// Advance one granted frame and republish the result.
    pub fn tick(&mut self, handle: FrameHandle) -> TickOutcome {
        let outcome = self.driver.tick(handle);
        match &outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Advanced(update) => self.publish(*update),
            TickOutcome::Completed { update, winner } => {
                self.publish(*update);
                self.observer.spin_completed(winner);
            }
        }
        outcome
    }

    pub fn cancel(&mut self) -> bool {
        self.driver.cancel()
    }

    fn publish(&mut self, update: PositionUpdate) {
        let Some(set) = self.working_set.as_ref() else {
            return;
        };
        let geometry = &self.settings.geometry;
        let frame = ReelFrame {
            window: position::visible_window(
                set.entries(),
                update.position,
                geometry,
            ),
            position: update.position,
            viewport: position::to_viewport_indices(
                update.position,
                set.len(),
                geometry.item_height,
            ),
            update,
            style: &self.settings.style,
        };
        self.observer.render(&frame);
    }

    pub fn is_spinning(&self) -> bool {
        self.driver.is_spinning()
    }

    pub fn position(&self) -> f64 {
        self.driver.position()
    }

    pub fn driver(&self) -> &AnimationDriver<S> {
        &self.driver
    }

    /// Working set of the current or most recent spin.
    pub fn working_set(&self) -> Option<&WorkingSet> {
        self.working_set.as_ref()
    }

    /// Entry currently in the centre slot.
    pub fn center_entry(&self) -> Option<&Entry> {
        let set = self.working_set.as_ref()?;
        position::center_entry(
            set.entries(),
            self.driver.position(),
            &self.settings.geometry,
        )
    }

    pub fn settings(&self) -> &ReelSettings {
        &self.settings
    }

    pub fn style(&self) -> &StyleDescriptor {
        &self.settings.style
    }

    pub fn scheduler(&self) -> &S {
        self.driver.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.driver.scheduler_mut()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_follows_geometry_and_survives_json() {
        let geometry = ReelGeometry {
            item_height: 64.0,
            ..ReelGeometry::default()
        };
        let style = StyleDescriptor::from_geometry(&geometry, "neon");
        assert_eq!(style.item_height, 64.0);
        assert_eq!(style.center_index, geometry.center_index);

        let json = serde_json::to_string(&style).unwrap();
        let back: StyleDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, style);
    }

    #[test]
    fn style_json_defaults_missing_fields() {
        let style: StyleDescriptor =
            serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(style.theme, "dark");
        assert_eq!(style.visible_items, ReelGeometry::default().visible_items);
    }
}
