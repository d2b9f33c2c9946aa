//! Animation driver: owns the per-spin mutable state and advances it one
//! frame at a time.
//!
//! State machine: `Idle -> Spinning -> (Completed | Cancelled) -> Idle`.
//! The host grants frames through a [`FrameScheduler`] and calls
//! [`AnimationDriver::tick`] with the handle it was given. Ticks for handles
//! the driver no longer waits on are ignored, so a frame that was already
//! queued when a spin got cancelled cannot move the reel.

use reel_model::Entry;
use tracing::{debug, info, trace};

use crate::error::{ReelError, Result};
use crate::physics::PhysicsEngine;

/// Resting offset used when a new candidate pool is loaded.
pub const NEUTRAL_POSITION: f64 = 0.0;

/// Token for one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-side frame source (display refresh, timer, test loop).
pub trait FrameScheduler {
    /// Ask for one more frame. The host later calls `tick` with the handle.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a previously requested frame.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Idle,
    Spinning,
}

/// How the most recent spin ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinEnd {
    Completed,
    Cancelled,
}

/// Everything the driver needs to run one spin.
#[derive(Debug, Clone)]
pub struct SpinPlan {
    pub winner: Entry,
    /// Absolute stop offset; must lie ahead of the driver's current position.
    pub target: f64,
    pub physics: PhysicsEngine,
    /// Circumference (px) of the working set being spun.
    pub circumference: f64,
}

/// One published position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdate {
    pub position: f64,
    /// Velocity (px/s) applied on this frame; 0 on the final frame.
    pub velocity: f64,
    /// Remaining distance to the target after this frame.
    pub distance: f64,
    /// 1-based frame counter within the spin.
    pub frame: u64,
    /// Set on the final, snapped frame.
    pub settled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Idle driver or stale handle; nothing happened.
    Ignored,
    Advanced(PositionUpdate),
    Completed { update: PositionUpdate, winner: Entry },
}

/// Mutable state of the active spin. Exists only while spinning.
#[derive(Debug, Clone)]
pub struct AnimationState {
    start_position: f64,
    target: f64,
    winner: Entry,
    physics: PhysicsEngine,
    circumference: f64,
    pending: FrameHandle,
    frames: u64,
}

impl AnimationState {
    pub fn start_position(&self) -> f64 {
        self.start_position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn winner(&self) -> &Entry {
        &self.winner
    }

    pub fn physics(&self) -> &PhysicsEngine {
        &self.physics
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[derive(Debug)]
pub struct AnimationDriver<S> {
    scheduler: S,
    position: f64,
    active: Option<AnimationState>,
    last_end: Option<SpinEnd>,
}

impl<S: FrameScheduler> AnimationDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            position: NEUTRAL_POSITION,
            active: None,
            last_end: None,
        }
    }

    pub fn phase(&self) -> DriverPhase {
        if self.active.is_some() {
            DriverPhase::Spinning
        } else {
            DriverPhase::Idle
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.active.is_some()
    }

    /// Current reel offset. Retained between spins.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn active(&self) -> Option<&AnimationState> {
        self.active.as_ref()
    }

    pub fn last_end(&self) -> Option<SpinEnd> {
        self.last_end
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Move the resting position back to [`NEUTRAL_POSITION`]. Refused while
    /// spinning.
    pub fn reset_position(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.position = NEUTRAL_POSITION;
        true
    }

    pub fn start(&mut self, plan: SpinPlan) -> Result<()> {
        if self.active.is_some() {
            debug!("spin rejected: driver already spinning");
            return Err(ReelError::AlreadySpinning);
        }
        if !plan.target.is_finite() || plan.target <= self.position {
            debug!(
                start = self.position,
                target = plan.target,
                "spin rejected: target is not ahead of the reel"
            );
            return Err(ReelError::UnreachableTarget);
        }

        let pending = self.scheduler.request_frame();
        debug!(
            start = self.position,
            target = plan.target,
            winner = %plan.winner.ticket_id,
            rotations = plan.physics.state().total_rotations,
            "spin started"
        );
        self.active = Some(AnimationState {
            start_position: self.position,
            target: plan.target,
            winner: plan.winner,
            physics: plan.physics,
            circumference: plan.circumference,
            pending,
            frames: 0,
        });
        Ok(())
    }

    pub fn tick(&mut self, handle: FrameHandle) -> TickOutcome {
        let Some(spin) = self.active.as_mut() else {
            trace!(?handle, "tick while idle");
            return TickOutcome::Ignored;
        };
        if spin.pending != handle {
            trace!(?handle, expected = ?spin.pending, "stale frame");
            return TickOutcome::Ignored;
        }

        spin.frames += 1;
        let frame = spin.frames;
        let distance = spin.target - self.position;
        let velocity = spin
            .physics
            .velocity_for_distance(distance, spin.circumference);

        if spin.physics.is_complete(distance)
            || spin.physics.is_settled_slow(distance)
        {
            self.position = spin.target;
            let update = PositionUpdate {
                position: self.position,
                velocity: 0.0,
                distance: 0.0,
                frame,
                settled: true,
            };
            self.last_end = Some(SpinEnd::Completed);
            let finished = self.active.take();
            return match finished {
                Some(state) => {
                    info!(
                        frames = frame,
                        position = self.position,
                        winner = %state.winner.ticket_id,
                        "spin completed"
                    );
                    TickOutcome::Completed {
                        update,
                        winner: state.winner,
                    }
                }
                None => TickOutcome::Ignored,
            };
        }

        // Never step past the target: the sequence stays non-decreasing.
        let step = (velocity * spin.physics.frame_interval())
            .min(distance)
            .max(0.0);
        self.position += step;
        spin.pending = self.scheduler.request_frame();

        let update = PositionUpdate {
            position: self.position,
            velocity,
            distance: spin.target - self.position,
            frame,
            settled: false,
        };
        trace!(frame, position = update.position, velocity, "frame");
        TickOutcome::Advanced(update)
    }

    /// Abort the active spin without completing it. Returns whether a spin was
    /// running.
    pub fn cancel(&mut self) -> bool {
        let Some(spin) = self.active.take() else {
            return false;
        };
        self.scheduler.cancel_frame(spin.pending);
        self.last_end = Some(SpinEnd::Cancelled);
        debug!(
            frames = spin.frames,
            position = self.position,
            "spin cancelled"
        );
        true
    }
}
