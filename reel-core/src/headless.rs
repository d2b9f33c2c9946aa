//! Deterministic host for running spins without a display.
//!
//! The scheduler keeps the one pending frame the driver asked for and the host
//! loop pumps it back in. Used by `reelctl` and by the tests.

use reel_model::Entry;
use tracing::warn;

use crate::driver::{FrameHandle, FrameScheduler, TickOutcome};
use crate::error::ReelError;
use crate::reel::{Reel, ReelFrame, ReelObserver};

#[derive(Debug, Default)]
pub struct HeadlessScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: Vec<FrameHandle>,
}

impl HeadlessScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand the pending frame to the host loop.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for HeadlessScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}

/// Observer that keeps everything it is told.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub positions: Vec<f64>,
    /// Ticket in the centre slot of each rendered window.
    pub center_tickets: Vec<Option<String>>,
    pub last_window: Vec<Entry>,
    pub completions: Vec<Entry>,
    pub errors: Vec<ReelError>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn final_center(&self) -> Option<&str> {
        self.center_tickets.last().and_then(|t| t.as_deref())
    }
}

impl ReelObserver for RecordingObserver {
    fn render(&mut self, frame: &ReelFrame<'_>) {
        self.positions.push(frame.position);
        self.center_tickets
            .push(frame.center().map(|e| e.ticket_id.clone()));
        self.last_window = frame.window.iter().map(|e| (*e).clone()).collect();
    }

    fn spin_completed(&mut self, winner: &Entry) {
        self.completions.push(winner.clone());
    }

    fn spin_failed(&mut self, error: &ReelError) {
        self.errors.push(error.clone());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub final_position: f64,
    /// Set when the run ended with a completion.
    pub winner: Option<Entry>,
}

/// Pump frames until the reel goes idle.
///
/// `max_frames` is a diagnostic ceiling: a spin still running after that many
/// frames is cancelled and reported as [`ReelError::FrameBudgetExceeded`].
pub fn run_until_idle<O: ReelObserver>(
    reel: &mut Reel<HeadlessScheduler, O>,
    max_frames: u64,
) -> Result<RunSummary, ReelError> {
    let mut frames = 0;
    let mut winner = None;

    while let Some(handle) = reel.scheduler_mut().take_pending() {
        if frames >= max_frames {
            warn!(frames, "spin exceeded frame budget; cancelling");
            reel.cancel();
            return Err(ReelError::FrameBudgetExceeded { frames });
        }
        frames += 1;
        if let TickOutcome::Completed { winner: w, .. } = reel.tick(handle) {
            winner = Some(w);
        }
    }

    Ok(RunSummary {
        frames,
        final_position: reel.position(),
        winner,
    })
}
