//! Reel animation engine.
//!
//! Spins a cyclic reel of candidate entries and settles it on a winner that
//! was chosen elsewhere. The crate is split along the data flow:
//!
//! - [`working_set`] derives a bounded list of entries from the pool,
//! - [`physics`] turns spin settings into a velocity law and a stop offset,
//! - [`position`] maps offsets to viewport slots,
//! - [`driver`] advances one spin frame by frame,
//! - [`reel`] wires everything together for a host and a render surface.
//!
//! Everything runs on the host's frame callback; there are no threads.
#![allow(missing_docs)]

pub mod driver;
pub mod error;
pub mod headless;
pub mod physics;
pub mod position;
pub mod reel;
pub mod working_set;

pub use driver::{
    AnimationDriver, AnimationState, DriverPhase, FrameHandle, FrameScheduler,
    NEUTRAL_POSITION, PositionUpdate, SpinEnd, SpinPlan, TickOutcome,
};
pub use error::{ReelError, Result};
pub use headless::{
    HeadlessScheduler, RecordingObserver, RunSummary, run_until_idle,
};
pub use physics::{
    DecelerationTable, DurationTable, PhysicsEngine, PhysicsState,
    PhysicsTuning, TargetRequest,
};
pub use position::{ReelGeometry, VelocityFloors, ViewportIndices};
pub use reel::{
    Reel, ReelFrame, ReelObserver, ReelSettings, SpinStatus, StyleDescriptor,
};
pub use working_set::{
    WindowLimits, WorkingSet, WorkingSetRegime, build_working_set,
    build_working_set_with, rotate_to_winner_front,
};

pub use reel_model;
