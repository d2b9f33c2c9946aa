use thiserror::Error;

/// Errors surfaced by the reel engine.
///
/// Input validation errors are reported before any state is touched or any
/// frame is scheduled. Once a spin has started nothing can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReelError {
    #[error("candidate pool is empty")]
    EmptyPool,

    #[error("winner ticket '{ticket}' does not match any entry in the pool")]
    WinnerNotFound { ticket: String },

    /// The planned stop is not a finite offset ahead of the current position,
    /// which happens when the geometry is degenerate (e.g. a NaN item height).
    #[error("spin target is not reachable from the current position")]
    UnreachableTarget,

    /// Soft rejection: a spin was requested while another one is running.
    #[error("a spin is already in progress")]
    AlreadySpinning,

    /// Raised only by the headless host when a spin overruns its frame ceiling.
    #[error("spin did not settle within {frames} frames")]
    FrameBudgetExceeded { frames: u64 },
}

pub type Result<T> = std::result::Result<T, ReelError>;
