//! Error type for configuration and drag-session misuse.
//!
//! Geometry never fails: out-of-range numbers are absorbed by clamping.
//! Errors only report configuration that cannot be sanitized meaningfully,
//! or session calls made in the wrong state. A session call that returns
//! an error has not changed anything.

use thiserror::Error;

/// Errors reported by [`BoundingBoxConfig::new`](crate::BoundingBoxConfig::new)
/// and the [`DragSession`](crate::DragSession) state machine.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum RegionError {
    /// Minimum size is negative or not finite.
    #[error("minimum size must be finite and non-negative, got {0}")]
    InvalidMinSize(f64),
    /// Aspect ratio is zero, negative, or not finite.
    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f64),
    /// `start_drag` was called while a drag is already live.
    #[error("a drag is already in progress")]
    AlreadyDragging,
    /// A pointer move/up or cancel arrived with no live drag.
    #[error("no drag is in progress")]
    NotDragging,
    /// `reset` was called while a drag is live.
    #[error("cannot reset while a drag is in progress")]
    DragInProgress,
}
