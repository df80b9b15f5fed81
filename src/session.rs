//! Drag session: turns pointer events into a sequence of valid rectangles.
//!
//! ```text
//!             start_drag
//!     Idle ──────────────► Dragging { kind, start_box, start_pointer }
//!      ▲                      │  on_pointer_move (recompute from start_box)
//!      └──────────────────────┘
//!        on_pointer_up (commit) / cancel (restore start_box)
//! ```
//!
//! Every move recomputes from the drag-start snapshot plus the total pointer
//! delta, so jitter and backtracking never accumulate error.
//!
//! Calls made in the wrong state return a [`RegionError`] and change nothing.

#[cfg(feature = "alloc")]
use alloc::boxed::Box;

use crate::error::RegionError;
use crate::geometry::{BoundingBoxConfig, DragKind, ImageBounds, Point, Rectangle};
use crate::mapping::{CoordinateMapper, DisplayRectangle};
use crate::observe::SessionEvent;
#[cfg(feature = "alloc")]
use crate::observe::{Observers, SubscriptionId};
use crate::solver;

/// Per-tool policy plugged into a [`DragSession`].
///
/// Implemented by [`CropTool`](crate::CropTool) and
/// [`ShapeTool`](crate::ShapeTool).
pub trait RegionTool {
    /// What the tool hands to the transform executor at apply time.
    type Output;

    /// Constraints for an image of the given size.
    fn config(&self, bounds: ImageBounds) -> BoundingBoxConfig;

    /// Rectangle at tool entry.
    fn initial_box(&self, bounds: ImageBounds) -> Rectangle;

    /// Rectangle to return to when the user starts over.
    fn reset_box(&self, bounds: ImageBounds) -> Rectangle {
        self.initial_box(bounds)
    }

    /// Called whenever a rectangle becomes the committed state.
    fn committed(&mut self, _rect: &Rectangle, _bounds: ImageBounds) {}

    /// Apply-time value for `rect`.
    fn output(&self, rect: &Rectangle, bounds: ImageBounds) -> Self::Output;
}

/// Where the session is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        kind: DragKind,
        /// Rectangle when the pointer went down.
        start_box: Rectangle,
        /// Pointer position (display pixels) when the pointer went down.
        start_pointer: Point,
    },
}

/// One tool instance's region plus its drag state machine.
#[derive(Debug)]
pub struct DragSession<T: RegionTool> {
    tool: T,
    bounds: ImageBounds,
    config: BoundingBoxConfig,
    current: Rectangle,
    state: DragState,
    #[cfg(feature = "alloc")]
    observers: Observers,
}

impl<T: RegionTool> DragSession<T> {
    /// Enter the tool for an image of `bounds`.
    ///
    /// The constrained entry rectangle is reported to the tool as committed.
    pub fn new(mut tool: T, bounds: ImageBounds) -> Self {
        let config = tool.config(bounds);
        let current = solver::constrain_box(tool.initial_box(bounds), config, bounds);
        tool.committed(&current, bounds);
        tracing::debug!(?bounds, ?config, ?current, "region session created");
        Self {
            tool,
            bounds,
            config,
            current,
            state: DragState::Idle,
            #[cfg(feature = "alloc")]
            observers: Observers::default(),
        }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn bounds(&self) -> ImageBounds {
        self.bounds
    }

    pub fn config(&self) -> BoundingBoxConfig {
        self.config
    }

    /// The current rectangle, including an in-progress drag.
    pub fn rectangle(&self) -> Rectangle {
        self.current
    }

    /// The current rectangle in display pixels.
    pub fn display_rectangle(&self, mapper: &CoordinateMapper) -> DisplayRectangle {
        mapper.to_display(&self.current)
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Active drag, or `None` when idle.
    pub fn drag_kind(&self) -> Option<DragKind> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { kind, .. } => Some(kind),
        }
    }

    /// The last committed rectangle: the drag-start snapshot while dragging.
    pub fn committed_rectangle(&self) -> Rectangle {
        match self.state {
            DragState::Idle => self.current,
            DragState::Dragging { start_box, .. } => start_box,
        }
    }

    /// Begin a drag at `pointer` (display pixels).
    pub fn start_drag(&mut self, pointer: Point, kind: DragKind) -> Result<(), RegionError> {
        if self.is_dragging() {
            tracing::warn!(?kind, "start_drag ignored: already dragging");
            return Err(RegionError::AlreadyDragging);
        }
        self.state = DragState::Dragging {
            kind,
            start_box: self.current,
            start_pointer: pointer,
        };
        tracing::debug!(?kind, ?pointer, start_box = ?self.current, "drag started");
        self.publish(|| SessionEvent::DragStarted(kind));
        Ok(())
    }

    /// Recompute the rectangle for the pointer now at `pointer`.
    ///
    /// `mapper` must describe the current frame's layout.
    pub fn on_pointer_move(
        &mut self,
        pointer: Point,
        mapper: &CoordinateMapper,
    ) -> Result<Rectangle, RegionError> {
        let DragState::Dragging {
            kind,
            start_box,
            start_pointer,
        } = self.state
        else {
            tracing::warn!("pointer move ignored: not dragging");
            return Err(RegionError::NotDragging);
        };

        let (ddx, ddy) = pointer.delta_from(start_pointer);
        let (dx, dy) = mapper.pointer_delta_to_image_delta(ddx, ddy);
        let next = match kind {
            DragKind::Move => solver::move_box(start_box, dx, dy, self.config, self.bounds),
            DragKind::Resize(handle) => {
                solver::resize_box(handle, start_box, dx, dy, self.config, self.bounds)
            }
        };
        tracing::trace!(?kind, dx, dy, rect = ?next, "drag moved");

        if next != self.current {
            self.current = next;
            self.publish(|| SessionEvent::BoxChanged(next));
        }
        Ok(next)
    }

    /// End the drag, keeping the last computed rectangle.
    pub fn on_pointer_up(&mut self) -> Result<Rectangle, RegionError> {
        if !self.is_dragging() {
            tracing::warn!("pointer up ignored: not dragging");
            return Err(RegionError::NotDragging);
        }
        self.state = DragState::Idle;
        self.tool.committed(&self.current, self.bounds);
        tracing::debug!(rect = ?self.current, "drag committed");
        let rect = self.current;
        self.publish(|| SessionEvent::DragEnded {
            committed: true,
            rect,
        });
        Ok(rect)
    }

    /// End the drag, restoring the rectangle from when it started.
    pub fn cancel(&mut self) -> Result<Rectangle, RegionError> {
        let DragState::Dragging { start_box, .. } = self.state else {
            tracing::warn!("cancel ignored: not dragging");
            return Err(RegionError::NotDragging);
        };
        self.state = DragState::Idle;
        self.current = start_box;
        tracing::debug!(rect = ?start_box, "drag cancelled");
        self.publish(|| SessionEvent::DragEnded {
            committed: false,
            rect: start_box,
        });
        Ok(start_box)
    }

    /// Start the selection over from the tool's reset rectangle, computed
    /// for the current image size.
    pub fn reset(&mut self) -> Result<Rectangle, RegionError> {
        if self.is_dragging() {
            tracing::warn!("reset ignored: drag in progress");
            return Err(RegionError::DragInProgress);
        }
        self.config = self.tool.config(self.bounds);
        self.current =
            solver::constrain_box(self.tool.reset_box(self.bounds), self.config, self.bounds);
        self.tool.committed(&self.current, self.bounds);
        tracing::debug!(rect = ?self.current, "region reset");
        let rect = self.current;
        self.publish(|| SessionEvent::Reset(rect));
        Ok(rect)
    }

    /// The image changed. Any live drag is discarded and the tool's entry
    /// rectangle is rebuilt for `bounds`.
    pub fn set_image_bounds(&mut self, bounds: ImageBounds) {
        if self.is_dragging() {
            tracing::debug!("image changed mid-drag, discarding drag");
            let rect = self.committed_rectangle();
            self.state = DragState::Idle;
            self.publish(|| SessionEvent::DragEnded {
                committed: false,
                rect,
            });
        }
        self.bounds = bounds;
        self.config = self.tool.config(bounds);
        self.current = solver::constrain_box(self.tool.initial_box(bounds), self.config, bounds);
        self.tool.committed(&self.current, bounds);
        tracing::debug!(?bounds, rect = ?self.current, "region rebuilt for new image");
        let rect = self.current;
        self.publish(|| SessionEvent::Reset(rect));
    }

    /// Apply-time value from the last committed rectangle.
    pub fn output(&self) -> T::Output {
        self.tool.output(&self.committed_rectangle(), self.bounds)
    }

    /// Exit the tool. A live drag is discarded.
    pub fn finish(self) -> T::Output {
        if self.is_dragging() {
            tracing::debug!("tool exited mid-drag, discarding drag");
        }
        self.output()
    }

    /// Register `listener` for session events.
    #[cfg(feature = "alloc")]
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns false if `id` was not subscribed.
    #[cfg(feature = "alloc")]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    #[cfg(feature = "alloc")]
    fn publish(&mut self, event: impl FnOnce() -> SessionEvent) {
        if !self.observers.is_empty() {
            self.observers.publish(&event());
        }
    }

    #[cfg(not(feature = "alloc"))]
    fn publish(&mut self, _event: impl FnOnce() -> SessionEvent) {}
}
