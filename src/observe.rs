//! Subscriptions to drag-session changes.
//!
//! Renderers subscribe to redraw on [`SessionEvent::BoxChanged`]. Hosts that
//! need document-level pointer tracking attach it on
//! [`SessionEvent::DragStarted`] and drop it on [`SessionEvent::DragEnded`],
//! so nothing listens while the session is idle.

#[cfg(feature = "alloc")]
use alloc::boxed::Box;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::geometry::{DragKind, Rectangle};

/// Something a [`DragSession`](crate::DragSession) reports to subscribers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Session entered the dragging state.
    DragStarted(DragKind),
    /// The current rectangle changed during a drag.
    BoxChanged(Rectangle),
    /// Session returned to idle. `committed` is false for a cancel, in
    /// which case `rect` is the restored pre-drag rectangle.
    DragEnded { committed: bool, rect: Rectangle },
    /// The rectangle was reset or rebuilt for a new image.
    Reset(Rectangle),
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl core::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

#[cfg(feature = "alloc")]
type Listener = Box<dyn FnMut(&SessionEvent)>;

#[cfg(feature = "alloc")]
/// Ordered listener registry. Listeners run in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

#[cfg(feature = "alloc")]
impl Observers {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub(crate) fn publish(&mut self, event: &SessionEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(feature = "alloc")]
impl core::fmt::Debug for Observers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
