//! Constrained crop and placement regions for interactive image editors.
//!
//! Pure geometry plus a small drag state machine. No rendering, no pixel
//! operations, `no_std` compatible.
//!
//! # Modules
//!
//! - [`geometry`] — Rectangles, image bounds, handles, and configuration
//! - [`solver`] — Clamping, move, and free/aspect-locked resize
//! - [`mapping`] — Image ⇄ display coordinate conversion and handle hit-testing
//! - [`session`] — Drag session state machine and the [`RegionTool`] trait
//! - [`observe`] — Session events and subscriptions
//! - [`crop`] — Free-form crop tool
//! - [`shape`] — Square shape-placement tool with normalized placement data
//!
//! # Example
//!
//! ```
//! use zenregion::{DragKind, ImageBounds, Point, ShapeSession, ShapeTool};
//! use zenregion::mapping::Viewport;
//!
//! let bounds = ImageBounds::new(1200.0, 800.0);
//! let mut shape = ShapeSession::new(ShapeTool::new(), bounds);
//!
//! // The image is shown fitted into a 600×600 panel.
//! let viewport = Viewport::fit(bounds, 600.0, 600.0);
//! let mapper = viewport.mapper();
//!
//! let body = shape.display_rectangle(&mapper);
//! let grab = Point::new(body.left + body.width / 2.0, body.top + body.height / 2.0);
//! assert_eq!(body.hit_test(grab, 6.0), Some(DragKind::Move));
//!
//! shape.start_drag(grab, DragKind::Move).unwrap();
//! shape.on_pointer_move(Point::new(grab.x + 50.0, grab.y), &mapper).unwrap();
//! shape.on_pointer_up().unwrap();
//!
//! let placement = shape.finish();
//! assert!((placement.center_x - 0.5833333333).abs() < 1e-6);
//! assert_eq!(placement.scale, 0.5);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod crop;
pub mod error;
pub mod geometry;
pub mod mapping;
pub mod observe;
pub mod session;
pub mod shape;
pub mod solver;

pub use crop::{CropSession, CropTool};
pub use error::RegionError;
pub use geometry::{
    BoundingBoxConfig, DragKind, HandlePosition, ImageBounds, PixelRect, Point, Rectangle,
};
pub use mapping::{CoordinateMapper, DisplayRectangle, Viewport};
pub use observe::{SessionEvent, SubscriptionId};
pub use session::{DragSession, DragState, RegionTool};
pub use shape::{ShapeManipulationData, ShapeSession, ShapeTool, box_to_normalized, normalized_to_box};
