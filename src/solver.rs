//! Constraint solving for move and resize gestures.
//!
//! Pure functions, no state. Every function that returns a [`Rectangle`]
//! finishes with [`constrain_box`], so results always respect the image
//! bounds, the minimum size, and the aspect lock.
//!
//! Deltas are in image pixels and always measured from the rectangle at the
//! start of the gesture, never from the previous frame.
//!
//! # Example
//!
//! ```
//! use zenregion::{BoundingBoxConfig, HandlePosition, ImageBounds, Rectangle};
//! use zenregion::solver::resize_box;
//!
//! let bounds = ImageBounds::new(1000.0, 600.0);
//! let config = BoundingBoxConfig::free(16.0);
//! let start = Rectangle::new(100.0, 60.0, 800.0, 480.0);
//!
//! let r = resize_box(HandlePosition::SE, start, 50.0, 50.0, config, bounds);
//! assert_eq!(r, Rectangle::new(100.0, 60.0, 850.0, 530.0));
//! ```

use num_traits::Float;

use crate::geometry::{BoundingBoxConfig, HandlePosition, ImageBounds, Rectangle};

/// `min(max(v, lo), hi)`.
///
/// Unlike [`f64::clamp`] this does not panic when `lo > hi`; `hi` wins.
/// That is what lets an image smaller than `min_size` still produce a box.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Force `rect` to satisfy every region invariant for `bounds`.
///
/// 1. With a locked ratio, shrink to the largest box of that ratio that fits
///    inside `rect`.
/// 2. Clamp width and height to `[min_size, bounds]`.
/// 3. With a locked ratio, clamp the width between the smallest size whose
///    shorter side is still `min_size` (`max(min_size, min_size * ratio)`)
///    and the largest achievable size (`min(bounds.width, bounds.height * ratio)`),
///    then rederive the height.
/// 4. Slide the box back inside the image.
///
/// If the image is smaller than `min_size`, the image extent wins and the
/// box fills it.
pub fn constrain_box(rect: Rectangle, config: BoundingBoxConfig, bounds: ImageBounds) -> Rectangle {
    let min = config.min_size;
    let (mut width, mut height) = (rect.width, rect.height);

    if let Some(ratio) = config.aspect_ratio {
        let side = width.min(height * ratio);
        width = side;
        height = side / ratio;
    }

    width = clamp(width, min, bounds.width);
    height = clamp(height, min, bounds.height);

    if let Some(ratio) = config.aspect_ratio {
        let min_width = min.max(min * ratio);
        let max_size = bounds.width.min(bounds.height * ratio);
        width = clamp(width, min_width, max_size);
        height = width / ratio;
    }

    Rectangle {
        x: clamp(rect.x, 0.0, bounds.width - width),
        y: clamp(rect.y, 0.0, bounds.height - height),
        width,
        height,
    }
}

/// Translate `start` by `(dx, dy)`. Size is preserved; only the position is
/// clamped when the move would leave the image.
pub fn move_box(
    start: Rectangle,
    dx: f64,
    dy: f64,
    config: BoundingBoxConfig,
    bounds: ImageBounds,
) -> Rectangle {
    constrain_box(start.translated(dx, dy), config, bounds)
}

/// Resize `start` by dragging `handle` by `(dx, dy)`.
///
/// Dispatches to [`resize_with_aspect_ratio`] when the config locks the
/// ratio, otherwise to [`resize_free`].
pub fn resize_box(
    handle: HandlePosition,
    start: Rectangle,
    dx: f64,
    dy: f64,
    config: BoundingBoxConfig,
    bounds: ImageBounds,
) -> Rectangle {
    match config.aspect_ratio {
        Some(ratio) => resize_with_aspect_ratio(handle, start, dx, dy, ratio, config, bounds),
        None => resize_free(handle, start, dx, dy, config, bounds),
    }
}

/// Free resize: each compass letter of `handle` moves its own edge while the
/// opposite edge stays put.
pub fn resize_free(
    handle: HandlePosition,
    start: Rectangle,
    dx: f64,
    dy: f64,
    config: BoundingBoxConfig,
    bounds: ImageBounds,
) -> Rectangle {
    let min = config.min_size;
    let mut r = start;

    if handle.has_north() {
        let bottom = start.bottom();
        let top = (start.y + dy).max(0.0);
        let height = (bottom - top).max(min);
        r.y = bottom - height;
        r.height = height;
    }
    if handle.has_south() {
        r.height = clamp(start.height + dy, min, bounds.height - start.y);
    }
    if handle.has_west() {
        let right = start.right();
        let left = (start.x + dx).max(0.0);
        let width = (right - left).max(min);
        r.x = right - width;
        r.width = width;
    }
    if handle.has_east() {
        r.width = clamp(start.width + dx, min, bounds.width - start.x);
    }

    constrain_box(r, config, bounds)
}

/// Ratio-locked resize.
///
/// Corners grow or shrink from the opposite corner, driven by whichever
/// axis moved further. Edges resize along their axis and keep the box
/// centered on the perpendicular axis.
pub fn resize_with_aspect_ratio(
    handle: HandlePosition,
    start: Rectangle,
    dx: f64,
    dy: f64,
    ratio: f64,
    config: BoundingBoxConfig,
    bounds: ImageBounds,
) -> Rectangle {
    let min = config.min_size;
    let mut r = start;

    if handle.is_corner() {
        let left = handle.has_west();
        let top = handle.has_north();
        let ddx = if left { -dx } else { dx };
        let ddy = if top { -dy } else { dy };
        let delta = if Float::abs(ddx) > Float::abs(ddy) { ddx } else { ddy };

        let width = (start.width + delta).max(min);
        let height = width / ratio;
        if left {
            r.x = start.right() - width;
        }
        if top {
            r.y = start.bottom() - height;
        }
        r.width = width;
        r.height = height;
    } else if handle.has_north() || handle.has_south() {
        let height = if handle.has_north() {
            (start.height - dy).max(min)
        } else {
            (start.height + dy).max(min)
        };
        let width = height * ratio;
        r.x = start.x + (start.width - width) / 2.0;
        if handle.has_north() {
            r.y = start.bottom() - height;
        }
        r.width = width;
        r.height = height;
    } else {
        let width = if handle.has_west() {
            (start.width - dx).max(min)
        } else {
            (start.width + dx).max(min)
        };
        let height = width / ratio;
        r.y = start.y + (start.height - height) / 2.0;
        if handle.has_west() {
            r.x = start.right() - width;
        }
        r.width = width;
        r.height = height;
    }

    constrain_box(r, config, bounds)
}
