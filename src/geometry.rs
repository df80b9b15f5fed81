//! Region value types: rectangles, image bounds, handles, and configuration.
//!
//! Every [`Rectangle`] is in image-pixel units. Rectangles that leave the
//! solver satisfy, for the [`ImageBounds`] and [`BoundingBoxConfig`] they were
//! solved against:
//!
//! - `x >= 0`, `y >= 0`
//! - `x + width <= bounds.width`, `y + height <= bounds.height`
//! - `width >= min_size`, `height >= min_size` (when the image is large enough)
//! - `width / height == aspect_ratio` when the ratio is locked

use num_traits::Float;

use crate::error::RegionError;

/// Axis-aligned rectangle in image-pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// Create a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Translate by `(dx, dy)` without any constraint.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Whether every edge lies within `bounds` (with `eps` slack).
    pub fn is_within(&self, bounds: ImageBounds, eps: f64) -> bool {
        self.x >= -eps
            && self.y >= -eps
            && self.right() <= bounds.width + eps
            && self.bottom() <= bounds.height + eps
    }

    /// Snap to whole pixels for executors that address pixel buffers.
    ///
    /// Edges are rounded independently, then the result is clamped inside
    /// `bounds` with width and height of at least 1.
    pub fn to_pixel_rect(&self, bounds: ImageBounds) -> PixelRect {
        let max_w = Float::round(bounds.width).max(1.0) as u32;
        let max_h = Float::round(bounds.height).max(1.0) as u32;
        let left = Float::round(self.x).max(0.0) as u32;
        let top = Float::round(self.y).max(0.0) as u32;
        let right = Float::round(self.right()).max(0.0) as u32;
        let bottom = Float::round(self.bottom()).max(0.0) as u32;

        let x = left.min(max_w - 1);
        let y = top.min(max_h - 1);
        let width = right.min(max_w).saturating_sub(x).max(1);
        let height = bottom.min(max_h).saturating_sub(y).max(1);
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Whole-pixel rectangle, as consumed by pixel-level crop executors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A point, in whichever space the caller is working in.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    pub fn delta_from(self, other: Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }
}

/// Pixel dimensions of the image a region lives in.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageBounds {
    pub width: f64,
    pub height: f64,
}

impl ImageBounds {
    /// Extent used when the layout reports an unusable image size.
    pub const PLACEHOLDER: Self = Self {
        width: 200.0,
        height: 200.0,
    };

    /// Create bounds, falling back to [`PLACEHOLDER`](Self::PLACEHOLDER)
    /// when either dimension is non-positive or not finite.
    pub fn new(width: f64, height: f64) -> Self {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(width) && usable(height) {
            Self { width, height }
        } else {
            tracing::warn!(width, height, "unusable image size, using placeholder bounds");
            Self::PLACEHOLDER
        }
    }

    /// The shorter side.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

impl Default for ImageBounds {
    fn default() -> Self {
        Self::PLACEHOLDER
    }
}

/// One of the eight resize handles.
///
/// Edge handles carry one compass direction, corners carry two: dragging
/// `NW` moves both the top and the left edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HandlePosition {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl HandlePosition {
    /// All handles, corners first (hit-test priority order).
    pub const ALL: [Self; 8] = [
        Self::NW,
        Self::NE,
        Self::SE,
        Self::SW,
        Self::N,
        Self::E,
        Self::S,
        Self::W,
    ];

    /// Compass name, lowercase (`"n"`, `"se"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::NE => "ne",
            Self::NW => "nw",
            Self::SE => "se",
            Self::SW => "sw",
        }
    }

    /// Parse a compass name. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s))
    }

    /// Whether this is a corner handle (two-letter compass name).
    pub const fn is_corner(self) -> bool {
        matches!(self, Self::NE | Self::NW | Self::SE | Self::SW)
    }

    /// Whether dragging this handle moves the top edge.
    pub const fn has_north(self) -> bool {
        matches!(self, Self::N | Self::NE | Self::NW)
    }

    /// Whether dragging this handle moves the bottom edge.
    pub const fn has_south(self) -> bool {
        matches!(self, Self::S | Self::SE | Self::SW)
    }

    /// Whether dragging this handle moves the right edge.
    pub const fn has_east(self) -> bool {
        matches!(self, Self::E | Self::NE | Self::SE)
    }

    /// Whether dragging this handle moves the left edge.
    pub const fn has_west(self) -> bool {
        matches!(self, Self::W | Self::NW | Self::SW)
    }

    /// CSS resize cursor for this handle.
    pub const fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::NW | Self::SE => "nwse-resize",
            Self::NE | Self::SW => "nesw-resize",
        }
    }
}

impl core::fmt::Display for HandlePosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a drag manipulates: the whole body, or one handle.
///
/// "No drag" is `Option::<DragKind>::None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragKind {
    Move,
    Resize(HandlePosition),
}

impl DragKind {
    /// Parse `"move"` or a handle name.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("move") {
            Some(Self::Move)
        } else {
            HandlePosition::parse(s).map(Self::Resize)
        }
    }

    /// CSS cursor for this drag.
    pub const fn cursor(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Resize(h) => h.cursor(),
        }
    }
}

impl From<HandlePosition> for DragKind {
    fn from(h: HandlePosition) -> Self {
        Self::Resize(h)
    }
}

/// Size and shape constraints for one tool instance.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBoxConfig {
    /// Smallest allowed width and height, in image pixels.
    pub min_size: f64,
    /// Locked `width / height`, or `None` for free resize.
    pub aspect_ratio: Option<f64>,
}

impl BoundingBoxConfig {
    /// Validated constructor.
    pub fn new(min_size: f64, aspect_ratio: Option<f64>) -> Result<Self, RegionError> {
        if !min_size.is_finite() || min_size < 0.0 {
            return Err(RegionError::InvalidMinSize(min_size));
        }
        if let Some(r) = aspect_ratio
            && (!r.is_finite() || r <= 0.0)
        {
            return Err(RegionError::InvalidAspectRatio(r));
        }
        Ok(Self {
            min_size,
            aspect_ratio,
        })
    }

    /// Free resize. A bad `min_size` is treated as 0.
    pub fn free(min_size: f64) -> Self {
        Self {
            min_size: sanitize_min(min_size),
            aspect_ratio: None,
        }
    }

    /// Ratio-locked resize. A bad ratio falls back to square.
    pub fn locked(min_size: f64, aspect_ratio: f64) -> Self {
        let ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            aspect_ratio
        } else {
            1.0
        };
        Self {
            min_size: sanitize_min(min_size),
            aspect_ratio: Some(ratio),
        }
    }

    /// Square lock, as used for shape placement.
    pub fn square(min_size: f64) -> Self {
        Self::locked(min_size, 1.0)
    }

    pub fn is_locked(&self) -> bool {
        self.aspect_ratio.is_some()
    }
}

fn sanitize_min(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
