//! Square placement region for mask shapes.
//!
//! Mask shapes are drawn inside a square, so the region is always locked to
//! a 1:1 ratio. Outside of a drag the placement is kept as
//! [`ShapeManipulationData`]: a center and a scale relative to the image, so a
//! saved placement survives the image being displayed (or decoded) at a
//! different size.

use crate::geometry::{BoundingBoxConfig, ImageBounds, Rectangle};
use crate::session::{DragSession, RegionTool};

/// Image-size-independent shape placement.
///
/// `center_x`/`center_y` are fractions of the image width/height. `scale` is
/// the side of the square as a fraction of the image's shorter side.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeManipulationData {
    pub center_x: f64,
    pub center_y: f64,
    pub scale: f64,
}

impl ShapeManipulationData {
    pub const MIN_SCALE: f64 = 0.1;
    pub const MAX_SCALE: f64 = 1.0;
    /// Scale used when nothing was saved.
    pub const DEFAULT_SCALE: f64 = 0.5;

    pub const fn new(center_x: f64, center_y: f64, scale: f64) -> Self {
        Self {
            center_x,
            center_y,
            scale,
        }
    }

    /// Centered on the image at `scale`.
    pub const fn centered(scale: f64) -> Self {
        Self::new(0.5, 0.5, scale)
    }

    /// Centers forced into `[0, 1]`, scale into `[MIN_SCALE, MAX_SCALE]`.
    /// Non-finite values fall back to the default placement.
    pub fn clamped(self) -> Self {
        let unit = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 };
        let scale = if self.scale.is_finite() {
            self.scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE)
        } else {
            Self::DEFAULT_SCALE
        };
        Self {
            center_x: unit(self.center_x),
            center_y: unit(self.center_y),
            scale,
        }
    }
}

impl Default for ShapeManipulationData {
    fn default() -> Self {
        Self::centered(Self::DEFAULT_SCALE)
    }
}

/// Square box in image pixels for a normalized placement. The result is not
/// constrained; pass it through [`constrain_box`](crate::solver::constrain_box)
/// if the center may sit near an edge.
pub fn normalized_to_box(data: &ShapeManipulationData, bounds: ImageBounds) -> Rectangle {
    let size = data.scale * bounds.min_side();
    Rectangle {
        x: data.center_x * bounds.width - size / 2.0,
        y: data.center_y * bounds.height - size / 2.0,
        width: size,
        height: size,
    }
}

/// Inverse of [`normalized_to_box`].
pub fn box_to_normalized(rect: &Rectangle, bounds: ImageBounds) -> ShapeManipulationData {
    let center = rect.center();
    ShapeManipulationData {
        center_x: center.x / bounds.width,
        center_y: center.y / bounds.height,
        scale: rect.width / bounds.min_side(),
    }
}

/// Shape placement tool: square lock, minimum side 10% of the short side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeTool {
    data: Option<ShapeManipulationData>,
    default_scale: f64,
}

impl ShapeTool {
    /// Start from the default centered placement.
    pub fn new() -> Self {
        Self {
            data: None,
            default_scale: ShapeManipulationData::DEFAULT_SCALE,
        }
    }

    /// Resume from a previously saved placement.
    pub fn with_saved(data: ShapeManipulationData) -> Self {
        Self {
            data: Some(data.clamped()),
            ..Self::new()
        }
    }

    /// Override the scale used for the default placement.
    pub fn with_default_scale(mut self, scale: f64) -> Self {
        self.default_scale = ShapeManipulationData::centered(scale).clamped().scale;
        self
    }

    /// Current committed placement.
    pub fn data(&self) -> ShapeManipulationData {
        self.data.unwrap_or_else(|| self.default_data())
    }

    fn default_data(&self) -> ShapeManipulationData {
        ShapeManipulationData::centered(self.default_scale)
    }
}

impl Default for ShapeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionTool for ShapeTool {
    type Output = ShapeManipulationData;

    fn config(&self, bounds: ImageBounds) -> BoundingBoxConfig {
        BoundingBoxConfig::square(ShapeManipulationData::MIN_SCALE * bounds.min_side())
    }

    fn initial_box(&self, bounds: ImageBounds) -> Rectangle {
        normalized_to_box(&self.data(), bounds)
    }

    fn reset_box(&self, bounds: ImageBounds) -> Rectangle {
        normalized_to_box(&self.default_data(), bounds)
    }

    fn committed(&mut self, rect: &Rectangle, bounds: ImageBounds) {
        self.data = Some(box_to_normalized(rect, bounds));
    }

    fn output(&self, rect: &Rectangle, bounds: ImageBounds) -> ShapeManipulationData {
        box_to_normalized(rect, bounds)
    }
}

/// Drag session configured for shape placement.
pub type ShapeSession = DragSession<ShapeTool>;
