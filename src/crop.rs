//! Free-form crop region.
//!
//! # Example
//!
//! ```
//! use zenregion::{CropTool, DragKind, DragSession, HandlePosition, ImageBounds, Point, Rectangle};
//! use zenregion::mapping::CoordinateMapper;
//!
//! let mut crop = DragSession::new(CropTool::new(), ImageBounds::new(1000.0, 600.0));
//! assert_eq!(crop.rectangle(), Rectangle::new(100.0, 60.0, 800.0, 480.0));
//!
//! // Display shows the image at half size, 20px from the container edge.
//! let mapper = CoordinateMapper::new(0.5, Point::new(20.0, 20.0));
//! crop.start_drag(Point::new(470.0, 290.0), DragKind::Resize(HandlePosition::SE)).unwrap();
//! crop.on_pointer_move(Point::new(495.0, 315.0), &mapper).unwrap();
//! crop.on_pointer_up().unwrap();
//!
//! assert_eq!(crop.finish(), Rectangle::new(100.0, 60.0, 850.0, 530.0));
//! ```

use crate::geometry::{BoundingBoxConfig, ImageBounds, Rectangle};
use crate::session::{DragSession, RegionTool};

/// Crop tool: no aspect lock, entry box inset 10% from every edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CropTool {
    min_size: f64,
}

impl CropTool {
    /// Default minimum crop side, in image pixels.
    pub const DEFAULT_MIN_SIZE: f64 = 16.0;

    /// Fraction of each dimension left outside the entry box on each side.
    pub const ENTRY_MARGIN: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            min_size: Self::DEFAULT_MIN_SIZE,
        }
    }

    pub fn with_min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }
}

impl Default for CropTool {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionTool for CropTool {
    type Output = Rectangle;

    fn config(&self, _bounds: ImageBounds) -> BoundingBoxConfig {
        BoundingBoxConfig::free(self.min_size)
    }

    fn initial_box(&self, bounds: ImageBounds) -> Rectangle {
        let m = Self::ENTRY_MARGIN;
        Rectangle::new(
            bounds.width * m,
            bounds.height * m,
            bounds.width * (1.0 - 2.0 * m),
            bounds.height * (1.0 - 2.0 * m),
        )
    }

    fn output(&self, rect: &Rectangle, _bounds: ImageBounds) -> Rectangle {
        *rect
    }
}

/// Drag session configured for cropping.
pub type CropSession = DragSession<CropTool>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{DragKind, HandlePosition, PixelRect, Point};
    use crate::mapping::CoordinateMapper;

    #[test]
    fn entry_box_margins_per_axis() {
        let s = CropSession::new(CropTool::new(), ImageBounds::new(1000.0, 600.0));
        assert_eq!(s.rectangle(), Rectangle::new(100.0, 60.0, 800.0, 480.0));
        assert_eq!(s.config(), BoundingBoxConfig::free(16.0));
    }

    #[test]
    fn se_drag_grows_both_edges() {
        let mut s = CropSession::new(CropTool::new(), ImageBounds::new(1000.0, 600.0));
        let m = CoordinateMapper::new(1.0, Point::default());
        s.start_drag(Point::new(900.0, 540.0), DragKind::Resize(HandlePosition::SE))
            .unwrap();
        let r = s.on_pointer_move(Point::new(950.0, 590.0), &m).unwrap();
        assert_eq!(r, Rectangle::new(100.0, 60.0, 850.0, 530.0));
    }

    #[test]
    fn custom_min_size() {
        let tool = CropTool::new().with_min_size(50.0);
        let mut s = CropSession::new(tool, ImageBounds::new(100.0, 100.0));
        let m = CoordinateMapper::new(1.0, Point::default());
        s.start_drag(Point::default(), DragKind::Resize(HandlePosition::W))
            .unwrap();
        let r = s.on_pointer_move(Point::new(500.0, 0.0), &m).unwrap();
        assert_eq!(r.width, 50.0);
        assert_eq!(r.right(), 90.0);
    }

    #[test]
    fn output_is_pixel_rectangle_unchanged() {
        let b = ImageBounds::new(333.0, 101.0);
        let s = CropSession::new(CropTool::new(), b);
        let out = s.finish();
        assert!((out.x - 33.3).abs() < 1e-9 && (out.y - 10.1).abs() < 1e-9);
        assert!((out.width - 266.4).abs() < 1e-9 && (out.height - 80.8).abs() < 1e-9);
        assert_eq!(
            out.to_pixel_rect(b),
            PixelRect {
                x: 33,
                y: 10,
                width: 267,
                height: 81
            }
        );
    }
}
