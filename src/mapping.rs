//! Conversion between image-pixel space and display space.
//!
//! Display space is the on-screen coordinate system of the rendered (usually
//! scaled) image. A [`CoordinateMapper`] holds one frame's scale and offset;
//! the layout that produces them may change between frames, so build a fresh
//! mapper from the current [`Viewport`] rather than keeping one around.

use num_traits::Float;

use crate::geometry::{DragKind, HandlePosition, ImageBounds, Point, Rectangle};

/// Rectangle in display pixels. Always derived from a [`Rectangle`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayRectangle {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRectangle {
    /// Right edge (`left + width`).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `p` lies inside (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// Where the renderer should draw `handle`.
    pub fn handle_point(&self, handle: HandlePosition) -> Point {
        let x = if handle.has_west() {
            self.left
        } else if handle.has_east() {
            self.right()
        } else {
            self.left + self.width / 2.0
        };
        let y = if handle.has_north() {
            self.top
        } else if handle.has_south() {
            self.bottom()
        } else {
            self.top + self.height / 2.0
        };
        Point::new(x, y)
    }

    /// What a pointer-down at `p` would start dragging.
    ///
    /// Corners win over edges, edges over the body. An edge matches when `p`
    /// is within `tolerance` of it and strictly between the two edges
    /// perpendicular to it. Returns `None` outside the region.
    pub fn hit_test(&self, p: Point, tolerance: f64) -> Option<DragKind> {
        let near = |a: f64, b: f64| Float::abs(a - b) <= tolerance;
        let between_x = p.x > self.left && p.x < self.right();
        let between_y = p.y > self.top && p.y < self.bottom();

        for handle in HandlePosition::ALL {
            let hit = if handle.is_corner() {
                let c = self.handle_point(handle);
                near(p.x, c.x) && near(p.y, c.y)
            } else if handle.has_north() {
                near(p.y, self.top) && between_x
            } else if handle.has_south() {
                near(p.y, self.bottom()) && between_x
            } else if handle.has_west() {
                near(p.x, self.left) && between_y
            } else {
                near(p.x, self.right()) && between_y
            };
            if hit {
                return Some(DragKind::Resize(handle));
            }
        }

        self.contains(p).then_some(DragKind::Move)
    }
}

/// Stateless image ⇄ display conversion for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateMapper {
    scale: f64,
    offset: Point,
}

impl CoordinateMapper {
    /// `scale` is display pixels per image pixel; `offset` is the display
    /// position of the image's top-left corner.
    ///
    /// A scale that is zero, negative, or not finite is treated as 1 so it
    /// can never push `inf`/`NaN` into a rectangle.
    pub fn new(scale: f64, offset: Point) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            tracing::warn!(scale, "unusable display scale, using 1");
            1.0
        };
        Self { scale, offset }
    }

    /// The scale actually in use (after the guard).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Display position of the image's top-left corner.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Image-pixel rectangle to display pixels.
    pub fn to_display(&self, rect: &Rectangle) -> DisplayRectangle {
        DisplayRectangle {
            left: self.offset.x + rect.x * self.scale,
            top: self.offset.y + rect.y * self.scale,
            width: rect.width * self.scale,
            height: rect.height * self.scale,
        }
    }

    /// Image-pixel point to display pixels.
    pub fn point_to_display(&self, p: Point) -> Point {
        Point::new(self.offset.x + p.x * self.scale, self.offset.y + p.y * self.scale)
    }

    /// Display-pixel point (e.g. a pointer position) to image pixels.
    pub fn display_to_image(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset.x) / self.scale,
            (p.y - self.offset.y) / self.scale,
        )
    }

    /// Convert a pointer movement in display pixels to image pixels.
    pub fn pointer_delta_to_image_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale, dy / self.scale)
    }
}

/// Everything the layout reports about the displayed image for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub bounds: ImageBounds,
    pub display_scale: f64,
    pub offset: Point,
}

impl Viewport {
    /// Viewport with an explicit scale and offset.
    pub fn new(bounds: ImageBounds, display_scale: f64, offset: Point) -> Self {
        Self {
            bounds,
            display_scale,
            offset,
        }
    }

    /// Scale chosen so the whole image fits a `container_w`×`container_h`
    /// box, centered.
    pub fn fit(bounds: ImageBounds, container_w: f64, container_h: f64) -> Self {
        let scale = (container_w / bounds.width).min(container_h / bounds.height);
        let offset = Point::new(
            (container_w - bounds.width * scale) / 2.0,
            (container_h - bounds.height * scale) / 2.0,
        );
        Self::new(bounds, scale, offset)
    }

    /// Mapper for this frame's layout.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.display_scale, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_display_applies_scale_and_offset() {
        let m = CoordinateMapper::new(0.5, Point::new(20.0, 10.0));
        let d = m.to_display(&Rectangle::new(100.0, 60.0, 800.0, 480.0));
        assert_eq!(
            d,
            DisplayRectangle {
                left: 70.0,
                top: 40.0,
                width: 400.0,
                height: 240.0
            }
        );
    }

    #[test]
    fn pointer_delta_divides_by_scale() {
        let m = CoordinateMapper::new(0.25, Point::default());
        assert_eq!(m.pointer_delta_to_image_delta(10.0, -5.0), (40.0, -20.0));
    }

    #[test]
    fn bad_scale_treated_as_one() {
        for s in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let m = CoordinateMapper::new(s, Point::default());
            assert_eq!(m.scale(), 1.0);
            let (dx, dy) = m.pointer_delta_to_image_delta(3.0, 4.0);
            assert_eq!((dx, dy), (3.0, 4.0));
        }
    }

    #[test]
    fn point_round_trip() {
        let m = CoordinateMapper::new(2.0, Point::new(15.0, -5.0));
        let p = Point::new(12.5, 40.0);
        assert_eq!(m.display_to_image(m.point_to_display(p)), p);
    }

    #[test]
    fn handle_points() {
        let d = DisplayRectangle {
            left: 10.0,
            top: 20.0,
            width: 100.0,
            height: 50.0,
        };
        assert_eq!(d.handle_point(HandlePosition::NW), Point::new(10.0, 20.0));
        assert_eq!(d.handle_point(HandlePosition::SE), Point::new(110.0, 70.0));
        assert_eq!(d.handle_point(HandlePosition::N), Point::new(60.0, 20.0));
        assert_eq!(d.handle_point(HandlePosition::E), Point::new(110.0, 45.0));
    }

    #[test]
    fn hit_test_priority() {
        let d = DisplayRectangle {
            left: 10.0,
            top: 20.0,
            width: 100.0,
            height: 50.0,
        };
        let hit = |x, y| d.hit_test(Point::new(x, y), 4.0);
        assert_eq!(hit(12.0, 22.0), Some(DragKind::Resize(HandlePosition::NW)));
        assert_eq!(hit(108.0, 68.0), Some(DragKind::Resize(HandlePosition::SE)));
        assert_eq!(hit(60.0, 18.0), Some(DragKind::Resize(HandlePosition::N)));
        assert_eq!(hit(60.0, 71.0), Some(DragKind::Resize(HandlePosition::S)));
        assert_eq!(hit(9.0, 45.0), Some(DragKind::Resize(HandlePosition::W)));
        assert_eq!(hit(112.0, 45.0), Some(DragKind::Resize(HandlePosition::E)));
        assert_eq!(hit(60.0, 45.0), Some(DragKind::Move));
        assert_eq!(hit(200.0, 45.0), None);
        assert_eq!(hit(60.0, 10.0), None);
    }

    #[test]
    fn viewport_fit_centers_image() {
        let v = Viewport::fit(ImageBounds::new(1000.0, 500.0), 500.0, 500.0);
        assert_eq!(v.display_scale, 0.5);
        assert_eq!(v.offset, Point::new(0.0, 125.0));
        let d = v.mapper().to_display(&Rectangle::new(0.0, 0.0, 1000.0, 500.0));
        assert_eq!((d.left, d.top, d.width, d.height), (0.0, 125.0, 500.0, 250.0));
    }
}
