//! End-to-end drags through a session, at several display scales.
//!
//! Each scenario is expressed in image pixels and replayed with pointer
//! positions in display space, so the mapping and the solver are exercised
//! together. The result must not depend on the display scale or offset.

use zenregion::*;

const SCALES: [(f64, f64, f64); 4] = [
    (1.0, 0.0, 0.0),
    (0.5, 20.0, 35.0),
    (0.3125, 7.0, 0.0),
    (2.0, -40.0, 12.5),
];

fn close(a: Rectangle, b: Rectangle) -> bool {
    const EPS: f64 = 1e-9;
    (a.x - b.x).abs() < EPS
        && (a.y - b.y).abs() < EPS
        && (a.width - b.width).abs() < EPS
        && (a.height - b.height).abs() < EPS
}

/// Free-resize tool starting from an explicit box.
struct Start {
    rect: Rectangle,
    config: BoundingBoxConfig,
}

impl RegionTool for Start {
    type Output = Rectangle;

    fn config(&self, _bounds: ImageBounds) -> BoundingBoxConfig {
        self.config
    }

    fn initial_box(&self, _bounds: ImageBounds) -> Rectangle {
        self.rect
    }

    fn output(&self, rect: &Rectangle, _bounds: ImageBounds) -> Rectangle {
        *rect
    }
}

/// Drag `kind` by `(dx, dy)` image pixels under every display scale.
fn drag_everywhere(
    start: Rectangle,
    config: BoundingBoxConfig,
    bounds: ImageBounds,
    kind: DragKind,
    dx: f64,
    dy: f64,
) -> Vec<(f64, Rectangle)> {
    SCALES
        .iter()
        .map(|&(scale, ox, oy)| {
            let mapper = CoordinateMapper::new(scale, Point::new(ox, oy));
            let mut s = DragSession::new(Start { rect: start, config }, bounds);
            let down = mapper.point_to_display(start.center());
            s.start_drag(down, kind).unwrap();
            // Some noise first; only the final position may matter.
            s.on_pointer_move(Point::new(down.x + 13.0, down.y - 71.0), &mapper)
                .unwrap();
            let up = Point::new(down.x + dx * scale, down.y + dy * scale);
            s.on_pointer_move(up, &mapper).unwrap();
            (scale, s.on_pointer_up().unwrap())
        })
        .collect()
}

#[test]
fn crop_resize_se() {
    let results = drag_everywhere(
        Rectangle::new(100.0, 60.0, 800.0, 480.0),
        BoundingBoxConfig::free(16.0),
        ImageBounds::new(1000.0, 600.0),
        DragKind::Resize(HandlePosition::SE),
        50.0,
        50.0,
    );
    for (scale, r) in results {
        assert!(
            close(r, Rectangle::new(100.0, 60.0, 850.0, 530.0)),
            "scale {scale}: {r:?}"
        );
    }
}

#[test]
fn shape_resize_north() {
    let results = drag_everywhere(
        Rectangle::new(0.0, 0.0, 200.0, 200.0),
        BoundingBoxConfig::square(20.0),
        ImageBounds::new(1000.0, 1000.0),
        DragKind::Resize(HandlePosition::N),
        0.0,
        100.0,
    );
    for (scale, r) in results {
        assert!(
            close(r, Rectangle::new(50.0, 100.0, 100.0, 100.0)),
            "scale {scale}: {r:?}"
        );
    }
}

#[test]
fn move_clamped_at_edge() {
    let results = drag_everywhere(
        Rectangle::new(10.0, 10.0, 100.0, 100.0),
        BoundingBoxConfig::free(16.0),
        ImageBounds::new(500.0, 500.0),
        DragKind::Move,
        450.0,
        0.0,
    );
    for (scale, r) in results {
        assert!(
            close(r, Rectangle::new(400.0, 10.0, 100.0, 100.0)),
            "scale {scale}: {r:?}"
        );
    }
}

#[test]
fn min_size_floor_on_every_handle() {
    for config in [BoundingBoxConfig::free(50.0), BoundingBoxConfig::square(50.0)] {
        for handle in HandlePosition::ALL {
            // Shrink: push each moving edge inward past the opposite one.
            let dx = if handle.has_west() { 200.0 } else { -200.0 };
            let dy = if handle.has_north() { 200.0 } else { -200.0 };
            let results = drag_everywhere(
                Rectangle::new(100.0, 100.0, 60.0, 60.0),
                config,
                ImageBounds::new(400.0, 400.0),
                DragKind::Resize(handle),
                dx,
                dy,
            );
            for (scale, r) in results {
                assert!(
                    r.width >= 50.0 - 1e-9 && r.height >= 50.0 - 1e-9,
                    "{handle} {config:?} scale {scale}: {r:?}"
                );
            }
        }
    }
}

#[test]
fn cancel_mid_drag_restores_and_next_drag_starts_clean() {
    let bounds = ImageBounds::new(800.0, 600.0);
    let mut crop = CropSession::new(CropTool::new(), bounds);
    let mapper = Viewport::fit(bounds, 400.0, 400.0).mapper();
    let entry = crop.rectangle();

    let d = crop.display_rectangle(&mapper);
    let corner = d.handle_point(HandlePosition::NW);
    assert_eq!(
        d.hit_test(corner, 4.0),
        Some(DragKind::Resize(HandlePosition::NW))
    );

    crop.start_drag(corner, DragKind::Resize(HandlePosition::NW))
        .unwrap();
    crop.on_pointer_move(Point::new(corner.x - 30.0, corner.y - 30.0), &mapper)
        .unwrap();
    assert_eq!(crop.cancel().unwrap(), entry);

    crop.start_drag(corner, DragKind::Resize(HandlePosition::NW))
        .unwrap();
    let r = crop
        .on_pointer_move(Point::new(corner.x + 10.0, corner.y), &mapper)
        .unwrap();
    // Scale 0.5: 10 display px is 20 image px.
    assert!(close(
        r,
        Rectangle::new(entry.x + 20.0, entry.y, entry.width - 20.0, entry.height)
    ));
}

#[cfg(feature = "alloc")]
#[test]
fn listeners_only_see_drag_lifecycle_when_dragging() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let bounds = ImageBounds::new(640.0, 480.0);
    let mut shape = ShapeSession::new(ShapeTool::new(), bounds);
    let mapper = CoordinateMapper::new(1.0, Point::default());

    // Tracks whether the host would have document-level listeners attached.
    let attached = Rc::new(RefCell::new(false));
    let redraws = Rc::new(RefCell::new(0u32));
    {
        let attached = Rc::clone(&attached);
        let redraws = Rc::clone(&redraws);
        shape.subscribe(move |e| match e {
            SessionEvent::DragStarted(_) => *attached.borrow_mut() = true,
            SessionEvent::DragEnded { .. } => *attached.borrow_mut() = false,
            SessionEvent::BoxChanged(_) => *redraws.borrow_mut() += 1,
            SessionEvent::Reset(_) => {}
        });
    }

    assert!(!*attached.borrow());
    shape.start_drag(Point::new(320.0, 240.0), DragKind::Move).unwrap();
    assert!(*attached.borrow());
    for step in 1..=5 {
        shape
            .on_pointer_move(Point::new(320.0 + step as f64, 240.0), &mapper)
            .unwrap();
    }
    shape.cancel().unwrap();
    assert!(!*attached.borrow());
    assert_eq!(*redraws.borrow(), 5);
}

#[cfg(feature = "serde")]
#[test]
fn saved_placement_survives_serialization() {
    let data = ShapeManipulationData::new(0.3, 0.7, 0.25);
    let json = serde_json::to_string(&data).unwrap();
    let back: ShapeManipulationData = serde_json::from_str(&json).unwrap();
    assert_eq!(back, data);

    let kind: DragKind = serde_json::from_str(r#"{"Resize":"ne"}"#).unwrap();
    assert_eq!(kind, DragKind::Resize(HandlePosition::NE));
}
