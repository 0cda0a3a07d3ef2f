//! Stroke state machine and input dispatch.

use crate::helpers::{
    SaveSink, TEST_WIDTH, mounted, mounted_recording, pixels, pointer_stroke, touch_stroke,
};
use signature_surface::input::{EventResponse, InputEvent, TouchPoint};
use signature_surface::surface::SignatureSurface;
use signature_surface::types::{Point, SurfaceRect};

fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

#[test]
fn test_begin_alone_draws_nothing_but_marks_content() {
    let sink = SaveSink::new();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.begin_stroke(p(5.0, 5.0));

    assert!(surface.has_content());
    assert!(surface.is_drawing());
    assert!(surface.buffer().unwrap().segments().is_empty());
}

#[test]
fn test_segments_follow_input_order() {
    let sink = SaveSink::new();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.begin_stroke(p(0.0, 0.0));
    surface.continue_stroke(p(10.0, 0.0));
    surface.continue_stroke(p(10.0, 10.0));
    surface.end_stroke();

    assert_eq!(
        surface.buffer().unwrap().segments(),
        vec![(p(0.0, 0.0), p(10.0, 0.0)), (p(10.0, 0.0), p(10.0, 10.0))]
    );
    assert!(!surface.is_drawing());
}

#[test]
fn test_reordering_moves_changes_the_raster() {
    let sink = SaveSink::new();
    let mut forward = mounted(sink.props(), 40);
    let mut swapped = mounted(sink.props(), 40);

    pointer_stroke(&mut forward, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    pointer_stroke(&mut swapped, &[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0)]);

    assert_ne!(pixels(&forward), pixels(&swapped));
}

#[test]
fn test_continue_without_begin_is_noop() {
    let sink = SaveSink::new();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.continue_stroke(p(3.0, 3.0));
    surface.handle_event(InputEvent::PointerMove { offset: p(8.0, 8.0) });

    assert!(surface.buffer().unwrap().ops.is_empty());
    assert!(!surface.has_content());
}

#[test]
fn test_end_stroke_is_idempotent() {
    let sink = SaveSink::new();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.end_stroke();
    surface.begin_stroke(p(1.0, 1.0));
    surface.end_stroke();
    surface.end_stroke();

    assert!(!surface.is_drawing());
    assert!(surface.has_content());
}

#[test]
fn test_pointer_leave_ends_the_stroke() {
    let sink = SaveSink::new();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.handle_event(InputEvent::PointerDown { offset: p(0.0, 0.0) });
    surface.handle_event(InputEvent::PointerMove { offset: p(5.0, 0.0) });
    surface.handle_event(InputEvent::PointerLeave);
    surface.handle_event(InputEvent::PointerMove { offset: p(9.0, 9.0) });

    assert_eq!(surface.buffer().unwrap().segments().len(), 1);
    assert!(!surface.is_drawing());
}

#[test]
fn test_touch_and_pointer_commit_the_same_path() {
    let sink = SaveSink::new();
    let bounds = SurfaceRect::new(30.0, 250.0, TEST_WIDTH as f32, 200.0);
    let path = [(4.0, 4.0), (40.0, 12.0), (60.0, 50.0)];

    let mut by_pointer = mounted_recording(sink.props(), TEST_WIDTH);
    let mut by_touch = mounted_recording(sink.props(), TEST_WIDTH);
    pointer_stroke(&mut by_pointer, &path);
    touch_stroke(&mut by_touch, bounds, &path);

    assert_eq!(
        by_pointer.buffer().unwrap().segments(),
        by_touch.buffer().unwrap().segments()
    );

    let mut raster_pointer = mounted(sink.props(), TEST_WIDTH);
    let mut raster_touch = mounted(sink.props(), TEST_WIDTH);
    pointer_stroke(&mut raster_pointer, &path);
    touch_stroke(&mut raster_touch, bounds, &path);
    assert_eq!(pixels(&raster_pointer), pixels(&raster_touch));
}

#[test]
fn test_touch_input_suppresses_default_scrolling() {
    let sink = SaveSink::new();
    let bounds = SurfaceRect::new(0.0, 0.0, TEST_WIDTH as f32, 200.0);
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    let start = surface.handle_event(InputEvent::TouchStart {
        touches: vec![TouchPoint::new(1.0, 1.0)],
        bounds,
    });
    let moved = surface.handle_event(InputEvent::TouchMove {
        touches: vec![TouchPoint::new(5.0, 5.0)],
        bounds,
    });
    let ended = surface.handle_event(InputEvent::TouchEnd);
    let stray = surface.handle_event(InputEvent::TouchMove {
        touches: vec![TouchPoint::new(9.0, 9.0)],
        bounds,
    });

    assert_eq!(start, EventResponse::CAPTURED);
    assert_eq!(moved, EventResponse::CAPTURED);
    assert_eq!(ended, EventResponse::IGNORED);
    assert_eq!(stray, EventResponse::IGNORED);
}

#[test]
fn test_pointer_input_never_suppresses_defaults() {
    let sink = SaveSink::new();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    let down = surface.handle_event(InputEvent::PointerDown { offset: p(1.0, 1.0) });
    let moved = surface.handle_event(InputEvent::PointerMove { offset: p(2.0, 2.0) });

    assert!(!down.prevent_default);
    assert!(!moved.prevent_default);
}

#[test]
fn test_extra_touches_are_ignored() {
    let sink = SaveSink::new();
    let bounds = SurfaceRect::new(0.0, 0.0, TEST_WIDTH as f32, 200.0);
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.handle_event(InputEvent::TouchStart {
        touches: vec![TouchPoint::new(10.0, 10.0)],
        bounds,
    });
    // Second finger lands: must not restart the stroke
    surface.handle_event(InputEvent::TouchStart {
        touches: vec![TouchPoint::new(10.0, 10.0), TouchPoint::new(90.0, 90.0)],
        bounds,
    });
    surface.handle_event(InputEvent::TouchMove {
        touches: vec![TouchPoint::new(20.0, 10.0), TouchPoint::new(95.0, 95.0)],
        bounds,
    });

    assert_eq!(
        surface.buffer().unwrap().segments(),
        vec![(p(10.0, 10.0), p(20.0, 10.0))]
    );
}

#[test]
fn test_touch_start_without_touches_is_ignored() {
    let sink = SaveSink::new();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    let response = surface.handle_event(InputEvent::TouchStart {
        touches: Vec::new(),
        bounds: SurfaceRect::default(),
    });

    assert_eq!(response, EventResponse::IGNORED);
    assert!(!surface.has_content());
}

#[test]
fn test_touch_cancel_ends_the_stroke() {
    let sink = SaveSink::new();
    let bounds = SurfaceRect::default();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.handle_event(InputEvent::TouchStart {
        touches: vec![TouchPoint::new(1.0, 1.0)],
        bounds,
    });
    surface.handle_event(InputEvent::TouchCancel);

    assert!(!surface.is_drawing());
}

#[test]
fn test_unsupported_events_are_ignored() {
    let sink = SaveSink::new();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.begin_stroke(p(0.0, 0.0));
    let response = surface.handle_event(InputEvent::Other);

    assert_eq!(response, EventResponse::IGNORED);
    assert!(surface.is_drawing());
    assert!(surface.buffer().unwrap().ops.is_empty());
}

#[test]
fn test_pointer_down_while_drawing_restarts_at_new_point() {
    let sink = SaveSink::new();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.handle_event(InputEvent::PointerDown { offset: p(0.0, 0.0) });
    surface.handle_event(InputEvent::PointerDown { offset: p(50.0, 50.0) });
    surface.handle_event(InputEvent::PointerMove { offset: p(60.0, 50.0) });

    assert_eq!(
        surface.buffer().unwrap().segments(),
        vec![(p(50.0, 50.0), p(60.0, 50.0))]
    );
}

#[test]
fn test_unmounted_surface_ignores_input() {
    let sink = SaveSink::new();
    let mut surface = SignatureSurface::new(sink.props());

    pointer_stroke(&mut surface, &[(0.0, 0.0), (10.0, 10.0)]);
    surface.save();

    assert!(!surface.is_mounted());
    assert!(!surface.has_content());
    assert_eq!(sink.count(), 0);
}

#[test]
fn test_pointer_moves_do_not_extend_a_touch_stroke() {
    let sink = SaveSink::new();
    let bounds = SurfaceRect::default();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.handle_event(InputEvent::TouchStart {
        touches: vec![TouchPoint::new(10.0, 10.0)],
        bounds,
    });
    surface.handle_event(InputEvent::PointerMove { offset: p(40.0, 40.0) });
    surface.handle_event(InputEvent::TouchMove {
        touches: vec![TouchPoint::new(20.0, 10.0)],
        bounds,
    });

    assert!(surface.stroke_state().is_touch());
    assert_eq!(
        surface.buffer().unwrap().segments(),
        vec![(p(10.0, 10.0), p(20.0, 10.0))]
    );
}

#[test]
fn test_touch_moves_do_not_extend_a_pointer_stroke() {
    let sink = SaveSink::new();
    let mut surface = mounted_recording(sink.props(), TEST_WIDTH);

    surface.handle_event(InputEvent::PointerDown { offset: p(0.0, 0.0) });
    let stray = surface.handle_event(InputEvent::TouchMove {
        touches: vec![TouchPoint::new(30.0, 30.0)],
        bounds: SurfaceRect::default(),
    });
    surface.handle_event(InputEvent::PointerMove { offset: p(5.0, 0.0) });

    assert_eq!(stray, EventResponse::IGNORED);
    assert!(!surface.stroke_state().is_touch());
    assert_eq!(
        surface.buffer().unwrap().segments(),
        vec![(p(0.0, 0.0), p(5.0, 0.0))]
    );
}
