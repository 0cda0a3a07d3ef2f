//! Unit tests for the controls view model.

use crate::helpers::{CancelCounter, SaveSink, TEST_WIDTH, mounted, pointer_stroke};
use signature_surface::constants::{DRAW_HINT, RECORDED_CAPTION, SAVE_HINT};
use signature_surface::controls::ControlAction;

#[test]
fn test_blank_editable_surface_disables_clear_and_save() {
    let surface = mounted(SaveSink::new().props(), TEST_WIDTH);
    let controls = surface.controls();

    assert!(!controls.is_enabled(ControlAction::Clear));
    assert!(!controls.is_enabled(ControlAction::Save));
    assert!(controls.button(ControlAction::Cancel).is_none());
    assert_eq!(controls.caption, Some(DRAW_HINT));
}

#[test]
fn test_drawing_enables_clear_and_save() {
    let mut surface = mounted(SaveSink::new().props(), TEST_WIDTH);
    pointer_stroke(&mut surface, &[(0.0, 0.0), (10.0, 10.0)]);
    let controls = surface.controls();

    assert!(controls.is_enabled(ControlAction::Clear));
    assert!(controls.is_enabled(ControlAction::Save));
    assert_eq!(controls.caption, Some(SAVE_HINT));
}

#[test]
fn test_cancel_button_only_with_callback() {
    let counter = CancelCounter::default();
    let surface = mounted(counter.attach(SaveSink::new().props()), TEST_WIDTH);
    let controls = surface.controls();

    assert!(controls.is_enabled(ControlAction::Cancel));
    assert_eq!(controls.buttons.len(), 3);
}

#[test]
fn test_read_only_has_no_buttons() {
    let surface = mounted(SaveSink::new().props().read_only(true), TEST_WIDTH);
    let controls = surface.controls();

    assert!(controls.buttons.is_empty());
    assert_eq!(controls.caption, None);
}

#[test]
fn test_read_only_with_stored_signature_shows_caption() {
    let surface = mounted(
        SaveSink::new()
            .props()
            .read_only(true)
            .initial_value("data:image/png;base64,AAAA"),
        TEST_WIDTH,
    );
    assert_eq!(surface.controls().caption, Some(RECORDED_CAPTION));
}

#[test]
fn test_activate_respects_enabled_state() {
    let sink = SaveSink::new();
    let mut surface = mounted(sink.props(), TEST_WIDTH);

    let controls = surface.controls();
    controls.activate(ControlAction::Save, &mut surface);
    assert_eq!(sink.count(), 0);

    pointer_stroke(&mut surface, &[(0.0, 0.0), (10.0, 10.0)]);
    let controls = surface.controls();
    controls.activate(ControlAction::Save, &mut surface);
    assert_eq!(sink.count(), 1);

    controls.activate(ControlAction::Clear, &mut surface);
    assert!(!surface.has_content());
}
