//! Snapshot tests using the insta crate.
//!
//! Snapshots pin the JSON shapes a host or a settings file depends on.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{CancelCounter, SaveSink, TEST_WIDTH, mounted};
use signature_surface::input::TouchPoint;
use signature_surface::replay::ReplayStep;
use signature_surface::settings::SignatureSettings;

fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap()
}

#[test]
fn snapshot_default_settings() {
    insta::assert_snapshot!("default_settings", pretty(&SignatureSettings::default()));
}

#[test]
fn snapshot_controls_blank_with_cancel() {
    let counter = CancelCounter::default();
    let surface = mounted(counter.attach(SaveSink::new().props()), TEST_WIDTH);
    insta::assert_snapshot!("controls_blank_with_cancel", pretty(&surface.controls()));
}

#[test]
fn snapshot_controls_read_only_recorded() {
    let surface = mounted(
        SaveSink::new()
            .props()
            .read_only(true)
            .initial_value("data:image/png;base64,AAAA"),
        TEST_WIDTH,
    );
    insta::assert_snapshot!("controls_read_only_recorded", pretty(&surface.controls()));
}

#[test]
fn snapshot_replay_steps() {
    let steps = vec![
        ReplayStep::PointerDown { x: 1.5, y: 2.0 },
        ReplayStep::TouchMove {
            touches: vec![TouchPoint::new(10.0, 20.0)],
        },
        ReplayStep::Resize { width: 320 },
        ReplayStep::Save,
    ];
    insta::assert_snapshot!("replay_steps", pretty(&steps));
}
