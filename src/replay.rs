//! Scripted input replay.
//!
//! A replay script is a JSON description of a signing session: the container
//! width, where the surface sits on screen (for touch input), and a list of
//! steps. Replaying drives a real [`SignatureSurface`] through the same event
//! loop a host would run, pumping pending decodes after every step.
//!
//! ```json
//! {
//!   "container_width": 320,
//!   "bounds": { "left": 16.0, "top": 80.0, "width": 320.0, "height": 200.0 },
//!   "steps": [
//!     { "type": "pointer_down", "x": 10.0, "y": 20.0 },
//!     { "type": "pointer_move", "x": 60.0, "y": 40.0 },
//!     { "type": "pointer_up" },
//!     { "type": "save" }
//!   ]
//! }
//! ```

use crate::encoding::EncodedRaster;
use crate::error::SignatureResult;
use crate::input::{InputEvent, TouchPoint};
use crate::perf::{OperationStats, measure};
use crate::settings::SignatureSettings;
use crate::surface::{SignatureSurface, SurfaceProps};
use crate::types::{Point, SurfaceRect, SurfaceSize};
use crate::viewport::Viewport;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

const DEFAULT_CONTAINER_WIDTH: u32 = 400;

fn default_container_width() -> u32 {
    DEFAULT_CONTAINER_WIDTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayStep {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    PointerLeave,
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd,
    TouchCancel,
    /// Change the container width
    Resize { width: u32 },
    Clear,
    Save,
    Cancel,
    /// Wait for every pending decode
    Settle,
}

impl ReplayStep {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PointerDown { .. } => "pointer_down",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerUp => "pointer_up",
            Self::PointerLeave => "pointer_leave",
            Self::TouchStart { .. } => "touch_start",
            Self::TouchMove { .. } => "touch_move",
            Self::TouchEnd => "touch_end",
            Self::TouchCancel => "touch_cancel",
            Self::Resize { .. } => "resize",
            Self::Clear => "clear",
            Self::Save => "save",
            Self::Cancel => "cancel",
            Self::Settle => "settle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default = "default_container_width")]
    pub container_width: u32,
    /// On-screen rect of the surface, used to map touch coordinates
    #[serde(default)]
    pub bounds: SurfaceRect,
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> SignatureResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> SignatureResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// How the replayed surface is configured.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    pub initial_value: Option<String>,
    pub read_only: bool,
    pub label: Option<String>,
}

#[derive(Debug)]
pub struct ReplayOutcome {
    /// Every value handed to `on_save`, in order
    pub saved: Vec<EncodedRaster>,
    pub cancel_count: usize,
    pub has_content: bool,
    pub size: Option<SurfaceSize>,
    /// The raster after the last step, fully settled
    pub final_raster: Option<RgbaImage>,
    /// Wall-clock time per step kind
    pub timings: BTreeMap<&'static str, OperationStats>,
}

impl ReplayOutcome {
    pub fn last_saved(&self) -> Option<&EncodedRaster> {
        self.saved.last()
    }
}

/// Run `script` against a freshly mounted surface.
pub fn replay(
    script: &ReplayScript,
    options: &ReplayOptions,
    settings: &SignatureSettings,
) -> ReplayOutcome {
    let saved = Rc::new(RefCell::new(Vec::new()));
    let cancels = Rc::new(Cell::new(0usize));

    let mut props = {
        let saved = Rc::clone(&saved);
        let cancels = Rc::clone(&cancels);
        SurfaceProps::new(move |raster| saved.borrow_mut().push(raster))
            .on_cancel(move || cancels.set(cancels.get() + 1))
            .read_only(options.read_only)
    };
    if let Some(value) = &options.initial_value {
        props = props.initial_value(value.clone());
    }
    if let Some(label) = &options.label {
        props = props.label(label.clone());
    }

    let viewport = Viewport::new(script.container_width);
    let mut surface = SignatureSurface::with_settings(props, settings);
    surface.mount(&viewport);

    let mut timings: BTreeMap<&'static str, OperationStats> = BTreeMap::new();
    for step in &script.steps {
        let ((), elapsed_ms) = measure(|| apply_step(&mut surface, &viewport, script.bounds, step));
        timings.entry(step.name()).or_default().record(elapsed_ms);
    }
    surface.settle();

    let outcome_saved = saved.borrow().clone();
    ReplayOutcome {
        saved: outcome_saved,
        cancel_count: cancels.get(),
        has_content: surface.has_content(),
        size: surface.size(),
        final_raster: surface.buffer().map(|b| b.to_image()),
        timings,
    }
}

fn apply_step(
    surface: &mut SignatureSurface,
    viewport: &Viewport,
    bounds: SurfaceRect,
    step: &ReplayStep,
) {
    match step {
        ReplayStep::PointerDown { x, y } => {
            surface.handle_event(InputEvent::PointerDown {
                offset: Point::new(*x, *y),
            });
        }
        ReplayStep::PointerMove { x, y } => {
            surface.handle_event(InputEvent::PointerMove {
                offset: Point::new(*x, *y),
            });
        }
        ReplayStep::PointerUp => {
            surface.handle_event(InputEvent::PointerUp);
        }
        ReplayStep::PointerLeave => {
            surface.handle_event(InputEvent::PointerLeave);
        }
        ReplayStep::TouchStart { touches } => {
            surface.handle_event(InputEvent::TouchStart {
                touches: touches.clone(),
                bounds,
            });
        }
        ReplayStep::TouchMove { touches } => {
            surface.handle_event(InputEvent::TouchMove {
                touches: touches.clone(),
                bounds,
            });
        }
        ReplayStep::TouchEnd => {
            surface.handle_event(InputEvent::TouchEnd);
        }
        ReplayStep::TouchCancel => {
            surface.handle_event(InputEvent::TouchCancel);
        }
        ReplayStep::Resize { width } => viewport.set_container_width(*width),
        ReplayStep::Clear => surface.clear(),
        ReplayStep::Save => surface.save(),
        ReplayStep::Cancel => surface.cancel(),
        ReplayStep::Settle => surface.settle(),
    }
    surface.pump();
}
