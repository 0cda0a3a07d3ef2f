//! Surface affordances.
//!
//! What a host should render around the drawing: the label, which buttons
//! exist and whether they are enabled, and the caption under the surface.
//! Read-only surfaces get no buttons at all.

use crate::constants::{
    CANCEL_CAPTION, CLEAR_CAPTION, DRAW_HINT, RECORDED_CAPTION, SAVE_CAPTION, SAVE_HINT,
};
use crate::raster::RasterBuffer;
use crate::surface::SignatureSurface;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Clear,
    Save,
    Cancel,
}

/// One button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affordance {
    pub action: ControlAction,
    pub caption: &'static str,
    pub enabled: bool,
}

impl Affordance {
    fn new(action: ControlAction, caption: &'static str, enabled: bool) -> Self {
        Self {
            action,
            caption,
            enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceControls {
    pub label: String,
    /// Buttons in display order: clear, save, then cancel when available
    pub buttons: Vec<Affordance>,
    /// Caption shown under the surface
    pub caption: Option<&'static str>,
}

impl SurfaceControls {
    pub fn from_surface<B: RasterBuffer>(surface: &SignatureSurface<B>) -> Self {
        let has_content = surface.has_content();

        if surface.is_read_only() {
            return Self {
                label: surface.label().to_string(),
                buttons: Vec::new(),
                caption: surface.has_initial_value().then_some(RECORDED_CAPTION),
            };
        }

        let mut buttons = vec![
            Affordance::new(ControlAction::Clear, CLEAR_CAPTION, has_content),
            Affordance::new(ControlAction::Save, SAVE_CAPTION, has_content),
        ];
        if surface.has_cancel() {
            buttons.push(Affordance::new(ControlAction::Cancel, CANCEL_CAPTION, true));
        }

        Self {
            label: surface.label().to_string(),
            buttons,
            caption: Some(if has_content { SAVE_HINT } else { DRAW_HINT }),
        }
    }

    pub fn button(&self, action: ControlAction) -> Option<&Affordance> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// True if the button exists and is enabled
    pub fn is_enabled(&self, action: ControlAction) -> bool {
        self.button(action).is_some_and(|b| b.enabled)
    }

    /// Run the action the user clicked, if its button is enabled.
    pub fn activate<B: RasterBuffer>(
        &self,
        action: ControlAction,
        surface: &mut SignatureSurface<B>,
    ) {
        if !self.is_enabled(action) {
            return;
        }
        match action {
            ControlAction::Clear => surface.clear(),
            ControlAction::Save => surface.save(),
            ControlAction::Cancel => surface.cancel(),
        }
    }
}
