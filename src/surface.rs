//! The signature surface.
//!
//! Owns a raster buffer, the stroke state machine and the persistence
//! boundary (data URI in via `initial_value`, data URI out via `on_save`).
//!
//! ## Event loop model
//!
//! Every operation runs synchronously inside the handler that triggered it,
//! except decoding. Decodes (the initial value, and the snapshot taken by a
//! resize reflow) are queued as [`DecodeTask`]s and composited when the host
//! calls [`SignatureSurface::pump`] (non-blocking) or
//! [`SignatureSurface::settle`] (blocking). Queued decodes composite in the
//! order they were started, each at the origin, over whatever the buffer
//! already holds.
//!
//! ## Failure model
//!
//! Nothing here returns an error to the host. Operations on an unmounted
//! surface are no-ops, and decode or encode failures are logged and leave
//! the raster untouched.

use crate::constants::MIN_SURFACE_WIDTH;
use crate::controls::SurfaceControls;
use crate::decode::{DecodeResult, DecodeTask};
use crate::encoding::EncodedRaster;
use crate::input::{CoordinateConverter, EventResponse, InputEvent, StrokeState};
use crate::raster::{PixelBuffer, RasterBuffer};
use crate::settings::SignatureSettings;
use crate::types::{Point, StrokeStyle, SurfaceSize};
use crate::viewport::{ResizeSubscription, Viewport};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Receives the encoded signature when the user saves.
pub type SaveCallback = Box<dyn FnMut(EncodedRaster)>;

/// Invoked verbatim when the user cancels.
pub type CancelCallback = Box<dyn FnMut()>;

// ============================================================================
// Props
// ============================================================================

/// Host-supplied configuration of a surface.
pub struct SurfaceProps {
    on_save: SaveCallback,
    on_cancel: Option<CancelCallback>,
    initial_value: Option<String>,
    read_only: bool,
    label: Option<String>,
}

impl SurfaceProps {
    pub fn new(on_save: impl FnMut(EncodedRaster) + 'static) -> Self {
        Self {
            on_save: Box::new(on_save),
            on_cancel: None,
            initial_value: None,
            read_only: false,
            label: None,
        }
    }

    pub fn on_cancel(mut self, on_cancel: impl FnMut() + 'static) -> Self {
        self.on_cancel = Some(Box::new(on_cancel));
        self
    }

    /// Seed the surface with a previously saved data URI.
    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl std::fmt::Debug for SurfaceProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceProps")
            .field("has_on_cancel", &self.on_cancel.is_some())
            .field("has_initial_value", &self.initial_value.is_some())
            .field("read_only", &self.read_only)
            .field("label", &self.label)
            .finish()
    }
}

// ============================================================================
// Pending decodes
// ============================================================================

/// Why a decode was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    /// Seeding from `initial_value`; marks the surface as having content
    InitialValue,
    /// Restoring the pre-resize snapshot
    Reflow,
}

struct PendingComposite {
    kind: CompositeKind,
    task: DecodeTask,
}

// ============================================================================
// Surface
// ============================================================================

pub struct SignatureSurface<B: RasterBuffer = PixelBuffer> {
    props: SurfaceProps,
    label: String,
    style: StrokeStyle,
    height: u32,
    /// `None` until mounted (and again after unmount)
    buffer: Option<B>,
    stroke: StrokeState,
    has_content: bool,
    pending: VecDeque<PendingComposite>,
    resize: Option<ResizeSubscription>,
}

impl SignatureSurface {
    /// Surface with default settings and the software raster buffer.
    pub fn new(props: SurfaceProps) -> Self {
        Self::configured(props, &SignatureSettings::default())
    }

    /// Surface with explicit settings and the software raster buffer.
    pub fn with_settings(props: SurfaceProps, settings: &SignatureSettings) -> Self {
        Self::configured(props, settings)
    }
}

impl<B: RasterBuffer> SignatureSurface<B> {
    /// Surface over any raster buffer implementation.
    pub fn configured(props: SurfaceProps, settings: &SignatureSettings) -> Self {
        let label = props
            .label
            .clone()
            .unwrap_or_else(|| settings.default_label.clone());
        Self {
            props,
            label,
            style: settings.stroke,
            height: settings.surface_height,
            buffer: None,
            stroke: StrokeState::default(),
            has_content: false,
            pending: VecDeque::new(),
            resize: None,
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Mount inside `viewport`: allocate at the container width, subscribe to
    /// resizes and start decoding the initial value.
    ///
    /// Returns false, without subscribing, if the surface was already mounted
    /// or its buffer could not be allocated.
    pub fn mount(&mut self, viewport: &Viewport) -> bool {
        let mounted = self.mount_with_width(viewport.container_width());
        if mounted {
            self.resize = Some(viewport.subscribe());
        }
        mounted
    }

    /// Mount at a fixed container width without resize notifications.
    ///
    /// Returns false if the surface was already mounted or its buffer could
    /// not be allocated. A surface that failed to mount stays inert.
    pub fn mount_with_width(&mut self, container_width: u32) -> bool {
        if self.buffer.is_some() {
            warn!("Surface is already mounted");
            return false;
        }

        let size = self.size_for(container_width);
        match B::allocate(size) {
            Ok(buffer) => self.buffer = Some(buffer),
            Err(e) => {
                warn!(width = size.width, height = size.height, "Failed to mount surface: {}", e);
                return false;
            }
        }
        debug!(
            width = size.width,
            height = size.height,
            read_only = self.props.read_only,
            "Surface mounted"
        );

        if let Some(value) = self.props.initial_value.clone() {
            self.pending.push_back(PendingComposite {
                kind: CompositeKind::InitialValue,
                task: DecodeTask::spawn(value),
            });
        }
        true
    }

    /// Release the buffer, the resize subscription and any pending decodes.
    /// Decodes still running finish into a closed channel.
    pub fn unmount(&mut self) {
        if self.buffer.is_none() && self.resize.is_none() && self.pending.is_empty() {
            return;
        }
        self.buffer = None;
        self.resize = None;
        self.stroke.end();
        let cancelled = self.pending.len();
        self.pending.clear();
        debug!(cancelled_decodes = cancelled, "Surface unmounted");
    }

    // ------------------------------------------------------------------------
    // Stroke operations
    // ------------------------------------------------------------------------

    /// Open a stroke at `point`. Nothing is drawn until the stroke continues.
    pub fn begin_stroke(&mut self, point: Point) {
        self.open_stroke(point, false);
    }

    /// Draw a segment from the last point to `point` and commit it.
    pub fn continue_stroke(&mut self, point: Point) {
        if self.props.read_only {
            return;
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        if let Some((from, to)) = self.stroke.advance(point) {
            buffer.commit_segment(from, to, &self.style);
            trace!(?from, ?to, "Segment committed");
        }
    }

    /// Close the current stroke. No-op when no stroke is active.
    pub fn end_stroke(&mut self) {
        if self.stroke.end() {
            trace!("Stroke ended");
        }
    }

    fn open_stroke(&mut self, point: Point, touch: bool) -> bool {
        if self.props.read_only || self.buffer.is_none() {
            return false;
        }
        self.stroke.begin(point, touch);
        self.has_content = true;
        true
    }

    // ------------------------------------------------------------------------
    // Affordances
    // ------------------------------------------------------------------------

    /// Erase the drawing. Unavailable while blank or read-only.
    ///
    /// Pending decodes are dropped so an older raster cannot reappear.
    pub fn clear(&mut self) {
        if !self.can_edit_content() {
            return;
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        buffer.clear();
        self.has_content = false;
        self.pending.clear();
        debug!("Surface cleared");
    }

    /// Encode the drawing and hand it to `on_save`. Unavailable while blank
    /// or read-only.
    pub fn save(&mut self) {
        if !self.can_edit_content() {
            return;
        }
        let Some(buffer) = self.buffer.as_ref() else {
            return;
        };
        match buffer.snapshot_encode() {
            Ok(raster) => {
                debug!(bytes = raster.as_str().len(), "Signature saved");
                (self.props.on_save)(raster);
            }
            Err(e) => warn!("Failed to encode signature: {}", e),
        }
    }

    /// Forward to the host's `on_cancel`, if any.
    pub fn cancel(&mut self) {
        if let Some(on_cancel) = self.props.on_cancel.as_mut() {
            on_cancel();
        }
    }

    fn can_edit_content(&self) -> bool {
        !self.props.read_only && self.has_content
    }

    // ------------------------------------------------------------------------
    // Resize reflow
    // ------------------------------------------------------------------------

    /// Reallocate at a new container width, keeping the drawing.
    ///
    /// The current raster is snapshot-encoded, the buffer reallocated, and
    /// (only if there is content) the snapshot queued to be recomposited at
    /// the origin. Content is neither rescaled nor clamped.
    ///
    /// If the snapshot or the new buffer cannot be produced, the current
    /// buffer is kept at its old size with its content intact.
    pub fn reflow(&mut self, container_width: u32) {
        let new_size = self.size_for(container_width);
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        if buffer.size() == new_size {
            trace!(width = new_size.width, "Reflow skipped, width unchanged");
            return;
        }

        let snapshot = if self.has_content {
            match buffer.snapshot_encode() {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!(width = new_size.width, "Resize skipped, snapshot failed: {}", e);
                    return;
                }
            }
        } else {
            None
        };

        match B::allocate(new_size) {
            Ok(resized) => *buffer = resized,
            Err(e) => {
                warn!(width = new_size.width, "Resize skipped, allocation failed: {}", e);
                return;
            }
        }
        debug!(width = new_size.width, restoring = snapshot.is_some(), "Surface reflowed");

        if let Some(snapshot) = snapshot {
            self.pending.push_back(PendingComposite {
                kind: CompositeKind::Reflow,
                task: DecodeTask::spawn_raster(snapshot),
            });
        }
    }

    fn size_for(&self, container_width: u32) -> SurfaceSize {
        SurfaceSize::new(container_width.max(MIN_SURFACE_WIDTH), self.height)
    }

    // ------------------------------------------------------------------------
    // Event loop
    // ------------------------------------------------------------------------

    /// Dispatch one input event.
    pub fn handle_event(&mut self, event: InputEvent) -> EventResponse {
        match event {
            InputEvent::PointerDown { offset } => {
                self.open_stroke(CoordinateConverter::pointer_to_local(offset), false);
                EventResponse::IGNORED
            }
            InputEvent::PointerMove { offset } => {
                // Pointer moves never extend a stroke owned by a touch
                if !self.stroke.is_touch() {
                    self.continue_stroke(CoordinateConverter::pointer_to_local(offset));
                }
                EventResponse::IGNORED
            }
            InputEvent::TouchStart { touches, bounds } => {
                // A second finger must not restart the stroke in progress
                if self.stroke.is_active() {
                    return EventResponse::IGNORED;
                }
                let Some(point) = CoordinateConverter::primary_touch(&touches, &bounds) else {
                    return EventResponse::IGNORED;
                };
                if self.open_stroke(point, true) {
                    EventResponse::CAPTURED
                } else {
                    EventResponse::IGNORED
                }
            }
            InputEvent::TouchMove { touches, bounds } => {
                if self.props.read_only || !self.stroke.is_touch() {
                    return EventResponse::IGNORED;
                }
                if let Some(point) = CoordinateConverter::primary_touch(&touches, &bounds) {
                    self.continue_stroke(point);
                }
                EventResponse::CAPTURED
            }
            InputEvent::PointerUp
            | InputEvent::PointerLeave
            | InputEvent::TouchEnd
            | InputEvent::TouchCancel => {
                self.end_stroke();
                EventResponse::IGNORED
            }
            InputEvent::Other => EventResponse::IGNORED,
        }
    }

    /// Apply queued resizes and composite every decode that has finished,
    /// without blocking.
    pub fn pump(&mut self) {
        self.apply_resizes();

        while let Some(front) = self.pending.front_mut() {
            let Some(result) = front.task.try_take() else {
                break;
            };
            let kind = front.kind;
            self.pending.pop_front();
            self.apply_decoded(kind, result);
        }
    }

    /// Apply queued resizes and block until every pending decode has been
    /// composited.
    pub fn settle(&mut self) {
        self.apply_resizes();

        while let Some(PendingComposite { kind, task }) = self.pending.pop_front() {
            let result = task.wait();
            self.apply_decoded(kind, result);
        }
    }

    fn apply_resizes(&mut self) {
        let latest = self.resize.as_mut().and_then(|sub| sub.latest());
        if let Some(event) = latest {
            self.reflow(event.width);
        }
    }

    fn apply_decoded(&mut self, kind: CompositeKind, result: DecodeResult) {
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        match result {
            Ok(raster) => {
                buffer.composite_decoded(&raster, Point::ORIGIN);
                if kind == CompositeKind::InitialValue {
                    self.has_content = true;
                }
                trace!(
                    ?kind,
                    width = raster.width(),
                    height = raster.height(),
                    "Decoded raster composited"
                );
            }
            Err(e) => warn!(?kind, "Failed to decode raster: {}", e),
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn is_mounted(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn is_read_only(&self) -> bool {
        self.props.read_only
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_active()
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.stroke
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn has_initial_value(&self) -> bool {
        self.props.initial_value.is_some()
    }

    pub fn has_cancel(&self) -> bool {
        self.props.on_cancel.is_some()
    }

    /// Buffer size, if mounted
    pub fn size(&self) -> Option<SurfaceSize> {
        self.buffer.as_ref().map(|b| b.size())
    }

    pub fn buffer(&self) -> Option<&B> {
        self.buffer.as_ref()
    }

    /// Number of decodes not yet composited
    pub fn pending_decodes(&self) -> usize {
        self.pending.len()
    }

    pub fn is_subscribed(&self) -> bool {
        self.resize.is_some()
    }

    /// The buttons and captions to show for the current state.
    pub fn controls(&self) -> SurfaceControls {
        SurfaceControls::from_surface(self)
    }
}

impl<B: RasterBuffer> std::fmt::Debug for SignatureSurface<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureSurface")
            .field("props", &self.props)
            .field("label", &self.label)
            .field("size", &self.size())
            .field("stroke", &self.stroke)
            .field("has_content", &self.has_content)
            .field("pending_decodes", &self.pending.len())
            .finish()
    }
}
