//! Surface-wide constants.
//!
//! Centralizes the fixed drawing parameters and the user-facing captions
//! so the surface, the settings defaults and the controls agree on them.

// ============================================================================
// Surface Geometry
// ============================================================================

/// Fixed height of the drawing surface in logical units
pub const SURFACE_HEIGHT: u32 = 200;

/// Smallest container width a surface will allocate
pub const MIN_SURFACE_WIDTH: u32 = 1;

// ============================================================================
// Stroke Defaults
// ============================================================================

/// Stroke line width in logical units
pub const STROKE_WIDTH: f32 = 3.0;

/// Stroke color (opaque black)
pub const STROKE_COLOR: [u8; 4] = [0, 0, 0, 255];

// ============================================================================
// Encoding
// ============================================================================

/// Prefix of every exported signature
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Media type accepted when decoding
pub const PNG_MEDIA_TYPE: &str = "image/png";

// ============================================================================
// Labels & Captions
// ============================================================================

/// Label shown above the surface when the host supplies none
pub const DEFAULT_LABEL: &str = "Assinatura";

pub const CLEAR_CAPTION: &str = "Limpar";
pub const SAVE_CAPTION: &str = "Salvar";
pub const CANCEL_CAPTION: &str = "Cancelar";

/// Caption under a read-only surface displaying a stored signature
pub const RECORDED_CAPTION: &str = "Assinatura registrada";

/// Hint shown while the surface has content waiting to be saved
pub const SAVE_HINT: &str = "Clique em 'Salvar' para confirmar a assinatura";

/// Hint shown while the surface is blank
pub const DRAW_HINT: &str = "Utilize o mouse ou toque para assinar acima";

// ============================================================================
// Diagnostics
// ============================================================================

/// Default tracing filter directive
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Raster operations slower than this are reported when profiling
pub const SLOW_RASTER_OP_MS: f64 = 8.0;
