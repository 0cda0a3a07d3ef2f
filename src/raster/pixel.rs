//! Software raster buffer.
//!
//! Backed by a premultiplied `tiny_skia::Pixmap`. Committed segments that chain
//! end to start form one polyline, which is stroked as a single path with round
//! caps and joins, anti-aliased and composited source-over onto the pixels as
//! they were before the polyline began. Each commit is visible immediately and
//! overlapping joins are covered once, the way a 2D canvas context strokes an
//! open path. Straight-alpha pixels only appear at the PNG boundary.

use super::RasterBuffer;
use crate::encoding::EncodedRaster;
use crate::error::{SignatureError, SignatureResult};
use crate::profile_scope;
use crate::types::{Point, Rgba, StrokeStyle, SurfaceSize};
use image::RgbaImage;
use tiny_skia::{
    Color, ColorU8, FillRule, IntSize, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap,
    PixmapPaint, PremultipliedColorU8, Stroke, Transform,
};

/// The polyline currently being drawn.
#[derive(Debug, Clone, PartialEq)]
struct OpenPolyline {
    /// Pixels before the first segment of the polyline
    base: Pixmap,
    points: Vec<Point>,
}

/// RGBA8 raster backed by a `tiny_skia::Pixmap`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixmap: Pixmap,
    open: Option<OpenPolyline>,
}

impl PixelBuffer {
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha copy of the contents
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            dst.0 = demultiply(*src).to_array();
        }
        image
    }

    /// Straight-alpha pixel at (x, y), or `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(demultiply)
    }

    /// True when no pixel carries any alpha
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Number of pixels with non-zero alpha
    pub fn painted_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() != 0).count()
    }

    /// Extend the open polyline with `from -> to`, or start a new one when
    /// `from` is not where the open polyline ends.
    fn extend_polyline(&mut self, from: Point, to: Point) -> &OpenPolyline {
        let continues = self
            .open
            .as_ref()
            .is_some_and(|open| open.points.last() == Some(&from));
        if !continues {
            self.open = None;
        }
        let pixmap = &self.pixmap;
        let open = self.open.get_or_insert_with(|| OpenPolyline {
            base: pixmap.clone(),
            points: vec![from],
        });
        open.points.push(to);
        open
    }
}

impl RasterBuffer for PixelBuffer {
    fn allocate(size: SurfaceSize) -> SignatureResult<Self> {
        let pixmap =
            Pixmap::new(size.width, size.height).ok_or(SignatureError::SurfaceUnavailable)?;
        Ok(Self { pixmap, open: None })
    }

    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.pixmap.width(), self.pixmap.height())
    }

    fn commit_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        profile_scope!("commit_segment");

        if style.width <= 0.0 || style.color.a == 0 {
            return;
        }
        let mut paint = Paint {
            anti_alias: true,
            ..Default::default()
        };
        let Rgba { r, g, b, a } = style.color;
        paint.set_color_rgba8(r, g, b, a);

        let open = self.extend_polyline(from, to);
        let mut pixmap = open.base.clone();
        match polyline_path(&open.points) {
            Some(path) => {
                let stroke = Stroke {
                    width: style.width,
                    line_cap: LineCap::Round,
                    line_join: LineJoin::Round,
                    ..Default::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
            // A polyline that never moved has no direction to stroke; its round
            // caps leave a dot
            None => {
                if let Some(dot) = PathBuilder::from_circle(from.x, from.y, style.half_width()) {
                    pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
                }
            }
        }
        self.pixmap = pixmap;
    }

    fn clear(&mut self) {
        self.open = None;
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn snapshot_encode(&self) -> SignatureResult<EncodedRaster> {
        profile_scope!("snapshot_encode");
        EncodedRaster::from_image(&self.to_image())
    }

    fn composite_decoded(&mut self, raster: &RgbaImage, at: Point) {
        profile_scope!("composite_decoded");

        self.open = None;
        let Some(source) = premultiplied_pixmap(raster) else {
            return;
        };
        self.pixmap.draw_pixmap(
            at.x.round() as i32,
            at.y.round() as i32,
            source.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

/// Path through `points`, or `None` when every point coincides.
fn polyline_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    if rest.iter().all(|p| p == first) {
        return None;
    }
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for p in rest {
        builder.line_to(p.x, p.y);
    }
    builder.finish()
}

fn demultiply(pixel: PremultipliedColorU8) -> Rgba {
    let c = pixel.demultiply();
    Rgba::from_array([c.red(), c.green(), c.blue(), c.alpha()])
}

/// Premultiply a straight-alpha image into a pixmap. `None` for an empty image.
fn premultiplied_pixmap(raster: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(raster.width(), raster.height())?;
    let mut data = Vec::with_capacity(raster.as_raw().len());
    for p in raster.pixels() {
        let [r, g, b, a] = p.0;
        let c = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Pixmap::from_vec(data, size)
}
