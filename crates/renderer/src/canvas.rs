//! tiny-skia drawing primitives shared by the chart renderers.

use image::RgbaImage;
use spider_common::{Color, FrameShape, SpiderError, SpiderResult};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform,
};

use crate::radar::{spoke_angles, PolarPoint};

/// Allocate a pixmap, filled with `background` or left transparent.
pub fn new_pixmap(width: u32, height: u32, background: Option<Color>) -> SpiderResult<Pixmap> {
    let mut pixmap =
        Pixmap::new(width, height).ok_or(SpiderError::InvalidDimensions { width, height })?;
    if let Some(bg) = background {
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
    }
    Ok(pixmap)
}

/// Anti-aliased solid paint.
pub fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Round-capped stroke of the given width.
pub fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

/// Path through `points`, optionally closed.
pub fn polyline_path(points: &[(f32, f32)], close: bool) -> Option<Path> {
    let (&(x0, y0), rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

/// Boundary of a chart with `spokes` spokes, centered on `(cx, cy)`.
///
/// The polygon frame is circumscribed by the circle frame and has a vertex
/// on every spoke.
pub fn frame_path(shape: FrameShape, spokes: usize, cx: f32, cy: f32, radius: f32) -> Option<Path> {
    match shape {
        FrameShape::Circle => PathBuilder::from_circle(cx, cy, radius),
        FrameShape::Polygon => {
            let vertices: Vec<(f32, f32)> = spoke_angles(spokes)
                .into_iter()
                .map(|angle| PolarPoint { angle, radius: 1.0 }.to_pixel(cx, cy, radius))
                .collect();
            polyline_path(&vertices, true)
        }
    }
}

pub fn fill(pixmap: &mut Pixmap, path: &Path, color: Color) {
    pixmap.fill_path(path, &paint(color), FillRule::Winding, Transform::identity(), None);
}

pub fn outline(pixmap: &mut Pixmap, path: &Path, color: Color, width: f32) {
    pixmap.stroke_path(path, &paint(color), &stroke(width), Transform::identity(), None);
}

/// Straight line between two points.
pub fn line(pixmap: &mut Pixmap, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
    if let Some(path) = polyline_path(&[from, to], false) {
        outline(pixmap, &path, color, width);
    }
}

/// Copy a pixmap into an `RgbaImage`, undoing tiny-skia's premultiplied alpha.
pub fn pixmap_to_image(pixmap: &Pixmap) -> SpiderResult<RgbaImage> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or_else(|| SpiderError::RenderError("Pixel buffer size mismatch".to_string()))
}
