//! Fixed-size raster surface the user draws on.
//!
//! The surface owns a 280×280 `tiny_skia::Pixmap` and is the only code that writes pixels.
//! Strokes are flattened into the raster as they are drawn; nothing but the head of the
//! currently open stroke is retained.

use crate::error::{DigitpadError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as SkiaStroke,
    Transform,
};

/// Width and height of the drawing buffer in logical pixels.
pub const SURFACE_SIZE: u32 = 280;

/// Width of every stroke segment.
pub const STROKE_WIDTH: f32 = 15.0;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A position in surface space (`0.0..280.0` on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Operations a stroke producer is allowed to perform on a drawable.
///
/// The stroke controller is written against this trait so it never touches the raster itself.
pub trait StrokeTarget {
    /// Open a new path at `point` without drawing anything.
    fn begin_stroke(&mut self, point: Point);

    /// Draw a segment from the current path head to `point`.
    fn extend_stroke(&mut self, point: Point);

    /// Close the current path.
    fn end_stroke(&mut self);
}

/// The points of the stroke currently being drawn.
#[derive(Debug, Clone)]
struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    fn starting_at(point: Point) -> Self {
        Self {
            points: vec![point],
        }
    }

    fn head(&self) -> Point {
        // A stroke always starts with one point and only grows.
        self.points[self.points.len() - 1]
    }
}

/// The 280×280 drawing buffer.
///
/// Invariant: every pixel is opaque white unless a stroke has been drawn over it.
pub struct Surface {
    pixmap: Pixmap,
    stroke: Option<Stroke>,
    ink: Paint<'static>,
    pen: SkiaStroke,
}

impl Surface {
    /// Allocate a blank (all white) surface.
    pub fn new() -> Result<Self> {
        let mut pixmap = Pixmap::new(SURFACE_SIZE, SURFACE_SIZE)
            .ok_or_else(|| DigitpadError::other("failed to allocate drawing surface"))?;
        pixmap.fill(Color::WHITE);

        let mut ink = Paint::default();
        ink.set_color(Color::BLACK);
        ink.anti_alias = true;

        let pen = SkiaStroke {
            width: STROKE_WIDTH,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..SkiaStroke::default()
        };

        Ok(Self {
            pixmap,
            stroke: None,
            ink,
            pen,
        })
    }

    /// Fill the buffer with opaque white and forget any open stroke.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::WHITE);
        self.stroke = None;
    }

    /// Whether a stroke is currently open.
    pub fn has_open_stroke(&self) -> bool {
        self.stroke.is_some()
    }

    /// True when no pixel differs from the white background.
    pub fn is_blank(&self) -> bool {
        self.pixmap
            .pixels()
            .iter()
            .all(|p| p.red() == 255 && p.green() == 255 && p.blue() == 255)
    }

    /// RGB value of a single pixel, `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixmap
            .pixel(x, y)
            .map(|p| [p.red(), p.green(), p.blue()])
    }

    /// Average luminance of the buffer over a `cols` × `rows` grid, row-major.
    ///
    /// Each cell covers at least one source pixel, so grids finer than the buffer repeat pixels.
    pub fn sample(&self, cols: u16, rows: u16) -> Vec<u8> {
        let cols = u32::from(cols);
        let rows = u32::from(rows);
        let mut out = Vec::with_capacity((cols * rows) as usize);
        if cols == 0 || rows == 0 {
            return out;
        }

        let pixels = self.pixmap.pixels();
        for row in 0..rows {
            let (y0, y1) = block_span(row, rows);
            for col in 0..cols {
                let (x0, x1) = block_span(col, cols);
                let mut sum: u64 = 0;
                for y in y0..y1 {
                    let line = (y * SURFACE_SIZE) as usize;
                    for x in x0..x1 {
                        let p = pixels[line + x as usize];
                        sum += (u64::from(p.red()) + u64::from(p.green()) + u64::from(p.blue())) / 3;
                    }
                }
                let count = u64::from((x1 - x0) * (y1 - y0));
                out.push((sum / count) as u8);
            }
        }
        out
    }

    /// Encode the buffer as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| DigitpadError::encode(e.to_string()))
    }

    /// Encode the buffer as a `data:image/png;base64,...` URL.
    pub fn export_data_url(&self) -> Result<String> {
        let png = self.export_png()?;
        Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png)))
    }

    fn draw_segment(&mut self, from: Point, to: Point) {
        if from == to {
            // Zero-length segment: a round cap collapses to a dot.
            if let Some(dot) = PathBuilder::from_circle(to.x, to.y, STROKE_WIDTH / 2.0) {
                self.pixmap.fill_path(
                    &dot,
                    &self.ink,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            return;
        }

        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        if let Some(path) = builder.finish() {
            self.pixmap
                .stroke_path(&path, &self.ink, &self.pen, Transform::identity(), None);
        }
    }
}

impl StrokeTarget for Surface {
    fn begin_stroke(&mut self, point: Point) {
        self.stroke = Some(Stroke::starting_at(point));
    }

    fn extend_stroke(&mut self, point: Point) {
        let from = match &self.stroke {
            Some(stroke) => stroke.head(),
            None => {
                // Nothing to connect to yet: this point starts the stroke.
                self.stroke = Some(Stroke::starting_at(point));
                return;
            }
        };
        self.draw_segment(from, point);
        if let Some(stroke) = self.stroke.as_mut() {
            stroke.points.push(point);
        }
    }

    fn end_stroke(&mut self) {
        if let Some(stroke) = self.stroke.take() {
            debug!("stroke finished with {} points", stroke.points.len());
        }
    }
}

/// Source pixel range `[start, end)` covered by block `index` of `count` blocks.
fn block_span(index: u32, count: u32) -> (u32, u32) {
    let start = (index * SURFACE_SIZE / count).min(SURFACE_SIZE - 1);
    let end = ((index + 1) * SURFACE_SIZE / count).clamp(start + 1, SURFACE_SIZE);
    (start, end)
}
