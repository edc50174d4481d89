//! Headless rasterization of frame buffers using tiny-skia.
//!
//! Stands in for a GPU renderer: the colored grid is drawn as flat-shaded
//! triangles and the isoline is stroked on top. The viewport square
//! `[-1, 1] x [-1, 1]` maps onto the whole canvas with +Y pointing up.

use std::path::{Path, PathBuf};

use field_common::{FieldError, FieldResult};
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};
use tracing::{debug, info};

use crate::color::{average_color, to_rgba8};
use crate::frame::{FrameBuffers, FrameSink};

/// Output size and line styling for the canvas.
#[derive(Debug, Clone)]
pub struct CanvasStyle {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Isoline width in pixels
    pub line_width: f32,
    /// Isoline color [R, G, B, A]
    pub line_color: [u8; 4],
    /// Color behind the grid [R, G, B, A]
    pub background: [u8; 4],
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            line_width: 2.0,
            line_color: [0, 0, 0, 255],
            background: [255, 255, 255, 255],
        }
    }
}

impl CanvasStyle {
    /// Map a viewport position to pixel coordinates.
    pub fn to_pixel(&self, position: [f32; 2]) -> (f32, f32) {
        (
            (position[0] + 1.0) * 0.5 * self.width as f32,
            (1.0 - position[1]) * 0.5 * self.height as f32,
        )
    }
}

/// Rasterize both drawable buffer pairs of a frame.
pub fn render_frame(buffers: &FrameBuffers<'_>, style: &CanvasStyle) -> FieldResult<Pixmap> {
    let mut pixmap = Pixmap::new(style.width, style.height).ok_or_else(|| {
        FieldError::Render(format!(
            "invalid canvas size {}x{}",
            style.width, style.height
        ))
    })?;

    let [r, g, b, a] = style.background;
    pixmap.fill(Color::from_rgba8(r, g, b, a));

    fill_grid(&mut pixmap, buffers, style);
    stroke_contour(&mut pixmap, buffers, style);

    Ok(pixmap)
}

/// Fill each grid triangle with the mean color of its corners.
fn fill_grid(pixmap: &mut Pixmap, buffers: &FrameBuffers<'_>, style: &CanvasStyle) {
    let points = buffers.grid_points;

    let mut paint = Paint::default();
    // Anti-aliasing leaves hairline seams between adjacent triangles
    paint.anti_alias = false;

    for triangle in buffers.grid_indices.chunks_exact(3) {
        let corners = [
            points[triangle[0] as usize],
            points[triangle[1] as usize],
            points[triangle[2] as usize],
        ];

        let [r, g, b, a] = to_rgba8(average_color(&corners.map(|p| p.color)));
        if a == 0 {
            continue;
        }
        paint.set_color_rgba8(r, g, b, a);

        let mut pb = PathBuilder::new();
        for (i, corner) in corners.iter().enumerate() {
            let (x, y) = style.to_pixel(corner.position);
            if i == 0 {
                pb.move_to(x, y);
            } else {
                pb.line_to(x, y);
            }
        }
        pb.close();

        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}

/// Stroke every contour segment as an independent line.
fn stroke_contour(pixmap: &mut Pixmap, buffers: &FrameBuffers<'_>, style: &CanvasStyle) {
    if buffers.contour_indices.is_empty() {
        return;
    }

    let mut paint = Paint::default();
    let [r, g, b, a] = style.line_color;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let mut stroke = Stroke::default();
    stroke.width = style.line_width;
    stroke.line_cap = LineCap::Round;
    stroke.line_join = LineJoin::Round;

    let mut pb = PathBuilder::new();
    for pair in buffers.contour_indices.chunks_exact(2) {
        let (x1, y1) = style.to_pixel(buffers.contour_vertices[pair[0] as usize]);
        let (x2, y2) = style.to_pixel(buffers.contour_vertices[pair[1] as usize]);
        // One bad point would make the whole path fail to build
        if ![x1, y1, x2, y2].iter().all(|c| c.is_finite()) {
            continue;
        }
        pb.move_to(x1, y1);
        pb.line_to(x2, y2);
    }

    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Encode a rendered canvas as PNG bytes.
pub fn encode_png(pixmap: &Pixmap) -> FieldResult<Vec<u8>> {
    pixmap
        .encode_png()
        .map_err(|e| FieldError::Render(format!("PNG encoding failed: {}", e)))
}

/// Writes every presented frame to `<dir>/frame_NNNNN.png`.
pub struct PngSequenceSink {
    dir: PathBuf,
    style: CanvasStyle,
    written: u64,
}

impl PngSequenceSink {
    /// Create the sink, creating `dir` if it does not exist.
    pub fn create(dir: impl AsRef<Path>, style: CanvasStyle) -> FieldResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        info!(
            dir = %dir.display(),
            width = style.width,
            height = style.height,
            "Writing PNG frames"
        );

        Ok(Self {
            dir,
            style,
            written: 0,
        })
    }

    pub fn frame_path(&self, frame_index: u64) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", frame_index))
    }

    pub fn frames_written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn present(&mut self, buffers: &FrameBuffers<'_>) -> FieldResult<()> {
        let pixmap = render_frame(buffers, &self.style)?;
        let png = encode_png(&pixmap)?;
        let path = self.frame_path(buffers.frame_index);
        std::fs::write(&path, &png)?;
        self.written += 1;

        debug!(path = %path.display(), bytes = png.len(), "Wrote frame");
        Ok(())
    }
}

/// Records buffer sizes without drawing anything.
#[derive(Debug, Default)]
pub struct StatsSink {
    pub frames: u64,
    pub last_grid_vertices: usize,
    pub last_contour_vertices: usize,
    pub last_segments: usize,
    pub uploaded_bytes: u64,
}

impl FrameSink for StatsSink {
    fn present(&mut self, buffers: &FrameBuffers<'_>) -> FieldResult<()> {
        self.frames += 1;
        self.last_grid_vertices = buffers.grid_points.len();
        self.last_contour_vertices = buffers.contour_vertices.len();
        self.last_segments = buffers.contour_indices.len() / 2;
        self.uploaded_bytes += (buffers.grid_vertex_bytes().len()
            + buffers.grid_index_bytes().len()
            + buffers.contour_vertex_bytes().len()
            + buffers.contour_index_bytes().len()) as u64;
        Ok(())
    }
}
