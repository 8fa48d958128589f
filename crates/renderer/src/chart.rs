//! Raster rendering of radar charts.
//!
//! Geometry goes onto a tiny-skia pixmap first; text is drawn afterwards on
//! the converted `RgbaImage`.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use spider_common::{Color, FrameShape, SpiderResult};
use tiny_skia::Pixmap;

use crate::canvas::{self, frame_path, new_pixmap, pixmap_to_image};
use crate::layout::{CellRect, GridLayout, LayoutMode};
use crate::radar::{spoke_angles, PolarPoint, RadarChart, Snapshot, FILL_ALPHA};
use crate::text::{draw_labels, LabelFont, TextLabel};

/// Output options for chart rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Width of one snapshot image (or of one subplot in a composite)
    pub width: u32,
    /// Height of one snapshot image (or of one subplot in a composite)
    pub height: u32,
    /// Leave the background transparent instead of white
    pub transparent: bool,
    /// Outline width of the snapshot polygon
    pub line_width: f32,
    /// Number of concentric grid rings
    pub grid_rings: u32,
    /// Font size of spoke labels; titles are drawn slightly larger
    pub font_size: f32,
    /// Largest width of a composite figure. Subplots shrink to fit.
    pub max_figure_width: u32,
    /// Largest height of a composite figure, title header included
    pub max_figure_height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            transparent: false,
            line_width: 2.0,
            grid_rings: 4,
            font_size: 16.0,
            max_figure_width: 6400,
            max_figure_height: 3200,
        }
    }
}

impl RenderOptions {
    fn background(&self) -> Option<Color> {
        if self.transparent {
            None
        } else {
            Some(Color::WHITE)
        }
    }
}

/// One rendered snapshot with the geometry it was drawn from.
#[derive(Debug, Clone)]
pub struct RenderedSnapshot {
    pub snapshot: Snapshot,
    pub image: RgbaImage,
}

/// Draws radar charts to raster images.
#[derive(Debug, Clone, Default)]
pub struct RadarRenderer {
    options: RenderOptions,
    font: Option<LabelFont>,
}

/// Fraction of the cell's smaller side used by the frame radius.
const FRAME_FRACTION: f32 = 0.34;

impl RadarRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options, font: None }
    }

    pub fn with_font(mut self, font: Option<LabelFont>) -> Self {
        self.font = font;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render one image per snapshot, in snapshot order.
    ///
    /// The whole request is validated before the first image is drawn.
    pub fn render_snapshots(&self, chart: &RadarChart) -> SpiderResult<Vec<RenderedSnapshot>> {
        let snapshots = chart.snapshots()?;
        let (width, height) = (self.options.width, self.options.height);

        let mut rendered = Vec::with_capacity(snapshots.len());
        for snapshot in snapshots {
            tracing::debug!(
                index = snapshot.index,
                title = %snapshot.title,
                radii = ?snapshot.radii,
                "Rendering snapshot"
            );

            let mut pixmap = new_pixmap(width, height, self.options.background())?;
            let cell = CellRect {
                x: 0.0,
                y: 0.0,
                width: width as f32,
                height: height as f32,
            };
            let labels = self.draw_cell(&mut pixmap, cell, chart, &snapshot);

            let mut image = pixmap_to_image(&pixmap)?;
            draw_labels(&mut image, self.font.as_ref(), &labels);
            rendered.push(RenderedSnapshot { snapshot, image });
        }

        Ok(rendered)
    }

    /// Render every snapshot as a subplot of one figure.
    pub fn render_composite(&self, chart: &RadarChart) -> SpiderResult<RgbaImage> {
        let snapshots = chart.snapshots()?;
        let grid = GridLayout::for_snapshots(snapshots.len());
        let header = self.options.font_size * 3.0;
        let (cell_width, cell_height) = self.composite_cell(&grid, header);
        let width = cell_width * grid.cols as u32;
        let height = cell_height * grid.rows as u32 + header.ceil() as u32;

        tracing::debug!(
            rows = grid.rows,
            cols = grid.cols,
            cell_width,
            cell_height,
            width,
            height,
            "Rendering composite figure"
        );

        let mut pixmap = new_pixmap(width, height, self.options.background())?;
        let mut labels = vec![TextLabel::centered(
            width as f32 / 2.0,
            header / 2.0,
            chart.title.clone(),
            self.options.font_size * 1.5,
        )];

        for snapshot in &snapshots {
            let cell = grid.cell_rect(snapshot.index, width, height, header);
            labels.extend(self.draw_cell(&mut pixmap, cell, chart, snapshot));
        }

        let mut image = pixmap_to_image(&pixmap)?;
        draw_labels(&mut image, self.font.as_ref(), &labels);
        Ok(image)
    }

    /// Subplot size inside a composite figure: the configured size, scaled
    /// down with its aspect ratio kept when the grid would exceed the
    /// figure bounds.
    fn composite_cell(&self, grid: &GridLayout, header: f32) -> (u32, u32) {
        let (width, height) = (self.options.width.max(1), self.options.height.max(1));
        let room_w = self.options.max_figure_width / grid.cols as u32;
        let room_h = self
            .options
            .max_figure_height
            .saturating_sub(header.ceil() as u32)
            / grid.rows as u32;

        let scale = (room_w as f32 / width as f32)
            .min(room_h as f32 / height as f32)
            .min(1.0);
        if scale >= 1.0 {
            return (width, height);
        }

        let cell = (
            ((width as f32 * scale).floor() as u32).max(1),
            ((height as f32 * scale).floor() as u32).max(1),
        );
        tracing::debug!(
            requested = ?(width, height),
            cell = ?cell,
            "Composite subplots scaled down to fit figure bounds"
        );
        cell
    }

    /// Render according to `mode`, returning images in output order.
    pub fn render(&self, chart: &RadarChart, mode: LayoutMode) -> SpiderResult<Vec<RgbaImage>> {
        match mode {
            LayoutMode::Separate => Ok(self
                .render_snapshots(chart)?
                .into_iter()
                .map(|r| r.image)
                .collect()),
            LayoutMode::Composite => Ok(vec![self.render_composite(chart)?]),
        }
    }

    /// Draw the frame, grid and polygon of one snapshot inside `cell` and
    /// return the text to put on top.
    fn draw_cell(
        &self,
        pixmap: &mut Pixmap,
        cell: CellRect,
        chart: &RadarChart,
        snapshot: &Snapshot,
    ) -> Vec<TextLabel> {
        let spokes = chart.spoke_count();
        let (cx, cy) = cell.center();
        let radius = cell.width.min(cell.height) * FRAME_FRACTION;
        let pixels_per_unit = radius / chart.scale_length as f32;

        if let Some(frame) = frame_path(chart.frame, spokes, cx, cy, radius) {
            if !self.options.transparent {
                canvas::fill(pixmap, &frame, Color::WHITE);
            }
        }

        self.draw_grid(pixmap, chart.frame, spokes, cx, cy, radius);

        let vertices: Vec<(f32, f32)> = snapshot
            .points
            .iter()
            .map(|p| p.to_pixel(cx, cy, pixels_per_unit))
            .collect();
        if let Some(path) = canvas::polyline_path(&vertices, true) {
            canvas::fill(pixmap, &path, snapshot.color.with_alpha(FILL_ALPHA));
            canvas::outline(pixmap, &path, snapshot.color, self.options.line_width);
        }

        if let Some(frame) = frame_path(chart.frame, spokes, cx, cy, radius) {
            canvas::outline(pixmap, &frame, Color::BLACK, 1.0);
        }

        let mut labels = Vec::with_capacity(spokes + 1);
        labels.push(TextLabel::centered(
            cx,
            cy - radius * 1.3,
            snapshot.title.clone(),
            self.options.font_size * 1.15,
        ));
        for (angle, label) in spoke_angles(spokes).into_iter().zip(&chart.spoke_labels) {
            let (x, y) = PolarPoint { angle, radius: 1.12 }.to_pixel(cx, cy, radius);
            labels.push(TextLabel::for_spoke(
                x,
                y,
                label.clone(),
                self.options.font_size,
                x - cx,
            ));
        }
        labels
    }

    /// Concentric rings and one radial line per spoke.
    ///
    /// Rings stay circular for both frame shapes.
    fn draw_grid(
        &self,
        pixmap: &mut Pixmap,
        frame: FrameShape,
        spokes: usize,
        cx: f32,
        cy: f32,
        radius: f32,
    ) {
        let rings = self.options.grid_rings;
        for ring in 1..rings {
            let r = radius * ring as f32 / rings as f32;
            if let Some(path) = frame_path(FrameShape::Circle, spokes, cx, cy, r) {
                canvas::outline(pixmap, &path, Color::GRID, 0.8);
            }
        }

        for angle in spoke_angles(spokes) {
            let end = PolarPoint { angle, radius: 1.0 }.to_pixel(cx, cy, radius);
            canvas::line(pixmap, (cx, cy), end, Color::GRID, 0.8);
        }

        tracing::trace!(frame = %frame, rings, spokes, "Drew grid");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(count: usize) -> RadarChart {
        RadarChart {
            title: "Basecase".to_string(),
            series: vec![
                vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
                vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0],
                vec![1.0, 3.0, 5.0, 0.0, 2.0, 4.0],
            ],
            scale_length: 4.0,
            snapshot_count: count,
            snapshot_titles: (0..count).map(|i| format!("S{}", i)).collect(),
            spoke_labels: vec!["A".into(), "B".into(), "C".into()],
            line_colors: vec![Color::RED; count],
            frame: FrameShape::Polygon,
        }
    }

    fn small() -> RadarRenderer {
        RadarRenderer::new(RenderOptions {
            width: 120,
            height: 100,
            ..RenderOptions::default()
        })
    }

    #[test]
    fn test_one_image_per_snapshot() {
        let rendered = small().render_snapshots(&chart(3)).unwrap();
        assert_eq!(rendered.len(), 3);
        for (i, r) in rendered.iter().enumerate() {
            assert_eq!(r.snapshot.index, i);
            assert_eq!(r.image.dimensions(), (120, 100));
        }
    }

    #[test]
    fn test_composite_dimensions_follow_grid() {
        let renderer = small();
        let header = (renderer.options().font_size * 3.0).ceil() as u32;

        let img = renderer.render_composite(&chart(6)).unwrap();
        assert_eq!(img.dimensions(), (360, 200 + header));

        let img = renderer.render_composite(&chart(5)).unwrap();
        assert_eq!(img.dimensions(), (600, 100 + header));
    }

    #[test]
    fn test_composite_shrinks_cells_to_fit_bounds() {
        let renderer = RadarRenderer::new(RenderOptions {
            width: 120,
            height: 100,
            max_figure_width: 300,
            ..RenderOptions::default()
        });
        // 1 x 5 grid: 60 px per column, aspect kept
        let img = renderer.render_composite(&chart(5)).unwrap();
        let header = (renderer.options().font_size * 3.0).ceil() as u32;
        assert_eq!(img.dimensions(), (300, 50 + header));
    }

    #[test]
    fn test_polygon_fill_is_translucent_color() {
        let rendered = small().render_snapshots(&chart(6)).unwrap();
        // Snapshot 5 has radii [4, 0, 3.2]; (68, 43) lies inside that
        // triangle, clear of grid lines and outline.
        let img = &rendered[5].image;
        let p = img.get_pixel(68, 43).0;
        assert!(p[0] > p[1], "expected reddish fill, got {:?}", p);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_transparent_background() {
        let renderer = RadarRenderer::new(RenderOptions {
            width: 100,
            height: 100,
            transparent: true,
            ..RenderOptions::default()
        });
        let rendered = renderer.render_snapshots(&chart(1)).unwrap();
        assert_eq!(rendered[0].image.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_invalid_chart_renders_nothing() {
        let mut bad = chart(2);
        bad.scale_length = 0.0;
        assert!(small().render(&bad, LayoutMode::Separate).is_err());
        assert!(small().render(&bad, LayoutMode::Composite).is_err());
    }
}
