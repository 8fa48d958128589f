//! `spiderweb radar`: spider charts from a JSON request.

use anyhow::{Context, Result};
use serde::Deserialize;
use spider_common::{Color, FrameShape};
use std::path::{Path, PathBuf};
use tracing::info;

use animation::FrameSequence;
use renderer::text::LabelFont;
use renderer::{write_png, RadarChart, RadarRenderer};

use crate::config::{file_stem, SpiderwebConfig};

/// Chart request as written by users. Omitted styling falls back to the
/// configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RadarRequest {
    pub title: String,
    pub series: Vec<Vec<f64>>,
    pub snapshot_titles: Vec<String>,
    pub spoke_labels: Vec<String>,
    /// Defaults to the number of snapshot titles
    #[serde(default)]
    pub snapshot_count: Option<usize>,
    /// Defaults to the configured palette, cycled
    #[serde(default, alias = "line_colors")]
    pub colors: Option<Vec<Color>>,
    #[serde(default)]
    pub frame: Option<FrameShape>,
    #[serde(default)]
    pub scale_length: Option<f64>,
}

impl RadarRequest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read chart request: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse chart request: {}", path.display()))
    }

    /// Fill in defaults from `config`.
    pub fn into_chart(self, config: &SpiderwebConfig) -> RadarChart {
        let snapshot_count = self.snapshot_count.unwrap_or(self.snapshot_titles.len());
        RadarChart {
            title: self.title,
            series: self.series,
            scale_length: self.scale_length.unwrap_or(config.scale_length),
            snapshot_count,
            snapshot_titles: self.snapshot_titles,
            spoke_labels: self.spoke_labels,
            line_colors: self
                .colors
                .unwrap_or_else(|| config.palette.cycle(snapshot_count)),
            frame: self.frame.unwrap_or(config.frame),
        }
    }
}

/// Output choices of the radar command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadarOutput {
    pub composite: bool,
    pub gif: bool,
    pub keep_frames: bool,
}

/// Render `request` and write the artifacts. Returns the written paths.
pub fn run(
    config: &SpiderwebConfig,
    request: RadarRequest,
    output: RadarOutput,
) -> Result<Vec<PathBuf>> {
    let chart = request.into_chart(config);
    chart.validate().context("Invalid chart request")?;

    let font = LabelFont::load_optional(config.font.as_deref());
    let renderer = RadarRenderer::new(config.render_options()).with_font(font);
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", config.output_dir.display())
    })?;

    if output.composite {
        let image = renderer.render_composite(&chart)?;
        let path = config.output_path(&chart.title, ".png");
        write_png(&path, &image)?;
        info!(path = %path.display(), snapshots = chart.snapshot_count, "Wrote composite chart");
        return Ok(vec![path]);
    }

    let rendered = renderer.render_snapshots(&chart)?;
    let images: Vec<_> = rendered.into_iter().map(|r| r.image).collect();

    if !output.gif {
        let mut written = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            let path = config.output_path(&chart.title, &format!("{}.png", i + 1));
            write_png(&path, image)?;
            written.push(path);
        }
        info!(count = written.len(), dir = %config.output_dir.display(), "Wrote snapshot charts");
        return Ok(written);
    }

    let sequence = FrameSequence::from_images(&images)?;
    let gif_path = config.output_path(&chart.title, ".gif");
    config.gif_assembler().assemble(&sequence, &gif_path)?;

    let mut written = vec![gif_path];
    if output.keep_frames {
        written.extend(sequence.keep_as(&config.output_dir, &file_stem(&chart.title))?);
    }
    Ok(written)
}
