//! Growing line-chart frames for time-series animations.
//!
//! Frame `j` shows one more sample than frame `j - 1`. With a window the x
//! range slides right once the plotted samples no longer fit.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use spider_common::{Color, SpiderError, SpiderResult};

use crate::canvas::{self, new_pixmap, pixmap_to_image};

/// Headroom added above the maximum and below the minimum, as a fraction
/// of their magnitude.
const Y_MARGIN: f64 = 0.2;

/// Configuration for time-series frame generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesConfig {
    /// Index of the first plotted step
    pub start: usize,
    /// Index of the last plotted step (inclusive)
    pub end: usize,
    /// Width of the visible x range, or the whole series when unset
    pub window: Option<usize>,
    pub width: u32,
    pub height: u32,
    pub line_color: Color,
    pub line_width: f32,
}

impl Default for TimeseriesConfig {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            window: None,
            width: 640,
            height: 480,
            line_color: Color::rgb(31, 119, 180),
            line_width: 1.5,
        }
    }
}

/// What a single frame shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameWindow {
    /// Number of leading samples plotted
    pub visible: usize,
    pub x_min: f64,
    pub x_max: f64,
}

/// Vertical axis limits for `data`.
pub fn y_limits(data: &[f64]) -> Option<(f64, f64)> {
    let first = *data.first()?;
    let (min, max) = data
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let lo = min - min.abs() * Y_MARGIN;
    let hi = max + max.abs() * Y_MARGIN;
    if hi > lo {
        Some((lo, hi))
    } else {
        Some((lo - 1.0, hi + 1.0))
    }
}

/// Frame windows for a series of `len` samples.
pub fn frame_windows(len: usize, config: &TimeseriesConfig) -> SpiderResult<Vec<FrameWindow>> {
    if len == 0 {
        return Err(SpiderError::InvalidTimeseries("series is empty".to_string()));
    }
    if config.start > config.end {
        return Err(SpiderError::InvalidTimeseries(format!(
            "start {} is after end {}",
            config.start, config.end
        )));
    }
    if config.end >= len {
        return Err(SpiderError::InvalidTimeseries(format!(
            "end {} is past the last sample {}",
            config.end,
            len - 1
        )));
    }
    if config.window == Some(0) {
        return Err(SpiderError::InvalidTimeseries("window must be at least 1".to_string()));
    }

    let windows = (0..=config.end - config.start)
        .map(|j| {
            let visible = (config.start + 1 + j).min(len);
            match config.window {
                Some(window) => {
                    let x_min = (config.start + (j + 1).saturating_sub(window)) as f64;
                    FrameWindow {
                        visible,
                        x_min,
                        x_max: x_min + window as f64,
                    }
                }
                None => FrameWindow {
                    visible,
                    x_min: 0.0,
                    x_max: (len - 1).max(1) as f64,
                },
            }
        })
        .collect();

    Ok(windows)
}

/// Render every frame of the animation, in order.
pub fn render_frames(data: &[f64], config: &TimeseriesConfig) -> SpiderResult<Vec<RgbaImage>> {
    if let Some(index) = data.iter().position(|v| !v.is_finite()) {
        return Err(SpiderError::InvalidTimeseries(format!(
            "non-finite value at index {}",
            index
        )));
    }
    let windows = frame_windows(data.len(), config)?;
    let (y_min, y_max) = y_limits(data)
        .ok_or_else(|| SpiderError::InvalidTimeseries("series is empty".to_string()))?;

    tracing::debug!(frames = windows.len(), y_min, y_max, "Rendering time-series frames");

    windows
        .iter()
        .map(|w| render_frame(data, w, (y_min, y_max), config))
        .collect()
}

fn render_frame(
    data: &[f64],
    window: &FrameWindow,
    (y_min, y_max): (f64, f64),
    config: &TimeseriesConfig,
) -> SpiderResult<RgbaImage> {
    let mut pixmap = new_pixmap(config.width, config.height, Some(Color::WHITE))?;

    let left = config.width as f32 * 0.1;
    let right = config.width as f32 * 0.95;
    let top = config.height as f32 * 0.08;
    let bottom = config.height as f32 * 0.9;

    let to_pixel = |x: f64, y: f64| -> (f32, f32) {
        let tx = ((x - window.x_min) / (window.x_max - window.x_min)) as f32;
        let ty = ((y - y_min) / (y_max - y_min)) as f32;
        (left + tx * (right - left), bottom - ty * (bottom - top))
    };

    for step in 1..5 {
        let y = top + (bottom - top) * step as f32 / 5.0;
        canvas::line(&mut pixmap, (left, y), (right, y), Color::GRID.with_alpha(0.5), 0.8);
    }

    // Only samples inside the x range, plus one neighbor on each side so the
    // line reaches the axes
    let first = (window.x_min.floor() as usize).saturating_sub(1);
    let last = ((window.x_max.ceil() as usize) + 1).min(window.visible);
    let points: Vec<(f32, f32)> = (first..last)
        .map(|i| to_pixel(i as f64, data[i]))
        .collect();

    if points.len() >= 2 {
        let clip = plot_area_mask(config.width, config.height, (left, top, right, bottom));

        if let Some(path) = canvas::polyline_path(&points, false) {
            pixmap.stroke_path(
                &path,
                &canvas::paint(config.line_color),
                &canvas::stroke(config.line_width),
                tiny_skia::Transform::identity(),
                clip.as_ref(),
            );
        }
    }

    if let Some(frame) = canvas::polyline_path(
        &[(left, top), (right, top), (right, bottom), (left, bottom)],
        true,
    ) {
        canvas::outline(&mut pixmap, &frame, Color::BLACK, 1.0);
    }

    pixmap_to_image(&pixmap)
}

/// Mask that keeps strokes inside the axes box.
fn plot_area_mask(
    width: u32,
    height: u32,
    (left, top, right, bottom): (f32, f32, f32, f32),
) -> Option<tiny_skia::Mask> {
    let rect = tiny_skia::Rect::from_ltrb(left, top, right, bottom)?;
    let path = tiny_skia::PathBuilder::from_rect(rect);
    let mut mask = tiny_skia::Mask::new(width, height)?;
    mask.fill_path(
        &path,
        tiny_skia::FillRule::Winding,
        false,
        tiny_skia::Transform::identity(),
    );
    Some(mask)
}
