//! Text rendering for chart titles and spoke labels.
//!
//! No font is bundled. Callers load a TrueType font from disk; without one,
//! charts are still drawn but carry no text.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};
use spider_common::{Color, SpiderError, SpiderResult};
use std::path::Path;

/// A TrueType font used for chart text.
#[derive(Clone)]
pub struct LabelFont {
    font: Font<'static>,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl LabelFont {
    /// Parse a font from raw TrueType bytes.
    pub fn from_bytes(data: Vec<u8>) -> SpiderResult<Self> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| SpiderError::RenderError("Failed to parse font data".to_string()))?;
        Ok(Self { font })
    }

    /// Load a font from a `.ttf` file.
    pub fn from_file(path: impl AsRef<Path>) -> SpiderResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            SpiderError::Io(format!("Failed to read font {}: {}", path.display(), e))
        })?;
        Self::from_bytes(data)
    }

    /// Load a font if a path is configured, logging and continuing without
    /// text when it cannot be read.
    pub fn load_optional(path: Option<&Path>) -> Option<Self> {
        let path = path?;
        match Self::from_file(path) {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load label font, charts will have no text"
                );
                None
            }
        }
    }

    /// Pixel width and height of `text` at `size`.
    pub fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let (w, h) = text_size(Scale::uniform(size), &self.font, text);
        (w as f32, h as f32)
    }
}

/// Where a label sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Anchor point is the center of the text box
    Center,
    /// Anchor point is the middle of the left edge
    Left,
    /// Anchor point is the middle of the right edge
    Right,
}

/// A piece of text queued for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub size: f32,
    pub color: Color,
    pub anchor: Anchor,
}

impl TextLabel {
    pub fn centered(x: f32, y: f32, text: impl Into<String>, size: f32) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            size,
            color: Color::BLACK,
            anchor: Anchor::Center,
        }
    }

    /// Anchor chosen from the horizontal direction of a spoke so labels
    /// grow away from the chart.
    pub fn for_spoke(x: f32, y: f32, text: impl Into<String>, size: f32, dx: f32) -> Self {
        let anchor = if dx > 0.1 {
            Anchor::Left
        } else if dx < -0.1 {
            Anchor::Right
        } else {
            Anchor::Center
        };
        Self {
            anchor,
            ..Self::centered(x, y, text, size)
        }
    }
}

/// Draw queued labels onto an image. Labels are skipped without a font.
pub fn draw_labels(img: &mut RgbaImage, font: Option<&LabelFont>, labels: &[TextLabel]) {
    let Some(font) = font else {
        if !labels.is_empty() {
            tracing::debug!(count = labels.len(), "No label font configured, skipping text");
        }
        return;
    };

    for label in labels {
        if label.text.is_empty() {
            continue;
        }
        let (w, h) = font.measure(&label.text, label.size);
        let left = match label.anchor {
            Anchor::Center => label.x - w / 2.0,
            Anchor::Left => label.x,
            Anchor::Right => label.x - w,
        };
        let top = label.y - h / 2.0;

        draw_text_mut(
            img,
            Rgba(label.color.to_rgba8()),
            left.round() as i32,
            top.round() as i32,
            Scale::uniform(label.size),
            &font.font,
            &label.text,
        );
    }
}
