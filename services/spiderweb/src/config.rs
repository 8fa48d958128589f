//! Spiderweb configuration.
//!
//! Values come from an optional YAML file, then environment variables
//! (a `.env` file is honored by the caller through dotenvy).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spider_common::{FrameShape, Palette};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use animation::GifAssembler;
use renderer::RenderOptions;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiderwebConfig {
    /// Size of one chart image, in pixels
    pub width: u32,
    pub height: u32,

    /// Leave chart backgrounds transparent
    pub transparent: bool,

    /// TrueType font for titles and spoke labels; text is skipped without one
    pub font: Option<PathBuf>,

    /// Frame shape used when a request does not name one
    pub frame: FrameShape,

    /// Line length scale used when a request does not give one
    pub scale_length: f64,

    /// Snapshot colors, cycled when a request does not list its own
    pub palette: Palette,

    /// Directory all artifacts are written to
    pub output_dir: PathBuf,

    pub gif: GifConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GifConfig {
    /// Time each frame is shown (milliseconds)
    pub frame_delay_ms: u64,
    /// Loop the animation forever
    pub repeat: bool,
    /// Palette quantizer speed, 1 (best colors) to 30 (fastest)
    pub quantizer_speed: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Extent of the background image, `[min_lon, min_lat, max_lon, max_lat]`
    pub bbox: [f64; 4],
    /// Side of each station chart on the map, in pixels
    pub icon_size: u32,
}

impl Default for SpiderwebConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            transparent: false,
            font: None,
            frame: FrameShape::Circle,
            scale_length: 4.0,
            palette: Palette::default(),
            output_dir: PathBuf::from("output"),
            gif: GifConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl Default for GifConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 500,
            repeat: true,
            quantizer_speed: 10,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            bbox: [-100.65, 25.45, -100.05, 25.85],
            icon_size: 96,
        }
    }
}

impl SpiderwebConfig {
    /// Load from `path` when given, otherwise start from defaults, then
    /// apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Override fields from `SPIDERWEB_*` variables found through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("SPIDERWEB_WIDTH") {
            self.width = v.parse().context("SPIDERWEB_WIDTH must be an integer")?;
        }
        if let Some(v) = lookup("SPIDERWEB_HEIGHT") {
            self.height = v.parse().context("SPIDERWEB_HEIGHT must be an integer")?;
        }
        if let Some(v) = lookup("SPIDERWEB_FONT") {
            self.font = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("SPIDERWEB_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("SPIDERWEB_FRAME_DELAY_MS") {
            self.gif.frame_delay_ms = v
                .parse()
                .context("SPIDERWEB_FRAME_DELAY_MS must be an integer")?;
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            height: self.height,
            transparent: self.transparent,
            ..RenderOptions::default()
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.gif.frame_delay_ms)
    }

    /// Path of the artifact `<name><suffix>` inside `output_dir`.
    pub fn output_path(&self, name: &str, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}{}", file_stem(name), suffix))
    }

    pub fn gif_assembler(&self) -> GifAssembler {
        GifAssembler::new(self.frame_delay(), self.gif.repeat).with_speed(self.gif.quantizer_speed)
    }
}

/// `name` as a single file name component. Path separators and characters
/// that are unsafe in file names become `_`, and a name made only of dots
/// becomes `chart`.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.trim().trim_matches('.').is_empty() {
        "chart".to_string()
    } else {
        stem
    }
}
