//! Animated GIF assembly.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use spider_common::{SpiderError, SpiderResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::frames::FrameSequence;

/// Encodes frames into an animated GIF, preserving their order.
#[derive(Debug, Clone, PartialEq)]
pub struct GifAssembler {
    /// How long each frame stays on screen
    pub frame_delay: Duration,
    /// Loop forever instead of playing once
    pub repeat: bool,
    /// NeuQuant sampling speed, 1 (best palette) to 30 (fastest)
    pub speed: i32,
}

/// Quantizer speed used unless a caller picks another.
pub const DEFAULT_SPEED: i32 = 10;

impl Default for GifAssembler {
    fn default() -> Self {
        Self {
            frame_delay: Duration::from_millis(500),
            repeat: true,
            speed: DEFAULT_SPEED,
        }
    }
}

impl GifAssembler {
    pub fn new(frame_delay: Duration, repeat: bool) -> Self {
        Self {
            frame_delay,
            repeat,
            speed: DEFAULT_SPEED,
        }
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed.clamp(1, 30);
        self
    }

    /// Encode every frame of `sequence` to `out`.
    pub fn assemble(&self, sequence: &FrameSequence, out: impl AsRef<Path>) -> SpiderResult<()> {
        if sequence.is_empty() {
            return Err(SpiderError::NoFrames);
        }
        let frames = (0..sequence.len())
            .map(|i| sequence.load(i))
            .collect::<SpiderResult<Vec<_>>>()?;
        self.assemble_images(&frames, out)
    }

    /// Encode in-memory frames to `out`.
    pub fn assemble_images(&self, frames: &[RgbaImage], out: impl AsRef<Path>) -> SpiderResult<()> {
        let out = out.as_ref();
        let bytes = self.encode(frames)?;
        let mut writer = BufWriter::new(File::create(out)?);
        writer.write_all(&bytes)?;
        writer.flush()?;

        tracing::info!(
            path = %out.display(),
            frames = frames.len(),
            delay_ms = self.frame_delay.as_millis() as u64,
            "Wrote GIF"
        );
        Ok(())
    }

    /// Encode frames into GIF bytes.
    pub fn encode(&self, frames: &[RgbaImage]) -> SpiderResult<Vec<u8>> {
        let first = frames.first().ok_or(SpiderError::NoFrames)?;
        let (width, height) = first.dimensions();
        if let Some((index, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.dimensions() != (width, height))
        {
            return Err(SpiderError::FrameSizeMismatch {
                index,
                width,
                height,
                actual_width: frame.width(),
                actual_height: frame.height(),
            });
        }

        let encode_err = |e: image::ImageError| SpiderError::EncodeError(format!("GIF: {}", e));
        let delay = Delay::from_saturating_duration(self.frame_delay);

        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut bytes, self.speed.clamp(1, 30));
            if self.repeat {
                encoder.set_repeat(Repeat::Infinite).map_err(encode_err)?;
            }
            for frame in frames {
                encoder
                    .encode_frame(Frame::from_parts(frame.clone(), 0, 0, delay))
                    .map_err(encode_err)?;
            }
        }
        Ok(bytes)
    }
}
