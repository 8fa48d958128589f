//! Ordered frames backed by a temporary directory.

use image::RgbaImage;
use spider_common::{SpiderError, SpiderResult};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Frames in generation order, stored as `frame_0000.png`, `frame_0001.png`, ...
#[derive(Debug)]
pub struct FrameSequence {
    dir: TempDir,
    paths: Vec<PathBuf>,
    dimensions: Option<(u32, u32)>,
}

impl FrameSequence {
    pub fn new() -> SpiderResult<Self> {
        let dir = tempfile::Builder::new().prefix("spiderweb-frames").tempdir()?;
        tracing::debug!(dir = %dir.path().display(), "Created frame directory");
        Ok(Self {
            dir,
            paths: Vec::new(),
            dimensions: None,
        })
    }

    /// Build a sequence from already rendered images, in order.
    pub fn from_images<'a>(images: impl IntoIterator<Item = &'a RgbaImage>) -> SpiderResult<Self> {
        let mut sequence = Self::new()?;
        for image in images {
            sequence.push(image)?;
        }
        Ok(sequence)
    }

    /// Append a frame. Every frame must match the size of the first one.
    pub fn push(&mut self, image: &RgbaImage) -> SpiderResult<&Path> {
        let (width, height) = image.dimensions();
        let index = self.paths.len();
        match self.dimensions {
            Some((w, h)) if (w, h) != (width, height) => {
                return Err(SpiderError::FrameSizeMismatch {
                    index,
                    width: w,
                    height: h,
                    actual_width: width,
                    actual_height: height,
                });
            }
            Some(_) => {}
            None => self.dimensions = Some((width, height)),
        }

        let path = self.dir.path().join(format!("frame_{:04}.png", index));
        renderer::write_png(&path, image)?;
        self.paths.push(path);
        Ok(&self.paths[index])
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Size shared by every frame, once one has been pushed.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// Frame files, in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Load frame `index` back from disk.
    pub fn load(&self, index: usize) -> SpiderResult<RgbaImage> {
        let path = self.paths.get(index).ok_or_else(|| {
            SpiderError::Io(format!("Frame {} out of range ({} frames)", index, self.len()))
        })?;
        let image = image::open(path)
            .map_err(|e| SpiderError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Ok(image.to_rgba8())
    }

    /// Copy the frames to `dir` as `<title>1.png`, `<title>2.png`, ...
    pub fn keep_as(&self, dir: impl AsRef<Path>, title: &str) -> SpiderResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let kept = self
            .paths
            .iter()
            .enumerate()
            .map(|(i, from)| {
                let to = dir.join(format!("{}{}.png", title, i + 1));
                std::fs::copy(from, &to)?;
                Ok(to)
            })
            .collect::<SpiderResult<Vec<_>>>()?;

        tracing::info!(dir = %dir.display(), count = kept.len(), "Kept still frames");
        Ok(kept)
    }
}
