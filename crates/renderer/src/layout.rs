//! Figure layout for radar charts.
//!
//! A chart request is drawn either as one image per snapshot or as one
//! figure holding every snapshot in a grid. The grid has 2 rows when the
//! snapshot count is even and a single row otherwise.

use serde::{Deserialize, Serialize};

/// How the snapshots of a chart are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// One image per snapshot
    #[default]
    Separate,
    /// All snapshots as subplots of one figure
    Composite,
}

/// Rows and columns of a composite figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
}

/// Pixel rectangle of one subplot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CellRect {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

impl GridLayout {
    /// Grid for `count` snapshots: 2 rows when even, else 1 row.
    pub fn for_snapshots(count: usize) -> Self {
        let rows = if count % 2 == 0 && count > 0 { 2 } else { 1 };
        Self {
            rows,
            cols: count.max(1).div_ceil(rows),
        }
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major rectangle of subplot `index` inside a `width` x `height`
    /// area whose top `header` pixels are reserved for the figure title.
    pub fn cell_rect(&self, index: usize, width: u32, height: u32, header: f32) -> CellRect {
        let row = index / self.cols;
        let col = index % self.cols;
        let cell_width = width as f32 / self.cols as f32;
        let cell_height = (height as f32 - header).max(0.0) / self.rows as f32;

        CellRect {
            x: col as f32 * cell_width,
            y: header + row as f32 * cell_height,
            width: cell_width,
            height: cell_height,
        }
    }
}
