//! Radar chart data model, validation and geometry.
//!
//! Every series is min-max normalized on its own observed range, so series
//! with unrelated units (PM2.5 in µg/m³, wind direction in degrees) share
//! one radial scale. Snapshot `i` takes value `i` of every series and turns
//! it into one closed polygon.

use serde::{Deserialize, Serialize};
use spider_common::{Color, FrameShape, SpiderError, SpiderResult};
use std::f64::consts::PI;
use std::path::Path;

/// Largest accepted line length scale.
pub const MAX_SCALE_LENGTH: f64 = 50.0;

/// Largest number of snapshots one chart request may produce.
pub const MAX_SNAPSHOTS: usize = 400;

/// Alpha of the polygon fill; the outline is always opaque.
pub const FILL_ALPHA: f32 = 0.25;

/// A complete radar chart request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    /// Figure title, also used to name output files
    pub title: String,
    /// One sequence per spoke, in spoke order
    pub series: Vec<Vec<f64>>,
    /// Radius given to the largest value of each series
    pub scale_length: f64,
    /// Number of snapshots (charts) to produce
    pub snapshot_count: usize,
    /// Subtitle of each snapshot
    pub snapshot_titles: Vec<String>,
    /// Label of each spoke
    pub spoke_labels: Vec<String>,
    /// Line color of each snapshot
    #[serde(alias = "colors")]
    pub line_colors: Vec<Color>,
    #[serde(default)]
    pub frame: FrameShape,
}

/// Observed range of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRange {
    pub min: f64,
    pub max: f64,
}

impl SeriesRange {
    /// Range of a series. Returns `None` for an empty series.
    pub fn of(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let (min, max) = values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` inside the range, 0 at the minimum and 1 at the maximum.
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }
}

/// A point in polar chart coordinates.
///
/// `angle` is in radians, measured counterclockwise from north. `radius`
/// is in chart units (0..=scale_length).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    pub angle: f64,
    pub radius: f64,
}

impl PolarPoint {
    /// Pixel position of this point for a chart centered on `(cx, cy)` where
    /// one chart unit spans `pixels_per_unit` pixels. Image y grows downward.
    pub fn to_pixel(&self, cx: f32, cy: f32, pixels_per_unit: f32) -> (f32, f32) {
        let r = self.radius as f32 * pixels_per_unit;
        let a = self.angle as f32;
        (cx - r * a.sin(), cy - r * a.cos())
    }
}

/// Geometry of one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub index: usize,
    pub title: String,
    pub color: Color,
    /// Radius per spoke, in spoke order
    pub radii: Vec<f64>,
    /// Polygon vertices, first vertex repeated at the end
    pub points: Vec<PolarPoint>,
}

impl Snapshot {
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }
}

/// Angles of `n` evenly spaced spokes, the first one at north.
pub fn spoke_angles(n: usize) -> Vec<f64> {
    let step = 2.0 * PI / n as f64;
    (0..n).map(|k| k as f64 * step).collect()
}

/// Join radii to spoke angles and close the polygon.
///
/// The first vertex is always appended again at the end, whatever the
/// caller passes in.
pub fn closed_polygon(radii: &[f64]) -> Vec<PolarPoint> {
    let mut points: Vec<PolarPoint> = spoke_angles(radii.len())
        .into_iter()
        .zip(radii)
        .map(|(angle, &radius)| PolarPoint { angle, radius })
        .collect();

    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Parse the string-named fields of a raw request through their `FromStr`
/// impls so a bad name keeps its typed error.
fn check_named_fields(value: &serde_json::Value) -> SpiderResult<()> {
    if let Some(frame) = value.get("frame").and_then(|v| v.as_str()) {
        frame.parse::<FrameShape>()?;
    }
    for key in ["line_colors", "colors"] {
        let names = value.get(key).and_then(|v| v.as_array());
        for name in names.into_iter().flatten().filter_map(|v| v.as_str()) {
            name.parse::<Color>()?;
        }
    }
    Ok(())
}

impl RadarChart {
    /// Load a chart request from a JSON string.
    ///
    /// An unknown frame shape or color name is reported as the matching
    /// validation error rather than a parse failure.
    pub fn from_json(json: &str) -> SpiderResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        check_named_fields(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Load a chart request from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> SpiderResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn spoke_count(&self) -> usize {
        self.series.len()
    }

    /// Check every precondition of the chart request.
    ///
    /// Runs before anything is drawn, so a rejected request never leaves
    /// partial output behind.
    pub fn validate(&self) -> SpiderResult<()> {
        if self.series.is_empty() {
            return Err(SpiderError::NoSeries);
        }
        if self.spoke_labels.len() != self.series.len() {
            return Err(SpiderError::SpokeLabelMismatch {
                series: self.series.len(),
                labels: self.spoke_labels.len(),
            });
        }
        // NaN fails both comparisons and is rejected here too
        if !(self.scale_length > 0.0 && self.scale_length <= MAX_SCALE_LENGTH) {
            return Err(SpiderError::ScaleLengthOutOfRange(self.scale_length));
        }
        if self.snapshot_count == 0 || self.snapshot_count > MAX_SNAPSHOTS {
            return Err(SpiderError::SnapshotCountOutOfRange(self.snapshot_count));
        }
        if self.snapshot_titles.len() != self.snapshot_count {
            return Err(SpiderError::SnapshotTitleMismatch {
                expected: self.snapshot_count,
                actual: self.snapshot_titles.len(),
            });
        }
        if self.line_colors.len() != self.snapshot_count {
            return Err(SpiderError::LineColorMismatch {
                expected: self.snapshot_count,
                actual: self.line_colors.len(),
            });
        }

        for (k, values) in self.series.iter().enumerate() {
            if values.len() < self.snapshot_count {
                return Err(SpiderError::SeriesTooShort {
                    series: k,
                    len: values.len(),
                    required: self.snapshot_count,
                });
            }
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(SpiderError::NonFiniteValue { series: k, index });
            }
            // Non-empty is guaranteed by the length check above
            if let Some(range) = SeriesRange::of(values) {
                if range.span() <= 0.0 {
                    return Err(SpiderError::DegenerateSeries {
                        series: k,
                        value: range.min,
                    });
                }
                if !range.span().is_finite() {
                    return Err(SpiderError::RangeOverflow {
                        series: k,
                        min: range.min,
                        max: range.max,
                    });
                }
            }
        }

        Ok(())
    }

    /// Ranges of all series. Only meaningful after `validate` succeeded.
    fn ranges(&self) -> Vec<SeriesRange> {
        self.series
            .iter()
            .filter_map(|values| SeriesRange::of(values))
            .collect()
    }

    /// Validate the request and compute the geometry of every snapshot, in
    /// snapshot order.
    pub fn snapshots(&self) -> SpiderResult<Vec<Snapshot>> {
        self.validate()?;

        let ranges = self.ranges();
        let snapshots = (0..self.snapshot_count)
            .map(|i| {
                let radii: Vec<f64> = self
                    .series
                    .iter()
                    .zip(&ranges)
                    .map(|(values, range)| self.scale_length * range.normalize(values[i]))
                    .collect();

                Snapshot {
                    index: i,
                    title: self.snapshot_titles[i].clone(),
                    color: self.line_colors[i],
                    points: closed_polygon(&radii),
                    radii,
                }
            })
            .collect();

        Ok(snapshots)
    }
}
