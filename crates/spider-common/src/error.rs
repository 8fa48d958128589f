//! Error types for spiderweb chart generation.

use thiserror::Error;

/// Result type alias using SpiderError.
pub type SpiderResult<T> = Result<T, SpiderError>;

/// Primary error type for chart validation, rendering and assembly.
#[derive(Debug, Error)]
pub enum SpiderError {
    // === Chart Validation Errors ===
    #[error("At least one series is required to draw a radar chart")]
    NoSeries,

    #[error("Spoke label count ({labels}) does not match series count ({series})")]
    SpokeLabelMismatch { series: usize, labels: usize },

    #[error("Snapshot title count ({actual}) does not match snapshot count ({expected})")]
    SnapshotTitleMismatch { expected: usize, actual: usize },

    #[error("Line color count ({actual}) does not match snapshot count ({expected})")]
    LineColorMismatch { expected: usize, actual: usize },

    #[error("Scale length must be greater than 0 and at most 50, got {0}")]
    ScaleLengthOutOfRange(f64),

    #[error("Snapshot count must be greater than 0 and at most 400, got {0}")]
    SnapshotCountOutOfRange(usize),

    #[error("Series {series} has {len} values but {required} snapshots were requested")]
    SeriesTooShort {
        series: usize,
        len: usize,
        required: usize,
    },

    #[error("Series {series} contains a non-finite value at index {index}")]
    NonFiniteValue { series: usize, index: usize },

    #[error("Series {series} has no range to normalize (every value is {value})")]
    DegenerateSeries { series: usize, value: f64 },

    #[error("Series {series} spans {min} to {max}, which overflows the normalization range")]
    RangeOverflow { series: usize, min: f64, max: f64 },

    #[error("Unknown frame shape '{0}', expected 'circle' or 'polygon'")]
    InvalidFrameShape(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid time-series request: {0}")]
    InvalidTimeseries(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Image encoding failed: {0}")]
    EncodeError(String),

    // === Animation Errors ===
    #[error("Cannot assemble an animation without frames")]
    NoFrames,

    #[error("Frame {index} is {actual_width}x{actual_height}, expected {width}x{height}")]
    FrameSizeMismatch {
        index: usize,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),
}

impl SpiderError {
    /// Whether this error is a rejected precondition (raised before any output).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SpiderError::NoSeries
                | SpiderError::SpokeLabelMismatch { .. }
                | SpiderError::SnapshotTitleMismatch { .. }
                | SpiderError::LineColorMismatch { .. }
                | SpiderError::ScaleLengthOutOfRange(_)
                | SpiderError::SnapshotCountOutOfRange(_)
                | SpiderError::SeriesTooShort { .. }
                | SpiderError::NonFiniteValue { .. }
                | SpiderError::DegenerateSeries { .. }
                | SpiderError::RangeOverflow { .. }
                | SpiderError::InvalidFrameShape(_)
                | SpiderError::InvalidColor(_)
                | SpiderError::InvalidTimeseries(_)
                | SpiderError::InvalidDimensions { .. }
        )
    }
}

impl From<std::io::Error> for SpiderError {
    fn from(err: std::io::Error) -> Self {
        SpiderError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpiderError {
    fn from(err: serde_json::Error) -> Self {
        SpiderError::Io(format!("JSON error: {}", err))
    }
}
