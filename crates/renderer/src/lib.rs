//! Raster rendering for spiderweb charts.
//!
//! - Radar chart geometry and validation
//! - Composite and per-snapshot layouts
//! - Growing time-series frames
//! - Map overlays of per-station charts
//! - PNG encoding

pub mod canvas;
pub mod chart;
pub mod layout;
pub mod overlay;
pub mod png;
pub mod radar;
pub mod text;
pub mod timeseries;

pub use chart::{RadarRenderer, RenderOptions, RenderedSnapshot};
pub use layout::{GridLayout, LayoutMode};
pub use overlay::{GeoBounds, MapOverlay, StationIcon};
pub use png::{encode_png, write_png};
pub use radar::{RadarChart, SeriesRange, Snapshot};
pub use text::LabelFont;
pub use timeseries::{render_frames, TimeseriesConfig};
