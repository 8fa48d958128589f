//! `spiderweb map`: per-station spider charts over a map, one frame per hour.

use anyhow::{bail, Context, Result};
use image::RgbaImage;
use spider_common::FrameShape;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use animation::FrameSequence;
use ingestion::{HourlyDataset, HourlySeries, Pollutant};
use renderer::text::LabelFont;
use renderer::{GeoBounds, MapOverlay, RadarChart, RadarRenderer, StationIcon};

use crate::config::SpiderwebConfig;

/// Inputs of the map command.
#[derive(Debug, Clone)]
pub struct MapRequest {
    pub readings: PathBuf,
    pub stations: PathBuf,
    pub day: String,
    pub background: PathBuf,
    pub keep_frames: bool,
}

/// Chart of one hour: series are pollutants, snapshots are stations.
fn hour_chart(
    config: &SpiderwebConfig,
    dataset: &HourlyDataset,
    index: usize,
    hour: &HourlySeries,
) -> RadarChart {
    let stations = dataset.station_names();
    RadarChart {
        title: format!("hour{}_", index + 1),
        series: hour.series.clone(),
        scale_length: config.scale_length,
        snapshot_count: stations.len(),
        line_colors: config.palette.cycle(stations.len()),
        snapshot_titles: stations,
        spoke_labels: dataset.spoke_labels(),
        frame: FrameShape::Polygon,
    }
}

/// Compose one map frame per hour of `dataset`. Hours whose charts fail
/// validation are skipped.
pub fn render_map_frames(
    config: &SpiderwebConfig,
    dataset: &HourlyDataset,
    background: &RgbaImage,
) -> Result<Vec<RgbaImage>> {
    let mut options = config.render_options();
    options.transparent = true;
    let font = LabelFont::load_optional(config.font.as_deref());
    let renderer = RadarRenderer::new(options).with_font(font);
    let overlay = MapOverlay::new(GeoBounds::new(config.map.bbox), config.map.icon_size);

    let mut frames = Vec::with_capacity(dataset.hours.len());
    for (index, hour) in dataset.hours.iter().enumerate() {
        let chart = hour_chart(config, dataset, index, hour);
        let rendered = match renderer.render_snapshots(&chart) {
            Ok(rendered) => rendered,
            Err(e) if e.is_validation() => {
                warn!(hour = %hour.hour, error = %e, "Skipping hour");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let icons: Vec<StationIcon> = rendered
            .into_iter()
            .zip(&dataset.stations)
            .map(|(r, station)| StationIcon {
                station: station.station.clone(),
                lon: station.lon,
                lat: station.lat,
                image: r.image,
            })
            .collect();

        frames.push(overlay.compose(background, &icons));
        info!(hour = %hour.hour, stations = icons.len(), "Composed map frame");
    }

    Ok(frames)
}

fn load_background(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open background image: {}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Run the whole map pipeline and return the written paths.
pub fn run(config: &SpiderwebConfig, request: &MapRequest) -> Result<Vec<PathBuf>> {
    let readings = ingestion::read_readings(&request.readings)
        .with_context(|| format!("Failed to load readings: {}", request.readings.display()))?;
    let stations = ingestion::read_stations(&request.stations)
        .with_context(|| format!("Failed to load stations: {}", request.stations.display()))?;
    let dataset = HourlyDataset::build(&readings, &stations, &request.day, &Pollutant::ALL)?;
    if dataset.hours.is_empty() {
        bail!("No hour of {} has readings for every pollutant", request.day);
    }

    let background = load_background(&request.background)?;
    let frames = render_map_frames(config, &dataset, &background)?;
    if frames.is_empty() {
        bail!("Every hour of {} was skipped", request.day);
    }

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", config.output_dir.display())
    })?;

    let sequence = FrameSequence::from_images(&frames)?;
    let gif_path = config.output_path(&request.day, ".gif");
    config.gif_assembler().assemble(&sequence, &gif_path)?;

    let mut written = vec![gif_path];
    if request.keep_frames {
        written.extend(sequence.keep_as(&config.output_dir, "map")?);
    }
    Ok(written)
}
