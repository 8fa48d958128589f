//! `spiderweb timeseries`: a growing line chart animation from one CSV column.

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use animation::FrameSequence;
use renderer::{render_frames, TimeseriesConfig};

use crate::config::SpiderwebConfig;

/// Inputs of the timeseries command.
#[derive(Debug, Clone)]
pub struct TimeseriesRequest {
    pub input: PathBuf,
    /// Column header, or zero-based column index
    pub column: String,
    pub start: usize,
    pub end: usize,
    pub window: Option<usize>,
}

/// Read one numeric column. Empty cells are skipped.
pub fn read_column<R: Read>(source: R, column: &str) -> Result<Vec<f64>> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let index = match headers.iter().position(|h| h == column) {
        Some(index) => index,
        None => match column.parse::<usize>() {
            Ok(index) if index < headers.len() => index,
            _ => bail!("CSV has no column '{}'", column),
        },
    };

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("CSV row {}", row))?;
        let cell = record.get(index).unwrap_or("").trim();
        if cell.is_empty() {
            continue;
        }
        let value: f64 = cell
            .parse()
            .with_context(|| format!("Row {}, column '{}': '{}' is not a number", row, column, cell))?;
        values.push(value);
    }
    Ok(values)
}

/// Render the animation and return the written GIF path.
pub fn run(config: &SpiderwebConfig, request: &TimeseriesRequest) -> Result<PathBuf> {
    let file = std::fs::File::open(&request.input)
        .with_context(|| format!("Failed to open {}", request.input.display()))?;
    let data = read_column(file, &request.column)?;

    let ts_config = TimeseriesConfig {
        start: request.start,
        end: request.end,
        window: request.window,
        width: config.width,
        height: config.height,
        ..TimeseriesConfig::default()
    };
    let frames = render_frames(&data, &ts_config)?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", config.output_dir.display())
    })?;
    let stem = Path::new(&request.input)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "timeseries".to_string());
    let out = config.output_path(&format!("{}_{}", stem, request.column), ".gif");

    let sequence = FrameSequence::from_images(&frames)?;
    config.gif_assembler().assemble(&sequence, &out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{temp_test_dir, write_fixture, READINGS_CSV};

    #[test]
    fn test_read_column_by_name_and_index() {
        let by_name = read_column(READINGS_CSV.as_bytes(), "PM10").unwrap();
        let by_index = read_column(READINGS_CSV.as_bytes(), "3").unwrap();
        assert_eq!(by_name, by_index);
        assert_eq!(by_name.len(), 10);
        assert_eq!(by_name[0], 4.0);
    }

    #[test]
    fn test_read_column_skips_empty_cells() {
        assert_eq!(read_column(READINGS_CSV.as_bytes(), "NO2").unwrap().len(), 8);
    }

    #[test]
    fn test_unknown_column() {
        assert!(read_column(READINGS_CSV.as_bytes(), "SO2").is_err());
        assert!(read_column(READINGS_CSV.as_bytes(), "42").is_err());
    }

    #[test]
    fn test_run_writes_gif() {
        let dir = temp_test_dir();
        let config = SpiderwebConfig {
            width: 80,
            height: 60,
            output_dir: dir.path().join("out"),
            ..SpiderwebConfig::default()
        };
        let request = TimeseriesRequest {
            input: write_fixture(dir.path(), "filled.csv", READINGS_CSV),
            column: "NOX".to_string(),
            start: 1,
            end: 8,
            window: Some(4),
        };
        let out = run(&config, &request).unwrap();
        assert_eq!(out, dir.path().join("out/filled_NOX.gif"));
        assert!(out.exists());
    }

    #[test]
    fn test_end_past_data_fails() {
        let dir = temp_test_dir();
        let config = SpiderwebConfig {
            output_dir: dir.path().join("out"),
            ..SpiderwebConfig::default()
        };
        let request = TimeseriesRequest {
            input: write_fixture(dir.path(), "filled.csv", READINGS_CSV),
            column: "NOX".to_string(),
            start: 0,
            end: 10,
            window: None,
        };
        assert!(run(&config, &request).is_err());
    }
}
