//! Spiderweb command-line tool.
//!
//! Renders radar charts of sensor data, map overlays of per-station charts
//! and growing time-series animations.

mod config;
mod map;
mod radar;
mod timeseries;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::SpiderwebConfig;

#[derive(Parser, Debug)]
#[command(name = "spiderweb")]
#[command(about = "Radar charts and animations of environmental sensor data")]
struct Args {
    /// Configuration file path (YAML)
    #[arg(short, long, global = true, env = "SPIDERWEB_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render spider charts from a JSON chart request
    Radar {
        /// Chart request file
        #[arg(short, long)]
        input: PathBuf,

        /// Draw every snapshot into one figure
        #[arg(long, conflicts_with = "gif")]
        composite: bool,

        /// Assemble the snapshots into an animated GIF
        #[arg(long)]
        gif: bool,

        /// Also write the GIF's still frames
        #[arg(long, requires = "gif")]
        keep_frames: bool,
    },

    /// Overlay per-station spider charts on a map, one frame per hour
    Map {
        /// Hourly readings CSV
        #[arg(long)]
        readings: PathBuf,

        /// Station coordinates CSV (station,lat,lon)
        #[arg(long)]
        stations: PathBuf,

        /// Day prefix of the timestamps to use, e.g. 01-Mar-20
        #[arg(long)]
        day: String,

        /// Map background image covering the configured bounding box
        #[arg(long)]
        background: PathBuf,

        /// Also write the still map frames
        #[arg(long)]
        keep_frames: bool,
    },

    /// Animate one CSV column as a growing line chart
    Timeseries {
        /// Input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Column header or zero-based index
        #[arg(long)]
        column: String,

        /// First plotted step
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Last plotted step (inclusive)
        #[arg(long)]
        end: usize,

        /// Width of the sliding x range
        #[arg(long)]
        window: Option<usize>,
    },
}

fn init_logging(log_level: &str, format: LogFormat) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    match format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.log_format)?;

    let config = SpiderwebConfig::load(args.config.as_deref())?;
    info!(
        width = config.width,
        height = config.height,
        output_dir = %config.output_dir.display(),
        "Loaded configuration"
    );

    match args.command {
        Command::Radar {
            input,
            composite,
            gif,
            keep_frames,
        } => {
            let request = radar::RadarRequest::from_file(&input)?;
            let output = radar::RadarOutput {
                composite,
                gif,
                keep_frames,
            };
            let written = radar::run(&config, request, output)?;
            info!(files = written.len(), "Radar charts done");
        }
        Command::Map {
            readings,
            stations,
            day,
            background,
            keep_frames,
        } => {
            let request = map::MapRequest {
                readings,
                stations,
                day,
                background,
                keep_frames,
            };
            let written = map::run(&config, &request)?;
            info!(files = written.len(), "Map animation done");
        }
        Command::Timeseries {
            input,
            column,
            start,
            end,
            window,
        } => {
            let request = timeseries::TimeseriesRequest {
                input,
                column,
                start,
                end,
                window,
            };
            let out = timeseries::run(&config, &request)?;
            info!(path = %out.display(), "Time-series animation done");
        }
    }

    Ok(())
}
