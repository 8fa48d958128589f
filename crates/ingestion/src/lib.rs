//! Sensor data ingestion.
//!
//! Reads hourly station readings and station coordinates from CSV and
//! arranges them into per-hour series, one series per pollutant.

pub mod error;
pub mod hourly;
pub mod records;
pub mod stations;

// Re-exports
pub use error::{IngestionError, Result};
pub use hourly::{HourlyDataset, HourlySeries, Pollutant};
pub use records::{parse_timestamp, read_readings, read_readings_from, SensorReading};
pub use stations::{read_stations, read_stations_from, Station};
