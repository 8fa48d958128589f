//! Hourly sensor readings.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use crate::error::{IngestionError, Result};

/// Date part of a reading timestamp, e.g. `01-Mar-20`.
pub const DATE_FORMAT: &str = "%d-%b-%y";

/// Cell contents read as a missing measurement.
pub const MISSING_TOKENS: &[&str] = &["NA", "N/A", "NaN", "-NaN", "null", "None", "#N/A", "<NA>"];

/// One row of the readings CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Timestamp as written in the file, used for day prefix matching
    pub raw_timestamp: String,
    pub timestamp: NaiveDateTime,
    pub station: String,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub nox: Option<f64>,
    pub no2: Option<f64>,
    pub velocity: Option<f64>,
    pub direction: Option<f64>,
}

impl SensorReading {
    /// Whether wind velocity and direction were both recorded.
    pub fn has_wind(&self) -> bool {
        self.velocity.is_some() && self.direction.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct ReadingRow {
    timestamp: String,
    station: String,
    #[serde(rename = "PM2_5", default, deserialize_with = "measurement")]
    pm2_5: Option<f64>,
    #[serde(rename = "PM10", default, deserialize_with = "measurement")]
    pm10: Option<f64>,
    #[serde(rename = "NOX", default, deserialize_with = "measurement")]
    nox: Option<f64>,
    #[serde(rename = "NO2", default, deserialize_with = "measurement")]
    no2: Option<f64>,
    #[serde(default, deserialize_with = "measurement")]
    velocity: Option<f64>,
    #[serde(default, deserialize_with = "measurement")]
    direction: Option<f64>,
}

/// A numeric cell. Empty cells, missing-value tokens and non-finite
/// numbers all count as not measured.
fn measurement<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() || MISSING_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        return Ok(None);
    }

    let value: f64 = text.parse().map_err(serde::de::Error::custom)?;
    Ok(value.is_finite().then_some(value))
}

impl TryFrom<ReadingRow> for SensorReading {
    type Error = IngestionError;

    fn try_from(row: ReadingRow) -> Result<Self> {
        Ok(Self {
            timestamp: parse_timestamp(&row.timestamp)?,
            raw_timestamp: row.timestamp,
            station: row.station,
            pm2_5: row.pm2_5,
            pm10: row.pm10,
            nox: row.nox,
            no2: row.no2,
            velocity: row.velocity,
            direction: row.direction,
        })
    }
}

/// Parse a `%d-%b-%y %H` timestamp such as `01-Mar-20 13`.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let invalid = || IngestionError::InvalidTimestamp(text.to_string());

    let (date, hour) = text.trim().split_once(' ').ok_or_else(invalid)?;
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;
    let hour: u32 = hour.trim().parse().map_err(|_| invalid())?;
    date.and_hms_opt(hour, 0, 0).ok_or_else(invalid)
}

/// Read every reading from a CSV file.
pub fn read_readings(path: impl AsRef<Path>) -> Result<Vec<SensorReading>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let readings = read_readings_from(file)?;
    tracing::info!(path = %path.display(), count = readings.len(), "Read sensor readings");
    Ok(readings)
}

/// Read readings from any CSV source with a header row.
pub fn read_readings_from<R: Read>(source: R) -> Result<Vec<SensorReading>> {
    let mut reader = csv::Reader::from_reader(source);
    reader
        .deserialize::<ReadingRow>()
        .map(|row| SensorReading::try_from(row?))
        .collect()
}
