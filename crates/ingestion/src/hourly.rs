//! Per-hour radar series built from station readings.
//!
//! For one day, every hour that has readings for all requested pollutants
//! becomes one set of series: one series per pollutant, one value per
//! station in station-file order.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::{IngestionError, Result};
use crate::records::SensorReading;
use crate::stations::Station;

/// A pollutant column of the readings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    Pm25,
    Pm10,
    Nox,
    No2,
}

impl Pollutant {
    pub const ALL: [Pollutant; 4] = [Pollutant::Pm25, Pollutant::Pm10, Pollutant::Nox, Pollutant::No2];

    /// Column name in the readings CSV.
    pub fn column(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2_5",
            Pollutant::Pm10 => "PM10",
            Pollutant::Nox => "NOX",
            Pollutant::No2 => "NO2",
        }
    }

    /// Label drawn on the chart spoke.
    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2,5",
            Pollutant::Pm10 => "PM10",
            Pollutant::Nox => "NOX",
            Pollutant::No2 => "NO2",
        }
    }

    /// Value of this pollutant in `reading`, counted only when the wind
    /// was recorded alongside it.
    pub fn value(&self, reading: &SensorReading) -> Option<f64> {
        if !reading.has_wind() {
            return None;
        }
        match self {
            Pollutant::Pm25 => reading.pm2_5,
            Pollutant::Pm10 => reading.pm10,
            Pollutant::Nox => reading.nox,
            Pollutant::No2 => reading.no2,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Pollutant {
    type Err = IngestionError;

    fn from_str(s: &str) -> Result<Self> {
        Pollutant::ALL
            .into_iter()
            .find(|p| p.column().eq_ignore_ascii_case(s) || p.label() == s)
            .ok_or_else(|| IngestionError::UnknownPollutant(s.to_string()))
    }
}

/// Series of one hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    pub hour: NaiveDateTime,
    /// One series per pollutant, each with one value per station
    pub series: Vec<Vec<f64>>,
}

/// All hours of one day that every pollutant covers.
#[derive(Debug, Clone)]
pub struct HourlyDataset {
    pub day: String,
    pub pollutants: Vec<Pollutant>,
    pub stations: Vec<Station>,
    pub hours: Vec<HourlySeries>,
}

impl HourlyDataset {
    /// Group `readings` of `day` into per-hour series.
    ///
    /// `day` is matched as a prefix of the timestamp text (`01-Mar-20`).
    /// Readings from stations missing in `stations` are ignored. A station
    /// without a value for a pollutant in a given hour contributes 0.
    pub fn build(
        readings: &[SensorReading],
        stations: &[Station],
        day: &str,
        pollutants: &[Pollutant],
    ) -> Result<Self> {
        if stations.is_empty() {
            return Err(IngestionError::NoStations);
        }

        let station_index: HashMap<&str, usize> = stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.station.as_str(), i))
            .collect();

        let day_readings: Vec<(&SensorReading, usize)> = readings
            .iter()
            .filter(|r| r.raw_timestamp.starts_with(day))
            .filter_map(|r| station_index.get(r.station.as_str()).map(|&i| (r, i)))
            .collect();

        // (pollutant, hour, station) -> value, first reading wins
        let mut values: HashMap<(usize, NaiveDateTime, usize), f64> = HashMap::new();
        let mut hours_per_pollutant: Vec<BTreeSet<NaiveDateTime>> =
            vec![BTreeSet::new(); pollutants.len()];

        for (reading, station) in &day_readings {
            for (p, pollutant) in pollutants.iter().enumerate() {
                if let Some(value) = pollutant.value(reading) {
                    hours_per_pollutant[p].insert(reading.timestamp);
                    let previous = values.entry((p, reading.timestamp, *station)).or_insert(value);
                    if *previous != value {
                        tracing::debug!(
                            station = %reading.station,
                            hour = %reading.timestamp,
                            pollutant = %pollutant,
                            "Duplicate reading ignored"
                        );
                    }
                }
            }
        }

        let common_hours: Vec<NaiveDateTime> = match hours_per_pollutant.split_first() {
            Some((first, rest)) => first
                .iter()
                .filter(|hour| rest.iter().all(|set| set.contains(hour)))
                .copied()
                .collect(),
            None => Vec::new(),
        };

        let hours = common_hours
            .into_iter()
            .map(|hour| HourlySeries {
                hour,
                series: (0..pollutants.len())
                    .map(|p| {
                        (0..stations.len())
                            .map(|s| values.get(&(p, hour, s)).copied().unwrap_or(0.0))
                            .collect()
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();

        tracing::info!(
            day,
            readings = day_readings.len(),
            hours = hours.len(),
            stations = stations.len(),
            "Built hourly dataset"
        );

        Ok(Self {
            day: day.to_string(),
            pollutants: pollutants.to_vec(),
            stations: stations.to_vec(),
            hours,
        })
    }

    /// Spoke labels, one per pollutant.
    pub fn spoke_labels(&self) -> Vec<String> {
        self.pollutants.iter().map(|p| p.label().to_string()).collect()
    }

    /// Station names, in station-file order.
    pub fn station_names(&self) -> Vec<String> {
        self.stations.iter().map(|s| s.station.clone()).collect()
    }
}
