//! Station coordinates.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// A measuring station and where it sits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Station {
    pub station: String,
    pub lat: f64,
    pub lon: f64,
}

/// Read stations from a `station,lat,lon` CSV file, in file order.
pub fn read_stations(path: impl AsRef<Path>) -> Result<Vec<Station>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let stations = read_stations_from(file)?;
    tracing::info!(path = %path.display(), count = stations.len(), "Read stations");
    Ok(stations)
}

pub fn read_stations_from<R: Read>(source: R) -> Result<Vec<Station>> {
    let mut reader = csv::Reader::from_reader(source);
    Ok(reader.deserialize().collect::<std::result::Result<Vec<Station>, _>>()?)
}
