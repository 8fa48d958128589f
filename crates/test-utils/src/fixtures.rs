//! Sensor CSV fixtures mirroring the layout of real station exports.

use std::path::{Path, PathBuf};

/// Station coordinates, `station,lat,lon`.
pub const STATIONS_CSV: &str = "\
station,lat,lon
Aotizhongxin,39.982,116.397
Changping,40.217,116.230
Dingling,40.292,116.220
";

/// Hourly readings for two days.
///
/// On `01-Mar-20`, hour 00 has every pollutant for Aotizhongxin and
/// Changping; hour 01 lacks wind for NO2 at every station, so only hour 00
/// is common to all pollutants. Dingling never reports on that day.
pub const READINGS_CSV: &str = "\
timestamp,station,PM2_5,PM10,NOX,NO2,velocity,direction
01-Mar-20 00,Aotizhongxin,4.0,4.0,30.0,7.0,4.4,315.0
01-Mar-20 00,Changping,3.0,6.0,22.0,11.0,3.1,270.0
01-Mar-20 01,Aotizhongxin,8.0,8.0,28.0,,4.0,300.0
01-Mar-20 01,Changping,7.0,9.0,20.0,,3.5,260.0
02-Mar-20 00,Aotizhongxin,9.0,12.0,40.0,15.0,1.2,90.0
02-Mar-20 00,Changping,11.0,14.0,38.0,17.0,1.0,80.0
02-Mar-20 00,Dingling,5.0,7.0,18.0,9.0,0.8,45.0
02-Mar-20 01,Aotizhongxin,10.0,13.0,42.0,16.0,1.4,100.0
02-Mar-20 01,Changping,12.0,16.0,39.0,18.0,1.1,85.0
02-Mar-20 01,Dingling,6.0,8.0,19.0,10.0,0.9,50.0
";

/// Bounding box `[min_lon, min_lat, max_lon, max_lat]` around the fixture stations.
pub const STATIONS_BBOX: [f64; 4] = [116.0, 39.8, 116.6, 40.4];

/// A radar chart request in the JSON layout accepted by the CLI.
pub const BASECASE_CHART_JSON: &str = r##"{
    "title": "Basecase",
    "series": [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2]],
    "scale_length": 4,
    "snapshot_count": 4,
    "snapshot_titles": ["t1", "t2", "t3", "t4"],
    "spoke_labels": ["PM2,5", "PM10", "NOX"],
    "colors": ["b", "r", "g", "#ff00ff"],
    "frame": "polygon"
}"##;

/// Write `contents` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}
