//! Synthetic series for radar chart and time-series tests.

/// Creates `spokes` series of `len` values each.
///
/// Series `k` is a ramp starting at `k` so every series has a different
/// range but none is degenerate.
///
/// ```
/// use test_utils::create_ramp_series;
///
/// let series = create_ramp_series(3, 4);
/// assert_eq!(series[1], vec![1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn create_ramp_series(spokes: usize, len: usize) -> Vec<Vec<f64>> {
    (0..spokes)
        .map(|k| (0..len).map(|i| (k + i) as f64).collect())
        .collect()
}

/// Creates pollutant-like series with unrelated magnitudes per spoke.
///
/// Spoke 0 behaves like PM2.5 (tens), spoke 1 like PM10, spoke 2 like NOx
/// (hundreds) and any further spoke like wind direction in degrees.
pub fn create_pollutant_series(spokes: usize, len: usize) -> Vec<Vec<f64>> {
    (0..spokes)
        .map(|k| {
            let (base, amplitude) = match k {
                0 => (12.0, 8.0),
                1 => (25.0, 15.0),
                2 => (80.0, 60.0),
                _ => (180.0, 170.0),
            };
            (0..len)
                .map(|i| base + amplitude * ((i as f64 * 0.7 + k as f64).sin()))
                .collect()
        })
        .collect()
}

/// A sine wave with a slow upward trend, for time-series frames.
pub fn create_wave(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 10.0 + 5.0 * (i as f64 * 0.3).sin() + i as f64 * 0.1)
        .collect()
}

/// Creates a series where every value is `value`.
pub fn create_constant_series(len: usize, value: f64) -> Vec<f64> {
    vec![value; len]
}

/// Snapshot titles `"{prefix}1"`, `"{prefix}2"`, ...
pub fn create_titles(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{}{}", prefix, i)).collect()
}
