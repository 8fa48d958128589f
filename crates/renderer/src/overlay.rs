//! Placing chart icons on a geographic background image.

use image::{imageops, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Geographic extent of a background image, `[min_lon, min_lat, max_lon, max_lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    pub fn new(bbox: [f64; 4]) -> Self {
        let [min_lon, min_lat, max_lon, max_lat] = bbox;
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// Pixel position of `(lon, lat)` on a `width` x `height` image, or
    /// `None` outside the bounds.
    pub fn to_pixel(&self, lon: f64, lat: f64, width: u32, height: u32) -> Option<(f32, f32)> {
        if !self.contains(lon, lat) {
            return None;
        }
        let lon_range = self.max_lon - self.min_lon;
        let lat_range = self.max_lat - self.min_lat;
        if lon_range <= 0.0 || lat_range <= 0.0 {
            return None;
        }

        let x = (lon - self.min_lon) / lon_range * width as f64;
        let y = (self.max_lat - lat) / lat_range * height as f64; // Y is inverted
        Some((x as f32, y as f32))
    }
}

/// A chart image anchored at a station.
#[derive(Debug, Clone)]
pub struct StationIcon {
    pub station: String,
    pub lon: f64,
    pub lat: f64,
    pub image: RgbaImage,
}

/// Composes station charts onto a map background.
#[derive(Debug, Clone)]
pub struct MapOverlay {
    pub bounds: GeoBounds,
    /// Side length of each icon on the map, in pixels
    pub icon_size: u32,
}

impl MapOverlay {
    pub fn new(bounds: GeoBounds, icon_size: u32) -> Self {
        Self { bounds, icon_size }
    }

    /// Copy `background` and draw every icon centered on its station.
    pub fn compose(&self, background: &RgbaImage, icons: &[StationIcon]) -> RgbaImage {
        let mut canvas = background.clone();
        let (width, height) = canvas.dimensions();

        for icon in icons {
            let Some((x, y)) = self.bounds.to_pixel(icon.lon, icon.lat, width, height) else {
                tracing::warn!(
                    station = %icon.station,
                    lon = icon.lon,
                    lat = icon.lat,
                    "Station outside map bounds, skipping"
                );
                continue;
            };

            let resized = imageops::resize(
                &icon.image,
                self.icon_size,
                self.icon_size,
                imageops::FilterType::Triangle,
            );
            composite_centered(&mut canvas, &resized, x.round() as i64, y.round() as i64);
        }

        canvas
    }
}

/// Source-over blend of `icon` onto `canvas`, centered on `(cx, cy)`.
fn composite_centered(canvas: &mut RgbaImage, icon: &RgbaImage, cx: i64, cy: i64) {
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    let start_x = cx - icon.width() as i64 / 2;
    let start_y = cy - icon.height() as i64 / 2;

    for (px, py, src) in icon.enumerate_pixels() {
        let x = start_x + px as i64;
        let y = start_y + py as i64;
        if x < 0 || y < 0 || x >= cw || y >= ch || src[3] == 0 {
            continue;
        }
        let dst = canvas.get_pixel_mut(x as u32, y as u32);
        *dst = blend(*src, *dst);
    }
}

fn blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_a = src[3] as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| {
        ((s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a).round() as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
