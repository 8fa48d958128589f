//! PNG encoding for rendered charts.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: Used when the image has ≤256 unique
//!   colors, which covers most flat time-series and map frames.
//! - **RGBA PNG (color type 6)**: Fallback for anti-aliased charts with
//!   more colors.

use image::RgbaImage;
use spider_common::{SpiderError, SpiderResult};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encode an image, choosing indexed mode when the palette fits.
pub fn encode_png(image: &RgbaImage) -> SpiderResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    match extract_palette(image.as_raw()) {
        Some((palette, indices)) => encode_indexed(width, height, &palette, &indices),
        None => encode_rgba(image),
    }
}

/// Encode an image as a full RGBA PNG.
pub fn encode_rgba(image: &RgbaImage) -> SpiderResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));

    let idat = deflate_scanlines(image.as_raw(), width as usize * 4, height as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Encode an image and write it to `path`.
pub fn write_png(path: impl AsRef<Path>, image: &RgbaImage) -> SpiderResult<()> {
    let path = path.as_ref();
    let bytes = encode_png(image)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
    Ok(())
}

/// Pack RGBA bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(pixel: &[u8]) -> u32 {
    u32::from_le_bytes([pixel[0], pixel[1], pixel[2], pixel[3]])
}

/// Build a palette and per-pixel indices, or `None` past 256 colors.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<[u8; 4]> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk);
        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push([chunk[0], chunk[1], chunk[2], chunk[3]]);
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

fn encode_indexed(
    width: u32,
    height: u32,
    palette: &[[u8; 4]],
    indices: &[u8],
) -> SpiderResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS only when some entry is not fully opaque
    if palette.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width as usize, height as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// IHDR payload for 8-bit samples of the given color type.
fn ihdr(width: u32, height: u32, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

/// Prefix each row with filter type 0 and zlib-compress the result.
fn deflate_scanlines(data: &[u8], row_bytes: usize, rows: usize) -> SpiderResult<Vec<u8>> {
    if data.len() < row_bytes * rows {
        return Err(SpiderError::EncodeError(format!(
            "Expected {} bytes of image data, got {}",
            row_bytes * rows,
            data.len()
        )));
    }

    let mut uncompressed = Vec::with_capacity(rows * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes.max(1)).take(rows) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    let compress_err =
        |e: std::io::Error| SpiderError::EncodeError(format!("IDAT compression failed: {}", e));
    encoder.write_all(&uncompressed).map_err(compress_err)?;
    encoder.finish().map_err(compress_err)
}

/// Write a PNG chunk: length, type, data, CRC over type and data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_palette_simple() {
        let pixels = [
            255, 0, 0, 255, // red
            0, 255, 0, 255, // green
            0, 0, 255, 255, // blue
            255, 0, 0, 255, // red again
        ];

        let (palette, indices) = extract_palette(&pixels).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(indices, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_extract_palette_too_many_colors() {
        let pixels: Vec<u8> = (0..300u32)
            .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0, 255])
            .collect();
        assert!(extract_palette(&pixels).is_none());
    }

    #[test]
    fn test_short_buffer_rejected() {
        assert!(deflate_scanlines(&[0u8; 10], 8, 2).is_err());
    }
}
