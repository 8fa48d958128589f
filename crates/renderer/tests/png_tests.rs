//! Tests for PNG encoding of rendered charts.

use image::{Rgba, RgbaImage};
use renderer::png::{encode_png, encode_rgba, write_png};
use renderer::{RadarChart, RadarRenderer, RenderOptions};
use test_utils::{temp_test_dir, BASECASE_CHART_JSON};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn color_type(png: &[u8]) -> u8 {
    // signature (8) + length (4) + "IHDR" (4) + width (4) + height (4) + bit depth (1)
    png[25]
}

fn has_chunk(png: &[u8], name: &[u8; 4]) -> bool {
    png.windows(4).any(|w| w == name)
}

#[test]
fn test_signature_and_ihdr() {
    let img = RgbaImage::from_pixel(7, 3, Rgba([10, 20, 30, 255]));
    let png = encode_png(&img).unwrap();
    assert_eq!(&png[..8], &PNG_SIGNATURE);
    assert_eq!(&png[12..16], b"IHDR");
    assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 7);
    assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 3);
    assert!(png.ends_with(&[0xAE, 0x42, 0x60, 0x82]));
}

#[test]
fn test_few_colors_use_indexed_mode() {
    let mut img = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
    img.put_pixel(3, 3, Rgba([0, 0, 255, 255]));
    let png = encode_png(&img).unwrap();
    assert_eq!(color_type(&png), 3);
    assert!(has_chunk(&png, b"PLTE"));
    assert!(!has_chunk(&png, b"tRNS"));
}

#[test]
fn test_transparent_palette_writes_trns() {
    let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
    let png = encode_png(&img).unwrap();
    assert!(has_chunk(&png, b"tRNS"));
}

#[test]
fn test_many_colors_fall_back_to_rgba() {
    let img = RgbaImage::from_fn(32, 32, |x, y| Rgba([x as u8 * 8, y as u8 * 8, 0, 255]));
    let png = encode_png(&img).unwrap();
    assert_eq!(color_type(&png), 6);
}

#[test]
fn test_indexed_png_decodes_to_same_pixels() {
    let img = RgbaImage::from_fn(10, 6, |x, _| {
        if x < 5 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 64])
        }
    });
    let decoded = image::load_from_memory(&encode_png(&img).unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded, img);
}

#[test]
fn test_rgba_png_decodes_to_same_pixels() {
    let img = RgbaImage::from_fn(20, 20, |x, y| Rgba([x as u8 * 12, y as u8 * 12, 7, 200]));
    let decoded = image::load_from_memory(&encode_rgba(&img).unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded, img);
}

#[test]
fn test_write_rendered_snapshots() {
    let dir = temp_test_dir();
    let chart = RadarChart::from_json(BASECASE_CHART_JSON).unwrap();
    let renderer = RadarRenderer::new(RenderOptions {
        width: 160,
        height: 160,
        ..RenderOptions::default()
    });

    for rendered in renderer.render_snapshots(&chart).unwrap() {
        let path = dir.path().join(format!("{}{}.png", chart.title, rendered.snapshot.index + 1));
        write_png(&path, &rendered.image).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (160, 160));
    }

    assert!(dir.path().join("Basecase4.png").exists());
}
