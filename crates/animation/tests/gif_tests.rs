//! Tests for GIF assembly.

use animation::{FrameSequence, GifAssembler};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Rgba, RgbaImage};
use spider_common::SpiderError;
use std::time::Duration;
use test_utils::temp_test_dir;

fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

fn decode(bytes: &[u8]) -> Vec<image::Frame> {
    GifDecoder::new(bytes)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn test_frames_keep_generation_order() {
    let frames = vec![
        solid(8, 6, [255, 0, 0, 255]),
        solid(8, 6, [0, 255, 0, 255]),
        solid(8, 6, [0, 0, 255, 255]),
    ];
    let bytes = GifAssembler::default().encode(&frames).unwrap();
    let decoded = decode(&bytes);

    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded[0].buffer().get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded[1].buffer().get_pixel(0, 0).0, [0, 255, 0, 255]);
    assert_eq!(decoded[2].buffer().get_pixel(0, 0).0, [0, 0, 255, 255]);
}

#[test]
fn test_quantizer_speed_is_clamped() {
    assert_eq!(GifAssembler::default().speed, 10);
    assert_eq!(GifAssembler::default().with_speed(0).speed, 1);
    assert_eq!(GifAssembler::default().with_speed(99).speed, 30);

    let bytes = GifAssembler::default()
        .with_speed(30)
        .encode(&[solid(6, 6, [255, 0, 0, 255])])
        .unwrap();
    assert_eq!(decode(&bytes)[0].buffer().get_pixel(3, 3).0, [255, 0, 0, 255]);
}

#[test]
fn test_frame_delay_is_written() {
    let assembler = GifAssembler::new(Duration::from_millis(250), false);
    let bytes = assembler
        .encode(&[solid(4, 4, [0, 0, 0, 255]), solid(4, 4, [255, 255, 255, 255])])
        .unwrap();
    let (num, den) = decode(&bytes)[1].delay().numer_denom_ms();
    assert_eq!(num / den, 250);
}

#[test]
fn test_zero_frames_is_an_error() {
    let err = GifAssembler::default().encode(&[]).unwrap_err();
    assert!(matches!(err, SpiderError::NoFrames));

    let sequence = FrameSequence::new().unwrap();
    let dir = temp_test_dir();
    let err = GifAssembler::default()
        .assemble(&sequence, dir.path().join("empty.gif"))
        .unwrap_err();
    assert!(matches!(err, SpiderError::NoFrames));
    assert!(!dir.path().join("empty.gif").exists());
}

#[test]
fn test_mismatched_frame_sizes_rejected() {
    let err = GifAssembler::default()
        .encode(&[solid(4, 4, [0, 0, 0, 255]), solid(4, 5, [0, 0, 0, 255])])
        .unwrap_err();
    assert!(matches!(
        err,
        SpiderError::FrameSizeMismatch { index: 1, actual_height: 5, .. }
    ));
}

#[test]
fn test_assemble_sequence_and_keep_frames() {
    let dir = temp_test_dir();
    let images: Vec<RgbaImage> = (0..4u8).map(|i| solid(6, 6, [i * 60, 0, 0, 255])).collect();
    let sequence = FrameSequence::from_images(&images).unwrap();

    let out = dir.path().join("hours.gif");
    GifAssembler::default().assemble(&sequence, &out).unwrap();
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    assert_eq!(decode(&bytes).len(), 4);

    let kept = sequence.keep_as(dir.path().join("stills"), "hour").unwrap();
    assert_eq!(kept.len(), 4);
    assert!(dir.path().join("stills").join("hour1.png").exists());
    assert!(dir.path().join("stills").join("hour4.png").exists());
}
