use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"<html>not an image</html>").is_err());
    assert!(decode_image(&[]).is_err());
}

#[test]
fn resized_constant_image_keeps_color() {
    let src = decode_image(&png_bytes(6, 4, [30, 160, 90, 255])).unwrap();
    assert_eq!((src.width, src.height), (6, 4));

    let out = src.resized(3, 2).unwrap();
    assert_eq!(out.len(), 3 * 2 * 4);
    for px in out.chunks_exact(4) {
        assert!((i16::from(px[0]) - 30).abs() <= 1);
        assert!((i16::from(px[1]) - 160).abs() <= 1);
        assert!((i16::from(px[2]) - 90).abs() <= 1);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn resized_to_same_size_is_identity() {
    let src = decode_image(&png_bytes(2, 2, [1, 2, 3, 255])).unwrap();
    assert_eq!(src.resized(2, 2).unwrap(), *src.rgba8_premul);
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &b in bytes {
        crc ^= u32::from(b);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

/// Insert an `eXIf` chunk carrying a big-endian TIFF orientation tag right after IHDR.
fn with_exif_orientation(png: &[u8], orientation: u16) -> Vec<u8> {
    let mut exif = b"MM\x00\x2a\x00\x00\x00\x08\x00\x01".to_vec();
    exif.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
    exif.extend_from_slice(&orientation.to_be_bytes());
    exif.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

    let mut chunk = Vec::new();
    chunk.extend_from_slice(&(exif.len() as u32).to_be_bytes());
    let mut body = b"eXIf".to_vec();
    body.extend_from_slice(&exif);
    chunk.extend_from_slice(&body);
    chunk.extend_from_slice(&crc32(&body).to_be_bytes());

    // 8-byte signature + IHDR (4 len + 4 type + 13 data + 4 crc).
    let ihdr_end = 8 + 25;
    let mut out = png[..ihdr_end].to_vec();
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&png[ihdr_end..]);
    out
}

#[test]
fn crc32_matches_reference_value() {
    assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
}

#[test]
fn exif_rotation_is_applied_before_fitting() {
    let landscape = png_bytes(40, 20, [10, 20, 30, 255]);
    let rotated = decode_image(&with_exif_orientation(&landscape, 6)).unwrap();
    assert_eq!((rotated.width, rotated.height), (20, 40));

    let fit = crate::layout::fit::fit_contain(
        rotated.width,
        rotated.height,
        crate::foundation::core::Rect::new(230.0, 240.0, 530.0, 560.0),
    )
    .unwrap();
    assert_eq!((fit.width, fit.height), (160.0, 320.0));
}

#[test]
fn exif_identity_orientation_keeps_dimensions() {
    let landscape = png_bytes(40, 20, [10, 20, 30, 255]);
    let upright = decode_image(&with_exif_orientation(&landscape, 1)).unwrap();
    assert_eq!((upright.width, upright.height), (40, 20));
}
