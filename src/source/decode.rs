use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context;
use image::ImageDecoder as _;

use crate::foundation::core::premultiply_rgba8_in_place;
use crate::foundation::error::MockupResult;

/// Decoded customer photo as premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Resample to exactly `width x height` pixels (premultiplied in, premultiplied out).
    pub(crate) fn resized(&self, width: u32, height: u32) -> MockupResult<Vec<u8>> {
        if width == self.width && height == self.height {
            return Ok(self.rgba8_premul.as_ref().clone());
        }
        let buf = image::RgbaImage::from_raw(
            self.width,
            self.height,
            self.rgba8_premul.as_ref().clone(),
        )
        .context("source pixel buffer does not match its dimensions")?;
        let out = image::imageops::resize(
            &buf,
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
        Ok(out.into_raw())
    }
}

/// Decode encoded image bytes (PNG, JPEG, WebP, ...) and convert to premultiplied RGBA8.
///
/// EXIF orientation is applied, so the returned pixels are upright as a browser shows them.
pub fn decode_image(bytes: &[u8]) -> MockupResult<SourceImage> {
    let mut decoder = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("sniff image format")?
        .into_decoder()
        .context("open image decoder")?;
    let orientation = decoder
        .orientation()
        .unwrap_or(image::metadata::Orientation::NoTransforms);
    let mut dyn_img = image::DynamicImage::from_decoder(decoder).context("decode image")?;
    dyn_img.apply_orientation(orientation);

    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(SourceImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/source/decode.rs"]
mod tests;
