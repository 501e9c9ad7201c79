use std::io::Cursor;

use base64::Engine as _;

use crate::foundation::core::unpremultiply_rgba8_in_place;
use crate::foundation::error::{MockupError, MockupResult};
use crate::layout::fit::FittedRect;
use crate::render::surface::DrawingSurface;
use crate::template::model::ProductKind;

/// A finished mockup: PNG bytes plus the geometry that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositedMockup {
    pub kind: ProductKind,
    pub width: u32,
    pub height: u32,
    /// Where the source image landed, one entry per template placement.
    pub placements: Vec<FittedRect>,
    pub png: Vec<u8>,
}

impl CompositedMockup {
    /// `data:image/png;base64,...` form, directly usable as an `<img src>`.
    pub fn data_url(&self) -> String {
        let mut out = String::from("data:image/png;base64,");
        base64::engine::general_purpose::STANDARD.encode_string(&self.png, &mut out);
        out
    }
}

/// Encode a premultiplied surface as a straight-alpha RGBA8 PNG.
pub fn encode_png(surface: &DrawingSurface) -> MockupResult<Vec<u8>> {
    let mut straight = surface.data().to_vec();
    unpremultiply_rgba8_in_place(&mut straight);

    let img = image::RgbaImage::from_raw(surface.width(), surface.height(), straight)
        .ok_or_else(|| MockupError::encode("surface buffer does not match its dimensions"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| MockupError::encode(format!("png: {e}")))?;
    Ok(out)
}
