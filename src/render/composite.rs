use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{MockupError, MockupResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> MockupResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MockupError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Multiply every channel of `layer` by the alpha of `mask` (clip to the mask's coverage).
pub fn mask_alpha_in_place(layer: &mut [u8], mask: &[u8]) -> MockupResult<()> {
    if layer.len() != mask.len() || !layer.len().is_multiple_of(4) {
        return Err(MockupError::validation(
            "mask_alpha_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, m) in layer.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let w = u16::from(m[3]);
        if w == 255 {
            continue;
        }
        for c in d.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), w);
        }
    }
    Ok(())
}

/// Extract the alpha channel of a premultiplied RGBA8 buffer.
pub fn alpha_plane(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4).map(|px| px[3]).collect()
}

/// Composite `color`, modulated by `coverage` shifted by `(dx, dy)`, over `dst`.
pub fn tinted_over_offset_in_place(
    dst: &mut [u8],
    coverage: &[u8],
    canvas: Canvas,
    color: Rgba8Premul,
    dx: i32,
    dy: i32,
) -> MockupResult<()> {
    let (w, h) = (canvas.width as i64, canvas.height as i64);
    if coverage.len() as i64 != w * h || dst.len() as i64 != w * h * 4 {
        return Err(MockupError::validation(
            "tinted_over_offset_in_place buffer size mismatch",
        ));
    }
    let c = color.to_array();
    for y in 0..h {
        let sy = y - i64::from(dy);
        if sy < 0 || sy >= h {
            continue;
        }
        for x in 0..w {
            let sx = x - i64::from(dx);
            if sx < 0 || sx >= w {
                continue;
            }
            let a = u16::from(coverage[(sy * w + sx) as usize]);
            if a == 0 {
                continue;
            }
            let src = [
                mul_div255_u8(u16::from(c[0]), a),
                mul_div255_u8(u16::from(c[1]), a),
                mul_div255_u8(u16::from(c[2]), a),
                mul_div255_u8(u16::from(c[3]), a),
            ];
            let idx = ((y * w + x) * 4) as usize;
            let out = over([dst[idx], dst[idx + 1], dst[idx + 2], dst[idx + 3]], src);
            dst[idx..idx + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}
