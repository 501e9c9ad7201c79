use crate::foundation::core::Rgba8;
use crate::foundation::error::{MockupError, MockupResult};
use crate::foundation::math::{hash_u32, mul_div255_u8};
use crate::render::surface::DrawingSurface;
use crate::template::model::{FabricSpec, GradientStop};

/// Fill the whole surface with a top-to-bottom gradient through `stops`.
pub(crate) fn fill_vertical_gradient(
    surface: &mut DrawingSurface,
    stops: &[GradientStop],
) -> MockupResult<()> {
    if stops.is_empty() {
        return Err(MockupError::validation("gradient needs at least one stop"));
    }
    let (w, h) = (surface.width() as usize, surface.height() as usize);
    let h1 = (h.max(1) - 1) as f32;
    let data = surface.data_mut();
    for y in 0..h {
        let t = if h1 <= 0.0 { 0.0 } else { (y as f32) / h1 };
        let c = gradient_color_at(stops, t).to_premul().to_array();
        let row = y * w * 4;
        for px in data[row..row + w * 4].chunks_exact_mut(4) {
            px.copy_from_slice(&c);
        }
    }
    Ok(())
}

/// Piecewise-linear color at `t` (clamped to the first/last stop outside their range).
pub(crate) fn gradient_color_at(stops: &[GradientStop], t: f32) -> Rgba8 {
    let Some(first) = stops.first() else {
        return Rgba8::rgba(0, 0, 0, 0);
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span <= 0.0 { 1.0 } else { (t - a.offset) / span };
            let lerp = |x: u8, y: u8| -> u8 {
                let xf = f32::from(x);
                let yf = f32::from(y);
                (xf + (yf - xf) * u).round().clamp(0.0, 255.0) as u8
            };
            return Rgba8::rgba(
                lerp(a.color.r, b.color.r),
                lerp(a.color.g, b.color.g),
                lerp(a.color.b, b.color.b),
                lerp(a.color.a, b.color.a),
            );
        }
    }
    stops.last().map_or(first.color, |s| s.color)
}

/// Darken a deterministic subset of covered pixels in `layer` to simulate woven fabric.
pub(crate) fn apply_fabric_speckle(layer: &mut [u8], width: u32, spec: FabricSpec) {
    if spec.density_permille == 0 || spec.intensity == 0 || width == 0 {
        return;
    }
    for (i, px) in layer.chunks_exact_mut(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let x = (i as u32) % width;
        let y = (i as u32) / width;
        let h = hash_u32(spec.seed, x, y);
        if (h % 1000) as u16 >= spec.density_permille {
            continue;
        }
        let amount = mul_div255_u8(u16::from(spec.intensity), ((h >> 16) & 0xff) as u16);
        let keep = 255u16 - u16::from(amount);
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), keep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Canvas;

    const STOPS: [GradientStop; 2] = [
        GradientStop {
            offset: 0.0,
            color: Rgba8::rgb(0, 0, 0),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba8::rgb(200, 100, 50),
        },
    ];

    #[test]
    fn gradient_endpoints_and_midpoint() {
        assert_eq!(gradient_color_at(&STOPS, 0.0), Rgba8::rgb(0, 0, 0));
        assert_eq!(gradient_color_at(&STOPS, 1.0), Rgba8::rgb(200, 100, 50));
        assert_eq!(gradient_color_at(&STOPS, 0.5), Rgba8::rgb(100, 50, 25));
        assert_eq!(gradient_color_at(&STOPS, 7.0), Rgba8::rgb(200, 100, 50));
    }

    #[test]
    fn vertical_gradient_rows_are_uniform() {
        let mut s = DrawingSurface::new(Canvas::new(4, 3)).unwrap();
        fill_vertical_gradient(&mut s, &STOPS).unwrap();
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(s.pixel(3, 1), Some([100, 50, 25, 255]));
        assert_eq!(s.pixel(2, 2), Some([200, 100, 50, 255]));
    }

    #[test]
    fn speckle_is_deterministic_and_skips_transparent_pixels() {
        let spec = FabricSpec {
            seed: 42,
            density_permille: 500,
            intensity: 80,
        };
        let mut a = [250u8, 250, 250, 255].repeat(64);
        a[0..4].copy_from_slice(&[0, 0, 0, 0]);
        let mut b = a.clone();
        apply_fabric_speckle(&mut a, 8, spec);
        apply_fabric_speckle(&mut b, 8, spec);
        assert_eq!(a, b);
        assert_eq!(&a[0..4], &[0, 0, 0, 0]);
        assert!(a.chunks_exact(4).any(|px| px[0] < 250));
        assert!(a.chunks_exact(4).all(|px| px[3] == 255 || px == [0, 0, 0, 0]));
    }
}
