use crate::foundation::core::Rgba8;
use crate::foundation::error::MockupResult;
use crate::layout::fit::{FittedRect, fit_contain};
use crate::render::blur::blur_alpha_plane;
use crate::render::composite::{
    alpha_plane, mask_alpha_in_place, over_in_place, tinted_over_offset_in_place,
};
use crate::render::paint::{apply_fabric_speckle, fill_vertical_gradient};
use crate::render::raster::LayerPainter;
use crate::render::surface::DrawingSurface;
use crate::source::decode::SourceImage;
use crate::template::model::{ProductTemplate, StrokeSpec};

/// Draw `template` with `source` placed into every placement rectangle.
///
/// Layers are rasterized separately and composited in order: backdrop, shadow, body, art
/// (clipped per placement), outlines. Returns the fitted rectangle of each placement.
pub fn draw_mockup(
    surface: &mut DrawingSurface,
    template: &ProductTemplate,
    source: &SourceImage,
) -> MockupResult<Vec<FittedRect>> {
    let canvas = surface.canvas();
    let body_paths = template
        .body
        .iter()
        .map(|part| part.shape.to_path().map(|p| (part, p)))
        .collect::<MockupResult<Vec<_>>>()?;

    fill_vertical_gradient(surface, template.background)?;

    // Drop shadow: silhouette coverage, blurred, offset and tinted.
    let shadow = template.shadow;
    if shadow.color.a > 0 {
        let mut silhouette = LayerPainter::new(canvas)?;
        for (part, path) in &body_paths {
            if part.fill.is_some() {
                silhouette.fill_path(path, Rgba8::rgb(0, 0, 0));
            }
            if let Some(stroke) = part.stroke {
                silhouette.stroke_path(
                    path,
                    StrokeSpec {
                        color: Rgba8::rgb(0, 0, 0),
                        width: stroke.width,
                    },
                );
            }
        }
        let coverage = alpha_plane(&silhouette.finish());
        let blurred = blur_alpha_plane(
            &coverage,
            canvas.width,
            canvas.height,
            shadow.blur_radius,
            shadow.sigma,
        )?;
        tinted_over_offset_in_place(
            surface.data_mut(),
            &blurred,
            canvas,
            shadow.color.to_premul(),
            shadow.offset_x,
            shadow.offset_y,
        )?;
    }

    let mut body = LayerPainter::new(canvas)?;
    for (part, path) in &body_paths {
        if let Some(fill) = part.fill {
            body.fill_path(path, fill);
        }
        if let Some(stroke) = part.stroke {
            body.stroke_path(path, stroke);
        }
    }
    let mut body = body.finish();
    if let Some(fabric) = template.fabric {
        apply_fabric_speckle(&mut body, canvas.width, fabric);
    }
    over_in_place(surface.data_mut(), &body)?;

    let mut fits = Vec::with_capacity(template.placements.len());
    for placement in template.placements {
        let fit = fit_contain(source.width, source.height, placement.rect())?;
        let (pw, ph) = fit.pixel_size();
        let pixels = source.resized(pw, ph)?;
        let clip = placement.clip_path();

        let mut art = LayerPainter::new(canvas)?;
        if let Some(mat) = template.mat {
            art.fill_path(&clip, mat);
        }
        art.draw_image(&pixels, pw, ph, fit)?;
        let mut art = art.finish();

        let mut mask = LayerPainter::new(canvas)?;
        mask.fill_path(&clip, Rgba8::rgb(255, 255, 255));
        mask_alpha_in_place(&mut art, &mask.finish())?;
        over_in_place(surface.data_mut(), &art)?;

        fits.push(fit);
    }

    let mut outlines = LayerPainter::new(canvas)?;
    let mut any_outline = false;
    for (part, path) in &body_paths {
        // Stroke-only parts (the mug handle) are artwork, not outlines.
        if part.fill.is_none() {
            continue;
        }
        if let Some(stroke) = part.stroke {
            outlines.stroke_path(path, stroke);
            any_outline = true;
        }
    }
    for placement in template.placements {
        if let Some(stroke) = placement.outline {
            outlines.stroke_path(&placement.clip_path(), stroke);
            any_outline = true;
        }
    }
    if any_outline {
        over_in_place(surface.data_mut(), &outlines.finish())?;
    }

    Ok(fits)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::foundation::core::Canvas;
    use crate::template::model::ProductKind;

    fn solid_source(w: u32, h: u32, px: [u8; 4]) -> SourceImage {
        SourceImage {
            width: w,
            height: h,
            rgba8_premul: Arc::new(px.repeat((w * h) as usize)),
        }
    }

    #[test]
    fn every_template_draws_an_opaque_surface() {
        let src = solid_source(8, 8, [200, 40, 40, 255]);
        for kind in ProductKind::ALL {
            let t = kind.template();
            let mut s = DrawingSurface::new(t.canvas).unwrap();
            let fits = draw_mockup(&mut s, t, &src).unwrap();
            assert_eq!(fits.len(), t.placements.len());
            assert!(s.data().chunks_exact(4).all(|px| px[3] == 255));
        }
    }

    #[test]
    fn art_is_clipped_to_rounded_placement_corners() {
        let t = ProductKind::Blanket.template();
        let p = t.placements[0];
        let src = solid_source(p.width as u32, p.height as u32, [0, 0, 255, 255]);
        let mut s = DrawingSurface::new(t.canvas).unwrap();
        draw_mockup(&mut s, t, &src).unwrap();

        let center = s
            .pixel((p.x + p.width / 2.0) as u32, (p.y + p.height / 2.0) as u32)
            .unwrap();
        assert!(center[2] > 240 && center[0] < 15);

        // Just inside the bounding box corner but outside the rounded corner.
        let corner = s.pixel(p.x as u32 + 2, p.y as u32 + 2).unwrap();
        assert!(corner[0] > 200, "corner pixel should not be art: {corner:?}");
    }

    #[test]
    fn drawing_is_deterministic() {
        let src = solid_source(5, 3, [10, 120, 60, 255]);
        let t = ProductKind::Mug.template();
        let mut a = DrawingSurface::new(t.canvas).unwrap();
        let mut b = DrawingSurface::new(Canvas::new(t.canvas.width, t.canvas.height)).unwrap();
        draw_mockup(&mut a, t, &src).unwrap();
        draw_mockup(&mut b, t, &src).unwrap();
        assert_eq!(a.data(), b.data());
    }
}
