use crate::foundation::core::Rect;
use crate::foundation::error::{MockupError, MockupResult};

/// Where a source image lands inside a placement rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FittedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FittedRect {
    pub fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Integer pixel size the source is resampled to before drawing.
    pub fn pixel_size(self) -> (u32, u32) {
        (
            (self.width.round() as u32).max(1),
            (self.height.round() as u32).max(1),
        )
    }
}

/// Contain-fit `src_w x src_h` into `target`, centered on the axis with slack.
///
/// The constrained axis always spans the full target; the aspect-ratio comparison is done by
/// cross-multiplication so equal ratios fill both axes exactly.
pub fn fit_contain(src_w: u32, src_h: u32, target: Rect) -> MockupResult<FittedRect> {
    if src_w == 0 || src_h == 0 {
        return Err(MockupError::validation("source image has zero size"));
    }
    let (tw, th) = (target.width(), target.height());
    if !(tw > 0.0 && th > 0.0) || !tw.is_finite() || !th.is_finite() {
        return Err(MockupError::validation(
            "placement rectangle must have positive finite size",
        ));
    }

    let sw = f64::from(src_w);
    let sh = f64::from(src_h);
    let src_cross = sw * th;
    let dst_cross = sh * tw;

    let (width, height) = if src_cross == dst_cross {
        (tw, th)
    } else if src_cross > dst_cross {
        // Source is relatively wider: width binds.
        (tw, tw * sh / sw)
    } else {
        (th * sw / sh, th)
    };

    Ok(FittedRect {
        x: target.x0 + (tw - width) / 2.0,
        y: target.y0 + (th - height) / 2.0,
        width,
        height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
