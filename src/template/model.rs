use std::{fmt, str::FromStr};

use kurbo::Shape as _;

use crate::foundation::core::{BezPath, Canvas, Rect, Rgba8};
use crate::foundation::error::{MockupError, MockupResult};

/// Flattening tolerance used when converting curved template shapes to paths.
pub(crate) const PATH_TOLERANCE: f64 = 0.1;

/// A sellable physical product that has a mockup template.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Mug,
    Canvas,
    Blanket,
}

impl ProductKind {
    pub const ALL: [ProductKind; 3] = [ProductKind::Mug, ProductKind::Canvas, ProductKind::Blanket];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductKind::Mug => "mug",
            ProductKind::Canvas => "canvas",
            ProductKind::Blanket => "blanket",
        }
    }

    pub fn template(self) -> &'static ProductTemplate {
        super::catalog::template_for(self)
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = MockupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mug" => Ok(ProductKind::Mug),
            "canvas" => Ok(ProductKind::Canvas),
            "blanket" => Ok(ProductKind::Blanket),
            _ => Err(MockupError::unsupported_kind(s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    /// Position along the vertical axis, 0 at the top edge and 1 at the bottom edge.
    pub offset: f32,
    pub color: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StrokeSpec {
    pub color: Rgba8,
    pub width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartShape {
    RoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Path {
        svg_path_d: &'static str,
    },
}

impl PartShape {
    pub fn to_path(&self) -> MockupResult<BezPath> {
        match *self {
            PartShape::RoundedRect {
                x,
                y,
                width,
                height,
                radius,
            } => Ok(kurbo::RoundedRect::new(x, y, x + width, y + height, radius)
                .to_path(PATH_TOLERANCE)),
            PartShape::Ellipse { cx, cy, rx, ry } => {
                Ok(kurbo::Ellipse::new((cx, cy), (rx, ry), 0.0).to_path(PATH_TOLERANCE))
            }
            PartShape::Path { svg_path_d } => BezPath::from_svg(svg_path_d.trim())
                .map_err(|e| MockupError::validation(format!("invalid svg_path_d: {e}"))),
        }
    }
}

/// One drawable piece of a product silhouette (mug body, handle, rim, frame...).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BodyPart {
    pub name: &'static str,
    pub shape: PartShape,
    pub fill: Option<Rgba8>,
    pub stroke: Option<StrokeSpec>,
}

/// Region of the template where customer art is drawn.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlacementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub outline: Option<StrokeSpec>,
}

impl PlacementRect {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Rounded-rect clip path of this placement.
    pub fn clip_path(&self) -> BezPath {
        kurbo::RoundedRect::from_rect(self.rect(), self.radius).to_path(PATH_TOLERANCE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ShadowSpec {
    pub offset_x: i32,
    pub offset_y: i32,
    pub blur_radius: u32,
    pub sigma: f32,
    pub color: Rgba8,
}

/// Speckle noise that gives textile products a woven look.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FabricSpec {
    pub seed: u64,
    /// Fraction of body pixels that receive a speckle, in thousandths.
    pub density_permille: u16,
    /// Maximum darkening applied to a speckled pixel.
    pub intensity: u8,
}

/// Static description of how one product is drawn.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ProductTemplate {
    pub kind: ProductKind,
    pub canvas: Canvas,
    pub background: &'static [GradientStop],
    pub body: &'static [BodyPart],
    pub placements: &'static [PlacementRect],
    pub mat: Option<Rgba8>,
    pub shadow: ShadowSpec,
    pub fabric: Option<FabricSpec>,
}

impl ProductTemplate {
    pub fn validate(&self) -> MockupResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(MockupError::validation(format!(
                "{} template canvas must be non-empty",
                self.kind
            )));
        }
        if self.background.is_empty() {
            return Err(MockupError::validation(format!(
                "{} template needs at least one background stop",
                self.kind
            )));
        }
        let mut last = 0.0f32;
        for stop in self.background {
            if !(0.0..=1.0).contains(&stop.offset) || stop.offset < last {
                return Err(MockupError::validation(format!(
                    "{} background stops must be ordered within [0, 1]",
                    self.kind
                )));
            }
            last = stop.offset;
        }

        for part in self.body {
            part.shape.to_path().map_err(|e| {
                MockupError::validation(format!("{} body part '{}': {e}", self.kind, part.name))
            })?;
        }

        if self.placements.is_empty() {
            return Err(MockupError::validation(format!(
                "{} template needs a placement rectangle",
                self.kind
            )));
        }
        let bounds = Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        );
        for p in self.placements {
            if !(p.width > 0.0 && p.height > 0.0) {
                return Err(MockupError::validation(format!(
                    "{} placement must have positive size",
                    self.kind
                )));
            }
            if p.radius < 0.0 || p.radius * 2.0 > p.width.min(p.height) {
                return Err(MockupError::validation(format!(
                    "{} placement radius out of range",
                    self.kind
                )));
            }
            if bounds.union(p.rect()) != bounds {
                return Err(MockupError::validation(format!(
                    "{} placement exceeds the canvas",
                    self.kind
                )));
            }
        }

        if self.shadow.blur_radius > 0 && !(self.shadow.sigma.is_finite() && self.shadow.sigma > 0.0)
        {
            return Err(MockupError::validation(format!(
                "{} shadow sigma must be > 0",
                self.kind
            )));
        }
        Ok(())
    }
}
