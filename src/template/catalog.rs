use crate::foundation::core::{Canvas, Rgba8};

use super::model::{
    BodyPart, FabricSpec, GradientStop, PartShape, PlacementRect, ProductKind, ProductTemplate,
    ShadowSpec, StrokeSpec,
};

const MUG_OUTLINE: Rgba8 = Rgba8::rgb(0xb4, 0xbc, 0xc4);

pub static MUG: ProductTemplate = ProductTemplate {
    kind: ProductKind::Mug,
    canvas: Canvas::new(800, 800),
    background: &[
        GradientStop {
            offset: 0.0,
            color: Rgba8::rgb(0xf1, 0xf4, 0xf7),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba8::rgb(0xcf, 0xd8, 0xdf),
        },
    ],
    body: &[
        BodyPart {
            name: "handle",
            shape: PartShape::Path {
                svg_path_d: "M 556 290 C 690 290 690 530 556 530",
            },
            fill: None,
            stroke: Some(StrokeSpec {
                color: Rgba8::rgb(0xf7, 0xf7, 0xf7),
                width: 30.0,
            }),
        },
        BodyPart {
            name: "body",
            shape: PartShape::RoundedRect {
                x: 200.0,
                y: 180.0,
                width: 360.0,
                height: 440.0,
                radius: 28.0,
            },
            fill: Some(Rgba8::rgb(0xfd, 0xfd, 0xfd)),
            stroke: Some(StrokeSpec {
                color: MUG_OUTLINE,
                width: 3.0,
            }),
        },
        BodyPart {
            name: "rim",
            shape: PartShape::Ellipse {
                cx: 380.0,
                cy: 184.0,
                rx: 180.0,
                ry: 16.0,
            },
            fill: Some(Rgba8::rgb(0xe6, 0xea, 0xee)),
            stroke: Some(StrokeSpec {
                color: MUG_OUTLINE,
                width: 2.0,
            }),
        },
    ],
    placements: &[PlacementRect {
        x: 230.0,
        y: 240.0,
        width: 300.0,
        height: 320.0,
        radius: 16.0,
        outline: None,
    }],
    mat: None,
    shadow: ShadowSpec {
        offset_x: 14,
        offset_y: 18,
        blur_radius: 12,
        sigma: 6.0,
        color: Rgba8::rgba(0x1c, 0x22, 0x2a, 90),
    },
    fabric: None,
};

pub static CANVAS: ProductTemplate = ProductTemplate {
    kind: ProductKind::Canvas,
    canvas: Canvas::new(800, 1000),
    background: &[
        GradientStop {
            offset: 0.0,
            color: Rgba8::rgb(0xf5, 0xf1, 0xea),
        },
        GradientStop {
            offset: 0.6,
            color: Rgba8::rgb(0xea, 0xe4, 0xda),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba8::rgb(0xdd, 0xd6, 0xcb),
        },
    ],
    body: &[BodyPart {
        name: "frame",
        shape: PartShape::RoundedRect {
            x: 110.0,
            y: 140.0,
            width: 580.0,
            height: 720.0,
            radius: 6.0,
        },
        fill: Some(Rgba8::rgb(0x6b, 0x4f, 0x3a)),
        stroke: Some(StrokeSpec {
            color: Rgba8::rgb(0x3e, 0x2c, 0x20),
            width: 4.0,
        }),
    }],
    // Inner frame region: 40px frame padding on every side.
    placements: &[PlacementRect {
        x: 150.0,
        y: 180.0,
        width: 500.0,
        height: 640.0,
        radius: 0.0,
        outline: Some(StrokeSpec {
            color: Rgba8::rgb(0x2a, 0x1f, 0x17),
            width: 2.0,
        }),
    }],
    mat: Some(Rgba8::rgb(0xfb, 0xfa, 0xf7)),
    shadow: ShadowSpec {
        offset_x: 0,
        offset_y: 16,
        blur_radius: 14,
        sigma: 7.0,
        color: Rgba8::rgba(0x20, 0x18, 0x10, 110),
    },
    fabric: None,
};

pub static BLANKET: ProductTemplate = ProductTemplate {
    kind: ProductKind::Blanket,
    canvas: Canvas::new(1000, 800),
    background: &[
        GradientStop {
            offset: 0.0,
            color: Rgba8::rgb(0xf4, 0xef, 0xe9),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba8::rgb(0xe0, 0xd5, 0xc8),
        },
    ],
    body: &[BodyPart {
        name: "blanket",
        shape: PartShape::RoundedRect {
            x: 90.0,
            y: 80.0,
            width: 820.0,
            height: 640.0,
            radius: 44.0,
        },
        fill: Some(Rgba8::rgb(0xf7, 0xf3, 0xee)),
        stroke: Some(StrokeSpec {
            color: Rgba8::rgb(0xcd, 0xbf, 0xae),
            width: 3.0,
        }),
    }],
    placements: &[PlacementRect {
        x: 130.0,
        y: 120.0,
        width: 740.0,
        height: 560.0,
        radius: 32.0,
        outline: Some(StrokeSpec {
            color: Rgba8::rgb(0xcd, 0xbf, 0xae),
            width: 2.0,
        }),
    }],
    mat: None,
    shadow: ShadowSpec {
        offset_x: 0,
        offset_y: 14,
        blur_radius: 16,
        sigma: 8.0,
        color: Rgba8::rgba(0x30, 0x24, 0x18, 80),
    },
    fabric: Some(FabricSpec {
        seed: 0x5eed_b1a2_4e70,
        density_permille: 90,
        intensity: 22,
    }),
};

pub fn template_for(kind: ProductKind) -> &'static ProductTemplate {
    match kind {
        ProductKind::Mug => &MUG,
        ProductKind::Canvas => &CANVAS,
        ProductKind::Blanket => &BLANKET,
    }
}

/// All product templates in catalog order.
pub fn all_templates() -> [&'static ProductTemplate; 3] {
    ProductKind::ALL.map(template_for)
}
