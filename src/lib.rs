#![forbid(unsafe_code)]
//! Product mockup compositor for the Fur & Fame storefront.
//!
//! Given a customer photo and a product kind (`mug`, `canvas`, `blanket`), [`Compositor`]
//! draws the product template, contain-fits the photo into its placement rectangle, clips it
//! to the rounded placement, and returns the result as PNG bytes.

mod breed;
mod compositor;
mod config;
mod encode;
mod foundation;
mod layout;
mod render;
mod source;
mod template;

pub use breed::{
    BreedMatch, CAT_BREEDS, DOG_BREEDS, Species, levenshtein, normalize_breed, validate_breed,
};
pub use compositor::{Compositor, MockupRequest, composite_source};
pub use config::{CompositorOpts, ENV_RELAY_URL, ENV_THREADS, ENV_USER_AGENT};
pub use encode::png::{CompositedMockup, encode_png};
pub use foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Rgba8Premul};
pub use foundation::error::{MockupError, MockupResult};
pub use layout::fit::{FittedRect, fit_contain};
pub use render::scene::draw_mockup;
pub use render::surface::DrawingSurface;
pub use source::decode::{SourceImage, decode_image};
pub use source::fetch::{ImageFetcher, UrlFetcher, relay_url};
pub use source::loader::{load_source, parse_source_url};
pub use template::catalog::{all_templates, template_for};
pub use template::model::{
    BodyPart, FabricSpec, GradientStop, PartShape, PlacementRect, ProductKind, ProductTemplate,
    ShadowSpec, StrokeSpec,
};
