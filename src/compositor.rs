use rayon::prelude::*;

use crate::config::CompositorOpts;
use crate::encode::png::{CompositedMockup, encode_png};
use crate::foundation::error::{MockupError, MockupResult};
use crate::render::scene::draw_mockup;
use crate::render::surface::DrawingSurface;
use crate::source::decode::SourceImage;
use crate::source::fetch::{ImageFetcher, UrlFetcher};
use crate::source::loader::{load_source, parse_source_url, source_label};
use crate::template::model::ProductKind;

/// One independent compositing job for [`Compositor::composite_many`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MockupRequest {
    pub source: String,
    pub kind: String,
}

impl MockupRequest {
    pub fn new(source: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: kind.into(),
        }
    }
}

/// Produces product mockups from customer photos.
///
/// A compositor holds only configuration and a fetcher; every call allocates its own
/// surface, so one compositor can serve any number of concurrent calls.
pub struct Compositor {
    opts: CompositorOpts,
    fetcher: Box<dyn ImageFetcher>,
}

impl Compositor {
    /// Build a compositor with the default [`UrlFetcher`].
    ///
    /// The relay retry only happens when `opts.relay_url` is set. With
    /// [`CompositorOpts::default()`] there is no relay, so a failed source load is final
    /// after the direct attempt; use [`CompositorOpts::from_env`] or set the field to enable it.
    pub fn new(opts: CompositorOpts) -> MockupResult<Self> {
        opts.validate()?;
        let fetcher = UrlFetcher::new(&opts.user_agent)?;
        Ok(Self {
            opts,
            fetcher: Box::new(fetcher),
        })
    }

    pub fn with_fetcher(opts: CompositorOpts, fetcher: Box<dyn ImageFetcher>) -> MockupResult<Self> {
        opts.validate()?;
        Ok(Self { opts, fetcher })
    }

    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Composite the photo at `source` onto the product named `kind`.
    ///
    /// The kind is checked before any I/O: an unknown kind fails with
    /// [`MockupError::UnsupportedProductKind`] without fetching or drawing anything.
    #[tracing::instrument(skip(self, source), fields(source = %source_label(source)))]
    pub fn composite(&self, source: &str, kind: &str) -> MockupResult<CompositedMockup> {
        let kind: ProductKind = kind.parse()?;
        self.composite_kind(source, kind)
    }

    pub fn composite_kind(&self, source: &str, kind: ProductKind) -> MockupResult<CompositedMockup> {
        let image = self.load(source)?;
        composite_source(&image, kind)
    }

    /// Fetch and decode `source` (direct, then once via the relay).
    pub fn load(&self, source: &str) -> MockupResult<SourceImage> {
        let url = parse_source_url(source)?;
        load_source(self.fetcher.as_ref(), self.opts.relay_url.as_ref(), &url)
    }

    /// Run independent [`composite`](Self::composite) calls in parallel.
    ///
    /// Results come back in request order; one failing request does not affect the others.
    pub fn composite_many(
        &self,
        requests: &[MockupRequest],
    ) -> MockupResult<Vec<MockupResult<CompositedMockup>>> {
        let pool = build_thread_pool(self.opts.threads)?;
        Ok(pool.install(|| {
            requests
                .par_iter()
                .map(|r| self.composite(&r.source, &r.kind))
                .collect::<Vec<_>>()
        }))
    }

    /// Load `source` once and render every kind in `kinds` in parallel against it.
    pub fn composite_kinds(
        &self,
        source: &str,
        kinds: &[ProductKind],
    ) -> MockupResult<Vec<CompositedMockup>> {
        let image = self.load(source)?;
        let pool = build_thread_pool(self.opts.threads)?;
        pool.install(|| {
            kinds
                .par_iter()
                .map(|&kind| composite_source(&image, kind))
                .collect::<MockupResult<Vec<_>>>()
        })
    }
}

/// Draw and encode one mockup from an already decoded source.
#[tracing::instrument(skip(source), fields(src_w = source.width, src_h = source.height))]
pub fn composite_source(source: &SourceImage, kind: ProductKind) -> MockupResult<CompositedMockup> {
    let template = kind.template();
    template.validate()?;
    let mut surface = DrawingSurface::new(template.canvas)?;

    tracing::debug!(stage = "drawing", "drawing mockup");
    let placements = draw_mockup(&mut surface, template, source)?;
    let png = encode_png(&surface)?;
    tracing::debug!(stage = "encoded", bytes = png.len(), "mockup encoded");

    Ok(CompositedMockup {
        kind,
        width: surface.width(),
        height: surface.height(),
        placements,
        png,
    })
}

fn build_thread_pool(threads: Option<usize>) -> MockupResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MockupError::validation(
            "compositor 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MockupError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_is_rejected() {
        assert!(build_thread_pool(Some(0)).is_err());
        assert_eq!(build_thread_pool(Some(2)).unwrap().current_num_threads(), 2);
    }

    #[test]
    fn composite_source_checks_templates_and_draws_every_kind() {
        let source = SourceImage {
            width: 3,
            height: 2,
            rgba8_premul: std::sync::Arc::new([40u8, 80, 120, 255].repeat(6)),
        };
        for kind in ProductKind::ALL {
            let m = composite_source(&source, kind).unwrap();
            assert_eq!(m.width, kind.template().canvas.width);
            assert_eq!(m.placements.len(), kind.template().placements.len());
        }
    }

    #[test]
    fn construction_validates_opts() {
        let opts = CompositorOpts {
            threads: Some(0),
            ..CompositorOpts::default()
        };
        assert!(matches!(
            Compositor::new(opts),
            Err(MockupError::Validation(_))
        ));
    }
}
