use std::borrow::Cow;

use url::Url;

use super::decode::{SourceImage, decode_image};
use super::fetch::{ImageFetcher, relay_url};
use crate::foundation::error::{MockupError, MockupResult};

/// Longest source reference recorded verbatim in logs and errors.
const SOURCE_LABEL_MAX: usize = 96;

/// Parse a caller-supplied source reference.
pub fn parse_source_url(source: &str) -> MockupResult<Url> {
    Url::parse(source.trim()).map_err(|e| {
        MockupError::validation(format!(
            "invalid source image url '{}': {e}",
            source_label(source)
        ))
    })
}

/// Short form of a source reference for spans and error messages.
///
/// Inline `data:` photos can be megabytes long; anything past [`SOURCE_LABEL_MAX`] chars is
/// cut to its first 64 chars plus the total length.
pub(crate) fn source_label(source: &str) -> Cow<'_, str> {
    match source.char_indices().nth(SOURCE_LABEL_MAX) {
        None => Cow::Borrowed(source),
        Some(_) => {
            let cut = source.char_indices().nth(64).map_or(source.len(), |(i, _)| i);
            Cow::Owned(format!("{}... ({} bytes)", &source[..cut], source.len()))
        }
    }
}

/// Load and decode `source`, retrying through `relay` exactly once if the direct attempt fails.
///
/// An attempt is fetch + decode: bytes that arrive but do not decode count as a failure.
/// Only `http`/`https` sources go through the relay; local and inline sources fail after the
/// direct attempt.
#[tracing::instrument(skip_all, fields(source = %source_label(source.as_str())))]
pub fn load_source(
    fetcher: &dyn ImageFetcher,
    relay: Option<&Url>,
    source: &Url,
) -> MockupResult<SourceImage> {
    tracing::debug!(stage = "loading_source", "fetching source image");
    let direct_err = match attempt(fetcher, source) {
        Ok(img) => return Ok(img),
        Err(e) => e,
    };
    let label = source_label(source.as_str());

    if !matches!(source.scheme(), "http" | "https") {
        tracing::warn!(error = %direct_err, scheme = source.scheme(), "source load failed");
        return Err(MockupError::source_unavailable(
            label,
            format!(
                "direct: {direct_err}; relay not applicable to {} sources",
                source.scheme()
            ),
        ));
    }

    let Some(relay) = relay else {
        tracing::warn!(error = %direct_err, "source load failed and no relay is configured");
        return Err(MockupError::source_unavailable(
            label,
            format!("direct: {direct_err}; no relay configured"),
        ));
    };

    let via = relay_url(relay, source);
    tracing::warn!(
        error = %direct_err,
        stage = "retrying_via_relay",
        relay = %via,
        "direct source load failed, retrying via relay"
    );
    attempt(fetcher, &via).map_err(|relay_err| {
        tracing::warn!(error = %relay_err, stage = "failed", "relay source load failed");
        MockupError::source_unavailable(label, format!("direct: {direct_err}; relay: {relay_err}"))
    })
}

fn attempt(fetcher: &dyn ImageFetcher, url: &Url) -> MockupResult<SourceImage> {
    let bytes = fetcher.fetch(url)?;
    if bytes.is_empty() {
        return Err(MockupError::validation("empty response body"));
    }
    decode_image(&bytes)
}
