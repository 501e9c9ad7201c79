use anyhow::Context as _;
use base64::Engine as _;
use url::Url;

use crate::foundation::error::{MockupError, MockupResult};

/// Retrieves the raw bytes behind a source URL.
///
/// Implementations must be shareable across the worker threads used for batch compositing.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> MockupResult<Vec<u8>>;
}

/// Default fetcher: `http`/`https` over a blocking HTTP client, plus `file` and `data` URLs.
pub struct UrlFetcher {
    client: reqwest::blocking::Client,
}

impl UrlFetcher {
    pub fn new(user_agent: &str) -> MockupResult<Self> {
        // No request timeout: a source that never answers is bounded by the transport only.
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(None)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }

    fn fetch_http(&self, url: &Url) -> MockupResult<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;
        let bytes = response
            .bytes()
            .with_context(|| format!("read body of {url}"))?;
        Ok(bytes.to_vec())
    }
}

impl ImageFetcher for UrlFetcher {
    fn fetch(&self, url: &Url) -> MockupResult<Vec<u8>> {
        match url.scheme() {
            "http" | "https" => self.fetch_http(url),
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| MockupError::validation(format!("not a local file url: {url}")))?;
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read source file '{}'", path.display()))?;
                Ok(bytes)
            }
            "data" => decode_data_url(url.as_str()),
            other => Err(MockupError::validation(format!(
                "unsupported url scheme '{other}'"
            ))),
        }
    }
}

/// Decode a base64 `data:` URL payload; non-base64 data URLs are rejected.
pub(crate) fn decode_data_url(url: &str) -> MockupResult<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| MockupError::validation("not a data url"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| MockupError::validation("data url is missing ','"))?;
    if !meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(MockupError::validation(
            "only base64-encoded data urls are supported",
        ));
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .context("decode base64 data url payload")?;
    Ok(bytes)
}

/// Build the same-origin relay request for `source`: `<relay>?url=<source>`.
pub fn relay_url(relay: &Url, source: &Url) -> Url {
    let mut out = relay.clone();
    out.query_pairs_mut().append_pair("url", source.as_str());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_url_carries_source_as_query_param() {
        let relay = Url::parse("https://shop.example/api/proxy-image").unwrap();
        let source = Url::parse("https://cdn.example/pets/a b.png?sig=1&x=2").unwrap();
        let out = relay_url(&relay, &source);
        assert_eq!(out.path(), "/api/proxy-image");
        let (k, v) = out.query_pairs().next().unwrap();
        assert_eq!(k, "url");
        assert_eq!(v, source.as_str());
    }

    #[test]
    fn relay_url_keeps_existing_query() {
        let relay = Url::parse("https://shop.example/relay?token=abc").unwrap();
        let source = Url::parse("https://cdn.example/p.png").unwrap();
        let out = relay_url(&relay, &source);
        let pairs: Vec<_> = out.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("token".to_string(), "abc".to_string()));
        assert_eq!(pairs[1].0, "url");
    }

    #[test]
    fn data_url_base64_roundtrip() {
        let payload = base64::engine::general_purpose::STANDARD.encode([1u8, 2, 3, 250]);
        let url = format!("data:image/png;base64,{payload}");
        assert_eq!(decode_data_url(&url).unwrap(), vec![1u8, 2, 3, 250]);
    }

    #[test]
    fn data_url_without_base64_is_rejected() {
        assert!(decode_data_url("data:text/plain,hello").is_err());
        assert!(decode_data_url("data:image/png;base64").is_err());
    }

    #[test]
    fn file_url_reads_local_bytes() {
        let path = std::env::temp_dir().join(format!(
            "furfame_fetch_file_{}.bin",
            std::process::id()
        ));
        std::fs::write(&path, [9u8, 8, 7]).unwrap();
        let fetcher = UrlFetcher::new("furfame-test").unwrap();
        let url = Url::from_file_path(&path).unwrap();
        assert_eq!(fetcher.fetch(&url).unwrap(), vec![9u8, 8, 7]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let fetcher = UrlFetcher::new("furfame-test").unwrap();
        let url = Url::parse("ftp://example.com/a.png").unwrap();
        assert!(matches!(
            fetcher.fetch(&url),
            Err(MockupError::Validation(_))
        ));
    }
}
