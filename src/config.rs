use url::Url;

use crate::foundation::error::{MockupError, MockupResult};

pub const ENV_RELAY_URL: &str = "FURFAME_RELAY_URL";
pub const ENV_USER_AGENT: &str = "FURFAME_USER_AGENT";
pub const ENV_THREADS: &str = "FURFAME_THREADS";

/// Options for [`Compositor`](crate::Compositor).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositorOpts {
    /// Same-origin relay used for the single retry of a failed source load
    /// (`<relay_url>?url=<source>`). `None` disables the retry.
    pub relay_url: Option<Url>,
    /// User agent sent with HTTP source requests.
    pub user_agent: String,
    /// Worker threads for batch compositing; `None` uses the rayon default.
    pub threads: Option<usize>,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            relay_url: None,
            user_agent: concat!("furfame-mockup/", env!("CARGO_PKG_VERSION")).to_string(),
            threads: None,
        }
    }
}

impl CompositorOpts {
    /// Defaults overridden by `FURFAME_RELAY_URL`, `FURFAME_USER_AGENT` and `FURFAME_THREADS`.
    pub fn from_env() -> MockupResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MockupResult<Self> {
        let mut opts = Self::default();
        if let Some(v) = lookup(ENV_RELAY_URL).filter(|v| !v.trim().is_empty()) {
            let url = Url::parse(v.trim()).map_err(|e| {
                MockupError::validation(format!("{ENV_RELAY_URL} is not a valid url: {e}"))
            })?;
            opts.relay_url = Some(url);
        }
        if let Some(v) = lookup(ENV_USER_AGENT).filter(|v| !v.trim().is_empty()) {
            opts.user_agent = v.trim().to_string();
        }
        if let Some(v) = lookup(ENV_THREADS).filter(|v| !v.trim().is_empty()) {
            let n = v.trim().parse::<usize>().map_err(|e| {
                MockupError::validation(format!("{ENV_THREADS} must be an integer: {e}"))
            })?;
            opts.threads = Some(n);
        }
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> MockupResult<()> {
        if let Some(0) = self.threads {
            return Err(MockupError::validation(
                "compositor 'threads' must be >= 1 when set",
            ));
        }
        if let Some(relay) = &self.relay_url
            && !matches!(relay.scheme(), "http" | "https")
        {
            return Err(MockupError::validation(format!(
                "relay url must be http(s), got '{}'",
                relay.scheme()
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(MockupError::validation("user agent must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let opts = CompositorOpts::from_lookup(lookup(&[])).unwrap();
        assert_eq!(opts, CompositorOpts::default());
        assert!(opts.user_agent.starts_with("furfame-mockup/"));
    }

    #[test]
    fn environment_overrides_are_applied() {
        let opts = CompositorOpts::from_lookup(lookup(&[
            (ENV_RELAY_URL, "https://shop.example/api/proxy-image"),
            (ENV_USER_AGENT, "storefront/2"),
            (ENV_THREADS, " 4 "),
        ]))
        .unwrap();
        assert_eq!(
            opts.relay_url.unwrap().as_str(),
            "https://shop.example/api/proxy-image"
        );
        assert_eq!(opts.user_agent, "storefront/2");
        assert_eq!(opts.threads, Some(4));
    }

    #[test]
    fn invalid_values_are_validation_errors() {
        for pairs in [
            [(ENV_THREADS, "0")],
            [(ENV_THREADS, "many")],
            [(ENV_RELAY_URL, "::nope")],
            [(ENV_RELAY_URL, "file:///tmp/relay")],
        ] {
            assert!(matches!(
                CompositorOpts::from_lookup(lookup(&pairs)),
                Err(MockupError::Validation(_))
            ));
        }
    }

    #[test]
    fn opts_deserialize_with_defaults() {
        let opts: CompositorOpts =
            serde_json::from_str(r#"{"relay_url":"https://r.example/p"}"#).unwrap();
        assert_eq!(opts.threads, None);
        assert!(opts.relay_url.is_some());
        assert!(!opts.user_agent.is_empty());
    }
}
