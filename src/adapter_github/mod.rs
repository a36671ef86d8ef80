use std::borrow::Cow;

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};

pub(crate) mod entity;
mod releases;

const DEFAULT_PER_PAGE: u32 = 30;

pub struct Config {
    base_url: Cow<'static, str>,
    per_page: u32,
    token: Option<String>,
}

impl Config {
    pub fn new(base_url: impl Into<Cow<'static, str>>) -> Self {
        Self {
            base_url: base_url.into(),
            per_page: DEFAULT_PER_PAGE,
            token: None,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            base_url: crate::with_env_or("GITHUB_BASE_URL", "https://api.github.com"),
            per_page: crate::with_env_as_or("GITHUB_RELEASES_PER_PAGE", DEFAULT_PER_PAGE)?,
            token: crate::maybe_env("GITHUB_TOKEN"),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Releases requested per call, clamped to `1..=100` when building.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn build(self) -> anyhow::Result<Client> {
        let base_url = url::Url::parse(&self.base_url)
            .with_context(|| format!("invalid github base url {:?}", self.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("github base url {:?} cannot be a base", self.base_url);
        }
        let mut headers = HeaderMap::new();
        headers.insert(
            "Accept",
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = self.token {
            headers.insert(
                "Authorization",
                HeaderValue::from_str(&format!("Bearer {token}"))?,
            );
        }
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        let inner = crate::adapter_http_client::build(headers, "github")?;
        Ok(Client {
            base_url,
            per_page: self.per_page.clamp(1, 100),
            inner,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    base_url: url::Url,
    per_page: u32,
    inner: reqwest_middleware::ClientWithMiddleware,
}
