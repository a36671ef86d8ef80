//! Fetches the optional announcement shown above the file list.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap};

use crate::domain::entity::Announcement;
use crate::domain::error::AnnouncementError;

mod target;

const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug)]
pub struct Config {
    /// bound on the whole fetch, connection included
    timeout: Duration,
    /// when not empty, the only hosts announcements are fetched from
    allowed_hosts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            allowed_hosts: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            timeout: Duration::from_secs(crate::with_env_as_or(
                "ANNOUNCEMENT_TIMEOUT",
                DEFAULT_TIMEOUT_SECS,
            )?),
            allowed_hosts: crate::maybe_env("ANNOUNCEMENT_ALLOWED_HOSTS")
                .map(|value| value.split(',').map(String::from).collect())
                .unwrap_or_default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> anyhow::Result<Client> {
        let policy = target::TargetPolicy::new(&self.allowed_hosts);
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .redirect(policy.redirect())
            .dns_resolver(Arc::new(policy.clone()));
        let inner =
            crate::adapter_http_client::build_with(builder, HeaderMap::new(), "announcement")?;
        Ok(Client {
            inner,
            policy,
            timeout: self.timeout,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    inner: reqwest_middleware::ClientWithMiddleware,
    policy: target::TargetPolicy,
    timeout: Duration,
}

impl Client {
    /// Keeps the reason a redirect or a resolved address was refused, everything else is
    /// a transport failure.
    fn transport_error(&self, err: &reqwest::Error) -> AnnouncementError {
        if err.is_timeout() {
            return AnnouncementError::Transport(format!("timed out after {:?}", self.timeout));
        }
        let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
        while let Some(current) = source {
            if let Some(found) = current.downcast_ref::<AnnouncementError>() {
                return found.clone();
            }
            source = current.source();
        }
        AnnouncementError::Transport(err.to_string())
    }
}

/// HTML when the server says so, or when the URL names an `.html` document.
fn is_html(content_type: Option<&str>, url: &str) -> bool {
    content_type.is_some_and(|value| value.contains("text/html"))
        || url.to_lowercase().ends_with(".html")
}

impl crate::domain::prelude::AnnouncementSource for Client {
    #[tracing::instrument(skip(self), err(Display))]
    async fn fetch_announcement(&self, url: &str) -> Result<Announcement, AnnouncementError> {
        let target = self.policy.check(url)?;
        let res = self
            .inner
            .get(target)
            .send()
            .await
            .map_err(|err| match err {
                reqwest_middleware::Error::Reqwest(err) => self.transport_error(&err),
                other => AnnouncementError::Transport(other.to_string()),
            })?;
        if !res.status().is_success() {
            return Err(AnnouncementError::Status(res.status().as_u16()));
        }
        let html = is_html(
            res.headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            url,
        );
        let content = res
            .text()
            .await
            .map_err(|err| self.transport_error(&err))?;
        Ok(if html {
            Announcement::Html(content)
        } else {
            Announcement::Text(content)
        })
    }
}
