use std::borrow::Cow;

use anyhow::Context;

pub mod adapter_announcement;
pub mod adapter_github;
pub mod adapter_html;
mod adapter_http_client;
pub mod adapter_http_server;
pub mod domain;
pub mod tracing;

fn maybe_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn with_env_or(name: &str, default_value: &'static str) -> Cow<'static, str> {
    maybe_env(name)
        .map(Cow::Owned)
        .unwrap_or(Cow::Borrowed(default_value))
}

fn with_env_as_or<T>(name: &str, default_value: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    <T as std::str::FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(value) = maybe_env(name) else {
        return Ok(default_value);
    };
    value
        .parse::<T>()
        .with_context(|| format!("unable to parse value from {name:?}"))
}

pub struct Config {
    announcement: adapter_announcement::Config,
    github: adapter_github::Config,
    http_server: adapter_http_server::Config,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            announcement: adapter_announcement::Config::from_env()?,
            github: adapter_github::Config::from_env()?,
            http_server: adapter_http_server::Config::from_env()?,
        })
    }

    pub fn build(self) -> anyhow::Result<Application> {
        let github = self.github.build()?;
        let announcement = self.announcement.build()?;
        let netdisk = domain::NetdiskService::new(github, announcement);
        let http_server = self.http_server.build(netdisk)?;

        Ok(Application { http_server })
    }
}

pub struct Application {
    http_server: adapter_http_server::Server<
        domain::NetdiskService<adapter_github::Client, adapter_announcement::Client>,
    >,
}

impl Application {
    pub async fn run(self) -> anyhow::Result<()> {
        self.http_server.run().await
    }
}
