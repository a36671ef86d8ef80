use std::sync::Arc;

use anyhow::Context;

mod handler;
mod middleware;

const DEFAULT_ADDRESS: std::net::IpAddr = std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3000;

pub struct Config {
    address: std::net::IpAddr,
    port: u16,
    public_base_url: url::Url,
}

impl Config {
    pub fn new(public_base_url: url::Url) -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            port: DEFAULT_PORT,
            public_base_url,
        }
    }

    pub fn from_env() -> anyhow::Result<Config> {
        let public_base_url = crate::with_env_or("PUBLIC_BASE_URL", "http://localhost:3000/");
        Ok(Self {
            address: crate::with_env_as_or("ADDRESS", DEFAULT_ADDRESS)?,
            port: crate::with_env_as_or("PORT", DEFAULT_PORT)?,
            public_base_url: url::Url::parse(&public_base_url)
                .with_context(|| format!("invalid public base url {public_base_url:?}"))?,
        })
    }

    pub fn build<N>(self, netdisk: N) -> anyhow::Result<Server<N>> {
        Ok(Server {
            address: std::net::SocketAddr::from((self.address, self.port)),
            state: ServerState {
                netdisk,
                public_base_url: Arc::new(self.public_base_url),
            },
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ServerState<N> {
    netdisk: N,
    public_base_url: Arc<url::Url>,
}

#[derive(Debug)]
pub struct Server<N> {
    address: std::net::SocketAddr,
    state: ServerState<N>,
}

impl<N> Server<N>
where
    N: crate::domain::prelude::Netdisk + Clone,
{
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.address).await?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener.
    pub async fn serve(self, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
        let app = handler::build()
            .layer(middleware::tracing::layer())
            .with_state(self.state);
        tracing::info!(address = ?listener.local_addr().ok(), "starting server");
        axum::serve(listener, app).await.context("server crashed")
    }
}
