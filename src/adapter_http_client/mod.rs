//! Outbound HTTP plumbing shared by the upstream adapters.

use reqwest::header::{HeaderMap, HeaderValue};

mod middleware;

pub(crate) use middleware::TracingMiddleware;

pub(crate) const USER_AGENT: &str = "ghdisk";

/// Builds a client with the default headers and the tracing middleware.
///
/// Requests are sent once, there is no retry layer.
pub(crate) fn build(
    headers: HeaderMap,
    peer_service: &'static str,
) -> anyhow::Result<reqwest_middleware::ClientWithMiddleware> {
    build_with(reqwest::Client::builder(), headers, peer_service)
}

/// Same as [`build`], starting from a builder carrying adapter specific options.
pub(crate) fn build_with(
    builder: reqwest::ClientBuilder,
    mut headers: HeaderMap,
    peer_service: &'static str,
) -> anyhow::Result<reqwest_middleware::ClientWithMiddleware> {
    headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));
    let client = builder
        .default_headers(headers)
        .tcp_keepalive(std::time::Duration::from_secs(30))
        .build()?;
    Ok(reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::new(peer_service))
        .build())
}
