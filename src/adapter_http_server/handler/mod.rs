use std::borrow::Cow;

use axum::response::IntoResponse;
use axum::routing::get;

use crate::adapter_http_server::ServerState;
use crate::domain::entity::Asset;
use crate::domain::error::{ConfigError, ListingError};
use crate::domain::pager::{PageView, ViewState, paginate};
use crate::domain::settings::{RawSettings, Settings};

mod assets;
mod browse;
mod generate;
mod health;
mod link;
mod snippet;

pub fn build<N>() -> axum::Router<ServerState<N>>
where
    N: crate::domain::prelude::Netdisk + Clone,
{
    axum::Router::new()
        .route("/", get(browse::handler::<N>))
        .route("/api/assets", get(assets::handler::<N>))
        .route("/generate", get(generate::handler))
        .route(
            "/snippet",
            get(snippet::query_handler::<N>).post(snippet::form_handler::<N>),
        )
        .route(
            "/link",
            get(link::query_handler::<N>).post(link::form_handler::<N>),
        )
        .route("/healthz", get(health::handler))
}

/// Page visible after navigating from page 1 to the requested page, if any.
fn requested_page<'a>(assets: &'a [Asset], settings: &Settings, raw: &RawSettings) -> PageView<'a> {
    let state = ViewState::initial(settings.page_size);
    match raw.requested_page() {
        Some(requested) => paginate(assets, state, requested).1,
        None => PageView::new(assets, state),
    }
}

#[derive(Debug)]
struct ApiError {
    status_code: axum::http::StatusCode,
    message: Cow<'static, str>,
}

impl ApiError {
    #[inline]
    fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status_code: axum::http::StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(value: ConfigError) -> Self {
        Self::bad_request(value.to_string())
    }
}

impl From<ListingError> for ApiError {
    fn from(value: ListingError) -> Self {
        let status_code = match value {
            ListingError::NotFound => axum::http::StatusCode::NOT_FOUND,
            ListingError::RateLimited => axum::http::StatusCode::TOO_MANY_REQUESTS,
            ListingError::Network { .. } | ListingError::Malformed(_) => {
                axum::http::StatusCode::BAD_GATEWAY
            }
        };
        Self {
            status_code,
            message: value.to_string().into(),
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(value: askama::Error) -> Self {
        tracing::error!(error = %value, "unable to render template");
        Self {
            status_code: axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            message: "unable to render page".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, self.message).into_response()
    }
}


#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use crate::adapter_http_server::ServerState;
    use crate::domain::aggregate::tests::asset;
    use crate::domain::entity::Asset;
    use crate::domain::prelude::MockNetdiskService;

    pub(crate) fn assets(count: u64) -> Vec<Asset> {
        (1..=count)
            .map(|id| asset(id, &format!("file-{id}.zip"), "2024-01-01T00:00:00Z"))
            .collect()
    }

    pub(crate) fn state(netdisk: MockNetdiskService) -> ServerState<MockNetdiskService> {
        ServerState {
            netdisk,
            public_base_url: Arc::new(url::Url::parse("https://disk.example.com/").unwrap()),
        }
    }
}
