use askama::Template;
use axum::extract::{Form, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::adapter_html::{DOCUMENT_FILENAME, StandaloneDocument};
use crate::adapter_http_server::ServerState;
use crate::domain::prelude::Netdisk;
use crate::domain::settings::RawSettings;

/// Builds the standalone document and serves it as a download.
///
/// Listing failures are rendered inside the document, only invalid settings are rejected.
async fn snippet<N>(state: &ServerState<N>, raw: &RawSettings) -> Result<Response, super::ApiError>
where
    N: Netdisk + Clone,
{
    let settings = raw.settings()?;
    let browse = state.netdisk.browse(&settings).await;
    if let Err(ref err) = browse.listing {
        tracing::warn!(error = %err, "standalone document generated without files");
    }
    let share_url = super::link::share_url(&state.public_base_url, &settings);
    let document = StandaloneDocument::new(
        &settings,
        browse.listing.as_deref(),
        browse.announcement.as_ref(),
        chrono::Utc::now(),
    )
    .with_share_url(share_url)
    .render()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOCUMENT_FILENAME}\""),
            ),
        ],
        document,
    )
        .into_response())
}

#[tracing::instrument(skip_all, fields(repo = raw.repo.as_deref()), err(Debug))]
pub async fn query_handler<N>(
    State(state): State<ServerState<N>>,
    Query(raw): Query<RawSettings>,
) -> Result<Response, super::ApiError>
where
    N: Netdisk + Clone,
{
    snippet(&state, &raw).await
}

#[tracing::instrument(skip_all, fields(repo = raw.repo.as_deref()), err(Debug))]
pub async fn form_handler<N>(
    State(state): State<ServerState<N>>,
    Form(raw): Form<RawSettings>,
) -> Result<Response, super::ApiError>
where
    N: Netdisk + Clone,
{
    snippet(&state, &raw).await
}
