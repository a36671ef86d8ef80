use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use crate::adapter_http_server::ServerState;
use crate::domain::prelude::Netdisk;
use crate::domain::settings::RawSettings;

/// The requested page as JSON, for presentation layers other than the HTML one.
#[tracing::instrument(skip_all, fields(repo = raw.repo.as_deref()), err(Debug))]
pub async fn handler<N>(
    State(state): State<ServerState<N>>,
    Query(raw): Query<RawSettings>,
) -> Result<Response, super::ApiError>
where
    N: Netdisk + Clone,
{
    let settings = raw.settings()?;
    let assets = state.netdisk.aggregate(&settings.repo).await?;
    let page = super::requested_page(&assets, &settings, &raw);
    Ok(Json(page).into_response())
}
