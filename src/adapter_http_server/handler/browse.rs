use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;

use crate::adapter_html::{BrowsePage, ConfigErrorPage};
use crate::adapter_http_server::ServerState;
use crate::domain::prelude::Netdisk;
use crate::domain::settings::RawSettings;

/// Renders the netdisk. Listing and announcement failures degrade to an inline message.
#[tracing::instrument(skip_all, fields(repo = raw.repo.as_deref()), err(Debug))]
pub async fn handler<N>(
    State(state): State<ServerState<N>>,
    Query(raw): Query<RawSettings>,
) -> Result<(StatusCode, Html<String>), super::ApiError>
where
    N: Netdisk + Clone,
{
    let settings = match raw.settings() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::debug!(error = %err, "invalid configuration");
            let page = ConfigErrorPage::new(&err).render()?;
            return Ok((StatusCode::BAD_REQUEST, Html(page)));
        }
    };
    let browse = state.netdisk.browse(&settings).await;
    let listing = match browse.listing {
        Ok(ref assets) => Ok(super::requested_page(assets, &settings, &raw)),
        Err(ref err) => Err(err),
    };
    let page = BrowsePage::new(&settings, listing, browse.announcement.as_ref()).render()?;
    Ok((StatusCode::OK, Html(page)))
}
