use axum::Json;
use axum::extract::{Form, Query, State};

use crate::adapter_http_server::ServerState;
use crate::domain::settings::{RawSettings, Settings};

#[derive(Debug, serde::Serialize)]
pub struct ShareLink {
    pub url: String,
}

/// Live view of `settings` served from `base`.
pub fn share_url(base: &url::Url, settings: &Settings) -> url::Url {
    let mut url = base.clone();
    url.set_fragment(None);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in settings.to_query_pairs() {
            pairs.append_pair(key, &value);
        }
    }
    url
}

fn link<N>(state: &ServerState<N>, raw: &RawSettings) -> Result<Json<ShareLink>, super::ApiError> {
    let settings = raw.settings()?;
    Ok(Json(ShareLink {
        url: share_url(&state.public_base_url, &settings).into(),
    }))
}

pub async fn query_handler<N>(
    State(state): State<ServerState<N>>,
    Query(raw): Query<RawSettings>,
) -> Result<Json<ShareLink>, super::ApiError>
where
    N: crate::domain::prelude::Netdisk + Clone,
{
    link(&state, &raw)
}

pub async fn form_handler<N>(
    State(state): State<ServerState<N>>,
    Form(raw): Form<RawSettings>,
) -> Result<Json<ShareLink>, super::ApiError>
where
    N: crate::domain::prelude::Netdisk + Clone,
{
    link(&state, &raw)
}
