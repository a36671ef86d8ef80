//! In-process stand-in for the GitHub API and announcement hosts.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

pub const TOKEN: &str = "secret-token";

fn releases() -> serde_json::Value {
    serde_json::json!([
        {
            "name": "First",
            "tag_name": "v1.0",
            "assets": [
                {
                    "id": 1,
                    "name": "a.zip",
                    "browser_download_url": "https://github.com/octo/disk/releases/download/v1.0/a.zip",
                    "size": 1536,
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-01-01T00:00:00Z"
                },
                {
                    "id": 2,
                    "name": "b.txt",
                    "browser_download_url": "https://github.com/octo/disk/releases/download/v1.0/b.txt",
                    "size": 12,
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-03-01T00:00:00Z"
                },
                {
                    "id": 3,
                    "name": "c.pdf",
                    "browser_download_url": "https://github.com/octo/disk/releases/download/v1.0/c.pdf",
                    "size": 1048576,
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-02-01T00:00:00Z"
                }
            ]
        },
        {
            "name": null,
            "tag_name": "v2.0",
            "assets": [
                {
                    "id": 4,
                    "name": "d.exe",
                    "browser_download_url": "https://github.com/octo/disk/releases/download/v2.0/d.exe",
                    "size": 2048,
                    "created_at": "2024-04-01T00:00:00Z",
                    "updated_at": "2024-04-01T00:00:00Z"
                },
                {
                    "id": 5,
                    "name": "e.md",
                    "browser_download_url": "https://github.com/octo/disk/releases/download/v2.0/e.md",
                    "size": 100,
                    "created_at": "2024-01-15T00:00:00Z",
                    "updated_at": "2024-01-15T00:00:00Z"
                }
            ]
        },
        {
            "name": "Empty",
            "tag_name": "v0.1"
        }
    ])
}

async fn list_releases(
    Path((owner, name)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    let page = query.get("page").map(String::as_str);
    if accept != Some("application/vnd.github+json") || page != Some("1") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    match (owner.as_str(), name.as_str()) {
        ("octo", "disk") => axum::Json(releases()).into_response(),
        ("octo", "empty") => axum::Json(serde_json::json!([])).into_response(),
        ("octo", "limited") => StatusCode::FORBIDDEN.into_response(),
        ("octo", "broken") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        ("octo", "weird") => {
            axum::Json(serde_json::json!({ "message": "not a list" })).into_response()
        }
        ("octo", "private") => {
            let expected = format!("Bearer {TOKEN}");
            let authorized = headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                == Some(expected.as_str());
            if !authorized {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            let per_page = query.get("per_page").cloned().unwrap_or_default();
            axum::Json(serde_json::json!([{
                "name": format!("per page {per_page}"),
                "tag_name": "v1",
                "assets": [{
                    "id": 10,
                    "name": "secret.zip",
                    "browser_download_url": "https://github.com/octo/private/releases/download/v1/secret.zip",
                    "size": 64,
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-01-01T00:00:00Z"
                }]
            }]))
            .into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn text_notice() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        "maintenance tonight\nsee https://status.example.com",
    )
}

async fn html_notice() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        "<strong>welcome</strong>",
    )
}

/// Starts the fake upstream on an ephemeral port.
pub async fn start_upstream() -> SocketAddr {
    let app = axum::Router::new()
        .route("/repos/{owner}/{name}/releases", get(list_releases))
        .route("/notice.txt", get(text_notice))
        .route("/notice", get(html_notice));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    address
}

/// Accepts connections and never answers them.
pub async fn start_silent_host() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    address
}
