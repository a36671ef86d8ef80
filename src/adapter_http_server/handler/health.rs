use axum::http::StatusCode;

/// Liveness check. The service holds no state worth checking.
pub async fn handler() -> StatusCode {
    StatusCode::OK
}
