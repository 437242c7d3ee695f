// GET handlers: version, api/disk/usage, api/disk/groups

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use super::AppState;
use crate::version::{NAME, VERSION};

const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/disk/usage — runs a fresh survey and returns the full DiskReport.
pub(super) async fn disk_usage_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    check_token(&state, &headers)?;
    match state.disk_repo.get_disk_report().await {
        Ok(report) => Ok(axum::Json(report)),
        Err(e) => {
            tracing::warn!(error = %e, operation = "get_disk_report", "disk report failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/disk/groups — used/available bytes summed per logical group.
pub(super) async fn disk_groups_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    check_token(&state, &headers)?;
    match state.disk_repo.get_group_usage().await {
        Ok(groups) => Ok(axum::Json(groups)),
        Err(e) => {
            tracing::warn!(error = %e, operation = "get_group_usage", "group usage failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// No token configured means open access; otherwise the X-Access-Token
/// header must match exactly.
fn check_token(state: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let Some(expected) = &state.config.server.access_token else {
        return Ok(());
    };
    match headers.get(ACCESS_TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(got) if got == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
