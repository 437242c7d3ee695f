// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::disk_repo::DiskRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) disk_repo: Arc<DiskRepo>,
    pub(crate) config: AppConfig,
}

pub fn app(disk_repo: Arc<DiskRepo>, config: AppConfig) -> Router {
    let state = AppState { disk_repo, config };
    Router::new()
        .route("/", get(|| async { "diskwatch: disk usage collection server" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/disk/usage", get(http::disk_usage_handler)) // GET /api/disk/usage
        .route("/api/disk/groups", get(http::disk_groups_handler)) // GET /api/disk/groups
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
