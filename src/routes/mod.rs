use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

pub mod dashboard;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
}

/// Full application router with state attached.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes())
        .merge(dashboard::routes(&state.config))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
