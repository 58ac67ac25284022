pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::labeling::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Labeling API
        .route("/api/label", post(handlers::handle_label))
        .route("/api/tasks", get(handlers::handle_list_tasks))
        .with_state(state)
}
