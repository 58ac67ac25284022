//! Axum route handlers for the Labeling API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::labeling::labeler::{label_text, MISSING_FIELDS_MESSAGE};
use crate::labeling::models::{LabelRequest, LabelResult, TaskCatalogResponse};
use crate::labeling::task::{Mode, Task};
use crate::state::AppState;

/// POST /api/label
///
/// Labels free text for the requested task and mode. Any body that does not
/// decode into the request shape is reported as missing fields.
pub async fn handle_label(
    State(state): State<AppState>,
    payload: Result<Json<LabelRequest>, JsonRejection>,
) -> Result<Json<LabelResult>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Label request body rejected: {rejection}");
        AppError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string())
    })?;

    let result = label_text(state.generator.as_deref(), request).await?;
    Ok(Json(result))
}

/// GET /api/tasks
///
/// Lists supported tasks with their labels and cardinality, plus the modes.
pub async fn handle_list_tasks() -> Json<TaskCatalogResponse> {
    Json(TaskCatalogResponse {
        tasks: Task::ALL.into_iter().map(Into::into).collect(),
        modes: Mode::ALL.to_vec(),
    })
}
