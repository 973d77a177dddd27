// [apps/coordinator/src/handlers/tasks.rs]
/*!
 * APARATO: TASK SUBMISSION & INSPECTION (V1.0)
 * RESPONSABILIDAD: SUPERFICIE REST DE CARA AL CLIENTE HUMANO
 */

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json};
use axum::Extension;
use chrono::{DateTime, Utc};
use iris_domain_models::{Difficulty, SubtaskStatus, TaskMode, TaskStatus};
use iris_infra_store::repositories::TaskRepository;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoordinatorError;
use crate::middleware::Principal;
use crate::services::task_orchestrator::TaskOrchestrator;
use crate::state::AppState;

fn default_mode() -> TaskMode {
    TaskMode::Subtasks
}

#[derive(Debug, Deserialize)]
pub struct SubmitTaskRequest {
    pub prompt: String,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default = "default_mode")]
    pub mode: TaskMode,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub streaming: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitTaskResponse {
    pub task_id: Uuid,
    pub status: TaskStatus,
    pub subtasks_total: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct GetTaskResponse {
    pub task_id: Uuid,
    pub status: TaskStatus,
    pub final_response: Option<String>,
    pub subtasks_completed: usize,
    pub subtasks_total: usize,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

pub async fn submit_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<SubmitTaskRequest>,
) -> Result<impl IntoResponse, CoordinatorError> {
    let has_files = request.files.as_ref().is_some_and(|files| !files.is_empty());
    let orchestrator = TaskOrchestrator::new(&state);
    let task_id = orchestrator
        .submit(
            principal.account.id.to_string(),
            request.prompt,
            request.mode,
            has_files,
            request.difficulty,
            request.streaming,
        )
        .await?;

    let task_repo = TaskRepository::new(&state.store);
    let task = task_repo.find_by_id(task_id).await?.ok_or(CoordinatorError::NotFound(task_id.to_string()))?;
    let subtasks_total = task_repo.list_subtasks_for_task(task_id).await?.len();

    Ok(Json(SubmitTaskResponse {
        task_id,
        status: task.status,
        subtasks_total,
        created_at: task.created_at,
    }))
}

pub async fn get_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, CoordinatorError> {
    let task_repo = TaskRepository::new(&state.store);
    let task = task_repo
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| CoordinatorError::NotFound(task_id.to_string()))?;

    if task.principal_id != principal.account.id.to_string() {
        return Err(CoordinatorError::Forbidden("task belongs to a different principal".to_string()));
    }

    let subtasks = task_repo.list_subtasks_for_task(task_id).await?;
    let subtasks_completed = subtasks.iter().filter(|s| s.status == SubtaskStatus::Completed).count();

    Ok(Json(GetTaskResponse {
        task_id: task.id,
        status: task.status,
        final_response: task.final_response,
        subtasks_completed,
        subtasks_total: subtasks.len(),
        created_at: task.created_at,
        completed_at: task.completed_at,
    }))
}
