// [libs/infra/store/src/repositories/task.rs]
/*!
 * APARATO: TASK & SUBTASK REPOSITORY
 * RESPONSABILIDAD: PERSISTENCIA DEL CICLO DE VIDA DE TAREAS Y SUS SUBTAREAS
 */

use iris_domain_models::{Difficulty, Subtask, SubtaskStatus, Task, TaskMode, TaskStatus};
use libsql::params;
use tracing::instrument;
use uuid::Uuid;

use crate::client::StoreClient;
use crate::errors::StoreError;
use crate::timestamp;

pub struct TaskRepository<'a> {
    client: &'a StoreClient,
}

impl<'a> TaskRepository<'a> {
    pub fn new(client: &'a StoreClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, task))]
    pub async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        conn.execute(
            "INSERT INTO tasks (
                id, principal_id, mode, difficulty, original_prompt, final_response,
                status, has_files, created_at, completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                task.id.to_string(),
                task.principal_id.clone(),
                mode_label(task.mode).to_string(),
                difficulty_label(task.difficulty).to_string(),
                task.original_prompt.clone(),
                task.final_response.clone(),
                status_label(task.status).to_string(),
                task.has_files as i64,
                task.created_at.to_rfc3339(),
                task.completed_at.map(|t| t.to_rfc3339()),
            ],
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let conn = self.client.get_connection()?;
        let mut rows = conn
            .query(&format!("{TASK_SELECT_COLUMNS} WHERE id = ?1"), params![id.to_string()])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(map_task_row(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: Uuid, status: TaskStatus) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        let affected = conn
            .execute(
                "UPDATE tasks SET status = ?1 WHERE id = ?2",
                params![status_label(status).to_string(), id.to_string()],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::TaskNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self, final_response))]
    pub async fn finalize(
        &self,
        id: Uuid,
        status: TaskStatus,
        final_response: Option<String>,
        completed_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        let affected = conn
            .execute(
                "UPDATE tasks SET status = ?1, final_response = ?2, completed_at = ?3 WHERE id = ?4",
                params![
                    status_label(status).to_string(),
                    final_response,
                    completed_at.to_rfc3339(),
                    id.to_string(),
                ],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::TaskNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self, subtask))]
    pub async fn insert_subtask(&self, subtask: &Subtask) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        conn.execute(
            "INSERT INTO subtasks (
                id, task_id, node_id, prompt, response, status,
                assigned_at, completed_at, execution_time_ms
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                subtask.id.to_string(),
                subtask.task_id.to_string(),
                subtask.node_id.clone(),
                subtask.prompt.clone(),
                subtask.response.clone(),
                subtask_status_label(subtask.status).to_string(),
                subtask.assigned_at.map(|t| t.to_rfc3339()),
                subtask.completed_at.map(|t| t.to_rfc3339()),
                subtask.execution_time_ms.map(|v| v as i64),
            ],
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_subtasks_for_task(&self, task_id: Uuid) -> Result<Vec<Subtask>, StoreError> {
        let conn = self.client.get_connection()?;
        let mut rows = conn
            .query(
                &format!("{SUBTASK_SELECT_COLUMNS} WHERE task_id = ?1"),
                params![task_id.to_string()],
            )
            .await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(map_subtask_row(&row)?);
        }
        Ok(out)
    }

    #[instrument(skip(self, response))]
    pub async fn complete_subtask(
        &self,
        id: Uuid,
        response: String,
        execution_time_ms: u64,
        completed_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        let affected = conn
            .execute(
                "UPDATE subtasks SET status = 'completed', response = ?1, execution_time_ms = ?2, completed_at = ?3
                 WHERE id = ?4",
                params![response, execution_time_ms as i64, completed_at.to_rfc3339(), id.to_string()],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::SubtaskNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn mark_subtask(&self, id: Uuid, status: SubtaskStatus) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        let affected = conn
            .execute(
                "UPDATE subtasks SET status = ?1 WHERE id = ?2",
                params![subtask_status_label(status).to_string(), id.to_string()],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::SubtaskNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn assign_subtask(&self, id: Uuid, node_id: &str, assigned_at: chrono::DateTime<chrono::Utc>) -> Result<(), StoreError> {
        let conn = self.client.get_connection()?;
        let affected = conn
            .execute(
                "UPDATE subtasks SET node_id = ?1, status = 'assigned', assigned_at = ?2 WHERE id = ?3",
                params![node_id.to_string(), assigned_at.to_rfc3339(), id.to_string()],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::SubtaskNotFound);
        }
        Ok(())
    }
}

const TASK_SELECT_COLUMNS: &str = r#"
    SELECT id, principal_id, mode, difficulty, original_prompt, final_response,
           status, has_files, created_at, completed_at
    FROM tasks
"#;

const SUBTASK_SELECT_COLUMNS: &str = r#"
    SELECT id, task_id, node_id, prompt, response, status, assigned_at, completed_at, execution_time_ms
    FROM subtasks
"#;

fn mode_label(mode: TaskMode) -> &'static str {
    match mode {
        TaskMode::Subtasks => "subtasks",
        TaskMode::Consensus => "consensus",
        TaskMode::Context => "context",
    }
}

fn parse_mode(raw: &str) -> Result<TaskMode, StoreError> {
    match raw {
        "subtasks" => Ok(TaskMode::Subtasks),
        "consensus" => Ok(TaskMode::Consensus),
        "context" => Ok(TaskMode::Context),
        other => Err(StoreError::MappingError(format!("unknown task mode '{other}'"))),
    }
}

fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Simple => "simple",
        Difficulty::Complex => "complex",
        Difficulty::Advanced => "advanced",
    }
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, StoreError> {
    match raw {
        "simple" => Ok(Difficulty::Simple),
        "complex" => Ok(Difficulty::Complex),
        "advanced" => Ok(Difficulty::Advanced),
        other => Err(StoreError::MappingError(format!("unknown difficulty '{other}'"))),
    }
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::Processing => "processing",
        TaskStatus::Completed => "completed",
        TaskStatus::Failed => "failed",
        TaskStatus::Partial => "partial",
    }
}

fn parse_status(raw: &str) -> Result<TaskStatus, StoreError> {
    match raw {
        "pending" => Ok(TaskStatus::Pending),
        "processing" => Ok(TaskStatus::Processing),
        "completed" => Ok(TaskStatus::Completed),
        "failed" => Ok(TaskStatus::Failed),
        "partial" => Ok(TaskStatus::Partial),
        other => Err(StoreError::MappingError(format!("unknown task status '{other}'"))),
    }
}

fn subtask_status_label(status: SubtaskStatus) -> &'static str {
    match status {
        SubtaskStatus::Pending => "pending",
        SubtaskStatus::Assigned => "assigned",
        SubtaskStatus::Completed => "completed",
        SubtaskStatus::Failed => "failed",
        SubtaskStatus::Timeout => "timeout",
    }
}

fn parse_subtask_status(raw: &str) -> Result<SubtaskStatus, StoreError> {
    match raw {
        "pending" => Ok(SubtaskStatus::Pending),
        "assigned" => Ok(SubtaskStatus::Assigned),
        "completed" => Ok(SubtaskStatus::Completed),
        "failed" => Ok(SubtaskStatus::Failed),
        "timeout" => Ok(SubtaskStatus::Timeout),
        other => Err(StoreError::MappingError(format!("unknown subtask status '{other}'"))),
    }
}

fn map_task_row(row: &libsql::Row) -> Result<Task, StoreError> {
    let id: String = row.get(0)?;
    let principal_id: String = row.get(1)?;
    let mode: String = row.get(2)?;
    let difficulty: String = row.get(3)?;
    let original_prompt: String = row.get(4)?;
    let final_response: Option<String> = row.get(5)?;
    let status: String = row.get(6)?;
    let has_files: i64 = row.get(7)?;
    let created_at: String = row.get(8)?;
    let completed_at: Option<String> = row.get(9)?;

    Ok(Task {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        principal_id,
        mode: parse_mode(&mode)?,
        difficulty: parse_difficulty(&difficulty)?,
        original_prompt,
        final_response,
        status: parse_status(&status)?,
        has_files: has_files != 0,
        created_at: timestamp::parse(&created_at)?,
        completed_at: completed_at.map(|raw| timestamp::parse(&raw)).transpose()?,
    })
}

fn map_subtask_row(row: &libsql::Row) -> Result<Subtask, StoreError> {
    let id: String = row.get(0)?;
    let task_id: String = row.get(1)?;
    let node_id: Option<String> = row.get(2)?;
    let prompt: String = row.get(3)?;
    let response: Option<String> = row.get(4)?;
    let status: String = row.get(5)?;
    let assigned_at: Option<String> = row.get(6)?;
    let completed_at: Option<String> = row.get(7)?;
    let execution_time_ms: Option<i64> = row.get(8)?;

    Ok(Subtask {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        task_id: Uuid::parse_str(&task_id).map_err(|e| StoreError::MappingError(e.to_string()))?,
        node_id,
        prompt,
        response,
        status: parse_subtask_status(&status)?,
        assigned_at: assigned_at.map(|raw| timestamp::parse(&raw)).transpose()?,
        completed_at: completed_at.map(|raw| timestamp::parse(&raw)).transpose()?,
        execution_time_ms: execution_time_ms.map(|v| v as u64),
    })
}
