// [libs/domain/models/src/subtask.rs]
/*!
 * APARATO: SUBTASK DOMAIN MODEL (V1.0)
 * RESPONSABILIDAD: UNIDAD ATOMICA DE TRABAJO ASIGNADA A UN WORKER
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubtaskStatus {
    Pending,
    Assigned,
    Completed,
    Failed,
    Timeout,
}

impl SubtaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SubtaskStatus::Completed | SubtaskStatus::Failed | SubtaskStatus::Timeout)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub id: Uuid,
    pub task_id: Uuid,
    pub node_id: Option<String>,
    pub prompt: String,
    pub response: Option<String>,
    pub status: SubtaskStatus,
    pub assigned_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub execution_time_ms: Option<u64>,
}

impl Subtask {
    /// Response is populated iff the subtask completed.
    pub fn invariant_holds(&self) -> bool {
        matches!(self.status, SubtaskStatus::Completed) == self.response.is_some()
    }
}
