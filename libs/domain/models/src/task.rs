// [libs/domain/models/src/task.rs]
/*!
 * APARATO: TASK DOMAIN MODEL (V1.0)
 * RESPONSABILIDAD: ENTIDAD DE TAREA DE CLIENTE Y SU MAQUINA DE ESTADOS
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Simple,
    Complex,
    Advanced,
}

impl Difficulty {
    /// Per-subtask timeout, §4.13.
    pub fn timeout_secs(self) -> u64 {
        match self {
            Difficulty::Simple => 60,
            Difficulty::Complex => 300,
            Difficulty::Advanced => 600,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskMode {
    Subtasks,
    Consensus,
    Context,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Partial,
}

impl TaskStatus {
    /// Transitions are strictly forward; used to assert the invariant at write time.
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Completed)
                | (Processing, Failed)
                | (Processing, Partial)
                | (Pending, Failed) // immediate failure, e.g. vision routing with no worker
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub principal_id: String,
    pub mode: TaskMode,
    pub difficulty: Difficulty,
    pub original_prompt: String,
    pub final_response: Option<String>,
    pub status: TaskStatus,
    pub has_files: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
