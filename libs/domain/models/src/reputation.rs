// [libs/domain/models/src/reputation.rs]
/*!
 * APARATO: REPUTATION EVENT MODEL (V1.0)
 * RESPONSABILIDAD: REGISTRO INMUTABLE DE EVENTOS QUE MUEVEN LA REPUTACION DE UN NODO
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReputationReason {
    TaskCompleted,
    TaskCompletedFast,
    TaskTimeout,
    TaskInvalid,
    UptimeHour,
    BrokenPromise,
    WeeklyDecay,
}

impl ReputationReason {
    pub fn label(self) -> &'static str {
        match self {
            ReputationReason::TaskCompleted => "task_completed",
            ReputationReason::TaskCompletedFast => "task_completed_fast",
            ReputationReason::TaskTimeout => "task_timeout",
            ReputationReason::TaskInvalid => "task_invalid",
            ReputationReason::UptimeHour => "uptime_hour",
            ReputationReason::BrokenPromise => "broken_promise",
            ReputationReason::WeeklyDecay => "weekly_decay",
        }
    }
}

/// Append-only; a Node's `reputation` is the clamped running sum plus decay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationEvent {
    pub node_id: String,
    pub delta: f64,
    pub reason: ReputationReason,
    pub at: DateTime<Utc>,
}
