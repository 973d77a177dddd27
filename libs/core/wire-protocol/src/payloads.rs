// [libs/core/wire-protocol/src/payloads.rs]
/*!
 * APARATO: WIRE PAYLOADS (V1.0)
 * RESPONSABILIDAD: FORMA TIPADA DE CADA MENSAJE DEL PROTOCOLO BIDIRECCIONAL
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRegisterPayload {
    pub node_id: String,
    pub account_key: Option<String>,
    pub enrollment_token: Option<String>,
    pub public_key: String,
    pub model_name: String,
    pub max_context: u32,
    pub vram_gb: f64,
    pub gpu_name: String,
    pub model_params_b: f64,
    pub quant: String,
    pub tokens_per_second: f64,
    pub supports_vision: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAckPayload {
    pub success: bool,
    pub coordinator_public_key: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatPayload {
    pub current_load: u32,
    pub uptime_s: u64,
    pub sent_at: DateTime<Utc>,
    pub tokens_per_second: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeartbeatAckPayload {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAssignPayload {
    pub subtask_id: Uuid,
    pub task_id: Uuid,
    pub enc_prompt: String,
    pub timeout_s: u64,
    pub enable_streaming: bool,
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResultPayload {
    pub subtask_id: Uuid,
    pub task_id: Uuid,
    pub enc_response: String,
    pub execution_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskErrorPayload {
    pub subtask_id: Uuid,
    pub task_id: Uuid,
    pub error_code: String,
    pub error_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStreamPayload {
    pub subtask_id: Uuid,
    pub task_id: Uuid,
    pub enc_chunk: String,
    pub chunk_index: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyAssignPayload {
    pub correlation_id: Uuid,
    pub enc_prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResultPayload {
    pub correlation_id: Uuid,
    pub enc_classification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyErrorPayload {
    pub correlation_id: Uuid,
    pub error_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisconnectPayload {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}
