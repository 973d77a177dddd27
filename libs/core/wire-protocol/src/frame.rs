// [libs/core/wire-protocol/src/frame.rs]
/*!
 * APARATO: WIRE FRAME (V1.0)
 * RESPONSABILIDAD: SOBRE COMUN A TODO MENSAJE {type, payload, ts, signature?}
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message_type::MessageType;
use crate::payloads::*;

/// A tagged union discriminated by `type`; each arm carries a strongly typed
/// payload record. `#[serde(tag = "type", content = "payload")]` reproduces
/// the wire shape `{type, payload, ...}` exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum FrameBody {
    NodeRegister(NodeRegisterPayload),
    RegisterAck(RegisterAckPayload),
    Heartbeat(HeartbeatPayload),
    HeartbeatAck(HeartbeatAckPayload),
    TaskAssign(TaskAssignPayload),
    TaskResult(TaskResultPayload),
    TaskError(TaskErrorPayload),
    TaskStream(TaskStreamPayload),
    ClassifyAssign(ClassifyAssignPayload),
    ClassifyResult(ClassifyResultPayload),
    ClassifyError(ClassifyErrorPayload),
    Disconnect(DisconnectPayload),
    Error(ErrorPayload),
}

impl FrameBody {
    pub fn message_type(&self) -> MessageType {
        match self {
            FrameBody::NodeRegister(_) => MessageType::NodeRegister,
            FrameBody::RegisterAck(_) => MessageType::RegisterAck,
            FrameBody::Heartbeat(_) => MessageType::Heartbeat,
            FrameBody::HeartbeatAck(_) => MessageType::HeartbeatAck,
            FrameBody::TaskAssign(_) => MessageType::TaskAssign,
            FrameBody::TaskResult(_) => MessageType::TaskResult,
            FrameBody::TaskError(_) => MessageType::TaskError,
            FrameBody::TaskStream(_) => MessageType::TaskStream,
            FrameBody::ClassifyAssign(_) => MessageType::ClassifyAssign,
            FrameBody::ClassifyResult(_) => MessageType::ClassifyResult,
            FrameBody::ClassifyError(_) => MessageType::ClassifyError,
            FrameBody::Disconnect(_) => MessageType::Disconnect,
            FrameBody::Error(_) => MessageType::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    #[serde(flatten)]
    pub body: FrameBody,
    pub ts: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Frame {
    pub fn new(body: FrameBody) -> Self {
        Self { body, ts: Utc::now(), signature: None }
    }
}
