// [libs/core/wire-protocol/src/message_type.rs]
/*!
 * APARATO: WIRE MESSAGE TYPE (V1.0)
 */

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    NodeRegister,
    RegisterAck,
    Heartbeat,
    HeartbeatAck,
    TaskAssign,
    TaskResult,
    TaskError,
    TaskStream,
    ClassifyAssign,
    ClassifyResult,
    ClassifyError,
    Disconnect,
    Error,
}
